use thiserror::Error;

use crate::game::Phase;
use crate::player::Seat;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Drawing from an exhausted deck. Two players and one discard round never
    /// need more than 20 cards, so this signals a broken invariant.
    #[error("Deck is empty")]
    EmptyDeck,
    #[error("Illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),
}

impl GameError {
    pub fn is_illegal_action(&self) -> bool {
        matches!(self, GameError::IllegalAction(_))
    }
}

/// Reasons an action is rejected. Rejected actions never mutate engine state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("Action not allowed during {phase:?}")]
    WrongPhase { phase: Phase },
    #[error("It's not {actual:?}'s turn (expected {expected:?})")]
    NotYourTurn { expected: Seat, actual: Seat },
    #[error("Waiting for {seat:?} to act")]
    AwaitingAction { seat: Seat },
    #[error("Insufficient chips to raise: have {money}, need more than {required}")]
    InsufficientFunds { money: u32, required: u32 },
    #[error("Opponent is all-in, raising is not possible")]
    OpponentAllIn,
    #[error("Raise to {amount} is below the minimum of {minimum}")]
    RaiseBelowMinimum { amount: u32, minimum: u32 },
    #[error("Card index {index} is out of range")]
    InvalidCardIndex { index: usize },
    #[error("Card index {index} listed more than once")]
    DuplicateCardIndex { index: usize },
    #[error("Card index {index} was already discarded this round")]
    AlreadyDiscarded { index: usize },
    #[error("{seat:?}'s hand is not revealed yet")]
    HandHidden { seat: Seat },
    #[error("No hand has been dealt")]
    NoHand,
    #[error("No decision policy is loaded")]
    NoPolicy,
    #[error("Game is over")]
    GameOver,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("Malformed card: {0:?}")]
    Malformed(String),
    #[error("Unknown suit: {0:?}")]
    UnknownSuit(char),
    #[error("Unknown rank: {0:?}")]
    UnknownRank(String),
    #[error("A hand needs exactly 5 cards, got {0}")]
    WrongHandSize(usize),
    #[error("Card {0} appears more than once")]
    DuplicateCard(String),
}
