use serde::{Deserialize, Serialize};

use crate::game::RoundOutcome;
use crate::hand::{HandCategory, TieBreak};
use crate::player::Seat;
use crate::policy::Decision;
use crate::rules::ResolvedAction;

/// State changes emitted by the engine, in order. Money-moving events carry
/// the amounts that moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted {
        round_no: u32,
    },
    CardsDealt {
        deck_remaining: usize,
    },
    AntePosted {
        seat: Seat,
        amount: u32,
    },
    /// The opponent's policy output before it was turned into an action.
    PolicyDecided {
        decision: Decision,
    },
    Acted {
        seat: Seat,
        round: u8,
        action: ResolvedAction,
    },
    BettingComplete {
        round: u8,
        pot: u32,
    },
    /// Both seats had no money when a betting round opened.
    BettingSkipped {
        round: u8,
    },
    Discarded {
        seat: Seat,
        indices: Vec<usize>,
    },
    HandRevealed {
        seat: Seat,
        category: HandCategory,
        tiebreak: TieBreak,
    },
    RoundEnded {
        outcome: RoundOutcome,
    },
    GameOver {
        winner: Option<Seat>,
    },
}
