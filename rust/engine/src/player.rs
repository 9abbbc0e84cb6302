use serde::{Deserialize, Serialize};

use crate::hand::Hand;

/// The two chairs at the table: the local player and the policy-driven
/// opponent.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Seat::Player => "player",
            Seat::Opponent => "opponent",
        }
    }
}

/// Represents an action submitted to the engine.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Give up the round; the other seat takes the pot
    Fold,
    /// Match the outstanding bet, or check when nothing is owed
    Call,
    /// Raise the actor's total bet for this betting round to the given amount
    Raise(u32),
    /// Replace the cards at these hand indices (discard phase only)
    Discard(Vec<usize>),
    /// Keep the remaining cards and finish the discard phase
    StandPat,
}

/// Per-seat state. Money persists across rounds; everything else is reset
/// when a round starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    money: u32,
    current_bet: u32,
    hand: Option<Hand>,
    has_acted: bool,
}

impl PlayerState {
    pub fn new(money: u32) -> Self {
        Self {
            money,
            current_bet: 0,
            hand: None,
            has_acted: false,
        }
    }

    pub fn money(&self) -> u32 {
        self.money
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }
    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    /// Chips still in front of the player plus chips committed this betting
    /// round.
    pub fn total_chips(&self) -> u32 {
        self.money + self.current_bet
    }

    pub fn is_all_in(&self) -> bool {
        self.money == 0
    }

    pub(crate) fn hand_mut(&mut self) -> Option<&mut Hand> {
        self.hand.as_mut()
    }

    pub(crate) fn set_hand(&mut self, hand: Hand) {
        self.hand = Some(hand);
    }

    pub(crate) fn set_acted(&mut self, acted: bool) {
        self.has_acted = acted;
    }

    pub(crate) fn reset_for_round(&mut self) {
        self.current_bet = 0;
        self.hand = None;
        self.has_acted = false;
    }

    /// Moves `amount` from money into the current bet.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `amount` exceeds money; the rules layer
    /// clamps every amount before it gets here.
    pub(crate) fn commit(&mut self, amount: u32) {
        debug_assert!(amount <= self.money, "commit beyond money");
        self.money -= amount;
        self.current_bet += amount;
    }

    /// Moves `amount` from the current bet back to money.
    pub(crate) fn refund(&mut self, amount: u32) {
        debug_assert!(amount <= self.current_bet, "refund beyond bet");
        self.current_bet -= amount;
        self.money += amount;
    }

    /// Takes money directly (ante). Returns the amount actually paid.
    pub(crate) fn pay(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.money);
        self.money -= paid;
        paid
    }

    pub(crate) fn take_bet(&mut self) -> u32 {
        std::mem::take(&mut self.current_bet)
    }

    pub(crate) fn add_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }
}
