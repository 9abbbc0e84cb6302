use serde::{Deserialize, Serialize};

use crate::hand::{HandCategory, Hand, TieBreak};
use crate::player::Seat;

/// Round lifecycle. `GameOver` is terminal until a restart.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    RoundStart,
    Ante,
    Betting,
    Discard,
    Showdown,
    NextRound,
    GameOver,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinReason {
    Fold,
    Showdown,
}

/// How a finished round was settled.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RoundOutcome {
    Won {
        winner: Seat,
        amount: u32,
        reason: WinReason,
    },
    /// Identical category and tie-break at showdown.
    Draw {
        pot: u32,
        /// Chips returned to each seat, player first. Zero under the forfeit
        /// tie policy.
        returned: [u32; 2],
    },
}

/// Read-only view of one seat. The opponent's hand stays `None` until it is
/// revealed at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub seat: Seat,
    pub money: u32,
    pub current_bet: u32,
    pub has_acted: bool,
    pub hand: Option<Hand>,
    pub discarded: Vec<usize>,
}

/// Snapshot of the engine handed to presentation code.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub round_no: u32,
    pub phase: Phase,
    /// Betting round counter: 0 and 1 before the discard, 2 after it.
    pub round: u8,
    pub pot: u32,
    pub last_raise: u32,
    pub to_act: Option<Seat>,
    /// Player first, then opponent.
    pub players: [PlayerView; 2],
    pub outcome: Option<RoundOutcome>,
}

impl RoundState {
    pub fn player(&self, seat: Seat) -> &PlayerView {
        &self.players[seat.index()]
    }

    /// Sum of every chip bucket; constant from the ante to the payout.
    pub fn total_chips(&self) -> u32 {
        self.pot
            + self
                .players
                .iter()
                .map(|p| p.money + p.current_bet)
                .sum::<u32>()
    }
}

/// A revealed hand's strength.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRank {
    pub category: HandCategory,
    pub tiebreak: TieBreak,
}
