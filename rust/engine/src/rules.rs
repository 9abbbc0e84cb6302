use serde::{Deserialize, Serialize};

use crate::errors::IllegalAction;
use crate::game::Phase;
use crate::player::Action as A;
use crate::policy::{Decision, PolicyAction};

/// Chip granularity for policy bet sizing.
pub const BET_UNIT: u32 = 5;

/// Betting situation from the acting seat's point of view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BettingView {
    pub money: u32,
    pub current_bet: u32,
    pub opponent_money: u32,
    pub opponent_bet: u32,
    pub last_raise: u32,
    pub min_raise: u32,
}

impl BettingView {
    pub fn to_call(&self) -> u32 {
        self.opponent_bet.saturating_sub(self.current_bet)
    }

    /// Whether a raise of any size is open to the actor.
    pub fn can_raise(&self) -> bool {
        self.raise_block().is_none()
    }

    fn raise_block(&self) -> Option<IllegalAction> {
        if self.money < self.min_raise || self.money <= self.last_raise {
            return Some(IllegalAction::InsufficientFunds {
                money: self.money,
                required: self.last_raise.max(self.min_raise.saturating_sub(1)),
            });
        }
        if self.opponent_money == 0 {
            return Some(IllegalAction::OpponentAllIn);
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedAction {
    Fold,
    Check,
    Call(u32),
    /// Call capped at the caller's money; `refund` goes back to the raiser.
    AllInCall { amount: u32, refund: u32 },
    /// Raise to a total of `to`, adding `chips`.
    Raise { to: u32, chips: u32 },
    AllInRaise { to: u32, chips: u32 },
}

/// Validates a betting action against the actor's funds and the table.
///
/// Amounts beyond the actor's money are clamped to all-in rather than
/// rejected. A raise is rejected when the actor cannot raise at all, or when
/// it is short of `opponent_bet + min_raise` without being all-in.
///
/// # Examples
///
/// ```
/// use fivedraw_engine::player::Action;
/// use fivedraw_engine::rules::{validate_action, BettingView, ResolvedAction};
///
/// let view = BettingView {
///     money: 40,
///     current_bet: 0,
///     opponent_money: 50,
///     opponent_bet: 60,
///     last_raise: 60,
///     min_raise: 5,
/// };
/// // short call: all-in for 40, the raiser gets 20 back
/// assert_eq!(
///     validate_action(&view, &Action::Call),
///     Ok(ResolvedAction::AllInCall { amount: 40, refund: 20 })
/// );
/// ```
///
/// ```
/// use fivedraw_engine::errors::IllegalAction;
/// use fivedraw_engine::player::Action;
/// use fivedraw_engine::rules::{validate_action, BettingView};
///
/// let view = BettingView {
///     money: 90,
///     current_bet: 0,
///     opponent_money: 80,
///     opponent_bet: 10,
///     last_raise: 10,
///     min_raise: 5,
/// };
/// assert!(matches!(
///     validate_action(&view, &Action::Raise(12)),
///     Err(IllegalAction::RaiseBelowMinimum { amount: 12, minimum: 15 })
/// ));
/// ```
pub fn validate_action(view: &BettingView, action: &A) -> Result<ResolvedAction, IllegalAction> {
    match action {
        A::Fold => Ok(ResolvedAction::Fold),
        A::Call => Ok(resolve_call(view)),
        A::Raise(to) => {
            if let Some(block) = view.raise_block() {
                return Err(block);
            }
            let all_in_to = view.current_bet + view.money;
            if *to >= all_in_to {
                if all_in_to <= view.opponent_bet {
                    return Ok(resolve_call(view));
                }
                return Ok(ResolvedAction::AllInRaise {
                    to: all_in_to,
                    chips: view.money,
                });
            }
            let minimum = view.opponent_bet + view.min_raise;
            if *to < minimum {
                return Err(IllegalAction::RaiseBelowMinimum {
                    amount: *to,
                    minimum,
                });
            }
            Ok(ResolvedAction::Raise {
                to: *to,
                chips: to - view.current_bet,
            })
        }
        A::Discard(_) | A::StandPat => Err(IllegalAction::WrongPhase {
            phase: Phase::Betting,
        }),
    }
}

fn resolve_call(view: &BettingView) -> ResolvedAction {
    let to_call = view.to_call();
    if to_call == 0 {
        ResolvedAction::Check
    } else if view.money >= to_call {
        ResolvedAction::Call(to_call)
    } else {
        ResolvedAction::AllInCall {
            amount: view.money,
            refund: to_call - view.money,
        }
    }
}

/// Policy bet size: half the actor's money scaled by strength, rounded to
/// the nearest [`BET_UNIT`] (halves up), and at least a minimum raise over
/// the opponent's bet whenever the actor can afford one.
///
/// ```
/// use fivedraw_engine::rules::size_bet;
///
/// // floor(0.8 * 90 / 2) = 36 -> 35
/// assert_eq!(size_bet(0.8, 90, 0, 5), 35);
/// // small strength is lifted to opponent_bet + 5
/// assert_eq!(size_bet(0.1, 90, 20, 5), 25);
/// ```
pub fn size_bet(strength: f32, money: u32, opponent_bet: u32, min_raise: u32) -> u32 {
    let strength = if strength.is_finite() {
        strength.clamp(0.0, 1.0) as f64
    } else {
        0.0
    };
    let raw = (strength * money as f64 / 2.0).floor() as u32;
    let mut bet = round_half_up(raw, BET_UNIT);
    if opponent_bet + min_raise < money {
        bet = bet.max(opponent_bet + min_raise);
    }
    bet
}

fn round_half_up(value: u32, unit: u32) -> u32 {
    (value * 2 + unit) / (2 * unit) * unit
}

/// Turns a policy decision into an engine action.
///
/// `Bet` becomes `Call` when the actor cannot raise, and a sized bet below
/// the legal minimum is lifted to it so that a raise is never a non-raise.
pub fn resolve_decision(decision: &Decision, view: &BettingView) -> A {
    match decision.action {
        PolicyAction::Fold => A::Fold,
        PolicyAction::Call => A::Call,
        PolicyAction::Bet if !view.can_raise() => A::Call,
        PolicyAction::Bet => {
            let sized = size_bet(
                decision.strength,
                view.money,
                view.opponent_bet,
                view.min_raise,
            );
            A::Raise(sized.max(view.opponent_bet + view.min_raise))
        }
    }
}
