//! Decision policy interface for the opponent seat.
//!
//! The [`Engine`](crate::engine::Engine) asks a boxed [`DecisionPolicy`] what
//! to do whenever the opponent is to act. It never inspects which backend is
//! behind the box; table lookup and model inference live in `fivedraw-ai`.

use serde::{Deserialize, Serialize};

use crate::hand::Hand;

/// What a policy may recommend. Declaration order is also the tie-break
/// order when probabilities are equal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    Fold,
    Call,
    Bet,
}

impl PolicyAction {
    pub const ALL: [PolicyAction; 3] = [PolicyAction::Fold, PolicyAction::Call, PolicyAction::Bet];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyAction::Fold => "fold",
            PolicyAction::Call => "call",
            PolicyAction::Bet => "bet",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: PolicyAction,
    /// Confidence in `[0, 1]`; drives bet sizing.
    pub strength: f32,
}

/// Betting situation as seen by the acting seat.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotContext {
    /// Chips in the middle: swept pot plus both current bets.
    pub pot: u32,
    /// Amount the actor must add to match the other seat.
    pub to_call: u32,
    /// Actor's remaining money.
    pub money: u32,
    /// The other seat's current bet.
    pub opponent_bet: u32,
    /// Betting round counter (0, 1 or 2).
    pub round: u8,
}

/// Turns a hand and pot context into an action.
///
/// Implementations take `&mut self` so they may own a random source for
/// their fallback behaviour.
///
/// # Example Implementation
///
/// ```rust
/// use fivedraw_engine::hand::Hand;
/// use fivedraw_engine::policy::{Decision, DecisionPolicy, PolicyAction, PotContext};
///
/// struct AlwaysCall;
///
/// impl DecisionPolicy for AlwaysCall {
///     fn decide(&mut self, _hand: &Hand, _ctx: &PotContext) -> Decision {
///         Decision { action: PolicyAction::Call, strength: 1.0 }
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysCall"
///     }
/// }
/// ```
pub trait DecisionPolicy: Send {
    fn decide(&mut self, hand: &Hand, ctx: &PotContext) -> Decision;

    fn name(&self) -> &str;
}

/// Picks the most probable action from a `[fold, call, bet]` vector.
///
/// Ties go to the earliest action, so `[0.4, 0.4, 0.2]` folds. NaN
/// entries are never selected over finite ones. The reported
/// strength is clamped to `[0, 1]`.
///
/// ```
/// use fivedraw_engine::policy::{select_action, PolicyAction};
///
/// let d = select_action(&[0.1, 0.2, 0.7]);
/// assert_eq!(d.action, PolicyAction::Bet);
/// assert!((d.strength - 0.7).abs() < f32::EPSILON);
/// ```
pub fn select_action(probs: &[f32; 3]) -> Decision {
    let mut best = 0;
    for i in 1..probs.len() {
        if probs[i] > probs[best] || (probs[best].is_nan() && !probs[i].is_nan()) {
            best = i;
        }
    }
    let strength = probs[best];
    Decision {
        action: PolicyAction::ALL[best],
        strength: if strength.is_nan() { 0.0 } else { strength.clamp(0.0, 1.0) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_prefer_earlier_actions() {
        assert_eq!(select_action(&[0.4, 0.4, 0.2]).action, PolicyAction::Fold);
        assert_eq!(select_action(&[0.1, 0.45, 0.45]).action, PolicyAction::Call);
        assert_eq!(select_action(&[0.0, 0.0, 0.0]).action, PolicyAction::Fold);
    }

    #[test]
    fn strength_is_clamped_to_unit_range() {
        let d = select_action(&[0.0, 0.0, 3.5]);
        assert_eq!(d.action, PolicyAction::Bet);
        assert_eq!(d.strength, 1.0);
        assert_eq!(select_action(&[f32::NAN; 3]).strength, 0.0);
    }

    #[test]
    fn nan_is_skipped() {
        let d = select_action(&[f32::NAN, 0.3, 0.1]);
        assert_eq!(d.action, PolicyAction::Call);
    }
}
