//! Rule-based policy driven by hand category.
//!
//! Needs no data file, so it is the default opponent. It rates the hand on a
//! 0-10 scale from its category and top tie-break rank, then bets, calls or
//! folds against the price of the call.

use fivedraw_engine::hand::{HandCategory, Evaluation, Hand, evaluate};
use fivedraw_engine::policy::{Decision, DecisionPolicy, PolicyAction, PotContext};

/// Deterministic category-driven opponent.
///
/// # Strategy
///
/// - Strong hands (straight or better): bet
/// - Medium hands (two pair, trips): call
/// - One pair: call when the price is at most 30% of the pot after calling
/// - High card: check when free, otherwise fold
///
/// # Example
///
/// ```rust
/// use fivedraw_ai::baseline::BaselinePolicy;
/// use fivedraw_engine::hand::Hand;
/// use fivedraw_engine::policy::{DecisionPolicy, PolicyAction, PotContext};
///
/// let mut policy = BaselinePolicy::new();
/// let ctx = PotContext { pot: 20, to_call: 0, money: 90, opponent_bet: 0, round: 1 };
/// let flush: Hand = "2h 7h 9h Jh Kh".parse().unwrap();
/// assert_eq!(policy.decide(&flush, &ctx).action, PolicyAction::Bet);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselinePolicy;

impl BaselinePolicy {
    pub fn new() -> Self {
        Self
    }

    /// Hand strength on a 0-10 scale.
    fn hand_strength(eval: &Evaluation) -> u8 {
        let base = match eval.category {
            HandCategory::HighCard => 1,
            HandCategory::OnePair => 3,
            HandCategory::TwoPair => 5,
            HandCategory::ThreeOfAKind => 6,
            HandCategory::Straight => 7,
            HandCategory::Flush => 8,
            HandCategory::FullHouse => 9,
            HandCategory::FourOfAKind => 10,
            HandCategory::StraightFlush => 10,
        };
        // queen or better leading the tie-break
        let kicker_boost = match eval.tiebreak.as_slice().first() {
            Some(&top) if top >= 10 => 1,
            _ => 0,
        };
        (base + kicker_boost).min(10)
    }

    /// Share of the pot the call would make up once paid.
    fn call_price(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 0.0;
        }
        to_call as f32 / (pot + to_call) as f32
    }

    fn decide_action(strength: u8, ctx: &PotContext) -> PolicyAction {
        let price = Self::call_price(ctx.pot, ctx.to_call);
        match strength {
            7..=10 => PolicyAction::Bet,
            5..=6 => PolicyAction::Call,
            _ if ctx.to_call == 0 => PolicyAction::Call,
            3..=4 if price <= 0.3 => PolicyAction::Call,
            _ => PolicyAction::Fold,
        }
    }
}

impl DecisionPolicy for BaselinePolicy {
    fn decide(&mut self, hand: &Hand, ctx: &PotContext) -> Decision {
        let strength = Self::hand_strength(&evaluate(hand));
        Decision {
            action: Self::decide_action(strength, ctx),
            strength: f32::from(strength) / 10.0,
        }
    }

    fn name(&self) -> &str {
        "BaselinePolicy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pot: u32, to_call: u32) -> PotContext {
        PotContext {
            pot,
            to_call,
            money: 80,
            opponent_bet: to_call,
            round: 1,
        }
    }

    fn strength(s: &str) -> u8 {
        BaselinePolicy::hand_strength(&evaluate(&s.parse().unwrap()))
    }

    #[test]
    fn test_baseline_policy_name() {
        assert_eq!(BaselinePolicy::new().name(), "BaselinePolicy");
    }

    #[test]
    fn test_strength_follows_category() {
        assert_eq!(strength("2s 5d 9c Jh 8s"), 1);
        assert_eq!(strength("2s 5d 9c Jh Ks"), 2);
        assert_eq!(strength("Qs Qd 9c 5h 3s"), 4);
        assert_eq!(strength("6d 7d 8d 9d 10d"), 10);
    }

    #[test]
    fn test_high_card_checks_free_but_folds_to_a_bet() {
        assert_eq!(BaselinePolicy::decide_action(1, &ctx(20, 0)), PolicyAction::Call);
        assert_eq!(BaselinePolicy::decide_action(1, &ctx(20, 5)), PolicyAction::Fold);
    }

    #[test]
    fn test_one_pair_calls_only_cheap_bets() {
        // 5 / 25 = 0.2
        assert_eq!(BaselinePolicy::decide_action(3, &ctx(20, 5)), PolicyAction::Call);
        // 40 / 60
        assert_eq!(BaselinePolicy::decide_action(3, &ctx(20, 40)), PolicyAction::Fold);
    }

    #[test]
    fn test_strong_hands_bet_with_scaled_strength() {
        let mut p = BaselinePolicy::new();
        let d = p.decide(&"Kh Kc Kd 2s 2h".parse().unwrap(), &ctx(20, 10));
        assert_eq!(d.action, PolicyAction::Bet);
        assert!((d.strength - 1.0).abs() < f32::EPSILON);
    }
}
