//! Terminal formatting for cards, hands, engine events and round results.
//!
//! Suits render as Unicode symbols where the terminal is known to support
//! them, with an ASCII letter fallback:
//!
//! - **Unicode mode**: ♠ ♥ ♦ ♣
//! - **ASCII mode**: s h d c
//!
//! ```rust
//! use fivedraw_engine::cards::{Card, Rank, Suit};
//! use fivedraw_cli::formatters::format_card;
//!
//! let ten = Card::new(Rank::Ten, Suit::Hearts);
//! assert!(format_card(&ten) == "10♥" || format_card(&ten) == "10h");
//! ```

use fivedraw_engine::cards::{Card, Suit};
use fivedraw_engine::events::GameEvent;
use fivedraw_engine::game::{RoundOutcome, WinReason};
use fivedraw_engine::hand::Hand;
use fivedraw_engine::player::Seat;
use fivedraw_engine::rules::ResolvedAction;

/// Whether the terminal can show suit symbols. Windows consoles only when a
/// modern terminal is detected; everything else is assumed to.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> &'static str {
    if supports_unicode() {
        match suit {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    } else {
        match suit {
            Suit::Spades => "s",
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
        }
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(&card.suit))
}

/// Cards with their positions, the numbers `discard` expects.
///
/// ```rust
/// use fivedraw_engine::hand::Hand;
/// # use fivedraw_cli::formatters::format_hand;
///
/// let hand: Hand = "As Kd 9c 7h 2s".parse().unwrap();
/// let line = format_hand(&hand);
/// assert!(line.starts_with("0:A"));
/// assert!(line.contains("4:2"));
/// ```
pub fn format_hand(hand: &Hand) -> String {
    hand.cards()
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}:{}", i, format_card(c)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_seat(seat: Seat) -> &'static str {
    match seat {
        Seat::Player => "You",
        Seat::Opponent => "Opponent",
    }
}

pub fn format_action(action: &ResolvedAction) -> String {
    match action {
        ResolvedAction::Fold => "fold".to_string(),
        ResolvedAction::Check => "check".to_string(),
        ResolvedAction::Call(amount) => format!("call {}", amount),
        ResolvedAction::AllInCall { amount, refund } if *refund > 0 => {
            format!("call all-in {} ({} returned)", amount, refund)
        }
        ResolvedAction::AllInCall { amount, .. } => format!("call all-in {}", amount),
        ResolvedAction::Raise { to, .. } => format!("raise to {}", to),
        ResolvedAction::AllInRaise { to, .. } => format!("raise all-in to {}", to),
    }
}

pub fn format_outcome(outcome: &RoundOutcome) -> String {
    match outcome {
        RoundOutcome::Won {
            winner,
            amount,
            reason,
        } => {
            let how = match reason {
                WinReason::Fold => "by fold",
                WinReason::Showdown => "at showdown",
            };
            format!("{} won {} {}", format_seat(*winner), amount, how)
        }
        RoundOutcome::Draw { pot, returned } if returned.iter().any(|r| *r > 0) => format!(
            "Draw, pot of {} split {}/{}",
            pot, returned[0], returned[1]
        ),
        RoundOutcome::Draw { pot, .. } => format!("Draw, pot of {} forfeited", pot),
    }
}

/// One display line per event; events with nothing to show return `None`.
pub fn format_event(event: &GameEvent) -> Option<String> {
    let line = match event {
        GameEvent::RoundStarted { round_no } => format!("=== Round {} ===", round_no),
        GameEvent::CardsDealt { .. } => return None,
        GameEvent::AntePosted { seat, amount } => {
            format!("{} ante {}", format_seat(*seat), amount)
        }
        GameEvent::PolicyDecided { .. } => return None,
        GameEvent::Acted { seat, action, .. } => {
            format!("{}: {}", format_seat(*seat), format_action(action))
        }
        GameEvent::BettingComplete { pot, .. } => format!("Pot: {}", pot),
        GameEvent::BettingSkipped { .. } => "Both all-in, no betting".to_string(),
        GameEvent::Discarded { seat, indices } => match seat {
            Seat::Player => format!("You discard {:?}", indices),
            Seat::Opponent => format!("Opponent draws {}", indices.len()),
        },
        GameEvent::HandRevealed { seat, category, .. } => {
            format!("{} show {}", format_seat(*seat), category.name())
        }
        GameEvent::RoundEnded { outcome } => format_outcome(outcome),
        GameEvent::GameOver { winner } => match winner {
            Some(seat) => format!("Game over: {} win the match", format_seat(*seat)),
            None => "Game over: nobody can cover the ante".to_string(),
        },
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fivedraw_engine::cards::Rank;
    use fivedraw_engine::hand::evaluate;

    #[test]
    fn test_format_suit_unicode_or_ascii() {
        let hearts = format_suit(&Suit::Hearts);
        assert!(hearts == "♥" || hearts == "h");
        let clubs = format_suit(&Suit::Clubs);
        assert!(clubs == "♣" || clubs == "c");
    }

    #[test]
    fn test_format_card() {
        let queen = Card::new(Rank::Queen, Suit::Spades);
        let formatted = format_card(&queen);
        assert!(formatted == "Q♠" || formatted == "Qs");
    }

    #[test]
    fn test_format_action_amounts() {
        assert_eq!(format_action(&ResolvedAction::Call(20)), "call 20");
        assert_eq!(
            format_action(&ResolvedAction::Raise { to: 30, chips: 30 }),
            "raise to 30"
        );
        assert_eq!(
            format_action(&ResolvedAction::AllInCall {
                amount: 25,
                refund: 35
            }),
            "call all-in 25 (35 returned)"
        );
    }

    #[test]
    fn test_format_outcome() {
        let won = RoundOutcome::Won {
            winner: Seat::Opponent,
            amount: 40,
            reason: WinReason::Showdown,
        };
        assert_eq!(format_outcome(&won), "Opponent won 40 at showdown");
        let split = RoundOutcome::Draw {
            pot: 21,
            returned: [11, 10],
        };
        assert_eq!(format_outcome(&split), "Draw, pot of 21 split 11/10");
        let forfeit = RoundOutcome::Draw {
            pot: 20,
            returned: [0, 0],
        };
        assert!(format_outcome(&forfeit).contains("forfeited"));
    }

    #[test]
    fn test_format_event_hides_internal_events() {
        assert!(format_event(&GameEvent::CardsDealt { deck_remaining: 42 }).is_none());
        let line = format_event(&GameEvent::Discarded {
            seat: Seat::Opponent,
            indices: vec![1, 3],
        });
        assert_eq!(line.as_deref(), Some("Opponent draws 2"));
        let flush: Hand = "Ah 9h 7h 4h 2h".parse().unwrap();
        let eval = evaluate(&flush);
        let shown = format_event(&GameEvent::HandRevealed {
            seat: Seat::Player,
            category: eval.category,
            tiebreak: eval.tiebreak,
        });
        assert_eq!(shown.as_deref(), Some("You show Flush"));
    }
}
