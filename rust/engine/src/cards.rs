use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseCardError;

/// Represents one of the four suits in a standard 52-card deck.
/// Declaration order is the canonical deck order (spades first).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit (♠)
    Spades,
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
}

impl Suit {
    pub fn letter(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub fn from_letter(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            'd' => Some(Suit::Diamonds),
            'c' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack, value 9
    Jack,
    /// Queen, value 10
    Queen,
    /// King, value 11
    King,
    /// Ace, value 12
    Ace,
}

impl Rank {
    /// Evaluation value of the rank: `Two` is 0, `Ace` is 12.
    ///
    /// These are the integers that appear in tie-break keys and
    /// information-set keys.
    pub fn value(self) -> u8 {
        self as u8 - 2
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        all_ranks().get(v as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    fn from_label(s: &str) -> Option<Rank> {
        let r = match s.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return None,
        };
        Some(r)
    }
}

/// A single playing card. Two cards are equal iff rank and suit match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.letter())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses `As`, `10h`, `Td`, `qc` style notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit_char = chars
            .next_back()
            .ok_or_else(|| ParseCardError::Malformed(s.to_string()))?;
        let rank_part = chars.as_str();
        if rank_part.is_empty() {
            return Err(ParseCardError::Malformed(s.to_string()));
        }
        let suit = Suit::from_letter(suit_char).ok_or(ParseCardError::UnknownSuit(suit_char))?;
        let rank = Rank::from_label(rank_part)
            .ok_or_else(|| ParseCardError::UnknownRank(rank_part.to_string()))?;
        Ok(Card { rank, suit })
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

/// All 52 cards in canonical order: suits outer, ranks ascending inner.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { rank: r, suit: s });
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_values_run_from_two_to_ace() {
        assert_eq!(Rank::Two.value(), 0);
        assert_eq!(Rank::Ten.value(), 8);
        assert_eq!(Rank::Ace.value(), 12);
        assert_eq!(Rank::from_value(11), Some(Rank::King));
        assert_eq!(Rank::from_value(13), None);
    }

    #[test]
    fn parses_and_displays_cards() {
        let c: Card = "10h".parse().unwrap();
        assert_eq!(c, Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(c.to_string(), "10h");
        assert_eq!("Td".parse::<Card>().unwrap().rank, Rank::Ten);
        assert_eq!("as".parse::<Card>().unwrap(), Card::new(Rank::Ace, Suit::Spades));
    }

    #[test]
    fn rejects_bad_card_text() {
        assert!(matches!("".parse::<Card>(), Err(ParseCardError::Malformed(_))));
        assert!(matches!("s".parse::<Card>(), Err(ParseCardError::Malformed(_))));
        assert!(matches!("Ax".parse::<Card>(), Err(ParseCardError::UnknownSuit('x'))));
        assert!(matches!("1s".parse::<Card>(), Err(ParseCardError::UnknownRank(_))));
    }

    #[test]
    fn full_deck_starts_with_spades() {
        let d = full_deck();
        assert_eq!(d.len(), 52);
        assert_eq!(d[0], Card::new(Rank::Two, Suit::Spades));
        assert_eq!(d[51], Card::new(Rank::Ace, Suit::Clubs));
    }
}
