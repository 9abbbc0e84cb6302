use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::ParseCardError;

pub const HAND_SIZE: usize = 5;

/// Five cards, addressable by position. Evaluation ignores order; discards
/// and replacements work on indices.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Hand([Card; HAND_SIZE]);

impl Hand {
    pub fn new(cards: [Card; HAND_SIZE]) -> Self {
        Self(cards)
    }

    pub fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.0
    }

    /// Puts `card` at `index` and returns the card it replaced.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 5`; callers validate indices first.
    pub fn replace(&mut self, index: usize, card: Card) -> Card {
        std::mem::replace(&mut self.0[index], card)
    }
}

impl Index<usize> for Hand {
    type Output = Card;

    fn index(&self, index: usize) -> &Card {
        &self.0[index]
    }
}

impl TryFrom<&[Card]> for Hand {
    type Error = ParseCardError;

    fn try_from(cards: &[Card]) -> Result<Self, Self::Error> {
        let arr: [Card; HAND_SIZE] = cards
            .try_into()
            .map_err(|_| ParseCardError::WrongHandSize(cards.len()))?;
        for (i, c) in arr.iter().enumerate() {
            if arr[..i].contains(c) {
                return Err(ParseCardError::DuplicateCard(c.to_string()));
            }
        }
        Ok(Hand(arr))
    }
}

impl FromStr for Hand {
    type Err = ParseCardError;

    /// Parses five cards separated by whitespace or commas: `"As Kd 10h 3c 3s"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Card>, _>>()?;
        Hand::try_from(cards.as_slice())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Hand categories. The discriminants are part of the external contract:
/// they lead every information-set key and the model feature vector.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

impl HandCategory {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

/// Rank values used to order hands of the same category, most significant
/// first. Compared lexicographically.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TieBreak(Vec<u8>);

impl TieBreak {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// The key widened to five slots, zero-padded on the right.
    pub fn padded(&self) -> [u8; HAND_SIZE] {
        let mut out = [0u8; HAND_SIZE];
        for (slot, v) in out.iter_mut().zip(&self.0) {
            *slot = *v;
        }
        out
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u8::to_string).collect();
        write!(f, "{}", parts.join("-"))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub category: HandCategory,
    pub tiebreak: TieBreak,
    /// Ascending hand indices worth throwing away.
    pub discards: Vec<usize>,
}

impl Evaluation {
    /// Information-set key, e.g. `"2-10-12-7-3"` for a pair of queens with
    /// A-9-5 kickers.
    pub fn info_set_key(&self) -> String {
        format!("{}-{}", self.category.value(), self.tiebreak)
    }
}

const WHEEL: [u8; HAND_SIZE] = [12, 3, 2, 1, 0];
/// Five-high ordering of the wheel: the ace plays below the deuce.
const WHEEL_KEY: [u8; HAND_SIZE] = [3, 2, 1, 0, 12];

/// Evaluates five cards into category, tie-break key and discard advice.
///
/// # Examples
///
/// ```
/// use fivedraw_engine::hand::{evaluate, Hand, HandCategory};
///
/// let hand: Hand = "Qs Qh 9d 5c 2s".parse().unwrap();
/// let eval = evaluate(&hand);
/// assert_eq!(eval.category, HandCategory::OnePair);
/// assert_eq!(eval.tiebreak.as_slice(), &[10, 7, 3, 0]);
/// assert_eq!(eval.discards, vec![2, 3, 4]);
/// assert_eq!(eval.info_set_key(), "2-10-7-3-0");
/// ```
pub fn evaluate(hand: &Hand) -> Evaluation {
    let values: [u8; HAND_SIZE] = hand.0.map(|c| c.rank.value());
    let mut rank_counts = [0u8; 13];
    for &v in &values {
        rank_counts[v as usize] += 1;
    }
    let first_suit = hand[0].suit;
    let is_flush = hand.cards().iter().all(|c| c.suit == first_suit);

    let mut desc = values;
    desc.sort_unstable_by(|a, b| b.cmp(a));
    let straight = detect_straight(&desc);

    let (quads, trips, pairs, singles) = classify_multiples(&rank_counts);

    let (category, tiebreak, keep): (HandCategory, Vec<u8>, Vec<u8>) =
        if let (true, Some(key)) = (is_flush, straight) {
            (HandCategory::StraightFlush, key.to_vec(), desc.to_vec())
        } else if let Some(&q) = quads.first() {
            let kicker = singles.first().copied().unwrap_or_default();
            (HandCategory::FourOfAKind, vec![q, kicker], vec![q])
        } else if trips.len() == 1 && pairs.len() == 1 {
            let (t, p) = (trips[0], pairs[0]);
            (HandCategory::FullHouse, vec![t, p], vec![t, p])
        } else if is_flush {
            (HandCategory::Flush, desc.to_vec(), desc.to_vec())
        } else if let Some(key) = straight {
            (HandCategory::Straight, key.to_vec(), desc.to_vec())
        } else if let Some(&t) = trips.first() {
            let mut k = vec![t];
            k.extend(&singles);
            (HandCategory::ThreeOfAKind, k, vec![t])
        } else if pairs.len() == 2 {
            let mut k = pairs.clone();
            k.extend(&singles);
            (HandCategory::TwoPair, k, pairs)
        } else if let Some(&p) = pairs.first() {
            let mut k = vec![p];
            k.extend(&singles);
            (HandCategory::OnePair, k, vec![p])
        } else {
            // keep only the top card
            (HandCategory::HighCard, desc.to_vec(), vec![desc[0]])
        };

    let discards = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !keep.contains(*v))
        .map(|(i, _)| i)
        .collect();

    Evaluation {
        category,
        tiebreak: TieBreak(tiebreak),
        discards,
    }
}

pub fn compare_hands(a: &Evaluation, b: &Evaluation) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tiebreak.cmp(&b.tiebreak),
        ord => ord,
    }
}

/// Returns the straight's tie-break key for descending rank values, or `None`.
fn detect_straight(desc: &[u8; HAND_SIZE]) -> Option<[u8; HAND_SIZE]> {
    if *desc == WHEEL {
        return Some(WHEEL_KEY);
    }
    let distinct = desc.windows(2).all(|w| w[0] != w[1]);
    if distinct && desc[0] - desc[4] == 4 {
        Some(*desc)
    } else {
        None
    }
}

/// Splits rank values by multiplicity, each group sorted high to low.
fn classify_multiples(rank_counts: &[u8; 13]) -> (Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut quads = vec![];
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (0..13u8).rev() {
        match rank_counts[r as usize] {
            4 => quads.push(r),
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (quads, trips, pairs, singles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn detects_straight_with_run() {
        let e = evaluate(&h("9s 8h 7d 6c 5s"));
        assert_eq!(e.category, HandCategory::Straight);
        assert_eq!(e.tiebreak.as_slice(), &[7, 6, 5, 4, 3]);
        assert!(e.discards.is_empty());
    }

    #[test]
    fn broadway_is_ace_high() {
        let e = evaluate(&h("As Kh Qd Jc 10s"));
        assert_eq!(e.category, HandCategory::Straight);
        assert_eq!(e.tiebreak.as_slice(), &[12, 11, 10, 9, 8]);
    }

    #[test]
    fn near_wheel_is_not_a_straight() {
        // A-2-3-4-6
        let e = evaluate(&h("As 2h 3d 4c 6s"));
        assert_eq!(e.category, HandCategory::HighCard);
    }

    #[test]
    fn high_card_keeps_only_the_top_card() {
        let e = evaluate(&h("3s Kh 9d 5c 2s"));
        assert_eq!(e.category, HandCategory::HighCard);
        assert_eq!(e.discards, vec![0, 2, 3, 4]);
    }

    #[test]
    fn four_of_a_kind_discards_the_kicker() {
        let e = evaluate(&h("7s 7h Kd 7c 7d"));
        assert_eq!(e.category, HandCategory::FourOfAKind);
        assert_eq!(e.tiebreak.as_slice(), &[5, 11]);
        assert_eq!(e.discards, vec![2]);
    }

    #[test]
    fn padded_tiebreak_fills_with_zeros() {
        let e = evaluate(&h("Ks Kh Kd 2c 2s"));
        assert_eq!(e.tiebreak.padded(), [11, 0, 0, 0, 0]);
        assert_eq!(e.info_set_key(), "7-11-0");
    }

    #[test]
    fn hand_parse_rejects_duplicates_and_size() {
        assert!(matches!(
            "As As Kd Qc Js".parse::<Hand>(),
            Err(ParseCardError::DuplicateCard(_))
        ));
        assert!(matches!(
            "As Kd Qc Js".parse::<Hand>(),
            Err(ParseCardError::WrongHandSize(4))
        ));
    }

    #[test]
    fn replace_keeps_position() {
        let mut hand = h("As Kd Qc Js 9h");
        let old = hand.replace(2, "2c".parse().unwrap());
        assert_eq!(old.to_string(), "Qc");
        assert_eq!(hand.to_string(), "As Kd 2c Js 9h");
    }
}
