use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Ordered draw pile. Cards leave from the front; nothing is ever put back
/// until [`Deck::reset`].
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Builds the 52 cards in canonical order. The order is kept until
    /// [`Deck::shuffle`] is called explicitly.
    pub fn new() -> Self {
        Self {
            cards: full_deck(),
            position: 0,
        }
    }

    /// Fisher–Yates shuffle of the full 52 cards using the caller's RNG.
    ///
    /// ```
    /// use fivedraw_engine::deck::Deck;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha20Rng;
    ///
    /// let mut a = Deck::new();
    /// let mut b = Deck::new();
    /// a.shuffle(&mut ChaCha20Rng::seed_from_u64(42));
    /// b.shuffle(&mut ChaCha20Rng::seed_from_u64(42));
    /// assert_eq!(a.draw().unwrap(), b.draw().unwrap());
    /// ```
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards = full_deck();
        self.cards.shuffle(rng);
        self.position = 0;
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let c = *self.cards.get(self.position).ok_or(GameError::EmptyDeck)?;
        self.position += 1;
        Ok(c)
    }

    /// Draws `n` cards, or none at all if fewer than `n` remain.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if self.remaining() < n {
            return Err(GameError::EmptyDeck);
        }
        (0..n).map(|_| self.draw()).collect()
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    /// Cards not yet drawn, in draw order.
    pub fn peek_remaining(&self) -> &[Card] {
        &self.cards[self.position..]
    }
}
