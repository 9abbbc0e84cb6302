//! # fivedraw-engine: Five-Card Draw Rules Engine
//!
//! A deterministic heads-up five-card-draw engine: one seat for the local
//! player, one for a policy-driven opponent, a fixed ante, two betting rounds
//! around a single discard phase, and a showdown. All randomness comes from a
//! seedable ChaCha20 shuffle source, so a seed reproduces a whole game.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and text parsing
//! - [`deck`] - 52-card deck with injected-RNG shuffling
//! - [`hand`] - Five-card evaluation, tie-breaks and discard recommendation
//! - [`rules`] - Betting validation and policy bet sizing
//! - [`policy`] - The [`policy::DecisionPolicy`] seam for opponent backends
//! - [`engine`] - The round state machine
//! - [`game`] - Phases, outcomes and read-only snapshots
//! - [`player`] - Seats, actions and per-seat chip state
//! - [`events`] - Events emitted by every transition
//! - [`config`] - Table parameters
//! - [`logger`] - JSONL round history
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use fivedraw_engine::hand::{evaluate, Hand, HandCategory};
//!
//! let hand: Hand = "5d 4c 3h 2s As".parse().unwrap();
//! let eval = evaluate(&hand);
//! assert_eq!(eval.category, HandCategory::Straight);
//! assert_eq!(eval.info_set_key(), "5-3-2-1-0-12");
//! ```
//!
//! ## Deterministic Shuffling
//!
//! ```rust
//! use fivedraw_engine::deck::Deck;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let (mut a, mut b) = (Deck::new(), Deck::new());
//! a.shuffle(&mut ChaCha20Rng::seed_from_u64(42));
//! b.shuffle(&mut ChaCha20Rng::seed_from_u64(42));
//! assert_eq!(a.peek_remaining(), b.peek_remaining());
//! ```
//!
//! ## Action Validation
//!
//! ```rust
//! use fivedraw_engine::player::Action;
//! use fivedraw_engine::rules::{validate_action, BettingView, ResolvedAction};
//!
//! let view = BettingView {
//!     money: 90,
//!     current_bet: 0,
//!     opponent_money: 70,
//!     opponent_bet: 20,
//!     last_raise: 20,
//!     min_raise: 5,
//! };
//! assert_eq!(validate_action(&view, &Action::Call), Ok(ResolvedAction::Call(20)));
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod policy;
pub mod rules;
