//! # fivedraw-ai: Opponent Policies for Five-Card Draw
//!
//! Implementations of [`DecisionPolicy`] for the engine's opponent seat.
//! Every backend evaluates hands with the engine's single
//! [`evaluate`](fivedraw_engine::hand::evaluate).
//!
//! ## Core Components
//!
//! - [`baseline`] - Rule-based policy, no data file needed
//! - [`table`] - Strategy table keyed by information set
//! - [`model`] - Feature vector plus pluggable inference backend
//! - [`create_policy`] - Factory used by the CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use fivedraw_ai::create_policy;
//! use fivedraw_engine::config::EngineConfig;
//! use fivedraw_engine::engine::Engine;
//!
//! let policy = create_policy("baseline", None, Some(42)).unwrap();
//! assert_eq!(policy.name(), "BaselinePolicy");
//!
//! let config = EngineConfig { seed: Some(42), ..EngineConfig::default() };
//! let mut engine = Engine::new(config, policy).unwrap();
//! engine.start_round().unwrap();
//! ```
//!
//! ## Policy Types
//!
//! - `"baseline"` - [`BaselinePolicy`]
//! - `"table"` - [`TablePolicy`], source is a JSON strategy table
//! - `"model"` - [`ModelPolicy`] over a [`LinearModel`], source is its JSON weights

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use fivedraw_engine::policy::DecisionPolicy;

pub mod baseline;
pub mod error;
pub mod fallback;
pub mod model;
pub mod table;

pub use baseline::BaselinePolicy;
pub use error::PolicyError;
pub use model::{InferenceBackend, LinearModel, ModelPolicy};
pub use table::TablePolicy;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PolicyKind {
    Baseline,
    Table,
    Model,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Baseline => "baseline",
            PolicyKind::Table => "table",
            PolicyKind::Model => "model",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(PolicyKind::Baseline),
            "table" => Ok(PolicyKind::Table),
            "model" => Ok(PolicyKind::Model),
            _ => Err(PolicyError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Builds a policy by name.
///
/// `source` is the strategy table or model weights file; the baseline
/// ignores it. `seed` drives the random fallback of the table and model
/// policies.
///
/// # Example
///
/// ```rust
/// use fivedraw_ai::{create_policy, PolicyError};
///
/// assert!(matches!(create_policy("table", None, None), Err(PolicyError::MissingSource(_))));
/// assert!(matches!(create_policy("oracle", None, None), Err(PolicyError::UnknownPolicy(_))));
/// ```
pub fn create_policy(
    kind: &str,
    source: Option<&Path>,
    seed: Option<u64>,
) -> Result<Box<dyn DecisionPolicy>, PolicyError> {
    let kind: PolicyKind = kind.parse()?;
    let require_source = || source.ok_or_else(|| PolicyError::MissingSource(kind.to_string()));
    Ok(match kind {
        PolicyKind::Baseline => Box::new(BaselinePolicy::new()),
        PolicyKind::Table => Box::new(TablePolicy::load(require_source()?, seed)?),
        PolicyKind::Model => {
            let model = LinearModel::load(require_source()?)?;
            Box::new(ModelPolicy::new(model, seed))
        }
    })
}
