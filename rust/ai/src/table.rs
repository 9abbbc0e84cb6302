//! Strategy-table policy.
//!
//! The table maps information-set keys (see
//! [`Evaluation::info_set_key`](fivedraw_engine::hand::Evaluation::info_set_key))
//! to `[fold, call, bet]` probabilities:
//!
//! ```json
//! { "2-10-7-3-0": [0.1, 0.6, 0.3], "9-8-7-6-5-4": [0.0, 0.0, 1.0] }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use fivedraw_engine::hand::{Hand, evaluate};
use fivedraw_engine::policy::{Decision, DecisionPolicy, PotContext, select_action};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::PolicyError;
use crate::fallback::RandomFallback;

#[derive(Debug, Clone)]
pub struct TablePolicy {
    table: HashMap<String, [f32; 3]>,
    fallback: RandomFallback,
    misses: u64,
}

impl TablePolicy {
    /// Reads a JSON table from disk. `seed` drives the fallback for unknown
    /// keys.
    pub fn load<P: AsRef<Path>>(path: P, seed: Option<u64>) -> Result<Self, PolicyError> {
        let text = fs::read_to_string(path.as_ref())?;
        let policy = Self::from_json_str(&text, seed)?;
        debug!(
            path = %path.as_ref().display(),
            entries = policy.len(),
            "strategy table loaded"
        );
        Ok(policy)
    }

    /// # Examples
    ///
    /// ```
    /// use fivedraw_ai::table::TablePolicy;
    ///
    /// let policy = TablePolicy::from_json_str(r#"{"1-12-9-5-3-0": [0.2, 0.7, 0.1]}"#, Some(1)).unwrap();
    /// assert_eq!(policy.lookup("1-12-9-5-3-0"), Some([0.2, 0.7, 0.1]));
    ///
    /// assert!(TablePolicy::from_json_str(r#"{"1-12": [0.5, 0.5]}"#, None).is_err());
    /// ```
    pub fn from_json_str(text: &str, seed: Option<u64>) -> Result<Self, PolicyError> {
        let raw: HashMap<String, Value> = serde_json::from_str(text)?;
        let mut table = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let probs = parse_entry(&value).ok_or_else(|| PolicyError::MalformedEntry {
                key: key.clone(),
            })?;
            table.insert(key, probs);
        }
        Ok(Self {
            table,
            fallback: RandomFallback::new(seed),
            misses: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn lookup(&self, key: &str) -> Option<[f32; 3]> {
        self.table.get(key).copied()
    }

    /// Decisions answered by the random fallback so far.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

fn parse_entry(value: &Value) -> Option<[f32; 3]> {
    let arr = value.as_array()?;
    if arr.len() != 3 {
        return None;
    }
    let mut out = [0.0f32; 3];
    for (slot, v) in out.iter_mut().zip(arr) {
        let x = v.as_f64()? as f32;
        if !x.is_finite() || !(0.0..=1.0).contains(&x) {
            return None;
        }
        *slot = x;
    }
    Some(out)
}

impl DecisionPolicy for TablePolicy {
    fn decide(&mut self, hand: &Hand, _ctx: &PotContext) -> Decision {
        let key = evaluate(hand).info_set_key();
        match self.table.get(&key) {
            Some(probs) => select_action(probs),
            None => {
                self.misses += 1;
                warn!(key = %key, "unknown information set, acting at random");
                self.fallback.decide()
            }
        }
    }

    fn name(&self) -> &str {
        "TablePolicy"
    }
}
