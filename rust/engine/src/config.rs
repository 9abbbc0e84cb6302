use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What happens to the pot when both hands are exactly equal at showdown.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiePolicy {
    /// Nobody is paid and the pot is cleared.
    #[default]
    Forfeit,
    /// Each seat gets half; an odd chip goes to the player seat.
    Split,
}

impl TiePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            TiePolicy::Forfeit => "forfeit",
            TiePolicy::Split => "split",
        }
    }

    pub fn parse(s: &str) -> Option<TiePolicy> {
        match s.to_ascii_lowercase().as_str() {
            "forfeit" => Some(TiePolicy::Forfeit),
            "split" => Some(TiePolicy::Split),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub starting_money: u32,
    pub ante: u32,
    /// Smallest amount a raise must add over the opponent's bet.
    pub min_raise: u32,
    pub tie_policy: TiePolicy,
    /// Shuffle seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_money: 100,
            ante: 10,
            min_raise: 5,
            tie_policy: TiePolicy::Forfeit,
            seed: None,
        }
    }
}

/// Largest stack per seat; both stacks together must fit the chip counter.
pub const MAX_STARTING_MONEY: u32 = u32::MAX / 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ante == 0 {
            return Err(ConfigError::Invalid("ante must be >0".into()));
        }
        if self.min_raise == 0 {
            return Err(ConfigError::Invalid("min_raise must be >0".into()));
        }
        if self.starting_money < self.ante {
            return Err(ConfigError::Invalid(
                "starting_money must be >= ante".into(),
            ));
        }
        if self.starting_money > MAX_STARTING_MONEY {
            return Err(ConfigError::Invalid(format!(
                "starting_money must be <= {MAX_STARTING_MONEY}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_table_stakes() {
        let c = EngineConfig::default();
        assert_eq!((c.starting_money, c.ante, c.min_raise), (100, 10, 5));
        assert_eq!(c.tie_policy, TiePolicy::Forfeit);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_unplayable_stakes() {
        let c = EngineConfig {
            starting_money: 5,
            ..EngineConfig::default()
        };
        assert!(c.validate().is_err());
        let c = EngineConfig {
            ante: 0,
            ..EngineConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_stacks_that_overflow_the_table() {
        let c = EngineConfig {
            starting_money: 3_000_000_000,
            ..EngineConfig::default()
        };
        assert!(c.validate().is_err());
        let c = EngineConfig {
            starting_money: MAX_STARTING_MONEY,
            ..EngineConfig::default()
        };
        assert!(c.validate().is_ok());
        assert!(u64::from(c.starting_money) * 2 <= u64::from(u32::MAX));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: EngineConfig = serde_json::from_str(r#"{"ante": 20, "tie_policy": "split"}"#).unwrap();
        assert_eq!(c.ante, 20);
        assert_eq!(c.starting_money, 100);
        assert_eq!(c.tie_policy, TiePolicy::Split);
    }
}
