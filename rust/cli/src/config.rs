//! Table configuration: defaults, then a TOML file named by `FIVEDRAW_CONFIG`,
//! then `FIVEDRAW_*` environment variables, then command-line flags.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use fivedraw_ai::PolicyKind;
use fivedraw_engine::config::{EngineConfig, TiePolicy};
use serde::{Deserialize, Serialize};

use crate::cli::TableArgs;

pub const ENV_CONFIG: &str = "FIVEDRAW_CONFIG";
pub const ENV_SEED: &str = "FIVEDRAW_SEED";
pub const ENV_ANTE: &str = "FIVEDRAW_ANTE";
pub const ENV_STARTING_MONEY: &str = "FIVEDRAW_STARTING_MONEY";
pub const ENV_POLICY: &str = "FIVEDRAW_POLICY";
pub const ENV_POLICY_PATH: &str = "FIVEDRAW_POLICY_PATH";
pub const ENV_TIE_POLICY: &str = "FIVEDRAW_TIE_POLICY";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_money: u32,
    pub ante: u32,
    pub min_raise: u32,
    pub tie_policy: TiePolicy,
    pub seed: Option<u64>,
    /// Opponent policy name, see [`PolicyKind`]
    pub policy: String,
    /// Strategy table or model weights for the opponent policy
    pub policy_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            starting_money: engine.starting_money,
            ante: engine.ante,
            min_raise: engine.min_raise,
            tie_policy: engine.tie_policy,
            seed: None,
            policy: PolicyKind::Baseline.as_str().into(),
            policy_path: None,
        }
    }
}

impl Config {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            starting_money: self.starting_money,
            ante: self.ante,
            min_raise: self.min_raise,
            tie_policy: self.tie_policy,
            seed: self.seed,
        }
    }

    /// Applies command-line flags on top of the resolved values.
    pub fn with_flags(mut self, args: &TableArgs) -> Result<Self, ConfigError> {
        if let Some(v) = args.seed {
            self.seed = Some(v);
        }
        if let Some(v) = args.ante {
            self.ante = v;
        }
        if let Some(v) = args.starting_money {
            self.starting_money = v;
        }
        if let Some(v) = &args.policy {
            self.policy = v.clone();
        }
        if let Some(v) = &args.policy_path {
            self.policy_path = Some(v.clone());
        }
        if let Some(v) = &args.tie_policy {
            self.tie_policy = parse_tie_policy(v)?;
        }
        validate(&self)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_money: ValueSource,
    pub ante: ValueSource,
    pub min_raise: ValueSource,
    pub tie_policy: ValueSource,
    pub seed: ValueSource,
    pub policy: ValueSource,
    pub policy_path: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_money: ValueSource::Default,
            ante: ValueSource::Default,
            min_raise: ValueSource::Default,
            tie_policy: ValueSource::Default,
            seed: ValueSource::Default,
            policy: ValueSource::Default,
            policy_path: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(ENV_CONFIG)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_money {
            cfg.starting_money = v;
            sources.starting_money = ValueSource::File;
        }
        if let Some(v) = f.ante {
            cfg.ante = v;
            sources.ante = ValueSource::File;
        }
        if let Some(v) = f.min_raise {
            cfg.min_raise = v;
            sources.min_raise = ValueSource::File;
        }
        if let Some(v) = f.tie_policy {
            cfg.tie_policy = v;
            sources.tie_policy = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.policy {
            cfg.policy = v;
            sources.policy = ValueSource::File;
        }
        if let Some(v) = f.policy_path {
            cfg.policy_path = Some(v);
            sources.policy_path = ValueSource::File;
        }
    }

    if let Some(seed) = env_value(ENV_SEED) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(ante) = env_value(ENV_ANTE) {
        cfg.ante = ante
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid ante".into()))?;
        sources.ante = ValueSource::Env;
    }
    if let Some(money) = env_value(ENV_STARTING_MONEY) {
        cfg.starting_money = money
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting money".into()))?;
        sources.starting_money = ValueSource::Env;
    }
    if let Some(policy) = env_value(ENV_POLICY) {
        cfg.policy = policy;
        sources.policy = ValueSource::Env;
    }
    if let Some(path) = env_value(ENV_POLICY_PATH) {
        cfg.policy_path = Some(PathBuf::from(path));
        sources.policy_path = ValueSource::Env;
    }
    if let Some(tie) = env_value(ENV_TIE_POLICY) {
        cfg.tie_policy = parse_tie_policy(&tie)?;
        sources.tie_policy = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_money: Option<u32>,
    #[serde(default)]
    ante: Option<u32>,
    #[serde(default)]
    min_raise: Option<u32>,
    #[serde(default)]
    tie_policy: Option<TiePolicy>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    policy: Option<String>,
    #[serde(default)]
    policy_path: Option<PathBuf>,
}

fn parse_tie_policy(s: &str) -> Result<TiePolicy, ConfigError> {
    TiePolicy::parse(s)
        .ok_or_else(|| ConfigError::Invalid(format!("Invalid tie policy '{}' (forfeit|split)", s)))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.engine_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    cfg.policy
        .parse::<PolicyKind>()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(())
}
