use thiserror::Error;

/// Failures while building or running a decision policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Malformed entry for key {key:?}: expected three finite non-negative numbers")]
    MalformedEntry { key: String },
    #[error("Inference failed: {0}")]
    Inference(String),
    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),
    #[error("Policy '{0}' needs a source file")]
    MissingSource(String),
}
