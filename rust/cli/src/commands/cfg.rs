//! Configuration command handler.
//!
//! Prints every table setting with the layer it was resolved from
//! (`default`, `file` or `env`):
//!
//! ```json
//! {
//!   "ante": {
//!     "value": 10,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::ui;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_money": {
            "value": config.starting_money,
            "source": sources.starting_money,
        },
        "ante": {
            "value": config.ante,
            "source": sources.ante,
        },
        "min_raise": {
            "value": config.min_raise,
            "source": sources.min_raise,
        },
        "tie_policy": {
            "value": config.tie_policy,
            "source": sources.tie_policy,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "policy": {
            "value": config.policy,
            "source": sources.policy,
        },
        "policy_path": {
            "value": config.policy_path,
            "source": sources.policy_path,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
