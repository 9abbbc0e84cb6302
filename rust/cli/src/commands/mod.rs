//! Command handlers for the `fivedraw` CLI.
//!
//! Each command lives in its own module and follows one pattern:
//!
//! - Public handler: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) and stdin (`&mut dyn BufRead`) are
//!   passed in, never opened inside the handler
//! - Errors propagate as [`CliError`](crate::CliError)

pub mod cfg;
pub mod eval;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::{SimSummary, handle_sim_command, run_simulation};

use std::io::Write;
use std::path::Path;

use fivedraw_ai::PolicyKind;

/// Warns when a policy file is given to a policy that reads none.
fn warn_unused_source(
    policy: &str,
    source: Option<&Path>,
    err: &mut dyn Write,
) -> std::io::Result<()> {
    if let Some(path) = source
        && policy.parse::<PolicyKind>().ok() == Some(PolicyKind::Baseline)
    {
        crate::ui::display_warning(
            err,
            &format!("{} is ignored by the baseline policy", path.display()),
        )?;
    }
    Ok(())
}
