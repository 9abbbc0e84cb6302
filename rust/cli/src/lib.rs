//! # fivedraw CLI Library
//!
//! Command-line front end for the five-card draw engine: interactive play
//! against a policy, policy-vs-policy simulation, hand evaluation, and a
//! configuration report.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments and dispatches to a subcommand. [`run_with_input`]
//! does the same with an injected stdin, which is how `play` is tested.
//!
//! ```
//! use std::io;
//! let code = fivedraw_cli::run(
//!     vec!["fivedraw", "eval", "As Ks Qs Js 10s"],
//!     &mut io::stdout(),
//!     &mut io::stderr(),
//! );
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play against the configured policy over stdin
//! - `sim`: Run one policy against another for N rounds
//! - `eval`: Evaluate a five-card hand
//! - `cfg`: Display the resolved configuration and its sources

use std::io::{BufRead, Write};

use clap::Parser;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, FivedrawCli, TableArgs};
use commands::{handle_cfg_command, handle_eval_command, handle_play_command, handle_sim_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "eval", "cfg"];

/// Main entry point for the CLI application, reading `play` input from the
/// process stdin.
///
/// Returns the process exit code: `0` on success, `2` on errors, `130` when
/// input ends in the middle of a game.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] with an explicit input stream.
///
/// ```
/// use std::io::Cursor;
///
/// let mut input = Cursor::new("fold\n");
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = fivedraw_cli::run_with_input(
///     ["fivedraw", "play", "--seed", "1", "--rounds", "1"],
///     &mut input,
///     &mut out,
///     &mut err,
/// );
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("You: fold"));
/// ```
pub fn run_with_input<I, S>(
    args: I,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match FivedrawCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(&e, out, err),
    };
    logging::init_logging(cli.verbose);

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Eval { hand, json } => handle_eval_command(&hand, json, out),
        Commands::Play { table, rounds, log } => resolve_config(&table).and_then(|cfg| {
            handle_play_command(&cfg, rounds, log.as_deref(), stdin, out, err)
        }),
        Commands::Sim {
            table,
            rounds,
            player_policy,
            player_policy_path,
            log,
        } => resolve_config(&table).and_then(|cfg| {
            handle_sim_command(
                &cfg,
                rounds,
                &player_policy,
                player_policy_path.as_deref(),
                log.as_deref(),
                out,
                err,
            )
        }),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            match e {
                CliError::Interrupted(_) => exit_code::INTERRUPTED,
                _ => exit_code::ERROR,
            }
        }
    }
}

fn resolve_config(table: &TableArgs) -> Result<config::Config, CliError> {
    Ok(config::load()?.with_flags(table)?)
}

fn report_parse_error(e: &clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version print to stdout and succeed
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err()
                || writeln!(err).is_err()
                || writeln!(err, "fivedraw: heads-up five-card draw").is_err()
                || writeln!(err, "Usage: fivedraw <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in COMMANDS {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            let _ = writeln!(err, "\nFor full help, run: fivedraw --help");
            exit_code::ERROR
        }
    }
}
