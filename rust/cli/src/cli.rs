//! Command-line surface of the `fivedraw` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fivedraw",
    version,
    about = "Heads-up five-card draw against a configurable opponent policy"
)]
pub struct FivedrawCli {
    /// Raise diagnostic logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play against the configured policy, reading actions from stdin
    Play {
        #[command(flatten)]
        table: TableArgs,
        /// Stop after this many rounds (default: until game over or quit)
        #[arg(long)]
        rounds: Option<u32>,
        /// Append finished rounds to a JSONL file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Let two policies play each other
    Sim {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long, default_value_t = 100)]
        rounds: u32,
        /// Policy driving the player seat
        #[arg(long, default_value = "baseline")]
        player_policy: String,
        #[arg(long)]
        player_policy_path: Option<PathBuf>,
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Evaluate a five-card hand, e.g. "As Ks Qs Js 10s"
    Eval {
        hand: String,
        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
}

/// Table flags shared by `play` and `sim`. Each one overrides the config
/// file and environment.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub ante: Option<u32>,
    #[arg(long)]
    pub starting_money: Option<u32>,
    /// Opponent policy: baseline, table or model
    #[arg(long)]
    pub policy: Option<String>,
    /// Strategy table (JSON) or model weights for the opponent policy
    #[arg(long)]
    pub policy_path: Option<PathBuf>,
    /// forfeit or split
    #[arg(long)]
    pub tie_policy: Option<String>,
}
