//! Simulation command handler: one policy on each seat.
//!
//! The opponent seat uses the configured policy exactly as `play` would. The
//! player seat is driven by a second policy through the same decision rules,
//! and draws the evaluator's recommended discards.
//!
//! # Examples
//!
//! ```no_run
//! use fivedraw_cli::commands::handle_sim_command;
//! use fivedraw_cli::config::Config;
//! use std::io;
//!
//! let cfg = Config { seed: Some(42), ..Config::default() };
//! handle_sim_command(&cfg, 500, "baseline", None, None, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use std::io::Write;
use std::path::Path;

use fivedraw_ai::{DecisionPolicy, create_policy};
use fivedraw_engine::config::EngineConfig;
use fivedraw_engine::engine::Engine;
use fivedraw_engine::errors::{GameError, IllegalAction};
use fivedraw_engine::game::{Phase, RoundOutcome};
use fivedraw_engine::hand::evaluate;
use fivedraw_engine::logger::{RoundLogger, RoundRecord};
use fivedraw_engine::player::{Action, Seat};
use fivedraw_engine::rules;
use tracing::{debug, info};

use super::warn_unused_source;
use crate::config::Config;
use crate::error::CliError;
use crate::ui;

/// Tally of a finished simulation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimSummary {
    pub rounds: u32,
    pub player_wins: u32,
    pub opponent_wins: u32,
    pub draws: u32,
    pub money: [u32; 2],
    pub game_over: bool,
}

impl SimSummary {
    fn record(&mut self, outcome: Option<&RoundOutcome>) {
        self.rounds += 1;
        match outcome {
            Some(RoundOutcome::Won {
                winner: Seat::Player,
                ..
            }) => self.player_wins += 1,
            Some(RoundOutcome::Won {
                winner: Seat::Opponent,
                ..
            }) => self.opponent_wins += 1,
            Some(RoundOutcome::Draw { .. }) => self.draws += 1,
            None => {}
        }
    }
}

/// Handle the sim command.
///
/// Plays until `rounds` rounds are settled or the game is over, then prints
/// the tally and both balances.
///
/// # Arguments
///
/// * `cfg` - Resolved table configuration; `cfg.policy` drives the opponent
/// * `rounds` - Upper bound on rounds (must be >= 1)
/// * `player_policy` - Policy name for the player seat
/// * `player_policy_path` - Table or weights for the player policy
/// * `log` - Optional JSONL round history
pub fn handle_sim_command(
    cfg: &Config,
    rounds: u32,
    player_policy: &str,
    player_policy_path: Option<&Path>,
    log: Option<&Path>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == 0 {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    warn_unused_source(&cfg.policy, cfg.policy_path.as_deref(), err)?;
    warn_unused_source(player_policy, player_policy_path, err)?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let opponent = create_policy(&cfg.policy, cfg.policy_path.as_deref(), Some(seed))?;
    // distinct fallback stream for the second seat
    let mut player = create_policy(
        player_policy,
        player_policy_path,
        Some(seed.wrapping_add(1)),
    )?;
    let engine_cfg = EngineConfig {
        seed: Some(seed),
        ..cfg.engine_config()
    };
    let mut engine = Engine::new(engine_cfg, opponent)?;
    let mut logger = log.map(RoundLogger::create).transpose()?;

    writeln!(
        out,
        "sim: rounds={} player={} opponent={} seed={}",
        rounds,
        player_policy,
        cfg.policy,
        seed,
    )?;

    let summary = run_simulation(&mut engine, player.as_mut(), rounds, logger.as_mut())?;

    writeln!(out, "Rounds played: {}", summary.rounds)?;
    writeln!(out, "Player wins: {}", summary.player_wins)?;
    writeln!(out, "Opponent wins: {}", summary.opponent_wins)?;
    writeln!(out, "Draws: {}", summary.draws)?;
    writeln!(
        out,
        "Final money: player {}, opponent {}",
        summary.money[0], summary.money[1]
    )?;
    if summary.game_over {
        writeln!(out, "Game over")?;
    }
    Ok(())
}

/// Drives `engine` with `player` on the player seat.
pub fn run_simulation(
    engine: &mut Engine,
    player: &mut dyn DecisionPolicy,
    rounds: u32,
    mut logger: Option<&mut RoundLogger>,
) -> Result<SimSummary, CliError> {
    let mut summary = SimSummary::default();
    loop {
        match engine.phase() {
            Phase::GameOver => {
                summary.game_over = true;
                break;
            }
            Phase::NextRound => {
                summary.record(engine.outcome());
                if let Some(logger) = logger.as_deref_mut() {
                    let id = logger.next_id();
                    logger.write(&RoundRecord::capture(engine, id))?;
                }
                if summary.rounds >= rounds {
                    break;
                }
                engine.advance()?;
            }
            Phase::Betting if engine.to_act() == Some(Seat::Player) => {
                let hand = player_hand(engine)?;
                let decision = player.decide(&hand, &engine.pot_context(Seat::Player));
                let action = rules::resolve_decision(&decision, &engine.betting_view(Seat::Player));
                debug!(policy = player.name(), ?action, "player seat decision");
                engine.apply_action(Seat::Player, action)?;
            }
            Phase::Discard => {
                let discards = evaluate(&player_hand(engine)?).discards;
                if !discards.is_empty() {
                    engine.apply_action(Seat::Player, Action::Discard(discards))?;
                }
                engine.apply_action(Seat::Player, Action::StandPat)?;
            }
            _ => {
                engine.advance()?;
            }
        }
    }
    summary.money = [
        engine.player(Seat::Player).money(),
        engine.player(Seat::Opponent).money(),
    ];
    info!(
        rounds = summary.rounds,
        player_wins = summary.player_wins,
        opponent_wins = summary.opponent_wins,
        draws = summary.draws,
        "simulation finished"
    );
    Ok(summary)
}

fn player_hand(engine: &Engine) -> Result<fivedraw_engine::hand::Hand, CliError> {
    engine
        .player(Seat::Player)
        .hand()
        .copied()
        .ok_or(CliError::Engine(GameError::IllegalAction(IllegalAction::NoHand)))
}
