//! # Play Command
//!
//! Interactive five-card draw against the configured opponent policy. The
//! player seat reads one action per line from stdin; the opponent, the ante,
//! the showdown and round transitions are driven by the engine.
//!
//! Typing `q` ends the session normally. Closing stdin mid-game is reported
//! as an interruption.

use std::io::{BufRead, Write};
use std::path::Path;

use fivedraw_ai::create_policy;
use fivedraw_engine::config::EngineConfig;
use fivedraw_engine::engine::Engine;
use fivedraw_engine::errors::GameError;
use fivedraw_engine::events::GameEvent;
use fivedraw_engine::game::Phase;
use fivedraw_engine::logger::{RoundLogger, RoundRecord};
use fivedraw_engine::player::Seat;
use tracing::info;

use super::warn_unused_source;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_event, format_hand};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, parse_player_action};

/// Handle the play command.
///
/// # Arguments
///
/// * `cfg` - Resolved table configuration, flags already applied
/// * `rounds` - Stop after this many rounds (default: until game over or quit)
/// * `log` - Optional JSONL round history
/// * `stdin` - Player input, one action per line
///
/// # Errors
///
/// `CliError::InvalidInput` for `rounds == 0`, `CliError::Policy` when the
/// opponent policy cannot be built, `CliError::Interrupted` when input ends
/// before the session does.
pub fn handle_play_command(
    cfg: &Config,
    rounds: Option<u32>,
    log: Option<&Path>,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if rounds == Some(0) {
        ui::write_error(err, "rounds must be >= 1")?;
        return Err(CliError::InvalidInput("rounds must be >= 1".to_string()));
    }

    warn_unused_source(&cfg.policy, cfg.policy_path.as_deref(), err)?;
    // unseeded sessions draw their seed here so the banner can print it
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let policy = create_policy(&cfg.policy, cfg.policy_path.as_deref(), Some(seed))?;
    let engine_cfg = EngineConfig {
        seed: Some(seed),
        ..cfg.engine_config()
    };
    let mut engine = Engine::new(engine_cfg, policy)?;
    let mut logger = log.map(RoundLogger::create).transpose()?;

    writeln!(
        out,
        "play: policy={} seed={} ante={} money={} tie={}",
        cfg.policy,
        seed,
        cfg.ante,
        cfg.starting_money,
        cfg.tie_policy.as_str(),
    )?;

    let mut played = 0u32;
    loop {
        match engine.phase() {
            Phase::GameOver => break,
            Phase::NextRound => {
                played += 1;
                if let Some(logger) = logger.as_mut() {
                    let id = logger.next_id();
                    logger.write(&RoundRecord::capture(&engine, id))?;
                }
                writeln!(
                    out,
                    "Money: you {}, opponent {}",
                    engine.player(Seat::Player).money(),
                    engine.player(Seat::Opponent).money()
                )?;
                if rounds.is_some_and(|n| played >= n) {
                    break;
                }
                let events = engine.advance()?;
                render_events(&engine, &events, out)?;
            }
            Phase::Discard => {
                if player_turn(&mut engine, stdin, out, err)? == Turn::Quit {
                    writeln!(out, "Quit.")?;
                    break;
                }
            }
            Phase::Betting if engine.to_act() == Some(Seat::Player) => {
                if player_turn(&mut engine, stdin, out, err)? == Turn::Quit {
                    writeln!(out, "Quit.")?;
                    break;
                }
            }
            _ => {
                let events = engine.advance()?;
                render_events(&engine, &events, out)?;
            }
        }
    }

    info!(rounds = played, "play session finished");
    writeln!(out, "Rounds played: {}", played)?;
    writeln!(
        out,
        "Final money: you {}, opponent {}",
        engine.player(Seat::Player).money(),
        engine.player(Seat::Opponent).money()
    )?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Turn {
    Played,
    Quit,
}

/// Prompts until the engine accepts one action from the player seat.
fn player_turn(
    engine: &mut Engine,
    stdin: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Turn, CliError> {
    loop {
        write_status(engine, out)?;
        let prompt = if engine.phase() == Phase::Discard {
            "Discard (discard i.., stand, q): "
        } else {
            "Action (check/call, raise N, fold, q): "
        };
        write!(out, "{}", prompt)?;
        out.flush()?;

        let Some(input) = read_stdin_line(stdin) else {
            return Err(CliError::Interrupted("input closed mid-game".to_string()));
        };
        match parse_player_action(&input) {
            ParseResult::Quit => return Ok(Turn::Quit),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            ParseResult::Action(action) => match engine.apply_action(Seat::Player, action) {
                Ok(events) => {
                    render_events(engine, &events, out)?;
                    return Ok(Turn::Played);
                }
                Err(GameError::IllegalAction(e)) => {
                    ui::write_error(err, &format!("Invalid action: {}", e))?;
                }
                Err(e) => return Err(e.into()),
            },
        }
    }
}

fn write_status(engine: &Engine, out: &mut dyn Write) -> Result<(), CliError> {
    let state = engine.observable_state();
    let me = state.player(Seat::Player);
    if let Some(hand) = &me.hand {
        writeln!(out, "Your hand: {}", format_hand(hand))?;
    }
    if engine.phase() == Phase::Betting {
        let view = engine.betting_view(Seat::Player);
        writeln!(
            out,
            "Pot: {}  To call: {}  Your money: {}",
            engine.pot_context(Seat::Player).pot,
            view.to_call(),
            me.money
        )?;
    }
    Ok(())
}

fn render_events(engine: &Engine, events: &[GameEvent], out: &mut dyn Write) -> Result<(), CliError> {
    for event in events {
        if let Some(line) = format_event(event) {
            writeln!(out, "{}", line)?;
        }
        if let GameEvent::HandRevealed { seat, .. } = event
            && let Some(hand) = &engine.observable_state().player(*seat).hand
        {
            writeln!(out, "  {}", format_hand(hand))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn seeded() -> Config {
        Config {
            seed: Some(7),
            ..Config::default()
        }
    }

    fn run_play(input: &str, rounds: Option<u32>) -> (Result<(), CliError>, String, String) {
        let mut stdin = Cursor::new(input.to_string());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = handle_play_command(&seeded(), rounds, None, &mut stdin, &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_fold_first_round_then_stop() {
        let (result, out, _) = run_play("fold\n", Some(1));
        assert!(result.is_ok());
        assert!(out.contains("=== Round 1 ==="));
        assert!(out.contains("You: fold"));
        assert!(out.contains("Opponent won 20 by fold"));
        assert!(out.contains("Rounds played: 1"));
        assert!(out.contains("Final money: you 90, opponent 110"));
    }

    #[test]
    fn test_quit_ends_session_cleanly() {
        let (result, out, _) = run_play("q\n", None);
        assert!(result.is_ok());
        assert!(out.contains("Quit."));
        assert!(out.contains("Rounds played: 0"));
    }

    #[test]
    fn test_closed_input_is_an_interruption() {
        let (result, _, _) = run_play("", None);
        assert!(matches!(result, Err(CliError::Interrupted(_))));
    }

    #[test]
    fn test_bad_input_is_reported_and_reprompted() {
        let (result, out, err) = run_play("bet 5\ndiscard 1\nfold\n", Some(1));
        assert!(result.is_ok());
        assert!(err.contains("Unrecognized action 'bet'"));
        // discarding is only legal in the discard phase
        assert!(err.contains("Invalid action"));
        assert!(out.contains("You: fold"));
    }

    #[test]
    fn test_baseline_with_policy_file_warns() {
        let cfg = Config {
            policy_path: Some("table.json".into()),
            ..seeded()
        };
        let mut stdin = Cursor::new("fold\n".to_string());
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_play_command(&cfg, Some(1), None, &mut stdin, &mut out, &mut err).unwrap();
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("WARNING: table.json is ignored by the baseline policy"));
    }

    #[test]
    fn test_unseeded_session_prints_its_seed() {
        let mut stdin = Cursor::new("q\n".to_string());
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_play_command(&Config::default(), None, None, &mut stdin, &mut out, &mut err)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        let seed = out
            .split_whitespace()
            .find_map(|w| w.strip_prefix("seed="))
            .unwrap();
        assert!(seed.parse::<u64>().is_ok());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let (result, _, err) = run_play("", Some(0));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("rounds must be >= 1"));
    }

    #[test]
    fn test_rounds_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/rounds.jsonl");
        let mut stdin = Cursor::new("fold\nfold\n".to_string());
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_play_command(
            &seeded(),
            Some(2),
            Some(&path),
            &mut stdin,
            &mut out,
            &mut err,
        )
        .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let records: Vec<RoundRecord> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].round_no, 1);
        assert_eq!(records[1].round_no, 2);
        assert_eq!(records[1].money, [80, 120]);
        assert!(records[0].round_id.ends_with("-000001"));
    }
}
