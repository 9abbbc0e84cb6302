//! Parsing of interactive `play` input into engine actions.

use fivedraw_engine::player::Action;

/// Outcome of parsing one line of player input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(Action),
    /// `q` or `quit`
    Quit,
    /// Unusable input, with a message for the player
    Invalid(String),
}

/// Parses a line of player input (case-insensitive).
///
/// - `f` / `fold`
/// - `c` / `call` / `check`
/// - `r N` / `raise N`: raise to a total bet of N
/// - `d i j ..` / `discard i j ..`: card positions 0-4
/// - `s` / `stand`
/// - `q` / `quit`
///
/// # Example
///
/// ```rust
/// # use fivedraw_cli::validation::{parse_player_action, ParseResult};
/// use fivedraw_engine::player::Action;
///
/// assert_eq!(parse_player_action("check"), ParseResult::Action(Action::Call));
/// assert_eq!(parse_player_action("raise 30"), ParseResult::Action(Action::Raise(30)));
/// assert_eq!(
///     parse_player_action("discard 0 2 4"),
///     ParseResult::Action(Action::Discard(vec![0, 2, 4]))
/// );
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
/// assert!(matches!(parse_player_action("allin"), ParseResult::Invalid(_)));
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&head) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match head {
        "q" | "quit" => ParseResult::Quit,
        "fold" | "f" => ParseResult::Action(Action::Fold),
        "call" | "check" | "c" => ParseResult::Action(Action::Call),
        "stand" | "s" => ParseResult::Action(Action::StandPat),
        "raise" | "r" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(
                    "Raise requires a total bet (e.g., 'raise 30')".to_string(),
                );
            };
            match amount.parse::<u32>() {
                Ok(amount) if amount > 0 => ParseResult::Action(Action::Raise(amount)),
                Ok(_) => ParseResult::Invalid("Raise amount must be positive".to_string()),
                Err(_) => ParseResult::Invalid("Invalid raise amount".to_string()),
            }
        }
        "discard" | "d" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(
                    "Discard requires card positions (e.g., 'discard 0 3')".to_string(),
                );
            }
            let mut indices = Vec::with_capacity(parts.len() - 1);
            for p in &parts[1..] {
                match p.parse::<usize>() {
                    Ok(i) => indices.push(i),
                    Err(_) => {
                        return ParseResult::Invalid(format!("Invalid card position '{}'", p));
                    }
                }
            }
            ParseResult::Action(Action::Discard(indices))
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid: fold, call, check, raise N, discard i.., stand, q",
            head
        )),
    }
}
