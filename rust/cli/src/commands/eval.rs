//! Hand evaluation command.
//!
//! Prints category, tie-break key, information-set key and the discard
//! recommendation for five cards given on the command line.

use std::io::Write;

use fivedraw_engine::hand::{Hand, evaluate};

use crate::error::CliError;
use crate::formatters::format_hand;

/// Handle the eval command.
///
/// # Errors
///
/// `CliError::InvalidInput` when the text is not five distinct cards.
pub fn handle_eval_command(hand: &str, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let hand: Hand = hand
        .parse()
        .map_err(|e| CliError::InvalidInput(format!("{}", e)))?;
    let eval = evaluate(&hand);

    if json {
        let display = serde_json::json!({
            "hand": hand.to_string(),
            "category": eval.category.name(),
            "category_value": eval.category.value(),
            "tiebreak": eval.tiebreak.as_slice(),
            "info_set_key": eval.info_set_key(),
            "discards": eval.discards,
        });
        let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
        writeln!(out, "{}", json_str)?;
        return Ok(());
    }

    writeln!(out, "Hand: {}", format_hand(&hand))?;
    writeln!(out, "Category: {}", eval.category.name())?;
    writeln!(out, "Tiebreak: {}", eval.tiebreak)?;
    writeln!(out, "Key: {}", eval.info_set_key())?;
    if eval.discards.is_empty() {
        writeln!(out, "Discard: none")?;
    } else {
        let positions: Vec<String> = eval.discards.iter().map(usize::to_string).collect();
        writeln!(out, "Discard: {}", positions.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_text(hand: &str) -> String {
        let mut out = Vec::new();
        handle_eval_command(hand, false, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_royal_flush() {
        let out = eval_text("As Ks Qs Js 10s");
        assert!(out.contains("Category: Straight Flush"));
        assert!(out.contains("Tiebreak: 12-11-10-9-8"));
        assert!(out.contains("Key: 9-12-11-10-9-8"));
        assert!(out.contains("Discard: none"));
    }

    #[test]
    fn test_pair_recommends_three_discards() {
        let out = eval_text("Qs Qh 9d 5c 2s");
        assert!(out.contains("Category: One Pair"));
        assert!(out.contains("Discard: 2 3 4"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        handle_eval_command("5d 4c 3h 2s As", true, &mut out).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["category"], "Straight");
        assert_eq!(v["info_set_key"], "5-3-2-1-0-12");
        assert_eq!(v["tiebreak"], serde_json::json!([3, 2, 1, 0, 12]));
    }

    #[test]
    fn test_rejects_bad_hands() {
        let mut out = Vec::new();
        for bad in ["As Ks Qs Js", "As As Qs Js 10s", "As Ks Qs Js 1x"] {
            let result = handle_eval_command(bad, false, &mut out);
            assert!(matches!(result, Err(CliError::InvalidInput(_))), "{}", bad);
        }
    }
}
