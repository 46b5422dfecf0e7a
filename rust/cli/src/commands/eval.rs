//! `holdem eval`: names the best combination in 5 to 7 cards and optionally
//! compares it against a second hand.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::io::Write;

use holdem_engine::cards::{Card, parse_cards};
use holdem_engine::hand::{Combination, compare, evaluate};

use crate::error::CliError;
use crate::formatters::format_board;

pub fn handle_eval_command(
    cards: &[String],
    vs: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let (hand, combination) = read_hand(&cards.join(" "))?;
    writeln!(out, "Hand: {}", format_board(&hand))?;
    writeln!(out, "Combination: {}", combination)?;

    let Some(other) = vs else {
        return Ok(());
    };
    let (other_hand, other_combination) = read_hand(other)?;
    writeln!(out, "Versus: {}", format_board(&other_hand))?;
    writeln!(out, "Combination: {}", other_combination)?;
    let verdict = match compare(&combination, &other_combination) {
        Ordering::Greater => "first hand wins",
        Ordering::Less => "second hand wins",
        Ordering::Equal => "tie",
    };
    writeln!(out, "Result: {}", verdict)?;
    Ok(())
}

fn read_hand(text: &str) -> Result<(Vec<Card>, Combination), CliError> {
    let cards = parse_cards(text).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "expected 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    let mut seen = BTreeSet::new();
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(CliError::InvalidInput(format!("duplicate card: {}", dup)));
    }
    let combination = evaluate(&cards)?;
    Ok((cards, combination))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn names_the_combination() {
        let mut out = Vec::new();
        handle_eval_command(&args("As Ks Qs Js Ts 2d 3c"), None, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Combination: Royal flush"), "{output}");
        assert!(!output.contains("Result"));
    }

    #[test]
    fn compares_two_hands() {
        let mut out = Vec::new();
        handle_eval_command(
            &args("2c 2d 5h 9s Kd"),
            Some("Ac Ad 5c 9h Ks"),
            &mut out,
        )
        .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Result: second hand wins"));
    }

    #[test]
    fn rejects_duplicates_and_bad_counts() {
        let mut out = Vec::new();
        assert!(matches!(
            handle_eval_command(&args("As As Kd Qc Jh"), None, &mut out),
            Err(CliError::InvalidInput(msg)) if msg.contains("duplicate")
        ));
        assert!(matches!(
            handle_eval_command(&args("As Kd Qc Jh"), None, &mut out),
            Err(CliError::InvalidInput(msg)) if msg.contains("5 to 7")
        ));
        assert!(matches!(
            handle_eval_command(&args("As Kd Qc Jh Zz"), None, &mut out),
            Err(CliError::InvalidInput(_))
        ));
    }
}
