//! Parsing of interactive input.

use holdem_engine::seat::Action;
use holdem_engine::table::MAX_SEATS;

/// Outcome of parsing one line typed by the human seat.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid action parsed from input
    Action(Action),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parses a line of user input, case-insensitively:
///
/// - `f` / `fold` → fold
/// - `c` / `check` / `call` → check or call
/// - `r N` / `raise N` / `bet N` → commit N more chips
/// - `a` / `allin` / `all-in` → all-in
/// - `q` / `quit` → quit
///
/// ```rust
/// # use holdem_cli::validation::{parse_player_action, ParseResult};
/// use holdem_engine::seat::Action;
///
/// assert_eq!(parse_player_action("fold"), ParseResult::Action(Action::Fold));
/// assert_eq!(parse_player_action("r 100"), ParseResult::Action(Action::RaiseBy(100)));
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
///
/// match parse_player_action("invalid") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&command) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match command {
        "q" | "quit" => ParseResult::Quit,
        "f" | "fold" => ParseResult::Action(Action::Fold),
        "c" | "check" | "call" => ParseResult::Action(Action::CheckOrCall),
        "a" | "allin" | "all-in" => ParseResult::Action(Action::AllIn),
        "r" | "raise" | "b" | "bet" => {
            let Some(amount) = parts.get(1) else {
                return ParseResult::Invalid(format!(
                    "'{}' requires an amount (e.g., 'raise 100')",
                    command
                ));
            };
            match amount.parse::<u32>() {
                Ok(amount) if amount > 0 => ParseResult::Action(Action::RaiseBy(amount)),
                Ok(_) => ParseResult::Invalid("Raise amount must be positive".to_string()),
                Err(_) => ParseResult::Invalid(format!("Invalid raise amount '{}'", amount)),
            }
        }
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, raise <amount>, allin, q",
            command
        )),
    }
}

/// Seat counts a table can deal for.
pub fn validate_seat_count(seats: usize) -> Result<(), String> {
    if (2..=MAX_SEATS).contains(&seats) {
        Ok(())
    } else {
        Err(format!("seats must be between 2 and {}, got {}", MAX_SEATS, seats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms() {
        for (input, expected) in [
            ("f", Action::Fold),
            ("FOLD", Action::Fold),
            ("c", Action::CheckOrCall),
            ("check", Action::CheckOrCall),
            ("call", Action::CheckOrCall),
            ("a", Action::AllIn),
            ("all-in", Action::AllIn),
            ("bet 40", Action::RaiseBy(40)),
            ("  raise   250 ", Action::RaiseBy(250)),
        ] {
            assert_eq!(parse_player_action(input), ParseResult::Action(expected), "{input}");
        }
        assert_eq!(parse_player_action("quit"), ParseResult::Quit);
    }

    #[test]
    fn bad_amounts_are_invalid() {
        for input in ["raise", "r 0", "r -5", "bet lots", ""] {
            assert!(
                matches!(parse_player_action(input), ParseResult::Invalid(_)),
                "{input}"
            );
        }
    }

    #[test]
    fn seat_count_bounds() {
        assert!(validate_seat_count(2).is_ok());
        assert!(validate_seat_count(MAX_SEATS).is_ok());
        assert!(validate_seat_count(1).is_err());
        assert!(validate_seat_count(MAX_SEATS + 1).is_err());
    }
}
