//! Card, board, action and seat formatters for terminal display.
//!
//! Unicode suit symbols are used where the terminal supports them, with
//! ASCII letters as a fallback.
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_board, format_card};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use std::collections::BTreeMap;

use holdem_engine::cards::{Card, Rank, Suit};
use holdem_engine::pot::PotAward;
use holdem_engine::rules::ValidatedAction;
use holdem_engine::seat::SeatId;
use holdem_engine::view::SeatView;

/// On Windows, checks for Windows Terminal, a modern terminal or VS Code.
/// Unix-like systems are assumed to support Unicode.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Single-character rank (2-9, T, J, Q, K, A).
pub fn format_rank(rank: &Rank) -> String {
    match rank {
        Rank::Ten => "T".to_string(),
        other => other.short_name().to_string(),
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Bracketed board, e.g. `[A♠ K♥ Q♦]`, or `[]` before the flop.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// ```rust
/// use holdem_engine::rules::ValidatedAction;
/// # use holdem_cli::formatters::format_action;
///
/// assert_eq!(format_action(&ValidatedAction::Fold), "fold");
/// assert_eq!(format_action(&ValidatedAction::Raise(100)), "raise 100");
/// assert_eq!(format_action(&ValidatedAction::AllIn(40)), "all-in 40");
/// ```
pub fn format_action(action: &ValidatedAction) -> String {
    match action {
        ValidatedAction::Fold => "fold".to_string(),
        ValidatedAction::Check => "check".to_string(),
        ValidatedAction::Call(amount) => format!("call {}", amount),
        ValidatedAction::Raise(amount) => format!("raise {}", amount),
        ValidatedAction::AllIn(amount) => format!("all-in {}", amount),
    }
}

pub fn format_seat(seat: &SeatView) -> String {
    let mut line = format!(
        "{:<10} stack {:>6}  bet {:>5}",
        seat.name, seat.stack, seat.committed
    );
    if seat.folded {
        line.push_str("  (folded)");
    } else if seat.all_in {
        line.push_str("  (all-in)");
    }
    line
}

/// Chips won per seat across every pot of a hand, in seat order.
pub fn winnings(awards: &[PotAward]) -> BTreeMap<SeatId, u32> {
    let mut won = BTreeMap::new();
    for award in awards {
        for id in &award.winners {
            let odd = u32::from(award.odd_chips.contains(id));
            *won.entry(*id).or_insert(0) += award.share + odd;
        }
    }
    won
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rank() {
        assert_eq!(format_rank(&Rank::Two), "2");
        assert_eq!(format_rank(&Rank::Ten), "T");
        assert_eq!(format_rank(&Rank::Ace), "A");
    }

    #[test]
    fn test_format_suit_unicode_or_ascii() {
        let hearts = format_suit(&Suit::Hearts);
        assert!(hearts == "♥" || hearts == "h");
    }

    #[test]
    fn test_format_board_empty() {
        assert_eq!(format_board(&[]), "[]");
    }

    #[test]
    fn seat_line_marks_state() {
        let seat = SeatView {
            id: SeatId(1),
            name: "Petya".into(),
            stack: 900,
            committed: 300,
            folded: false,
            all_in: true,
        };
        let line = format_seat(&seat);
        assert!(line.starts_with("Petya"));
        assert!(line.ends_with("(all-in)"));
    }
}
