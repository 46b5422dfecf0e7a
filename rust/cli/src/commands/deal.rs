//! `holdem deal`: deals one hand from a seeded deck, without betting, and
//! shows who would win at showdown.

use std::io::Write;

use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;
use holdem_engine::hand::{classify, find_best_among};

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_board, format_card};
use crate::validation::validate_seat_count;

pub fn handle_deal_command(
    seats: Option<usize>,
    seed: Option<u64>,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seats = seats.unwrap_or(config.seats);
    validate_seat_count(seats).map_err(CliError::InvalidInput)?;
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);

    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();
    let mut draw = || deck.deal_card().ok_or(GameError::DeckExhausted);

    let mut holes = Vec::with_capacity(seats);
    for _ in 0..seats {
        holes.push([draw()?, draw()?]);
    }
    let mut board = Vec::with_capacity(5);
    for _ in 0..5 {
        board.push(draw()?);
    }

    writeln!(out, "deal: seats={} seed={}", seats, seed)?;
    writeln!(out, "Board: {}", format_board(&board))?;
    let combinations: Vec<_> = holes
        .iter()
        .map(|[a, b]| {
            let cards: [Card; 7] = [*a, *b, board[0], board[1], board[2], board[3], board[4]];
            classify(&cards)
        })
        .collect();
    for (i, ([a, b], combination)) in holes.iter().zip(&combinations).enumerate() {
        writeln!(
            out,
            "Seat {}: {} {}  {}",
            i,
            format_card(a),
            format_card(b),
            combination
        )?;
    }

    let winners = find_best_among(combinations.iter().enumerate());
    let names: Vec<String> = winners.iter().map(|i| format!("Seat {}", i)).collect();
    if names.len() == 1 {
        writeln!(out, "Winner: {}", names.join(""))?;
    } else {
        writeln!(out, "Split: {}", names.join(", "))?;
    }
    Ok(())
}
