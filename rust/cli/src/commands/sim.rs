//! `holdem sim`: bots play each other until one holds every chip or the
//! hand limit is reached.
//!
//! Chip conservation is checked after every hand; a violation aborts the
//! run with an internal error.

use std::collections::BTreeMap;
use std::io::Write;

use holdem_ai::create_ai;
use holdem_engine::seat::SeatId;
use holdem_engine::table::{HandOutcome, Table};
use holdem_engine::view::NullRenderer;
use tracing::info;

use super::{bot_name, seat_seed};
use crate::cli::BotKind;
use crate::config::Config;
use crate::error::CliError;
use crate::validation::validate_seat_count;

pub fn handle_sim_command(
    seats: Option<usize>,
    hands: u32,
    seed: Option<u64>,
    ai: BotKind,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let seats = seats.unwrap_or(config.seats);
    validate_seat_count(seats).map_err(CliError::InvalidInput)?;
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);

    let mut table = Table::new(config.table_config(seed), Box::new(NullRenderer))?;
    let mut names = BTreeMap::new();
    for i in 0..seats {
        let id = SeatId(i as u32);
        let name = bot_name(i);
        table.add_seat(
            id,
            name.clone(),
            config.starting_stack,
            create_ai(ai.as_str(), seat_seed(seed, id))?,
        )?;
        names.insert(id, name);
    }
    let name_of = |id: SeatId| names.get(&id).map(String::as_str).unwrap_or("?");

    let expected = table.total_chips();
    writeln!(
        out,
        "sim: seats={} hands={} ai={} seed={}",
        seats,
        hands,
        ai.as_str(),
        seed
    )?;

    let mut played = 0u32;
    let mut winner = None;
    while played < hands {
        match table.play_hand()? {
            HandOutcome::MatchWon(id) => {
                winner = Some(id);
                break;
            }
            HandOutcome::Completed(record) => {
                played += 1;
                let total = table.total_chips();
                if total != expected {
                    return Err(CliError::Internal(format!(
                        "chip count changed from {} to {} in hand {}",
                        expected, total, record.hand_id
                    )));
                }
                let won: Vec<String> = crate::formatters::winnings(&record.awards)
                    .into_iter()
                    .map(|(id, amount)| format!("{} +{}", name_of(id), amount))
                    .collect();
                writeln!(out, "Hand {}: {}", record.hand_id, won.join(", "))?;
                for id in &record.eliminated {
                    writeln!(out, "  {} is out", name_of(*id))?;
                }
            }
        }
    }
    if winner.is_none() && table.seats().len() == 1 {
        winner = table.seats().first().map(|s| s.id());
    }
    info!(hands = played, "simulation finished");

    writeln!(out, "Hands played: {}", played)?;
    writeln!(out, "Final stacks:")?;
    for seat in table.seats() {
        writeln!(out, "  {:<10} {}", seat.name(), seat.stack())?;
    }
    match winner {
        Some(id) => writeln!(out, "Winner: {}", name_of(id))?,
        None => writeln!(out, "No winner after {} hands", played)?,
    }
    Ok(())
}
