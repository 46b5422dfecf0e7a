//! `holdem play`: one human seat against bots.
//!
//! The human is always seat 0 and reads actions from the given input; the
//! other seats are bots. The session ends when the human quits (or input
//! runs out), busts, wins every chip, or the hand limit is reached.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::rc::Rc;

use holdem_ai::create_ai;
use holdem_engine::logger::HandRecord;
use holdem_engine::seat::SeatId;
use holdem_engine::table::{HandOutcome, Table};

use super::{bot_name, seat_seed};
use crate::cli::BotKind;
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_action;
use crate::terminal::{Console, TerminalProvider, TerminalRenderer};
use crate::validation::validate_seat_count;

pub const HUMAN: SeatId = SeatId(0);
const HUMAN_NAME: &str = "You";

#[allow(clippy::too_many_arguments)]
pub fn handle_play_command(
    seats: Option<usize>,
    hands: Option<u32>,
    seed: Option<u64>,
    ai: BotKind,
    config: &Config,
    out: &mut dyn Write,
    err: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), CliError> {
    let seats = seats.unwrap_or(config.seats);
    validate_seat_count(seats).map_err(CliError::InvalidInput)?;
    if hands == Some(0) {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);

    let quit = Rc::new(Cell::new(false));
    let renderer = TerminalRenderer::new(Console::shared(out, err), Some(HUMAN));
    let mut table = Table::new(config.table_config(seed), Box::new(renderer.clone()))?;

    let mut names = BTreeMap::new();
    table.add_seat(
        HUMAN,
        HUMAN_NAME,
        config.starting_stack,
        Box::new(TerminalProvider::new(input, quit.clone())),
    )?;
    names.insert(HUMAN, HUMAN_NAME.to_string());
    for i in 1..seats {
        let id = SeatId(i as u32);
        let name = bot_name(i - 1);
        table.add_seat(
            id,
            name.clone(),
            config.starting_stack,
            create_ai(ai.as_str(), seat_seed(seed, id))?,
        )?;
        names.insert(id, name);
    }

    renderer.say(&format!(
        "play: seats={} ai={} seed={} blinds={}/{}",
        seats,
        ai.as_str(),
        seed,
        config.small_blind,
        config.small_blind.saturating_mul(2)
    ))?;
    renderer.say("Actions: f=fold, c=check/call, r N=raise by N, a=all-in, q=quit")?;

    let mut played = 0u32;
    loop {
        if hands.is_some_and(|limit| played >= limit) {
            break;
        }
        renderer.say("")?;
        renderer.say(&format!("=== Hand {} ===", table.hand_number() + 1))?;
        let outcome = table.play_hand()?;
        renderer.take_error()?;
        match outcome {
            HandOutcome::MatchWon(id) => {
                let name = names.get(&id).map(String::as_str).unwrap_or("?");
                renderer.say(&format!("{} won the match", name))?;
                break;
            }
            HandOutcome::Completed(record) => {
                played += 1;
                write_action_log(&renderer, &record, &names)?;
            }
        }
        if quit.get() {
            renderer.say("Session ended")?;
            break;
        }
        if table.seat(HUMAN).is_none() {
            renderer.say("You are out of chips")?;
            break;
        }
    }

    renderer.say("")?;
    renderer.say(&format!("Hands played: {}", played))?;
    for seat in table.seats() {
        renderer.say(&format!("  {:<10} {}", seat.name(), seat.stack()))?;
    }
    renderer.take_error()?;
    Ok(())
}

fn write_action_log(
    renderer: &TerminalRenderer<'_>,
    record: &HandRecord,
    names: &BTreeMap<SeatId, String>,
) -> Result<(), CliError> {
    let name_of = |id: SeatId| names.get(&id).map(String::as_str).unwrap_or("?");
    renderer.say(&format!("Hand {} log:", record.hand_id))?;
    for blind in [record.small_blind, record.big_blind].into_iter().flatten() {
        renderer.say(&format!(
            "  {:<9}{} posts {}",
            "blind",
            name_of(blind.seat),
            blind.amount
        ))?;
    }
    for action in &record.actions {
        let forced = if action.forced { " (forced)" } else { "" };
        renderer.say(&format!(
            "  {:<9}{} {}{}",
            action.street.name(),
            name_of(action.seat),
            format_action(&action.action),
            forced
        ))?;
    }
    Ok(())
}
