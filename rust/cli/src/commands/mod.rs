//! One module per subcommand.
//!
//! Every handler takes its output streams as `&mut dyn Write` and reports
//! failures as [`CliError`](crate::error::CliError); `run` turns those into
//! exit codes.

mod cfg;
mod deal;
mod eval;
mod play;
mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use holdem_engine::seat::SeatId;

/// Names given to bot seats, in seat order.
const BOT_NAMES: &[&str] = &["Vasya", "Petya", "Dusia"];

pub(crate) fn bot_name(index: usize) -> String {
    match BOT_NAMES.get(index) {
        Some(name) => (*name).to_string(),
        None => format!("Bot {}", index + 1),
    }
}

/// Derives a per-seat seed so two random bots never mirror each other.
pub(crate) fn seat_seed(seed: u64, id: SeatId) -> u64 {
    seed.wrapping_add(u64::from(id.0).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
