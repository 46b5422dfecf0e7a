//! # holdem CLI library
//!
//! Terminal front end for the `holdem_engine` table: a stdin-driven human
//! seat, bot simulations and a few inspection tools.
//!
//! The entry point is [`run`], which parses arguments, dispatches to a
//! subcommand and returns the process exit code.
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = holdem_cli::run(["holdem", "eval", "As", "Ks", "Qs", "Js", "Ts"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Royal flush"));
//! ```
//!
//! ## Subcommands
//!
//! - `play`: play against bots, entering actions on stdin
//! - `sim`: let bots play each other and check chip conservation
//! - `eval`: classify a hand or compare two hands
//! - `deal`: deal one seeded hand and show who would win
//! - `cfg`: show the resolved configuration

use std::io::{BufRead, Write};

use clap::Parser;

#[macro_use]
mod macros;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod terminal;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_sim_command,
};
pub use error::CliError;

/// Runs the CLI with `args` (program name first), reading interactive input
/// from stdin.
///
/// Returns [`exit_code::SUCCESS`] or [`exit_code::ERROR`].
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// Same as [`run`] with an explicit input stream for the human seat.
///
/// ```
/// use std::io::Cursor;
///
/// let mut input = Cursor::new("q\n");
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let args = ["holdem", "play", "--seats", "2", "--seed", "1"];
/// let code = holdem_cli::run_with_input(args, &mut input, &mut out, &mut err);
/// assert_eq!(code, 0);
/// ```
pub fn run_with_input<I, S>(
    args: I,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version go to stdout and succeed
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: holdem <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for name in Commands::NAMES {
                        write_or_exit!(err, "  {}", name);
                    }
                    write_or_exit!(err, "\nFor full help, run: holdem --help");
                    exit_code::ERROR
                }
            };
        }
    };

    match dispatch(cli.cmd, input, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn dispatch(
    cmd: Commands,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Eval { cards, vs } => handle_eval_command(&cards, vs.as_deref(), out),
        Commands::Deal { seats, seed } => {
            let config = config::load()?;
            handle_deal_command(seats, seed, &config, out)
        }
        Commands::Sim {
            seats,
            hands,
            seed,
            ai,
        } => {
            let config = config::load()?;
            handle_sim_command(seats, hands, seed, ai, &config, out)
        }
        Commands::Play {
            seats,
            hands,
            seed,
            ai,
        } => {
            let config = config::load()?;
            handle_play_command(seats, hands, seed, ai, &config, out, err, input)
        }
    }
}
