//! Command-line surface of the `holdem` binary.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "holdem", version, about = "Texas Hold'em at the terminal")]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Bot strategy for the seats the human does not occupy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BotKind {
    /// Hand-strength and pot-odds driven play.
    Baseline,
    /// Uniformly random legal actions.
    Random,
}

impl BotKind {
    /// Name understood by `holdem_ai::create_ai`.
    ///
    /// ```
    /// # use holdem_cli::cli::BotKind;
    /// assert_eq!(BotKind::Random.as_str(), "random");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            BotKind::Baseline => "baseline",
            BotKind::Random => "random",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play at a table against bots, entering actions on stdin
    Play {
        /// Total seats including yours (default from config)
        #[arg(long)]
        seats: Option<usize>,
        /// Stop after this many hands (default: until the match ends)
        #[arg(long)]
        hands: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = BotKind::Baseline)]
        ai: BotKind,
    },
    /// Let bots play each other and report the results
    Sim {
        #[arg(long)]
        seats: Option<usize>,
        #[arg(long, default_value_t = 100)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = BotKind::Baseline)]
        ai: BotKind,
    },
    /// Classify 5 to 7 cards, e.g. `holdem eval As Ks Qs Js Ts 2d 3c`
    Eval {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
        /// Second hand to compare against, as one quoted string
        #[arg(long)]
        vs: Option<String>,
    },
    /// Deal one hand's hole cards and board without betting
    Deal {
        #[arg(long)]
        seats: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: &'static [&'static str] = &["play", "sim", "eval", "deal", "cfg"];
}
