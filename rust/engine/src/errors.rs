use thiserror::Error;

use crate::game::Phase;
use crate::seat::SeatId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid rank value: {0} (expected 2..=14)")]
    InvalidRank(u8),
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("A seat needs exactly 2 hole cards, got {count}")]
    InvalidHoleCards { count: usize },
    #[error("Hand evaluation needs 5 to 7 cards, got {count}")]
    InvalidHandSize { count: usize },
    #[error("Invalid raise amount: {amount} (stack: {stack})")]
    InvalidRaise { amount: u32, stack: u32 },
    #[error("Unrecognized action: {0}")]
    UnrecognizedAction(String),
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("No contenders left to settle the pot")]
    NoContenders,
    #[error("{0} reached showdown without a combination")]
    MissingCombination(SeatId),
    #[error("Unknown seat: {0}")]
    UnknownSeat(SeatId),
    #[error("Seat already taken: {0}")]
    DuplicateSeat(SeatId),
    #[error("A seat must start with chips ({0} has none)")]
    EmptyStack(SeatId),
    #[error("Table is full ({max} seats)")]
    TableFull { max: usize },
    #[error("Seating {stack} chips would put more than {max} chips on the table")]
    TooManyChips { stack: u32, max: u32 },
    #[error("At least 2 seats are required to deal, got {count}")]
    TooFewSeats { count: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Expected phase {expected:?}, table is in {actual:?}")]
    OutOfPhase { expected: Phase, actual: Phase },
}

impl GameError {
    /// Input errors that leave state untouched and cause the same seat to be asked again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidRaise { .. } | GameError::UnrecognizedAction(_)
        )
    }
}
