use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::Combination;

/// Stable seat identity. Seats are always addressed by id, never by position,
/// because positions shift when busted seats leave the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SeatId(pub u32);

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// A response from an action provider.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Give up the hand
    Fold,
    /// Check when nothing is owed, otherwise call (all-in if the stack is short)
    CheckOrCall,
    /// Commit exactly this many additional chips
    RaiseBy(u32),
    /// Commit the whole remaining stack
    AllIn,
}

/// A player's place at the table: chips that persist across hands plus the
/// per-hand state that `reset_for_hand` clears.
#[derive(Debug, Clone)]
pub struct Seat {
    id: SeatId,
    name: String,
    stack: u32,
    hole: Option<[Card; 2]>,
    committed: u32,
    folded: bool,
    all_in: bool,
    to_act: bool,
    combination: Option<Combination>,
}

impl Seat {
    pub fn new(id: SeatId, name: impl Into<String>, stack: u32) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole: None,
            committed: 0,
            folded: false,
            all_in: false,
            to_act: false,
            combination: None,
        }
    }

    pub fn id(&self) -> SeatId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn stack(&self) -> u32 {
        self.stack
    }
    pub fn committed(&self) -> u32 {
        self.committed
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn to_act(&self) -> bool {
        self.to_act
    }
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }
    pub fn combination(&self) -> Option<&Combination> {
        self.combination.as_ref()
    }

    /// Still in the hand and able to act.
    pub fn is_active(&self) -> bool {
        !self.folded && !self.all_in
    }

    pub fn deal_hole(&mut self, cards: &[Card]) -> Result<(), GameError> {
        match cards {
            [a, b] => {
                self.hole = Some([*a, *b]);
                Ok(())
            }
            _ => Err(GameError::InvalidHoleCards { count: cards.len() }),
        }
    }

    /// Moves up to `amount` chips from the stack into the pot and returns
    /// what was actually moved. Emptying the stack marks the seat all-in.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.committed += paid;
        if self.stack == 0 && paid > 0 {
            self.all_in = true;
        }
        paid
    }

    /// Removes up to `cap` chips of this seat's commitment for a side pot.
    pub fn take_committed(&mut self, cap: u32) -> u32 {
        let take = self.committed.min(cap);
        self.committed -= take;
        take
    }

    /// Tables cap their total chips at `u32::MAX`, so a payout always fits.
    pub fn add_chips(&mut self, amount: u32) {
        self.stack += amount;
    }

    pub fn fold(&mut self) {
        self.folded = true;
        self.to_act = false;
    }

    pub(crate) fn set_to_act(&mut self, to_act: bool) {
        self.to_act = to_act;
    }

    pub(crate) fn set_combination(&mut self, combination: Combination) {
        self.combination = Some(combination);
    }

    /// Clears everything tied to the finished hand; the stack is kept.
    pub fn reset_for_hand(&mut self) {
        self.hole = None;
        self.committed = 0;
        self.folded = false;
        self.all_in = false;
        self.to_act = false;
        self.combination = None;
    }
}
