//! Capabilities the table consumes: who decides a seat's action and who
//! gets to see the table. The engine never touches an input device or an
//! output medium itself.

use std::collections::VecDeque;

use crate::betting::table_high;
use crate::cards::Card;
use crate::errors::GameError;
use crate::game::Street;
use crate::hand::Combination;
use crate::pot::PotAward;
use crate::seat::{Action, Seat, SeatId};

/// Public state of one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub id: SeatId,
    pub name: String,
    pub stack: u32,
    pub committed: u32,
    pub folded: bool,
    pub all_in: bool,
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        Self {
            id: seat.id(),
            name: seat.name().to_string(),
            stack: seat.stack(),
            committed: seat.committed(),
            folded: seat.is_folded(),
            all_in: seat.is_all_in(),
        }
    }
}

/// Everything a seat may know when asked to act: the public table plus
/// its own hole cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    pub street: Street,
    pub board: Vec<Card>,
    pub seat: SeatId,
    pub hole_cards: Option<[Card; 2]>,
    pub stack: u32,
    pub committed: u32,
    /// Highest commitment among seats still in the hand
    pub table_high: u32,
    pub big_blind: u32,
    pub seats: Vec<SeatView>,
    /// 1 on the first request, incremented after each rejected response
    pub attempt: u32,
}

impl ActionContext {
    pub fn new(
        street: Street,
        board: &[Card],
        seats: &[Seat],
        index: usize,
        big_blind: u32,
        attempt: u32,
    ) -> Self {
        let seat = &seats[index];
        Self {
            street,
            board: board.to_vec(),
            seat: seat.id(),
            hole_cards: seat.hole_cards(),
            stack: seat.stack(),
            committed: seat.committed(),
            table_high: table_high(seats),
            big_blind,
            seats: seats.iter().map(SeatView::from).collect(),
            attempt,
        }
    }

    pub fn to_call(&self) -> u32 {
        self.table_high.saturating_sub(self.committed)
    }

    pub fn pot(&self) -> u32 {
        self.seats
            .iter()
            .fold(0u32, |pot, s| pot.saturating_add(s.committed))
    }
}

/// One seat as revealed at showdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownSeat {
    pub seat: SeatView,
    pub hole_cards: Option<[Card; 2]>,
    pub combination: Option<Combination>,
    /// Chips the seat put into the pot this hand
    pub contributed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownView {
    pub board: Vec<Card>,
    pub seats: Vec<ShowdownSeat>,
    pub awards: Vec<PotAward>,
    pub eliminated: Vec<SeatId>,
}

/// Decides actions for one seat. Called synchronously; the table blocks
/// until it returns.
///
/// Returning a recoverable error (see [`GameError::is_recoverable`]) makes
/// the table ask again; any other error aborts the hand.
pub trait ActionProvider {
    fn request_action(&mut self, ctx: &ActionContext) -> Result<Action, GameError>;
}

impl<F> ActionProvider for F
where
    F: FnMut(&ActionContext) -> Result<Action, GameError>,
{
    fn request_action(&mut self, ctx: &ActionContext) -> Result<Action, GameError> {
        self(ctx)
    }
}

/// Receives table snapshots. All methods default to doing nothing.
pub trait ViewRenderer {
    fn street_dealt(&mut self, _street: Street, _board: &[Card]) {}
    fn before_action(&mut self, _ctx: &ActionContext) {}
    fn rejected(&mut self, _seat: SeatId, _error: &GameError) {}
    fn showdown(&mut self, _view: &ShowdownView) {}
}

/// Renderer that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl ViewRenderer for NullRenderer {}

/// Replays a fixed list of actions, then falls back to a default.
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    script: VecDeque<Action>,
    fallback: Action,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback: Action::CheckOrCall,
        }
    }

    pub fn with_fallback(mut self, fallback: Action) -> Self {
        self.fallback = fallback;
        self
    }
}

impl ActionProvider for ScriptedProvider {
    fn request_action(&mut self, _ctx: &ActionContext) -> Result<Action, GameError> {
        Ok(self.script.pop_front().unwrap_or(self.fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_ignores_folded_commitments() {
        let mut seats: Vec<Seat> = (0..3).map(|i| Seat::new(SeatId(i), format!("p{i}"), 1000)).collect();
        seats[0].commit(300);
        seats[0].fold();
        seats[1].commit(200);
        seats[2].commit(50);

        let ctx = ActionContext::new(Street::Flop, &[], &seats, 2, 100, 1);
        assert_eq!(ctx.table_high, 200);
        assert_eq!(ctx.to_call(), 150);
        assert_eq!(ctx.pot(), 550);
    }
}
