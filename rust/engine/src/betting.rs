use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::Street;
use crate::logger::ActionRecord;
use crate::rules::{validate_action, ValidatedAction};
use crate::seat::{Seat, SeatId};
use crate::view::{ActionContext, ActionProvider, ViewRenderer};

/// Action providers keyed by the seat they decide for.
pub type Providers<'a> = BTreeMap<SeatId, Box<dyn ActionProvider + 'a>>;

/// Highest commitment among seats that have not folded.
pub fn table_high(seats: &[Seat]) -> u32 {
    seats
        .iter()
        .filter(|s| !s.is_folded())
        .map(Seat::committed)
        .max()
        .unwrap_or(0)
}

/// Seats still holding a claim on the pot.
pub fn contenders(seats: &[Seat]) -> usize {
    seats.iter().filter(|s| !s.is_folded()).count()
}

fn active_count(seats: &[Seat]) -> usize {
    seats.iter().filter(|s| s.is_active()).count()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundSummary {
    /// Actions applied, including forced folds
    pub solicitations: u32,
    /// Times the round reopened because someone was below the table high
    pub reopenings: u32,
}

/// One street of betting.
///
/// The first pass asks every active seat once, in seat order rotated to
/// start at `first_to_act`. Further passes ask only active seats still below
/// the table high, in the same order, until nobody is below it. The round
/// ends early as soon as a single seat remains unfolded.
#[derive(Debug, Clone)]
pub struct BettingRound<'b> {
    street: Street,
    board: &'b [Card],
    first_to_act: usize,
    big_blind: u32,
    max_invalid_actions: u32,
}

impl<'b> BettingRound<'b> {
    pub fn new(street: Street, board: &'b [Card], first_to_act: usize) -> Self {
        Self {
            street,
            board,
            first_to_act,
            big_blind: 0,
            max_invalid_actions: 3,
        }
    }

    pub fn with_big_blind(mut self, big_blind: u32) -> Self {
        self.big_blind = big_blind;
        self
    }

    /// Consecutive rejected responses tolerated before the seat is folded.
    pub fn with_retry_limit(mut self, max_invalid_actions: u32) -> Self {
        self.max_invalid_actions = max_invalid_actions.max(1);
        self
    }

    fn seating_order(&self, len: usize) -> Vec<usize> {
        if len == 0 {
            return Vec::new();
        }
        let start = self.first_to_act % len;
        (0..len).map(|offset| (start + offset) % len).collect()
    }

    pub fn run(
        &self,
        seats: &mut [Seat],
        providers: &mut Providers<'_>,
        renderer: &mut dyn ViewRenderer,
        history: &mut Vec<ActionRecord>,
    ) -> Result<RoundSummary, GameError> {
        let mut summary = RoundSummary::default();
        for seat in seats.iter_mut() {
            let active = seat.is_active();
            seat.set_to_act(active);
        }
        let order = self.seating_order(seats.len());

        for &idx in &order {
            if contenders(seats) <= 1 {
                break;
            }
            if !seats[idx].to_act() || !seats[idx].is_active() {
                continue;
            }
            // Nobody left to bet against.
            if active_count(seats) == 1 && seats[idx].committed() >= table_high(seats) {
                seats[idx].set_to_act(false);
                continue;
            }
            self.solicit(idx, seats, providers, renderer, history)?;
            summary.solicitations += 1;
            seats[idx].set_to_act(false);
        }

        while contenders(seats) > 1 {
            let high = table_high(seats);
            let pending: Vec<usize> = order
                .iter()
                .copied()
                .filter(|&i| seats[i].is_active() && seats[i].committed() < high)
                .collect();
            if pending.is_empty() {
                break;
            }
            summary.reopenings += 1;
            debug!(street = %self.street, high, pending = pending.len(), "betting reopened");
            for idx in pending {
                if contenders(seats) <= 1 {
                    break;
                }
                if !seats[idx].is_active() {
                    continue;
                }
                self.solicit(idx, seats, providers, renderer, history)?;
                summary.solicitations += 1;
            }
        }

        for seat in seats.iter_mut() {
            seat.set_to_act(false);
        }
        debug!(
            street = %self.street,
            solicitations = summary.solicitations,
            reopenings = summary.reopenings,
            pot = seats.iter().map(|s| u64::from(s.committed())).sum::<u64>(),
            "betting round closed"
        );
        Ok(summary)
    }

    fn solicit(
        &self,
        idx: usize,
        seats: &mut [Seat],
        providers: &mut Providers<'_>,
        renderer: &mut dyn ViewRenderer,
        history: &mut Vec<ActionRecord>,
    ) -> Result<(), GameError> {
        let id = seats[idx].id();
        let provider = providers
            .get_mut(&id)
            .ok_or(GameError::UnknownSeat(id))?;
        let mut attempt = 1;
        loop {
            let ctx = ActionContext::new(self.street, self.board, seats, idx, self.big_blind, attempt);
            renderer.before_action(&ctx);
            let outcome = provider
                .request_action(&ctx)
                .and_then(|action| validate_action(ctx.stack, ctx.to_call(), action));
            match outcome {
                Ok(action) => {
                    apply(&mut seats[idx], action);
                    debug!(street = %self.street, seat = %id, ?action, "action applied");
                    history.push(ActionRecord {
                        seat: id,
                        street: self.street,
                        action,
                        forced: false,
                    });
                    return Ok(());
                }
                Err(e) if e.is_recoverable() => {
                    warn!(seat = %id, attempt, error = %e, "action rejected");
                    renderer.rejected(id, &e);
                    if attempt >= self.max_invalid_actions {
                        warn!(seat = %id, attempts = attempt, "folding seat after repeated invalid actions");
                        seats[idx].fold();
                        history.push(ActionRecord {
                            seat: id,
                            street: self.street,
                            action: ValidatedAction::Fold,
                            forced: true,
                        });
                        return Ok(());
                    }
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn apply(seat: &mut Seat, action: ValidatedAction) {
    match action {
        ValidatedAction::Fold => seat.fold(),
        ValidatedAction::Check => {}
        ValidatedAction::Call(n) | ValidatedAction::Raise(n) | ValidatedAction::AllIn(n) => {
            seat.commit(n);
        }
    }
}
