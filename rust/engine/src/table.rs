use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::betting::{BettingRound, Providers};
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{Phase, Street};
use crate::hand::classify;
use crate::logger::{BlindPost, HandRecord};
use crate::pot::{settle, Settlement};
use crate::seat::{Seat, SeatId};
use crate::view::{ActionProvider, SeatView, ShowdownSeat, ShowdownView, ViewRenderer};

/// Two hole cards each plus five community cards must fit in one deck.
pub const MAX_SEATS: usize = 23;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: u32,
    /// Consecutive invalid responses before a seat is folded
    pub max_invalid_actions: u32,
    /// Deck seed; drawn from the OS when absent
    pub seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 50,
            max_invalid_actions: 3,
            seed: None,
        }
    }
}

impl TableConfig {
    pub fn big_blind(&self) -> u32 {
        self.small_blind.saturating_mul(2)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 {
            return Err(GameError::InvalidConfig("small blind must be positive".into()));
        }
        if self.small_blind > u32::MAX / 2 {
            return Err(GameError::InvalidConfig(format!(
                "small blind {} is too large",
                self.small_blind
            )));
        }
        if self.max_invalid_actions == 0 {
            return Err(GameError::InvalidConfig(
                "max_invalid_actions must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandOutcome {
    Completed(HandRecord),
    /// Only one seat had chips left, so no hand was dealt
    MatchWon(SeatId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub hands_played: u32,
    pub winner: Option<SeatId>,
    pub stacks: Vec<(SeatId, u32)>,
    pub history: Vec<HandRecord>,
}

/// A poker table: seats with their providers, the deck, the board and the
/// phase machine that drives one hand at a time.
///
/// Phase operations must be called in order (`pre_flop`, `flop`, `turn`,
/// `river`, `showdown`, `reset`); calling one out of turn returns
/// [`GameError::OutOfPhase`]. [`Table::play_hand`] runs the whole sequence.
///
/// A non-recoverable error from a provider aborts the phase mid-hand with
/// cards dealt and chips committed. Nothing is rolled back, so the table
/// cannot continue and should be dropped.
pub struct Table<'a> {
    config: TableConfig,
    seats: Vec<Seat>,
    providers: Providers<'a>,
    renderer: Box<dyn ViewRenderer + 'a>,
    deck: Deck,
    board: Vec<Card>,
    phase: Phase,
    /// Seat that posts the small blind in the next hand
    small_blind_seat: Option<SeatId>,
    /// Index of the current hand's small blind
    hand_small_blind: usize,
    hand_no: u32,
    record: Option<HandRecord>,
}

impl<'a> Table<'a> {
    pub fn new(config: TableConfig, renderer: Box<dyn ViewRenderer + 'a>) -> Result<Self, GameError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        debug!(seed, small_blind = config.small_blind, "table created");
        Ok(Self {
            config,
            seats: Vec::new(),
            providers: Providers::new(),
            renderer,
            deck,
            board: Vec::with_capacity(5),
            phase: Phase::PreFlop,
            small_blind_seat: None,
            hand_small_blind: 0,
            hand_no: 0,
            record: None,
        })
    }

    /// Seats a player between hands. Seats are kept in id order.
    ///
    /// The chips of every seat together must fit in a `u32`, which keeps
    /// pots and payouts from overflowing.
    pub fn add_seat(
        &mut self,
        id: SeatId,
        name: impl Into<String>,
        stack: u32,
        provider: Box<dyn ActionProvider + 'a>,
    ) -> Result<(), GameError> {
        self.expect_phase(Phase::PreFlop)?;
        if self.seats.iter().any(|s| s.id() == id) {
            return Err(GameError::DuplicateSeat(id));
        }
        if stack == 0 {
            return Err(GameError::EmptyStack(id));
        }
        if self.seats.len() >= MAX_SEATS {
            return Err(GameError::TableFull { max: MAX_SEATS });
        }
        if self.total_chips() + u64::from(stack) > u64::from(u32::MAX) {
            return Err(GameError::TooManyChips {
                stack,
                max: u32::MAX,
            });
        }
        let at = self.seats.partition_point(|s| s.id() < id);
        self.seats.insert(at, Seat::new(id, name, stack));
        self.providers.insert(id, provider);
        Ok(())
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id() == id)
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_no
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn pot(&self) -> u32 {
        self.seats.iter().map(Seat::committed).sum()
    }

    /// Chips on the table, stacks and commitments together.
    pub fn total_chips(&self) -> u64 {
        self.seats
            .iter()
            .map(|s| u64::from(s.stack()) + u64::from(s.committed()))
            .sum()
    }

    pub fn small_blind_seat(&self) -> Option<SeatId> {
        self.small_blind_seat
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::OutOfPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn position_of(&self, id: SeatId) -> Option<usize> {
        self.seats.iter().position(|s| s.id() == id)
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.deck.deal_card().ok_or(GameError::DeckExhausted)
    }

    /// Deals hole cards, posts blinds and runs pre-flop betting.
    ///
    /// Returns the match winner without dealing when only one seat is left.
    pub fn pre_flop(&mut self) -> Result<Option<SeatId>, GameError> {
        self.expect_phase(Phase::PreFlop)?;
        let n = self.seats.len();
        match n {
            0 => return Err(GameError::TooFewSeats { count: 0 }),
            1 => {
                let winner = self.seats[0].id();
                info!(seat = %winner, stack = self.seats[0].stack(), "match won");
                return Ok(Some(winner));
            }
            _ => {}
        }

        self.hand_no += 1;
        let mut record = HandRecord::new(self.hand_no);
        info!(hand = %record.hand_id, seats = n, "hand started");

        for i in 0..n {
            let cards = [self.draw()?, self.draw()?];
            self.seats[i].deal_hole(&cards)?;
        }

        let sb = self
            .small_blind_seat
            .and_then(|id| self.position_of(id))
            .unwrap_or(0);
        let bb = (sb + 1) % n;
        self.hand_small_blind = sb;

        let small = self.config.small_blind;
        let big = self.config.big_blind();
        let sb_paid = self.seats[sb].commit(small);
        let bb_paid = self.seats[bb].commit(big);
        record.small_blind = Some(BlindPost {
            seat: self.seats[sb].id(),
            amount: sb_paid,
        });
        record.big_blind = Some(BlindPost {
            seat: self.seats[bb].id(),
            amount: bb_paid,
        });
        info!(
            small_blind = %self.seats[sb].id(),
            sb_paid,
            big_blind = %self.seats[bb].id(),
            bb_paid,
            "blinds posted"
        );
        self.small_blind_seat = Some(self.seats[bb].id());
        self.record = Some(record);

        self.betting_round(Street::Preflop, (bb + 1) % n)?;
        self.phase = Phase::Flop;
        Ok(None)
    }

    pub fn flop(&mut self) -> Result<(), GameError> {
        self.deal_street(Phase::Flop, Street::Flop, 3)
    }

    pub fn turn(&mut self) -> Result<(), GameError> {
        self.deal_street(Phase::Turn, Street::Turn, 1)
    }

    pub fn river(&mut self) -> Result<(), GameError> {
        self.deal_street(Phase::River, Street::River, 1)
    }

    fn deal_street(&mut self, phase: Phase, street: Street, cards: usize) -> Result<(), GameError> {
        self.expect_phase(phase)?;
        for _ in 0..cards {
            let card = self.draw()?;
            self.board.push(card);
        }
        info!(street = %street, board = ?self.board, "community cards dealt");
        self.renderer.street_dealt(street, &self.board);
        self.betting_round(street, self.hand_small_blind)?;
        self.phase = phase.next();
        Ok(())
    }

    fn betting_round(&mut self, street: Street, first_to_act: usize) -> Result<(), GameError> {
        let mut actions = Vec::new();
        BettingRound::new(street, &self.board, first_to_act)
            .with_big_blind(self.config.big_blind())
            .with_retry_limit(self.config.max_invalid_actions)
            .run(
                &mut self.seats,
                &mut self.providers,
                self.renderer.as_mut(),
                &mut actions,
            )?;
        if let Some(record) = self.record.as_mut() {
            record.actions.extend(actions);
        }
        Ok(())
    }

    /// Evaluates every unfolded seat, settles the pot and removes seats
    /// left without chips.
    pub fn showdown(&mut self) -> Result<Settlement, GameError> {
        self.expect_phase(Phase::Showdown)?;
        for seat in self.seats.iter_mut().filter(|s| !s.is_folded()) {
            let hole = seat
                .hole_cards()
                .ok_or(GameError::InvalidHoleCards { count: 0 })?;
            let cards: Vec<Card> = hole.iter().chain(self.board.iter()).copied().collect();
            let seven: [Card; 7] = cards
                .try_into()
                .map_err(|v: Vec<Card>| GameError::InvalidHandSize { count: v.len() })?;
            seat.set_combination(classify(&seven));
        }

        let contributed: Vec<u32> = self.seats.iter().map(Seat::committed).collect();
        let settlement = settle(&mut self.seats, self.hand_small_blind)?;

        self.repair_rotation();
        let eliminated: Vec<SeatId> = self
            .seats
            .iter()
            .filter(|s| s.stack() == 0)
            .map(Seat::id)
            .collect();

        let view = ShowdownView {
            board: self.board.clone(),
            seats: self
                .seats
                .iter()
                .zip(contributed)
                .map(|(seat, contributed)| ShowdownSeat {
                    seat: SeatView::from(seat),
                    hole_cards: if seat.is_folded() { None } else { seat.hole_cards() },
                    combination: seat.combination().cloned(),
                    contributed,
                })
                .collect(),
            awards: settlement.awards.clone(),
            eliminated: eliminated.clone(),
        };
        self.renderer.showdown(&view);

        for id in &eliminated {
            info!(seat = %id, "seat eliminated");
            self.providers.remove(id);
        }
        self.seats.retain(|s| s.stack() > 0);

        if let Some(record) = self.record.as_mut() {
            record.board = self.board.clone();
            record.awards = settlement.awards.clone();
            record.eliminated = eliminated;
        }
        self.phase = Phase::Reset;
        Ok(settlement)
    }

    /// Moves the next small blind past seats that just went bust.
    fn repair_rotation(&mut self) {
        let Some(pos) = self.small_blind_seat.and_then(|id| self.position_of(id)) else {
            return;
        };
        let n = self.seats.len();
        self.small_blind_seat = (0..n)
            .map(|offset| &self.seats[(pos + offset) % n])
            .find(|s| s.stack() > 0)
            .map(Seat::id);
    }

    /// Clears the board, reshuffles a full deck and readies seats for the
    /// next hand. Returns the finished hand's record.
    pub fn reset(&mut self) -> Result<HandRecord, GameError> {
        self.expect_phase(Phase::Reset)?;
        self.board.clear();
        self.deck.shuffle();
        for seat in &mut self.seats {
            seat.reset_for_hand();
        }
        self.phase = Phase::PreFlop;
        let record = self
            .record
            .take()
            .unwrap_or_else(|| HandRecord::new(self.hand_no));
        debug!(hand = %record.hand_id, "table reset");
        Ok(record)
    }

    pub fn play_hand(&mut self) -> Result<HandOutcome, GameError> {
        if let Some(winner) = self.pre_flop()? {
            return Ok(HandOutcome::MatchWon(winner));
        }
        self.flop()?;
        self.turn()?;
        self.river()?;
        self.showdown()?;
        Ok(HandOutcome::Completed(self.reset()?))
    }

    /// Plays until one seat holds every chip or `max_hands` hands are done.
    pub fn play_match(&mut self, max_hands: Option<u32>) -> Result<MatchSummary, GameError> {
        let mut history = Vec::new();
        let mut winner = None;
        while max_hands.map_or(true, |max| (history.len() as u32) < max) {
            match self.play_hand()? {
                HandOutcome::Completed(record) => history.push(record),
                HandOutcome::MatchWon(id) => {
                    winner = Some(id);
                    break;
                }
            }
        }
        if winner.is_none() && self.seats.len() == 1 {
            winner = Some(self.seats[0].id());
        }
        Ok(MatchSummary {
            hands_played: history.len() as u32,
            winner,
            stacks: self.seats.iter().map(|s| (s.id(), s.stack())).collect(),
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::Action;
    use crate::view::{ActionContext, NullRenderer, ScriptedProvider};

    fn table_with(stacks: &[u32]) -> Table<'static> {
        let config = TableConfig {
            seed: Some(7),
            ..TableConfig::default()
        };
        let mut table = Table::new(config, Box::new(NullRenderer)).unwrap();
        for (i, stack) in stacks.iter().enumerate() {
            table
                .add_seat(
                    SeatId(i as u32),
                    format!("p{i}"),
                    *stack,
                    Box::new(ScriptedProvider::new([])),
                )
                .unwrap();
        }
        table
    }

    #[test]
    fn phases_must_run_in_order() {
        let mut table = table_with(&[1000, 1000]);
        assert_eq!(
            table.flop().unwrap_err(),
            GameError::OutOfPhase {
                expected: Phase::Flop,
                actual: Phase::PreFlop
            }
        );
        table.pre_flop().unwrap();
        assert!(table.reset().is_err());
    }

    #[test]
    fn rejects_duplicate_and_empty_seats() {
        let mut table = table_with(&[1000]);
        let dup = table.add_seat(SeatId(0), "x", 10, Box::new(ScriptedProvider::new([])));
        assert_eq!(dup.unwrap_err(), GameError::DuplicateSeat(SeatId(0)));
        let empty = table.add_seat(SeatId(5), "y", 0, Box::new(ScriptedProvider::new([])));
        assert_eq!(empty.unwrap_err(), GameError::EmptyStack(SeatId(5)));
    }

    #[test]
    fn zero_small_blind_is_rejected() {
        let config = TableConfig {
            small_blind: 0,
            ..TableConfig::default()
        };
        assert!(matches!(
            Table::new(config, Box::new(NullRenderer)),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn blinds_rotate_one_seat_per_hand() {
        let mut table = table_with(&[1000, 1000, 1000]);
        let first = table.play_hand().unwrap();
        let second = table.play_hand().unwrap();
        let (HandOutcome::Completed(a), HandOutcome::Completed(b)) = (first, second) else {
            panic!("both hands should complete");
        };
        assert_eq!(a.small_blind.unwrap().seat, SeatId(0));
        assert_eq!(b.small_blind.unwrap().seat, SeatId(1));
        assert_eq!(b.big_blind.unwrap().seat, SeatId(2));
    }

    #[test]
    fn total_chips_must_fit_in_u32() {
        let mut table = table_with(&[3_000_000_000]);
        let err = table
            .add_seat(SeatId(1), "big", 3_000_000_000, Box::new(ScriptedProvider::new([])))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::TooManyChips {
                stack: 3_000_000_000,
                max: u32::MAX
            }
        );
        assert_eq!(table.seats().len(), 1);
    }

    #[test]
    fn huge_all_ins_keep_every_chip() {
        let stack = u32::MAX / 2;
        let mut table = Table::new(
            TableConfig {
                seed: Some(3),
                ..TableConfig::default()
            },
            Box::new(NullRenderer),
        )
        .unwrap();
        for i in 0..2 {
            let provider = ScriptedProvider::new([]).with_fallback(Action::AllIn);
            table
                .add_seat(SeatId(i), format!("p{i}"), stack, Box::new(provider))
                .unwrap();
        }
        let outcome = table.play_hand().unwrap();
        assert!(matches!(outcome, HandOutcome::Completed(_)));
        assert_eq!(table.total_chips(), 2 * u64::from(stack));
    }

    #[test]
    fn fatal_provider_error_aborts_mid_hand() {
        let mut table = table_with(&[1000]);
        let lost = |_: &ActionContext| -> Result<Action, GameError> {
            Err(GameError::InvalidConfig("connection lost".into()))
        };
        table.add_seat(SeatId(1), "p1", 1000, Box::new(lost)).unwrap();

        // Seat 1 posts the big blind, seat 0 acts first and calls.
        let err = table.pre_flop().unwrap_err();
        assert!(!err.is_recoverable());
        assert_eq!(table.phase(), Phase::PreFlop);
        assert_eq!(table.pot(), 200);
        assert_eq!(table.total_chips(), 2000);
    }
}
