//! # holdem-engine: Texas Hold'em Table Core
//!
//! A multi-seat no-limit Texas Hold'em engine: card model, seven-card hand
//! evaluation, betting rounds, side-pot settlement and blind rotation.
//! Decisions and presentation are plugged in through [`view::ActionProvider`]
//! and [`view::ViewRenderer`], so the same table drives a terminal game,
//! bots or tests.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Combination detection and comparison
//! - [`seat`] - Seat state, chip movement and player actions
//! - [`rules`] - Action validation against stack and amount owed
//! - [`betting`] - One street of betting
//! - [`pot`] - Showdown settlement with side pots
//! - [`table`] - Phase machine, blinds and match play
//! - [`view`] - Action provider and renderer capabilities
//! - [`logger`] - In-memory hand history
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let best = evaluate(&cards).unwrap();
//! assert_eq!(best.category, Category::RoyalFlush);
//! ```
//!
//! ## Playing a Hand
//!
//! ```rust
//! use holdem_engine::seat::SeatId;
//! use holdem_engine::table::{HandOutcome, Table, TableConfig};
//! use holdem_engine::view::{NullRenderer, ScriptedProvider};
//!
//! let config = TableConfig { seed: Some(42), ..TableConfig::default() };
//! let mut table = Table::new(config, Box::new(NullRenderer)).unwrap();
//! for (id, name) in [(0, "Vasya"), (1, "Petya")] {
//!     table
//!         .add_seat(SeatId(id), name, 1500, Box::new(ScriptedProvider::new([])))
//!         .unwrap();
//! }
//! let before = table.total_chips();
//! match table.play_hand().unwrap() {
//!     HandOutcome::Completed(record) => assert_eq!(record.board.len(), 5),
//!     HandOutcome::MatchWon(_) => unreachable!(),
//! }
//! assert_eq!(table.total_chips(), before);
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod pot;
pub mod rules;
pub mod seat;
pub mod table;
pub mod view;
