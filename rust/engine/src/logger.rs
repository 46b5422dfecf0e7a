use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::pot::PotAward;
use crate::rules::ValidatedAction;
use crate::seat::SeatId;

/// Records a single applied action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat that acted
    pub seat: SeatId,
    /// The betting street when this action occurred
    pub street: Street,
    /// The action as applied, with the chips it moved
    pub action: ValidatedAction,
    /// True when the engine folded the seat after repeated invalid input
    #[serde(default)]
    pub forced: bool,
}

/// A forced blind commitment. `amount` is what was actually posted, which
/// is less than the blind when the stack was short.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlindPost {
    pub seat: SeatId,
    pub amount: u32,
}

/// History of one hand, kept in memory and handed back by the table once
/// the hand is reset.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// When the hole cards were dealt
    pub started_at: DateTime<Utc>,
    pub small_blind: Option<BlindPost>,
    pub big_blind: Option<BlindPost>,
    /// Chronological list of all applied actions
    pub actions: Vec<ActionRecord>,
    /// Community cards (5 once the hand reached showdown)
    pub board: Vec<Card>,
    /// Pots in payout order, smallest-stake winner first
    pub awards: Vec<PotAward>,
    /// Seats that left the table with an empty stack
    pub eliminated: Vec<SeatId>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

impl HandRecord {
    pub fn new(seq: u32) -> Self {
        let started_at = Utc::now();
        Self {
            hand_id: format_hand_id(&started_at.format("%Y%m%d").to_string(), seq),
            started_at,
            small_blind: None,
            big_blind: None,
            actions: Vec::new(),
            board: Vec::new(),
            awards: Vec::new(),
            eliminated: Vec::new(),
        }
    }

    /// Every seat that won chips at showdown, in payout order, without repeats.
    pub fn winners(&self) -> Vec<SeatId> {
        let mut out = Vec::new();
        for award in &self.awards {
            for id in &award.winners {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
        }
        out
    }

    pub fn actions_on(&self, street: Street) -> impl Iterator<Item = &ActionRecord> {
        self.actions.iter().filter(move |a| a.street == street)
    }
}
