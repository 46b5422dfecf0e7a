//! Showdown settlement with side pots.
//!
//! Winners are taken tier by tier. Within a tier, each winner caps a pot at
//! its own remaining commitment, smallest first; every seat pays into that
//! pot up to the cap and the tier shares it. Chips above every winner's
//! reach go back to the next tier, and anything left once nobody can claim
//! it is refunded to whoever committed it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::GameError;
use crate::hand::{find_best_among, Combination};
use crate::seat::{Seat, SeatId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    /// Winner whose commitment capped this pot
    pub seat: SeatId,
    pub amount: u32,
    /// Chips each winner received before odd chips
    pub share: u32,
    pub winners: Vec<SeatId>,
    /// Seats that received one extra chip from an uneven split
    pub odd_chips: Vec<SeatId>,
    pub combination: Combination,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settlement {
    pub awards: Vec<PotAward>,
    pub refunds: Vec<(SeatId, u32)>,
    /// Total chips credited per seat, refunds included
    pub payouts: BTreeMap<SeatId, u32>,
}

impl Settlement {
    pub fn total_paid(&self) -> u32 {
        self.payouts.values().sum()
    }

    pub fn paid_to(&self, id: SeatId) -> u32 {
        self.payouts.get(&id).copied().unwrap_or(0)
    }
}

fn committed_of(seats: &[Seat], id: SeatId) -> u32 {
    seats
        .iter()
        .find(|s| s.id() == id)
        .map(Seat::committed)
        .unwrap_or(0)
}

fn credit(seats: &mut [Seat], payouts: &mut BTreeMap<SeatId, u32>, id: SeatId, amount: u32) {
    if amount == 0 {
        return;
    }
    if let Some(seat) = seats.iter_mut().find(|s| s.id() == id) {
        seat.add_chips(amount);
        *payouts.entry(id).or_insert(0) += amount;
    }
}

/// Moves every committed chip back into stacks.
///
/// `odd_chip_start` is the seat index that receives the first leftover chip
/// of an uneven split; the rest follow in seat order. Every unfolded seat
/// must carry a combination.
pub fn settle(seats: &mut [Seat], odd_chip_start: usize) -> Result<Settlement, GameError> {
    let mut contenders: Vec<SeatId> = seats
        .iter()
        .filter(|s| !s.is_folded())
        .map(Seat::id)
        .collect();
    if contenders.is_empty() {
        return Err(GameError::NoContenders);
    }
    if let Some(seat) = seats
        .iter()
        .find(|s| !s.is_folded() && s.combination().is_none())
    {
        return Err(GameError::MissingCombination(seat.id()));
    }

    let len = seats.len();
    let start = odd_chip_start % len;
    let position: BTreeMap<SeatId, usize> = seats
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id(), i))
        .collect();
    let mut settlement = Settlement::default();

    while seats.iter().any(|s| s.committed() > 0) {
        contenders.retain(|id| committed_of(seats, *id) > 0);
        if contenders.is_empty() {
            for seat in seats.iter_mut() {
                let back = seat.take_committed(u32::MAX);
                if back > 0 {
                    seat.add_chips(back);
                    *settlement.payouts.entry(seat.id()).or_insert(0) += back;
                    settlement.refunds.push((seat.id(), back));
                    info!(seat = %seat.id(), amount = back, "uncalled chips refunded");
                }
            }
            break;
        }

        let mut tier = find_best_among(contenders.iter().filter_map(|id| {
            seats
                .iter()
                .find(|s| s.id() == *id)
                .and_then(Seat::combination)
                .map(|c| (*id, c))
        }));
        tier.sort_by_key(|id| (committed_of(seats, *id), position[id]));

        while let Some(&capper) = tier.first() {
            let cap = committed_of(seats, capper);
            if cap > 0 {
                let amount: u32 = seats.iter_mut().map(|s| s.take_committed(cap)).sum();
                let count = tier.len() as u32;
                let share = amount / count;
                let odd = (amount % count) as usize;
                for id in &tier {
                    credit(seats, &mut settlement.payouts, *id, share);
                }
                let mut clockwise = tier.clone();
                clockwise.sort_by_key(|id| (position[id] + len - start) % len);
                let odd_chips: Vec<SeatId> = clockwise.into_iter().take(odd).collect();
                for id in &odd_chips {
                    credit(seats, &mut settlement.payouts, *id, 1);
                }
                let combination = seats
                    .iter()
                    .find(|s| s.id() == capper)
                    .and_then(Seat::combination)
                    .cloned()
                    .ok_or(GameError::MissingCombination(capper))?;
                info!(
                    seat = %capper,
                    amount,
                    share,
                    winners = tier.len(),
                    combination = %combination,
                    "pot awarded"
                );
                settlement.awards.push(PotAward {
                    seat: capper,
                    amount,
                    share,
                    winners: tier.clone(),
                    odd_chips,
                    combination,
                });
            }
            tier.remove(0);
            contenders.retain(|id| *id != capper);
        }
    }
    Ok(settlement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::hand::evaluate;

    fn seat(id: u32, committed: u32, hand: Option<&str>) -> Seat {
        let mut seat = Seat::new(SeatId(id), format!("p{id}"), committed + 1000);
        seat.commit(committed);
        match hand {
            Some(text) => {
                let cards = parse_cards(text).unwrap();
                seat.set_combination(evaluate(&cards).unwrap());
            }
            None => seat.fold(),
        }
        seat
    }

    const ROYAL: &str = "Ah Kh Qh Jh Th 2c 3d";
    const TRIPS: &str = "9s 9c 9d 2h 5c 7d Kc";
    const PAIR: &str = "4s 4c 8d 2h 5c Td Kc";

    #[test]
    fn equal_winners_split_capped_pot_and_rest_goes_to_next_tier() {
        let mut seats = vec![
            seat(0, 100, Some(ROYAL)),
            seat(1, 100, Some(ROYAL)),
            seat(2, 300, Some(TRIPS)),
        ];
        let settlement = settle(&mut seats, 0).unwrap();
        assert_eq!(settlement.awards.len(), 2);
        assert_eq!(settlement.paid_to(SeatId(0)), 150);
        assert_eq!(settlement.paid_to(SeatId(1)), 150);
        assert_eq!(settlement.paid_to(SeatId(2)), 200);
        assert!(seats.iter().all(|s| s.committed() == 0));
    }

    #[test]
    fn folded_chips_go_to_winner() {
        let mut seats = vec![seat(0, 200, None), seat(1, 200, Some(PAIR)), seat(2, 200, Some(TRIPS))];
        let settlement = settle(&mut seats, 0).unwrap();
        assert_eq!(settlement.paid_to(SeatId(2)), 600);
        assert_eq!(settlement.total_paid(), 600);
    }

    #[test]
    fn odd_chip_goes_to_first_winner_from_start_seat() {
        let mut seats = vec![seat(0, 1, None), seat(1, 50, Some(ROYAL)), seat(2, 50, Some(ROYAL))];
        let settlement = settle(&mut seats, 2).unwrap();
        assert_eq!(settlement.paid_to(SeatId(2)), 51);
        assert_eq!(settlement.paid_to(SeatId(1)), 50);
        assert_eq!(settlement.awards[0].odd_chips, vec![SeatId(2)]);
    }

    #[test]
    fn chips_beyond_every_contender_are_refunded() {
        let mut seats = vec![seat(0, 100, Some(ROYAL)), seat(1, 400, None)];
        let settlement = settle(&mut seats, 0).unwrap();
        assert_eq!(settlement.paid_to(SeatId(0)), 200);
        assert_eq!(settlement.refunds, vec![(SeatId(1), 300)]);
    }

    #[test]
    fn everyone_folded_is_an_error() {
        let mut seats = vec![seat(0, 10, None), seat(1, 10, None)];
        assert_eq!(settle(&mut seats, 0).unwrap_err(), GameError::NoContenders);
    }
}
