//! Baseline bot.
//!
//! Rule-based and deterministic: the same situation always yields the same
//! action, which keeps seeded simulations reproducible.

use holdem_engine::cards::{Card, Rank};
use holdem_engine::errors::GameError;
use holdem_engine::game::Street;
use holdem_engine::hand::{evaluate, Category};
use holdem_engine::seat::Action;
use holdem_engine::view::{ActionContext, ActionProvider};
use tracing::trace;

/// Rule-based bot.
///
/// **Preflop:** premium pairs and big aces raise, medium holdings call when
/// cheap, weak hands fold to a bet and check when free.
///
/// **Postflop:** two pair or better bets and raises, one pair calls small
/// bets, anything weaker leans on pot odds.
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    /// Preflop hand strength on a 0-10 scale.
    ///
    /// - 9-10: Premium hands (AA, KK, QQ, JJ, AKs)
    /// - 7-8: Strong hands (TT-99, AK, AQ, KQs)
    /// - 5-6: Medium hands (88-77, AJ, suited connectors)
    /// - 3-4: Marginal hands (66-22, Ax, broadway)
    /// - 0-2: Weak offsuit cards
    pub(crate) fn evaluate_preflop_strength(hole_cards: [Card; 2]) -> u8 {
        let [c1, c2] = hole_cards;
        let (r1, r2) = (c1.rank.value(), c2.rank.value());
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = c1.suit == c2.suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ => {
                if suited && high - low <= 2 {
                    if high >= 9 {
                        5
                    } else {
                        4
                    }
                } else if high >= 11 && low >= 9 {
                    4
                } else {
                    2
                }
            }
        }
    }

    /// Postflop strength from the hole cards and the board so far, or
    /// `None` before the flop.
    pub(crate) fn evaluate_postflop_strength(hole_cards: [Card; 2], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let mut cards = hole_cards.to_vec();
        cards.extend_from_slice(board);
        let best = evaluate(&cards).ok()?;

        let base: u8 = match best.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        let high_primary = best.primary.first().is_some_and(|r| *r >= Rank::Queen);
        Some((base + u8::from(high_primary)).min(10))
    }

    /// pot / (pot + call); 1.0 when there is nothing to call.
    pub(crate) fn calculate_pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (u64::from(pot) + u64::from(to_call)) as f32
    }

    /// `min_raise` is the raise size on top of a call; bets and raises are
    /// expressed as the chips committed by this action.
    pub(crate) fn decide_action(strength: u8, to_call: u32, min_raise: u32, stack: u32, pot: u32) -> Action {
        if to_call == 0 {
            return Self::decide_no_bet_action(strength, min_raise, stack, pot);
        }

        let pot_odds = Self::calculate_pot_odds(pot, to_call);
        if to_call >= stack {
            return if strength >= 7 { Action::AllIn } else { Action::Fold };
        }

        match strength {
            9..=10 => {
                let raise = (pot / 2).max(min_raise);
                let total = to_call.saturating_add(raise);
                if total >= stack {
                    Action::AllIn
                } else {
                    Action::RaiseBy(total)
                }
            }
            7..=8 => Action::CheckOrCall,
            5..=6 if pot_odds >= 0.3 || to_call <= pot / 4 => Action::CheckOrCall,
            3..=4 if pot_odds >= 0.4 || to_call <= pot / 6 => Action::CheckOrCall,
            _ => Action::Fold,
        }
    }

    fn decide_no_bet_action(strength: u8, min_raise: u32, stack: u32, pot: u32) -> Action {
        let bet = match strength {
            9..=10 => ((u64::from(pot) * 2 / 3) as u32).max(min_raise),
            7..=8 => (pot / 2).max(min_raise),
            _ => return Action::CheckOrCall,
        };
        if bet >= stack {
            Action::AllIn
        } else {
            Action::RaiseBy(bet)
        }
    }
}

impl ActionProvider for BaselineAI {
    fn request_action(&mut self, ctx: &ActionContext) -> Result<Action, GameError> {
        let Some(hole_cards) = ctx.hole_cards else {
            return Ok(if ctx.to_call() == 0 {
                Action::CheckOrCall
            } else {
                Action::Fold
            });
        };

        let strength = match ctx.street {
            Street::Preflop => Self::evaluate_preflop_strength(hole_cards),
            _ => Self::evaluate_postflop_strength(hole_cards, &ctx.board)
                .unwrap_or_else(|| Self::evaluate_preflop_strength(hole_cards)),
        };
        let min_raise = ctx.big_blind.max(1);
        let action = Self::decide_action(strength, ctx.to_call(), min_raise, ctx.stack, ctx.pot());
        trace!(seat = %ctx.seat, strength, ?action, "baseline decision");
        Ok(action)
    }
}
