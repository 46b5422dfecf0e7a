use holdem_engine::errors::GameError;
use holdem_engine::seat::Action;
use holdem_engine::view::{ActionContext, ActionProvider};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks among fold, check/call, a raise and all-in with fixed weights.
/// Never folds when checking is free.
#[derive(Debug, Clone)]
pub struct RandomAI {
    rng: StdRng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ActionProvider for RandomAI {
    fn request_action(&mut self, ctx: &ActionContext) -> Result<Action, GameError> {
        let to_call = ctx.to_call();
        let roll: u8 = self.rng.random_range(0..100);
        let action = match roll {
            0..=14 if to_call > 0 => Action::Fold,
            0..=69 => Action::CheckOrCall,
            70..=96 => {
                let step = ctx.big_blind.max(1);
                let extra = step.saturating_mul(self.rng.random_range(1..=4));
                let amount = to_call.saturating_add(extra);
                if amount >= ctx.stack {
                    Action::AllIn
                } else {
                    Action::RaiseBy(amount)
                }
            }
            _ => Action::AllIn,
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::game::Street;
    use holdem_engine::rules::validate_action;
    use holdem_engine::seat::SeatId;

    fn context(to_call: u32, stack: u32) -> ActionContext {
        ActionContext {
            street: Street::Flop,
            board: Vec::new(),
            seat: SeatId(0),
            hole_cards: None,
            stack,
            committed: 0,
            table_high: to_call,
            big_blind: 20,
            seats: Vec::new(),
            attempt: 1,
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let mut a = RandomAI::new(99);
        let mut b = RandomAI::new(99);
        for _ in 0..50 {
            let ctx = context(40, 500);
            assert_eq!(a.request_action(&ctx).unwrap(), b.request_action(&ctx).unwrap());
        }
    }

    #[test]
    fn choices_always_validate() {
        let mut ai = RandomAI::new(5);
        for stack in [1u32, 30, 100, 1000] {
            for to_call in [0u32, 20, 200] {
                let ctx = context(to_call, stack);
                let action = ai.request_action(&ctx).unwrap();
                assert!(validate_action(stack, to_call, action).is_ok(), "{action:?}");
                if to_call == 0 {
                    assert_ne!(action, Action::Fold);
                }
            }
        }
    }

    #[test]
    fn huge_blinds_saturate_to_all_in() {
        let mut ai = RandomAI::new(11);
        let mut ctx = context(0, u32::MAX);
        ctx.big_blind = u32::MAX;
        for _ in 0..50 {
            let action = ai.request_action(&ctx).unwrap();
            assert!(!matches!(action, Action::RaiseBy(_)), "{action:?}");
        }
    }
}
