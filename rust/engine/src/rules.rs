use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::seat::Action as A;

/// An action checked against the acting seat's stack, carrying the exact
/// number of chips it commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    /// Chips this action moves from the stack into the pot.
    pub fn chips(&self) -> u32 {
        match self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n) | ValidatedAction::Raise(n) | ValidatedAction::AllIn(n) => *n,
        }
    }
}

/// Validates an action according to the seat's stack and what it owes.
///
/// # Arguments
///
/// * `stack` - Seat's remaining chip stack
/// * `to_call` - Chips needed to match the table high
/// * `action` - The action the provider returned
///
/// # Errors
///
/// [`GameError::InvalidRaise`] when a raise is zero or larger than the stack.
/// The seat's state is never touched on error.
///
/// # Examples
///
/// ```
/// use holdem_engine::rules::{validate_action, ValidatedAction};
/// use holdem_engine::seat::Action;
///
/// // Short stack turns a call into an all-in for what is left
/// let result = validate_action(80, 100, Action::CheckOrCall);
/// assert_eq!(result, Ok(ValidatedAction::AllIn(80)));
///
/// // Raising the whole stack is an all-in
/// let result = validate_action(300, 0, Action::RaiseBy(300));
/// assert_eq!(result, Ok(ValidatedAction::AllIn(300)));
/// ```
///
/// ```
/// use holdem_engine::errors::GameError;
/// use holdem_engine::rules::validate_action;
/// use holdem_engine::seat::Action;
///
/// let result = validate_action(300, 0, Action::RaiseBy(301));
/// assert!(matches!(result, Err(GameError::InvalidRaise { .. })));
/// ```
pub fn validate_action(stack: u32, to_call: u32, action: A) -> Result<ValidatedAction, GameError> {
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::CheckOrCall => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else if to_call >= stack {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        A::RaiseBy(amount) => {
            if amount == 0 || amount > stack {
                Err(GameError::InvalidRaise { amount, stack })
            } else if amount == stack {
                Ok(ValidatedAction::AllIn(stack))
            } else {
                Ok(ValidatedAction::Raise(amount))
            }
        }
        A::AllIn => Ok(ValidatedAction::AllIn(stack)),
    }
}
