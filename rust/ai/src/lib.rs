//! # holdem-ai: Bot Seats for the Hold'em Table
//!
//! Bots are plain [`ActionProvider`]s, so a table cannot tell them apart
//! from a human seat.
//!
//! - [`baseline`] - Rule-based bot driven by hand strength and pot odds
//! - [`random`] - Seeded bot that picks legal-looking actions at random
//! - [`create_ai`] - Factory used by the command line
//!
//! ```rust
//! use holdem_ai::create_ai;
//!
//! let bot = create_ai("baseline", 7).unwrap();
//! assert!(create_ai("oracle", 7).is_err());
//! # drop(bot);
//! ```

use holdem_engine::errors::GameError;
use holdem_engine::view::ActionProvider;

pub mod baseline;
pub mod random;

/// Names accepted by [`create_ai`].
pub const AI_KINDS: &[&str] = &["baseline", "random"];

/// Builds a bot by name. `seed` only matters for bots that draw random numbers.
pub fn create_ai(kind: &str, seed: u64) -> Result<Box<dyn ActionProvider>, GameError> {
    match kind {
        "baseline" => Ok(Box::new(baseline::BaselineAI::new())),
        "random" => Ok(Box::new(random::RandomAI::new(seed))),
        other => Err(GameError::InvalidConfig(format!(
            "unknown AI type: {} (expected one of: {})",
            other,
            AI_KINDS.join(", ")
        ))),
    }
}
