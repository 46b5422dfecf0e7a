//! Exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Usage, configuration, input and engine errors.
pub const ERROR: i32 = 2;
