//! Shared building blocks for the attendance-session generator: configuration,
//! the core error type, and the calendar and slug utilities the rule matcher
//! depends on.

pub mod config;
pub mod constants;
pub mod error;
pub mod util;
