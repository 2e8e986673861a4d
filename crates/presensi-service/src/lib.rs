//! Recurring-schedule occurrence generation.
//!
//! Expands the weekly rules of a schedule into concrete attendance sessions,
//! resolves teacher, room and session type for each of them, numbers the
//! meetings of every teaching assignment, and persists the result so that
//! repeated runs never duplicate a session.

pub mod error;
pub mod generator;
pub mod store;
