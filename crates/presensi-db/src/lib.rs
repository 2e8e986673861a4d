//! Postgres persistence for schedules, teaching assignments, rooms, session
//! types and generated attendance sessions.

pub mod db;
pub mod error;
pub mod model;
