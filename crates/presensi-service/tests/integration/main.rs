//! Generation runs against the in-memory store.

mod helpers;
mod resolution;
