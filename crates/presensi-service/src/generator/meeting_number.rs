//! Per-assignment meeting counters that continue across generation runs.

use std::collections::HashMap;

use uuid::Uuid;

/// Hands out the next meeting number for each teaching assignment of a run.
///
/// Counters start at the highest number already persisted for the assignment.
#[derive(Debug, Default)]
pub struct MeetingNumberAllocator {
    counters: HashMap<Uuid, i32>,
}

impl MeetingNumberAllocator {
    #[must_use]
    pub fn new(persisted_max: HashMap<Uuid, i32>) -> Self {
        Self {
            counters: persisted_max,
        }
    }

    /// Returns the next meeting number for `csst_id`, starting at 1.
    pub fn next(&mut self, csst_id: Uuid) -> i32 {
        let counter = self.counters.entry(csst_id).or_insert(0);
        *counter = counter.saturating_add(1);
        *counter
    }
}
