use std::collections::HashMap;

/// Reference counts of inserted style ids.
///
/// Entries are created on first insertion and never removed; disposing more
/// often than inserting drives a count below zero. Only point lookups are
/// exposed.
#[derive(Debug, Default)]
pub struct InsertedRegistry {
    counts: HashMap<String, i64>,
}

impl InsertedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for `id`, `0` if it was never inserted.
    pub fn count(&self, id: &str) -> i64 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub(crate) fn is_live(&self, id: &str) -> bool {
        self.count(id) > 0
    }

    pub(crate) fn retain(&mut self, id: &str) {
        *self.counts.entry(id.to_string()).or_insert(0) += 1;
    }

    pub(crate) fn reset(&mut self, id: &str) {
        self.counts.insert(id.to_string(), 1);
    }

    /// Decrements `id` and returns the new count.
    pub(crate) fn release(&mut self, id: &str) -> i64 {
        let count = self.counts.entry(id.to_string()).or_insert(0);
        *count -= 1;
        *count
    }
}
