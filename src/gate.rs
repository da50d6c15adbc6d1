//! Size gate: picks the classification strategy from the scored entry count.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_ENTRIES: usize = 5;

/// Batches with fewer than `min_entries` scored entries are "small" and go
/// to the rule engine; everything else is clustered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeGate {
    pub min_entries: usize,
}

impl Default for SizeGate {
    fn default() -> Self {
        Self {
            min_entries: DEFAULT_MIN_ENTRIES,
        }
    }
}

impl SizeGate {
    pub fn new(min_entries: usize) -> Self {
        Self { min_entries }
    }

    #[inline]
    pub fn is_small(&self, entry_count: usize) -> bool {
        entry_count < self.min_entries
    }
}
