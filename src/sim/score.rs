//! Session score

use serde::{Deserialize, Serialize};

/// Score counter owned by a session. It only ever goes up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    value: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn add(&mut self, points: u64) {
        self.value = self.value.saturating_add(points);
    }
}
