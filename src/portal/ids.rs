use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Generates record ids: prefix, epoch milliseconds, then a process-wide
/// sequence so rapid submissions within the same millisecond stay unique.
/// Nothing depends on id ordering beyond display.
pub struct IdGenerator {
    prefix: &'static str,
    sequence: AtomicU64,
}

impl IdGenerator {
    pub const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn next(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}{}-{:04}",
            self.prefix,
            Utc::now().timestamp_millis(),
            seq
        )
    }
}
