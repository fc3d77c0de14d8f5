//! Serial number allocation: `<prefix>-<year>-<seq>`, e.g. `DS-2026-0001`.

use std::sync::atomic::{AtomicU32, Ordering};

/// Hands out monotonically increasing serial numbers for one authority.
#[derive(Debug)]
pub struct SerialNumberAllocator {
    prefix: String,
    next: AtomicU32,
}

impl SerialNumberAllocator {
    /// Allocator whose first serial uses sequence number `first`.
    pub fn new(prefix: impl Into<String>, first: u32) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU32::new(first),
        }
    }

    /// Next serial number for a certificate issued in `year`.
    pub fn allocate(&self, year: i32) -> String {
        let seq = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}-{:04}", self.prefix, year, seq)
    }
}

impl Default for SerialNumberAllocator {
    fn default() -> Self {
        Self::new("DS", 1)
    }
}
