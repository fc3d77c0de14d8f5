//! Clock adapters.

use crate::ports::outbound::Clock;
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Wall clock rendered in a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Clock reporting UTC (`+00:00`).
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Clock reporting the given offset in minutes east of UTC.
    ///
    /// Returns `None` outside ±24h.
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self { offset })
    }

    /// The configured offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Clock frozen at one instant, for tests and reproducible signing.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
