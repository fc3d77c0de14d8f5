//! # Outbound Ports (Driven Ports / SPI)
//!
//! Traits that define dependencies this subsystem needs.

use chrono::{DateTime, FixedOffset};

/// Source of signing timestamps.
///
/// The offset of the returned instant is written into the record, so it
/// must be the one the deployment wants shown to verifiers.
pub trait Clock: Send + Sync {
    /// Current instant with its display offset.
    fn now(&self) -> DateTime<FixedOffset>;
}
