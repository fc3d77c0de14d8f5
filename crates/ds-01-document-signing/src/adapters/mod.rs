//! # Adapters
//!
//! Concrete implementations of outbound ports.

pub mod clock;
