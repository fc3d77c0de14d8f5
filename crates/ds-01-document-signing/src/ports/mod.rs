//! # Ports Layer
//!
//! - **Inbound (Driving)**: API that callers use
//! - **Outbound (Driven)**: Dependencies this subsystem needs

pub mod inbound;
pub mod outbound;
