//! # Ports Layer
//!
//! - **Inbound (Driving)**: registry API
//! - **Outbound (Driven)**: durable entry storage

pub mod inbound;
pub mod outbound;
