//! # Document Store Adapters
//!
//! - `filesystem` - one directory per signed document (production)
//! - `memory` - in-process map (tests)

pub mod filesystem;
pub mod memory;
