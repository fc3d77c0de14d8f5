//! # Adapters
//!
//! - `memory` - `InMemoryRegistryStore` for tests
//! - `file` - `JsonFileRegistryStore` for production
//! - `lock` - inter-process lock guarding the registry file

pub mod file;
pub mod lock;
pub mod memory;
