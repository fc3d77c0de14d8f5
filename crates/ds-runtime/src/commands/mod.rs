//! # Commands
//!
//! Each command returns a [`CommandOutput`]: a JSON body for stdout and
//! whether the request succeeded. Refusals (tampered document, unknown id,
//! invalid certificate) are outputs, not errors; `Err` is reserved for
//! operational failures such as unreadable key files.

pub mod authority;
pub mod documents;
pub mod keys;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub body: Value,
    pub success: bool,
}

impl CommandOutput {
    pub fn ok(body: Value) -> Self {
        Self {
            body,
            success: true,
        }
    }

    pub fn refused(body: Value) -> Self {
        Self {
            body,
            success: false,
        }
    }
}
