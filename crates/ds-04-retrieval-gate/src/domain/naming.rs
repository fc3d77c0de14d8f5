//! Storage naming rules.

use chrono::{DateTime, TimeZone};
use uuid::Uuid;

use super::errors::StoreError;

/// Reject anything that is not a single plain path component.
///
/// Locations come back out of the registry file, so they are checked on every
/// load as well as on store.
pub fn validate_path_component(name: &str) -> Result<(), StoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
        || name.trim() != name;
    if invalid {
        return Err(StoreError::InvalidName(name.chars().take(128).collect()));
    }
    Ok(())
}

/// Folder for one signed document: `<YYYYmmdd_HHMMSS>_<6 hex>`.
pub fn storage_folder_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", now.format("%Y%m%d_%H%M%S"), &suffix[..6])
}
