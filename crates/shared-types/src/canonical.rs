//! # Canonical Encoding (format version 1)
//!
//! Byte form of a record that is signed or verified:
//!
//! ```text
//! {"document_hash": "...", "signer": "...", "timestamp": "..."}
//! ```
//!
//! - Keys in ascending byte order, whatever order they were inserted in
//! - `", "` between members, `": "` between key and value
//! - Values are strings or nested objects
//! - `"` and `\` escaped with a backslash; `\n \r \t \b \f` use short escapes
//! - Any other character outside printable ASCII (0x20..=0x7E) is written as
//!   `\uXXXX` in lowercase hex, using UTF-16 surrogate pairs above U+FFFF
//!
//! The rules are spelled out here instead of delegated to a JSON serializer
//! because serializers disagree on spacing and escaping.

use crate::errors::CanonicalError;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Version of the byte form produced by [`CanonicalObject::to_bytes`].
pub const CANONICAL_FORMAT_VERSION: u32 = 1;

/// A value inside a canonical record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalValue {
    /// A string value.
    Str(String),
    /// A nested object.
    Object(CanonicalObject),
}

impl From<&str> for CanonicalValue {
    fn from(value: &str) -> Self {
        CanonicalValue::Str(value.to_string())
    }
}

impl From<String> for CanonicalValue {
    fn from(value: String) -> Self {
        CanonicalValue::Str(value)
    }
}

impl From<CanonicalObject> for CanonicalValue {
    fn from(value: CanonicalObject) -> Self {
        CanonicalValue::Object(value)
    }
}

/// An unordered set of named fields with a single canonical byte form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalObject {
    fields: BTreeMap<String, CanonicalValue>,
}

impl CanonicalObject {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an object from `(key, value)` pairs, rejecting duplicate keys.
    pub fn from_fields<K, V, I>(fields: I) -> Result<Self, CanonicalError>
    where
        K: Into<String>,
        V: Into<CanonicalValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut object = Self::new();
        for (key, value) in fields {
            object.insert(key, value)?;
        }
        Ok(object)
    }

    /// Insert a field. Inserting an existing key is an error.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Result<(), CanonicalError>
    where
        K: Into<String>,
        V: Into<CanonicalValue>,
    {
        let key = key.into();
        if self.fields.contains_key(&key) {
            return Err(CanonicalError::DuplicateKey(key));
        }
        self.fields.insert(key, value.into());
        Ok(())
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<CanonicalValue> {
        self.fields.remove(key)
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&CanonicalValue> {
        self.fields.get(key)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Canonical text form.
    pub fn to_canonical_string(&self) -> String {
        let mut out = String::new();
        write_object(&mut out, self);
        out
    }

    /// Canonical bytes: the exact input to signing and verification.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_canonical_string().into_bytes()
    }
}

/// A record type with a fixed canonical form.
pub trait Canonical {
    /// Build the canonical object for this record.
    fn to_canonical(&self) -> Result<CanonicalObject, CanonicalError>;

    /// Canonical bytes for this record.
    fn canonical_bytes(&self) -> Result<Vec<u8>, CanonicalError> {
        Ok(self.to_canonical()?.to_bytes())
    }
}

fn write_object(out: &mut String, object: &CanonicalObject) {
    out.push('{');
    for (i, (key, value)) in object.fields.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_string(out, key);
        out.push_str(": ");
        match value {
            CanonicalValue::Str(s) => write_string(out, s),
            CanonicalValue::Object(nested) => write_object(out, nested),
        }
    }
    out.push('}');
}

fn write_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    // Writing to a String cannot fail.
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('"');
}
