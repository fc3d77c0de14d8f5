//! # Adapters

pub mod certificate_file;
