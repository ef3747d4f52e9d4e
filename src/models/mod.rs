//! Configuration data structures.
//!
//! These are plain serde structs deserialized from apexbuild.yaml; all
//! validation happens explicitly in [`crate::services::validation`] rather
//! than during deserialization, so a missing field never panics and every
//! violation gets a field-named error.

mod config;

pub use config::{DocsConfig, ImportConfig, OutputFormat};
