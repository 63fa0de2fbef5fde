//! Configuration module for Padmap.
//!
//! Holds the editable [`Configuration`] produced by the decoder and its JSON edit document,
//! together with loading/validation and schema helpers.
//!
//! Example:
//! use padmap::config::{Configuration, load_from_path, document_profile};
//!
//! let doc = load_from_path("mapping.json")?;
//! let (cfg, diagnostics) = Configuration::from_document(&doc, document_profile(&doc)?);

pub mod loader;
pub mod models;

// Re-export core data models
pub use models::{ButtonEntry, ConfigDocument, Configuration};

// Re-export loader utilities
pub use loader::{
    document_profile, generate_schema, load_from_path, load_from_path_async, load_from_reader,
    load_from_str, profile_by_name, validate_document, write_schema_to_writer, write_to_writer,
};
