//! Utilities module for Padmap.
//! - `format`: label and hex rendering shared by logging and the CLI.

pub mod format;

pub use format::{display_label, format_field, hex_bytes};
