#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Padmap: an editor for the fixed-layout binary configuration files of a gamepad remapper.
//!
//! Every physical button owns a 4-byte big-endian bitmask at a fixed offset in the file; each
//! set bit fires one logical action. The crate is organized as:
//! - `profile`: button/action identifiers and the static offset/flag tables per device profile.
//! - `codec`: the pure decoder and encoder plus the shared bit-matching helpers.
//! - `config`: the editable `Configuration`, its JSON edit document, loader and schema helpers.
//! - `session`: load, toggle, export sequencing around a single file held in memory.
//! - `files`: async reading and writing of the binary file.
//! - `utils`: display helpers.
//!
//! Use `padmap::prelude::*` to bring commonly used items into scope quickly.

/// Public module: codec (decoder, encoder, bit helpers, diagnostics).
pub mod codec;
/// Public module: configuration model and JSON edit document.
pub mod config;
/// Public module: error types shared by the codec and the session.
pub mod error;
/// Public module: async file helpers.
pub mod files;
/// Public module: identifiers and device profile tables.
pub mod profile;
/// Public module: editing session.
pub mod session;
/// Public module: formatting helpers.
pub mod utils;

/// Crate-level constants for consumers that want to inspect package metadata at runtime.
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version (e.g., "0.1.0").
#[inline]
pub const fn version() -> &'static str {
    PKG_VERSION
}

/// Parse a level name (trace|debug|info|warn|error), case-insensitively.
pub fn parse_level(s: &str) -> Option<tracing::Level> {
    use tracing::Level;
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize tracing (logging) with a reasonable default.
/// - `level_override` wins when it names a valid level.
/// - Otherwise honors the `RUST_LOG` environment variable if set.
/// - Falls back to `info` level.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init_tracing(level_override: Option<&str>) {
    use tracing_subscriber::fmt;

    let level = level_override
        .and_then(parse_level)
        .or_else(|| std::env::var("RUST_LOG").ok().as_deref().and_then(parse_level))
        .unwrap_or(tracing::Level::INFO);

    // Diagnostics go to stderr so decoded output on stdout stays machine-readable.
    let _ = fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A convenient set of exports for most consumers.
///
/// Bring this into scope with:
/// `use padmap::prelude::*;`
pub mod prelude {
    // Common result/error handling
    pub use anyhow::{Context, Error, Result, anyhow, bail, ensure};

    // Serialization
    pub use serde::{Deserialize, Serialize};

    // Tracing macros
    pub use tracing::{debug, error, info, instrument, trace, warn};

    pub use crate as padmap;

    // Frequently used items
    pub use crate::codec::{Decoded, Diagnostic, decode, encode};
    pub use crate::config::{ConfigDocument, Configuration};
    pub use crate::error::{CodecError, SessionError};
    pub use crate::profile::{ActionId, ButtonId, Profile};
    pub use crate::session::Session;
    pub use crate::{codec, config, files, profile, session, utils};
}
