//! Error types.
//!
//! Only structural failures live here. Per-field problems found while decoding or importing
//! are reported as [`crate::codec::Diagnostic`] values and never abort an operation.

use thiserror::Error;

use crate::profile::ButtonId;

/// Errors that abort an encode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error(
        "button {button} field at offset 0x{offset:02X} does not fit in a {len}-byte file; \
         the file does not match the expected format"
    )]
    OffsetOutOfRange {
        button: ButtonId,
        offset: usize,
        len: usize,
    },
}

/// Errors raised by an editing [`crate::session::Session`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("nothing to export: load a file and edit its mapping first")]
    NothingToExport,

    #[error("button {0} is not mapped by profile \"{1}\"")]
    UnmappedButton(ButtonId, &'static str),

    #[error("action {0} is not defined by profile \"{1}\"")]
    UnmappedAction(crate::profile::ActionId, &'static str),

    #[error("edit document targets profile \"{document}\" but the session uses \"{session}\"")]
    ProfileMismatch {
        document: String,
        session: &'static str,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),
}
