/*!
Binary codec for the button configuration file.

- `bits`: field access and flag matching on `u32` values.
- `decode`: buffer -> [`Configuration`] plus non-fatal [`Diagnostic`]s.
- `encode`: [`Configuration`] merged onto a copy of the original buffer.

The codec performs no I/O and holds no state; profiles are `'static` tables, so both
directions are safe to call from anywhere.

Example:
```no_run
use padmap::codec::{decode, encode};
use padmap::profile::{ActionId, ButtonId, STANDARD};

let original = std::fs::read("gamepad_config.bin").unwrap();
let mut decoded = decode(&original, &STANDARD);
decoded.configuration.set_action(ButtonId::A, ActionId::B, true);
let edited = encode(&decoded.configuration, &original, &STANDARD).unwrap();
assert_eq!(edited.len(), original.len());
```
*/

use std::fmt;

use crate::profile::ButtonId;

pub mod bits;
pub mod decode;
pub mod encode;

pub use crate::config::Configuration;
pub use decode::decode;
pub use encode::encode;

/// Result of decoding: the (possibly partial) configuration and what was noticed on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    pub configuration: Configuration,
    pub diagnostics: Vec<Diagnostic>,
}

impl Decoded {
    /// True when at least one field could not be read.
    pub fn is_truncated(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::TruncatedField { .. }))
    }
}

/// Non-fatal findings. None of these stop a decode or an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Buffer ends before the button's field; the button decodes to no actions.
    TruncatedField {
        button: ButtonId,
        offset: usize,
        len: usize,
    },
    /// Field bits not covered by any matched action; they are dropped on re-encode.
    UnmappedBits {
        button: ButtonId,
        value: u32,
        bits: u32,
    },
    /// Edit document names a button the profile does not map.
    UnknownButton { label: String },
    /// Edit document names an action the profile does not define.
    UnknownAction { button: ButtonId, label: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TruncatedField {
                button,
                offset,
                len,
            } => write!(
                f,
                "buffer too short for button {button} at offset 0x{offset:02X} ({len} bytes); skipped"
            ),
            Diagnostic::UnmappedBits {
                button,
                value,
                bits,
            } => write!(
                f,
                "button {button} field 0x{value:08X} has unmapped bits 0x{bits:08X}; they are cleared on save"
            ),
            Diagnostic::UnknownButton { label } => {
                write!(f, "unknown button \"{label}\" ignored")
            }
            Diagnostic::UnknownAction { button, label } => {
                write!(f, "unknown action \"{label}\" on button {button} ignored")
            }
        }
    }
}
