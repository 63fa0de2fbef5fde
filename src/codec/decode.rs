use tracing::{debug, trace, warn};

use super::bits::{combine_flags, contains_flag, read_field};
use super::{Decoded, Diagnostic};
use crate::config::Configuration;
use crate::profile::Profile;
use crate::utils::format_field;

/// Decode every button field of `profile` from `buffer`.
///
/// Buttons are visited in offset-table order. A field that does not fit in the buffer yields
/// an empty action list and a [`Diagnostic::TruncatedField`]; the remaining buttons are still
/// decoded. Actions are matched in action-table order with a full-mask test, so the result is
/// deterministic. Never fails and never touches `buffer`.
pub fn decode(buffer: &[u8], profile: &Profile) -> Decoded {
    let mut configuration = Configuration::new();
    let mut diagnostics = Vec::new();

    for slot in profile.buttons {
        let Some(value) = read_field(buffer, slot.offset) else {
            warn!(
                target: "padmap::codec",
                button = %slot.button, offset = slot.offset, len = buffer.len(),
                "Buffer too short for button field; skipping"
            );
            diagnostics.push(Diagnostic::TruncatedField {
                button: slot.button,
                offset: slot.offset,
                len: buffer.len(),
            });
            configuration.insert(slot.button, Vec::new());
            continue;
        };

        let matched: Vec<_> = profile
            .actions
            .iter()
            .filter(|a| contains_flag(value, a.flag))
            .collect();

        let unmapped = value & !combine_flags(matched.iter().map(|a| a.flag));
        if unmapped != 0 {
            debug!(
                target: "padmap::codec",
                button = %slot.button, value = %format_field(value), bits = %format_field(unmapped),
                "Field carries bits outside the action table"
            );
            diagnostics.push(Diagnostic::UnmappedBits {
                button: slot.button,
                value,
                bits: unmapped,
            });
        }

        trace!(
            target: "padmap::codec",
            button = %slot.button, offset = slot.offset, actions = matched.len(),
            "Decoded field"
        );
        configuration.insert(slot.button, matched.iter().map(|a| a.action).collect());
    }

    Decoded {
        configuration,
        diagnostics,
    }
}
