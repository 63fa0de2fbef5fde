use tracing::trace;

use super::bits::{combine_flags, write_field};
use crate::config::Configuration;
use crate::error::CodecError;
use crate::profile::Profile;
use crate::utils::format_field;

/// Merge `configuration` onto a copy of `original`.
///
/// Only the fields of buttons present in both the configuration and the profile's offset table
/// are rewritten; every other byte is copied through. Each rewritten field is the OR of the
/// flags of its listed actions, so bits outside the action table are cleared. Buttons or
/// actions the profile does not know are skipped.
///
/// Fails with [`CodecError::OffsetOutOfRange`] when a field lies past the end of `original`.
pub fn encode(
    configuration: &Configuration,
    original: &[u8],
    profile: &Profile,
) -> Result<Vec<u8>, CodecError> {
    let mut out = original.to_vec();

    for (button, actions) in configuration.iter() {
        let Some(offset) = profile.offset(button) else {
            trace!(target: "padmap::codec", %button, profile = profile.name, "Button not in offset table; skipping");
            continue;
        };

        let value = combine_flags(actions.iter().filter_map(|action| {
            let flag = profile.flag(*action);
            if flag.is_none() {
                trace!(target: "padmap::codec", %button, %action, "Action not in action table; skipping");
            }
            flag
        }));

        if !write_field(&mut out, offset, value) {
            return Err(CodecError::OffsetOutOfRange {
                button,
                offset,
                len: out.len(),
            });
        }
        trace!(target: "padmap::codec", %button, offset, value = %format_field(value), "Encoded field");
    }

    Ok(out)
}
