//! Display helpers for the CLI and log fields.

/// Action label as shown next to a checkbox: underscores become spaces.
pub fn display_label(label: &str) -> String {
    label.replace('_', " ")
}

/// Field value in fixed-width hex, e.g. `0x00200000`.
pub fn format_field(value: u32) -> String {
    format!("0x{value:08X}")
}

/// Space-separated hex bytes, e.g. `00 20 00 00`.
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
