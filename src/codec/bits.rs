//! Bit-matching and field access shared by the decoder and the encoder.
//!
//! Everything stays in `u32`; bit 31 (`LEFT_DPAD`) must never be sign-extended.

/// Width of one button field in bytes.
pub const FIELD_WIDTH: usize = 4;

/// True when every bit of `flag` is set in `value`.
///
/// A plain non-zero AND is not enough: flags may share bit positions.
#[inline]
pub const fn contains_flag(value: u32, flag: u32) -> bool {
    value & flag == flag
}

/// OR together a set of flags.
pub fn combine_flags<I>(flags: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    flags.into_iter().fold(0, |acc, f| acc | f)
}

/// Read the big-endian field at `offset`, or `None` if it does not fit in `buf`.
pub fn read_field(buf: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(FIELD_WIDTH)?;
    let bytes: [u8; FIELD_WIDTH] = buf.get(offset..end)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

/// Write `value` big-endian at `offset`. Returns false (and leaves `buf` alone)
/// if the field does not fit.
pub fn write_field(buf: &mut [u8], offset: usize, value: u32) -> bool {
    match offset
        .checked_add(FIELD_WIDTH)
        .and_then(|end| buf.get_mut(offset..end))
    {
        Some(slot) => {
            slot.copy_from_slice(&value.to_be_bytes());
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_flag_requires_all_bits() {
        assert!(contains_flag(0x0030_0000, 0x0020_0000));
        assert!(contains_flag(0x8000_0000, 0x8000_0000));
        // Overlapping but incomplete
        assert!(!contains_flag(0x0010_0000, 0x0030_0000));
        assert!(!contains_flag(0, 0x0000_0200));
    }

    #[test]
    fn test_combine_flags() {
        assert_eq!(combine_flags(Vec::<u32>::new()), 0);
        assert_eq!(
            combine_flags([0x8000_0000, 0x4000_0000, 0x0000_0200]),
            0xC000_0200
        );
        assert_eq!(combine_flags([0x0020_0000, 0x0020_0000]), 0x0020_0000);
    }

    #[test]
    fn test_read_field_big_endian() {
        let buf = [0xAA, 0x80, 0x00, 0x02, 0x00, 0xBB];
        assert_eq!(read_field(&buf, 1), Some(0x8000_0200));
        assert_eq!(read_field(&buf, 2), Some(0x0002_00BB));
        assert_eq!(read_field(&buf, 3), None);
        assert_eq!(read_field(&buf, usize::MAX), None);
    }

    #[test]
    fn test_write_field() {
        let mut buf = [0u8; 6];
        assert!(write_field(&mut buf, 2, 0x8010_0001));
        assert_eq!(buf, [0, 0, 0x80, 0x10, 0x00, 0x01]);

        let before = buf;
        assert!(!write_field(&mut buf, 3, 0xFFFF_FFFF));
        assert_eq!(buf, before);
    }
}
