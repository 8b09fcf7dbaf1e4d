//! Latin-1 byte to glyph index mapping.
//!
//! Font sheets hold the printable ASCII range followed by the printable
//! Latin-1 supplement, skipping both control blocks:
//!
//! | Byte range    | Glyph indices |
//! |---------------|---------------|
//! | `0x20..=0x7F` | `0x00..=0x5F` |
//! | `0xA0..=0xFF` | `0x60..=0xBF` |

/// Number of glyphs addressable through [`glyph_index`].
pub const MAPPED_GLYPHS: usize = 0xC0;

/// Glyph index for a Latin-1 byte, or `None` for control characters.
pub fn glyph_index(byte: u8) -> Option<usize> {
    match byte {
        0x20..=0x7f => Some((byte - 0x20) as usize),
        0xa0..=0xff => Some((byte - 0x40) as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(glyph_index(0x1f), None);
        assert_eq!(glyph_index(0x20), Some(0x00));
        assert_eq!(glyph_index(b'A'), Some(0x21));
        assert_eq!(glyph_index(0x7f), Some(0x5f));
        assert_eq!(glyph_index(0x80), None);
        assert_eq!(glyph_index(0x9f), None);
        assert_eq!(glyph_index(0xa0), Some(0x60));
        assert_eq!(glyph_index(0xff), Some(0xbf));
    }

    #[test]
    fn test_fills_font_sheet() {
        let mapped = (0..=255u8).filter_map(glyph_index).count();
        assert_eq!(mapped, MAPPED_GLYPHS);
        assert_eq!(MAPPED_GLYPHS, crate::GridSpec::FONT_9X18.glyph_count());
    }
}
