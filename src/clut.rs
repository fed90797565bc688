//! CLUT (color lookup table) decoding.
//!
//! A CLUT entry is one little-endian word: bits 0-4 red, 5-9 green,
//! 10-14 blue, bit 15 semi-transparency. Channels widen to 8 bits by `v * 8`
//! (0-31 maps to 0-248). Decoded colors are always opaque.

use alloc::vec::Vec;

use crate::error::TimError;
use crate::pixel::PixelMode;
use crate::source::ByteSource;

/// Largest CLUT width/height accepted in a block header.
const MAX_CLUT_DIMENSION: u16 = 256;

/// Opaque RGBA color table for one resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Palette {
    colors: Vec<[u8; 4]>,
}

impl Palette {
    #[cfg(test)]
    pub(crate) fn from_colors(colors: Vec<[u8; 4]>) -> Self {
        Self { colors }
    }

    pub(crate) fn get(&self, index: usize) -> Option<[u8; 4]> {
        self.colors.get(index).copied()
    }
}

/// Widen a 5-bit channel to 8 bits.
#[inline]
pub(crate) fn expand5(v: u16) -> u8 {
    ((v & 0x1F) * 8) as u8
}

/// Unpack a 15-bit color word to opaque RGBA. Bit 15 is ignored.
#[inline]
pub(crate) fn rgb555_to_rgba(word: u16) -> [u8; 4] {
    [
        expand5(word),
        expand5(word >> 5),
        expand5(word >> 10),
        0xFF,
    ]
}

/// Each declared CLUT dimension must lie in 1..=256.
pub(crate) fn check_dimensions(width: u16, height: u16) -> Result<(), TimError> {
    if width == 0 || height == 0 || width > MAX_CLUT_DIMENSION || height > MAX_CLUT_DIMENSION {
        return Err(TimError::InvalidHeader(alloc::format!(
            "CLUT dimensions {width}x{height} out of range"
        )));
    }
    Ok(())
}

/// Validate the declared CLUT size and read the palette for `mode`.
///
/// The number of entries read is fixed by the mode (16 or 256); the declared
/// width/height are only range-checked. Direct-color modes read nothing.
pub(crate) fn decode<S: ByteSource + ?Sized>(
    source: &mut S,
    mode: PixelMode,
    width: u16,
    height: u16,
) -> Result<Palette, TimError> {
    check_dimensions(width, height)?;

    let count = mode.palette_len();
    let mut raw = [0u8; 512];
    let raw = &mut raw[..count * 2];
    source.read_exact(raw)?;

    let colors = raw
        .chunks_exact(2)
        .map(|w| rgb555_to_rgba(u16::from_le_bytes([w[0], w[1]])))
        .collect();
    Ok(Palette { colors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;

    #[test]
    fn expand5_is_times_eight() {
        for v in 0..32u16 {
            assert_eq!(u16::from(expand5(v)), v * 8);
        }
        assert_eq!(expand5(31), 248);
    }

    #[test]
    fn unpack_ignores_semi_transparency_bit() {
        assert_eq!(rgb555_to_rgba(0x001F), [248, 0, 0, 255]);
        assert_eq!(rgb555_to_rgba(0x03E0), [0, 248, 0, 255]);
        assert_eq!(rgb555_to_rgba(0x7C00), [0, 0, 248, 255]);
        assert_eq!(rgb555_to_rgba(0x8000), [0, 0, 0, 255]);
        assert_eq!(rgb555_to_rgba(0xFFFF), [248, 248, 248, 255]);
    }

    #[test]
    fn entry_count_follows_mode() {
        let data = [0u8; 512];

        let mut src = SliceSource::new(&data);
        let pal = decode(&mut src, PixelMode::Indexed4, 256, 1).unwrap();
        assert_eq!(pal.colors.len(), 16);
        assert_eq!(src.position(), 32);

        let mut src = SliceSource::new(&data);
        let pal = decode(&mut src, PixelMode::Indexed8, 16, 1).unwrap();
        assert_eq!(pal.colors.len(), 256);
        assert_eq!(src.position(), 512);

        let mut src = SliceSource::new(&data);
        let pal = decode(&mut src, PixelMode::Direct15, 16, 1).unwrap();
        assert_eq!(pal.colors.len(), 0);
        assert_eq!(src.position(), 0);
    }

    #[test]
    fn rejects_out_of_range_dimensions() {
        let data = [0u8; 32];
        for (w, h) in [(0, 1), (1, 0), (257, 1), (1, 257)] {
            let mut src = SliceSource::new(&data);
            assert!(matches!(
                decode(&mut src, PixelMode::Indexed4, w, h),
                Err(TimError::InvalidHeader(_))
            ));
        }
    }

    #[test]
    fn truncated_palette_is_eof() {
        let data = [0u8; 30];
        let mut src = SliceSource::new(&data);
        assert!(matches!(
            decode(&mut src, PixelMode::Indexed4, 16, 1),
            Err(TimError::UnexpectedEof)
        ));
    }
}
