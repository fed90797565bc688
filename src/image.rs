//! Pixel plane decoding for the four TIM pixel modes.
//!
//! Rows are read whole into a reused buffer and written straight into the
//! texture's pre-allocated RGBA8 buffer.

use alloc::vec;

use crate::clut::{Palette, rgb555_to_rgba};
use crate::error::TimError;
use crate::header::BlockHeader;
use crate::limits::Limits;
use crate::pixel::PixelMode;
use crate::source::ByteSource;
use crate::texture::Texture;
use crate::vram::Placement;

/// Decode the pixel plane described by `block`.
///
/// An out-of-range palette index ends decoding early and returns the texture
/// as written so far, with the source positioned just after the offending
/// word. The reserved mode has no pixel data and is rejected once the block
/// header has been validated.
pub(crate) fn decode<S: ByteSource + ?Sized>(
    source: &mut S,
    mode: PixelMode,
    block: &BlockHeader,
    palette: &Palette,
    limits: &Limits,
) -> Result<Texture, TimError> {
    limits.check_resolution(block.width, block.height)?;
    let placement = Placement::new(mode, block.x, block.y)?;

    let Some(bits_per_pixel) = mode.bits_per_pixel() else {
        return Err(TimError::UnsupportedVariant(
            "pixel mode 4 carries no pixel data".into(),
        ));
    };

    let width = u32::from(block.width) * mode.width_scale();
    let height = u32::from(block.height);
    limits.check_output(width, height)?;

    let needed = plane_len(mode, block.width, block.height);
    if source.len().saturating_sub(source.position()) < needed {
        return Err(TimError::UnexpectedEof);
    }

    let mut texture = Texture::new(width, height, bits_per_pixel, placement);
    let words = usize::from(block.width);
    let rows = usize::from(block.height);

    match mode {
        PixelMode::Indexed4 => read_indexed::<4, _>(source, &mut texture, words, rows, palette)?,
        PixelMode::Indexed8 => read_indexed::<8, _>(source, &mut texture, words, rows, palette)?,
        PixelMode::Direct15 => read_direct15(source, &mut texture, words, rows)?,
        PixelMode::Direct24 => read_direct24(source, &mut texture, words, rows)?,
        // rejected above
        PixelMode::Reserved => {}
    }
    Ok(texture)
}

/// Bytes of pixel data a block occupies in the stream.
fn plane_len(mode: PixelMode, width: u16, height: u16) -> u64 {
    let row = match mode {
        PixelMode::Direct24 => u64::from(width / 2) * 6,
        _ => u64::from(width) * 2,
    };
    row * u64::from(height)
}

/// Palette-indexed rows, `BITS` = 4 or 8. Indices are packed least
/// significant first.
fn read_indexed<const BITS: u32, S: ByteSource + ?Sized>(
    source: &mut S,
    texture: &mut Texture,
    words: usize,
    rows: usize,
    palette: &Palette,
) -> Result<(), TimError> {
    let per_word = (16 / BITS) as usize;
    let mask = (1u16 << BITS) - 1;
    let mut row = vec![0u8; words * 2];
    let mut colors = [[0u8; 4]; 4];

    for y in 0..rows {
        let row_start = source.position();
        source.read_exact(&mut row)?;
        for (x, w) in row.chunks_exact(2).enumerate() {
            let word = u16::from_le_bytes([w[0], w[1]]);
            for (i, color) in colors[..per_word].iter_mut().enumerate() {
                let index = usize::from((word >> (i as u32 * BITS)) & mask);
                match palette.get(index) {
                    Some(c) => *color = c,
                    None => {
                        log::trace!(
                            "palette index {index} out of range at word ({x}, {y}), \
                             keeping partial texture"
                        );
                        source.seek_to(row_start + (x as u64 + 1) * 2)?;
                        return Ok(());
                    }
                }
            }
            let base = (y * words + x) * per_word;
            for (i, &color) in colors[..per_word].iter().enumerate() {
                texture.put(base + i, color);
            }
        }
    }
    Ok(())
}

fn read_direct15<S: ByteSource + ?Sized>(
    source: &mut S,
    texture: &mut Texture,
    words: usize,
    rows: usize,
) -> Result<(), TimError> {
    let mut row = vec![0u8; words * 2];
    for y in 0..rows {
        source.read_exact(&mut row)?;
        for (x, w) in row.chunks_exact(2).enumerate() {
            texture.put(y * words + x, rgb555_to_rgba(u16::from_le_bytes([w[0], w[1]])));
        }
    }
    Ok(())
}

/// 24-bit rows: three words carry two pixels as R0 G0 | B0 R1 | G1 B1.
///
/// Pairs start at x = 0, 2, 4, ... while x < width - 1, so an odd-width
/// row never decodes its last pixel.
///
/// The pair count, not the pixel count, decides how many words each row
/// consumes: `(width / 2) * 3`. An odd-width row therefore leaves its last
/// word unread, and whatever follows the block starts right there.
fn read_direct24<S: ByteSource + ?Sized>(
    source: &mut S,
    texture: &mut Texture,
    width: usize,
    rows: usize,
) -> Result<(), TimError> {
    let pairs = width / 2;
    let mut row = vec![0u8; pairs * 6];
    for y in 0..rows {
        source.read_exact(&mut row)?;
        for (p, b) in row.chunks_exact(6).enumerate() {
            let base = y * width + p * 2;
            texture.put(base, [b[0], b[1], b[2], 0xFF]);
            texture.put(base + 1, [b[3], b[4], b[5], 0xFF]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SliceSource;
    use alloc::vec::Vec;

    fn block(width: u16, height: u16) -> BlockHeader {
        BlockHeader {
            length: 0,
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    fn words(ws: &[u16]) -> Vec<u8> {
        ws.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn indexed4_nibbles_low_first() {
        let palette = Palette::from_colors((0..16u8).map(|i| [i, i, i, 255]).collect());
        let data = words(&[0x3210]);
        let mut src = SliceSource::new(&data);
        let tex = decode(
            &mut src,
            PixelMode::Indexed4,
            &block(1, 1),
            &palette,
            &Limits::default(),
        )
        .unwrap();
        assert_eq!(tex.width, 4);
        assert_eq!(tex.bits_per_pixel, 4);
        for x in 0..4 {
            assert_eq!(tex.pixel(x, 0), Some([x as u8, x as u8, x as u8, 255]));
        }
    }

    #[test]
    fn indexed8_bytes_low_first() {
        let palette = Palette::from_colors((0..=255u8).map(|i| [i, 0, 0, 255]).collect());
        let data = words(&[0xAB01, 0x00FF]);
        let mut src = SliceSource::new(&data);
        let tex = decode(
            &mut src,
            PixelMode::Indexed8,
            &block(2, 1),
            &palette,
            &Limits::default(),
        )
        .unwrap();
        assert_eq!(tex.width, 4);
        assert_eq!(tex.pixel(0, 0), Some([0x01, 0, 0, 255]));
        assert_eq!(tex.pixel(1, 0), Some([0xAB, 0, 0, 255]));
        assert_eq!(tex.pixel(2, 0), Some([0xFF, 0, 0, 255]));
        assert_eq!(tex.pixel(3, 0), Some([0x00, 0, 0, 255]));
    }

    #[test]
    fn palette_overflow_keeps_prefix() {
        // Only 4 colors, so nibble 4 is out of range.
        let palette = Palette::from_colors((1..=4u8).map(|i| [i * 10, 0, 0, 255]).collect());
        // Row 0 fine; row 1 word 0 fine, word 1 has index 4.
        let data = words(&[0x0123, 0x3210, 0x1111, 0x0400, 0x2222]);
        let mut src = SliceSource::new(&data);
        let tex = decode(
            &mut src,
            PixelMode::Indexed4,
            &block(2, 2),
            &palette,
            &Limits::default(),
        )
        .unwrap();

        assert_eq!((tex.width, tex.height), (8, 2));
        assert_eq!(tex.pixel(0, 0), Some([40, 0, 0, 255]));
        assert_eq!(tex.pixel(3, 0), Some([10, 0, 0, 255]));
        assert_eq!(tex.pixel(4, 0), Some([10, 0, 0, 255]));
        assert_eq!(tex.pixel(0, 1), Some([20, 0, 0, 255]));
        assert_eq!(tex.pixel(3, 1), Some([20, 0, 0, 255]));
        for x in 4..8 {
            assert_eq!(tex.pixel(x, 1), Some([0, 0, 0, 0]));
        }
        // Positioned right after the offending word, not the end of the row.
        assert_eq!(src.position(), 8);
    }

    #[test]
    fn direct15_expands_channels() {
        let data = words(&[0x001F, 0x83E0, 0x7C00]);
        let mut src = SliceSource::new(&data);
        let tex = decode(
            &mut src,
            PixelMode::Direct15,
            &block(3, 1),
            &Palette::default(),
            &Limits::default(),
        )
        .unwrap();
        assert_eq!(tex.bits_per_pixel, 16);
        assert_eq!(tex.pixel(0, 0), Some([248, 0, 0, 255]));
        assert_eq!(tex.pixel(1, 0), Some([0, 248, 0, 255]));
        assert_eq!(tex.pixel(2, 0), Some([0, 0, 248, 255]));
    }

    #[test]
    fn direct24_pairs_and_odd_width() {
        let data = [1u8, 2, 3, 4, 5, 6, 0xEE, 0xEE];
        let mut src = SliceSource::new(&data);
        let tex = decode(
            &mut src,
            PixelMode::Direct24,
            &block(3, 1),
            &Palette::default(),
            &Limits::default(),
        )
        .unwrap();
        assert_eq!((tex.width, tex.bits_per_pixel), (3, 24));
        assert_eq!(tex.pixel(0, 0), Some([1, 2, 3, 255]));
        assert_eq!(tex.pixel(1, 0), Some([4, 5, 6, 255]));
        assert_eq!(tex.pixel(2, 0), Some([0, 0, 0, 0]));
        assert_eq!(src.position(), 6);
    }

    #[test]
    fn reserved_mode_is_rejected_after_validation() {
        let data = [0u8; 8];
        let mut src = SliceSource::new(&data);
        let none = Palette::default();
        let limits = Limits::default();
        assert!(matches!(
            decode(&mut src, PixelMode::Reserved, &block(1, 1), &none, &limits),
            Err(TimError::UnsupportedVariant(_))
        ));
        let mut src = SliceSource::new(&data);
        assert!(matches!(
            decode(&mut src, PixelMode::Reserved, &block(0, 1), &none, &limits),
            Err(TimError::InvalidHeader(_))
        ));
    }

    #[test]
    fn dimension_limits() {
        let data = [0u8; 4];
        let none = Palette::default();
        let limits = Limits {
            max_resolution: 8,
            ..Default::default()
        };
        let mut src = SliceSource::new(&data);
        assert!(matches!(
            decode(&mut src, PixelMode::Direct15, &block(9, 1), &none, &limits),
            Err(TimError::DimensionsTooLarge {
                width: 9,
                height: 1
            })
        ));

        let limits = Limits {
            max_pixels: Some(3),
            ..Default::default()
        };
        let mut src = SliceSource::new(&data);
        assert!(matches!(
            decode(&mut src, PixelMode::Indexed4, &block(1, 1), &none, &limits),
            Err(TimError::LimitExceeded(_))
        ));
    }

    #[test]
    fn truncated_rows_are_eof() {
        let data = words(&[0x7FFF]);
        let mut src = SliceSource::new(&data);
        assert!(matches!(
            decode(
                &mut src,
                PixelMode::Direct15,
                &block(1, 2),
                &Palette::default(),
                &Limits::default()
            ),
            Err(TimError::UnexpectedEof)
        ));
    }

    #[test]
    fn short_source_fails_before_allocating() {
        // 65535 x 65535 words would be a 64 GiB texture.
        let data = [0u8; 20];
        let limits = Limits {
            max_resolution: u16::MAX,
            ..Default::default()
        };
        for mode in [PixelMode::Indexed4, PixelMode::Direct15, PixelMode::Direct24] {
            let palette = Palette::from_colors([[0, 0, 0, 255]; 16].to_vec());
            let huge = block(u16::MAX, u16::MAX);
            let mut src = SliceSource::new(&data);
            assert!(matches!(
                decode(&mut src, mode, &huge, &palette, &limits),
                Err(TimError::UnexpectedEof)
            ));
            assert_eq!(src.position(), 0);
        }
    }

    #[test]
    fn plane_len_per_mode() {
        assert_eq!(plane_len(PixelMode::Indexed4, 3, 2), 12);
        assert_eq!(plane_len(PixelMode::Direct15, 3, 2), 12);
        // 24-bit rows only carry whole pairs.
        assert_eq!(plane_len(PixelMode::Direct24, 3, 2), 12);
        assert_eq!(plane_len(PixelMode::Direct24, 4, 2), 24);
        assert_eq!(plane_len(PixelMode::Direct24, 1, 5), 0);
    }
}
