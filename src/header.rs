//! TIM header parsing.
//!
//! ```text
//! u16 magic = 0x0010      u16 version = 0
//! u32 flags               bits 0-2 pixel mode, bit 3 CLUT present
//! [CLUT block]            block header + 16 or 256 color words
//! image block             block header + pixel words
//! ```
//!
//! A block header is `u32 length, u16 x, u16 y, u16 width, u16 height`. The
//! length field is not used; sizes come from the mode and dimensions.

use crate::clut;
use crate::error::TimError;
use crate::image;
use crate::limits::Limits;
use crate::pixel::PixelMode;
use crate::source::ByteSource;
use crate::texture::Texture;

/// TIM identifier, the first little-endian word of every resource.
pub const TIM_MAGIC: u16 = 0x0010;
/// The only TIM version in use.
pub const TIM_VERSION: u16 = 0;

const MODE_MASK: u32 = 0x7;
const CLUT_FLAG: u32 = 0x8;

/// CLUT or image block header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// Declared block length in bytes (unused).
    pub length: u32,
    /// VRAM destination x, in 16-bit words.
    pub x: u16,
    /// VRAM destination y.
    pub y: u16,
    /// Width in 16-bit words.
    pub width: u16,
    pub height: u16,
}

impl BlockHeader {
    fn read<S: ByteSource + ?Sized>(source: &mut S) -> Result<Self, TimError> {
        Ok(Self {
            length: source.read_u32_le()?,
            x: source.read_u16_le()?,
            y: source.read_u16_le()?,
            width: source.read_u16_le()?,
            height: source.read_u16_le()?,
        })
    }
}

/// All TIM headers, without pixel or palette data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TimHeader {
    pub(crate) mode: PixelMode,
    pub(crate) clut: Option<BlockHeader>,
    pub(crate) image: BlockHeader,
}

/// Read and check the magic and version words.
pub(crate) fn read_magic<S: ByteSource + ?Sized>(source: &mut S) -> Result<(), TimError> {
    if source.read_u16_le()? != TIM_MAGIC {
        return Err(TimError::UnrecognizedFormat);
    }
    let version = source.read_u16_le()?;
    if version != TIM_VERSION {
        return Err(TimError::UnsupportedVersion(version));
    }
    Ok(())
}

/// Read the flags word. Returns the pixel mode and whether a CLUT follows.
fn read_flags<S: ByteSource + ?Sized>(source: &mut S) -> Result<(PixelMode, bool), TimError> {
    let flags = source.read_u32_le()?;
    let mode = PixelMode::from_bits(flags & MODE_MASK).ok_or_else(|| {
        TimError::InvalidHeader(alloc::format!("pixel mode {} out of range", flags & MODE_MASK))
    })?;
    let has_clut = flags & CLUT_FLAG != 0;
    if mode.is_indexed() && !has_clut {
        return Err(TimError::InvalidHeader(alloc::format!(
            "{mode:?} requires a CLUT block"
        )));
    }
    Ok((mode, has_clut))
}

/// Decode one TIM positioned just after its version word.
///
/// Leaves the source at the end of the consumed data. Errors are returned to
/// the caller unchanged.
pub(crate) fn decode<S: ByteSource + ?Sized>(
    source: &mut S,
    limits: &Limits,
) -> Result<Texture, TimError> {
    let (mode, has_clut) = read_flags(source)?;

    let palette = if has_clut {
        let clut = BlockHeader::read(source)?;
        clut::decode(source, mode, clut.width, clut.height)?
    } else {
        clut::Palette::default()
    };

    let block = BlockHeader::read(source)?;
    image::decode(source, mode, &block, &palette, limits)
}

/// Parse the headers of one TIM positioned just after its version word,
/// skipping over palette data.
pub(crate) fn read_headers<S: ByteSource + ?Sized>(source: &mut S) -> Result<TimHeader, TimError> {
    let (mode, has_clut) = read_flags(source)?;

    let clut = if has_clut {
        let clut = BlockHeader::read(source)?;
        clut::check_dimensions(clut.width, clut.height)?;
        source.skip(mode.palette_len() as u64 * 2)?;
        Some(clut)
    } else {
        None
    };

    Ok(TimHeader {
        mode,
        clut,
        image: BlockHeader::read(source)?,
    })
}
