use crate::error::TimError;
use crate::header::{self, BlockHeader};
use crate::limits::Limits;
use crate::pixel::PixelMode;
use crate::source::SliceSource;
use crate::vram::Placement;

/// TIM header information, read without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimInfo {
    pub mode: PixelMode,
    /// Output width in pixels.
    pub width: u32,
    pub height: u32,
    /// `None` for the reserved mode.
    pub bits_per_pixel: Option<u8>,
    pub placement: Placement,
    pub clut: Option<BlockHeader>,
    pub image: BlockHeader,
}

impl TimInfo {
    /// Read the headers of the TIM at the start of `data`.
    ///
    /// Applies the same header checks as a decode with default [`Limits`], so
    /// anything accepted here has a decodable header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TimError> {
        let mut source = SliceSource::new(data);
        header::read_magic(&mut source)?;
        let header = header::read_headers(&mut source)?;
        Limits::default().check_resolution(header.image.width, header.image.height)?;
        let placement = Placement::new(header.mode, header.image.x, header.image.y)?;
        Ok(Self {
            mode: header.mode,
            width: u32::from(header.image.width) * header.mode.width_scale(),
            height: u32::from(header.image.height),
            bits_per_pixel: header.mode.bits_per_pixel(),
            placement,
            clut: header.clut,
            image: header.image,
        })
    }

    pub fn has_clut(&self) -> bool {
        self.clut.is_some()
    }
}
