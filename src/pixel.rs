/// TIM pixel mode, the low three bits of the flags word.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelMode {
    /// 4-bit palette indices, four per word.
    Indexed4,
    /// 8-bit palette indices, two per word.
    Indexed8,
    /// 15-bit direct color, one word per pixel.
    Direct15,
    /// 24-bit direct color, two pixels per three words.
    Direct24,
    /// Mixed/reserved mode. No pixel data is decoded.
    Reserved,
}

impl PixelMode {
    /// Parse the mode field. Values above 4 are invalid.
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0 => Some(Self::Indexed4),
            1 => Some(Self::Indexed8),
            2 => Some(Self::Direct15),
            3 => Some(Self::Direct24),
            4 => Some(Self::Reserved),
            _ => None,
        }
    }

    /// Raw mode value as stored in the flags word.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Indexed4 => 0,
            Self::Indexed8 => 1,
            Self::Direct15 => 2,
            Self::Direct24 => 3,
            Self::Reserved => 4,
        }
    }

    /// Bits per pixel, or `None` for the reserved mode.
    pub fn bits_per_pixel(&self) -> Option<u8> {
        match self {
            Self::Indexed4 => Some(4),
            Self::Indexed8 => Some(8),
            Self::Direct15 => Some(16),
            Self::Direct24 => Some(24),
            Self::Reserved => None,
        }
    }

    /// Output pixels per stored 16-bit word column.
    ///
    /// Scales the raw width field and the VRAM x offset. 24-bit mode keeps
    /// the raw width.
    pub fn width_scale(&self) -> u32 {
        match self {
            Self::Indexed4 => 4,
            Self::Indexed8 => 2,
            _ => 1,
        }
    }

    /// Palette entries this mode reads from a CLUT block.
    pub fn palette_len(&self) -> usize {
        match self {
            Self::Indexed4 => 16,
            Self::Indexed8 => 256,
            _ => 0,
        }
    }

    /// Whether the mode needs a CLUT block.
    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Indexed4 | Self::Indexed8)
    }
}
