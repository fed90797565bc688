//! VRAM texture page placement.
//!
//! VRAM is addressed in 16-bit words. Texture pages are 64 words wide; a
//! texture's page comes from its image block destination.

use crate::error::TimError;
use crate::pixel::PixelMode;

/// Width of a texture page in VRAM words.
pub(crate) const PAGE_WIDTH: u16 = 64;
/// Divisor for the vertical page index.
pub(crate) const PAGE_ROW_DIVISOR: u16 = 255;
/// Height subtracted per vertical page for the local y offset.
pub(crate) const PAGE_HEIGHT: i32 = 256;

const MAX_HORIZONTAL_PAGE: u16 = 16;
const MAX_VERTICAL_PAGE: u16 = 2;
const MAX_PAGE: u8 = 31;

/// Where a texture lives in VRAM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub horizontal_page: u8,
    pub vertical_page: u8,
    /// `vertical_page * 16 + horizontal_page`, 0-31.
    pub page: u8,
    /// X offset inside the page, in output pixels.
    pub local_x: i32,
    /// Y offset inside the page. Negative for y = 255, 510, 511.
    pub local_y: i32,
}

impl Placement {
    /// Compute the placement of an image block at (`dest_x`, `dest_y`).
    pub fn new(mode: PixelMode, dest_x: u16, dest_y: u16) -> Result<Self, TimError> {
        let horizontal = dest_x / PAGE_WIDTH;
        if horizontal > MAX_HORIZONTAL_PAGE {
            return Err(TimError::InvalidHeader(alloc::format!(
                "horizontal texture page {horizontal} out of range"
            )));
        }
        let vertical = dest_y / PAGE_ROW_DIVISOR;
        if vertical > MAX_VERTICAL_PAGE {
            return Err(TimError::InvalidHeader(alloc::format!(
                "vertical texture page {vertical} out of range"
            )));
        }
        let page = (vertical * 16 + horizontal) as u8;
        if page > MAX_PAGE {
            return Err(TimError::InvalidHeader(alloc::format!(
                "texture page {page} out of range"
            )));
        }

        let column = i32::from(dest_x - horizontal * PAGE_WIDTH);
        Ok(Self {
            horizontal_page: horizontal as u8,
            vertical_page: vertical as u8,
            page,
            local_x: column * mode.width_scale() as i32,
            local_y: i32::from(dest_y) - i32::from(vertical) * PAGE_HEIGHT,
        })
    }
}
