use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::vram::Placement;

/// Bytes per output pixel (RGBA8).
pub const BYTES_PER_PIXEL: usize = 4;

/// A decoded TIM texture.
///
/// Pixels are RGBA8, row-major, `width * height * 4` bytes. Pixels left
/// unwritten by a partial decode stay `[0, 0, 0, 0]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// X offset inside the VRAM page, in pixels.
    pub x: i32,
    /// Y offset inside the VRAM page.
    pub y: i32,
    pub bits_per_pixel: u8,
    /// VRAM texture page, 0-31.
    pub page: u8,
    pub name: String,
}

impl Texture {
    /// Allocate a zero-filled texture at `placement`.
    pub(crate) fn new(width: u32, height: u32, bits_per_pixel: u8, placement: Placement) -> Self {
        let len = width as usize * height as usize * BYTES_PER_PIXEL;
        Self {
            pixels: vec![0; len],
            width,
            height,
            x: placement.local_x,
            y: placement.local_y,
            bits_per_pixel,
            page: placement.page,
            name: String::new(),
        }
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA of the pixel at (`x`, `y`), or `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = self.pixels.get(off..off + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    #[inline]
    pub(crate) fn put(&mut self, index: usize, rgba: [u8; 4]) {
        let off = index * BYTES_PER_PIXEL;
        self.pixels[off..off + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    /// Typed RGBA8 view of the pixel data.
    #[cfg(feature = "rgb")]
    pub fn as_rgba(&self) -> &[rgb::RGBA8] {
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA8 pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(self.as_rgba(), self.width as usize, self.height as usize)
    }
}
