/// Largest image width/height (in 16-bit words) accepted by default.
pub const DEFAULT_MAX_RESOLUTION: u16 = 1024;

/// Resource limits for decode and scan operations.
///
/// `max_resolution` bounds the raw width/height fields of the image block.
/// The optional fields default to `None` (no limit).
#[derive(Clone, Debug)]
pub struct Limits {
    pub max_resolution: u16,
    /// Maximum output pixel count (width * height after mode scaling).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for output buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_resolution: DEFAULT_MAX_RESOLUTION,
            max_pixels: None,
            max_memory_bytes: None,
        }
    }
}

impl Limits {
    /// Check raw image block dimensions. Returns Ok(()) or an error.
    pub(crate) fn check_resolution(&self, width: u16, height: u16) -> Result<(), crate::TimError> {
        if width == 0 || height == 0 {
            return Err(crate::TimError::InvalidHeader(alloc::format!(
                "image dimensions {width}x{height} contain zero"
            )));
        }
        if width > self.max_resolution || height > self.max_resolution {
            return Err(crate::TimError::DimensionsTooLarge {
                width: u32::from(width),
                height: u32::from(height),
            });
        }
        Ok(())
    }

    /// Check output dimensions and allocation size against limits.
    pub(crate) fn check_output(&self, width: u32, height: u32) -> Result<(), crate::TimError> {
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels {
            if pixels > max_px {
                return Err(crate::TimError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        if let Some(max_mem) = self.max_memory_bytes {
            let bytes = pixels * 4;
            if bytes > max_mem {
                return Err(crate::TimError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
