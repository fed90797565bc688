//! # zentim
//!
//! Finds and decodes PlayStation TIM textures embedded in raw binary data:
//! disc images, executables, memory captures.
//!
//! TIM resources carry no outer framing, so the scanner attempts a decode at
//! every byte offset and steps one byte forward whenever a candidate turns
//! out not to be a TIM. Every recognized resource becomes a [`Texture`] with
//! an RGBA8 pixel buffer and its VRAM page placement.
//!
//! ## Supported pixel modes
//!
//! - **4-bit** and **8-bit** palette-indexed (CLUT required)
//! - **16-bit** direct color (5 bits per channel, widened by `v * 8`)
//! - **24-bit** direct color
//!
//! Mode 4 (mixed) headers are recognized but yield no texture.
//!
//! ## Non-Goals
//!
//! - Repairing damaged resources beyond keeping a partial decode
//! - Semi-transparency; decoded colors are always opaque
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use zentim::{ScanRequest, SliceSource};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // disc image bytes
//!
//! for found in ScanRequest::new("SCUS_942.36").iter(SliceSource::new(data), Unstoppable) {
//!     let found = found?;
//!     println!(
//!         "{} at {:#X}: {}x{} {}bpp page {}",
//!         found.texture.name,
//!         found.offset,
//!         found.texture.width,
//!         found.texture.height,
//!         found.texture.bits_per_pixel,
//!         found.texture.page,
//!     );
//! }
//! # Ok::<(), zentim::TimError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod clut;
mod error;
mod header;
mod image;
mod info;
mod limits;
mod pixel;
mod scan;
mod source;
mod texture;
mod vram;

mod decode;

// Re-exports
pub use decode::{DecodeRequest, decode};
pub use enough::{Stop, Unstoppable};
pub use error::TimError;
pub use header::{BlockHeader, TIM_MAGIC, TIM_VERSION};
pub use info::TimInfo;
pub use limits::{DEFAULT_MAX_RESOLUTION, Limits};
pub use pixel::PixelMode;
pub use scan::{FoundTexture, ScanRequest, TimScanner, scan_bytes, texture_name};
#[cfg(feature = "std")]
pub use scan::scan_reader;
#[cfg(feature = "std")]
pub use source::StreamSource;
pub use source::{ByteSource, SliceSource};
pub use texture::{BYTES_PER_PIXEL, Texture};
pub use vram::Placement;
