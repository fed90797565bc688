//! Random-access byte sources the decoder reads from.
//!
//! All multi-byte reads are little-endian. A read that runs past the end of
//! the source fails with [`TimError::UnexpectedEof`] and leaves the position
//! unspecified; callers re-seek before the next attempt.

use crate::error::TimError;

/// A seekable, byte-exact input.
pub trait ByteSource {
    /// Total length in bytes.
    fn len(&self) -> u64;

    /// Current read position.
    fn position(&self) -> u64;

    /// Move the read position. Seeking past the end is allowed; the next read
    /// fails.
    fn seek_to(&mut self, pos: u64) -> Result<(), TimError>;

    /// Fill `buf` completely or fail.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), TimError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_u16_le(&mut self) -> Result<u16, TimError> {
        let mut b = [0u8; 2];
        self.read_exact(&mut b)?;
        Ok(u16::from_le_bytes(b))
    }

    fn read_u32_le(&mut self) -> Result<u32, TimError> {
        let mut b = [0u8; 4];
        self.read_exact(&mut b)?;
        Ok(u32::from_le_bytes(b))
    }

    /// Advance the position by `n` bytes without reading.
    fn skip(&mut self, n: u64) -> Result<(), TimError> {
        let pos = self
            .position()
            .checked_add(n)
            .ok_or(TimError::UnexpectedEof)?;
        if pos > self.len() {
            return Err(TimError::UnexpectedEof);
        }
        self.seek_to(pos)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn seek_to(&mut self, pos: u64) -> Result<(), TimError> {
        (**self).seek_to(pos)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), TimError> {
        (**self).read_exact(buf)
    }
}

// ── In-memory source ────────────────────────────────────────────────

/// Cursor over a byte slice.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl ByteSource for SliceSource<'_> {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }

    fn seek_to(&mut self, pos: u64) -> Result<(), TimError> {
        // Clamp so a far seek still reports EOF on the next read.
        self.pos = usize::try_from(pos).unwrap_or(usize::MAX).min(self.data.len());
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), TimError> {
        let end = self
            .pos
            .checked_add(buf.len())
            .ok_or(TimError::UnexpectedEof)?;
        let src = self.data.get(self.pos..end).ok_or(TimError::UnexpectedEof)?;
        buf.copy_from_slice(src);
        self.pos = end;
        Ok(())
    }
}

// ── Stream source ───────────────────────────────────────────────────

#[cfg(feature = "std")]
pub use stream::StreamSource;

#[cfg(feature = "std")]
mod stream {
    use std::io::{BufReader, Read, Seek, SeekFrom};

    use super::ByteSource;
    use crate::error::TimError;

    /// Buffered source over any `Read + Seek` stream (files, disc images).
    ///
    /// Short seeks stay inside the read buffer, so the scanner's one-byte
    /// steps don't hit the underlying stream.
    pub struct StreamSource<R> {
        inner: BufReader<R>,
        pos: u64,
        len: u64,
    }

    impl<R: Read + Seek> StreamSource<R> {
        /// Wrap a stream. Measures its length and rewinds it to the start.
        pub fn new(mut reader: R) -> Result<Self, TimError> {
            let len = reader.seek(SeekFrom::End(0)).map_err(TimError::Io)?;
            reader.seek(SeekFrom::Start(0)).map_err(TimError::Io)?;
            Ok(Self {
                inner: BufReader::new(reader),
                pos: 0,
                len,
            })
        }

        pub fn into_inner(self) -> R {
            self.inner.into_inner()
        }
    }

    impl<R: Read + Seek> ByteSource for StreamSource<R> {
        fn len(&self) -> u64 {
            self.len
        }

        fn position(&self) -> u64 {
            self.pos
        }

        fn seek_to(&mut self, pos: u64) -> Result<(), TimError> {
            let delta = i64::try_from(pos)
                .ok()
                .zip(i64::try_from(self.pos).ok())
                .and_then(|(to, from)| to.checked_sub(from));
            match delta {
                Some(0) => {}
                Some(d) => self.inner.seek_relative(d).map_err(TimError::Io)?,
                None => {
                    self.inner.seek(SeekFrom::Start(pos)).map_err(TimError::Io)?;
                }
            }
            self.pos = pos;
            Ok(())
        }

        fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), TimError> {
            if let Err(e) = self.inner.read_exact(buf) {
                // A failed read consumes an unknown number of bytes.
                self.inner
                    .seek(SeekFrom::Start(self.pos))
                    .map_err(TimError::Io)?;
                return Err(e.into());
            }
            self.pos += buf.len() as u64;
            Ok(())
        }
    }
}
