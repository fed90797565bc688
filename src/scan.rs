//! Scanning arbitrary byte streams for embedded TIM resources.
//!
//! Nothing frames a TIM inside a disc image or memory dump, so the scanner
//! tries a decode at every byte offset. A failed candidate moves the cursor
//! one byte forward. A decoded one moves it to the end of the resource, so
//! back-to-back TIMs are all found.

use alloc::string::String;
use alloc::vec::Vec;
use core::iter::FusedIterator;

use enough::Stop;

use crate::error::TimError;
use crate::header;
use crate::limits::Limits;
use crate::source::{ByteSource, SliceSource};
use crate::texture::Texture;

/// A texture found by a scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundTexture {
    /// Stream offset of the TIM magic.
    pub offset: u64,
    /// Stream offset immediately following the decoded resource.
    pub end: u64,
    pub texture: Texture,
}

/// Outcome of one decode attempt at a single offset.
enum Candidate {
    Found(Texture),
    NoMatch,
}

/// Display name for a texture found at `offset` in a stream labelled `label`.
///
/// The label alone at offset 0, otherwise `label_<hex offset>`.
pub fn texture_name(label: &str, offset: u64) -> String {
    if offset == 0 {
        String::from(label)
    } else {
        alloc::format!("{label}_{offset:x}")
    }
}

/// Builder for a scan over one source.
#[derive(Clone, Debug)]
pub struct ScanRequest<'a> {
    label: &'a str,
    limits: Option<&'a Limits>,
}

impl<'a> ScanRequest<'a> {
    /// `label` names the source; found textures are named after it.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Scan lazily. Each item is a found texture, or a fatal error after
    /// which the iterator ends.
    pub fn iter<S: ByteSource, P: Stop>(&self, source: S, stop: P) -> TimScanner<'a, S, P> {
        TimScanner {
            source,
            stop,
            label: self.label,
            limits: self.limits.cloned().unwrap_or_default(),
            cursor: 0,
            done: false,
        }
    }

    /// Scan to the end, handing each texture and the offset following it to
    /// `sink`. Returns the number of textures found.
    pub fn scan<S, P, F>(&self, source: S, stop: P, mut sink: F) -> Result<usize, TimError>
    where
        S: ByteSource,
        P: Stop,
        F: FnMut(Texture, u64),
    {
        let mut count = 0;
        for found in self.iter(source, stop) {
            let found = found?;
            sink(found.texture, found.end);
            count += 1;
        }
        Ok(count)
    }
}

/// Iterator over the TIM textures embedded in a source.
///
/// Owns the source and its cursor. The cursor never moves backwards, and
/// textures come out in the order of their start offsets.
pub struct TimScanner<'a, S, P> {
    source: S,
    stop: P,
    label: &'a str,
    limits: Limits,
    cursor: u64,
    done: bool,
}

impl<S: ByteSource, P: Stop> TimScanner<'_, S, P> {
    /// Offset of the next candidate.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn try_offset(&mut self, offset: u64) -> Result<Candidate, TimError> {
        self.source.seek_to(offset)?;
        if let Err(e) = header::read_magic(&mut self.source) {
            return if e.is_fatal() { Err(e) } else { Ok(Candidate::NoMatch) };
        }
        match header::decode(&mut self.source, &self.limits) {
            Ok(texture) => Ok(Candidate::Found(texture)),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                log::trace!("rejected TIM candidate at offset {offset:#X}: {e}");
                Ok(Candidate::NoMatch)
            }
        }
    }
}

impl<S: ByteSource, P: Stop> Iterator for TimScanner<'_, S, P> {
    type Item = Result<FoundTexture, TimError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Err(reason) = self.stop.check() {
                self.done = true;
                return Some(Err(reason.into()));
            }
            if self.cursor >= self.source.len() {
                self.done = true;
                log::info!("TIM scan reached end: {}", self.label);
                return None;
            }

            let offset = self.cursor;
            match self.try_offset(offset) {
                Ok(Candidate::Found(mut texture)) => {
                    let end = self.source.position();
                    texture.name = texture_name(self.label, offset);
                    log::info!(
                        "found TIM at offset {offset:#X}: {}x{} {}bpp page {}",
                        texture.width,
                        texture.height,
                        texture.bits_per_pixel,
                        texture.page
                    );
                    self.cursor = end;
                    return Some(Ok(FoundTexture {
                        offset,
                        end,
                        texture,
                    }));
                }
                Ok(Candidate::NoMatch) => self.cursor += 1,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<S: ByteSource, P: Stop> FusedIterator for TimScanner<'_, S, P> {}

/// Scan an in-memory buffer and collect every texture found.
pub fn scan_bytes(
    data: &[u8],
    label: &str,
    stop: impl Stop,
) -> Result<Vec<FoundTexture>, TimError> {
    ScanRequest::new(label)
        .iter(SliceSource::new(data), stop)
        .collect()
}

/// Scan a `Read + Seek` stream, handing each texture and the offset following
/// it to `sink`. Returns the number of textures found.
#[cfg(feature = "std")]
pub fn scan_reader<R, F>(
    reader: R,
    label: &str,
    stop: impl Stop,
    sink: F,
) -> Result<usize, TimError>
where
    R: std::io::Read + std::io::Seek,
    F: FnMut(Texture, u64),
{
    let source = crate::source::StreamSource::new(reader)?;
    ScanRequest::new(label).scan(source, stop, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_use_hex_offset() {
        assert_eq!(texture_name("SLUS_000.01", 0), "SLUS_000.01");
        assert_eq!(texture_name("SLUS_000.01", 0x1A2B), "SLUS_000.01_1a2b");
    }

    #[test]
    fn empty_and_short_sources_end_cleanly() {
        let cases: [&[u8]; 3] = [&[], &[0x10], &[0x10, 0x00, 0x00]];
        for data in cases {
            let mut scanner =
                ScanRequest::new("x").iter(SliceSource::new(data), enough::Unstoppable);
            assert!(scanner.next().is_none());
            assert!(scanner.next().is_none());
            assert_eq!(scanner.cursor(), data.len() as u64);
        }
    }
}
