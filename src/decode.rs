use enough::Stop;

use crate::error::TimError;
use crate::header;
use crate::limits::Limits;
use crate::source::SliceSource;
use crate::texture::Texture;

/// Decode request for a single TIM that starts at the first byte of `data`,
/// such as a standalone `.tim` file.
///
/// Unlike a scan, failures are returned as errors. Trailing bytes after the
/// resource are ignored.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<Texture, TimError> {
        stop.check()?;
        let default_limits = Limits::default();
        let limits = self.limits.unwrap_or(&default_limits);
        let mut source = SliceSource::new(self.data);
        header::read_magic(&mut source)?;
        header::decode(&mut source, limits)
    }
}

/// Decode a single TIM at the start of `data` with default limits.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Texture, TimError> {
    DecodeRequest::new(data).decode(stop)
}
