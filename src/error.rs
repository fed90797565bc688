use alloc::string::String;
use enough::StopReason;

/// Errors from TIM decoding and scanning.
///
/// During a scan most of these only mean "no TIM at this offset" and never
/// reach the caller. See [`TimError::is_fatal`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TimError {
    #[error("unrecognized TIM magic")]
    UnrecognizedFormat,

    #[error("unsupported TIM version {0}")]
    UnsupportedVersion(u16),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[source] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl TimError {
    /// Whether this error must end a scan.
    ///
    /// Format mismatches and truncated candidates are not fatal; the scanner
    /// moves on to the next offset. I/O failures other than end-of-stream and
    /// cancellation are.
    pub fn is_fatal(&self) -> bool {
        match self {
            #[cfg(feature = "std")]
            TimError::Io(_) => true,
            TimError::Cancelled(_) => true,
            _ => false,
        }
    }
}

impl From<StopReason> for TimError {
    fn from(r: StopReason) -> Self {
        TimError::Cancelled(r)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for TimError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            TimError::UnexpectedEof
        } else {
            TimError::Io(e)
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn io_errors_split_on_eof() {
        let eof = TimError::from(Error::from(ErrorKind::UnexpectedEof));
        assert!(matches!(eof, TimError::UnexpectedEof));
        assert!(!eof.is_fatal());

        let other = TimError::from(Error::other("bad sector"));
        assert!(matches!(&other, TimError::Io(e) if e.kind() == ErrorKind::Other));
        assert!(other.is_fatal());

        assert!(TimError::from(enough::StopReason::Cancelled).is_fatal());
    }
}
