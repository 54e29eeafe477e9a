use alloc::string::String;
use enough::StopReason;

/// Errors from bitmap decoding, encoding and resampling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

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

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("out of memory: failed to allocate {bytes} bytes")]
    OutOfMemory { bytes: usize },

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

/// Caller-supplied window, scale factor or variant rejected before any
/// pixel work starts.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("dimensions too large: window {width}x{height} exceeds source {source_width}x{source_height}")]
    WindowTooLarge {
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    },

    #[error("offset or dimensions too large: window at ({x},{y}) size {width}x{height} exceeds source {source_width}x{source_height}")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        source_width: u32,
        source_height: u32,
    },

    #[error("0 is not valid: window dimensions must be positive")]
    ZeroDimension,

    #[error("0 is not valid: scale factor must be positive")]
    ZeroScaleFactor,

    #[error("unknown execution mode: {0}")]
    UnknownVariant(String),
}
