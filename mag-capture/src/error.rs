//! Capture error types.

use thiserror::Error;

/// Errors raised while enumerating monitors or grabbing pixels.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The platform reported no monitors
    #[error("no monitors available for capture")]
    NoMonitors,

    /// Monitor enumeration failed in the platform library
    #[error("failed to enumerate monitors: {0}")]
    Enumerate(String),

    /// No monitor with this system index in the snapshot
    #[error("no monitor with system index {0}")]
    UnknownMonitor(usize),

    /// Grabbing one monitor's pixels failed
    #[error("failed to capture monitor {index}: {message}")]
    Capture { index: usize, message: String },

    /// Pixel data does not match the stated dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Requested capture region has no pixels
    #[error("capture region {width}x{height} is empty")]
    EmptyRegion { width: u32, height: u32 },
}

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;
