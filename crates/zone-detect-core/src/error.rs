//! Error types for zone detection.

use crate::region::{Region, RegionError};

/// Result alias used across the detection crates.
pub type Result<T> = core::result::Result<T, DetectError>;

/// Broad category of a [`DetectError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request payload is malformed (regions, names, areas).
    Configuration,
    /// The image buffer itself is unusable.
    Input,
}

/// Request-fatal failures.
///
/// Invalid zone regions are deliberately absent: they degrade to a `false`
/// verdict for that zone instead of failing the request.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("reference region {region} is unusable: {source}")]
    Reference {
        region: Region,
        #[source]
        source: RegionError,
    },

    #[error("zone #{index} has an empty name")]
    EmptyZoneName { index: usize },

    #[error("zone name '{name}' is used more than once")]
    DuplicateZoneName { name: String },

    #[error("min_area for {scope} must be a positive number, got {value}")]
    InvalidMinArea { scope: String, value: f64 },

    #[error("image must be non-empty, got {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    #[error("buffer holds {len} pixels, expected {width}x{height}")]
    BufferSize {
        len: usize,
        width: usize,
        height: usize,
    },
}

impl DetectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Reference { .. }
            | Self::EmptyZoneName { .. }
            | Self::DuplicateZoneName { .. }
            | Self::InvalidMinArea { .. } => ErrorKind::Configuration,
            Self::EmptyImage { .. } | Self::BufferSize { .. } => ErrorKind::Input,
        }
    }
}

/// Check that `img` is a non-empty `w × h` row-major buffer.
pub fn check_buffer(img: &[u8], w: usize, h: usize) -> Result<()> {
    if w == 0 || h == 0 {
        return Err(DetectError::EmptyImage {
            width: w,
            height: h,
        });
    }
    if img.len() != w * h {
        return Err(DetectError::BufferSize {
            len: img.len(),
            width: w,
            height: h,
        });
    }
    Ok(())
}
