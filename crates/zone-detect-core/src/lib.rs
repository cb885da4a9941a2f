//! Core primitives for deciding whether a shape is present in image zones.
//!
//! # Overview
//!
//! This crate works on plain row-major `&[u8]` grayscale buffers and exposes
//! the image-independent building blocks of the zone detector:
//!
//! - [`normalize`] – CLAHE contrast normalization.
//! - [`calibrate`] – threshold baseline from a reference region.
//! - [`threshold`] – crop + fixed-level binarization of a zone.
//! - [`zone`] – zones, the request payload and minimum-area resolution.
//! - [`result`] – the ordered zone → verdict mapping.
//!
//! Contour extraction, the per-zone decision and the overlay live in the
//! `zone-detect` crate, which builds on `image`/`imageproc`.
//!
//! # Features
//!
//! - `serde` – `Serialize`/`Deserialize` for regions, zones and requests, and
//!   ordered `Serialize` for [`DetectionResult`].
//! - `tracing` – debug-level spans around normalization and calibration.

pub mod calibrate;
pub mod error;
pub mod normalize;
pub mod region;
pub mod result;
pub mod threshold;
pub mod zone;

pub use crate::error::{DetectError, ErrorKind, Result};
pub use crate::region::{Region, RegionError, Roi};
pub use crate::result::DetectionResult;
pub use crate::zone::{resolve_min_area, DetectRequest, Zone};

/// Minimum contour area used when neither the zone nor the request sets one.
pub const DEFAULT_MIN_AREA: f64 = 1000.0;

/// Tunable constants of the detection pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectParams {
    /// CLAHE clip limit; `<= 0` disables clipping.
    pub clip_limit: f32,
    /// CLAHE tile grid as `[tiles_x, tiles_y]`.
    pub tile_grid: [usize; 2],
    /// Added to the reference mean to get the threshold baseline.
    pub reference_offset: f32,
    /// Fallback minimum contour area.
    pub default_min_area: f64,
    /// Polygon approximation tolerance as a fraction of the contour perimeter.
    pub approx_epsilon: f64,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tile_grid: [8, 8],
            reference_offset: 5.0,
            default_min_area: DEFAULT_MIN_AREA,
            approx_epsilon: 0.02,
        }
    }
}

impl DetectParams {
    /// Default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CLAHE clip limit.
    pub fn with_clip_limit(mut self, clip_limit: f32) -> Self {
        self.clip_limit = clip_limit;
        self
    }

    /// Set the CLAHE tile grid; zero counts are raised to one.
    pub fn with_tile_grid(mut self, tiles_x: usize, tiles_y: usize) -> Self {
        self.tile_grid = [tiles_x.max(1), tiles_y.max(1)];
        self
    }

    /// Set the offset added to the reference mean.
    pub fn with_reference_offset(mut self, offset: f32) -> Self {
        self.reference_offset = offset;
        self
    }

    /// Set the fallback minimum contour area.
    pub fn with_default_min_area(mut self, area: f64) -> Self {
        self.default_min_area = area;
        self
    }

    /// Effective minimum area for `zone` under `request`.
    #[inline]
    pub fn min_area_for(&self, zone: &Zone, request: &DetectRequest) -> f64 {
        resolve_min_area(zone.min_area, request.min_area, self.default_min_area)
    }
}
