//! Zone shape-presence detection on `image` buffers.
//!
//! This crate is organized into a few focused modules:
//! - [`image`] – BT.601 luma conversion and `image::GrayImage` wrappers over the core normalization and
//!   calibration primitives.
//! - [`contour`] – contour tracing, chain compression and polygon geometry.
//! - [`analyze`] – the per-zone decision.
//! - [`overlay`] – the audit overlay.
//! - [`detect`] – the end-to-end pipeline and result aggregation.
//! - [`app`] – config loading and JSON/PNG output for the CLI.
//!
//! ```no_run
//! use zone_detect::{DetectRequest, Region, Zone, ZoneDetector};
//!
//! let img = image::open("frame.png").unwrap();
//! let request = DetectRequest::new(Region::new(0, 0, 100, 100))
//!     .with_zone(Zone::new("slot", Region::new(200, 50, 320, 170)));
//! let report = ZoneDetector::default().detect(&img, &request).unwrap();
//! println!("{:?}", report.result.get("slot"));
//! ```

pub mod analyze;
pub mod app;
pub mod contour;
pub mod detect;
pub mod image;
pub mod overlay;

// Re-export the core types most callers need.
pub use zone_detect_core::{
    DetectError, DetectParams, DetectRequest, DetectionResult, ErrorKind, Region, Zone,
    DEFAULT_MIN_AREA,
};

pub use crate::analyze::{Detection, ZoneOutcome, ZoneStatus};
pub use crate::contour::BoundingBox;
pub use crate::detect::{aggregate, detect_zones, DetectionReport, ZoneDetector};
pub use crate::image::{luma_bt601, normalize_image, reference_baseline_image};
pub use crate::overlay::{OverlayStyle, PALETTE};
