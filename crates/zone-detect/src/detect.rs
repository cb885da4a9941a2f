//! End-to-end zone detection on a decoded image.
//!
//! Pipeline:
//! 1. Convert to 8-bit BT.601 luma and CLAHE-normalize.
//! 2. Compute the threshold baseline from the reference region (fatal on
//!    failure).
//! 3. Analyze every zone against the shared normalized image and baseline.
//!    With the `rayon` feature zones run in parallel; outcomes are always
//!    collected in input order.
//! 4. Optionally draw the overlay from the outcomes, in input order.
//! 5. Aggregate the verdicts into the ordered result mapping.

use image::{DynamicImage, GrayImage, RgbImage};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{info, instrument};
use zone_detect_core::{DetectParams, DetectRequest, DetectionResult, Result, Zone};

use crate::analyze::{analyze_zone, ZoneOutcome};
use crate::image::{luma_bt601, normalize_image, reference_baseline_image};
use crate::overlay::{render_overlay, OverlayStyle};

/// Output of one detection request.
#[derive(Clone, Debug)]
pub struct DetectionReport {
    /// Zone name → shape present, in zone input order.
    pub result: DetectionResult,
    /// Threshold baseline derived from the reference region.
    pub baseline: f32,
    /// Per-zone details, in zone input order.
    pub zones: Vec<ZoneOutcome>,
    /// Annotated canvas, when overlay rendering is enabled.
    pub annotated: Option<RgbImage>,
}

/// Configured detector; cheap to clone and reusable across images.
#[derive(Clone, Debug)]
pub struct ZoneDetector {
    pub params: DetectParams,
    pub style: OverlayStyle,
    /// Render the annotated canvas alongside the verdicts.
    pub overlay: bool,
}

impl Default for ZoneDetector {
    fn default() -> Self {
        Self {
            params: DetectParams::default(),
            style: OverlayStyle::default(),
            overlay: true,
        }
    }
}

impl ZoneDetector {
    /// Default parameters and style, overlay enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector with custom parameters, default style, overlay enabled.
    pub fn with_params(params: DetectParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    /// Replace the overlay stroke widths.
    pub fn with_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable rendering of the annotated canvas.
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    /// Detect on any decoded image; color input is converted to BT.601 luma
    /// first.
    pub fn detect(&self, img: &DynamicImage, request: &DetectRequest) -> Result<DetectionReport> {
        self.detect_gray(&luma_bt601(img), request)
    }

    /// Detect on an 8-bit grayscale image.
    #[instrument(
        level = "debug",
        skip(self, gray, request),
        fields(w = gray.width(), h = gray.height(), zones = request.zones.len())
    )]
    pub fn detect_gray(&self, gray: &GrayImage, request: &DetectRequest) -> Result<DetectionReport> {
        request.validate()?;

        let normalized = normalize_image(gray, &self.params)?;
        let baseline = reference_baseline_image(&normalized, request.reference, &self.params)?;
        info!(baseline, reference = %request.reference, "reference calibrated");

        let zones = analyze_zones(&normalized, baseline, request, &self.params);
        let result = aggregate(&zones);

        let annotated = self
            .overlay
            .then(|| render_overlay(&normalized, request.reference, &zones, &self.style));

        Ok(DetectionReport {
            result,
            baseline,
            zones,
            annotated,
        })
    }
}

/// Analyze all zones of `request`, outcomes in input order.
pub fn analyze_zones(
    normalized: &GrayImage,
    baseline: f32,
    request: &DetectRequest,
    params: &DetectParams,
) -> Vec<ZoneOutcome> {
    let run = |(index, zone): (usize, &Zone)| {
        let min_area = params.min_area_for(zone, request);
        analyze_zone(normalized, baseline, index, zone, min_area, params)
    };

    #[cfg(feature = "rayon")]
    let outcomes = request.zones.par_iter().enumerate().map(run).collect();

    #[cfg(not(feature = "rayon"))]
    let outcomes = request.zones.iter().enumerate().map(run).collect();

    outcomes
}

/// Compose per-zone outcomes into the result mapping.
pub fn aggregate(outcomes: &[ZoneOutcome]) -> DetectionResult {
    outcomes
        .iter()
        .map(|o| (o.name.as_str(), o.present()))
        .collect()
}

/// Verdicts only, with default parameters and no overlay.
pub fn detect_zones(gray: &GrayImage, request: &DetectRequest) -> Result<DetectionResult> {
    ZoneDetector::default()
        .with_overlay(false)
        .detect_gray(gray, request)
        .map(|report| report.result)
}
