//! Per-zone shape-presence decision.
//!
//! Every zone is cropped from the normalized image, binarized against the
//! shared baseline and traced for contours. The first contour (in extraction
//! order) whose area reaches the zone's minimum area decides the zone; later
//! contours are never looked at, so a zone reports at most one detection.

use image::GrayImage;
use imageproc::geometry::contour_area;
use serde::Serialize;
use tracing::{debug, info, warn};
use zone_detect_core::threshold::threshold_roi_u8;
use zone_detect_core::{DetectParams, Region, Zone};

use crate::contour::{approximate_polygon, extract_contours, BoundingBox, Polygon};

/// Terminal state of one zone analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStatus {
    /// A contour reached the minimum area.
    Matched,
    /// Contours were exhausted without reaching the minimum area.
    NoMatch,
    /// The zone region is inverted, empty or outside the image.
    Degenerate,
}

/// The contour that decided a zone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Detection {
    /// Enclosed area of the traced contour, in pixels.
    pub area: f64,
    /// Bounding box of the approximated polygon, in image coordinates.
    pub bbox: BoundingBox,
    /// Vertex count of the approximated polygon.
    pub vertices: usize,
}

/// Everything one zone analysis produced.
///
/// Doubles as the draw command for the overlay, which consumes outcomes in
/// zone input order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZoneOutcome {
    /// Position of the zone in the request; selects the overlay color.
    pub index: usize,
    pub name: String,
    pub region: Region,
    pub min_area: f64,
    pub status: ZoneStatus,
    pub contours: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<Detection>,
}

impl ZoneOutcome {
    /// Verdict reported in the result mapping.
    #[inline]
    pub fn present(&self) -> bool {
        self.status == ZoneStatus::Matched
    }
}

/// Analyze one zone of the normalized image against `baseline`.
///
/// Never fails: a region that cannot be cropped yields a
/// [`ZoneStatus::Degenerate`] outcome with a `false` verdict.
pub fn analyze_zone(
    normalized: &GrayImage,
    baseline: f32,
    index: usize,
    zone: &Zone,
    min_area: f64,
    params: &DetectParams,
) -> ZoneOutcome {
    let mut outcome = ZoneOutcome {
        index,
        name: zone.name.clone(),
        region: zone.region,
        min_area,
        status: ZoneStatus::Degenerate,
        contours: 0,
        detection: None,
    };

    let roi = match zone.region.roi(normalized.width(), normalized.height()) {
        Ok(roi) => roi,
        Err(err) => {
            warn!(zone = %zone.name, region = %zone.region, %err, "zone cannot be analyzed");
            return outcome;
        }
    };

    let binary = threshold_roi_u8(
        normalized.as_raw(),
        normalized.width() as usize,
        roi,
        baseline,
    );
    let binary = GrayImage::from_raw(roi.width() as u32, roi.height() as u32, binary)
        .expect("binarized crop matches its roi");

    let contours = extract_contours(&binary);
    debug!(zone = %zone.name, contours = contours.len(), min_area, "contours extracted");
    outcome.contours = contours.len();

    outcome.detection = first_qualifying(&contours, min_area, params.approx_epsilon)
        .map(|d| Detection {
            bbox: d.bbox.translate(roi.x0 as i32, roi.y0 as i32),
            ..d
        });
    outcome.status = match &outcome.detection {
        Some(d) => {
            info!(zone = %zone.name, area = d.area, "shape detected");
            ZoneStatus::Matched
        }
        None => ZoneStatus::NoMatch,
    };
    outcome
}

/// First contour whose area is at least `min_area`, approximated and boxed
/// in the contours' own coordinate frame.
pub fn first_qualifying(
    contours: &[Polygon],
    min_area: f64,
    approx_epsilon: f64,
) -> Option<Detection> {
    contours.iter().find_map(|contour| {
        let area = contour_area(contour);
        if area < min_area {
            return None;
        }
        let approx = approximate_polygon(contour, approx_epsilon);
        let bbox = BoundingBox::enclosing(&approx)?;
        Some(Detection {
            area,
            bbox,
            vertices: approx.len(),
        })
    })
}
