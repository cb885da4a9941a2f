//! Reference-region calibration of the binarization threshold.

use crate::error::{check_buffer, DetectError, Result};
use crate::region::{Region, Roi};
use crate::DetectParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Mean intensity of `roi` in a row-major `w`-wide buffer.
pub fn roi_mean_u8(img: &[u8], w: usize, roi: Roi) -> f64 {
    let mut sum = 0u64;
    for y in roi.y0..roi.y1 {
        let row = &img[y * w + roi.x0..y * w + roi.x1];
        sum += row.iter().map(|&v| u64::from(v)).sum::<u64>();
    }
    sum as f64 / roi.area() as f64
}

/// Threshold baseline: mean of the reference region plus
/// `params.reference_offset`, saturated to the 8-bit range.
///
/// The reference region must lie inside the image; every zone depends on
/// this value, so a bad reference fails the whole request.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img, params))
)]
pub fn reference_baseline_u8(
    img: &[u8],
    w: usize,
    h: usize,
    reference: Region,
    params: &DetectParams,
) -> Result<f32> {
    check_buffer(img, w, h)?;
    let roi = reference
        .roi(w as u32, h as u32)
        .map_err(|source| DetectError::Reference {
            region: reference,
            source,
        })?;
    let mean = roi_mean_u8(img, w, roi);
    Ok((mean as f32 + params.reference_offset).clamp(0.0, 255.0))
}
