//! Fixed-level binarization of a cropped window.

use crate::region::Roi;

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

/// Crop `roi` out of a row-major `w`-wide buffer and binarize it:
/// `v >= baseline` becomes [`FOREGROUND`], everything else [`BACKGROUND`].
///
/// The output is `roi.width() × roi.height()`, row-major.
pub fn threshold_roi_u8(img: &[u8], w: usize, roi: Roi, baseline: f32) -> Vec<u8> {
    let mut out = Vec::with_capacity(roi.area());
    for y in roi.y0..roi.y1 {
        let row = &img[y * w + roi.x0..y * w + roi.x1];
        out.extend(row.iter().map(|&v| {
            if f32::from(v) >= baseline {
                FOREGROUND
            } else {
                BACKGROUND
            }
        }));
    }
    out
}
