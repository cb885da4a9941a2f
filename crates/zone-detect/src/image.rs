//! Luma conversion and `image::GrayImage` wrappers over the slice-based core
//! primitives.

use image::{DynamicImage, GrayImage};
use zone_detect_core::calibrate::reference_baseline_u8;
use zone_detect_core::normalize::clahe_u8;
use zone_detect_core::{DetectParams, Region, Result};

/// 8-bit luma with BT.601 weights (`0.299 R + 0.587 G + 0.114 B`) in
/// 14-bit fixed point, rounded to nearest. Grayscale input is passed through
/// unchanged and alpha is ignored.
#[must_use]
pub fn luma_bt601(img: &DynamicImage) -> GrayImage {
    if let Some(gray) = img.as_luma8() {
        return gray.clone();
    }
    let rgb = img.to_rgb8();
    let data = rgb
        .pixels()
        .map(|p| {
            let [r, g, b] = p.0.map(u32::from);
            ((r * 4899 + g * 9617 + b * 1868 + (1 << 13)) >> 14) as u8
        })
        .collect();
    GrayImage::from_raw(rgb.width(), rgb.height(), data).expect("one luma sample per pixel")
}

/// CLAHE-normalize an `image::GrayImage`.
#[inline]
pub fn normalize_image(img: &GrayImage, params: &DetectParams) -> Result<GrayImage> {
    let data = clahe_u8(
        img.as_raw(),
        img.width() as usize,
        img.height() as usize,
        params,
    )?;
    Ok(GrayImage::from_raw(img.width(), img.height(), data).expect("CLAHE keeps dimensions"))
}

/// Threshold baseline of the reference region of an `image::GrayImage`.
#[inline]
pub fn reference_baseline_image(
    img: &GrayImage,
    reference: Region,
    params: &DetectParams,
) -> Result<f32> {
    reference_baseline_u8(
        img.as_raw(),
        img.width() as usize,
        img.height() as usize,
        reference,
        params,
    )
}
