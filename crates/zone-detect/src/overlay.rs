//! Audit overlay: reference region, zone outlines and detection boxes drawn
//! onto an RGB rendering of the normalized image.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use zone_detect_core::Region;

use crate::analyze::ZoneOutcome;

/// Zone colors, cycled by zone index.
pub const PALETTE: [Rgb<u8>; 3] = [Rgb([255, 0, 0]), Rgb([255, 255, 0]), Rgb([0, 255, 0])];

/// Reference region color.
pub const REFERENCE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Color of the zone at position `index` in the request.
#[inline]
pub fn zone_color(index: usize) -> Rgb<u8> {
    PALETTE[index % PALETTE.len()]
}

/// Stroke widths of the overlay, in pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayStyle {
    pub reference_thickness: u32,
    pub zone_thickness: u32,
    pub detection_thickness: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            reference_thickness: 5,
            zone_thickness: 5,
            detection_thickness: 2,
        }
    }
}

/// Render `normalized` to RGB and draw the reference region, then each zone
/// outline and its detection box (if any) in input order.
pub fn render_overlay(
    normalized: &GrayImage,
    reference: Region,
    outcomes: &[ZoneOutcome],
    style: &OverlayStyle,
) -> RgbImage {
    let mut canvas = RgbImage::from_fn(normalized.width(), normalized.height(), |x, y| {
        let v = normalized.get_pixel(x, y)[0];
        Rgb([v, v, v])
    });

    draw_region(&mut canvas, reference, style.reference_thickness, REFERENCE_COLOR);
    for outcome in outcomes {
        let color = zone_color(outcome.index);
        draw_region(&mut canvas, outcome.region, style.zone_thickness, color);
        if let Some(d) = &outcome.detection {
            let b = d.bbox;
            let corners = Region::new(b.x, b.y, b.x + b.width as i32, b.y + b.height as i32);
            draw_region(&mut canvas, corners, style.detection_thickness, color);
        }
    }
    canvas
}

/// Outline between the corner pixels `(x1, y1)` and `(x2, y2)`, stroke
/// centered on the outline and clipped to the canvas.
///
/// Each stroke ring is clamped to one pixel past the canvas on every side
/// before it reaches `draw_hollow_rect_mut`, so arbitrarily large regions
/// cost no more than a canvas-sized outline.
fn draw_region(canvas: &mut RgbImage, region: Region, thickness: u32, color: Rgb<u8>) {
    let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (x1, x2) = (i64::from(region.x1), i64::from(region.x2));
    let (y1, y2) = (i64::from(region.y1), i64::from(region.y2));
    let (left, right) = (x1.min(x2), x1.max(x2));
    let (top, bottom) = (y1.min(y2), y1.max(y2));
    let t = i64::from(thickness.max(1));
    let inner = -(t / 2);
    for grow in inner..inner + t {
        let (x0, y0, x1, y1) = (left - grow, top - grow, right + grow, bottom + grow);
        if x1 < x0 || y1 < y0 || x1 < 0 || y1 < 0 || x0 >= w || y0 >= h {
            continue;
        }
        let (x0, x1) = (x0.max(-1), x1.min(w));
        let (y0, y1) = (y0.max(-1), y1.min(h));
        let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}
