use anyhow::Context;
use image::{GrayImage, Luma};
use std::path::PathBuf;
use std::time::Instant;
use zone_detect::{DetectRequest, Region, Zone, ZoneDetector};

/// Gray calibration strip on the left, two indicator slots on the right:
/// slot "a" lit (white block), slot "b" dark.
fn synthetic_frame() -> GrayImage {
    GrayImage::from_fn(320, 240, |x, y| {
        if x < 100 {
            Luma([120u8])
        } else if (150..210).contains(&x) && (40..100).contains(&y) {
            Luma([250u8])
        } else {
            Luma([15u8])
        }
    })
}

fn main() -> anyhow::Result<()> {
    let out: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "synthetic_frame.zones.png".to_string())
        .into();

    let img = synthetic_frame();
    let request = DetectRequest::new(Region::new(10, 10, 80, 230))
        .with_min_area(1000.0)
        .with_zone(Zone::new("a", Region::new(130, 20, 230, 120)))
        .with_zone(Zone::new("b", Region::new(130, 130, 230, 230)));

    let started = Instant::now();
    let report = ZoneDetector::default().detect_gray(&img, &request)?;
    let ms = started.elapsed().as_secs_f64() * 1000.0;

    println!("image {}x{} pixels", img.width(), img.height());
    println!("detect: {:5.2} ms, baseline {:.1}", ms, report.baseline);
    for zone in &report.zones {
        println!(" - {:>3}: {:?} ({} contours)", zone.name, zone.status, zone.contours);
    }
    println!("{}", serde_json::to_string_pretty(&report.result)?);

    let canvas = report.annotated.context("overlay is enabled by default")?;
    canvas.save(&out)?;
    println!("Saved visualization to {}", out.display());
    Ok(())
}
