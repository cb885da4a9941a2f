use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use zone_detect::analyze::analyze_zone;
use zone_detect::{
    detect_zones, luma_bt601, normalize_image, reference_baseline_image, BoundingBox, DetectRequest,
    ErrorKind, OverlayStyle, Region, Zone, ZoneDetector, ZoneStatus, PALETTE,
};

const W: u32 = 200;
const H: u32 = 200;

/// Left half mid-gray (reference surface), right half black, with white
/// rectangles `(x, y, w, h)` painted on top.
fn make_frame(blobs: &[(u32, u32, u32, u32)]) -> GrayImage {
    GrayImage::from_fn(W, H, |x, y| {
        let inside = blobs
            .iter()
            .any(|&(bx, by, bw, bh)| x >= bx && x < bx + bw && y >= by && y < by + bh);
        if inside {
            Luma([255u8])
        } else if x < W / 2 {
            Luma([127u8])
        } else {
            Luma([0u8])
        }
    })
}

fn reference() -> Region {
    Region::new(10, 10, 60, 190)
}

fn zone_square() -> Zone {
    Zone::new("square", Region::new(110, 20, 190, 110))
}

fn zone_dark() -> Zone {
    Zone::new("dark", Region::new(110, 130, 190, 190))
}

#[test]
fn white_square_above_min_area_is_detected() {
    // 40x50 = 2000 px
    let img = make_frame(&[(120, 40, 40, 50)]);
    let request = DetectRequest::new(reference())
        .with_min_area(1000.0)
        .with_zone(zone_square());

    let report = ZoneDetector::default().detect_gray(&img, &request).unwrap();
    assert_eq!(report.result.get("square"), Some(true));
    assert!(report.baseline > 127.0 && report.baseline < 200.0);

    let d = report.zones[0].detection.expect("matched zone has a detection");
    assert_eq!(
        d.bbox,
        BoundingBox {
            x: 120,
            y: 40,
            width: 40,
            height: 50
        }
    );
    assert_eq!(d.area, 39.0 * 49.0);
}

#[test]
fn white_square_below_min_area_is_rejected() {
    // 20x25 = 500 px
    let img = make_frame(&[(120, 40, 20, 25)]);
    let request = DetectRequest::new(reference())
        .with_min_area(1000.0)
        .with_zone(zone_square());
    let result = detect_zones(&img, &request).unwrap();
    assert_eq!(result.get("square"), Some(false));
}

#[test]
fn black_zone_has_no_contours() {
    let img = make_frame(&[(120, 40, 40, 50)]);
    let request = DetectRequest::new(reference()).with_zone(zone_dark());
    let report = ZoneDetector::default().detect_gray(&img, &request).unwrap();
    assert_eq!(report.result.get("dark"), Some(false));
    assert_eq!(report.zones[0].status, ZoneStatus::NoMatch);
    assert_eq!(report.zones[0].contours, 0);
}

#[test]
fn only_first_of_two_qualifying_blobs_is_reported() {
    let img = make_frame(&[(120, 30, 40, 30), (125, 130, 50, 40)]);
    let request = DetectRequest::new(reference())
        .with_zone(Zone::new("both", Region::new(110, 20, 190, 190)).with_min_area(500.0));
    let report = ZoneDetector::default().detect_gray(&img, &request).unwrap();

    let outcome = &report.zones[0];
    assert!(outcome.present());
    assert_eq!(outcome.contours, 2);
    let bbox = outcome.detection.unwrap().bbox;
    assert_eq!((bbox.x, bbox.y, bbox.width, bbox.height), (120, 30, 40, 30));

    // the second blob is never boxed
    let canvas = report.annotated.unwrap();
    assert_eq!(*canvas.get_pixel(120, 45), PALETTE[0]);
    assert_eq!(*canvas.get_pixel(125, 150), Rgb([255, 255, 255]));
}

#[test]
fn zone_min_area_overrides_request_and_default() {
    let img = make_frame(&[(120, 40, 40, 50)]); // contour area 1911

    let strict_zone = DetectRequest::new(reference())
        .with_min_area(100.0)
        .with_zone(zone_square().with_min_area(2000.0));
    assert_eq!(detect_zones(&img, &strict_zone).unwrap().get("square"), Some(false));

    let lenient_zone = DetectRequest::new(reference())
        .with_min_area(5000.0)
        .with_zone(zone_square().with_min_area(1500.0));
    assert_eq!(detect_zones(&img, &lenient_zone).unwrap().get("square"), Some(true));

    let request_only = DetectRequest::new(reference())
        .with_min_area(5000.0)
        .with_zone(zone_square());
    assert_eq!(detect_zones(&img, &request_only).unwrap().get("square"), Some(false));

    // default 1000
    let defaults = DetectRequest::new(reference()).with_zone(zone_square());
    let report = ZoneDetector::default().detect_gray(&img, &defaults).unwrap();
    assert_eq!(report.zones[0].min_area, 1000.0);
    assert_eq!(report.result.get("square"), Some(true));
}

#[test]
fn raising_min_area_never_turns_false_into_true() {
    let img = make_frame(&[(120, 40, 40, 50)]);
    let verdicts: Vec<bool> = [10.0, 500.0, 1000.0, 1911.0, 1911.5, 4000.0, 1e9]
        .into_iter()
        .map(|area| {
            let request = DetectRequest::new(reference())
                .with_zone(zone_square().with_min_area(area));
            detect_zones(&img, &request).unwrap().get("square").unwrap()
        })
        .collect();
    assert_eq!(verdicts, vec![true, true, true, true, false, false, false]);
}

#[test]
fn result_has_one_entry_per_zone_in_input_order() {
    let img = make_frame(&[(120, 40, 40, 50)]);
    let request = DetectRequest::new(reference())
        .with_zone(zone_dark())
        .with_zone(Zone::new("gray", Region::new(10, 10, 90, 90)))
        .with_zone(zone_square());
    let result = detect_zones(&img, &request).unwrap();
    assert_eq!(
        result.names().collect::<Vec<_>>(),
        vec!["dark", "gray", "square"]
    );

    let empty = DetectRequest::new(reference());
    assert!(detect_zones(&img, &empty).unwrap().is_empty());
}

#[test]
fn zones_do_not_influence_each_other() {
    let img = make_frame(&[(120, 40, 40, 50)]);
    let full = DetectRequest::new(reference())
        .with_zone(zone_square())
        .with_zone(zone_dark())
        .with_zone(Zone::new("edge", Region::new(150, 150, 260, 190)));
    let reordered = DetectRequest::new(reference())
        .with_zone(zone_dark())
        .with_zone(zone_square());

    let a = detect_zones(&img, &full).unwrap();
    let b = detect_zones(&img, &reordered).unwrap();
    for name in ["square", "dark"] {
        assert_eq!(a.get(name), b.get(name), "zone {name}");
    }
}

#[test]
fn out_of_bounds_zone_degrades_to_false() {
    let img = make_frame(&[(120, 40, 40, 50)]);
    let request = DetectRequest::new(reference())
        .with_zone(Zone::new("outside", Region::new(150, 150, 260, 190)))
        .with_zone(Zone::new("inverted", Region::new(150, 40, 120, 90)))
        .with_zone(zone_square());
    let report = ZoneDetector::default().detect_gray(&img, &request).unwrap();
    assert_eq!(report.result.get("outside"), Some(false));
    assert_eq!(report.result.get("inverted"), Some(false));
    assert_eq!(report.zones[0].status, ZoneStatus::Degenerate);
    assert_eq!(report.zones[1].status, ZoneStatus::Degenerate);
    assert_eq!(report.result.get("square"), Some(true));
}

#[test]
fn zones_far_outside_the_frame_do_not_break_the_overlay() {
    let img = make_frame(&[(120, 40, 40, 50)]);
    let request = DetectRequest::new(reference())
        .with_zone(Zone::new("wide", Region::new(0, 0, i32::MAX, 10)))
        .with_zone(Zone::new("everywhere", Region::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX)))
        .with_zone(Zone::new("far", Region::new(1_000_000, 5, 2_000_000, 50)))
        .with_zone(zone_square());
    let detector = ZoneDetector::default().with_overlay(true);
    let report = detector.detect_gray(&img, &request).unwrap();

    for i in 0..3 {
        assert_eq!(report.zones[i].status, ZoneStatus::Degenerate);
    }
    assert_eq!(report.result.get("wide"), Some(false));
    assert_eq!(report.result.get("square"), Some(true));

    let canvas = report.annotated.unwrap();
    assert_eq!(canvas.dimensions(), (W, H));
    // the part of the "wide" outline that lies on the frame is still drawn
    assert_eq!(*canvas.get_pixel(150, 10), PALETTE[0]);
}

#[test]
fn color_frames_use_bt601_luma() {
    let red = Rgb([255u8, 0, 0]);
    let color = RgbImage::from_fn(W, H, |x, y| {
        if (120..160).contains(&x) && (40..90).contains(&y) {
            Rgb([255, 255, 255])
        } else if x < W / 2 {
            red
        } else {
            Rgb([0, 0, 0])
        }
    });
    let color = DynamicImage::ImageRgb8(color);
    let gray = luma_bt601(&color);
    assert_eq!(gray.get_pixel(10, 10)[0], 76);
    assert_eq!(gray.get_pixel(130, 50)[0], 255);

    let request = DetectRequest::new(reference()).with_zone(zone_square());
    let detector = ZoneDetector::default().with_overlay(false);
    let from_color = detector.detect(&color, &request).unwrap();
    let from_gray = detector.detect_gray(&gray, &request).unwrap();
    assert_eq!(from_color.baseline, from_gray.baseline);
    assert_eq!(from_color.zones, from_gray.zones);
    assert_eq!(from_color.result.get("square"), Some(true));
}

#[test]
fn invalid_reference_fails_the_request() {
    let img = make_frame(&[]);
    for region in [Region::new(0, 0, 201, 50), Region::new(50, 50, 10, 60)] {
        let request = DetectRequest::new(region).with_zone(zone_square());
        let err = detect_zones(&img, &request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}

#[test]
fn empty_image_is_an_input_error() {
    let img = GrayImage::new(0, 0);
    let request = DetectRequest::new(Region::new(0, 0, 1, 1));
    let err = detect_zones(&img, &request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn repeated_runs_are_identical() {
    let img = make_frame(&[(120, 40, 40, 50), (112, 100, 9, 9)]);
    let request = DetectRequest::new(reference())
        .with_zone(zone_square())
        .with_zone(zone_dark());
    let detector = ZoneDetector::default();
    let first = detector.detect_gray(&img, &request).unwrap();
    let second = detector.detect_gray(&img, &request).unwrap();
    assert_eq!(first.result, second.result);
    assert_eq!(first.zones, second.zones);
    assert_eq!(first.annotated, second.annotated);
}

#[test]
fn color_input_matches_gray_input() {
    let gray = make_frame(&[(120, 40, 40, 50)]);
    let color = DynamicImage::ImageLuma8(gray.clone()).to_rgb8();
    let request = DetectRequest::new(reference()).with_zone(zone_square());
    let detector = ZoneDetector::default().with_overlay(false);
    let from_color = detector
        .detect(&DynamicImage::ImageRgb8(color), &request)
        .unwrap();
    let from_gray = detector.detect_gray(&gray, &request).unwrap();
    assert_eq!(from_color.result, from_gray.result);
    assert!(from_color.annotated.is_none());
}

#[test]
fn overlay_marks_reference_and_zones() {
    let img = make_frame(&[(120, 40, 40, 50)]);
    let request = DetectRequest::new(reference())
        .with_zone(zone_square())
        .with_zone(zone_dark());
    let report = ZoneDetector::default().detect_gray(&img, &request).unwrap();
    let canvas = report.annotated.unwrap();
    assert_eq!(canvas.dimensions(), (W, H));
    assert_eq!(*canvas.get_pixel(10, 100), Rgb([255, 255, 255]));
    assert_eq!(*canvas.get_pixel(110, 60), PALETTE[0]);
    assert_eq!(*canvas.get_pixel(110, 160), PALETTE[1]);
    // tight box around the detected square
    assert_eq!(*canvas.get_pixel(120, 65), PALETTE[0]);
}

#[test]
fn batched_zones_match_one_by_one_analysis() {
    let img = make_frame(&[(120, 40, 40, 50), (112, 140, 30, 30)]);
    let zones = [
        zone_square(),
        zone_dark(),
        Zone::new("gray", Region::new(10, 10, 90, 90)),
        Zone::new("outside", Region::new(150, 150, 260, 190)),
    ];
    let mut request = DetectRequest::new(reference()).with_min_area(300.0);
    for zone in &zones {
        request = request.with_zone(zone.clone());
    }

    let detector = ZoneDetector::default();
    let report = detector.detect_gray(&img, &request).unwrap();

    let normalized = normalize_image(&img, &detector.params).unwrap();
    let baseline = reference_baseline_image(&normalized, reference(), &detector.params).unwrap();
    assert_eq!(baseline, report.baseline);
    let one_by_one: Vec<_> = zones
        .iter()
        .enumerate()
        .map(|(i, zone)| {
            let min_area = detector.params.min_area_for(zone, &request);
            analyze_zone(&normalized, baseline, i, zone, min_area, &detector.params)
        })
        .collect();
    assert_eq!(report.zones, one_by_one);
}

#[test]
fn custom_style_changes_stroke_width() {
    let img = make_frame(&[(120, 40, 40, 50)]);
    let request = DetectRequest::new(reference()).with_zone(zone_square());
    let thin = OverlayStyle {
        reference_thickness: 1,
        zone_thickness: 1,
        detection_thickness: 1,
    };
    let canvas = ZoneDetector::default()
        .with_style(thin)
        .detect_gray(&img, &request)
        .unwrap()
        .annotated
        .unwrap();
    assert_eq!(*canvas.get_pixel(110, 60), PALETTE[0]);
    assert_ne!(*canvas.get_pixel(108, 60), PALETTE[0]);
    assert_eq!(*canvas.get_pixel(120, 65), PALETTE[0]);
    assert_ne!(*canvas.get_pixel(121, 65), PALETTE[0]);
}
