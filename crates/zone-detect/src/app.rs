//! Shared application-level helpers for the CLI.
//!
//! These functions wire up I/O (load image, JSON/PNG output) around the
//! detection API: an inspection config names the image and carries the
//! request payload, the report goes to JSON and the overlay to PNG.

use crate::analyze::ZoneOutcome;
use crate::detect::ZoneDetector;
use anyhow::{Context, Result};
use image::{GenericImageView, ImageReader};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Write, path::Path, path::PathBuf};
use tracing::info;
use zone_detect_core::{DetectParams, DetectRequest, DetectionResult, Region, Zone};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InspectionConfig {
    pub image: PathBuf,
    #[serde(rename = "ref", alias = "reference")]
    pub reference: Region,
    pub min_area: Option<f64>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    pub output_json: Option<PathBuf>,
    pub output_png: Option<PathBuf>,
    pub clip_limit: Option<f32>,
    pub tile_grid: Option<[usize; 2]>,
    pub reference_offset: Option<f32>,
    pub log_level: Option<String>,
}

impl InspectionConfig {
    /// The request payload carried by this config.
    pub fn request(&self) -> DetectRequest {
        DetectRequest {
            reference: self.reference,
            min_area: self.min_area,
            zones: self.zones.clone(),
        }
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_json
            .clone()
            .unwrap_or_else(|| self.image.with_extension("zones.json"))
    }

    pub fn png_path(&self) -> PathBuf {
        self.output_png
            .clone()
            .unwrap_or_else(|| self.image.with_extension("zones.png"))
    }
}

#[derive(Debug, Serialize)]
pub struct InspectionDump {
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub baseline: f32,
    pub result: DetectionResult,
    pub zones: Vec<ZoneOutcome>,
}

/// Run one inspection: decode the image, detect, write the JSON report and,
/// when `overlay` is set, the annotated PNG.
pub fn run_inspection(cfg: &InspectionConfig, overlay: bool) -> Result<InspectionDump> {
    let img = ImageReader::open(&cfg.image)
        .with_context(|| format!("opening image {}", cfg.image.display()))?
        .decode()
        .with_context(|| format!("decoding image {}", cfg.image.display()))?;

    let params = apply_params_overrides(DetectParams::default(), cfg);
    let detector = ZoneDetector::with_params(params).with_overlay(overlay);

    let report = detector
        .detect(&img, &cfg.request())
        .with_context(|| format!("detecting zones in {}", cfg.image.display()))?;

    let dump = InspectionDump {
        image: cfg.image.to_string_lossy().into_owned(),
        width: img.width(),
        height: img.height(),
        baseline: report.baseline,
        result: report.result,
        zones: report.zones,
    };

    let json_out = cfg.json_path();
    write_json(&json_out, &dump)?;
    info!("report written to {}", json_out.display());

    if let Some(canvas) = report.annotated {
        let png_out = cfg.png_path();
        canvas
            .save(&png_out)
            .with_context(|| format!("writing overlay {}", png_out.display()))?;
        info!("overlay written to {}", png_out.display());
    }

    Ok(dump)
}

fn apply_params_overrides(mut params: DetectParams, cfg: &InspectionConfig) -> DetectParams {
    if let Some(c) = cfg.clip_limit {
        params = params.with_clip_limit(c);
    }
    if let Some([tx, ty]) = cfg.tile_grid {
        params = params.with_tile_grid(tx, ty);
    }
    if let Some(o) = cfg.reference_offset {
        params = params.with_reference_offset(o);
    }
    params
}

pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let mut json_file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(&mut json_file, value)?;
    json_file.write_all(b"\n")?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<InspectionConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let cfg: InspectionConfig = serde_json::from_reader(file)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
