//! zone-detect CLI: report shape presence per image zone.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use zone_detect::app::{load_config, run_inspection};

#[derive(Parser)]
#[command(name = "zone-detect")]
#[command(about = "Report whether a shape is present in each configured image zone")]
#[command(version)]
struct Cli {
    /// Inspection config (JSON): image, ref, zones, min_area, outputs.
    #[arg(long)]
    config: PathBuf,

    /// Override the image path from the config.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Where to write the JSON report.
    #[arg(long)]
    output_json: Option<PathBuf>,

    /// Where to write the annotated PNG.
    #[arg(long)]
    output_png: Option<PathBuf>,

    /// Skip rendering the annotated overlay.
    #[arg(long)]
    no_overlay: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = load_config(&cli.config)?;

    let fallback = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();

    if let Some(image) = cli.image {
        cfg.image = image;
    }
    if cli.output_json.is_some() {
        cfg.output_json = cli.output_json;
    }
    if cli.output_png.is_some() {
        cfg.output_png = cli.output_png;
    }

    tracing::info!("Inspecting {} ({} zones)", cfg.image.display(), cfg.zones.len());
    let dump = run_inspection(&cfg, !cli.no_overlay)?;

    println!("{}", serde_json::to_string_pretty(&dump.result)?);
    Ok(())
}
