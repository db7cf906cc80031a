//! hand_paint — interactive entry point.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hand_paint::app::run;
use log::info;
use paint_grid::PaintConfig;

/// Paint on a grid by raising your index finger.
#[derive(Parser, Debug)]
#[command(name = "hand_paint", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Cells per side of the grid
    #[arg(long, value_name = "N")]
    grid_size: Option<u32>,

    /// Finger-up distance in pixels
    #[arg(long, value_name = "PX")]
    threshold: Option<f32>,

    /// Frame width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Show the frame unmirrored
    #[arg(long)]
    no_mirror: bool,
}

impl Cli {
    /// File (or defaults), then flags on top.
    fn into_config(self) -> anyhow::Result<PaintConfig> {
        let mut cfg = match &self.config {
            Some(path) => PaintConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => PaintConfig::default(),
        };
        if let Some(n) = self.grid_size { cfg.grid.size = n; }
        if let Some(t) = self.threshold { cfg.gesture.threshold = t; }
        if let Some(w) = self.width     { cfg.frame.width = w; }
        if let Some(h) = self.height    { cfg.frame.height = h; }
        if self.no_mirror               { cfg.display.mirror = false; }
        cfg.validate().context("Invalid configuration")?;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Hand Paint — finger-driven grid painting            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Mouse simulation  (use --features leap for hardware)");
    println!();

    let cfg = Cli::parse().into_config()?;
    info!(
        "frame {}x{}, grid {}x{}, threshold {} px, mirror {}",
        cfg.frame.width, cfg.frame.height, cfg.grid.size, cfg.grid.size,
        cfg.gesture.threshold, cfg.display.mirror,
    );

    run(cfg).context("hand_paint stopped with an error")?;
    Ok(())
}
