//! Application entry point for the procedural tree viewer.
//!
//! This binary parses the command line, sets up logging and eframe/egui,
//! and delegates all interactive logic and rendering to [`Viewer`] from the
//! `viewer` module.

mod painter;
mod viewer;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tree_core::config::TreeConfig;
use viewer::Viewer;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "tree-view", about = "Grow and draw a procedural 2D tree")]
struct Args {
    /// JSON file with the tree parameters; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the first tree; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the config file cannot be loaded, or eframe fails to create
///   the native window or event loop.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let cfg: TreeConfig<egui::Color32> = match &args.config {
        Some(path) => TreeConfig::load(path)
            .with_context(|| format!("loading tree parameters from {}", path.display()))?,
        None => Viewer::default_config(),
    };
    let seed = args.seed.unwrap_or_else(|| u64::from(rand::random::<u32>()));
    tracing::info!(seed, iterations = cfg.iterations, "starting viewer");

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Procedural Tree",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg, seed)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
