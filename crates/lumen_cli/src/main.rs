//! Lumen - render the default scene to an image file.

mod cli;
mod world;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use lumen_math::Vec3;
use lumen_renderer::{Camera, Renderer};
use std::time::Instant;

use crate::cli::Args;
use crate::world::construct_default_world;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from(args.log_level))
        .init();

    let config = args.render_config();
    config.validate().context("invalid render settings")?;

    log::info!("Image dimensions: {}x{}", config.width, config.height);
    log::info!("Thread count: {}", config.thread_count);
    log::info!("Sample count: {}", config.samples);

    let camera = Camera::new(
        Vec3::new(13.0, 2.0, 3.0),
        Vec3::ZERO,
        Vec3::Y,
        20.0,
        config.aspect_ratio(),
    );

    log::info!("Constructing default world (seed {})", args.seed);
    let scene = construct_default_world(args.seed).context("failed to build default world")?;

    let start = Instant::now();
    let renderer = Renderer::new(config)?;
    let image = renderer.render(&camera, &scene)?;
    log::info!("Render time: {:.3}s", start.elapsed().as_secs_f64());

    log::info!("Saving image {}", args.output.display());
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("Complete");

    Ok(())
}
