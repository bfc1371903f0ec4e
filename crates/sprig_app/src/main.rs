//! # sprig_app: demo driver
//!
//! Runs a small scene through the sprig ECS without a window: a player walks
//! into a wall while a turret fires short-lived pellets, and every sprite is
//! "drawn" to the trace log.
//!
//! ## Startup Sequence
//!
//! 1. Read frame settings from `SPRIG_FRAME_RATE` / `SPRIG_MAX_FRAMES`.
//! 2. Register the texture bundle and populate the registry.
//! 3. Run the fixed-step frame loop, then release resources.

mod frame;
mod game;
mod renderer;
mod systems;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sprig_graphics::ResourceCache;
use sprig_registry::EntityRegistry;

use frame::{FrameConfig, FrameLoop};
use renderer::LogRenderer;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sprig_app=info".parse()?))
        .init();

    let config = FrameConfig::from_env()?;
    info!(?config, "sprig demo starting");

    let mut resources = ResourceCache::new();
    game::load_bundle(&mut resources);

    let mut registry = EntityRegistry::new();
    game::populate(&mut registry, &mut resources)?;

    let scheduler = game::build_scheduler(LogRenderer::new());
    let mut frame_loop = FrameLoop::new(config, registry, scheduler);
    frame_loop.run()?;

    let released = game::unload_bundle(&mut resources);
    info!(
        frames = frame_loop.frame_count(),
        entities = frame_loop.registry().len(),
        released,
        "sprig demo shut down"
    );
    Ok(())
}
