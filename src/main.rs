use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::Parser;
use log::{info, warn};
use nextar_placement::capability;
use nextar_placement::pose::PoseNormalizer;
use nextar_placement::source::SourceDescriptors;

use crate::rendering::headless::LogRenderer;
use crate::rendering::loader::model_loader::ModelLoader;
use crate::session::application::{ARApplication, SessionOutcome};
use crate::settings::CliArgs;
use crate::tracking::scripted::{ScriptConfig, ScriptedTarget, ScriptedTracker};

pub mod entity;
mod io;
mod rendering;
mod session;
mod settings;
pub mod tracking;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    log::trace!("Starting with args: {:?}", args);

    capability::check(args.platform_api_level, &args.graphics_version).context("This device can't run a session")?;

    let normalizer = PoseNormalizer::new(args.asset.profile()).context("Invalid asset profile")?;
    let location = SourceDescriptors::from_bundle(&args.model_source.to_bundle()).resolve();
    let model_loader = Arc::new(ModelLoader::new().context("Could not set up the model loader")?);

    let mut app = ARApplication::new(
        location,
        normalizer,
        model_loader,
        Duration::from_secs(args.load_timeout_secs),
    )?;

    let target = match args.image {
        Some(identity) => ScriptedTarget::Image {
            identity,
            extent: args.image_extent.clone().into(),
        },
        None => ScriptedTarget::Plane,
    };
    let mut tracker = ScriptedTracker::new(ScriptConfig {
        frames: args.frames,
        frame_interval: Duration::from_millis(args.frame_interval_ms),
        anchor_position: args.anchor.clone().into(),
        target,
    });
    let mut renderer = LogRenderer::new();

    match app.run(&mut tracker, &mut renderer)? {
        SessionOutcome::Attached => info!(
            "Model placed: {} model(s) in the scene, {} uploaded, {} draw calls",
            app.scene().model_count(),
            renderer.upload_count(),
            renderer.draw_count()
        ),
        SessionOutcome::NothingPlaced => warn!("The session ended before anything was placed"),
        SessionOutcome::StillLoading => warn!("The session ended while the model was still loading"),
        SessionOutcome::LoadFailed(reason) => bail!("Model could not be loaded: {}", reason),
    }

    info!("Final state: {}", app.state());
    Ok(())
}
