//! Headless heart backdrop run
//!
//! Mounts the scene on a simulated host with the recording device, animates
//! a number of frames, resizes the viewport halfway through and unmounts.
//! The device ledger at the end shows whether every resource was released.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::Parser;
use heartcare_scene::heartcare::{Result, SceneConfig};
use heartcare_scene::heartcare::host::{SimulatedContainer, SimulatedHost};
use heartcare_scene::heartcare::render::RecordingDevice;
use heartcare_scene::heartcare::scene::SceneHandle;
use heartcare_scene::{scene_bail, scene_err, scene_info, scene_warn};

const SOURCE: &str = "heartcare::Demo";
const DEFAULT_FRAMES: usize = 240;

#[derive(Parser, Debug)]
#[command(name = "heartcare_demo")]
#[command(about = "Animate the heart backdrop headlessly and check that teardown releases everything")]
struct Cli {
    /// TOML scene configuration (defaults to the layered backdrop)
    config: Option<PathBuf>,

    /// Number of frames to animate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: usize,

    /// Layout seed, overriding the one in the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|e| {
                scene_err!(InvalidConfig, SOURCE, "cannot read {}: {}", path.display(), e)
            })?;
            SceneConfig::from_toml_str(&text)
        }
        None => Ok(SceneConfig::default()),
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.dump_config {
        println!("{}", SceneConfig::default().to_toml_string()?);
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let device = RecordingDevice::new();
    let ledger = device.ledger();
    let host = Arc::new(SimulatedHost::new(1280, 720));
    let container = Arc::new(SimulatedContainer::new());

    let handle = SceneHandle::mount(config, Box::new(device), host.clone(), container.clone())?;
    scene_info!(SOURCE, "Running {} frames", cli.frames);

    host.run_frames(cli.frames / 2);
    host.resize(1920, 1080);
    host.run_frames(cli.frames - cli.frames / 2);

    let (width, height) = handle.surface_size();
    scene_info!(SOURCE, "t = {:.2}, {} frames rendered, surface {}x{}, aspect {:.3}",
        handle.time(), handle.frames_rendered(), width, height, handle.camera_aspect());

    let report = handle.unmount();
    for failure in &report.failures {
        scene_warn!(SOURCE, "Teardown step failed: {}", failure);
    }

    let ledger = ledger.snapshot();
    scene_info!(SOURCE, "Geometries {}/{} released, materials {}/{} released, {} draw calls",
        ledger.geometries_disposed, ledger.geometries_created,
        ledger.materials_disposed, ledger.materials_created, ledger.render_calls);

    if !ledger.is_balanced() {
        scene_bail!(TeardownPartialFailure, SOURCE, "{} geometries and {} materials leaked",
            ledger.live_geometries(), ledger.live_materials());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    // Errors are logged where they are built
    if run(&cli).is_err() {
        std::process::exit(1);
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
