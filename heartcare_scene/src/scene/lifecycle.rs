/// SceneHandle - one mounted scene, from construction to guaranteed release
///
/// `mount` builds everything synchronously, attaches the surface and starts
/// the animation loop. `dispose` tears it down in a fixed order where every
/// step runs even if an earlier one failed. Dropping the handle disposes it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use bitflags::bitflags;
use crate::config::SceneConfig;
use crate::error::{Error, Result};
use crate::host::{Container, Host, ViewportSize};
use crate::render::{RenderDevice, SurfaceId};
use crate::shape::build_heart_outline;
use crate::{scene_debug, scene_err, scene_error, scene_info};
use super::camera::PerspectiveCamera;
use super::driver::{self, DriverState, SceneRuntime, SharedRuntime};
use super::instance::{HeartInstance, Layer};
use super::populator::{populate, release_instances};
use super::rng::SceneRng;
use super::scene::SceneState;

const SOURCE: &str = "heartcare::Lifecycle";

// ============================================================================
// Teardown report
// ============================================================================

bitflags! {
    /// Teardown steps, in execution order
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TeardownSteps: u8 {
        const CANCEL_LOOP       = 1 << 0;
        const REMOVE_LISTENER   = 1 << 1;
        const DETACH_SURFACE    = 1 << 2;
        const DISPOSE_INSTANCES = 1 << 3;
        const DISPOSE_RENDERER  = 1 << 4;
    }
}

/// Outcome of one `dispose` call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeardownReport {
    /// Steps that completed without error
    pub completed: TeardownSteps,
    /// One `TeardownPartialFailure` per failed operation
    pub failures: Vec<Error>,
    /// The scene had been disposed before; nothing ran
    pub already_disposed: bool,
}

impl TeardownReport {
    /// Every step completed
    pub fn is_clean(&self) -> bool {
        self.completed == TeardownSteps::all() && self.failures.is_empty()
    }

    fn fail(&mut self, step: &str, error: Error) {
        let failure = scene_err!(TeardownPartialFailure, SOURCE, "{}: {}", step, error);
        self.failures.push(failure);
    }
}

// ============================================================================
// SceneHandle
// ============================================================================

/// A mounted scene
pub struct SceneHandle {
    runtime: SharedRuntime,
    host: Arc<dyn Host>,
    container: Arc<dyn Container>,
}

impl SceneHandle {
    /// Build the scene into `container` and start animating
    ///
    /// Fatal errors (`InvalidConfig`, `InitializationFailed`,
    /// `RenderSurfaceUnavailable`) are returned after releasing everything
    /// created so far, including `device`. No loop is running in that case.
    pub fn mount(
        config: SceneConfig,
        mut device: Box<dyn RenderDevice>,
        host: Arc<dyn Host>,
        container: Arc<dyn Container>,
    ) -> Result<SceneHandle> {
        scene_info!(SOURCE, "Mounting {:?} scene", config.variant);

        let mut instances = Vec::new();
        let mut attached = None;
        match Self::build(&config, device.as_mut(), host.as_ref(), container.as_ref(), &mut instances, &mut attached) {
            Ok(scene) => {
                let runtime = Arc::new(Mutex::new(SceneRuntime::new(scene, device, config.surface.height_band)));
                let handle = SceneHandle { runtime, host, container };
                handle.begin()?;
                scene_info!(SOURCE, "Scene mounted with {} hearts", config.instance_count());
                Ok(handle)
            }
            Err(e) => {
                scene_error!(SOURCE, "Mount failed, releasing partial scene: {}", e);
                Self::release_partial(device.as_mut(), container.as_ref(), attached, &mut instances);
                Err(e)
            }
        }
    }

    fn build(
        config: &SceneConfig,
        device: &mut dyn RenderDevice,
        host: &dyn Host,
        container: &dyn Container,
        instances: &mut Vec<HeartInstance>,
        attached: &mut Option<SurfaceId>,
    ) -> Result<SceneState> {
        config.validate()?;
        let mut rng = SceneRng::from_seed_option(config.seed);
        scene_debug!(SOURCE, "Layout seed {}", rng.seed());

        let viewport = host.viewport_size();
        let height = config.surface.height_band.unwrap_or(viewport.height);
        if viewport.width == 0 || height == 0 {
            return Err(scene_err!(RenderSurfaceUnavailable, SOURCE,
                "viewport {}x{} has no drawable area", viewport.width, height));
        }
        let surface = device.create_surface(viewport.width, height, &config.surface)?;

        let outline = build_heart_outline();
        instances.extend(populate(device, &outline, &config.extrude, Layer::Background, &config.background, &mut rng)?);
        instances.extend(populate(device, &outline, &config.extrude, Layer::Foreground, &config.foreground, &mut rng)?);
        scene_debug!(SOURCE, "Populated {} background + {} foreground hearts",
            config.background.count, config.foreground.count);

        let camera = PerspectiveCamera::new(&config.camera, viewport.width as f32 / height as f32);
        container.append_child(surface)?;
        *attached = Some(surface);

        Ok(SceneState::assemble(
            std::mem::take(instances),
            config.effective_light_rig(),
            camera,
            surface,
            (viewport.width, height),
            config.time_step,
        ))
    }

    /// Undo a mount that failed halfway; every failed step is logged and skipped
    fn release_partial(
        device: &mut dyn RenderDevice,
        container: &dyn Container,
        attached: Option<SurfaceId>,
        instances: &mut Vec<HeartInstance>,
    ) {
        if let Some(surface) = attached.filter(|surface| container.contains_child(*surface)) {
            if let Err(e) = container.remove_child(surface) {
                scene_error!(SOURCE, "Mount cleanup: detach surface failed: {}", e);
            }
        }
        for e in release_instances(device, instances) {
            scene_error!(SOURCE, "Mount cleanup: dispose instance failed: {}", e);
        }
        if let Err(e) = device.dispose() {
            scene_error!(SOURCE, "Mount cleanup: dispose renderer failed: {}", e);
        }
    }

    /// Register the resize listener and schedule the first frame
    fn begin(&self) -> Result<()> {
        let listener = self.host.add_resize_listener(driver::resize_listener(Arc::downgrade(&self.runtime)));
        driver::lock_runtime(&self.runtime)?.listener = Some(listener);
        driver::start(&self.runtime, &self.host)
    }

    fn runtime(&self) -> MutexGuard<'_, SceneRuntime> {
        self.runtime.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== TEARDOWN =====

    /// Tear the scene down; safe to call any number of times
    ///
    /// Order: cancel loop, remove resize listener, detach surface (only if
    /// still a child of the container), dispose instances, dispose device.
    pub fn dispose(&self) -> TeardownReport {
        let mut report = TeardownReport::default();
        let mut runtime = self.runtime();
        if runtime.disposed {
            scene_debug!(SOURCE, "Scene already disposed");
            report.already_disposed = true;
            return report;
        }
        runtime.disposed = true;

        // 1. Loop
        runtime.cancel(self.host.as_ref());
        report.completed |= TeardownSteps::CANCEL_LOOP;

        // 2. Resize listener
        match runtime.listener.take() {
            Some(id) => match self.host.remove_resize_listener(id) {
                Ok(()) => report.completed |= TeardownSteps::REMOVE_LISTENER,
                Err(e) => report.fail("remove resize listener", e),
            },
            None => report.completed |= TeardownSteps::REMOVE_LISTENER,
        }

        // 3. Surface
        let surface = runtime.scene.surface();
        if self.container.contains_child(surface) {
            match self.container.remove_child(surface) {
                Ok(()) => report.completed |= TeardownSteps::DETACH_SURFACE,
                Err(e) => report.fail("detach surface", e),
            }
        } else {
            scene_debug!(SOURCE, "Surface {:?} no longer in container, skipping detach", surface);
            report.completed |= TeardownSteps::DETACH_SURFACE;
        }

        // 4. Instances
        let mut instances = runtime.scene.take_instances();
        let count = instances.len();
        let failures = release_instances(runtime.device.as_mut(), &mut instances);
        if failures.is_empty() {
            report.completed |= TeardownSteps::DISPOSE_INSTANCES;
        }
        for e in failures {
            report.fail("dispose instance", e);
        }

        // 5. Device
        match runtime.device.dispose() {
            Ok(()) => report.completed |= TeardownSteps::DISPOSE_RENDERER,
            Err(e) => report.fail("dispose renderer", e),
        }

        scene_info!(SOURCE, "Scene disposed ({} hearts released, {} step failures)",
            count, report.failures.len());
        report
    }

    /// Consume the handle and dispose it
    pub fn unmount(self) -> TeardownReport {
        self.dispose()
    }

    // ===== GETTERS =====

    pub fn is_disposed(&self) -> bool {
        self.runtime().disposed
    }

    pub fn driver_state(&self) -> DriverState {
        self.runtime().state
    }

    pub fn instance_count(&self) -> usize {
        self.runtime().scene.instances().len()
    }

    /// Time accumulator
    pub fn time(&self) -> f64 {
        self.runtime().scene.time()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.runtime().frames_rendered
    }

    pub fn camera_aspect(&self) -> f32 {
        self.runtime().scene.camera().aspect()
    }

    pub fn camera(&self) -> PerspectiveCamera {
        *self.runtime().scene.camera()
    }

    pub fn surface(&self) -> SurfaceId {
        self.runtime().scene.surface()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.runtime().scene.surface_size()
    }

    pub fn light_count(&self) -> usize {
        self.runtime().scene.lights().len()
    }

    /// Run `f` on the current instances
    pub fn with_instances<T, F: FnOnce(&[HeartInstance]) -> T>(&self, f: F) -> T {
        f(self.runtime().scene.instances())
    }

    /// Apply a resize as the host's listener would
    pub fn handle_resize(&self, viewport: ViewportSize) {
        self.runtime().apply_resize(viewport);
    }
}

impl Drop for SceneHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
