//! Animation driver
//!
//! The loop is a chain of one-shot frame callbacks: each callback advances
//! the clock, renders, and schedules the next one. Callbacks only hold weak
//! references to the scene, and check the driver state under the scene lock
//! before touching anything, so a callback that fires after cancellation
//! (or after the scene is gone) does nothing.
//!
//! States: `Idle -> Running -> Cancelled`. `Idle -> Cancelled` is allowed
//! for a scene torn down before its first frame. `Cancelled` is final.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use crate::error::Result;
use crate::host::{FrameCallback, FrameRequestId, Host, ListenerId, ResizeListener, ViewportSize};
use crate::render::RenderDevice;
use crate::{scene_bail, scene_err, scene_error, scene_trace, scene_warn};
use super::scene::SceneState;

const SOURCE: &str = "heartcare::Driver";

/// Animation loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverState {
    /// Built, no frame scheduled yet
    Idle,
    /// A frame is scheduled or being processed
    Running,
    /// Final: no frame is scheduled or processed anymore
    Cancelled,
}

impl DriverState {
    pub fn can_transition_to(self, next: DriverState) -> bool {
        matches!(
            (self, next),
            (DriverState::Idle, DriverState::Running)
                | (DriverState::Idle, DriverState::Cancelled)
                | (DriverState::Running, DriverState::Cancelled)
        )
    }
}

/// Mutable state of one mount, shared between the handle and its callbacks
pub(crate) struct SceneRuntime {
    pub(crate) scene: SceneState,
    pub(crate) device: Box<dyn RenderDevice>,
    pub(crate) state: DriverState,
    pub(crate) pending_frame: Option<FrameRequestId>,
    pub(crate) listener: Option<ListenerId>,
    pub(crate) height_band: Option<u32>,
    pub(crate) frames_rendered: u64,
    pub(crate) disposed: bool,
}

pub(crate) type SharedRuntime = Arc<Mutex<SceneRuntime>>;

impl SceneRuntime {
    pub(crate) fn new(scene: SceneState, device: Box<dyn RenderDevice>, height_band: Option<u32>) -> Self {
        Self {
            scene,
            device,
            state: DriverState::Idle,
            pending_frame: None,
            listener: None,
            height_band,
            frames_rendered: 0,
            disposed: false,
        }
    }

    fn transition(&mut self, next: DriverState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            scene_bail!(BackendError, SOURCE, "invalid driver transition {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        Ok(())
    }

    /// Stop the loop and drop any scheduled frame
    ///
    /// Returns true if this call performed the transition to Cancelled.
    pub(crate) fn cancel(&mut self, host: &dyn Host) -> bool {
        let transitioned = self.state.can_transition_to(DriverState::Cancelled);
        if transitioned {
            self.state = DriverState::Cancelled;
        }
        if let Some(id) = self.pending_frame.take() {
            if !host.cancel_animation_frame(id) {
                scene_trace!(SOURCE, "Frame {:?} was no longer pending", id);
            }
        }
        transitioned
    }

    /// Resize camera and surface to the viewport
    ///
    /// Same input, same resulting state: repeated calls are harmless.
    pub(crate) fn apply_resize(&mut self, viewport: ViewportSize) {
        if self.disposed {
            return;
        }
        match self.scene.resize(viewport, self.height_band) {
            Some((width, height)) => {
                if let Err(e) = self.device.set_surface_size(width, height) {
                    scene_warn!(SOURCE, "Surface resize to {}x{} failed: {}", width, height, e);
                }
                scene_trace!(SOURCE, "Resized to {}x{} (aspect {:.3})",
                    width, height, self.scene.camera().aspect());
            }
            None => scene_trace!(SOURCE, "Ignoring empty viewport {:?}", viewport),
        }
    }

    /// Advance one step and draw it
    fn render_frame(&mut self) -> Result<()> {
        self.scene.advance();
        let draw_list = self.scene.build_draw_list();
        self.device.render(&draw_list)?;
        self.frames_rendered += 1;
        Ok(())
    }
}

/// Lock the runtime, mapping a poisoned lock to `BackendError`
pub(crate) fn lock_runtime(runtime: &Mutex<SceneRuntime>) -> Result<MutexGuard<'_, SceneRuntime>> {
    runtime
        .lock()
        .map_err(|_| scene_err!(BackendError, SOURCE, "scene lock poisoned"))
}

/// Schedule the first frame: `Idle -> Running`
pub(crate) fn start(runtime: &SharedRuntime, host: &Arc<dyn Host>) -> Result<()> {
    let mut guard = lock_runtime(runtime)?;
    guard.transition(DriverState::Running)?;
    let id = host.request_animation_frame(frame_callback(Arc::downgrade(runtime), Arc::downgrade(host)));
    guard.pending_frame = Some(id);
    Ok(())
}

fn frame_callback(runtime: Weak<Mutex<SceneRuntime>>, host: Weak<dyn Host>) -> FrameCallback {
    Box::new(move || on_frame(&runtime, &host))
}

fn on_frame(runtime: &Weak<Mutex<SceneRuntime>>, host: &Weak<dyn Host>) {
    let (Some(runtime), Some(host)) = (runtime.upgrade(), host.upgrade()) else {
        return;
    };
    let Ok(mut guard) = lock_runtime(&runtime) else {
        return;
    };
    if guard.state != DriverState::Running {
        scene_trace!(SOURCE, "Frame ignored in state {:?}", guard.state);
        return;
    }
    guard.pending_frame = None;

    if let Err(e) = guard.render_frame() {
        scene_error!(SOURCE, "Render failed, stopping animation loop: {}", e);
        guard.state = DriverState::Cancelled;
        return;
    }

    let id = host.request_animation_frame(frame_callback(Arc::downgrade(&runtime), Arc::downgrade(&host)));
    guard.pending_frame = Some(id);
}

/// Listener applying viewport changes to the scene behind `runtime`
pub(crate) fn resize_listener(runtime: Weak<Mutex<SceneRuntime>>) -> ResizeListener {
    Arc::new(move |viewport| {
        if let Some(runtime) = runtime.upgrade() {
            if let Ok(mut guard) = lock_runtime(&runtime) {
                guard.apply_resize(viewport);
            }
        }
    })
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
