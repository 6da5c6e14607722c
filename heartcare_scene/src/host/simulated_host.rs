/// In-process Host and Container used by tests and the headless demo
///
/// Frames only run when the driver calls `run_frame`, which makes the
/// animation loop fully deterministic. Callbacks and listeners are always
/// invoked with no internal lock held, so they may call back into the host.

use std::sync::{Mutex, MutexGuard, PoisonError};
use crate::error::Result;
use crate::render::SurfaceId;
use crate::scene_bail;
use super::host::{
    Container, FrameCallback, FrameRequestId, Host, ListenerId, ResizeListener, ViewportSize,
};

const SOURCE: &str = "heartcare::SimulatedHost";

// ============================================================================
// SimulatedHost
// ============================================================================

struct HostState {
    next_id: u64,
    pending_frames: Vec<(FrameRequestId, FrameCallback)>,
    listeners: Vec<(ListenerId, ResizeListener)>,
    viewport: ViewportSize,
    frames_run: usize,
    frames_cancelled: usize,
    fail_listener_removal: bool,
}

/// Manually clocked host
pub struct SimulatedHost {
    state: Mutex<HostState>,
}

impl SimulatedHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Mutex::new(HostState {
                next_id: 1,
                pending_frames: Vec::new(),
                listeners: Vec::new(),
                viewport: ViewportSize::new(width, height),
                frames_run: 0,
                frames_cancelled: 0,
                fail_listener_removal: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fire every callback scheduled before this call; returns how many ran
    ///
    /// Callbacks scheduled while running wait for the next call.
    pub fn run_frame(&self) -> usize {
        let callbacks: Vec<FrameCallback> = {
            let mut state = self.lock();
            let drained: Vec<_> = state.pending_frames.drain(..).map(|(_, cb)| cb).collect();
            state.frames_run += drained.len();
            drained
        };
        let count = callbacks.len();
        for callback in callbacks {
            callback();
        }
        count
    }

    /// Run `frames` refreshes; returns the total number of callbacks fired
    pub fn run_frames(&self, frames: usize) -> usize {
        (0..frames).map(|_| self.run_frame()).sum()
    }

    /// Remove scheduled callbacks without running them
    ///
    /// Lets a caller hold on to a callback and fire it later, e.g. after
    /// the scene was torn down.
    pub fn take_pending_frames(&self) -> Vec<FrameCallback> {
        self.lock().pending_frames.drain(..).map(|(_, cb)| cb).collect()
    }

    pub fn pending_frame_count(&self) -> usize {
        self.lock().pending_frames.len()
    }

    pub fn frames_run(&self) -> usize {
        self.lock().frames_run
    }

    pub fn frames_cancelled(&self) -> usize {
        self.lock().frames_cancelled
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Change the viewport and notify every listener
    pub fn resize(&self, width: u32, height: u32) {
        let size = ViewportSize::new(width, height);
        let listeners: Vec<ResizeListener> = {
            let mut state = self.lock();
            state.viewport = size;
            state.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(size);
        }
    }

    /// Make `remove_resize_listener` fail
    pub fn set_fail_listener_removal(&self, fail: bool) {
        self.lock().fail_listener_removal = fail;
    }
}

impl Host for SimulatedHost {
    fn request_animation_frame(&self, callback: FrameCallback) -> FrameRequestId {
        let mut state = self.lock();
        let id = FrameRequestId(state.next_id);
        state.next_id += 1;
        state.pending_frames.push((id, callback));
        id
    }

    fn cancel_animation_frame(&self, id: FrameRequestId) -> bool {
        let mut state = self.lock();
        let before = state.pending_frames.len();
        state.pending_frames.retain(|(pending, _)| *pending != id);
        let removed = state.pending_frames.len() < before;
        if removed {
            state.frames_cancelled += 1;
        }
        removed
    }

    fn add_resize_listener(&self, listener: ResizeListener) -> ListenerId {
        let mut state = self.lock();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, listener));
        id
    }

    fn remove_resize_listener(&self, id: ListenerId) -> Result<()> {
        let mut state = self.lock();
        if state.fail_listener_removal {
            scene_bail!(BackendError, SOURCE, "listener {:?} could not be removed", id);
        }
        let before = state.listeners.len();
        state.listeners.retain(|(listener, _)| *listener != id);
        if state.listeners.len() == before {
            scene_bail!(InvalidResource, SOURCE, "unknown resize listener {:?}", id);
        }
        Ok(())
    }

    fn viewport_size(&self) -> ViewportSize {
        self.lock().viewport
    }
}

// ============================================================================
// SimulatedContainer
// ============================================================================

struct ContainerState {
    children: Vec<SurfaceId>,
    available: bool,
}

/// Element with a child list
pub struct SimulatedContainer {
    state: Mutex<ContainerState>,
}

impl SimulatedContainer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ContainerState {
                children: Vec::new(),
                available: true,
            }),
        }
    }

    /// A container that is no longer in the page and refuses children
    pub fn unavailable() -> Self {
        let container = Self::new();
        container.lock().available = false;
        container
    }

    fn lock(&self) -> MutexGuard<'_, ContainerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop all children, as if the page replaced the container content
    pub fn clear(&self) {
        self.lock().children.clear();
    }

    pub fn child_count(&self) -> usize {
        self.lock().children.len()
    }
}

impl Default for SimulatedContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for SimulatedContainer {
    fn append_child(&self, surface: SurfaceId) -> Result<()> {
        let mut state = self.lock();
        if !state.available {
            scene_bail!(RenderSurfaceUnavailable, SOURCE, "container is not attached to a page");
        }
        state.children.push(surface);
        Ok(())
    }

    fn contains_child(&self, surface: SurfaceId) -> bool {
        self.lock().children.contains(&surface)
    }

    fn remove_child(&self, surface: SurfaceId) -> Result<()> {
        let mut state = self.lock();
        match state.children.iter().position(|child| *child == surface) {
            Some(index) => {
                state.children.remove(index);
                Ok(())
            }
            None => scene_bail!(TeardownPartialFailure, SOURCE, "surface {:?} is not a child", surface),
        }
    }
}

#[cfg(test)]
#[path = "simulated_host_tests.rs"]
mod tests;
