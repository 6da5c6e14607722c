/// Host traits - what a mounted scene needs from the page around it
///
/// The host schedules frame callbacks and delivers viewport resizes. The
/// container is the element the render surface gets attached to.

use std::sync::Arc;
use crate::error::Result;
use crate::render::SurfaceId;

/// One-shot callback fired on the next display refresh
pub type FrameCallback = Box<dyn FnOnce() + Send>;

/// Handler invoked on every viewport resize
pub type ResizeListener = Arc<dyn Fn(ViewportSize) + Send + Sync>;

/// Token returned by `request_animation_frame`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(pub u64);

/// Token returned by `add_resize_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Viewport dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Frame scheduling and viewport events
pub trait Host: Send + Sync {
    /// Schedule `callback` for the next frame
    fn request_animation_frame(&self, callback: FrameCallback) -> FrameRequestId;

    /// Drop a scheduled callback; returns false if it already ran or was unknown
    fn cancel_animation_frame(&self, id: FrameRequestId) -> bool;

    fn add_resize_listener(&self, listener: ResizeListener) -> ListenerId;

    fn remove_resize_listener(&self, id: ListenerId) -> Result<()>;

    fn viewport_size(&self) -> ViewportSize;
}

/// Element that hosts the render surface
pub trait Container: Send + Sync {
    /// Attach a surface; fails with `RenderSurfaceUnavailable` if the container is gone
    fn append_child(&self, surface: SurfaceId) -> Result<()>;

    fn contains_child(&self, surface: SurfaceId) -> bool;

    fn remove_child(&self, surface: SurfaceId) -> Result<()>;
}
