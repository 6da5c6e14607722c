//! Host module
//!
//! Seams toward the page: frame scheduling, viewport resizes, and the
//! container element, plus a manually clocked implementation.

mod host;
mod simulated_host;

pub use host::{
    Container, FrameCallback, FrameRequestId, Host, ListenerId, ResizeListener, ViewportSize,
};
pub use simulated_host::{SimulatedContainer, SimulatedHost};
