/// Render module - device seam, frame submission, and the in-memory backend

pub mod render_device;
pub mod draw_list;
pub mod recording_device;

pub use render_device::*;
pub use draw_list::*;
pub use recording_device::*;
