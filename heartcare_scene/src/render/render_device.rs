/// RenderDevice trait - the graphics context a scene draws through
///
/// The scene never talks to a GPU API directly. It uploads its geometries
/// and materials through this trait, gets stable keys back, and submits one
/// DrawList per frame. Backends own the actual GPU objects.

use slotmap::new_key_type;
use crate::config::SurfaceConfig;
use crate::error::Result;
use crate::resource::{MaterialSpec, SolidGeometry};
use super::draw_list::DrawList;

new_key_type! {
    /// Stable key of an uploaded geometry.
    pub struct GeometryKey;

    /// Stable key of an uploaded material.
    pub struct MaterialKey;
}

/// Identifier of the element a device renders into
///
/// This is what gets attached to (and detached from) the host container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Graphics context owned by exactly one mounted scene
pub trait RenderDevice: Send {
    /// Create the render surface
    ///
    /// A device has at most one surface. Failure is reported as
    /// `RenderSurfaceUnavailable`.
    fn create_surface(&mut self, width: u32, height: u32, config: &SurfaceConfig) -> Result<SurfaceId>;

    /// Resize the render surface
    fn set_surface_size(&mut self, width: u32, height: u32) -> Result<()>;

    /// Current surface size, if a surface exists
    fn surface_size(&self) -> Option<(u32, u32)>;

    /// Upload a geometry; the caller owns the returned key
    fn upload_geometry(&mut self, geometry: &SolidGeometry) -> Result<GeometryKey>;

    /// Upload a material; the caller owns the returned key
    fn upload_material(&mut self, material: &MaterialSpec) -> Result<MaterialKey>;

    /// Release a geometry; disposing a key twice is an error
    fn dispose_geometry(&mut self, key: GeometryKey) -> Result<()>;

    /// Release a material; disposing a key twice is an error
    fn dispose_material(&mut self, key: MaterialKey) -> Result<()>;

    /// Draw one frame
    fn render(&mut self, draw_list: &DrawList) -> Result<()>;

    /// Release the context itself
    ///
    /// Resources still alive at this point are leaked by the caller.
    fn dispose(&mut self) -> Result<()>;
}
