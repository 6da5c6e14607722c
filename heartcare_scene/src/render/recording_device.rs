/// RecordingDevice - in-memory RenderDevice (no GPU required)
///
/// Every creation, disposal and frame is recorded in a DeviceLedger shared
/// through an Arc, so the ledger stays readable after the device has been
/// moved into a scene. Failures can be injected per operation.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use crate::config::SurfaceConfig;
use crate::error::Result;
use crate::resource::{MaterialSpec, SolidGeometry};
use crate::{scene_bail, scene_debug, scene_trace, scene_warn};
use super::draw_list::DrawList;
use super::render_device::{GeometryKey, MaterialKey, RenderDevice, SurfaceId};

const SOURCE: &str = "heartcare::RecordingDevice";

// ============================================================================
// Ledger
// ============================================================================

/// Everything observed by a RecordingDevice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceLedger {
    pub geometries_created: usize,
    pub geometries_disposed: usize,
    pub materials_created: usize,
    pub materials_disposed: usize,
    /// Dispose calls on keys that were already released
    pub double_disposals: usize,
    pub render_calls: usize,
    /// Items in the most recent draw list
    pub last_draw_items: usize,
    pub last_transparent_items: usize,
    pub last_light_count: usize,
    pub surface: Option<SurfaceId>,
    pub surface_size: Option<(u32, u32)>,
    pub surface_resizes: usize,
    pub device_disposals: usize,
    pub uploaded_vertex_bytes: usize,
}

impl DeviceLedger {
    pub fn live_geometries(&self) -> usize {
        self.geometries_created.saturating_sub(self.geometries_disposed)
    }

    pub fn live_materials(&self) -> usize {
        self.materials_created.saturating_sub(self.materials_disposed)
    }

    /// Every created resource was released exactly once
    pub fn is_balanced(&self) -> bool {
        self.live_geometries() == 0 && self.live_materials() == 0 && self.double_disposals == 0
    }
}

/// Cloneable read handle on a device's ledger
#[derive(Debug, Clone, Default)]
pub struct LedgerHandle(Arc<Mutex<DeviceLedger>>);

impl LedgerHandle {
    /// Copy of the current ledger
    pub fn snapshot(&self) -> DeviceLedger {
        match self.0.lock() {
            Ok(ledger) => ledger.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update<F: FnOnce(&mut DeviceLedger)>(&self, f: F) {
        match self.0.lock() {
            Ok(mut ledger) => f(&mut ledger),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

// ============================================================================
// Failure injection
// ============================================================================

/// Operations the device should fail on purpose
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailurePlan {
    pub fail_surface: bool,
    /// Zero-based index of the geometry upload that fails
    pub fail_geometry_upload_at: Option<usize>,
    pub fail_material_dispose: bool,
    pub fail_device_dispose: bool,
    /// Zero-based index of the render call that fails
    pub fail_render_at: Option<usize>,
}

// ============================================================================
// Device
// ============================================================================

struct GeometryRecord {
    vertex_count: usize,
}

/// In-memory render device
pub struct RecordingDevice {
    ledger: LedgerHandle,
    failures: FailurePlan,
    geometries: SlotMap<GeometryKey, GeometryRecord>,
    materials: SlotMap<MaterialKey, MaterialSpec>,
    retired_geometries: FxHashSet<GeometryKey>,
    retired_materials: FxHashSet<MaterialKey>,
    surface: Option<(SurfaceId, u32, u32)>,
    uploads_attempted: usize,
    disposed: bool,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::with_failures(FailurePlan::default())
    }

    pub fn with_failures(failures: FailurePlan) -> Self {
        Self {
            ledger: LedgerHandle::default(),
            failures,
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
            retired_geometries: FxHashSet::default(),
            retired_materials: FxHashSet::default(),
            surface: None,
            uploads_attempted: 0,
            disposed: false,
        }
    }

    /// Handle that keeps observing the ledger after the device is moved
    pub fn ledger(&self) -> LedgerHandle {
        self.ledger.clone()
    }

    /// Vertex count of a live geometry
    pub fn geometry_vertex_count(&self, key: GeometryKey) -> Option<usize> {
        self.geometries.get(key).map(|g| g.vertex_count)
    }

    pub fn material(&self, key: MaterialKey) -> Option<&MaterialSpec> {
        self.materials.get(key)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_alive(&self, operation: &str) -> Result<()> {
        if self.disposed {
            scene_bail!(BackendError, SOURCE, "{} called on a disposed device", operation);
        }
        Ok(())
    }
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderDevice for RecordingDevice {
    fn create_surface(&mut self, width: u32, height: u32, config: &SurfaceConfig) -> Result<SurfaceId> {
        self.ensure_alive("create_surface")?;
        if self.failures.fail_surface {
            scene_bail!(RenderSurfaceUnavailable, SOURCE, "graphics context could not be created");
        }
        if self.surface.is_some() {
            scene_bail!(RenderSurfaceUnavailable, SOURCE, "device already owns a surface");
        }

        // Surface ids only need to be unique per device
        let id = SurfaceId(1);
        self.surface = Some((id, width, height));
        self.ledger.update(|l| {
            l.surface = Some(id);
            l.surface_size = Some((width, height));
        });
        scene_debug!(SOURCE, "Surface {}x{} created (alpha={}, antialias={})",
            width, height, config.alpha, config.antialias);
        Ok(id)
    }

    fn set_surface_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.ensure_alive("set_surface_size")?;
        let Some((id, _, _)) = self.surface else {
            scene_bail!(InvalidResource, SOURCE, "set_surface_size without a surface");
        };
        self.surface = Some((id, width, height));
        self.ledger.update(|l| {
            l.surface_size = Some((width, height));
            l.surface_resizes += 1;
        });
        scene_trace!(SOURCE, "Surface resized to {}x{}", width, height);
        Ok(())
    }

    fn surface_size(&self) -> Option<(u32, u32)> {
        self.surface.map(|(_, w, h)| (w, h))
    }

    fn upload_geometry(&mut self, geometry: &SolidGeometry) -> Result<GeometryKey> {
        self.ensure_alive("upload_geometry")?;
        let attempt = self.uploads_attempted;
        self.uploads_attempted += 1;
        if self.failures.fail_geometry_upload_at == Some(attempt) {
            scene_bail!(InitializationFailed, SOURCE, "geometry upload #{} rejected", attempt);
        }

        let key = self.geometries.insert(GeometryRecord {
            vertex_count: geometry.vertex_count(),
        });
        let bytes = geometry.vertex_bytes().len();
        self.ledger.update(|l| {
            l.geometries_created += 1;
            l.uploaded_vertex_bytes += bytes;
        });
        Ok(key)
    }

    fn upload_material(&mut self, material: &MaterialSpec) -> Result<MaterialKey> {
        self.ensure_alive("upload_material")?;
        let key = self.materials.insert(*material);
        self.ledger.update(|l| l.materials_created += 1);
        Ok(key)
    }

    fn dispose_geometry(&mut self, key: GeometryKey) -> Result<()> {
        if self.geometries.remove(key).is_some() {
            self.retired_geometries.insert(key);
            self.ledger.update(|l| l.geometries_disposed += 1);
            return Ok(());
        }
        if self.retired_geometries.contains(&key) {
            self.ledger.update(|l| l.double_disposals += 1);
            scene_bail!(InvalidResource, SOURCE, "geometry {:?} disposed twice", key);
        }
        scene_bail!(InvalidResource, SOURCE, "unknown geometry {:?}", key);
    }

    fn dispose_material(&mut self, key: MaterialKey) -> Result<()> {
        if self.failures.fail_material_dispose {
            scene_bail!(BackendError, SOURCE, "material {:?} could not be released", key);
        }
        if self.materials.remove(key).is_some() {
            self.retired_materials.insert(key);
            self.ledger.update(|l| l.materials_disposed += 1);
            return Ok(());
        }
        if self.retired_materials.contains(&key) {
            self.ledger.update(|l| l.double_disposals += 1);
            scene_bail!(InvalidResource, SOURCE, "material {:?} disposed twice", key);
        }
        scene_bail!(InvalidResource, SOURCE, "unknown material {:?}", key);
    }

    fn render(&mut self, draw_list: &DrawList) -> Result<()> {
        self.ensure_alive("render")?;
        if self.surface.is_none() {
            scene_bail!(RenderSurfaceUnavailable, SOURCE, "render without a surface");
        }
        let call = self.ledger.snapshot().render_calls;
        if self.failures.fail_render_at == Some(call) {
            scene_bail!(BackendError, SOURCE, "render call #{} failed", call);
        }
        for item in draw_list.items() {
            if !self.geometries.contains_key(item.geometry) || !self.materials.contains_key(item.material) {
                scene_bail!(InvalidResource, SOURCE, "draw item references a released resource");
            }
        }

        let items = draw_list.len();
        let transparent = draw_list.transparent_count();
        let lights = draw_list.lights().len();
        self.ledger.update(|l| {
            l.render_calls += 1;
            l.last_draw_items = items;
            l.last_transparent_items = transparent;
            l.last_light_count = lights;
        });
        Ok(())
    }

    fn dispose(&mut self) -> Result<()> {
        if self.disposed {
            scene_bail!(InvalidResource, SOURCE, "device disposed twice");
        }
        if self.failures.fail_device_dispose {
            scene_bail!(BackendError, SOURCE, "context release failed");
        }

        let leaked = self.geometries.len() + self.materials.len();
        if leaked > 0 {
            scene_warn!(SOURCE, "Disposing device with {} live resources", leaked);
        }
        self.disposed = true;
        self.surface = None;
        self.ledger.update(|l| l.device_disposals += 1);
        Ok(())
    }
}

#[cfg(test)]
#[path = "recording_device_tests.rs"]
mod tests;
