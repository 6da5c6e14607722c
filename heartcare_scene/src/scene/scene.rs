/// SceneState - everything one mounted scene owns besides the device
///
/// Camera, lights, surface, instances and the frame clock. Exactly one
/// per mount; nothing in here is shared with other mounts.
///
/// The clock counts steps instead of summing an `f32`, so scene time keeps
/// growing in sessions that stay open for weeks. Kinematics only see the
/// phase of that time within `kinematics::PHASE_PERIOD`.

use crate::host::ViewportSize;
use crate::render::{DrawItem, DrawList, SurfaceId};
use super::camera::PerspectiveCamera;
use super::instance::HeartInstance;
use super::kinematics;
use super::light::{Light, LightRig};

#[derive(Debug, Clone)]
pub struct SceneState {
    camera: PerspectiveCamera,
    light_rig: LightRig,
    lights: Vec<Light>,
    surface: SurfaceId,
    surface_size: (u32, u32),
    instances: Vec<HeartInstance>,
    steps: u64,
    time_step: f32,
}

impl SceneState {
    /// Compose instances, lights and camera into a scene
    ///
    /// Every light of `rig` is attached exactly once.
    pub fn assemble(
        instances: Vec<HeartInstance>,
        rig: LightRig,
        camera: PerspectiveCamera,
        surface: SurfaceId,
        surface_size: (u32, u32),
        time_step: f32,
    ) -> Self {
        Self {
            camera,
            light_rig: rig,
            lights: rig.lights(),
            surface,
            surface_size,
            instances,
            steps: 0,
            time_step,
        }
    }

    // ===== GETTERS =====

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn light_rig(&self) -> LightRig {
        self.light_rig
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    pub fn instances(&self) -> &[HeartInstance] {
        &self.instances
    }

    /// Elapsed scene time: steps taken times the time step
    pub fn time(&self) -> f64 {
        self.steps as f64 * f64::from(self.time_step)
    }

    /// Scene time folded into one motion period
    pub fn phase(&self) -> f32 {
        (self.time() % kinematics::PHASE_PERIOD) as f32
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    // ===== UPDATE =====

    /// Advance the clock by one step and move every instance
    pub fn advance(&mut self) {
        self.steps += 1;
        let phase = self.phase();
        kinematics::advance(&mut self.instances, phase);
    }

    /// Apply a viewport change; returns the new surface size
    ///
    /// With a height band the surface keeps that height whatever the
    /// viewport height is. Empty viewports leave the scene untouched.
    pub fn resize(&mut self, viewport: ViewportSize, height_band: Option<u32>) -> Option<(u32, u32)> {
        let width = viewport.width;
        let height = height_band.unwrap_or(viewport.height);
        if width == 0 || height == 0 {
            return None;
        }
        self.camera.set_aspect(width as f32 / height as f32);
        self.surface_size = (width, height);
        Some(self.surface_size)
    }

    /// Draw list of the current frame, sorted for blending
    pub fn build_draw_list(&self) -> DrawList {
        let mut draw_list = DrawList::new(self.camera.view_projection_matrix(), self.lights.clone());
        for instance in &self.instances {
            let transform = instance.transform();
            draw_list.push(DrawItem {
                geometry: instance.geometry(),
                material: instance.material(),
                model: transform.matrix(),
                transparent: instance.material_spec().transparent,
                view_depth: self.camera.view_depth(transform.position),
            });
        }
        draw_list.sort();
        draw_list
    }

    /// Hand the instances over for disposal, leaving the scene empty
    pub(crate) fn take_instances(&mut self) -> Vec<HeartInstance> {
        std::mem::take(&mut self.instances)
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
