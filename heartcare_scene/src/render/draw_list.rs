/// DrawList - everything a device needs to draw one frame

use std::cmp::Ordering;
use glam::Mat4;
use crate::scene::Light;
use super::render_device::{GeometryKey, MaterialKey};

/// One instance to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub geometry: GeometryKey,
    pub material: MaterialKey,
    /// Local-to-world matrix
    pub model: Mat4,
    pub transparent: bool,
    /// Distance in front of the camera along its view axis
    pub view_depth: f32,
}

/// Frame submission: camera, lights, and ordered draw items
#[derive(Debug, Clone)]
pub struct DrawList {
    view_projection: Mat4,
    lights: Vec<Light>,
    items: Vec<DrawItem>,
}

impl DrawList {
    pub fn new(view_projection: Mat4, lights: Vec<Light>) -> Self {
        Self {
            view_projection,
            lights,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    /// Order items for blending: opaque first in submission order, then
    /// transparent items from farthest to nearest.
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| match (a.transparent, b.transparent) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => b.view_depth.total_cmp(&a.view_depth),
        });
    }

    pub fn view_projection(&self) -> &Mat4 {
        &self.view_projection
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn transparent_count(&self) -> usize {
        self.items.iter().filter(|item| item.transparent).count()
    }
}

#[cfg(test)]
#[path = "draw_list_tests.rs"]
mod tests;
