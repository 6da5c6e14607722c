/// Instance populator - turns a LayerConfig into uploaded heart instances
///
/// Sampling and uploading are split: `sample_blueprints` only draws random
/// values, `populate` uploads one geometry and one material per blueprint.
/// A failed upload releases everything this call created before returning.

use std::f32::consts::{PI, TAU};
use glam::{Vec2, Vec3};
use rand::Rng;
use crate::config::LayerConfig;
use crate::error::{Error, Result};
use crate::render::RenderDevice;
use crate::resource::{extrude, ExtrudeParams, MaterialSpec};
use crate::shape::HeartOutline;
use crate::{scene_debug, scene_error};
use super::instance::{AnimationParams, HeartInstance, Layer, Transform};

const SOURCE: &str = "heartcare::Populator";

/// Randomized, not yet uploaded, instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceBlueprint {
    pub transform: Transform,
    pub animation: AnimationParams,
    pub material: MaterialSpec,
}

/// Draw `config.count` blueprints for `layer`
pub fn sample_blueprints<R: Rng + ?Sized>(
    layer: Layer,
    config: &LayerConfig,
    rng: &mut R,
) -> Vec<InstanceBlueprint> {
    (0..config.count)
        .map(|_| {
            let position = Vec3::new(
                config.bounds.x.sample(rng),
                config.bounds.y.sample(rng),
                config.bounds.z.sample(rng),
            );
            let rotation = Vec2::new(rng.gen_range(0.0..PI), rng.gen_range(0.0..PI));
            let color = MaterialSpec::random_palette_color(rng);

            let animation = AnimationParams {
                rotation_speed_x: config.speed.rotation.sample(rng),
                rotation_speed_y: config.speed.rotation.sample(rng),
                float_speed: config.speed.float_speed.sample(rng),
                float_offset: rng.gen_range(0.0..TAU),
                float_intensity: config.float_intensity,
                drift_amplitude: config.drift_amplitude,
                layer,
            };

            InstanceBlueprint {
                transform: Transform {
                    position,
                    rotation,
                    scale: Vec3::splat(config.scale),
                },
                animation,
                material: MaterialSpec::with_opacity(color, config.opacity),
            }
        })
        .collect()
}

/// Build the instances of one layer on `device`
///
/// Every instance gets its own geometry upload; nothing is shared between
/// instances.
pub fn populate<R: Rng + ?Sized>(
    device: &mut dyn RenderDevice,
    outline: &HeartOutline,
    extrude_params: &ExtrudeParams,
    layer: Layer,
    config: &LayerConfig,
    rng: &mut R,
) -> Result<Vec<HeartInstance>> {
    let blueprints = sample_blueprints(layer, config, rng);
    if blueprints.is_empty() {
        return Ok(Vec::new());
    }

    let geometry = extrude(outline, extrude_params)?;
    let mut instances = Vec::with_capacity(blueprints.len());

    for blueprint in blueprints {
        let uploaded = device.upload_geometry(&geometry).and_then(|geometry_key| {
            match device.upload_material(&blueprint.material) {
                Ok(material_key) => Ok((geometry_key, material_key)),
                Err(e) => {
                    // Geometry without its material would leak
                    if let Err(release) = device.dispose_geometry(geometry_key) {
                        scene_error!(SOURCE, "Orphan geometry {:?} not released: {}", geometry_key, release);
                    }
                    Err(e)
                }
            }
        });

        match uploaded {
            Ok((geometry_key, material_key)) => instances.push(HeartInstance::new(
                geometry_key,
                material_key,
                blueprint.material,
                blueprint.transform,
                blueprint.animation,
            )),
            Err(e) => {
                for leftover in release_instances(device, &mut instances) {
                    scene_error!(SOURCE, "Rollback of {:?} layer failed to release: {}", layer, leftover);
                }
                return Err(as_initialization_failure(e));
            }
        }
    }

    scene_debug!(SOURCE, "{:?} layer populated with {} hearts ({} vertices each)",
        layer, instances.len(), geometry.vertex_count());
    Ok(instances)
}

/// Dispose the geometry and material of every instance and empty the list
///
/// Returns the failures; a failed release is not retried.
pub fn release_instances(device: &mut dyn RenderDevice, instances: &mut Vec<HeartInstance>) -> Vec<Error> {
    let mut failures = Vec::new();
    for instance in instances.drain(..) {
        if let Err(e) = device.dispose_geometry(instance.geometry) {
            failures.push(e);
        }
        if let Err(e) = device.dispose_material(instance.material) {
            failures.push(e);
        }
    }
    failures
}

fn as_initialization_failure(error: Error) -> Error {
    match error {
        Error::InitializationFailed(_) | Error::RenderSurfaceUnavailable(_) => error,
        other => Error::InitializationFailed(other.to_string()),
    }
}

#[cfg(test)]
#[path = "populator_tests.rs"]
mod tests;
