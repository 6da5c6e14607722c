//! Scene management module
//!
//! Camera, lights, heart instances and their motion, the animation driver,
//! and the SceneHandle tying a scene's lifetime to its mount.

mod camera;
mod driver;
mod instance;
mod lifecycle;
mod light;
mod populator;
mod rng;
mod scene;
pub mod kinematics;

pub use camera::PerspectiveCamera;
pub use driver::DriverState;
pub use instance::{AnimationParams, HeartInstance, Layer, Transform};
pub use lifecycle::{SceneHandle, TeardownReport, TeardownSteps};
pub use light::{Light, LightRig};
pub use populator::{populate, release_instances, sample_blueprints, InstanceBlueprint};
pub use rng::SceneRng;
pub use scene::SceneState;
