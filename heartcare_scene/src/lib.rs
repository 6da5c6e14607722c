/*!
# HeartCare Scene

Scene manager for the animated heart backdrop of the HeartCare page.

The crate builds a heart outline procedurally, extrudes it into bevelled
solids, populates background and foreground layers of independently
animated instances, and drives them from a host-provided frame scheduler.
Every GPU-side object goes through the [`RenderDevice`](render::RenderDevice)
trait so the teardown discipline (cancel loop, drop listeners, detach
surface, dispose resources) can be verified without a GPU.

## Architecture

- **shape**: Heart outline as cubic path segments
- **resource**: Extruded geometry and material descriptions
- **render**: Render device trait, draw lists, recording backend
- **host**: Frame scheduler / resize signal / mount point seams
- **scene**: Camera, lights, instances, populator, kinematics, driver, lifecycle
- **vitals**: Typed interface to the external risk prediction service
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod shape;
pub mod resource;
pub mod render;
pub mod host;
pub mod scene;
pub mod vitals;

// Main heartcare namespace module
pub mod heartcare {
    // Error types
    pub use crate::error::{Error, Result};

    // Global logger registry
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::{
        SceneConfig, SceneVariant, LayerConfig, CameraConfig, SurfaceConfig,
        PositionBounds, SpeedBounds, ValueRange,
    };

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Shape sub-module
    pub mod shape {
        pub use crate::shape::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Render sub-module
    pub mod render {
        pub use crate::render::*;
    }

    // Host sub-module
    pub mod host {
        pub use crate::host::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Vitals sub-module
    pub mod vitals {
        pub use crate::vitals::*;
    }
}

// Re-export math library at crate root
pub use glam;
