//! Rendering for the scene: background, orbit paths and labels.

pub mod background;
mod labels;
mod orbits;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::labels::LabelPlugin;
use self::orbits::OrbitPathPlugin;

pub use self::labels::LabelSettings;
pub use self::orbits::{OrbitPathSettings, orbit_polyline};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneOverlays>()
            .add_plugins((BackgroundPlugin, OrbitPathPlugin, LabelPlugin));
    }
}

/// Visibility of the orbit paths and body labels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneOverlays {
    pub orbits: bool,
    pub labels: bool,
}

impl Default for SceneOverlays {
    fn default() -> Self {
        Self {
            orbits: true,
            labels: false,
        }
    }
}

impl SceneOverlays {
    /// Flip both overlays at once.
    pub fn toggle(&mut self) {
        self.orbits = !self.orbits;
        self.labels = !self.labels;
    }
}
