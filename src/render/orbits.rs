//! Orbit path rendering using Bevy Gizmos.
//!
//! Each orbit is drawn as its ellipse around the parent's current position,
//! so moon paths travel with their planet.

use bevy::prelude::*;

use super::SceneOverlays;
use crate::bodies::{BodyData, BodyPositions, all_bodies};
use crate::types::FrameSet;

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathSettings>()
            .add_systems(Update, draw_orbit_paths.after(FrameSet::Orbits));
    }
}

/// Settings for orbit path rendering.
#[derive(Resource)]
pub struct OrbitPathSettings {
    /// Number of segments for drawing the ellipse (higher = smoother).
    pub segments: u32,
    /// Alpha value for orbit path color.
    pub alpha: f32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            segments: 256,
            alpha: 0.3,
        }
    }
}

/// World-space polyline of a body's orbit, or `None` for bodies without one
/// or whose parent is not in the scene yet.
pub fn orbit_polyline(data: &BodyData, positions: &BodyPositions, segments: u32) -> Option<Vec<Vec3>> {
    let orbit = data.orbit?;
    let center = match data.id.parent() {
        Some(parent) => positions.get(parent)?,
        None => Vec3::ZERO,
    };
    Some(
        orbit
            .sample_path(segments)
            .into_iter()
            .map(|p| center + p.as_vec3())
            .collect(),
    )
}

/// Draw the orbit of every loaded body.
fn draw_orbit_paths(
    mut gizmos: Gizmos,
    overlays: Res<SceneOverlays>,
    settings: Res<OrbitPathSettings>,
    positions: Res<BodyPositions>,
) {
    if !overlays.orbits {
        return;
    }

    for data in all_bodies() {
        if !positions.contains(data.id) {
            continue;
        }
        // Moons get fewer segments; their ellipses are small on screen
        let segments = if data.id.parent().is_some() {
            settings.segments / 4
        } else {
            settings.segments
        };
        let Some(path) = orbit_polyline(&data, &positions, segments) else {
            continue;
        };
        gizmos.linestrip(path, data.color.with_alpha(settings.alpha));
    }
}
