//! Celestial bodies: catalogue, orbit model and per-frame position updates.
//!
//! Coordinate frame:
//! - Sun at the origin, orbits in the XZ plane, Y up.
//! - Satellites orbit their parent's position at the same simulated time.

pub mod data;
pub mod orbit;

#[cfg(test)]
mod proptest_orbit;

pub use data::{BodyData, BodyId, UnknownBody, all_bodies, body_data};
pub use orbit::OrbitalElements;

use bevy::math::DVec3;
use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::types::{FrameSet, REFERENCE_FRAME_MS, SimulationControl};

/// Component marking an entity as a named celestial body.
#[derive(Component, Clone, Copy, Debug)]
pub struct CelestialBody {
    pub id: BodyId,
}

/// World position of a body at a simulated time.
///
/// Satellites add their parent's position evaluated at the same time, so a
/// moon is always consistent with the planet it orbits.
pub fn body_position(id: BodyId, sim_ms: f64) -> DVec3 {
    let data = body_data(id);
    let local = match data.orbit {
        Some(orbit) => orbit.local_position(sim_ms),
        None => data.fixed_position,
    };
    match id.parent() {
        Some(parent) => body_position(parent, sim_ms) + local,
        None => local,
    }
}

/// Spin angle about the Y axis at a simulated time.
pub fn spin_angle(id: BodyId, sim_ms: f64) -> f64 {
    body_data(id).spin_per_frame * sim_ms / REFERENCE_FRAME_MS
}

/// Bodies whose entity has been constructed.
///
/// Navigation buttons and the loading overlay read it; a body is absent
/// until [`crate::loading::BodyBuilder::spawn_body`] has built it.
#[derive(Resource, Default, Debug)]
pub struct BodyRegistry {
    loaded: HashSet<BodyId>,
}

impl BodyRegistry {
    pub fn register(&mut self, id: BodyId) {
        self.loaded.insert(id);
    }

    pub fn is_loaded(&self, id: BodyId) -> bool {
        self.loaded.contains(&id)
    }

    /// Number of constructed bodies.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

/// World positions of the bodies that exist this frame.
///
/// Rewritten by [`update_orbits`] every frame; the camera and UI read it
/// instead of querying transforms.
#[derive(Resource, Default, Clone, Debug)]
pub struct BodyPositions {
    positions: HashMap<BodyId, Vec3>,
}

impl BodyPositions {
    pub fn get(&self, id: BodyId) -> Option<Vec3> {
        self.positions.get(&id).copied()
    }

    pub fn insert(&mut self, id: BodyId, position: Vec3) {
        self.positions.insert(id, position);
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

impl FromIterator<(BodyId, Vec3)> for BodyPositions {
    fn from_iter<I: IntoIterator<Item = (BodyId, Vec3)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Plugin providing body registry, orbit updates and the position snapshot.
pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BodyRegistry>()
            .init_resource::<BodyPositions>()
            .add_systems(Update, update_orbits.in_set(FrameSet::Orbits));
    }
}

/// Move every spawned body to its position at the current simulated time.
pub fn update_orbits(
    mut bodies: Query<(&CelestialBody, &mut Transform)>,
    mut positions: ResMut<BodyPositions>,
    control: Res<SimulationControl>,
) {
    positions.clear();
    let t = control.elapsed_ms;

    for (body, mut transform) in bodies.iter_mut() {
        let pos = body_position(body.id, t).as_vec3();
        transform.translation = pos;
        transform.rotation = Quat::from_rotation_y(spin_angle(body.id, t) as f32);
        positions.insert(body.id, pos);
    }
}
