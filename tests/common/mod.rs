//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use orrery::OrreryCorePlugin;
use orrery::bodies::{BodyId, BodyPositions, CelestialBody};
use orrery::camera::{ActiveTransition, DEFAULT_POSE, MainCamera, OrbitControl, camera_rig};
use orrery::types::SimulationControl;

/// Frame step used by the scenario tests.
pub const STEP: Duration = Duration::from_millis(50);

/// Headless app with the core plugins, a camera rig and a fixed frame step.
pub fn scene_app(control: SimulationControl) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, InputPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP))
        .insert_resource(control)
        .add_plugins(OrreryCorePlugin);
    app.world_mut().spawn(camera_rig(DEFAULT_POSE));
    app
}

/// Spawn bare body entities (no meshes) so the orbit update picks them up.
pub fn spawn_bodies(app: &mut App, ids: &[BodyId]) {
    for &id in ids {
        app.world_mut()
            .spawn((Name::new(id.name()), CelestialBody { id }, Transform::default()));
    }
    app.update();
}

pub fn disable_auto_rotate(app: &mut App) {
    let mut query = app.world_mut().query::<&mut OrbitControl>();
    query.single_mut(app.world_mut()).unwrap().auto_rotate = false;
}

pub fn camera_position(app: &mut App) -> Vec3 {
    let mut query = app
        .world_mut()
        .query_filtered::<&Transform, With<MainCamera>>();
    query.single(app.world()).unwrap().translation
}

pub fn set_camera_position(app: &mut App, position: Vec3) {
    let mut query = app
        .world_mut()
        .query_filtered::<&mut Transform, With<MainCamera>>();
    query.single_mut(app.world_mut()).unwrap().translation = position;
}

pub fn orbit_target(app: &mut App) -> Vec3 {
    let mut query = app.world_mut().query::<&OrbitControl>();
    query.single(app.world()).unwrap().target
}

pub fn body(app: &App, id: BodyId) -> Vec3 {
    app.world()
        .resource::<BodyPositions>()
        .get(id)
        .expect("body is loaded")
}

pub fn transition_active(app: &App) -> bool {
    app.world().resource::<ActiveTransition>().is_active()
}

/// Update until the active transition finishes. Returns the frames it took.
pub fn run_until_arrived(app: &mut App, max_frames: usize) -> usize {
    for frame in 1..=max_frames {
        app.update();
        if !transition_active(app) {
            return frame;
        }
    }
    panic!("transition still running after {max_frames} frames");
}
