//! Orrery - Interactive Solar System Viewer
//!
//! A library crate providing the scene, camera controller and UI plugins,
//! usable headless for testing and integration purposes.

pub mod bodies;
pub mod camera;
pub mod input;
pub mod loading;
pub mod render;
pub mod selection;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

use bevy::prelude::*;

/// Scene logic that runs without a window or GPU: clock, orbits, camera
/// controller and picking bookkeeping.
pub struct OrreryCorePlugin;

impl Plugin for OrreryCorePlugin {
    fn build(&self, app: &mut App) {
        types::configure_frame_sets(app);
        app.add_plugins((
            time::TimePlugin,
            bodies::BodiesPlugin,
            camera::CameraControlPlugin,
        ));
    }
}

/// Everything: core logic plus loading, rendering, picking, UI and keyboard.
pub struct OrreryPlugin;

impl Plugin for OrreryPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            OrreryCorePlugin,
            camera::CameraPlugin,
            loading::LoadingPlugin,
            render::RenderPlugin,
            selection::SelectionPlugin,
            ui::UiPlugin,
            input::InputPlugin,
        ));
    }
}
