//! Orrery - Interactive Solar System Viewer
//!
//! A desktop application for flying a camera around an animated model of
//! the Solar System and its neighbouring galaxies.

use bevy::ecs::error::warn;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::OrreryPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Orrery".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // A failing camera or picking frame is logged; the next frame still runs
        .set_error_handler(warn)
        .add_plugins(OrreryPlugin)
        .run();
}
