//! Body labels using egui for text rendering.
//!
//! Renders body names next to each visible body.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use super::SceneOverlays;
use crate::bodies::CelestialBody;
use crate::camera::MainCamera;

/// Plugin providing body label rendering.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabelSettings>()
            .add_systems(EguiPrimaryContextPass, draw_body_labels);
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    /// Offset from body center in screen pixels.
    pub offset: f32,
    /// Labels further than this from the camera are hidden.
    pub max_distance: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            offset: 12.0,
            max_distance: 3000.0,
        }
    }
}

/// Draw labels for all celestial bodies.
fn draw_body_labels(
    mut contexts: EguiContexts,
    bodies: Query<(&CelestialBody, &GlobalTransform)>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    overlays: Res<SceneOverlays>,
    settings: Res<LabelSettings>,
) -> Result {
    if !overlays.labels {
        return Ok(());
    }

    let (camera, camera_transform) = camera.single()?;
    let ctx = contexts.ctx_mut()?;
    let painter = ctx.layer_painter(egui::LayerId::background());
    let font = egui::FontId::proportional(14.0);

    for (body, transform) in bodies.iter() {
        let world_pos = transform.translation();
        // Galaxies are labelled from any distance
        if !body.id.is_galaxy()
            && world_pos.distance(camera_transform.translation()) > settings.max_distance
        {
            continue;
        }

        let Ok(screen_pos) = camera.world_to_viewport(camera_transform, world_pos) else {
            continue;
        };
        let label_pos = egui::pos2(screen_pos.x + settings.offset, screen_pos.y + settings.offset);
        let text = body.id.display_name();

        // Shadow
        painter.text(
            label_pos + egui::vec2(1.0, 1.0),
            egui::Align2::LEFT_TOP,
            text,
            font.clone(),
            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
        );
        painter.text(
            label_pos,
            egui::Align2::LEFT_TOP,
            text,
            font.clone(),
            egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230),
        );
    }
    Ok(())
}
