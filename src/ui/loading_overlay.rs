//! Full-screen overlay shown while the scene is loading.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::bodies::{BodyId, BodyRegistry};
use crate::loading::LoadingState;

pub fn loading_overlay(
    mut contexts: EguiContexts,
    state: Res<LoadingState>,
    registry: Res<BodyRegistry>,
) -> Result {
    if !state.is_loading() {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::from_rgba_unmultiplied(5, 5, 12, 240)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.4);
                ui.heading("Loading the Solar System");
                ui.add_space(12.0);
                let total = BodyId::ALL.len();
                let progress = registry.loaded_count() as f32 / total as f32;
                ui.add(
                    egui::ProgressBar::new(progress)
                        .desired_width(260.0)
                        .text(format!("{} / {total} bodies", registry.loaded_count())),
                );
            });
        });
    Ok(())
}
