//! Time controls panel at the bottom of the screen.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::types::{MAX_SPEED, MIN_SPEED, SimulationControl};

/// System that renders the time controls panel.
pub fn time_controls_panel(
    mut contexts: EguiContexts,
    mut control: ResMut<SimulationControl>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::TopBottomPanel::bottom("time_controls")
        .frame(
            egui::Frame::NONE
                .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 220))
                .inner_margin(egui::Margin::symmetric(16, 8)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // Play/Pause button
                let icon = if control.paused { "\u{25B6}" } else { "\u{23F8}" };
                if ui
                    .button(icon)
                    .on_hover_text(if control.paused {
                        "Play (Space)"
                    } else {
                        "Pause (Space)"
                    })
                    .clicked()
                {
                    control.paused = !control.paused;
                }

                let reverse = control.reverse;
                if ui
                    .selectable_label(reverse, "\u{23EA}")
                    .on_hover_text("Run backwards (R)")
                    .clicked()
                {
                    control.reverse = !reverse;
                }

                ui.separator();

                ui.label("Speed:");
                let mut speed = control.speed;
                if ui
                    .add(
                        egui::Slider::new(&mut speed, MIN_SPEED..=MAX_SPEED)
                            .logarithmic(true)
                            .suffix("x")
                            .fixed_decimals(1),
                    )
                    .on_hover_text("Halve / double with [ and ]")
                    .changed()
                {
                    control.set_speed(speed);
                }

                ui.separator();

                ui.label(
                    egui::RichText::new(format!("t = {:.1} s", control.elapsed_ms / 1000.0))
                        .monospace(),
                );
            });
        });
    Ok(())
}
