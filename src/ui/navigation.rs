//! Navigation panel: one button per body, the galactic overview and the
//! overlay toggle.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::bodies::{BodyId, BodyRegistry};
use crate::camera::{Focus, NavigateTo, ViewState};
use crate::render::SceneOverlays;

/// System that renders the navigation panel.
pub fn navigation_panel(
    mut contexts: EguiContexts,
    registry: Res<BodyRegistry>,
    view: Res<ViewState>,
    mut overlays: ResMut<SceneOverlays>,
    mut navigate: MessageWriter<NavigateTo>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::SidePanel::left("navigation")
        .resizable(false)
        .default_width(150.0)
        .frame(
            egui::Frame::NONE
                .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 200))
                .inner_margin(egui::Margin::symmetric(10, 12)),
        )
        .show(ctx, |ui| {
            ui.heading("Navigate");
            ui.separator();

            for (index, id) in BodyId::NAVIGABLE.into_iter().enumerate() {
                let focused = view.focus() == Some(Focus::Body(id));
                let button = egui::Button::new(id.display_name()).selected(focused);
                let response = ui
                    .add_enabled(registry.is_loaded(id), button)
                    .on_hover_text(format!("Fly to {id} ({})", (index + 1) % 10))
                    .on_disabled_hover_text("Still loading");
                if response.clicked() {
                    navigate.write(NavigateTo(Focus::Body(id)));
                }
            }

            ui.separator();
            let overview = view.focus() == Some(Focus::Overview);
            if ui
                .add(egui::Button::new(BodyId::MilkyWay.display_name()).selected(overview))
                .on_hover_text("Galactic overview (O)")
                .clicked()
            {
                navigate.write(NavigateTo(Focus::Overview));
            }

            ui.separator();
            let label = if overlays.orbits { "Hide orbits" } else { "Show orbits" };
            if ui
                .button(label)
                .on_hover_text("Toggle orbits and labels (T)")
                .clicked()
            {
                overlays.toggle();
            }
        });
    Ok(())
}
