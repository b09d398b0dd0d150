//! Info panel showing the selected body.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::bodies::{BodyId, BodyPositions};
use crate::camera::{Focus, NavigateTo, ViewState};
use crate::selection::BodySelected;

/// Which body the info panel shows, if any.
#[derive(Resource, Default, Debug)]
pub struct InfoPanelState {
    pub selected: Option<BodyId>,
}

impl InfoPanelState {
    /// Show `id`, or close the panel if `id` is already shown.
    pub fn toggle(&mut self, id: BodyId) {
        self.selected = if self.selected == Some(id) { None } else { Some(id) };
    }

    pub fn close(&mut self) {
        self.selected = None;
    }
}

/// Short description shown under the body's name.
pub fn description(id: BodyId) -> &'static str {
    match id {
        BodyId::Sun => "The star at the centre of the Solar System, holding 99.8% of its mass.",
        BodyId::Mercury => "The smallest planet and the closest to the Sun.",
        BodyId::Venus => "Wrapped in thick clouds, the hottest planet of the Solar System.",
        BodyId::Earth => "Our home, the only world known to harbour life.",
        BodyId::Moon => "Earth's only natural satellite.",
        BodyId::Mars => "The red planet, with the tallest volcano in the Solar System.",
        BodyId::Phobos => "The larger and inner of the two moons of Mars.",
        BodyId::Deimos => "The smaller and outer moon of Mars.",
        BodyId::Jupiter => "The largest planet, a gas giant with a storm wider than Earth.",
        BodyId::Saturn => "The ringed gas giant.",
        BodyId::Titan => "Saturn's largest moon, with a dense nitrogen atmosphere.",
        BodyId::Uranus => "An ice giant that rotates on its side.",
        BodyId::Neptune => "The windiest planet and the farthest from the Sun.",
        BodyId::MilkyWay => "Our home galaxy, a barred spiral of some 100 billion stars.",
        BodyId::Andromeda => "The nearest large galaxy, on course to merge with the Milky Way.",
    }
}

/// Feed picked bodies into the panel state.
pub fn apply_selection(mut selected: MessageReader<BodySelected>, mut panel: ResMut<InfoPanelState>) {
    for BodySelected(id) in selected.read() {
        panel.toggle(*id);
    }
}

/// System that renders the info panel.
pub fn info_panel(
    mut contexts: EguiContexts,
    mut panel: ResMut<InfoPanelState>,
    view: Res<ViewState>,
    positions: Res<BodyPositions>,
    mut navigate: MessageWriter<NavigateTo>,
) -> Result {
    let Some(id) = panel.selected else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;

    let panel_frame = egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 220))
        .inner_margin(egui::Margin::same(12));

    egui::SidePanel::right("info_panel")
        .resizable(false)
        .default_width(220.0)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(id.display_name());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("\u{2715}").on_hover_text("Close (Esc)").clicked() {
                        panel.close();
                    }
                });
            });
            ui.separator();
            ui.label(description(id));
            ui.add_space(8.0);

            let data = id.data();
            ui.label(format!("Radius: {:.1} units", data.radius));
            if let Some(orbit) = data.orbit {
                let around = id.parent().map_or("Sun", |p| p.display_name());
                ui.label(format!("Orbits the {around} at {:.0} units", orbit.semi_major_axis));
                ui.label(format!("Eccentricity: {:.4}", orbit.eccentricity));
            }

            ui.add_space(8.0);
            let focused = view.focused_body() == Some(id);
            let loaded = positions.contains(id);
            if ui
                .add_enabled(loaded && !focused, egui::Button::new("Fly to"))
                .clicked()
            {
                navigate.write(NavigateTo(Focus::Body(id)));
            }
        });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::bevy_test::headless_app;

    #[test]
    fn test_selecting_same_body_closes_panel() {
        let mut panel = InfoPanelState::default();
        panel.toggle(BodyId::Mars);
        assert_eq!(panel.selected, Some(BodyId::Mars));
        panel.toggle(BodyId::Earth);
        assert_eq!(panel.selected, Some(BodyId::Earth));
        panel.toggle(BodyId::Earth);
        assert_eq!(panel.selected, None);
    }

    #[test]
    fn test_selection_messages_reach_panel() {
        let mut app = headless_app();
        app.init_resource::<InfoPanelState>()
            .add_message::<BodySelected>()
            .add_systems(Update, apply_selection);

        app.world_mut().write_message(BodySelected(BodyId::Saturn));
        app.update();
        assert_eq!(app.world().resource::<InfoPanelState>().selected, Some(BodyId::Saturn));
    }

    #[test]
    fn test_every_body_has_a_description() {
        for id in BodyId::ALL {
            assert!(!description(id).is_empty());
        }
    }
}
