//! UI module providing the egui panels.

pub mod info_panel;
mod loading_overlay;
mod navigation;
mod time_controls;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass};

use crate::camera::UiPointerCapture;
use crate::loading::scene_ready;
use crate::types::FrameSet;

pub use info_panel::InfoPanelState;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InfoPanelState>()
            // Selection bookkeeping doesn't need egui context - can stay in Update
            .add_systems(Update, info_panel::apply_selection.after(FrameSet::Picking))
            .add_systems(
                EguiPrimaryContextPass,
                (
                    loading_overlay::loading_overlay,
                    (
                        navigation::navigation_panel,
                        time_controls::time_controls_panel,
                        info_panel::info_panel,
                    )
                        .run_if(scene_ready),
                    update_pointer_capture,
                )
                    .chain(),
            );
    }
}

/// Record whether egui owns the pointer, for the camera and picking.
fn update_pointer_capture(
    mut contexts: EguiContexts,
    mut capture: ResMut<UiPointerCapture>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    capture.0 = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    Ok(())
}
