//! Keyboard shortcuts for simulation time, navigation and overlays.

use bevy::prelude::*;

use crate::bodies::BodyId;
use crate::camera::{Focus, NavigateTo};
use crate::loading::scene_ready;
use crate::render::SceneOverlays;
use crate::types::{FrameSet, SimulationControl};
use crate::ui::InfoPanelState;

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    TogglePause,
    ToggleReverse,
    Slower,
    Faster,
    Navigate(Focus),
    ToggleOverlays,
    CloseInfo,
}

const DIGITS: [KeyCode; 10] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
    KeyCode::Digit0,
];

/// Map a key to its shortcut. Digits 1-9 then 0 follow the menu order.
pub fn shortcut_for(key: KeyCode) -> Option<Shortcut> {
    let shortcut = match key {
        KeyCode::Space => Shortcut::TogglePause,
        KeyCode::KeyR => Shortcut::ToggleReverse,
        KeyCode::BracketLeft => Shortcut::Slower,
        KeyCode::BracketRight => Shortcut::Faster,
        KeyCode::KeyO => Shortcut::Navigate(Focus::Overview),
        KeyCode::KeyT => Shortcut::ToggleOverlays,
        KeyCode::Escape => Shortcut::CloseInfo,
        other => {
            let index = DIGITS.iter().position(|digit| *digit == other)?;
            Shortcut::Navigate(Focus::Body(BodyId::NAVIGABLE[index]))
        }
    };
    Some(shortcut)
}

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            keyboard_shortcuts
                .run_if(scene_ready)
                .before(FrameSet::Clock),
        );
    }
}

/// Handle keyboard shortcuts for simulation control and navigation.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut control: ResMut<SimulationControl>,
    mut overlays: ResMut<SceneOverlays>,
    mut info: ResMut<InfoPanelState>,
    mut navigate: MessageWriter<NavigateTo>,
) {
    for shortcut in keys.get_just_pressed().filter_map(|key| shortcut_for(*key)) {
        match shortcut {
            Shortcut::TogglePause => {
                control.paused = !control.paused;
                info!("Simulation {}", if control.paused { "paused" } else { "running" });
            }
            Shortcut::ToggleReverse => {
                control.reverse = !control.reverse;
                info!("Time runs {}", if control.reverse { "backwards" } else { "forwards" });
            }
            Shortcut::Slower => {
                let speed = control.speed * 0.5;
                control.set_speed(speed);
                info!("Time scale: {}x", control.speed);
            }
            Shortcut::Faster => {
                let speed = control.speed * 2.0;
                control.set_speed(speed);
                info!("Time scale: {}x", control.speed);
            }
            Shortcut::Navigate(focus) => {
                navigate.write(NavigateTo(focus));
            }
            Shortcut::ToggleOverlays => overlays.toggle(),
            Shortcut::CloseInfo => info.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::LoadingState;
    use crate::types::configure_frame_sets;
    use bevy::ecs::message::Messages;
    use std::time::Duration;

    #[test]
    fn test_digits_follow_menu_order() {
        assert_eq!(
            shortcut_for(KeyCode::Digit1),
            Some(Shortcut::Navigate(Focus::Body(BodyId::Sun)))
        );
        assert_eq!(
            shortcut_for(KeyCode::Digit6),
            Some(Shortcut::Navigate(Focus::Body(BodyId::Mars)))
        );
        assert_eq!(
            shortcut_for(KeyCode::Digit0),
            Some(Shortcut::Navigate(Focus::Body(BodyId::Neptune)))
        );
        assert_eq!(shortcut_for(KeyCode::KeyZ), None);
    }

    /// Without bevy's input plugin, so pressed keys are not cleared in PreUpdate.
    fn shortcut_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        configure_frame_sets(&mut app);
        app.init_resource::<ButtonInput<KeyCode>>();
        let mut loading = LoadingState::default();
        loading.tick(Duration::ZERO, true, &Default::default());
        loading.tick(Duration::from_secs(60), true, &Default::default());
        app.insert_resource(loading)
            .init_resource::<SimulationControl>()
            .init_resource::<SceneOverlays>()
            .init_resource::<InfoPanelState>()
            .add_message::<NavigateTo>()
            .add_plugins(InputPlugin);
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release_all();
        keys.clear();
        keys.press(key);
    }

    #[test]
    fn test_space_toggles_pause() {
        let mut app = shortcut_app();
        press(&mut app, KeyCode::Space);
        app.update();
        assert!(app.world().resource::<SimulationControl>().paused);
    }

    #[test]
    fn test_bracket_doubles_speed_up_to_limit() {
        let mut app = shortcut_app();
        for _ in 0..6 {
            press(&mut app, KeyCode::BracketRight);
            app.update();
        }
        assert_eq!(app.world().resource::<SimulationControl>().speed, crate::types::MAX_SPEED);
    }

    #[test]
    fn test_overview_key_requests_navigation() {
        let mut app = shortcut_app();
        press(&mut app, KeyCode::KeyO);
        app.update();

        let messages = app.world().resource::<Messages<NavigateTo>>();
        let mut cursor = messages.get_cursor();
        let sent: Vec<_> = cursor.read(messages).copied().collect();
        assert_eq!(sent, vec![NavigateTo(Focus::Overview)]);
    }
}
