//! Test utilities for camera and scene tests.
//!
//! Provides fixtures for body positions and headless Bevy apps with an
//! injectable frame step.

use bevy::prelude::*;

use crate::bodies::{BodyId, BodyPositions, body_position};

/// Fixtures for scene state.
pub mod fixtures {
    use super::*;

    /// Snapshot of the given bodies at a simulated time.
    pub fn positions_at(ids: &[BodyId], sim_ms: f64) -> BodyPositions {
        ids.iter()
            .map(|&id| (id, body_position(id, sim_ms).as_vec3()))
            .collect()
    }

    /// Snapshot of every body at a simulated time.
    pub fn all_positions_at(sim_ms: f64) -> BodyPositions {
        positions_at(&BodyId::ALL, sim_ms)
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use std::time::Duration;

    use bevy::input::InputPlugin;
    use bevy::prelude::*;
    use bevy::time::TimeUpdateStrategy;

    use crate::types::configure_frame_sets;

    /// Create a minimal Bevy app for testing without rendering.
    ///
    /// MinimalPlugins plus input resources, with the frame sets chained.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin));
        configure_frame_sets(&mut app);
        app
    }

    /// Headless app whose clock advances by exactly `step` per update.
    ///
    /// The very first update still reports a zero delta.
    pub fn headless_app_with_step(step: Duration) -> App {
        let mut app = headless_app();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_all_positions_cover_catalogue() {
        let positions = fixtures::all_positions_at(0.0);
        for id in BodyId::ALL {
            assert!(positions.contains(id), "{id} missing");
        }
    }

    #[test]
    fn test_manual_step_drives_real_time() {
        let mut app = bevy_test::headless_app_with_step(Duration::from_millis(50));
        for _ in 0..3 {
            app.update();
        }
        let real = app.world().resource::<Time<Real>>();
        assert_eq!(real.delta(), Duration::from_millis(50));
    }
}
