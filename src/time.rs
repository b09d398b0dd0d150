//! Time advancement for the simulated clock.
//!
//! Handles progression of simulated time based on speed, direction and pause state.

use bevy::prelude::*;

use crate::types::{FrameSet, SimulationControl};

/// Plugin providing simulated clock advancement.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationControl>()
            .add_systems(Update, advance_time.in_set(FrameSet::Clock));
    }
}

/// Advance simulated time by the real frame delta.
///
/// The real delta is wall-clock; `SimulationControl` decides how much of it
/// reaches the orbits (speed, reverse, pause).
fn advance_time(mut control: ResMut<SimulationControl>, time: Res<Time>) {
    control.advance(time.delta());
}
