//! Shared simulation types, frame ordering and scene constants.

use std::time::Duration;

use bevy::prelude::*;

/// Ordering of the per-frame pipeline.
///
/// Bodies are moved before the camera reads their positions, and picking
/// always sees the camera pose that will be rendered this frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Advance the simulated clock.
    Clock,
    /// Move bodies along their orbits (parents before satellites).
    Orbits,
    /// Free-orbit control input and interaction start/end events.
    Controls,
    /// View-state bookkeeping, transitions and tracking.
    Camera,
    /// Pointer selection against the final camera pose.
    Picking,
}

/// Chain the frame sets in pipeline order.
pub fn configure_frame_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameSet::Clock,
            FrameSet::Orbits,
            FrameSet::Controls,
            FrameSet::Camera,
            FrameSet::Picking,
        )
            .chain(),
    );
}

/// Length of one display frame at the reference refresh rate, in milliseconds.
///
/// Per-frame rates in the body catalogue (spin) are expressed against this.
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Slowest allowed simulation speed multiplier.
pub const MIN_SPEED: f64 = 0.1;

/// Fastest allowed simulation speed multiplier.
pub const MAX_SPEED: f64 = 10.0;

/// A camera position together with the point it looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Interpolate position and target independently.
    pub fn lerp(&self, other: &CameraPose, s: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, s),
            target: self.target.lerp(other.target, s),
        }
    }
}

/// Speed, direction and pause state of the simulated clock.
///
/// Read each frame by the orbit model and the spin update; written by the
/// time controls panel and keyboard shortcuts.
#[derive(Resource, Clone, Debug)]
pub struct SimulationControl {
    /// Simulated time in milliseconds since start (may go negative in reverse)
    pub elapsed_ms: f64,
    /// Speed multiplier applied to real elapsed time
    pub speed: f64,
    /// Whether simulated time runs backwards
    pub reverse: bool,
    /// Whether simulated time is frozen
    pub paused: bool,
}

impl Default for SimulationControl {
    fn default() -> Self {
        Self {
            elapsed_ms: 0.0,
            speed: 1.0,
            reverse: false,
            paused: false,
        }
    }
}

impl SimulationControl {
    /// Create a paused clock at a given simulated time.
    pub fn paused_at(elapsed_ms: f64) -> Self {
        Self {
            elapsed_ms,
            paused: true,
            ..default()
        }
    }

    /// +1 forwards, -1 in reverse.
    pub fn direction(&self) -> f64 {
        if self.reverse { -1.0 } else { 1.0 }
    }

    /// Simulated milliseconds per real millisecond (0 while paused).
    pub fn rate(&self) -> f64 {
        if self.paused {
            0.0
        } else {
            self.speed * self.direction()
        }
    }

    /// Advance by a real-time step. Returns the simulated delta in milliseconds.
    pub fn advance(&mut self, real: Duration) -> f64 {
        let delta = real.as_secs_f64() * 1000.0 * self.rate();
        self.elapsed_ms += delta;
        delta
    }

    /// Set the speed multiplier, clamped to the supported range.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_advance_scales_by_speed() {
        let mut control = SimulationControl::default();
        control.set_speed(2.0);
        let delta = control.advance(Duration::from_millis(100));
        assert_relative_eq!(delta, 200.0, epsilon = 1e-9);
        assert_relative_eq!(control.elapsed_ms, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut control = SimulationControl::paused_at(42.0);
        control.advance(Duration::from_secs(3));
        assert_eq!(control.elapsed_ms, 42.0);
    }

    #[test]
    fn test_reverse_runs_backwards() {
        let mut control = SimulationControl {
            reverse: true,
            ..default()
        };
        control.advance(Duration::from_millis(500));
        assert_relative_eq!(control.elapsed_ms, -500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut control = SimulationControl::default();
        control.set_speed(1000.0);
        assert_eq!(control.speed, MAX_SPEED);
        control.set_speed(0.0);
        assert_eq!(control.speed, MIN_SPEED);
    }

    #[test]
    fn test_pose_lerp_endpoints() {
        let a = CameraPose::new(Vec3::ZERO, Vec3::X);
        let b = CameraPose::new(Vec3::splat(10.0), Vec3::Y);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }
}
