//! Eased camera transitions between two poses.
//!
//! A transition captures the live pose when it begins, interpolates position
//! and look-at target independently with a quadratic ease-in-out, and snaps
//! exactly onto the requested pose on its last frame.

use std::time::Duration;

use bevy::prelude::*;

use super::tracker::Focus;
use crate::types::CameraPose;

/// Shortest transition accepted; zero or negative durations are clamped to this.
pub const MIN_TRANSITION_DURATION: Duration = Duration::from_millis(1);

/// Quadratic ease-in-out on `t ∈ [0, 1]`.
///
/// `2t²` for the first half, `1 − 2(1 − t)²` for the second.
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let u = 1.0 - t;
        1.0 - 2.0 * u * u
    }
}

/// What a navigation command asks the transition engine to do.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRequest {
    /// Pose to arrive at
    pub end: CameraPose,
    /// Wall-clock duration of the flight
    pub duration: Duration,
    /// Focus committed to the view state on arrival
    pub focus: Focus,
    /// Camera offset committed to the view state on arrival
    pub offset: Vec3,
}

/// One frame of an advancing transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionFrame {
    /// Intermediate pose; more frames follow.
    InFlight(CameraPose),
    /// The exact requested pose; the transition is over.
    Arrived(CameraPose),
}

impl TransitionFrame {
    pub fn pose(&self) -> CameraPose {
        match self {
            TransitionFrame::InFlight(pose) | TransitionFrame::Arrived(pose) => *pose,
        }
    }
}

/// A transition in flight.
#[derive(Clone, Debug)]
pub struct CameraTransition {
    start: CameraPose,
    request: TransitionRequest,
    elapsed: Duration,
    /// Damping setting to put back on the orbit control when the flight ends
    restore_damping: bool,
}

impl CameraTransition {
    /// Begin a transition from the current live pose.
    ///
    /// `current_damping` is the orbit control's damping flag before the
    /// transition forces it on.
    pub fn begin(start: CameraPose, mut request: TransitionRequest, current_damping: bool) -> Self {
        request.duration = request.duration.max(MIN_TRANSITION_DURATION);
        Self {
            start,
            request,
            elapsed: Duration::ZERO,
            restore_damping: current_damping,
        }
    }

    pub fn request(&self) -> &TransitionRequest {
        &self.request
    }

    pub fn restore_damping(&self) -> bool {
        self.restore_damping
    }

    /// Linear progress `min(elapsed / duration, 1)`.
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f32() / self.request.duration.as_secs_f32()).min(1.0)
    }

    /// Pose at linear progress `t`. At `t ≥ 1` this is exactly the end pose.
    pub fn pose_at(&self, t: f32) -> CameraPose {
        if t >= 1.0 {
            self.request.end
        } else {
            self.start.lerp(&self.request.end, ease_in_out_quad(t))
        }
    }

    /// Advance by one frame's wall-clock delta.
    pub fn advance(&mut self, delta: Duration) -> TransitionFrame {
        self.elapsed = self.elapsed.saturating_add(delta);
        let t = self.progress();
        if t >= 1.0 {
            TransitionFrame::Arrived(self.request.end)
        } else {
            TransitionFrame::InFlight(self.pose_at(t))
        }
    }
}

/// The single transition allowed to run at a time.
#[derive(Resource, Default, Debug)]
pub struct ActiveTransition(pub Option<CameraTransition>);

impl ActiveTransition {
    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    /// Start a transition, replacing any one in flight.
    ///
    /// A replaced transition never commits its focus. The damping value to
    /// restore is carried over, so the orbit control gets back the setting it
    /// had before the first of the chained transitions forced damping on.
    pub fn replace(&mut self, start: CameraPose, request: TransitionRequest, current_damping: bool) {
        let restore = self
            .0
            .as_ref()
            .map_or(current_damping, CameraTransition::restore_damping);
        self.0 = Some(CameraTransition::begin(start, request, restore));
    }
}

/// Run condition: no transition is in flight.
pub fn no_transition(active: Res<ActiveTransition>) -> bool {
    !active.is_active()
}
