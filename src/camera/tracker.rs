//! View state: what the camera is focused on and how it follows it.
//!
//! Two modes, switched by interaction start/end:
//! - Tracking: the camera sits at `body + offset` and looks at the body.
//! - Interacting: the user moves the camera; only the look-at target follows.

use std::fmt;
use std::time::Duration;

use bevy::prelude::*;

use super::transition::TransitionRequest;
use crate::bodies::{BodyId, BodyPositions};
use crate::types::CameraPose;

/// Flight time to a body.
pub const BODY_TRANSITION: Duration = Duration::from_millis(1500);

/// Flight time to the galactic overview.
pub const OVERVIEW_TRANSITION: Duration = Duration::from_millis(2000);

/// Camera position of the galactic overview.
pub const OVERVIEW_POSITION: Vec3 = Vec3::new(2800.0, 60.0, 60.0);

/// Look-at target of the galactic overview (the Milky Way).
pub const OVERVIEW_TARGET: Vec3 = Vec3::new(4000.0, 0.0, 0.0);

/// Offset committed with the overview focus.
pub const OVERVIEW_OFFSET: Vec3 = Vec3::new(0.0, 50.0, 50.0);

/// Pose before any navigation.
pub const DEFAULT_POSE: CameraPose = CameraPose {
    position: Vec3::new(10.0, 3.0, 180.0),
    target: Vec3::ZERO,
};

/// Amplitude of the idle drift added while tracking, in scene units.
pub const DRIFT_AMPLITUDE: f32 = 0.01;

/// What the camera is focused on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Focus {
    /// Follow a body along its orbit.
    Body(BodyId),
    /// Fixed galactic view; no tracking.
    Overview,
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Focus::Body(id) => write!(f, "{id}"),
            Focus::Overview => f.write_str("overview"),
        }
    }
}

/// Small wall-clock wobble added to the tracked camera position.
///
/// Bounded by `DRIFT_AMPLITUDE` in length.
pub fn drift(wall_secs: f32) -> Vec3 {
    let (sin, cos) = wall_secs.sin_cos();
    Vec3::new(sin, cos, 0.0) * DRIFT_AMPLITUDE
}

/// Focus, camera offset and the interacting flag for the session.
#[derive(Resource, Clone, Debug, Default)]
pub struct ViewState {
    focus: Option<Focus>,
    offset: Vec3,
    interacting: bool,
}

impl ViewState {
    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    /// The focused body, if the focus is a body.
    pub fn focused_body(&self) -> Option<BodyId> {
        match self.focus {
            Some(Focus::Body(id)) => Some(id),
            _ => None,
        }
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn is_interacting(&self) -> bool {
        self.interacting
    }

    pub fn on_interaction_start(&mut self) {
        self.interacting = true;
    }

    /// Leave interacting mode and keep the pose the user left the camera in.
    ///
    /// The offset is measured against the look-at target the camera was last
    /// placed against, not this frame's body position: the body may already
    /// have moved on while the camera has not been tracked yet. Calling this
    /// twice without moving the camera changes nothing.
    pub fn on_interaction_end(&mut self, camera: CameraPose, positions: &BodyPositions) {
        self.interacting = false;
        let Some(id) = self.focused_body() else {
            return;
        };
        if !positions.contains(id) {
            debug!("Focused body {id} not loaded; offset unchanged");
            return;
        }
        self.offset = camera.position - camera.target;
    }

    /// Set focus and offset, as done on transition arrival.
    pub fn commit(&mut self, focus: Focus, offset: Vec3) {
        self.focus = Some(focus);
        self.offset = offset;
    }

    /// Build the transition a navigation command asks for.
    ///
    /// `None` when the target body has no entity yet.
    pub fn plan_navigation(target: Focus, positions: &BodyPositions) -> Option<TransitionRequest> {
        match target {
            Focus::Body(id) => {
                let body = positions.get(id)?;
                let offset = id.view_offset();
                Some(TransitionRequest {
                    end: CameraPose::new(body + offset, body),
                    duration: BODY_TRANSITION,
                    focus: target,
                    offset,
                })
            }
            Focus::Overview => Some(TransitionRequest {
                end: CameraPose::new(OVERVIEW_POSITION, OVERVIEW_TARGET),
                duration: OVERVIEW_TRANSITION,
                focus: target,
                offset: OVERVIEW_OFFSET,
            }),
        }
    }

    /// Pose for this frame while no transition runs.
    ///
    /// `None` leaves the camera alone: no focus, overview focus, or the
    /// focused body is not loaded.
    pub fn tracked_pose(
        &self,
        current: CameraPose,
        positions: &BodyPositions,
        wall_secs: f32,
    ) -> Option<CameraPose> {
        let body = positions.get(self.focused_body()?)?;
        if self.interacting {
            Some(CameraPose::new(current.position, body))
        } else {
            Some(CameraPose::new(body + self.offset + drift(wall_secs), body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::body_position;
    use approx::assert_relative_eq;

    fn positions_at(sim_ms: f64) -> BodyPositions {
        [BodyId::Mars, BodyId::Earth, BodyId::Sun]
            .into_iter()
            .map(|id| (id, body_position(id, sim_ms).as_vec3()))
            .collect()
    }

    fn tracking(id: BodyId, offset: Vec3) -> ViewState {
        let mut view = ViewState::default();
        view.commit(Focus::Body(id), offset);
        view
    }

    #[test]
    fn test_initial_state_has_no_focus() {
        let view = ViewState::default();
        assert_eq!(view.focus(), None);
        assert!(!view.is_interacting());
        assert!(view.tracked_pose(DEFAULT_POSE, &positions_at(0.0), 0.0).is_none());
    }

    #[test]
    fn test_navigation_to_mars_uses_its_view_offset() {
        let positions = positions_at(0.0);
        let request = ViewState::plan_navigation(Focus::Body(BodyId::Mars), &positions).unwrap();
        let mars = positions.get(BodyId::Mars).unwrap();

        assert_eq!(request.offset, Vec3::new(15.0, 5.0, 15.0));
        assert_eq!(request.end.position, mars + Vec3::new(15.0, 5.0, 15.0));
        assert_eq!(request.end.target, mars);
        assert_eq!(request.duration, BODY_TRANSITION);
    }

    #[test]
    fn test_navigation_to_unloaded_body_is_dropped() {
        let positions = positions_at(0.0);
        assert!(ViewState::plan_navigation(Focus::Body(BodyId::Titan), &positions).is_none());
    }

    #[test]
    fn test_overview_is_a_fixed_pose() {
        let request = ViewState::plan_navigation(Focus::Overview, &BodyPositions::default()).unwrap();
        assert_eq!(request.end, CameraPose::new(OVERVIEW_POSITION, OVERVIEW_TARGET));
        assert_eq!(request.duration, OVERVIEW_TRANSITION);
        assert_eq!(request.offset, OVERVIEW_OFFSET);
    }

    #[test]
    fn test_overview_focus_disables_tracking() {
        let mut view = ViewState::default();
        view.commit(Focus::Overview, OVERVIEW_OFFSET);
        assert!(view.tracked_pose(DEFAULT_POSE, &positions_at(0.0), 1.0).is_none());
    }

    #[test]
    fn test_interaction_end_recomputes_offset() {
        let positions = positions_at(500.0);
        let mars = positions.get(BodyId::Mars).unwrap();
        let mut view = tracking(BodyId::Mars, Vec3::new(15.0, 5.0, 15.0));

        view.on_interaction_start();
        assert!(view.is_interacting());
        let dragged_to = CameraPose::new(mars + Vec3::new(-30.0, 12.0, 4.0), mars);
        view.on_interaction_end(dragged_to, &positions);

        assert!(!view.is_interacting());
        assert!((view.offset() - Vec3::new(-30.0, 12.0, 4.0)).length() < 1e-3);
    }

    #[test]
    fn test_interaction_end_measures_from_last_target() {
        // The camera was placed against Mars one frame ago; Mars has moved since
        let before = positions_at(500.0).get(BodyId::Mars).unwrap();
        let now = positions_at(550.0);
        assert!((now.get(BodyId::Mars).unwrap() - before).length() > 0.1);

        let offset = Vec3::new(15.0, 5.0, 15.0);
        let mut view = tracking(BodyId::Mars, offset);
        view.on_interaction_start();
        view.on_interaction_end(CameraPose::new(before + offset, before), &now);

        assert!((view.offset() - offset).length() < 1e-4);
    }

    #[test]
    fn test_interaction_end_is_idempotent() {
        let positions = positions_at(500.0);
        let mars = positions.get(BodyId::Mars).unwrap();
        let mut view = tracking(BodyId::Mars, Vec3::new(15.0, 5.0, 15.0));
        let camera = CameraPose::new(mars + Vec3::new(7.0, 1.0, -3.0), mars);

        view.on_interaction_end(camera, &positions);
        let first = view.offset();
        view.on_interaction_end(camera, &positions);
        assert_eq!(view.offset(), first);
    }

    #[test]
    fn test_interaction_end_without_body_focus_keeps_offset() {
        let mut view = ViewState::default();
        view.commit(Focus::Overview, OVERVIEW_OFFSET);
        view.on_interaction_start();
        view.on_interaction_end(CameraPose::new(Vec3::splat(99.0), Vec3::ZERO), &positions_at(0.0));
        assert_eq!(view.offset(), OVERVIEW_OFFSET);
    }

    #[test]
    fn test_interaction_end_on_unloaded_body_keeps_offset() {
        let offset = Vec3::new(20.0, 5.0, 20.0);
        let mut view = tracking(BodyId::Neptune, offset);
        view.on_interaction_start();
        view.on_interaction_end(CameraPose::new(Vec3::splat(99.0), Vec3::ZERO), &positions_at(0.0));
        assert!(!view.is_interacting());
        assert_eq!(view.offset(), offset);
    }

    #[test]
    fn test_tracking_invariant_within_drift() {
        let offset = Vec3::new(15.0, 5.0, 15.0);
        let view = tracking(BodyId::Mars, offset);

        for frame in 0..120 {
            let sim_ms = frame as f64 * 16.0;
            let wall = frame as f32 / 60.0;
            let positions = positions_at(sim_ms);
            let mars = positions.get(BodyId::Mars).unwrap();
            let pose = view.tracked_pose(DEFAULT_POSE, &positions, wall).unwrap();

            assert!(((pose.position - mars) - offset).length() < 0.02);
            assert_eq!(pose.target, mars);
        }
    }

    #[test]
    fn test_interacting_only_reaims() {
        let positions = positions_at(0.0);
        let mut view = tracking(BodyId::Earth, Vec3::new(15.0, 5.0, 15.0));
        view.on_interaction_start();

        let current = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        let pose = view.tracked_pose(current, &positions, 0.5).unwrap();
        assert_eq!(pose.position, current.position);
        assert_eq!(pose.target, positions.get(BodyId::Earth).unwrap());
    }

    #[test]
    fn test_drift_is_bounded() {
        for i in 0..100 {
            assert_relative_eq!(drift(i as f32 * 0.37).length(), DRIFT_AMPLITUDE, epsilon = 1e-6);
        }
    }
}
