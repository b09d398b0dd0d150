//! Camera controller: navigation, eased transitions and body tracking.
//!
//! Per frame, inside [`FrameSet::Camera`]:
//! 1. interaction start/end messages update the view state,
//! 2. a pending navigation replaces the active transition,
//! 3. tracking places the camera relative to the focused body,
//! 4. the active transition (if any) overrides the pose and may arrive.

pub mod orbit_control;
pub mod tracker;
pub mod transition;

pub use orbit_control::{InteractionEnded, InteractionStarted, OrbitControl, UiPointerCapture};
pub use tracker::{DEFAULT_POSE, Focus, ViewState};
pub use transition::{ActiveTransition, CameraTransition, TransitionFrame, TransitionRequest};

use bevy::prelude::*;

use crate::bodies::BodyPositions;
use crate::loading::{LoadingState, scene_ready};
use crate::types::{CameraPose, FrameSet};

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEG: f32 = 95.0;

/// Near clip plane distance.
pub const NEAR_PLANE: f32 = 5.0;

/// Far clip plane distance.
pub const FAR_PLANE: f32 = 10_000.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Ask the camera to fly to a body or to the overview.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigateTo(pub Focus);

/// Camera logic without the rendering camera itself.
///
/// Expects an entity carrying [`camera_rig`] components.
pub struct CameraControlPlugin;

impl Plugin for CameraControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewState>()
            .init_resource::<ActiveTransition>()
            .init_resource::<UiPointerCapture>()
            .add_message::<InteractionStarted>()
            .add_message::<InteractionEnded>()
            .add_message::<NavigateTo>()
            .add_systems(
                Update,
                orbit_control::orbit_control_input
                    .run_if(scene_ready)
                    .in_set(FrameSet::Controls),
            )
            .add_systems(
                Update,
                (
                    handle_interactions,
                    start_navigation,
                    track_focus.run_if(transition::no_transition),
                    step_transition,
                )
                    .chain()
                    .in_set(FrameSet::Camera),
            );
    }
}

/// Spawns the perspective camera driven by [`CameraControlPlugin`].
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

/// Components driven by the camera systems, placed at `pose`.
pub fn camera_rig(pose: CameraPose) -> impl Bundle {
    (
        MainCamera,
        OrbitControl::looking_at(pose.target),
        Transform::from_translation(pose.position).looking_at(pose.target, Vec3::Y),
    )
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: FIELD_OF_VIEW_DEG.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        camera_rig(DEFAULT_POSE),
    ));
}

/// Put the camera at `pose` and retarget the orbit control.
fn apply_pose(transform: &mut Transform, control: &mut OrbitControl, pose: CameraPose) {
    transform.translation = pose.position;
    if pose.position != pose.target {
        transform.look_at(pose.target, Vec3::Y);
    }
    control.target = pose.target;
}

fn current_pose(transform: &Transform, control: &OrbitControl) -> CameraPose {
    CameraPose::new(transform.translation, control.target)
}

/// Feed interaction start/end into the view state.
///
/// Starts are handled before ends, so a wheel step's start/end pair leaves
/// the view tracking again with the zoomed offset. While the scene is
/// loading, messages are drained unseen.
fn handle_interactions(
    mut started: MessageReader<InteractionStarted>,
    mut ended: MessageReader<InteractionEnded>,
    loading: Option<Res<LoadingState>>,
    mut view: ResMut<ViewState>,
    positions: Res<BodyPositions>,
    cameras: Query<(&Transform, &OrbitControl), With<MainCamera>>,
) -> Result {
    if !scene_ready(loading) {
        started.clear();
        ended.clear();
        return Ok(());
    }
    let (transform, control) = cameras.single()?;
    if started.read().count() > 0 {
        view.on_interaction_start();
    }
    if ended.read().count() > 0 {
        view.on_interaction_end(current_pose(transform, control), &positions);
    }
    Ok(())
}

/// Turn the latest navigation command into a transition.
///
/// A new command replaces the one in flight. Commands for bodies that are
/// not loaded yet, or sent while the scene is loading, are dropped.
fn start_navigation(
    mut requests: MessageReader<NavigateTo>,
    loading: Option<Res<LoadingState>>,
    positions: Res<BodyPositions>,
    mut active: ResMut<ActiveTransition>,
    mut cameras: Query<(&Transform, &mut OrbitControl), With<MainCamera>>,
) -> Result {
    let Some(NavigateTo(target)) = requests.read().last().copied() else {
        return Ok(());
    };
    if !scene_ready(loading) {
        debug!("Navigation to {target} ignored: scene still loading");
        return Ok(());
    }
    let (transform, mut control) = cameras.single_mut()?;

    let Some(request) = ViewState::plan_navigation(target, &positions) else {
        info!("Navigation to {target} ignored: body not loaded yet");
        return Ok(());
    };

    info!("Flying to {target}");
    active.replace(current_pose(transform, &control), request, control.enable_damping);
    control.enable_damping = true;
    Ok(())
}

/// Keep the camera on the focused body while no transition runs.
fn track_focus(
    view: Res<ViewState>,
    positions: Res<BodyPositions>,
    time: Res<Time<Real>>,
    mut cameras: Query<(&mut Transform, &mut OrbitControl), With<MainCamera>>,
) -> Result {
    let (mut transform, mut control) = cameras.single_mut()?;
    let current = current_pose(&transform, &control);
    if let Some(pose) = view.tracked_pose(current, &positions, time.elapsed_secs()) {
        apply_pose(&mut transform, &mut control, pose);
    }
    Ok(())
}

/// Advance the active transition on wall-clock time.
fn step_transition(
    time: Res<Time<Real>>,
    mut active: ResMut<ActiveTransition>,
    mut view: ResMut<ViewState>,
    mut cameras: Query<(&mut Transform, &mut OrbitControl), With<MainCamera>>,
) -> Result {
    let Some(transition) = active.0.as_mut() else {
        return Ok(());
    };
    let (mut transform, mut control) = cameras.single_mut()?;

    let frame = transition.advance(time.delta());
    apply_pose(&mut transform, &mut control, frame.pose());

    if let TransitionFrame::Arrived(_) = frame {
        control.enable_damping = transition.restore_damping();
        let request = transition.request();
        view.commit(request.focus, request.offset);
        debug!("Arrived at {}", request.focus);
        active.0 = None;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{BodyId, body_position};
    use crate::test_utils::bevy_test::headless_app_with_step;
    use std::time::Duration;

    fn camera_app() -> App {
        let mut app = headless_app_with_step(Duration::from_millis(100));
        app.init_resource::<BodyPositions>();
        app.add_plugins(CameraControlPlugin);
        app.world_mut().spawn(camera_rig(DEFAULT_POSE));
        app
    }

    fn camera_translation(app: &mut App) -> Vec3 {
        app.world_mut()
            .query_filtered::<&Transform, With<MainCamera>>()
            .single(app.world())
            .unwrap()
            .translation
    }

    #[test]
    fn test_navigation_to_unloaded_body_starts_nothing() {
        let mut app = camera_app();
        app.world_mut().write_message(NavigateTo(Focus::Body(BodyId::Mars)));
        app.update();
        assert!(!app.world().resource::<ActiveTransition>().is_active());
        assert_eq!(app.world().resource::<ViewState>().focus(), None);
    }

    #[test]
    fn test_overview_transition_arrives_and_commits() {
        let mut app = camera_app();
        app.world_mut().write_message(NavigateTo(Focus::Overview));

        // 2 s flight in 100 ms steps; the first frame has no delta
        app.update();
        assert!(app.world().resource::<ActiveTransition>().is_active());
        for _ in 0..40 {
            app.update();
            if !app.world().resource::<ActiveTransition>().is_active() {
                break;
            }
        }

        let view = app.world().resource::<ViewState>();
        assert_eq!(view.focus(), Some(Focus::Overview));
        assert_eq!(view.offset(), tracker::OVERVIEW_OFFSET);
        assert!(!app.world().resource::<ActiveTransition>().is_active());
        assert_eq!(camera_translation(&mut app), tracker::OVERVIEW_POSITION);
    }

    fn reveal(app: &mut App) {
        let settings = crate::loading::LoadingSettings::default();
        let mut loading = app.world_mut().resource_mut::<LoadingState>();
        loading.tick(Duration::ZERO, true, &settings);
        loading.tick(settings.reveal_delay, true, &settings);
        assert!(!loading.is_loading());
    }

    #[test]
    fn test_input_is_inert_while_loading() {
        let mut app = camera_app();
        app.init_resource::<LoadingState>();
        app.update();

        app.world_mut().write_message(InteractionStarted);
        app.world_mut().write_message(NavigateTo(Focus::Overview));
        app.update();

        assert!(!app.world().resource::<ViewState>().is_interacting());
        assert!(!app.world().resource::<ActiveTransition>().is_active());

        // Nothing sent during loading is replayed once the scene shows
        reveal(&mut app);
        app.update();
        assert!(!app.world().resource::<ViewState>().is_interacting());
        assert!(!app.world().resource::<ActiveTransition>().is_active());

        app.world_mut().write_message(NavigateTo(Focus::Overview));
        app.update();
        assert!(app.world().resource::<ActiveTransition>().is_active());
    }

    #[test]
    fn test_damping_restored_after_arrival() {
        let mut app = camera_app();
        {
            let mut query = app.world_mut().query::<&mut OrbitControl>();
            query.single_mut(app.world_mut()).unwrap().enable_damping = false;
        }
        let mars = body_position(BodyId::Mars, 0.0).as_vec3();
        app.world_mut().resource_mut::<BodyPositions>().insert(BodyId::Mars, mars);
        app.world_mut().write_message(NavigateTo(Focus::Body(BodyId::Mars)));

        app.update();
        let mut query = app.world_mut().query::<&OrbitControl>();
        assert!(query.single(app.world()).unwrap().enable_damping);

        for _ in 0..20 {
            app.update();
        }
        let mut query = app.world_mut().query::<&OrbitControl>();
        assert!(!query.single(app.world()).unwrap().enable_damping);
    }
}
