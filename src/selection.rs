//! Pointer selection: which body did the user click or tap?
//!
//! Mouse releases and touch taps are normalized to device coordinates, a ray
//! is cast from the camera, and the nearest hit is walked up the hierarchy to
//! the first named entity. Touches only count as taps when they stay within
//! [`TapSettings`] limits.

use std::str::FromStr;
use std::time::Duration;

use bevy::ecs::system::SystemParam;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bodies::BodyId;
use crate::camera::{MainCamera, UiPointerCapture, ViewState};
use crate::loading::LoadingState;
use crate::render::background::Star;
use crate::types::FrameSet;

/// A body was picked by the user.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodySelected(pub BodyId);

/// How far and how long a touch may travel and still count as a tap, and
/// how far the mouse may move between press and release of a click.
#[derive(Resource, Clone, Debug)]
pub struct TapSettings {
    /// Maximum press-to-release distance in logical pixels
    pub max_distance: f32,
    pub max_duration: Duration,
    /// A click whose cursor travelled further than this was a camera drag
    pub max_click_travel: f32,
}

impl Default for TapSettings {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            max_duration: Duration::from_millis(500),
            max_click_travel: 5.0,
        }
    }
}

impl TapSettings {
    pub fn is_tap(&self, from: Vec2, to: Vec2, held: Duration) -> bool {
        from.distance(to) < self.max_distance && held < self.max_duration
    }
}

/// Raw pointer input, in logical window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Left mouse button pressed.
    Press { position: Vec2 },
    /// Left mouse button released.
    Click { position: Vec2 },
    /// A finger went down at wall-clock time `at`.
    TouchStart { position: Vec2, at: Duration },
    /// A finger lifted at wall-clock time `at`.
    TouchEnd { position: Vec2, at: Duration },
}

/// Conditions under which selection is suppressed.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputGate {
    pub loading: bool,
    pub interacting: bool,
}

impl InputGate {
    pub fn is_open(&self) -> bool {
        !self.loading && !self.interacting
    }
}

/// Window pixels to normalized device coordinates, y up.
pub fn viewport_to_ndc(position: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        position.x / viewport.x * 2.0 - 1.0,
        -(position.y / viewport.y) * 2.0 + 1.0,
    )
}

/// Ray from the camera through a point in device coordinates.
pub fn ray_from_ndc(camera: &Camera, transform: &GlobalTransform, ndc: Vec2) -> Option<Ray3d> {
    // Reverse-Z: depth 1 is the near plane
    let near = camera.ndc_to_world(transform, ndc.extend(1.0))?;
    let far = camera.ndc_to_world(transform, ndc.extend(f32::EPSILON))?;
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// Names and parents of scene entities.
pub trait SceneHierarchy {
    fn name(&self, entity: Entity) -> Option<&str>;
    fn parent(&self, entity: Entity) -> Option<Entity>;
}

/// Walk from a hit entity up to the first ancestor with a non-empty name.
pub fn selection_name(hierarchy: &impl SceneHierarchy, hit: Entity) -> Option<String> {
    let mut current = Some(hit);
    while let Some(entity) = current {
        match hierarchy.name(entity) {
            Some(name) if !name.is_empty() => return Some(name.to_string()),
            _ => current = hierarchy.parent(entity),
        }
    }
    None
}

/// ECS view of the scene hierarchy.
#[derive(SystemParam)]
pub struct EntityHierarchy<'w, 's> {
    names: Query<'w, 's, &'static Name>,
    parents: Query<'w, 's, &'static ChildOf>,
}

impl SceneHierarchy for EntityHierarchy<'_, '_> {
    fn name(&self, entity: Entity) -> Option<&str> {
        self.names.get(entity).ok().map(Name::as_str)
    }

    fn parent(&self, entity: Entity) -> Option<Entity> {
        self.parents.get(entity).ok().map(ChildOf::parent)
    }
}

/// Press tracking between touch start and end, and mouse press and release.
#[derive(Resource, Default, Debug)]
pub struct InteractionDispatcher {
    touch_start: Option<(Vec2, Duration)>,
    mouse_press: Option<Vec2>,
}

impl InteractionDispatcher {
    /// Resolve one pointer event to the name of the selected entity.
    ///
    /// `cast` takes a point in device coordinates and returns the nearest hit.
    /// Touch starts and mouse presses are recorded even while the gate is
    /// closed so the next release is measured from the right press. A mouse
    /// release far from its press ends a drag and selects nothing.
    pub fn handle_pointer_event(
        &mut self,
        event: PointerEvent,
        gate: InputGate,
        settings: &TapSettings,
        viewport: Vec2,
        hierarchy: &impl SceneHierarchy,
        mut cast: impl FnMut(Vec2) -> Option<Entity>,
    ) -> Option<String> {
        let position = match event {
            PointerEvent::TouchStart { position, at } => {
                self.touch_start = Some((position, at));
                return None;
            }
            PointerEvent::TouchEnd { position, at } => {
                let (start, pressed_at) = self.touch_start.take()?;
                if !settings.is_tap(start, position, at.saturating_sub(pressed_at)) {
                    return None;
                }
                position
            }
            PointerEvent::Press { position } => {
                self.mouse_press = Some(position);
                return None;
            }
            PointerEvent::Click { position } => {
                if let Some(pressed_at) = self.mouse_press.take()
                    && pressed_at.distance(position) > settings.max_click_travel
                {
                    return None;
                }
                position
            }
        };

        if !gate.is_open() || viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }

        let hit = cast(viewport_to_ndc(position, viewport))?;
        selection_name(hierarchy, hit)
    }
}

/// Plugin providing click and tap selection of bodies.
pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TapSettings>()
            .init_resource::<InteractionDispatcher>()
            .add_message::<BodySelected>()
            .add_systems(Update, dispatch_pointer.in_set(FrameSet::Picking));
    }
}

/// Collect this frame's pointer events from mouse and touch input.
fn pointer_events(
    buttons: &ButtonInput<MouseButton>,
    touches: &Touches,
    cursor: Option<Vec2>,
    now: Duration,
) -> Vec<PointerEvent> {
    let mut events: Vec<PointerEvent> = touches
        .iter_just_pressed()
        .map(|touch| PointerEvent::TouchStart {
            position: touch.position(),
            at: now,
        })
        .collect();
    events.extend(touches.iter_just_released().map(|touch| PointerEvent::TouchEnd {
        position: touch.position(),
        at: now,
    }));
    if let Some(position) = cursor {
        if buttons.just_pressed(MouseButton::Left) {
            events.push(PointerEvent::Press { position });
        }
        if buttons.just_released(MouseButton::Left) {
            events.push(PointerEvent::Click { position });
        }
    }
    events
}

fn dispatch_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    time: Res<Time<Real>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &Transform), With<MainCamera>>,
    stars: Query<(), With<Star>>,
    loading: Res<LoadingState>,
    view: Res<ViewState>,
    ui_capture: Res<UiPointerCapture>,
    settings: Res<TapSettings>,
    mut dispatcher: ResMut<InteractionDispatcher>,
    mut ray_cast: MeshRayCast,
    hierarchy: EntityHierarchy,
    mut selected: MessageWriter<BodySelected>,
) -> Result {
    let window = windows.single()?;
    let events = pointer_events(&buttons, &touches, window.cursor_position(), time.elapsed());
    if events.is_empty() {
        return Ok(());
    }

    let (camera, transform) = cameras.single()?;
    // This frame's pose; GlobalTransform is only propagated after Update
    let camera_transform = GlobalTransform::from(*transform);
    let viewport = window.size();
    let gate = InputGate {
        loading: loading.is_loading(),
        interacting: view.is_interacting() || ui_capture.0,
    };
    let filter = |entity: Entity| !stars.contains(entity);
    let settings_for_cast = MeshRayCastSettings::default().with_filter(&filter);

    for event in events {
        let name = dispatcher.handle_pointer_event(
            event,
            gate,
            &settings,
            viewport,
            &hierarchy,
            |ndc| {
                let ray = ray_from_ndc(camera, &camera_transform, ndc)?;
                ray_cast
                    .cast_ray(ray, &settings_for_cast)
                    .first()
                    .map(|(entity, _)| *entity)
            },
        );
        let Some(name) = name else {
            continue;
        };
        match BodyId::from_str(&name) {
            Ok(id) => {
                info!("Selected {id}");
                selected.write(BodySelected(id));
            }
            Err(err) => debug!("Ignoring pick: {err}"),
        }
    }
    Ok(())
}
