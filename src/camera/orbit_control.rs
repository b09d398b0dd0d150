//! Free-orbit camera control around a look-at target.
//!
//! Left-drag (or a one-finger drag) rotates, the wheel zooms. The control
//! keeps no position of its own: every frame it reads the camera transform,
//! converts it to spherical coordinates around `target`, applies pending
//! input and writes it back. Tracking and transitions can therefore move the
//! camera freely between frames.

use std::f32::consts::{FRAC_PI_4, TAU};

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::MainCamera;
use super::transition::ActiveTransition;

/// The user grabbed the camera (button/finger down or a wheel step).
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct InteractionStarted;

/// The user let go of the camera.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct InteractionEnded;

/// Whether egui is using the pointer this frame.
///
/// Written by the UI layer; presses over a panel never grab the camera.
#[derive(Resource, Default, Debug)]
pub struct UiPointerCapture(pub bool);

/// Orbit control state attached to the main camera.
#[derive(Component, Clone, Debug)]
pub struct OrbitControl {
    /// Point the camera orbits and looks at
    pub target: Vec3,
    pub enable_damping: bool,
    /// Fraction of the pending rotation applied per frame when damping
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits, measured from +Y
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub auto_rotate: bool,
    /// Auto-rotation speed; 1.0 is one turn per minute
    pub auto_rotate_speed: f32,
    /// Rotation per window height of drag, in full turns
    pub rotate_speed: f32,
    /// Distance scale per wheel line
    pub zoom_step: f32,
    /// Pending (azimuth, polar) rotation in radians
    rotate_delta: Vec2,
    /// Pending distance scale
    zoom_scale: f32,
    dragging: bool,
}

impl Default for OrbitControl {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: 0.15,
            min_distance: 0.4,
            max_distance: 10_000.0,
            min_polar_angle: FRAC_PI_4,
            max_polar_angle: 3.0 * FRAC_PI_4,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            rotate_speed: 1.0,
            zoom_step: 0.95,
            rotate_delta: Vec2::ZERO,
            zoom_scale: 1.0,
            dragging: false,
        }
    }
}

impl OrbitControl {
    pub fn looking_at(target: Vec3) -> Self {
        Self {
            target,
            ..default()
        }
    }

    /// Queue a drag of `pixels` in a viewport `viewport_height` pixels tall.
    pub fn rotate_by_pixels(&mut self, pixels: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        // Dragging right or down swings the camera left or up
        self.rotate_delta -= TAU * self.rotate_speed * pixels / viewport_height;
    }

    /// Queue a zoom of `lines` wheel lines; positive zooms in.
    pub fn zoom_by_lines(&mut self, lines: f32) {
        self.zoom_scale *= self.zoom_step.powf(lines);
    }

    /// Drop pending rotation and zoom.
    pub fn clear_pending(&mut self) {
        self.rotate_delta = Vec2::ZERO;
        self.zoom_scale = 1.0;
    }

    /// Apply pending input and auto-rotation to a camera position.
    ///
    /// Returns the new position; the target is unchanged.
    pub fn apply(&mut self, position: Vec3, dt_secs: f32) -> Vec3 {
        let offset = position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            self.clear_pending();
            return position;
        }

        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.auto_rotate && !self.dragging {
            azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt_secs;
        }

        let step = if self.enable_damping {
            self.rotate_delta * self.damping_factor
        } else {
            self.rotate_delta
        };
        azimuth += step.x;
        polar = (polar + step.y).clamp(self.min_polar_angle, self.max_polar_angle);
        let radius = (radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.rotate_delta *= 1.0 - self.damping_factor;
        } else {
            self.rotate_delta = Vec2::ZERO;
        }
        self.zoom_scale = 1.0;

        let (sin_polar, cos_polar) = polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();
        self.target
            + radius * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }
}

/// Read pointer input, emit interaction messages and move the camera.
///
/// Rotation is suspended while a transition is in flight; the press and
/// release are still reported.
pub fn orbit_control_input(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    touches: Res<Touches>,
    ui_capture: Res<UiPointerCapture>,
    active: Res<ActiveTransition>,
    time: Res<Time<Real>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<(&mut Transform, &mut OrbitControl), With<MainCamera>>,
    mut started: MessageWriter<InteractionStarted>,
    mut ended: MessageWriter<InteractionEnded>,
) -> Result {
    let (mut transform, mut control) = cameras.single_mut()?;
    let viewport_height = windows.single().map_or(720.0, |w| w.height());

    let pressed = buttons.just_pressed(MouseButton::Left) || touches.any_just_pressed();
    if pressed && !control.dragging && !ui_capture.0 {
        control.dragging = true;
        started.write(InteractionStarted);
    }

    if control.dragging {
        let drag = if let Some(touch) = touches.iter().next() {
            touch.delta()
        } else {
            motion.delta
        };
        if !active.is_active() {
            control.rotate_by_pixels(drag, viewport_height);
        }

        let released = !buttons.pressed(MouseButton::Left) && touches.iter().next().is_none();
        if released {
            control.dragging = false;
            ended.write(InteractionEnded);
        }
    } else if scroll.delta.y != 0.0 && !ui_capture.0 {
        let lines = match scroll.unit {
            MouseScrollUnit::Line => scroll.delta.y,
            MouseScrollUnit::Pixel => scroll.delta.y / 100.0,
        };
        // A wheel step is a complete interaction of its own
        started.write(InteractionStarted);
        if !active.is_active() {
            control.zoom_by_lines(lines);
        }
        ended.write(InteractionEnded);
    }

    if active.is_active() {
        control.clear_pending();
        return Ok(());
    }

    let position = control.apply(transform.translation, time.delta_secs());
    transform.translation = position;
    transform.look_at(control.target, Vec3::Y);
    Ok(())
}
