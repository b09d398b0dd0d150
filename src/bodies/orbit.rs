//! Elliptical orbit model: position of a body as a function of simulated time.
//!
//! The ellipse is parameterized by the angle `θ = phase + t·ω`, with the
//! parent body at one focus. Time is in simulated milliseconds and distances
//! in scene units.

use bevy::math::DVec3;
use std::f64::consts::TAU;

/// Orbital parameters of a body around its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis in scene units
    pub semi_major_axis: f64,
    /// Eccentricity (dimensionless, 0 ≤ e < 1)
    pub eccentricity: f64,
    /// Angular speed in radians per simulated millisecond
    pub angular_speed: f64,
    /// Angle at t = 0 in radians
    pub phase: f64,
    /// Amplitude of the out-of-plane (y) oscillation in scene units
    pub vertical_wobble: f64,
}

impl OrbitalElements {
    /// Create an in-plane orbit starting at periapsis.
    pub const fn new(semi_major_axis: f64, eccentricity: f64, angular_speed: f64) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            angular_speed,
            phase: 0.0,
            vertical_wobble: 0.0,
        }
    }

    /// Set the out-of-plane oscillation amplitude.
    pub const fn with_vertical_wobble(mut self, amplitude: f64) -> Self {
        self.vertical_wobble = amplitude;
        self
    }

    /// Set the starting angle.
    pub const fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// b = a·√(1 − e²)
    pub fn semi_minor_axis(&self) -> f64 {
        let e = self.eccentricity;
        self.semi_major_axis * (1.0 - e * e).sqrt()
    }

    /// Distance from the ellipse centre to the focus (a·e).
    pub fn focal_offset(&self) -> f64 {
        self.semi_major_axis * self.eccentricity
    }

    /// Orbit angle at a simulated time. Not normalized; trig handles wrap-around.
    pub fn angle_at(&self, sim_ms: f64) -> f64 {
        self.phase + sim_ms * self.angular_speed
    }

    /// Position relative to the parent at a simulated time.
    pub fn local_position(&self, sim_ms: f64) -> DVec3 {
        self.position_at_angle(self.angle_at(sim_ms))
    }

    /// Position relative to the parent for a given orbit angle.
    pub fn position_at_angle(&self, theta: f64) -> DVec3 {
        let (sin, cos) = theta.sin_cos();
        DVec3::new(
            self.semi_major_axis * cos - self.focal_offset(),
            self.vertical_wobble * sin,
            self.semi_minor_axis() * sin,
        )
    }

    /// Time for one full revolution in simulated milliseconds.
    ///
    /// Infinite for a body that does not move.
    pub fn period(&self) -> f64 {
        if self.angular_speed == 0.0 {
            f64::INFINITY
        } else {
            TAU / self.angular_speed.abs()
        }
    }

    /// Closed polyline around the orbit, relative to the parent.
    ///
    /// The first point is repeated at the end so the path renders closed.
    pub fn sample_path(&self, segments: u32) -> Vec<DVec3> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| self.position_at_angle(TAU * i as f64 / segments as f64))
            .collect()
    }
}
