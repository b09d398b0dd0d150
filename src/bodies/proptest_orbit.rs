//! Property-based tests for the orbit model using proptest.
//!
//! These tests verify that orbit positions keep the expected geometric
//! properties across a wide range of parameters.

use proptest::prelude::*;
use std::f64::consts::TAU;

use super::orbit::OrbitalElements;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// One full period brings every body back to where it started.
    #[test]
    fn prop_orbit_closes_after_one_period(
        semi_major_axis in 1.0f64..1000.0,
        eccentricity in 0.0f64..0.99,
        angular_speed in 1e-5f64..1e-2,
        start in -1e6f64..1e6,
    ) {
        let orbit = OrbitalElements::new(semi_major_axis, eccentricity, angular_speed);
        let p0 = orbit.local_position(start);
        let p1 = orbit.local_position(start + orbit.period());

        let tolerance = 1e-6 * semi_major_axis.max(1.0);
        prop_assert!(
            (p1 - p0).length() < tolerance,
            "orbit did not close: {:?} vs {:?}", p0, p1
        );
    }

    /// Every sampled point satisfies the ellipse equation around the shifted centre.
    ///
    /// ((x + a·e)/a)² + (z/b)² = 1
    #[test]
    fn prop_points_lie_on_focus_shifted_ellipse(
        semi_major_axis in 1.0f64..1000.0,
        eccentricity in 0.0f64..0.99,
        theta in 0.0f64..TAU,
    ) {
        let orbit = OrbitalElements::new(semi_major_axis, eccentricity, 1e-3);
        let p = orbit.position_at_angle(theta);
        let u = (p.x + orbit.focal_offset()) / orbit.semi_major_axis;
        let v = p.z / orbit.semi_minor_axis();
        prop_assert!(((u * u + v * v) - 1.0).abs() < 1e-9, "u²+v² = {}", u * u + v * v);
    }

    /// The origin (parent) is a focus: periapsis + apoapsis distance = 2a.
    #[test]
    fn prop_origin_is_a_focus(
        semi_major_axis in 1.0f64..1000.0,
        eccentricity in 0.0f64..0.99,
    ) {
        let orbit = OrbitalElements::new(semi_major_axis, eccentricity, 1e-3);
        let periapsis = orbit.position_at_angle(0.0).length();
        let apoapsis = orbit.position_at_angle(std::f64::consts::PI).length();
        prop_assert!((periapsis + apoapsis - 2.0 * semi_major_axis).abs() < 1e-9);
        prop_assert!((periapsis - semi_major_axis * (1.0 - eccentricity)).abs() < 1e-9);
    }
}
