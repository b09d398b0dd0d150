//! Static catalogue of the bodies in the scene.
//!
//! Orbital parameters are in scene units and radians per simulated
//! millisecond; they are tuned for a readable scene, not to physical scale.

use std::fmt;
use std::str::FromStr;

use bevy::math::DVec3;
use bevy::prelude::*;

use super::orbit::OrbitalElements;

/// Identifier for every named body in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Phobos,
    Deimos,
    Jupiter,
    Saturn,
    Titan,
    Uranus,
    Neptune,
    MilkyWay,
    Andromeda,
}

/// A scene name that matches no body.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown body name: {0:?}")]
pub struct UnknownBody(pub String);

impl BodyId {
    /// Every body, parents listed before their satellites.
    pub const ALL: [BodyId; 15] = [
        BodyId::Sun,
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Earth,
        BodyId::Moon,
        BodyId::Mars,
        BodyId::Phobos,
        BodyId::Deimos,
        BodyId::Jupiter,
        BodyId::Saturn,
        BodyId::Titan,
        BodyId::Uranus,
        BodyId::Neptune,
        BodyId::MilkyWay,
        BodyId::Andromeda,
    ];

    /// Bodies offered in the navigation menu, in menu order.
    pub const NAVIGABLE: [BodyId; 10] = [
        BodyId::Sun,
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Earth,
        BodyId::Moon,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
        BodyId::Uranus,
        BodyId::Neptune,
    ];

    /// Get the parent body (for moons)
    pub fn parent(&self) -> Option<BodyId> {
        match self {
            BodyId::Moon => Some(BodyId::Earth),
            BodyId::Phobos | BodyId::Deimos => Some(BodyId::Mars),
            BodyId::Titan => Some(BodyId::Saturn),
            _ => None,
        }
    }

    /// Scene name carried by the body's entity; what picking reports.
    pub fn name(&self) -> &'static str {
        match self {
            BodyId::Sun => "sun",
            BodyId::Mercury => "mercury",
            BodyId::Venus => "venus",
            BodyId::Earth => "earth",
            BodyId::Moon => "moon",
            BodyId::Mars => "mars",
            BodyId::Phobos => "phobos",
            BodyId::Deimos => "deimos",
            BodyId::Jupiter => "jupiter",
            BodyId::Saturn => "saturn",
            BodyId::Titan => "titan",
            BodyId::Uranus => "uranus",
            BodyId::Neptune => "neptune",
            BodyId::MilkyWay => "milkyway",
            BodyId::Andromeda => "andromeda",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            BodyId::Sun => "Sun",
            BodyId::Mercury => "Mercury",
            BodyId::Venus => "Venus",
            BodyId::Earth => "Earth",
            BodyId::Moon => "Moon",
            BodyId::Mars => "Mars",
            BodyId::Phobos => "Phobos",
            BodyId::Deimos => "Deimos",
            BodyId::Jupiter => "Jupiter",
            BodyId::Saturn => "Saturn",
            BodyId::Titan => "Titan",
            BodyId::Uranus => "Uranus",
            BodyId::Neptune => "Neptune",
            BodyId::MilkyWay => "Milky Way",
            BodyId::Andromeda => "Andromeda",
        }
    }

    /// Whether this body is a galaxy placed outside the solar system.
    pub fn is_galaxy(&self) -> bool {
        matches!(self, BodyId::MilkyWay | BodyId::Andromeda)
    }

    /// Static data for this body.
    pub fn data(&self) -> BodyData {
        body_data(*self)
    }

    /// Camera offset used when navigating to this body.
    ///
    /// Hand-tuned for the bodies in the navigation menu; other bodies get an
    /// offset proportional to their radius.
    pub fn view_offset(&self) -> Vec3 {
        match self {
            BodyId::Sun => Vec3::new(30.0, 10.0, 30.0),
            BodyId::Mercury => Vec3::new(10.0, 3.0, 10.0),
            BodyId::Venus => Vec3::new(12.0, 4.0, 12.0),
            BodyId::Earth | BodyId::Mars => Vec3::new(15.0, 5.0, 15.0),
            BodyId::Moon => Vec3::new(5.0, 2.0, 5.0),
            BodyId::Jupiter | BodyId::Saturn | BodyId::Uranus | BodyId::Neptune => {
                Vec3::new(20.0, 5.0, 20.0)
            }
            other => Vec3::new(2.5, 0.8, 2.5) * other.data().radius,
        }
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for BodyId {
    type Err = UnknownBody;

    /// Parse a scene name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        BodyId::ALL
            .into_iter()
            .find(|id| id.name() == lower)
            .ok_or_else(|| UnknownBody(s.to_string()))
    }
}

/// Static data for a body.
#[derive(Clone, Debug)]
pub struct BodyData {
    pub id: BodyId,
    /// Render radius in scene units
    pub radius: f32,
    /// Flat colour, also used as the fallback when the texture fails
    pub color: Color,
    /// Whether the body glows (the Sun, galaxies)
    pub emissive: bool,
    /// Orbit around the parent (or the origin); `None` for fixed bodies
    pub orbit: Option<OrbitalElements>,
    /// World position of bodies without an orbit
    pub fixed_position: DVec3,
    /// Spin about the Y axis in radians per reference frame at 1x
    pub spin_per_frame: f64,
    /// Texture path under `assets/`, if the body is textured
    pub texture: Option<&'static str>,
}

impl BodyData {
    fn orbiting(id: BodyId, radius: f32, color: Color, orbit: OrbitalElements) -> Self {
        Self {
            id,
            radius,
            color,
            emissive: false,
            orbit: Some(orbit),
            fixed_position: DVec3::ZERO,
            spin_per_frame: 0.0,
            texture: None,
        }
    }

    fn fixed(id: BodyId, radius: f32, color: Color, position: DVec3) -> Self {
        Self {
            id,
            radius,
            color,
            emissive: true,
            orbit: None,
            fixed_position: position,
            spin_per_frame: 0.0,
            texture: None,
        }
    }

    fn spin(mut self, per_frame: f64) -> Self {
        self.spin_per_frame = per_frame;
        self
    }

    fn textured(mut self, path: &'static str) -> Self {
        self.texture = Some(path);
        self
    }
}

/// Get orbital and visual data for a body.
pub fn body_data(id: BodyId) -> BodyData {
    match id {
        BodyId::Sun => BodyData::fixed(id, 20.0, Color::srgb(1.0, 0.84, 0.0), DVec3::ZERO)
            .spin(0.00001),

        // Planets
        BodyId::Mercury => BodyData::orbiting(
            id,
            5.0,
            Color::srgb(0.67, 0.67, 0.67),
            OrbitalElements::new(50.0, 0.2056, 0.00028),
        )
        .spin(0.003)
        .textured("textures/mercury.jpg"),
        BodyId::Venus => BodyData::orbiting(
            id,
            6.0,
            Color::srgb(0.9, 0.8, 0.55),
            OrbitalElements::new(90.0, 0.0059, 0.00026),
        )
        .spin(-0.003)
        .textured("textures/venus.jpg"),
        BodyId::Earth => BodyData::orbiting(
            id,
            8.0,
            Color::srgb(0.2, 0.45, 0.8),
            OrbitalElements::new(160.0, 0.0167, 0.00021),
        )
        .spin(0.015)
        .textured("textures/earth.jpg"),
        BodyId::Mars => BodyData::orbiting(
            id,
            6.5,
            Color::srgb(0.75, 0.35, 0.2),
            OrbitalElements::new(220.0, 0.0934, 0.00016),
        )
        .spin(0.04)
        .textured("textures/mars.jpg"),
        BodyId::Jupiter => BodyData::orbiting(
            id,
            12.0,
            Color::srgb(0.8, 0.7, 0.55),
            OrbitalElements::new(380.0, 0.0489, 0.00013),
        )
        .spin(0.02)
        .textured("textures/jupiter.jpg"),
        BodyId::Saturn => BodyData::orbiting(
            id,
            11.0,
            Color::srgb(0.9, 0.82, 0.6),
            OrbitalElements::new(480.0, 0.0557, 0.00011),
        )
        .spin(0.017)
        .textured("textures/saturn.jpg"),
        BodyId::Uranus => BodyData::orbiting(
            id,
            9.5,
            Color::srgb(0.55, 0.85, 0.9),
            OrbitalElements::new(580.0, 0.046, 0.00009),
        )
        .spin(-0.015)
        .textured("textures/uranus.jpg"),
        BodyId::Neptune => BodyData::orbiting(
            id,
            9.0,
            Color::srgb(0.25, 0.45, 0.9),
            OrbitalElements::new(680.0, 0.009, 0.00006),
        )
        .spin(0.013)
        .textured("textures/neptune.jpg"),

        // Moons (orbits relative to the parent)
        BodyId::Moon => BodyData::orbiting(
            id,
            2.0,
            Color::srgb(0.7, 0.7, 0.7),
            OrbitalElements::new(15.0, 0.0549, 0.0002),
        )
        .spin(0.003)
        .textured("textures/moon.jpg"),
        BodyId::Phobos => BodyData::orbiting(
            id,
            0.9,
            Color::srgb(0.53, 0.53, 0.53),
            OrbitalElements::new(10.0, 0.0151, 0.0003),
        )
        .spin(0.002)
        .textured("textures/rock.jpg"),
        BodyId::Deimos => BodyData::orbiting(
            id,
            1.2,
            Color::srgb(0.53, 0.53, 0.53),
            OrbitalElements::new(15.0, 0.0002, 0.001).with_vertical_wobble(0.5),
        )
        .spin(-0.0015)
        .textured("textures/rock.jpg"),
        BodyId::Titan => BodyData::orbiting(
            id,
            2.2,
            Color::srgb(0.8, 0.6, 0.3),
            OrbitalElements::new(20.0, 0.0288, 0.0005),
        )
        .spin(0.0015)
        .textured("textures/titan.jpg"),

        // Galaxies
        BodyId::MilkyWay => BodyData::fixed(
            id,
            800.0,
            Color::srgba(0.85, 0.8, 1.0, 0.08),
            DVec3::new(4000.0, 0.0, 0.0),
        )
        .spin(0.00015),
        BodyId::Andromeda => BodyData::fixed(
            id,
            600.0,
            Color::srgba(0.8, 0.85, 1.0, 0.08),
            DVec3::new(5000.0, -2500.0, -5000.0),
        )
        .spin(0.0001),
    }
}

/// Data for every body, parents before satellites.
pub fn all_bodies() -> Vec<BodyData> {
    BodyId::ALL.into_iter().map(body_data).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parents_precede_satellites() {
        for (index, id) in BodyId::ALL.iter().enumerate() {
            if let Some(parent) = id.parent() {
                let parent_index = BodyId::ALL.iter().position(|b| *b == parent).unwrap();
                assert!(parent_index < index, "{id} listed before its parent {parent}");
            }
        }
    }

    #[test]
    fn test_name_round_trip_is_case_insensitive() {
        assert_eq!("Mars".parse::<BodyId>(), Ok(BodyId::Mars));
        assert_eq!("milkyway".parse::<BodyId>(), Ok(BodyId::MilkyWay));
        assert_eq!(
            "comet1".parse::<BodyId>(),
            Err(UnknownBody("comet1".to_string()))
        );
    }

    #[test]
    fn test_hand_tuned_offsets() {
        assert_eq!(BodyId::Mars.view_offset(), Vec3::new(15.0, 5.0, 15.0));
        assert_eq!(BodyId::Sun.view_offset(), Vec3::new(30.0, 10.0, 30.0));
    }

    #[test]
    fn test_derived_offset_scales_with_radius() {
        let phobos = BodyId::Phobos.view_offset();
        let titan = BodyId::Titan.view_offset();
        assert!(titan.length() > phobos.length());
    }

    #[test]
    fn test_only_orbiting_bodies_have_textures() {
        for data in all_bodies() {
            if data.texture.is_some() {
                assert!(data.orbit.is_some(), "{} is textured but fixed", data.id);
            }
        }
    }

    #[test]
    fn test_eccentricities_are_elliptical() {
        for data in all_bodies() {
            if let Some(orbit) = data.orbit {
                assert!((0.0..1.0).contains(&orbit.eccentricity), "{}", data.id);
            }
        }
    }
}
