//! Background rendering for the solar system visualization.
//!
//! Provides the starfield shell and scene lighting.

use bevy::prelude::*;
use rand::Rng;

use crate::camera::MainCamera;
use crate::types::FrameSet;

/// Radius of the star shell around the camera; inside the far plane.
pub const STAR_SHELL_RADIUS: f32 = 9000.0;

/// Number of background stars.
pub const STAR_COUNT: usize = 1500;

/// Marker for a background star. Stars are never picked.
#[derive(Component)]
pub struct Star;

/// Parent of all stars; kept centred on the camera.
#[derive(Component)]
pub struct StarShell;

/// Plugin providing background visual elements.
pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_starfield, spawn_lighting))
            .add_systems(Update, follow_camera.after(FrameSet::Camera));
    }
}

/// Uniformly distributed point on a sphere of the given radius.
pub fn random_on_shell(rng: &mut impl Rng, radius: f32) -> Vec3 {
    let y: f32 = rng.random_range(-1.0..1.0);
    let azimuth: f32 = rng.random_range(0.0..std::f32::consts::TAU);
    let ring = (1.0 - y * y).sqrt();
    Vec3::new(ring * azimuth.cos(), y, ring * azimuth.sin()) * radius
}

/// Spawn a shell of randomly placed stars.
fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let star_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        emissive: LinearRgba::WHITE * 0.5,
        unlit: true,
        ..default()
    });
    let star_mesh = meshes.add(Sphere::new(6.0));

    let mut rng = rand::rng();

    commands
        .spawn((StarShell, Transform::default(), Visibility::default()))
        .with_children(|shell| {
            for _ in 0..STAR_COUNT {
                let scale = rng.random_range(0.5..1.5);
                shell.spawn((
                    Star,
                    Mesh3d(star_mesh.clone()),
                    MeshMaterial3d(star_material.clone()),
                    Transform::from_translation(random_on_shell(&mut rng, STAR_SHELL_RADIUS))
                        .with_scale(Vec3::splat(scale)),
                ));
            }
        });

    info!("Spawned {STAR_COUNT} background stars");
}

/// Light the scene from the Sun, with a dim ambient fill.
fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
        ..default()
    });

    commands.spawn((
        PointLight {
            intensity: 5.0e9,
            range: 2000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
    ));

    info!("Scene lighting initialized");
}

/// Keep the star shell centred on the camera so it never reaches the far plane.
fn follow_camera(
    cameras: Query<&Transform, (With<MainCamera>, Without<StarShell>)>,
    mut shells: Query<&mut Transform, With<StarShell>>,
) {
    let Ok(camera) = cameras.single() else {
        return;
    };
    for mut shell in shells.iter_mut() {
        shell.translation = camera.translation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_stars_lie_on_shell() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let star = random_on_shell(&mut rng, STAR_SHELL_RADIUS);
            assert_relative_eq!(star.length(), STAR_SHELL_RADIUS, epsilon = 0.5);
        }
    }

    #[test]
    fn test_shell_stays_inside_far_plane() {
        assert!(STAR_SHELL_RADIUS < crate::camera::FAR_PLANE);
    }
}
