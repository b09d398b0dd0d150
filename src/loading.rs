//! Texture loading and body construction.
//!
//! Every textured body issues one texture request at startup. Requests are
//! polled each frame; whether the texture arrives or fails, the body is built
//! by [`BodyBuilder::spawn_body`]. Untextured bodies are built immediately
//! through the same function. The scene stays "loading" until every request
//! has settled plus a reveal delay, or until a timeout forces the reveal.

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use bevy::asset::LoadState;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use thiserror::Error;

use crate::bodies::{BodyData, BodyId, BodyRegistry, CelestialBody, all_bodies, body_position, spin_angle};
use crate::types::{FrameSet, SimulationControl};

/// Why a body ended up without its texture.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextureLoadError {
    #[error("texture {path} for {body} failed to load: {reason}")]
    Failed {
        body: BodyId,
        path: &'static str,
        reason: String,
    },
    #[error("texture {path} for {body} still loading after {waited:?}")]
    TimedOut {
        body: BodyId,
        path: &'static str,
        waited: Duration,
    },
}

/// Timing of the loading screen.
#[derive(Resource, Clone, Debug)]
pub struct LoadingSettings {
    /// Time the scene stays hidden after the last texture settled
    pub reveal_delay: Duration,
    /// Reveal regardless of pending textures after this long
    pub timeout: Duration,
}

impl Default for LoadingSettings {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Whether the scene is still loading.
#[derive(Resource, Debug, Default)]
pub struct LoadingState {
    started_at: Option<Duration>,
    settled_at: Option<Duration>,
    revealed: bool,
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        !self.revealed
    }

    /// Whether the timeout has passed without a reveal by settling.
    pub fn timed_out(&self, now: Duration, settings: &LoadingSettings) -> bool {
        self.started_at
            .is_some_and(|start| now.saturating_sub(start) >= settings.timeout)
    }

    /// Advance the loading state. Returns `true` on the frame the scene is revealed.
    pub fn tick(&mut self, now: Duration, all_settled: bool, settings: &LoadingSettings) -> bool {
        if self.revealed {
            return false;
        }
        let started_at = *self.started_at.get_or_insert(now);
        if all_settled && self.settled_at.is_none() {
            self.settled_at = Some(now);
        }

        let settled_long_enough = self
            .settled_at
            .is_some_and(|at| now.saturating_sub(at) >= settings.reveal_delay);
        let timed_out = now.saturating_sub(started_at) >= settings.timeout;

        self.revealed = settled_long_enough || timed_out;
        self.revealed
    }
}

/// Run condition: the loading screen is gone.
///
/// Apps without a [`LoadingState`] (headless camera setups) count as ready.
pub fn scene_ready(state: Option<Res<LoadingState>>) -> bool {
    state.is_none_or(|state| !state.is_loading())
}

/// A texture request that has not settled yet.
#[derive(Debug)]
pub struct PendingTexture {
    pub body: BodyId,
    pub path: &'static str,
    pub handle: Handle<Image>,
}

#[derive(Resource, Debug, Default)]
pub struct PendingTextures(pub Vec<PendingTexture>);

/// Map an asset load state to a settled outcome, if it has settled.
pub fn texture_outcome(
    body: BodyId,
    path: &'static str,
    state: &LoadState,
) -> Option<Result<(), TextureLoadError>> {
    match state {
        LoadState::Loaded => Some(Ok(())),
        LoadState::Failed(err) => Some(Err(TextureLoadError::Failed {
            body,
            path,
            reason: err.to_string(),
        })),
        LoadState::NotLoaded | LoadState::Loading => None,
    }
}

/// Everything needed to build a body entity.
#[derive(SystemParam)]
pub struct BodyBuilder<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    registry: ResMut<'w, BodyRegistry>,
    control: Res<'w, SimulationControl>,
}

impl BodyBuilder<'_, '_> {
    /// Build a body, textured or flat-coloured, and register it.
    ///
    /// Ring and atmosphere geometry are unnamed children, so picking them
    /// resolves to the body itself.
    pub fn spawn_body(&mut self, data: &BodyData, texture: Option<Handle<Image>>) -> Entity {
        let id = data.id;
        let t = self.control.elapsed_ms;
        let transform = Transform::from_translation(body_position(id, t).as_vec3())
            .with_rotation(Quat::from_rotation_y(spin_angle(id, t) as f32));

        let mesh = self.meshes.add(Sphere::new(data.radius).mesh().uv(48, 24));
        let material = self.materials.add(body_material(data, texture));

        let mut entity = self.commands.spawn((
            Name::new(id.name()),
            CelestialBody { id },
            Mesh3d(mesh),
            MeshMaterial3d(material),
            transform,
        ));

        match id {
            BodyId::Saturn => {
                let ring = self
                    .meshes
                    .add(Annulus::new(data.radius * 1.3, data.radius * 2.1));
                let ring_material = self.materials.add(StandardMaterial {
                    base_color: Color::srgba(0.85, 0.78, 0.6, 0.8),
                    alpha_mode: AlphaMode::Blend,
                    cull_mode: None,
                    double_sided: true,
                    ..default()
                });
                entity.with_child((
                    Mesh3d(ring),
                    MeshMaterial3d(ring_material),
                    Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2 + 0.47)),
                ));
            }
            BodyId::Earth => {
                let shell = self.meshes.add(Sphere::new(data.radius * 1.05).mesh().uv(48, 24));
                let shell_material = self.materials.add(StandardMaterial {
                    base_color: Color::srgba(0.5, 0.7, 1.0, 0.25),
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                });
                entity.with_child((Mesh3d(shell), MeshMaterial3d(shell_material), Transform::default()));
            }
            _ => {}
        }

        let entity = entity.id();
        self.registry.register(id);
        debug!("Spawned {id}");
        entity
    }
}

fn body_material(data: &BodyData, texture: Option<Handle<Image>>) -> StandardMaterial {
    let translucent = data.color.alpha() < 1.0;
    StandardMaterial {
        base_color: if texture.is_some() { Color::WHITE } else { data.color },
        base_color_texture: texture,
        emissive: if data.emissive {
            data.color.to_linear() * 2.0
        } else {
            LinearRgba::BLACK
        },
        unlit: data.id.is_galaxy(),
        alpha_mode: if translucent { AlphaMode::Blend } else { AlphaMode::Opaque },
        ..default()
    }
}

/// Plugin providing texture loading, body construction and the loading flag.
pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingSettings>()
            .init_resource::<LoadingState>()
            .init_resource::<PendingTextures>()
            .add_systems(Startup, request_textures)
            .add_systems(
                Update,
                (poll_textures, update_loading_state)
                    .chain()
                    .before(FrameSet::Orbits),
            );
    }
}

/// Issue one texture request per textured body; build the rest right away.
fn request_textures(
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingTextures>,
    mut builder: BodyBuilder,
) {
    for data in all_bodies() {
        match data.texture {
            Some(path) => pending.0.push(PendingTexture {
                body: data.id,
                path,
                handle: asset_server.load(path),
            }),
            None => {
                builder.spawn_body(&data, None);
            }
        }
    }
    info!("Requested {} body textures", pending.0.len());
}

/// Build bodies whose texture request settled this frame.
///
/// After the loading timeout, still-pending requests are given up and their
/// bodies are built flat-coloured.
fn poll_textures(
    asset_server: Res<AssetServer>,
    time: Res<Time<Real>>,
    settings: Res<LoadingSettings>,
    state: Res<LoadingState>,
    mut pending: ResMut<PendingTextures>,
    mut builder: BodyBuilder,
) {
    if pending.0.is_empty() {
        return;
    }
    let now = time.elapsed();
    let give_up = state.timed_out(now, &settings);

    pending.0.retain(|request| {
        let outcome = match asset_server.get_load_state(request.handle.id()) {
            Some(load_state) => texture_outcome(request.body, request.path, &load_state),
            None => None,
        };
        let outcome = match outcome {
            Some(outcome) => outcome,
            None if give_up => Err(TextureLoadError::TimedOut {
                body: request.body,
                path: request.path,
                waited: settings.timeout,
            }),
            None => return true,
        };

        let data = request.body.data();
        match outcome {
            Ok(()) => {
                builder.spawn_body(&data, Some(request.handle.clone()));
            }
            Err(err) => {
                warn!("{err}; using flat colour");
                builder.spawn_body(&data, None);
            }
        }
        false
    });
}

fn update_loading_state(
    time: Res<Time<Real>>,
    settings: Res<LoadingSettings>,
    pending: Res<PendingTextures>,
    mut state: ResMut<LoadingState>,
) {
    if state.tick(time.elapsed(), pending.0.is_empty(), &settings) {
        info!("Scene ready");
    }
}
