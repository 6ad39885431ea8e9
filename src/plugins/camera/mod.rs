//! Camera plugin.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera framing the whole playfield
//! PostUpdate:      explosions add trauma; trauma decays and offsets the camera
//! ```
//!
//! The camera never follows anything: the playfield is fixed and always fully visible.

use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{playfield::Playfield, state::GameState};
use crate::plugins::core::cues::{PlaySound, SoundCue};

/// Extra space shown around the playfield.
const FRAME_MARGIN: f32 = 32.0;
const MAX_SHAKE: f32 = 12.0;

#[derive(Component)]
pub struct MainCamera {
    /// How fast trauma decays, per second.
    pub responsiveness: f32,
    pub trauma: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            (add_trauma, shake_camera)
                .chain()
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn trauma_for(cue: SoundCue) -> f32 {
    match cue {
        SoundCue::BossExplosion | SoundCue::PlayerExplosion => 1.0,
        SoundCue::EnemyExplosion => 0.25,
        SoundCue::PlayerHit | SoundCue::BossHit => 0.15,
        _ => 0.0,
    }
}

fn spawn_camera(mut commands: Commands, playfield: Res<Playfield>) {
    let frame = playfield.half_extents * 2.0 + Vec2::splat(FRAME_MARGIN * 2.0);

    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin { min_width: frame.x, min_height: frame.y },
            ..OrthographicProjection::default_2d()
        }),
        MainCamera { responsiveness: 5.0, trauma: 0.0 },
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn add_trauma(mut sounds: MessageReader<PlaySound>, mut q_cam: Query<&mut MainCamera>) {
    let added: f32 = sounds.read().map(|PlaySound(cue)| trauma_for(*cue)).sum();
    if added <= 0.0 {
        return;
    }
    for mut cam in &mut q_cam {
        cam.trauma = (cam.trauma + added).min(1.0);
    }
}

fn shake_camera(time: Res<Time>, mut q_cam: Query<(&mut Transform, &mut MainCamera)>) {
    let dt = time.delta_secs();
    let t = time.elapsed_secs();

    for (mut tf, mut cam) in &mut q_cam {
        let alpha = 1.0 - (-cam.responsiveness * dt).exp();
        cam.trauma -= cam.trauma * alpha;

        // Squared trauma keeps small hits subtle.
        let strength = cam.trauma * cam.trauma * MAX_SHAKE;
        tf.translation.x = strength * (t * 47.0).sin();
        tf.translation.y = strength * (t * 61.0).cos();
    }
}
