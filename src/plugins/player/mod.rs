//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, write PlayerInput resource
//! - FixedUpdate/Movement: entrance glide, then input-driven movement clamped to the playfield
//! - FixedUpdate/Attacks: fire on request, limited by the fire interval
//! - FixedPostUpdate/Death: depleted health ends the match
//!
//! The ship flies in from below the playfield and announces `PlayerReady` when it reaches
//! its start position; the wave director waits for that before the first wave.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{
    layers::Layer,
    playfield::Playfield,
    sets::{CombatSet, SimSet},
    state::GameState,
    tunables::Tunables,
};
use crate::plugins::actors::components::{Faction, Health, LifeState};
use crate::plugins::actors::death::spawn_death_effect;
use crate::plugins::core::{
    cues::{PlaySound, SoundCue},
    score::GameOver,
};
use crate::plugins::projectiles::{components::ProjectileProfile, messages::SpawnProjectile};

/// Height of the start position above the playfield bottom.
const START_HEIGHT: f32 = 96.0;
/// Muzzle offset in front of the ship.
const MUZZLE: Vec2 = Vec2::new(0.0, 20.0);
const RADIUS: f32 = 13.0;

#[derive(Component)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerControl {
    Entering { target: Vec2 },
    Ready,
    /// Destroyed; input is ignored for the rest of the match.
    Disabled,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerShip {
    pub fire_cooldown: f32,
    pub control: PlayerControl,
}

impl PlayerShip {
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.control == PlayerControl::Ready
    }
}

/// Sampled input. `shoot_requested` is latched until a fixed step consumes it.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub shoot_requested: bool,
}

/// The ship finished its entrance and is under player control.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerReady;

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_message::<PlayerReady>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input);

    app.add_systems(
        FixedUpdate,
        (run_entrance, apply_movement)
            .chain()
            .in_set(SimSet::Movement)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedUpdate,
        fire_player_shots
            .in_set(SimSet::Attacks)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedPostUpdate,
        on_player_defeated
            .in_set(CombatSet::Death)
            .run_if(in_state(GameState::InGame)),
    );
}

#[inline]
pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::EnemyBullet, Layer::Pickup])
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>, playfield: Res<Playfield>) {
    let start = Vec2::new(0.0, playfield.bottom() - START_HEIGHT * 0.5);
    let target = Vec2::new(0.0, playfield.bottom() + START_HEIGHT);

    commands.spawn((
        Name::new("Player"),
        Player,
        PlayerShip { fire_cooldown: 0.0, control: PlayerControl::Entering { target } },
        Faction::Player,
        Health::new(tunables.player_max_health),
        LifeState::Alive,
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(RADIUS * 2.0)),
            ..default()
        },
        Transform::from_translation(start.extend(1.0)),
        RigidBody::Kinematic,
        Collider::circle(RADIUS),
        player_layers(),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else { return };
    let mut axis = Vec2::ZERO;

    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    if keys.pressed(KeyCode::Space) {
        input.shoot_requested = true;
    }
}

fn run_entrance(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q: Query<(&mut PlayerShip, &mut Transform), With<Player>>,
    mut ready: MessageWriter<PlayerReady>,
) {
    let step = tunables.player_entrance_speed * time.delta_secs();

    for (mut ship, mut tf) in &mut q {
        let PlayerControl::Entering { target } = ship.control else { continue };

        let pos = tf.translation.truncate().move_towards(target, step);
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;

        if pos == target {
            ship.control = PlayerControl::Ready;
            info!("player ready");
            ready.write(PlayerReady);
        }
    }
}

fn apply_movement(
    time: Res<Time>,
    tunables: Res<Tunables>,
    playfield: Res<Playfield>,
    input: Res<PlayerInput>,
    mut q: Query<(&PlayerShip, &mut Transform), With<Player>>,
) {
    let Ok((ship, mut tf)) = q.single_mut() else {
        return;
    };
    if !ship.is_ready() {
        return;
    }

    let step = input.move_axis * tunables.player_speed * time.delta_secs();
    let pos = playfield.clamp_inside(tf.translation.truncate() + step, tunables.player_edge_buffer);
    tf.translation.x = pos.x;
    tf.translation.y = pos.y;
}

fn fire_player_shots(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut input: ResMut<PlayerInput>,
    mut q: Query<(Entity, &mut PlayerShip, &Transform), With<Player>>,
    mut spawns: MessageWriter<SpawnProjectile>,
    mut sounds: MessageWriter<PlaySound>,
) {
    let requested = std::mem::take(&mut input.shoot_requested);
    let Ok((e, mut ship, tf)) = q.single_mut() else {
        return;
    };

    ship.fire_cooldown = (ship.fire_cooldown - time.delta_secs()).max(0.0);
    if !requested || !ship.is_ready() || ship.fire_cooldown > 0.0 {
        return;
    }

    spawns.write(SpawnProjectile {
        owner: Faction::Player,
        pos: tf.translation.truncate() + MUZZLE,
        direction: Faction::Player.forward(),
        profile: ProjectileProfile {
            damage: tunables.player_bullet_damage,
            speed: tunables.player_bullet_speed,
            lifetime: tunables.player_bullet_lifetime,
        },
        source: Some(e),
    });
    sounds.write(PlaySound(SoundCue::PlayerShoot));
    ship.fire_cooldown = tunables.player_fire_interval;
}

fn on_player_defeated(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut q: Query<(Entity, &Health, &mut LifeState, &mut PlayerShip, &Transform), With<Player>>,
    mut sounds: MessageWriter<PlaySound>,
    mut game_over: MessageWriter<GameOver>,
) {
    for (e, health, mut life, mut ship, tf) in &mut q {
        if !health.is_depleted() || !life.mark_dead() {
            continue;
        }

        info!("player destroyed");
        ship.control = PlayerControl::Disabled;
        sounds.write(PlaySound(SoundCue::PlayerExplosion));
        spawn_death_effect(&mut commands, tf.translation.truncate(), tunables.death_effect_secs);
        commands.entity(e).try_insert(Visibility::Hidden);
        game_over.write(GameOver { victory: false });
    }
}
