//! Power-ups dropped by destroyed enemies.
//!
//! A pickup falls while swaying sideways, expires after its lifetime and, when the player
//! touches it, grants timed invulnerability.

use std::f32::consts::TAU;

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::{
    layers::Layer,
    playfield::Playfield,
    sets::{CombatSet, SimSet},
    state::GameState,
    tunables::Tunables,
};
use crate::plugins::actors::components::{ActorKind, Invulnerable, PendingDespawn};
use crate::plugins::actors::death::ActorDied;
use crate::plugins::core::{
    cues::{PlaySound, SoundCue},
    CombatRng,
};
use crate::plugins::player::Player;

const SWAY_AMPLITUDE: f32 = 24.0;
/// Full sway cycles per second.
const SWAY_FREQUENCY: f32 = 0.5;
const RADIUS: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupKind {
    Invulnerability { secs: f32 },
}

#[derive(Component, Debug, Clone)]
pub struct Pickup {
    pub kind: PickupKind,
    pub lifetime: Timer,
    pub fall_speed: f32,
    origin: Vec2,
    age: f32,
}

impl Pickup {
    pub fn new(kind: PickupKind, origin: Vec2, lifetime: f32, fall_speed: f32) -> Self {
        Self {
            kind,
            lifetime: Timer::from_seconds(lifetime, TimerMode::Once),
            fall_speed,
            origin,
            age: 0.0,
        }
    }

    /// Position after `dt` more seconds: a constant fall plus a sinusoidal sway around the
    /// drop point.
    pub fn step(&mut self, dt: f32) -> Vec2 {
        self.age += dt;
        let sway = SWAY_AMPLITUDE * (self.age * SWAY_FREQUENCY * TAU).sin();
        self.origin + Vec2::new(sway, -self.fall_speed * self.age)
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<CollisionStart>();

    app.add_systems(
        FixedUpdate,
        move_pickups
            .in_set(SimSet::Movement)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedPostUpdate,
        collect_pickups
            .in_set(CombatSet::Collisions)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedPostUpdate,
        drop_pickups
            .in_set(CombatSet::Cleanup)
            .run_if(in_state(GameState::InGame)),
    );
}

pub fn spawn_pickup(
    commands: &mut Commands,
    kind: PickupKind,
    position: Vec2,
    tunables: &Tunables,
) -> Entity {
    commands
        .spawn((
            Name::new("Pickup"),
            Pickup::new(kind, position, tunables.pickup_lifetime, tunables.pickup_fall_speed),
            Sprite {
                color: Color::srgb(1.0, 0.9, 0.2),
                custom_size: Some(Vec2::splat(RADIUS * 2.0)),
                ..default()
            },
            Transform::from_translation(position.extend(2.0)),
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
            Collider::circle(RADIUS),
            Sensor,
            CollisionLayers::new(Layer::Pickup, [Layer::Player]),
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

/// Basic enemies drop a pickup with `pickup_drop_chance`. Bosses never drop.
pub fn drop_pickups(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut rng: ResMut<CombatRng>,
    mut died: MessageReader<ActorDied>,
) {
    for ev in died.read() {
        if ev.kind != ActorKind::Basic {
            continue;
        }
        if rng.0.random::<f32>() >= tunables.pickup_drop_chance {
            continue;
        }
        let kind = PickupKind::Invulnerability { secs: tunables.pickup_invulnerability_secs };
        let e = spawn_pickup(&mut commands, kind, ev.position, &tunables);
        debug!("{} dropped pickup {e}", ev.entity);
    }
}

pub fn move_pickups(
    mut commands: Commands,
    time: Res<Time>,
    playfield: Res<Playfield>,
    tunables: Res<Tunables>,
    mut q: Query<(Entity, &mut Pickup, &mut Transform), Without<PendingDespawn>>,
) {
    let dt = time.delta_secs();

    for (e, mut pickup, mut tf) in &mut q {
        pickup.lifetime.tick(time.delta());
        let pos = pickup.step(dt);
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;

        let gone = !playfield.contains(pos, tunables.actor_cull_margin);
        if pickup.lifetime.is_finished() || gone {
            commands.entity(e).try_insert(PendingDespawn);
        }
    }
}

pub fn collect_pickups(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    q_pickups: Query<&Pickup, Without<PendingDespawn>>,
    q_player: Query<(), With<Player>>,
    mut sounds: MessageWriter<PlaySound>,
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let a = ev.body1.unwrap_or(ev.collider1);
        let b = ev.body2.unwrap_or(ev.collider2);
        let (pickup_e, player_e) = if q_pickups.contains(a) && q_player.contains(b) {
            (a, b)
        } else if q_pickups.contains(b) && q_player.contains(a) {
            (b, a)
        } else {
            continue;
        };
        if !seen.insert(pickup_e) {
            continue;
        }
        let Ok(pickup) = q_pickups.get(pickup_e) else { continue };

        match pickup.kind {
            PickupKind::Invulnerability { secs } => {
                commands.entity(player_e).try_insert(Invulnerable::for_secs(secs));
                debug!("player invulnerable for {secs:.1}s");
            }
        }
        sounds.write(PlaySound(SoundCue::PowerUp));
        commands.entity(pickup_e).try_insert(PendingDespawn);
    }
}
