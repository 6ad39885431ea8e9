//! Actors: health-bearing enemies and the shared damage/death pipeline.
//!
//! ```text
//! FixedUpdate/Timers:      spawn protection, invulnerability, death-effect timers
//! FixedPostUpdate/Damage:  DamageRequest -> Health      (single writer)
//! FixedPostUpdate/Death:   depleted -> Dead -> score, effect, ActorDied, PendingDespawn
//! PostUpdate:              despawn PendingDespawn
//! ```
//!
//! Bosses are actors too (`ActorKind::Boss`); their extra state lives in `plugins::boss`.

pub mod components;
pub mod damage;
pub mod death;
pub mod profile;
pub mod protection;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{
    layers::Layer,
    sets::{CombatSet, SimSet},
    state::GameState,
};
use crate::plugins::attacks::Arsenal;
use components::{Actor, ActorKind, ActorStats, Dormant, Faction, Health, LifeState};
use profile::EnemyProfile;
use protection::{SpawnProtection, PROTECTED_ALPHA};

pub fn plugin(app: &mut App) {
    app.add_message::<damage::DamageRequest>()
        .add_message::<death::ActorDied>();

    app.add_systems(
        FixedUpdate,
        (
            protection::tick_spawn_protection,
            death::tick_invulnerability,
            death::tick_death_effects,
        )
            .in_set(SimSet::Timers)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        damage::apply_damage
            .in_set(CombatSet::Damage)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedPostUpdate,
        (death::resolve_actor_deaths, death::cull_escaped_actors)
            .in_set(CombatSet::Death)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(PostUpdate, death::despawn_marked);
}

#[inline]
pub fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::PlayerBullet])
}

/// Spawn a basic enemy at `position`. Dormant enemies wait for their formation to release them.
pub fn spawn_enemy(
    commands: &mut Commands,
    profile: &EnemyProfile,
    position: Vec2,
    dormant: bool,
) -> Entity {
    let protection = profile.spawn_protection.map(SpawnProtection::new);
    let mut color = profile.color();
    if protection.as_ref().is_some_and(SpawnProtection::is_active) {
        color.set_alpha(PROTECTED_ALPHA);
    }

    let mut e = commands.spawn((
        Name::new(profile.name.clone()),
        Actor { kind: ActorKind::Basic },
        Faction::Enemy,
        ActorStats::from_profile(profile),
        Health::new(profile.max_health),
        LifeState::Alive,
        Arsenal::from_profile(profile),
        Sprite {
            color,
            custom_size: Some(Vec2::splat(profile.radius * 2.0)),
            ..default()
        },
        Transform::from_translation(position.extend(1.0)).with_scale(profile.scale.extend(1.0)),
        (
            RigidBody::Kinematic,
            Collider::circle(profile.radius),
            Sensor,
            enemy_layers(),
            CollisionEventsEnabled,
        ),
        DespawnOnExit(GameState::InGame),
    ));

    if let Some(protection) = protection {
        e.insert(protection);
    }
    if dormant {
        e.insert(Dormant);
    }
    e.id()
}
