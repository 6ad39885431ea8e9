//! Boss plugin: entry glide, health-gated phases and the shield/teleport abilities.
//!
//! ```text
//! Entry --arrive--> Phase1 --ratio<=t1--> Phase2 --ratio<=t2--> Phase3 --health 0--> Dead
//!                     (shield / teleport run alongside, gated by their own ratios)
//! ```
//!
//! The boss is an ordinary actor (`ActorKind::Boss`) for damage, death and scoring. Its
//! phase attacks live in the same `Arsenal` as everything else; a phase change disables all
//! of them and enables the ones tagged for the new phase.

pub mod abilities;
pub mod components;
pub mod profile;
pub mod systems;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{sets::SimSet, state::GameState};
use crate::plugins::actors::{
    components::{Actor, ActorKind, ActorStats, Dormant, Faction, Health, LifeState},
    enemy_layers,
    protection::{SpawnProtection, PROTECTED_ALPHA},
};
use crate::plugins::attacks::{
    strategy::{AttackPattern, AttackStrategy},
    Arsenal,
};
use abilities::{BossAbilities, Shield, Teleport};
use components::{Boss, BossEntry};
use profile::BossProfile;

pub fn plugin(app: &mut App) {
    app.add_message::<components::BossPhaseChanged>()
        .add_message::<abilities::BossAbilityUsed>();

    app.add_systems(
        FixedUpdate,
        systems::advance_boss_entry
            .in_set(SimSet::Movement)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedUpdate,
        (
            systems::update_boss_phases,
            systems::update_boss_abilities,
            systems::tint_bosses,
        )
            .chain()
            .in_set(SimSet::Phases)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Every attack the boss can use, all disabled until the first phase activates.
pub fn boss_arsenal(profile: &BossProfile) -> Arsenal {
    let fire_points = profile.base.fire_points.clone();

    let mut strategies = vec![
        AttackStrategy::new(
            AttackPattern::PhaseBased(profile.phases),
            0.0,
            None,
            fire_points.clone(),
        )
        .disabled(),
    ];
    strategies.extend(profile.extra_attacks.iter().filter_map(|extra| {
        AttackStrategy::from_spec(
            extra.attack,
            profile.base.fire_rate,
            profile.base.projectile,
            fire_points.clone(),
        )
        .map(|s| s.for_phase(extra.phase).disabled())
    }));

    Arsenal::new(strategies)
}

/// Spawn a boss. Escorted bosses stay dormant until their formation releases them.
pub fn spawn_boss(
    commands: &mut Commands,
    profile: &BossProfile,
    position: Vec2,
    entry: BossEntry,
) -> Entity {
    let base = &profile.base;
    let protection = base.spawn_protection.map(SpawnProtection::new);
    let mut color = profile.tints()[0];
    if protection.as_ref().is_some_and(SpawnProtection::is_active) {
        color.set_alpha(PROTECTED_ALPHA);
    }

    let mut e = commands.spawn((
        Name::new(base.name.clone()),
        Actor { kind: ActorKind::Boss },
        Faction::Enemy,
        ActorStats::from_profile(base),
        Health::new(base.max_health),
        LifeState::Alive,
        boss_arsenal(profile),
        Boss::new(entry, [profile.phase1_threshold, profile.phase2_threshold], profile.tints()),
        BossAbilities {
            shield: profile.shield.map(Shield::new),
            teleport: profile.teleport.map(Teleport::new),
        },
        Sprite {
            color,
            custom_size: Some(Vec2::splat(base.radius * 2.0)),
            ..default()
        },
        Transform::from_translation(position.extend(1.0)).with_scale(base.scale.extend(1.0)),
        (
            RigidBody::Kinematic,
            Collider::circle(base.radius),
            Sensor,
            enemy_layers(),
            CollisionEventsEnabled,
        ),
        DespawnOnExit(GameState::InGame),
    ));

    if let Some(protection) = protection {
        e.insert(protection);
    }
    if entry == BossEntry::Escorted {
        e.insert(Dormant);
    }
    e.id()
}

/// A boss that flies in on its own from above the playfield.
pub fn spawn_lone_boss(commands: &mut Commands, profile: &BossProfile, spawn_at: Vec2) -> Entity {
    let entry = BossEntry::Gliding {
        from: spawn_at,
        to: profile.entry_target,
        elapsed: 0.0,
        duration: profile.entry_duration,
    };
    spawn_boss(commands, profile, spawn_at, entry)
}
