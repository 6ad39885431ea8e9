//! Projectile hit resolution.
//!
//! Reads avian `CollisionStart` messages and turns hostile contacts into `DamageRequest`s.
//! - Exactly one side of a contact must be a projectile; projectiles never cancel each other.
//! - Same-faction contacts are ignored.
//! - A hostile target without `Health` is removed directly instead of ignoring the hit.
//! - Each projectile resolves at most one hit per run.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::{Projectile, ProjectileState};
use crate::plugins::actors::components::{Faction, Health, PendingDespawn};
use crate::plugins::actors::damage::DamageRequest;
use crate::plugins::core::cues::{PlaySound, SoundCue};

#[derive(Clone, Copy, Debug)]
pub(crate) struct CollisionTarget {
    pub collider: Entity,
    pub body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    pub fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
pub(crate) fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget { collider: ev.collider1, body: ev.body1 },
        CollisionTarget { collider: ev.collider2, body: ev.body2 },
    )
}

pub fn resolve_projectile_hits(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut q_projectiles: Query<(&Projectile, &mut ProjectileState)>,
    q_targets: Query<(&Faction, Has<Health>, Has<PendingDespawn>), Without<Projectile>>,
    mut damage: MessageWriter<DamageRequest>,
    mut sounds: MessageWriter<PlaySound>,
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_projectiles.contains(t1.collider);
        let p2 = q_projectiles.contains(t2.collider);
        if !(p1 ^ p2) {
            continue;
        }
        let (shot, other) = if p1 { (t1, t2) } else { (t2, t1) };

        if seen.contains(&shot.collider) {
            continue;
        }
        let Ok((projectile, mut state)) = q_projectiles.get_mut(shot.collider) else {
            continue;
        };
        if *state != ProjectileState::Active {
            continue;
        }
        let projectile = *projectile;

        let target = other.gameplay_owner();
        let Ok((faction, has_health, doomed)) = q_targets.get(target) else {
            continue;
        };
        if doomed || !projectile.owner.is_hostile_to(*faction) {
            continue;
        }

        seen.insert(shot.collider);

        if has_health {
            damage.write(DamageRequest { target, amount: projectile.damage });
        } else {
            warn!("{target}: hit by a projectile but cannot take damage, removing it");
            commands.entity(target).try_insert(PendingDespawn);
        }

        if projectile.owner == Faction::Player {
            sounds.write(PlaySound(SoundCue::ProjectileHit));
        }
        *state = ProjectileState::PendingReturn;
    }
}
