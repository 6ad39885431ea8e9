//! Damage application.
//!
//! Collision handling (and anything else that hurts) only writes `DamageRequest`s;
//! this module is the single place that mutates `Health`.

use bevy::prelude::*;

use super::components::{Actor, ActorKind, Health, Invulnerable, LifeState};
use super::protection::SpawnProtection;
use crate::plugins::boss::abilities::BossAbilities;
use crate::plugins::core::cues::{PlaySound, SoundCue};

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    Shield,
    SpawnProtection,
    Invulnerable,
}

/// Everything that can absorb a hit, sampled at the moment it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageGuards {
    pub shielded: bool,
    pub spawn_protected: bool,
    pub invulnerable: bool,
}

impl DamageGuards {
    /// Shield is checked first: a shielded boss never reaches the base damage path.
    pub fn block_reason(&self) -> Option<BlockReason> {
        if self.shielded {
            Some(BlockReason::Shield)
        } else if self.spawn_protected {
            Some(BlockReason::SpawnProtection)
        } else if self.invulnerable {
            Some(BlockReason::Invulnerable)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target already dead, or the hit dealt nothing.
    Ignored,
    Blocked(BlockReason),
    Wounded { dealt: i32 },
    Killed { dealt: i32 },
}

/// Apply one hit. Guards absorb the whole hit; nothing is dealt partially.
pub fn take_damage(
    health: &mut Health,
    life: LifeState,
    guards: DamageGuards,
    amount: i32,
) -> DamageOutcome {
    if life == LifeState::Dead || health.is_depleted() {
        return DamageOutcome::Ignored;
    }
    if let Some(reason) = guards.block_reason() {
        return DamageOutcome::Blocked(reason);
    }

    match health.apply(amount) {
        0 => DamageOutcome::Ignored,
        dealt if health.is_depleted() => DamageOutcome::Killed { dealt },
        dealt => DamageOutcome::Wounded { dealt },
    }
}

/// Feedback cue for a resolved hit. `None` kind means the player ship.
///
/// Bosses only cue their own hit sound while they survive the hit.
pub fn hit_cue(kind: Option<ActorKind>, outcome: DamageOutcome) -> Option<SoundCue> {
    match (kind, outcome) {
        (_, DamageOutcome::Ignored | DamageOutcome::Blocked(_)) => None,
        (None, _) => Some(SoundCue::PlayerHit),
        (Some(ActorKind::Basic), _) => Some(SoundCue::EnemyHit),
        (Some(ActorKind::Boss), DamageOutcome::Wounded { .. }) => Some(SoundCue::BossHit),
        (Some(ActorKind::Boss), DamageOutcome::Killed { .. }) => None,
    }
}

pub fn apply_damage(
    mut requests: MessageReader<DamageRequest>,
    mut q: Query<(
        &mut Health,
        &LifeState,
        Option<&Actor>,
        Option<&SpawnProtection>,
        Option<&Invulnerable>,
        Option<&BossAbilities>,
    )>,
    mut sounds: MessageWriter<PlaySound>,
) {
    for req in requests.read() {
        let Ok((mut health, life, actor, protection, invulnerable, abilities)) =
            q.get_mut(req.target)
        else {
            continue;
        };

        let guards = DamageGuards {
            shielded: abilities.is_some_and(BossAbilities::should_block_damage),
            spawn_protected: protection.is_some_and(SpawnProtection::is_active),
            invulnerable: invulnerable.is_some_and(Invulnerable::is_active),
        };

        let outcome = take_damage(&mut health, *life, guards, req.amount);
        if let DamageOutcome::Blocked(reason) = outcome {
            debug!("{}: hit blocked ({reason:?})", req.target);
        }
        if let Some(cue) = hit_cue(actor.map(|a| a.kind), outcome) {
            sounds.write(PlaySound(cue));
        }
    }
}
