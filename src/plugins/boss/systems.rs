use bevy::prelude::*;

use super::abilities::{
    pick_teleport_destination, Ability, BossAbilities, BossAbilityUsed, ShieldChange,
};
use super::components::{Boss, BossPhase, BossPhaseChanged};
use crate::common::playfield::Playfield;
use crate::plugins::actors::components::{Health, LifeState};
use crate::plugins::attacks::Arsenal;
use crate::plugins::core::CombatRng;

/// Teleport destinations stay inside the 10%..90% band of the playfield.
const TELEPORT_INSET: f32 = 0.1;
const SHIELD_TINT: Color = Color::srgb(0.2, 1.0, 1.0);

pub fn advance_boss_entry(time: Res<Time>, mut q: Query<(&mut Boss, &mut Transform)>) {
    let dt = time.delta_secs();

    for (mut boss, mut tf) in &mut q {
        let Some(pos) = boss.step_glide(dt) else { continue };
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        if boss.entered_arena() {
            info!("boss entered the arena");
        }
    }
}

/// Swap every attacker off, then the target phase's attackers on. One swap per activation,
/// however many thresholds a single hit crossed.
pub fn activate_phase(
    boss: &mut Boss,
    arsenal: &mut Arsenal,
    target: BossPhase,
    now: f32,
) -> BossPhase {
    let from = boss.phase;

    arsenal.disable_all();
    arsenal.enable_phase(target.number(), now);
    if from == BossPhase::Entry {
        // Freshly arrived: open fire right away instead of waiting out the first cooldown.
        arsenal.enable_immediate_shooting(now);
    }

    boss.phase = target;
    from
}

pub fn update_boss_phases(
    time: Res<Time>,
    mut q: Query<(Entity, &mut Boss, &Health, &LifeState, &mut Arsenal)>,
    mut changed: MessageWriter<BossPhaseChanged>,
) {
    let now = time.elapsed_secs();

    for (e, mut boss, health, life, mut arsenal) in &mut q {
        if *life == LifeState::Dead {
            continue;
        }
        let Some(target) = boss.pending_phase(health.ratio()) else { continue };

        let from = activate_phase(&mut boss, &mut arsenal, target, now);
        info!("boss {e}: phase {} -> {}", from.number(), target.number());
        changed.write(BossPhaseChanged { boss: e, from, to: target });
    }
}

pub fn update_boss_abilities(
    time: Res<Time>,
    playfield: Res<Playfield>,
    mut rng: ResMut<CombatRng>,
    mut q: Query<(Entity, &Boss, &Health, &LifeState, &mut BossAbilities, &mut Transform)>,
    mut used: MessageWriter<BossAbilityUsed>,
) {
    let dt = time.delta_secs();
    let bounds = playfield.inner_rect(TELEPORT_INSET);

    for (e, boss, health, life, mut abilities, mut tf) in &mut q {
        let abilities = &mut *abilities;

        if let Some(shield) = abilities.shield.as_mut() {
            if shield.tick(dt) == Some(ShieldChange::Dropped) {
                debug!("boss {e}: shield down");
            }
        }
        if let Some(teleport) = abilities.teleport.as_mut() {
            teleport.tick(dt);
        }

        if !boss.entered_arena() || *life == LifeState::Dead {
            continue;
        }
        let ratio = health.ratio();

        if let Some(shield) = abilities.shield.as_mut() {
            if shield.try_raise(ratio) {
                debug!("boss {e}: shield up");
                used.write(BossAbilityUsed { boss: e, ability: Ability::Shield });
            }
        }

        if let Some(teleport) = abilities.teleport.as_mut() {
            if teleport.is_ready_for(ratio) {
                let from = tf.translation.truncate();
                let spec = teleport.spec;
                let destination = pick_teleport_destination(
                    &mut rng.0,
                    from,
                    spec.range,
                    bounds,
                    spec.max_attempts,
                );
                match destination {
                    Some(to) => {
                        tf.translation.x = to.x;
                        tf.translation.y = to.y;
                        debug!("boss {e}: teleported {from} -> {to}");
                        used.write(BossAbilityUsed { boss: e, ability: Ability::Teleport });
                    }
                    None => debug!("boss {e}: no teleport destination found"),
                }
                teleport.start_cooldown();
            }
        }
    }
}

/// Presentation: phase tint, cyan while shielded. Alpha is left to spawn protection.
pub fn tint_bosses(mut q: Query<(&Boss, Option<&BossAbilities>, &mut Sprite)>) {
    for (boss, abilities, mut sprite) in &mut q {
        let shielded = abilities.is_some_and(BossAbilities::should_block_damage);
        let base = if shielded { SHIELD_TINT } else { boss.tint() };
        let alpha = sprite.color.alpha();
        sprite.color = base.with_alpha(alpha);
    }
}
