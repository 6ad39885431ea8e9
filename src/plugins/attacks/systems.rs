use bevy::prelude::*;

use super::Arsenal;
use crate::common::playfield::Playfield;
use crate::plugins::actors::components::{Actor, ActorKind, Dormant, Faction, PendingDespawn};
use crate::plugins::boss::components::Boss;
use crate::plugins::core::cues::{PlaySound, SoundCue};
use crate::plugins::projectiles::messages::SpawnProjectile;

/// Fire every due strategy of every released actor that is on screen.
///
/// Off-screen actors hold their cadence; they resume once they are visible again.
pub fn fire_arsenals(
    time: Res<Time>,
    playfield: Res<Playfield>,
    mut q: Query<
        (Entity, Option<&Name>, &Transform, &Actor, &mut Arsenal, Option<&Boss>),
        (Without<Dormant>, Without<PendingDespawn>),
    >,
    mut spawns: MessageWriter<SpawnProjectile>,
    mut sounds: MessageWriter<PlaySound>,
) {
    let now = time.elapsed_secs();

    for (e, name, tf, actor, mut arsenal, boss) in &mut q {
        let origin = tf.translation.truncate();
        if !playfield.contains(origin, 0.0) {
            continue;
        }

        let phase = boss.map_or(0, |b| b.phase.number());
        let scale = tf.scale.truncate();
        let cue = match actor.kind {
            ActorKind::Basic => SoundCue::EnemyShoot,
            ActorKind::Boss => SoundCue::BossShoot,
        };

        for strategy in &mut arsenal.strategies {
            let salvo = match strategy.tick(now, phase) {
                Ok(salvo) => salvo,
                Err(err) => {
                    let label = name.map_or("actor", Name::as_str);
                    warn!("{label} ({e}): attack disabled: {err}");
                    continue;
                }
            };

            for shot in &salvo.shots {
                spawns.write(SpawnProjectile {
                    owner: Faction::Enemy,
                    pos: origin + shot.offset * scale,
                    direction: shot.direction,
                    profile: shot.projectile,
                    source: Some(e),
                });
            }
            if salvo.announce {
                sounds.write(PlaySound(cue));
            }
        }
    }
}
