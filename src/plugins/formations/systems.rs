use bevy::prelude::*;

use super::components::Formation;
use crate::common::playfield::Playfield;
use crate::plugins::actors::components::{Dormant, LifeState, PendingDespawn};
use crate::plugins::attacks::Arsenal;
use crate::plugins::boss::components::Boss;

type MemberQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Transform,
        &'static LifeState,
        Has<PendingDespawn>,
        Option<&'static mut Arsenal>,
        Option<&'static mut Boss>,
    ),
    Without<Formation>,
>;

/// Move every formation and its members. On arrival members are released: they wake up,
/// may fire straight away and, for a boss centerpiece, take over their own movement.
pub fn advance_formations(
    mut commands: Commands,
    time: Res<Time>,
    playfield: Res<Playfield>,
    mut formations: Query<(Entity, &mut Formation, &mut Transform)>,
    mut members: MemberQuery,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    for (fe, mut formation, mut ftf) in &mut formations {
        if !formation.is_populated() {
            continue;
        }

        formation.prune(|e| {
            members
                .get(e)
                .is_ok_and(|(_, life, doomed, _, _)| *life == LifeState::Alive && !doomed)
        });

        let was_entering = formation.is_entering();
        let arrived = if was_entering {
            formation.step_entry(dt)
        } else {
            formation.step_motion(dt, &playfield);
            false
        };

        ftf.translation.x = formation.anchor.x;
        ftf.translation.y = formation.anchor.y;

        for slot in formation.members() {
            let pos = formation.slot_position(slot);
            if let Ok((mut tf, ..)) = members.get_mut(slot.entity) {
                tf.translation.x = pos.x;
                tf.translation.y = pos.y;
            }
        }
        if was_entering {
            if let Some(boss) = formation.centerpiece() {
                if let Ok((mut tf, ..)) = members.get_mut(boss) {
                    tf.translation.x = formation.anchor.x;
                    tf.translation.y = formation.anchor.y;
                }
            }
        }

        if !arrived {
            continue;
        }

        info!("formation {fe}: in position, releasing {} members", formation.expected());
        for e in formation.entities() {
            commands.entity(e).try_remove::<Dormant>();
            let Ok((_, _, _, arsenal, boss)) = members.get_mut(e) else { continue };
            match boss {
                // The boss opens fire through its first phase activation.
                Some(mut boss) => boss.arrive(),
                None => {
                    if let Some(mut arsenal) = arsenal {
                        arsenal.enable_immediate_shooting(now);
                    }
                }
            }
        }
    }
}
