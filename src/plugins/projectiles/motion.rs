use bevy::prelude::*;

use super::components::{Projectile, ProjectileState};
use crate::common::{playfield::Playfield, tunables::Tunables};

/// Straight-line flight. Expired or escaped projectiles are handed back to the pool.
pub fn advance_projectiles(
    time: Res<Time>,
    playfield: Res<Playfield>,
    tunables: Res<Tunables>,
    mut q: Query<(&mut Projectile, &mut ProjectileState, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (mut projectile, mut state, mut tf) in &mut q {
        if *state != ProjectileState::Active {
            continue;
        }

        let step = projectile.velocity() * dt;
        tf.translation += step.extend(0.0);
        projectile.lifetime -= dt;

        let escaped =
            !playfield.contains(tf.translation.truncate(), tunables.projectile_cull_margin);
        if projectile.lifetime <= 0.0 || escaped {
            *state = ProjectileState::PendingReturn;
        }
    }
}
