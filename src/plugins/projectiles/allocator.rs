//! Spawn consumer: activate projectiles from the pool.
//!
//! Invariant: the free list only holds entities spawned by `init_projectile_pool`. A miss is
//! logged and the request dropped, the same way an exhausted pool drops it.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{PooledProjectile, Projectile, ProjectileEntity, ProjectileState};
use super::messages::SpawnProjectile;
use super::pool::{active_layers, projectile_color, ProjectilePool};

pub fn allocate_projectiles(
    mut pool: ResMut<ProjectilePool>,
    mut reader: MessageReader<SpawnProjectile>,
    mut q: Query<
        (
            &mut ProjectileState,
            &mut Projectile,
            &mut Transform,
            &mut Visibility,
            &mut CollisionLayers,
            &mut Sprite,
        ),
        With<PooledProjectile>,
    >,
) {
    for req in reader.read() {
        let Some(ProjectileEntity(e)) = pool.pop_free() else {
            // Capacity decision, not a correctness failure.
            debug!("projectile pool exhausted, dropping a {:?} shot", req.owner);
            continue;
        };

        let Ok((mut state, mut projectile, mut tf, mut vis, mut layers, mut sprite)) = q.get_mut(e)
        else {
            error!("{e}: pooled projectile is missing its components");
            continue;
        };

        *state = ProjectileState::Active;
        *projectile = Projectile::launch(req.owner, req.direction, req.profile, req.source);
        tf.translation = req.pos.extend(2.0);
        *vis = Visibility::Visible;
        *layers = active_layers(req.owner);
        sprite.color = projectile_color(req.owner);
    }
}
