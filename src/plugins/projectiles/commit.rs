//! Return commit: recycle projectiles back into the pool.
//!
//! This module owns the *Inactive invariants*: an inactive projectile is hidden, idle and
//! collides with nothing. Every return goes through `deactivate`.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{PooledProjectile, Projectile, ProjectileEntity, ProjectileState};
use super::pool::{inactive_layers, ProjectilePool};

type PooledQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut ProjectileState,
        &'static mut Projectile,
        &'static mut Visibility,
        &'static mut CollisionLayers,
    ),
    With<PooledProjectile>,
>;

fn deactivate(
    state: &mut ProjectileState,
    projectile: &mut Projectile,
    vis: &mut Visibility,
    layers: &mut CollisionLayers,
) {
    *state = ProjectileState::Inactive;
    *projectile = Projectile::idle();
    *vis = Visibility::Hidden;
    *layers = inactive_layers();
}

pub fn return_to_pool_commit(mut pool: ResMut<ProjectilePool>, mut q: PooledQuery) {
    for (e, mut state, mut projectile, mut vis, mut layers) in &mut q {
        if *state != ProjectileState::PendingReturn {
            continue;
        }
        deactivate(&mut state, &mut projectile, &mut vis, &mut layers);
        pool.push_free(ProjectileEntity(e));
    }
}

/// Pull every projectile in flight back into the pool (match teardown).
pub fn recall_all_projectiles(mut pool: ResMut<ProjectilePool>, mut q: PooledQuery) {
    for (e, mut state, mut projectile, mut vis, mut layers) in &mut q {
        if *state == ProjectileState::Inactive {
            continue;
        }
        deactivate(&mut state, &mut projectile, &mut vis, &mut layers);
        pool.push_free(ProjectileEntity(e));
    }
}
