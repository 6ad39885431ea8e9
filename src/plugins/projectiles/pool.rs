use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{PooledProjectile, Projectile, ProjectileEntity, ProjectileState};
use crate::common::layers::Layer;
use crate::plugins::actors::components::Faction;

#[derive(Resource, Debug)]
pub struct ProjectilePool {
    free: Vec<ProjectileEntity>,
    capacity: usize,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self { free: Vec::with_capacity(capacity), capacity }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<ProjectileEntity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, e: ProjectileEntity) {
        self.free.push(e);
    }
}

#[inline]
pub fn active_layers(owner: Faction) -> CollisionLayers {
    match owner {
        Faction::Player => CollisionLayers::new(Layer::PlayerBullet, [Layer::Enemy]),
        Faction::Enemy => CollisionLayers::new(Layer::EnemyBullet, [Layer::Player]),
    }
}

/// Inactive projectiles belong to no layer and collide with nothing.
#[inline]
pub fn inactive_layers() -> CollisionLayers {
    CollisionLayers::new(LayerMask::NONE, LayerMask::NONE)
}

#[inline]
pub fn projectile_color(owner: Faction) -> Color {
    match owner {
        Faction::Player => Color::srgb(1.0, 0.9, 0.35),
        Faction::Enemy => Color::srgb(1.0, 0.35, 0.55),
    }
}

/// Pre-spawn the whole pool, hidden and inert.
///
/// Physics components stay on the entity for its whole life; activation only rewrites
/// values, so there is no archetype churn per shot.
pub fn init_projectile_pool(mut commands: Commands, mut pool: ResMut<ProjectilePool>) {
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("Projectile(Pooled)"),
                PooledProjectile,
                ProjectileState::Inactive,
                Projectile::idle(),
                Sprite {
                    color: projectile_color(Faction::Enemy),
                    custom_size: Some(Vec2::splat(8.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                (
                    RigidBody::Dynamic,
                    LockedAxes::ROTATION_LOCKED,
                    Collider::circle(4.0),
                    Sensor,
                    inactive_layers(),
                    CollisionEventsEnabled,
                ),
            ))
            .id();

        pool.free.push(ProjectileEntity(e));
    }
}
