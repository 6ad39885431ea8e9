use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::plugins::actors::components::Faction;

/// Damage/speed/lifetime of one projectile, as written in profiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileProfile {
    pub damage: i32,
    pub speed: f32,
    pub lifetime: f32,
}

impl Default for ProjectileProfile {
    fn default() -> Self {
        Self { damage: 10, speed: 320.0, lifetime: 3.0 }
    }
}

#[derive(Component)]
pub struct PooledProjectile;

/// Newtype for entities that are guaranteed to be pooled projectiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectileEntity(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub owner: Faction,
    pub direction: Vec2,
    pub speed: f32,
    pub damage: i32,
    /// Seconds left before the projectile expires.
    pub lifetime: f32,
    pub source: Option<Entity>,
}

impl Projectile {
    pub fn idle() -> Self {
        Self {
            owner: Faction::Enemy,
            direction: Vec2::NEG_Y,
            speed: 0.0,
            damage: 0,
            lifetime: 0.0,
            source: None,
        }
    }

    /// Fresh flight parameters. A zero direction falls back to the owner's forward.
    pub fn launch(
        owner: Faction,
        direction: Vec2,
        profile: ProjectileProfile,
        source: Option<Entity>,
    ) -> Self {
        Self {
            owner,
            direction: direction.try_normalize().unwrap_or(owner.forward()),
            speed: profile.speed,
            damage: profile.damage,
            lifetime: profile.lifetime,
            source,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}
