use bevy::prelude::*;

use super::profile::EnemyProfile;

/// Which side an entity fights for. Projectiles carry the side of their shooter.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    /// Default travel direction for shots fired by this side.
    #[inline]
    pub fn forward(self) -> Vec2 {
        match self {
            Self::Player => Vec2::Y,
            Self::Enemy => Vec2::NEG_Y,
        }
    }

    #[inline]
    pub fn is_hostile_to(self, other: Faction) -> bool {
        self != other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Basic,
    Boss,
}

/// Health-bearing combatant spawned by a formation or the wave director.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub kind: ActorKind,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct ActorStats {
    pub max_health: i32,
    pub score_value: u32,
    pub move_speed: f32,
    pub fire_rate: f32,
    pub projectile_damage: i32,
    pub projectile_speed: f32,
    pub scale: Vec2,
}

impl ActorStats {
    pub fn from_profile(profile: &EnemyProfile) -> Self {
        let projectile = profile.projectile.unwrap_or_default();
        Self {
            max_health: profile.max_health.max(1),
            score_value: profile.score_value,
            move_speed: profile.move_speed,
            fire_rate: profile.fire_rate,
            projectile_damage: projectile.damage,
            projectile_speed: projectile.speed,
            scale: profile.scale,
        }
    }
}

/// Hit points. `0 <= current <= max` holds for every value reachable through the API.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Health already below full, clamped into range.
    pub fn with_current(max: i32, current: i32) -> Self {
        let max = max.max(1);
        Self { current: current.clamp(0, max), max }
    }

    #[inline]
    pub fn current(&self) -> i32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    #[inline]
    pub fn ratio(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    /// Subtract `amount` (negative amounts count as zero). Returns the damage actually dealt.
    pub fn apply(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current - amount.max(0)).max(0);
        before - self.current
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

impl LifeState {
    /// Flip to `Dead`. Returns `true` only for the call that performed the transition.
    pub fn mark_dead(&mut self) -> bool {
        if *self == Self::Dead {
            return false;
        }
        *self = Self::Dead;
        true
    }
}

/// Marker: remove this entity in `PostUpdate`.
///
/// Fixed-step systems never despawn directly; they mark and let the cleanup pass do it.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Actor is held by a formation entry: no firing, no movement of its own, no culling.
#[derive(Component, Debug, Clone, Copy)]
pub struct Dormant;

/// Short-lived marker left where an actor died.
#[derive(Component, Debug, Clone)]
pub struct DeathEffect {
    pub timer: Timer,
}

/// Timed invulnerability (power-ups). Blocks damage while the timer runs.
#[derive(Component, Debug, Clone)]
pub struct Invulnerable {
    pub timer: Timer,
}

impl Invulnerable {
    pub fn for_secs(secs: f32) -> Self {
        Self { timer: Timer::from_seconds(secs, TimerMode::Once) }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        !self.timer.is_finished()
    }
}
