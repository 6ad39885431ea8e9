//! Serializable stat blocks for basic enemies.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::plugins::attacks::strategy::AttackSpec;
use crate::plugins::projectiles::components::ProjectileProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyProfile {
    pub name: String,
    pub max_health: i32,
    pub score_value: u32,
    pub move_speed: f32,
    /// Volleys per second for single/spread attacks.
    pub fire_rate: f32,
    /// `None` leaves the attack unconfigured; it disables itself on first use.
    pub projectile: Option<ProjectileProfile>,
    pub attack: AttackSpec,
    /// Muzzle offsets in local space; the first one is the primary.
    pub fire_points: Vec<Vec2>,
    /// Seconds of invulnerability after spawning.
    pub spawn_protection: Option<f32>,
    pub scale: Vec2,
    pub radius: f32,
    pub tint: [f32; 3],
}

impl Default for EnemyProfile {
    fn default() -> Self {
        Self {
            name: "Enemy".into(),
            max_health: 100,
            score_value: 10,
            move_speed: 128.0,
            fire_rate: 1.0,
            projectile: Some(ProjectileProfile::default()),
            attack: AttackSpec::Single,
            fire_points: vec![Vec2::new(0.0, -20.0)],
            spawn_protection: Some(5.0),
            scale: Vec2::ONE,
            radius: 18.0,
            tint: [0.95, 0.35, 0.3],
        }
    }
}

impl EnemyProfile {
    #[inline]
    pub fn color(&self) -> Color {
        let [r, g, b] = self.tint;
        Color::srgb(r, g, b)
    }
}
