use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::abilities::{ShieldSpec, TeleportSpec};
use crate::plugins::actors::profile::EnemyProfile;
use crate::plugins::attacks::strategy::{AttackSpec, PhaseTable};

/// Extra attack that only runs during one boss phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasedAttack {
    pub phase: u8,
    pub attack: AttackSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossProfile {
    /// Health, score, projectile and fire points. `base.attack` is not used by bosses.
    pub base: EnemyProfile,
    pub entry_duration: f32,
    pub entry_target: Vec2,
    pub phase1_threshold: f32,
    pub phase2_threshold: f32,
    pub phases: PhaseTable,
    pub extra_attacks: Vec<PhasedAttack>,
    pub shield: Option<ShieldSpec>,
    pub teleport: Option<TeleportSpec>,
    pub phase_tints: [[f32; 3]; 3],
}

impl Default for BossProfile {
    fn default() -> Self {
        Self {
            base: EnemyProfile {
                name: "Boss".into(),
                max_health: 1000,
                score_value: 1000,
                move_speed: 64.0,
                attack: AttackSpec::None,
                fire_points: vec![
                    Vec2::new(0.0, -32.0),
                    Vec2::new(-51.0, -19.0),
                    Vec2::new(51.0, -19.0),
                ],
                radius: 40.0,
                tint: [1.0, 1.0, 1.0],
                ..default()
            },
            entry_duration: 3.0,
            entry_target: Vec2::new(0.0, 192.0),
            phase1_threshold: 0.7,
            phase2_threshold: 0.3,
            phases: PhaseTable::default(),
            extra_attacks: Vec::new(),
            shield: Some(ShieldSpec::default()),
            teleport: Some(TeleportSpec::default()),
            phase_tints: [[1.0, 1.0, 1.0], [1.0, 0.2, 0.2], [1.0, 0.2, 1.0]],
        }
    }
}

impl BossProfile {
    pub fn tints(&self) -> [Color; 3] {
        self.phase_tints.map(|[r, g, b]| Color::srgb(r, g, b))
    }
}
