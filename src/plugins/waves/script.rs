//! The wave script: an ordered list of waves plus the director's pacing.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::plugins::actors::profile::EnemyProfile;
use crate::plugins::attacks::strategy::AttackSpec;
use crate::plugins::boss::profile::BossProfile;
use crate::plugins::formations::{FormationSpec, LayoutSpec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WaveSpec {
    Formation(FormationSpec),
    /// A boss flying in on its own. `None` is a broken entry; the wave completes empty.
    Boss { boss: Option<BossProfile> },
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveScript {
    /// Seconds between the player taking control and the first wave.
    pub opening_delay: f32,
    pub delay_between_waves: f32,
    /// Give up waiting for a formation to finish spawning after this long.
    pub spawn_timeout: f32,
    /// Clearance is not polled until a wave has been in progress this long.
    pub poll_grace: f32,
    /// Pause after the last member shows up before the wave counts as in progress.
    pub settle_delay: f32,
    pub waves: Vec<WaveSpec>,
}

impl Default for WaveScript {
    fn default() -> Self {
        Self {
            opening_delay: 2.0,
            delay_between_waves: 3.0,
            spawn_timeout: 5.0,
            poll_grace: 1.0,
            settle_delay: 0.1,
            waves: default_waves(),
        }
    }
}

impl WaveScript {
    #[inline]
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WaveSpec> {
        self.waves.get(index)
    }
}

fn grunt() -> EnemyProfile {
    EnemyProfile { name: "Grunt".into(), max_health: 50, ..default() }
}

/// Row, grid, zig-zag, then a ring escorting the boss.
fn default_waves() -> Vec<WaveSpec> {
    vec![
        WaveSpec::Formation(FormationSpec {
            layout: LayoutSpec::StraightRow { count: 3, spacing: 128.0, move_speed: 128.0 },
            enemy: Some(grunt()),
            entry_duration: 2.0,
        }),
        WaveSpec::Formation(FormationSpec {
            layout: LayoutSpec::Grid {
                rows: 2,
                cols: 5,
                spacing: 96.0,
                move_speed: 64.0,
                stay_in_position: true,
            },
            enemy: Some(EnemyProfile {
                name: "Gunner".into(),
                attack: AttackSpec::Burst { count: 3, delay: 0.15, cooldown: 2.5 },
                tint: [0.95, 0.6, 0.2],
                ..grunt()
            }),
            entry_duration: 2.0,
        }),
        WaveSpec::Formation(FormationSpec {
            layout: LayoutSpec::ZigZag {
                rows: 4,
                cols: 6,
                spacing: 64.0,
                row_speed: 128.0,
                edge_buffer: 64.0,
                downward_speed: 64.0,
                stay_in_position: true,
            },
            enemy: Some(EnemyProfile {
                name: "Skirmisher".into(),
                max_health: 30,
                fire_rate: 0.5,
                scale: Vec2::splat(0.75),
                radius: 14.0,
                tint: [0.4, 0.9, 0.4],
                ..grunt()
            }),
            entry_duration: 2.5,
        }),
        WaveSpec::Formation(FormationSpec {
            layout: LayoutSpec::Circle {
                count: 5,
                radius: 192.0,
                rotation_speed: 30.0,
                move_speed: 64.0,
                stay_in_position: true,
                boss: Some(BossProfile::default()),
            },
            enemy: Some(EnemyProfile {
                name: "Escort".into(),
                attack: AttackSpec::Spread { count: 3, angle_deg: 20.0 },
                tint: [0.6, 0.4, 1.0],
                ..grunt()
            }),
            entry_duration: 3.0,
        }),
    ]
}
