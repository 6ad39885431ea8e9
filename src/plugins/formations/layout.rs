//! Formation descriptions and their geometry.
//!
//! Offsets are relative to the formation anchor. All functions here are pure.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::common::playfield::Playfield;
use crate::plugins::actors::profile::EnemyProfile;
use crate::plugins::boss::profile::BossProfile;

/// Height above the top edge where formations appear before flying in.
pub const ENTRY_HEIGHT: f32 = 192.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayoutSpec {
    StraightRow {
        count: u32,
        spacing: f32,
        move_speed: f32,
    },
    Grid {
        rows: u32,
        cols: u32,
        spacing: f32,
        move_speed: f32,
        stay_in_position: bool,
    },
    ZigZag {
        rows: u32,
        cols: u32,
        spacing: f32,
        row_speed: f32,
        edge_buffer: f32,
        downward_speed: f32,
        stay_in_position: bool,
    },
    Circle {
        count: u32,
        radius: f32,
        /// Degrees per second.
        rotation_speed: f32,
        move_speed: f32,
        stay_in_position: bool,
        boss: Option<BossProfile>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationSpec {
    pub layout: LayoutSpec,
    /// `None` spawns no members; the formation then clears immediately.
    pub enemy: Option<EnemyProfile>,
    pub entry_duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormationKind {
    StraightRow,
    Grid,
    ZigZag,
    Circle,
}

impl LayoutSpec {
    pub fn kind(&self) -> FormationKind {
        match self {
            Self::StraightRow { .. } => FormationKind::StraightRow,
            Self::Grid { .. } => FormationKind::Grid,
            Self::ZigZag { .. } => FormationKind::ZigZag,
            Self::Circle { .. } => FormationKind::Circle,
        }
    }

    /// Member offsets with their row index.
    pub fn offsets(&self) -> Vec<(Vec2, usize)> {
        match *self {
            Self::StraightRow { count, spacing, .. } => row_offsets(count, spacing),
            Self::Grid { rows, cols, spacing, .. } | Self::ZigZag { rows, cols, spacing, .. } => {
                grid_offsets(rows, cols, spacing)
            }
            Self::Circle { count, radius, .. } => {
                circle_offsets(count, radius).into_iter().map(|o| (o, 0)).collect()
            }
        }
    }

    /// Where the anchor settles once the entry is over.
    pub fn target_anchor(&self, playfield: &Playfield) -> Vec2 {
        let top = playfield.top();
        let y = match *self {
            Self::StraightRow { .. } => top * 0.75,
            Self::Grid { stay_in_position: true, .. } => top * 0.6,
            Self::Grid { spacing, .. } => top - spacing,
            Self::ZigZag { rows, spacing, .. } => {
                let height = rows.saturating_sub(1) as f32 * spacing;
                (top * 0.7).min(top - spacing * 0.5 - height * 0.5)
            }
            Self::Circle { .. } => top * 0.6,
        };
        Vec2::new(0.0, y)
    }
}

/// Centred horizontal line: `x_i = -(n-1)*spacing/2 + i*spacing`.
pub fn row_offsets(count: u32, spacing: f32) -> Vec<(Vec2, usize)> {
    let start = -(count.saturating_sub(1) as f32) * spacing * 0.5;
    (0..count)
        .map(|i| (Vec2::new(start + i as f32 * spacing, 0.0), 0))
        .collect()
}

/// Centred grid, row 0 on top.
pub fn grid_offsets(rows: u32, cols: u32, spacing: f32) -> Vec<(Vec2, usize)> {
    let half_w = cols.saturating_sub(1) as f32 * 0.5;
    let half_h = rows.saturating_sub(1) as f32 * 0.5;
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .map(|(r, c)| {
            let offset = Vec2::new((c as f32 - half_w) * spacing, (half_h - r as f32) * spacing);
            (offset, r as usize)
        })
        .collect()
}

/// Equal angular spacing starting on the +X axis.
pub fn circle_offsets(count: u32, radius: f32) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f32;
    (0..count)
        .map(|i| Vec2::from_angle((step * i as f32).to_radians()) * radius)
        .collect()
}
