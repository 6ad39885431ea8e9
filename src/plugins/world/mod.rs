//! World plugin: the backdrop and border frame of the playfield.
//!
//! Render-only. Nothing here has a collider; leaving the playfield is handled by the cull
//! systems of actors and projectiles.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{playfield::Playfield, state::GameState};

const BORDER: f32 = 8.0;
const STAR_SPACING: f32 = 64.0;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_backdrop, spawn_border));
}

fn spawn_border(mut commands: Commands, playfield: Res<Playfield>) {
    let color = Color::srgb(0.25, 0.27, 0.33);
    let size = playfield.half_extents * 2.0;
    let h = playfield.half_extents;

    let mut spawn_strip = |name: &str, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(format!("Border{name}")),
            Sprite::from_color(color, size),
            Transform::from_translation(pos.extend(5.0)),
            DespawnOnExit(GameState::InGame),
        ));
    };

    let across = Vec2::new(size.x + BORDER * 2.0, BORDER);
    let down = Vec2::new(BORDER, size.y);
    spawn_strip("Top", Vec2::new(0.0, h.y + BORDER * 0.5), across);
    spawn_strip("Bottom", Vec2::new(0.0, -h.y - BORDER * 0.5), across);
    spawn_strip("Left", Vec2::new(-h.x - BORDER * 0.5, 0.0), down);
    spawn_strip("Right", Vec2::new(h.x + BORDER * 0.5, 0.0), down);
}

/// Dark field with a sparse, fixed star pattern.
fn spawn_backdrop(mut commands: Commands, playfield: Res<Playfield>) {
    commands.spawn((
        Name::new("Backdrop"),
        Sprite::from_color(Color::srgb(0.03, 0.03, 0.08), playfield.half_extents * 2.0),
        Transform::from_xyz(0.0, 0.0, -10.0),
        DespawnOnExit(GameState::InGame),
    ));

    let cols = (playfield.half_extents.x / STAR_SPACING) as i32;
    let rows = (playfield.half_extents.y / STAR_SPACING) as i32;

    (-rows..=rows)
        .flat_map(|y| (-cols..=cols).map(move |x| (x, y)))
        // Deterministic scatter: keep roughly one cell in three.
        .filter(|(x, y)| (x * 7 + y * 13).rem_euclid(3) == 0)
        .for_each(|(x, y)| {
            let jitter = Vec2::new(
                ((x * 31 + y * 17) % 24) as f32,
                ((x * 11 - y * 29) % 24) as f32,
            );
            let pos = Vec2::new(x as f32, y as f32) * STAR_SPACING + jitter;
            commands.spawn((
                Sprite::from_color(Color::srgba(0.8, 0.85, 1.0, 0.5), Vec2::splat(2.0)),
                Transform::from_translation(pos.extend(-9.0)),
                DespawnOnExit(GameState::InGame),
            ));
        });
}
