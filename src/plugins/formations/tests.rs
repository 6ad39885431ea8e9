use bevy::prelude::*;

use super::components::{Formation, FormationSlot, Motion};
use super::layout::{
    circle_offsets, grid_offsets, row_offsets, FormationKind, FormationSpec, LayoutSpec,
};
use super::spawn::{populate_formations, spawn_formation, FormationRoster};
use super::systems::advance_formations;
use crate::common::playfield::Playfield;
use crate::common::test_utils::{advance_time, insert_time, run_system_once};
use crate::plugins::actors::components::{Actor, Dormant};
use crate::plugins::actors::profile::EnemyProfile;

fn slot(entity: Entity, offset: Vec2, row: usize) -> FormationSlot {
    FormationSlot { entity, origin: offset, offset, row }
}

fn settled(kind: FormationKind, motion: Motion) -> Formation {
    let mut f = Formation::new(kind, Vec2::ZERO, Vec2::ZERO, 0.0, motion);
    f.step_entry(0.0);
    f
}

fn row_spec(count: u32, entry_duration: f32) -> FormationSpec {
    FormationSpec {
        layout: LayoutSpec::StraightRow { count, spacing: 128.0, move_speed: 128.0 },
        enemy: Some(EnemyProfile { spawn_protection: None, ..default() }),
        entry_duration,
    }
}

#[test]
fn row_offsets_are_centred() {
    let xs: Vec<f32> = row_offsets(3, 128.0).iter().map(|(o, _)| o.x).collect();
    assert_eq!(xs, vec![-128.0, 0.0, 128.0]);
}

#[test]
fn grid_puts_row_zero_on_top() {
    let offsets = grid_offsets(2, 5, 96.0);
    assert_eq!(offsets.len(), 10);
    let top = offsets.iter().filter(|(_, r)| *r == 0).map(|(o, _)| o.y);
    let bottom = offsets.iter().filter(|(_, r)| *r == 1).map(|(o, _)| o.y);
    assert!(top.zip(bottom).all(|(t, b)| t > b));
}

#[test]
fn circle_offsets_start_on_x_axis() {
    let offsets = circle_offsets(4, 100.0);
    assert!((offsets[0] - Vec2::new(100.0, 0.0)).length() < 1e-3);
    assert!((offsets[1] - Vec2::new(0.0, 100.0)).length() < 1e-3);
    assert!(circle_offsets(0, 100.0).is_empty());
}

#[test]
fn zigzag_rows_bounce_independently() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();
    let playfield = Playfield::default();

    let mut f = settled(
        FormationKind::ZigZag,
        Motion::ZigZag {
            rows_moving_right: vec![true, false],
            row_speed: 128.0,
            edge_buffer: 64.0,
            drift: 0.0,
        },
    );
    // Row 0 already past the right edge (384 - 64); row 1 in the middle.
    f.populate(vec![slot(a, Vec2::new(330.0, 0.0), 0), slot(b, Vec2::ZERO, 1)], None);

    f.step_motion(0.1, &playfield);

    assert_eq!(f.row_directions(), Some(&[false, false][..]));
    let offsets: Vec<f32> = f.members().map(|s| s.offset.x).collect();
    assert!((offsets[0] - (330.0 - 12.8)).abs() < 1e-3);
    assert!((offsets[1] + 12.8).abs() < 1e-3);
}

#[test]
fn zigzag_row_turns_at_left_edge() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let playfield = Playfield::default();

    let mut f = settled(
        FormationKind::ZigZag,
        Motion::ZigZag {
            rows_moving_right: vec![false],
            row_speed: 100.0,
            edge_buffer: 64.0,
            drift: 0.0,
        },
    );
    f.populate(vec![slot(a, Vec2::new(-330.0, 0.0), 0)], None);

    f.step_motion(0.5, &playfield);
    assert_eq!(f.row_directions(), Some(&[true][..]));
    assert!((f.members().next().unwrap().offset.x + 280.0).abs() < 1e-3);
}

#[test]
fn orbit_is_recomputed_from_origin() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let playfield = Playfield::default();

    let mut f = settled(
        FormationKind::Circle,
        Motion::Orbit { angle_deg: 0.0, rotation_speed: 90.0, drift: 0.0 },
    );
    f.populate(vec![slot(a, Vec2::new(192.0, 0.0), 0)], None);

    for _ in 0..1000 {
        f.step_motion(0.001, &playfield);
    }
    let offset = f.members().next().unwrap().offset;
    assert!((offset - Vec2::new(0.0, 192.0)).length() < 0.05, "offset {offset}");
    assert!((offset.length() - 192.0).abs() < 1e-3);
}

#[test]
fn member_count_only_shrinks_and_clears_at_zero() {
    let mut world = World::new();
    let ids: Vec<Entity> = (0..3).map(|_| world.spawn_empty().id()).collect();
    let boss = world.spawn_empty().id();

    let mut f = settled(FormationKind::Circle, Motion::Hold);
    f.populate(ids.iter().map(|&e| slot(e, Vec2::ZERO, 0)).collect(), Some(boss));
    assert_eq!(f.expected(), 4);

    let mut dead = vec![ids[0]];
    assert_eq!(f.remaining_count(|e| !dead.contains(&e)), 3);

    // Populating again is ignored.
    f.populate(vec![slot(ids[0], Vec2::ZERO, 0)], None);
    assert_eq!(f.remaining_count(|e| !dead.contains(&e)), 3);

    dead.extend([ids[1], ids[2]]);
    assert!(!f.is_cleared(|e| !dead.contains(&e)));

    // The boss centerpiece counts as a member.
    dead.push(boss);
    assert!(f.is_cleared(|e| !dead.contains(&e)));

    // A member reported alive again is not re-added.
    assert_eq!(f.remaining_count(|_| true), 0);
}

#[test]
fn empty_formation_is_cleared_immediately() {
    let mut f = settled(FormationKind::StraightRow, Motion::Hold);
    f.populate(Vec::new(), None);
    assert!(f.is_cleared(|_| true));
}

#[test]
fn entry_lerps_to_target() {
    let mut f = Formation::new(
        FormationKind::Grid,
        Vec2::new(0.0, 500.0),
        Vec2::new(0.0, 100.0),
        2.0,
        Motion::Hold,
    );
    assert!(!f.step_entry(1.0));
    assert_eq!(f.anchor, Vec2::new(0.0, 300.0));
    assert!(f.step_entry(1.5));
    assert_eq!(f.anchor, Vec2::new(0.0, 100.0));
    assert!(!f.is_entering());
}

#[test]
fn populate_spawns_dormant_members() {
    let mut world = World::new();
    world.insert_resource(Playfield::default());

    let spec = row_spec(3, 1.0);
    let fe = run_system_once(&mut world, move |mut commands: Commands, pf: Res<Playfield>| {
        spawn_formation(&mut commands, &spec, &pf)
    });
    run_system_once(&mut world, populate_formations);

    assert!(world.get::<FormationRoster>(fe).is_none());
    let formation = world.get::<Formation>(fe).unwrap();
    assert!(formation.is_populated());
    assert_eq!(formation.expected(), 3);

    let dormant = world
        .query_filtered::<(), (With<Actor>, With<Dormant>)>()
        .iter(&world)
        .count();
    assert_eq!(dormant, 3);
}

#[test]
fn missing_enemy_profile_spawns_nothing() {
    let mut world = World::new();
    world.insert_resource(Playfield::default());

    let spec = FormationSpec { enemy: None, ..row_spec(3, 1.0) };
    let fe = run_system_once(&mut world, move |mut commands: Commands, pf: Res<Playfield>| {
        spawn_formation(&mut commands, &spec, &pf)
    });
    run_system_once(&mut world, populate_formations);

    let mut formation = world.get_mut::<Formation>(fe).unwrap();
    assert_eq!(formation.expected(), 0);
    assert!(formation.is_cleared(|_| true));
    assert_eq!(world.query::<&Actor>().iter(&world).count(), 0);
}

#[test]
fn members_are_released_on_arrival() {
    let mut world = World::new();
    let playfield = Playfield::default();
    world.insert_resource(playfield);
    insert_time(&mut world, 0.6);

    let spec = row_spec(3, 1.0);
    let target = spec.layout.target_anchor(&playfield);
    let fe = run_system_once(&mut world, move |mut commands: Commands, pf: Res<Playfield>| {
        spawn_formation(&mut commands, &spec, &pf)
    });
    run_system_once(&mut world, populate_formations);

    run_system_once(&mut world, advance_formations);
    assert_eq!(world.query_filtered::<(), With<Dormant>>().iter(&world).count(), 3);

    advance_time(&mut world, 0.6);
    run_system_once(&mut world, advance_formations);

    assert_eq!(world.query_filtered::<(), With<Dormant>>().iter(&world).count(), 0);
    assert_eq!(world.get::<Formation>(fe).unwrap().anchor, target);

    let mut ys: Vec<f32> = world
        .query_filtered::<&Transform, With<Actor>>()
        .iter(&world)
        .map(|tf| tf.translation.y)
        .collect();
    ys.dedup();
    assert_eq!(ys, vec![target.y]);
}
