use bevy::prelude::*;

use super::director::{
    advance_director, await_player_ready, poll_wave_clearance, AllWavesCompleted, DirectorStage,
    WaveCompleted, WaveDirector, WaveStarted, WaveTarget,
};
use super::loader::{load_wave_script, parse_wave_script, ScriptError};
use super::script::{WaveScript, WaveSpec};
use crate::common::playfield::Playfield;
use crate::common::test_utils::{
    advance_time, drain_messages, ensure_messages, insert_time, run_system_once,
};
use crate::plugins::actors::components::Actor;
use crate::plugins::actors::profile::EnemyProfile;
use crate::plugins::attacks::strategy::AttackSpec;
use crate::plugins::core::score::{GameOver, ScoreBoard};
use crate::plugins::formations::spawn::populate_formations;
use crate::plugins::formations::{FormationSpec, LayoutSpec};
use crate::plugins::player::PlayerReady;

#[test]
fn bundled_script_parses() {
    let script = parse_wave_script(include_str!("../../../assets/data/waves.ron")).unwrap();
    assert_eq!(script.len(), 4);

    let WaveSpec::Formation(grid) = &script.waves[1] else { panic!("wave 2 is not a formation") };
    let enemy = grid.enemy.as_ref().unwrap();
    assert_eq!(enemy.attack, AttackSpec::Burst { count: 3, delay: 0.15, cooldown: 2.5 });
    assert_eq!(enemy.fire_points, EnemyProfile::default().fire_points);

    let WaveSpec::Formation(circle) = &script.waves[3] else { panic!("wave 4 is not a formation") };
    let LayoutSpec::Circle { boss: Some(boss), count, .. } = &circle.layout else {
        panic!("wave 4 has no boss")
    };
    assert_eq!(*count, 5);
    assert_eq!(boss.base.max_health, 1000);
    assert!(boss.shield.is_some() && boss.teleport.is_some());
}

#[test]
fn bundled_script_matches_built_in_waves() {
    let script = parse_wave_script(include_str!("../../../assets/data/waves.ron")).unwrap();
    assert_eq!(script, WaveScript::default());

    let WaveSpec::Formation(zigzag) = &script.waves[2] else { panic!("wave 3 is not a formation") };
    let enemy = zigzag.enemy.as_ref().unwrap();
    assert_eq!(enemy.scale, Vec2::splat(0.75));
    assert_eq!(enemy.tint, [0.4, 0.9, 0.4]);
}

#[test]
fn missing_fields_keep_defaults() {
    let script = parse_wave_script("(delay_between_waves: 1.0)").unwrap();
    assert_eq!(script.delay_between_waves, 1.0);
    assert_eq!(script.opening_delay, WaveScript::default().opening_delay);
    assert_eq!(script.len(), 4);
}

#[test]
fn load_errors_are_typed() {
    assert!(parse_wave_script("(waves: [Bogus])").is_err());
    assert!(matches!(
        load_wave_script("assets/data/does-not-exist.ron"),
        Err(ScriptError::Io { .. })
    ));
}

fn row_wave(enemy: Option<EnemyProfile>) -> WaveSpec {
    WaveSpec::Formation(FormationSpec {
        layout: LayoutSpec::StraightRow { count: 3, spacing: 128.0, move_speed: 0.0 },
        enemy,
        entry_duration: 1.0,
    })
}

fn director_world(waves: Vec<WaveSpec>) -> World {
    let mut world = World::new();
    insert_time(&mut world, 0.0);
    world.insert_resource(Playfield::default());
    world.insert_resource(WaveScript { waves, ..default() });
    world.init_resource::<WaveDirector>();
    world.init_resource::<ScoreBoard>();
    ensure_messages::<PlayerReady>(&mut world);
    ensure_messages::<WaveStarted>(&mut world);
    ensure_messages::<WaveCompleted>(&mut world);
    ensure_messages::<AllWavesCompleted>(&mut world);
    ensure_messages::<GameOver>(&mut world);
    world
}

fn tick(world: &mut World, dt: f32) {
    advance_time(world, dt);
    run_system_once(world, await_player_ready);
    run_system_once(world, advance_director);
    run_system_once(world, populate_formations);
    run_system_once(world, poll_wave_clearance);
}

fn start_first_wave(world: &mut World) {
    world.write_message(PlayerReady);
    tick(world, 0.0);
    assert!(matches!(world.resource::<WaveDirector>().stage(), DirectorStage::Opening { .. }));

    let opening = world.resource::<WaveScript>().opening_delay;
    tick(world, opening);
}

fn kill_all_actors(world: &mut World) {
    let actors: Vec<Entity> = world.query_filtered::<Entity, With<Actor>>().iter(world).collect();
    for e in actors {
        world.despawn(e);
    }
}

#[test]
fn waits_for_player_before_starting() {
    let mut world = director_world(vec![row_wave(Some(EnemyProfile::default()))]);
    tick(&mut world, 10.0);
    assert_eq!(world.resource::<WaveDirector>().stage(), DirectorStage::AwaitingPlayer);
    assert!(drain_messages::<WaveStarted>(&mut world).is_empty());
}

#[test]
fn single_wave_runs_to_victory() {
    let mut world = director_world(vec![row_wave(Some(EnemyProfile::default()))]);
    start_first_wave(&mut world);

    assert_eq!(drain_messages::<WaveStarted>(&mut world), vec![WaveStarted { wave: 1 }]);
    assert_eq!(world.resource::<ScoreBoard>().wave(), 1);
    let director = world.resource::<WaveDirector>();
    assert!(director.wave_in_progress());
    assert!(matches!(director.active(), Some(WaveTarget::Formation(_))));

    // Members are in; the wave is live but not cleared.
    tick(&mut world, 0.2);
    tick(&mut world, 2.0);
    assert!(matches!(world.resource::<WaveDirector>().stage(), DirectorStage::InProgress { .. }));
    assert!(drain_messages::<WaveCompleted>(&mut world).is_empty());

    kill_all_actors(&mut world);
    tick(&mut world, 0.1);

    assert_eq!(drain_messages::<WaveCompleted>(&mut world), vec![WaveCompleted { wave: 1 }]);
    assert_eq!(drain_messages::<AllWavesCompleted>(&mut world).len(), 1);
    assert_eq!(drain_messages::<GameOver>(&mut world), vec![GameOver { victory: true }]);
    assert!(world.resource::<WaveDirector>().is_finished());
}

#[test]
fn advances_to_next_wave_after_delay() {
    let mut world = director_world(vec![
        row_wave(Some(EnemyProfile::default())),
        row_wave(Some(EnemyProfile::default())),
    ]);
    start_first_wave(&mut world);
    tick(&mut world, 0.2);
    kill_all_actors(&mut world);
    tick(&mut world, 2.0);

    assert_eq!(drain_messages::<WaveCompleted>(&mut world), vec![WaveCompleted { wave: 1 }]);
    assert_eq!(world.resource::<WaveDirector>().current_wave(), 1);
    drain_messages::<WaveStarted>(&mut world);

    let delay = world.resource::<WaveScript>().delay_between_waves;
    tick(&mut world, delay * 0.5);
    assert!(drain_messages::<WaveStarted>(&mut world).is_empty());

    tick(&mut world, delay * 0.5);
    assert_eq!(drain_messages::<WaveStarted>(&mut world), vec![WaveStarted { wave: 2 }]);
    assert!(drain_messages::<GameOver>(&mut world).is_empty());
}

#[test]
fn missing_profiles_do_not_stall() {
    let mut world = director_world(vec![row_wave(None), WaveSpec::Boss { boss: None }]);
    start_first_wave(&mut world);
    tick(&mut world, 0.2);
    tick(&mut world, 2.0);
    assert_eq!(drain_messages::<WaveCompleted>(&mut world), vec![WaveCompleted { wave: 1 }]);

    world.resource_mut::<WaveDirector>().skip_intermission();
    tick(&mut world, 0.0);
    tick(&mut world, 2.0);

    assert_eq!(drain_messages::<WaveCompleted>(&mut world), vec![WaveCompleted { wave: 2 }]);
    assert_eq!(drain_messages::<GameOver>(&mut world), vec![GameOver { victory: true }]);
}

#[test]
fn vanished_formation_does_not_stall() {
    let mut world = director_world(vec![row_wave(Some(EnemyProfile::default()))]);
    start_first_wave(&mut world);

    let Some(WaveTarget::Formation(fe)) = world.resource::<WaveDirector>().active() else {
        panic!("wave 1 has no formation")
    };
    world.despawn(fe);

    // Spawning settles without the formation, then the wave counts as cleared.
    tick(&mut world, 0.2);
    assert!(matches!(world.resource::<WaveDirector>().stage(), DirectorStage::InProgress { .. }));
    tick(&mut world, 2.0);

    assert_eq!(drain_messages::<WaveCompleted>(&mut world), vec![WaveCompleted { wave: 1 }]);
    assert!(world.resource::<WaveDirector>().is_finished());
}

#[test]
fn spawn_timeout_moves_on() {
    let mut world = director_world(vec![row_wave(Some(EnemyProfile::default()))]);
    world.write_message(PlayerReady);
    tick(&mut world, 0.0);
    let opening = world.resource::<WaveScript>().opening_delay;
    advance_time(&mut world, opening);
    run_system_once(&mut world, advance_director);

    // Members never get populated.
    let timeout = world.resource::<WaveScript>().spawn_timeout;
    advance_time(&mut world, timeout * 0.5);
    run_system_once(&mut world, poll_wave_clearance);
    assert!(matches!(world.resource::<WaveDirector>().stage(), DirectorStage::Spawning { .. }));

    advance_time(&mut world, timeout);
    run_system_once(&mut world, poll_wave_clearance);
    assert!(matches!(world.resource::<WaveDirector>().stage(), DirectorStage::InProgress { .. }));
}
