use bevy::prelude::*;

use crate::common::playfield::Playfield;
use crate::common::test_utils::{drain_messages, ensure_messages, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::core::{
    self,
    cues::{PlaySound, SoundCue},
    score::{GameOver, MatchClock, MatchOutcome, ScoreBoard},
};

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<Playfield>().is_some());
    assert!(app.world().get_resource::<ScoreBoard>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
    assert!(app.world().get_resource::<core::CombatRng>().is_some());
}

#[test]
fn keeps_pre_seeded_tunables() {
    let mut app = App::new();
    app.insert_resource(Tunables { player_speed: 1.0, ..default() });
    core::plugin(&mut app);
    assert_eq!(app.world().resource::<Tunables>().player_speed, 1.0);
}

#[test]
fn scoreboard_accumulates_and_resets() {
    let mut board = ScoreBoard::default();
    board.add_score(10);
    board.add_score(1000);
    board.set_wave(3);
    assert_eq!(board.score(), 1010);
    assert_eq!(board.wave(), 3);

    board.reset();
    assert_eq!(board.score(), 0);
    assert_eq!(board.wave(), 0);
}

fn outcome_world() -> World {
    let mut world = World::new();
    world.init_resource::<MatchOutcome>();
    world.init_resource::<MatchClock>();
    world.init_resource::<NextState<crate::common::state::GameState>>();
    let mut board = ScoreBoard::default();
    board.add_score(120);
    board.set_wave(2);
    world.insert_resource(board);
    ensure_messages::<GameOver>(&mut world);
    ensure_messages::<PlaySound>(&mut world);
    world
}

#[test]
fn game_over_is_resolved_once() {
    let mut world = outcome_world();
    world.resource_mut::<MatchClock>().elapsed = 42.0;

    world.write_message(GameOver { victory: false });
    world.write_message(GameOver { victory: true });
    run_system_once(&mut world, super::resolve_game_over);

    let stats = world.resource::<MatchOutcome>().0.expect("outcome recorded");
    assert!(!stats.victory);
    assert_eq!(stats.score, 120);
    assert_eq!(stats.wave, 2);
    assert_eq!(stats.survival_secs, 42.0);

    // A defeat does not cue the victory jingle.
    assert!(drain_messages::<PlaySound>(&mut world).is_empty());

    // Later requests are ignored as well.
    world.write_message(GameOver { victory: true });
    run_system_once(&mut world, super::resolve_game_over);
    assert!(!world.resource::<MatchOutcome>().0.unwrap().victory);
}

#[test]
fn victory_plays_power_up_cue() {
    let mut world = outcome_world();
    world.write_message(GameOver { victory: true });
    run_system_once(&mut world, super::resolve_game_over);

    let cues = drain_messages::<PlaySound>(&mut world);
    assert_eq!(cues, vec![PlaySound(SoundCue::PowerUp)]);
}
