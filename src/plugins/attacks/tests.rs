use bevy::prelude::*;

use super::strategy::{
    fan_directions, AttackConfigError, AttackPattern, AttackSpec, AttackStrategy, PhaseTable,
};
use super::systems::fire_arsenals;
use super::Arsenal;
use crate::common::playfield::Playfield;
use crate::common::test_utils::{drain_messages, ensure_messages, insert_time, run_system_once};
use crate::plugins::actors::components::{Actor, ActorKind, Dormant, Faction};
use crate::plugins::core::cues::{PlaySound, SoundCue};
use crate::plugins::projectiles::components::ProjectileProfile;
use crate::plugins::projectiles::messages::SpawnProjectile;

fn muzzle() -> Vec<Vec2> {
    vec![Vec2::new(0.0, -20.0)]
}

fn bullets() -> Option<ProjectileProfile> {
    Some(ProjectileProfile::default())
}

fn signed_degrees(forward: Vec2, dir: Vec2) -> f32 {
    forward.perp_dot(dir).atan2(forward.dot(dir)).to_degrees()
}

#[test]
fn spread_fan_is_symmetric() {
    let angles: Vec<f32> = fan_directions(Vec2::NEG_Y, 5, 40.0)
        .into_iter()
        .map(|d| signed_degrees(Vec2::NEG_Y, d))
        .collect();

    for (got, want) in angles.iter().zip([-20.0, -10.0, 0.0, 10.0, 20.0]) {
        assert!((got - want).abs() < 1e-3, "{angles:?}");
    }
}

#[test]
fn single_projectile_spread_goes_forward() {
    assert_eq!(fan_directions(Vec2::NEG_Y, 1, 40.0), vec![Vec2::NEG_Y]);
    assert!(fan_directions(Vec2::NEG_Y, 0, 40.0).is_empty());
}

#[test]
fn single_waits_out_its_cooldown() {
    let mut s = AttackStrategy::new(AttackPattern::Single, 1.0, bullets(), muzzle());

    let first = s.tick(0.0, 0).unwrap();
    assert_eq!(first.shots.len(), 1);
    assert!(first.announce);
    assert_eq!(first.shots[0].direction, Vec2::NEG_Y);

    assert!(s.tick(0.5, 0).unwrap().shots.is_empty());
    assert_eq!(s.tick(1.0, 0).unwrap().shots.len(), 1);
}

#[test]
fn burst_spaces_shots_and_announces_once() {
    let spec = AttackSpec::Burst { count: 3, delay: 0.2, cooldown: 2.0 };
    let mut s = AttackStrategy::from_spec(spec, 1.0, bullets(), muzzle()).unwrap();

    let start = s.tick(0.0, 0).unwrap();
    assert_eq!(start.shots.len(), 1);
    assert!(start.announce);

    for t in [0.2, 0.4] {
        let follow_up = s.tick(t, 0).unwrap();
        assert_eq!(follow_up.shots.len(), 1, "at {t}");
        assert!(!follow_up.announce);
    }

    assert!(s.tick(1.0, 0).unwrap().shots.is_empty());
    let next = s.tick(2.0, 0).unwrap();
    assert_eq!(next.shots.len(), 1);
    assert!(next.announce);
}

#[test]
fn spread_strategy_fires_whole_fan() {
    let spec = AttackSpec::Spread { count: 5, angle_deg: 40.0 };
    let mut s = AttackStrategy::from_spec(spec, 2.0, bullets(), muzzle()).unwrap();
    let salvo = s.tick(0.0, 0).unwrap();
    assert_eq!(salvo.shots.len(), 5);
    assert!(salvo.announce);
    assert_eq!(s.next_fire_at(), 0.5);
}

#[test]
fn missing_projectile_disables_once() {
    let mut s = AttackStrategy::new(AttackPattern::Single, 1.0, None, muzzle());

    assert_eq!(s.tick(0.0, 0), Err(AttackConfigError::MissingProjectile));
    assert!(s.is_faulted());
    assert!(!s.is_enabled());

    // Stays quiet afterwards, and cannot be switched back on.
    assert_eq!(s.tick(1.0, 0), Ok(Default::default()));
    s.set_enabled(true);
    assert!(!s.is_enabled());
}

#[test]
fn missing_fire_point_is_reported() {
    let mut s = AttackStrategy::new(AttackPattern::Single, 1.0, bullets(), Vec::new());
    assert_eq!(s.tick(0.0, 0), Err(AttackConfigError::MissingFirePoint));
}

#[test]
fn phase_based_follows_boss_phase() {
    let points = vec![Vec2::new(0.0, -32.0), Vec2::new(-51.0, -19.0), Vec2::new(51.0, -19.0)];
    let table = PhaseTable::default();

    let mut p1 = AttackStrategy::new(AttackPattern::PhaseBased(table), 0.0, None, points.clone());
    let salvo = p1.tick(0.0, 1).unwrap();
    assert_eq!(salvo.shots.len(), 1);
    assert_eq!(salvo.shots[0].offset, points[0]);
    assert_eq!(salvo.shots[0].projectile, table.phase1.projectile);

    let mut p2 = AttackStrategy::new(AttackPattern::PhaseBased(table), 0.0, None, points.clone());
    let salvo = p2.tick(0.0, 2).unwrap();
    assert_eq!(salvo.shots.len(), points.len());
    let follow_up = p2.tick(table.phase2.burst_delay, 2).unwrap();
    assert_eq!(follow_up.shots.len(), points.len());

    let mut p3 = AttackStrategy::new(AttackPattern::PhaseBased(table), 0.0, None, points.clone());
    let salvo = p3.tick(0.0, 3).unwrap();
    assert_eq!(salvo.shots.len(), table.phase3.spread_count as usize);
    assert!(salvo.shots.iter().all(|s| s.offset == points[0]));

    // Entry phase has no attack.
    let mut p0 = AttackStrategy::new(AttackPattern::PhaseBased(table), 0.0, None, points);
    assert!(p0.tick(0.0, 0).unwrap().shots.is_empty());
}

#[test]
fn immediate_shooting_skips_the_wait() {
    let mut s = AttackStrategy::new(AttackPattern::Single, 1.0, bullets(), muzzle());
    s.reset_cadence(10.0, 0);
    assert!(s.tick(3.0, 0).unwrap().shots.is_empty());

    s.enable_immediate_shooting(3.0);
    assert_eq!(s.tick(3.0, 0).unwrap().shots.len(), 1);
}

#[test]
fn arsenal_enables_only_phase_strategies() {
    let projectile = bullets();
    let mut arsenal = Arsenal::new(vec![
        AttackStrategy::new(AttackPattern::PhaseBased(PhaseTable::default()), 0.0, None, muzzle())
            .disabled(),
        AttackStrategy::new(AttackPattern::Single, 1.0, projectile, muzzle())
            .for_phase(2)
            .disabled(),
    ]);
    assert_eq!(arsenal.enabled_count(), 0);

    assert_eq!(arsenal.enable_phase(1, 0.0), 1);
    arsenal.disable_all();
    assert_eq!(arsenal.enabled_count(), 0);
    assert_eq!(arsenal.enable_phase(2, 0.0), 2);
}

fn shooter(world: &mut World, at: Vec2) -> Entity {
    let strategy = AttackStrategy::new(AttackPattern::Single, 1.0, bullets(), muzzle());
    world
        .spawn((
            Actor { kind: ActorKind::Basic },
            Arsenal::new(vec![strategy]),
            Transform::from_translation(at.extend(1.0)),
        ))
        .id()
}

fn attack_world() -> World {
    let mut world = World::new();
    insert_time(&mut world, 0.0);
    world.insert_resource(Playfield::default());
    ensure_messages::<SpawnProjectile>(&mut world);
    ensure_messages::<PlaySound>(&mut world);
    world
}

#[test]
fn released_actors_fire_from_their_muzzle() {
    let mut world = attack_world();
    let e = shooter(&mut world, Vec2::new(100.0, 100.0));

    run_system_once(&mut world, fire_arsenals);

    let shots = drain_messages::<SpawnProjectile>(&mut world);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].owner, Faction::Enemy);
    assert_eq!(shots[0].pos, Vec2::new(100.0, 80.0));
    assert_eq!(shots[0].source, Some(e));
    assert_eq!(drain_messages::<PlaySound>(&mut world), vec![PlaySound(SoundCue::EnemyShoot)]);
}

#[test]
fn dormant_or_offscreen_actors_hold_fire() {
    let mut world = attack_world();
    let dormant = shooter(&mut world, Vec2::ZERO);
    world.entity_mut(dormant).insert(Dormant);
    shooter(&mut world, Vec2::new(0.0, 1000.0));

    run_system_once(&mut world, fire_arsenals);
    assert!(drain_messages::<SpawnProjectile>(&mut world).is_empty());
}
