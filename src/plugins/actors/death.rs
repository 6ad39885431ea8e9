//! Death resolution, leftovers and structural cleanup.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::{
    Actor, ActorKind, ActorStats, DeathEffect, Dormant, Health, Invulnerable, LifeState,
    PendingDespawn,
};
use crate::common::{playfield::Playfield, state::GameState, tunables::Tunables};
use crate::plugins::core::{
    cues::{PlaySound, SoundCue},
    score::ScoreBoard,
};

/// Emitted exactly once per actor that died in combat (not for culled actors).
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ActorDied {
    pub entity: Entity,
    pub kind: ActorKind,
    pub position: Vec2,
    pub score_value: u32,
}

/// Alive -> Dead for every depleted actor: award score, leave an effect, mark for removal.
pub fn resolve_actor_deaths(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut score: ResMut<ScoreBoard>,
    mut q: Query<
        (Entity, &Actor, &ActorStats, &Health, &mut LifeState, &Transform),
        Without<PendingDespawn>,
    >,
    mut sounds: MessageWriter<PlaySound>,
    mut died: MessageWriter<ActorDied>,
) {
    for (e, actor, stats, health, mut life, tf) in &mut q {
        if !health.is_depleted() || !life.mark_dead() {
            continue;
        }

        let position = tf.translation.truncate();
        score.add_score(stats.score_value);

        let cue = match actor.kind {
            ActorKind::Basic => SoundCue::EnemyExplosion,
            ActorKind::Boss => SoundCue::BossExplosion,
        };
        sounds.write(PlaySound(cue));

        spawn_death_effect(&mut commands, position, tunables.death_effect_secs);
        commands.entity(e).try_insert(PendingDespawn);

        died.write(ActorDied {
            entity: e,
            kind: actor.kind,
            position,
            score_value: stats.score_value,
        });
    }
}

pub fn spawn_death_effect(commands: &mut Commands, position: Vec2, secs: f32) -> Entity {
    commands
        .spawn((
            Name::new("DeathEffect"),
            DeathEffect { timer: Timer::from_seconds(secs, TimerMode::Once) },
            Sprite {
                color: Color::srgb(1.0, 0.7, 0.2),
                custom_size: Some(Vec2::splat(40.0)),
                ..default()
            },
            Transform::from_translation(position.extend(3.0)),
            DespawnOnExit(GameState::InGame),
        ))
        .id()
}

pub fn tick_death_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut DeathEffect, Option<&mut Sprite>), Without<PendingDespawn>>,
) {
    for (e, mut fx, sprite) in &mut q {
        fx.timer.tick(time.delta());

        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(1.0 - fx.timer.fraction());
        }
        if fx.timer.is_finished() {
            commands.entity(e).try_insert(PendingDespawn);
        }
    }
}

pub fn tick_invulnerability(time: Res<Time>, mut q: Query<&mut Invulnerable>) {
    for mut inv in &mut q {
        inv.timer.tick(time.delta());
    }
}

/// Actors that slipped far below the playfield leave without awarding score.
pub fn cull_escaped_actors(
    mut commands: Commands,
    playfield: Res<Playfield>,
    tunables: Res<Tunables>,
    q: Query<(Entity, &Transform), (With<Actor>, Without<Dormant>, Without<PendingDespawn>)>,
) {
    let floor = playfield.bottom() - tunables.actor_cull_margin;

    for (e, tf) in &q {
        if tf.translation.y < floor {
            debug!("{e}: left the playfield, culled");
            commands.entity(e).try_insert(PendingDespawn);
        }
    }
}

/// Structural cleanup after the fixed step.
pub fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).try_despawn();
    }
}
