//! The wave director: runs the script one wave at a time.
//!
//! ```text
//! AwaitingPlayer --PlayerReady--> Opening --delay--> Spawning --all members in--> InProgress
//!        ^                                              |  (or spawn timeout)         |
//!        |                                              v                             | cleared
//!   OnEnter(InGame)                               Intermission <----------------------+
//!                                                       |            (last wave) --> Finished
//! ```

use bevy::prelude::*;

use super::script::{WaveScript, WaveSpec};
use crate::common::playfield::Playfield;
use crate::plugins::actors::components::{Actor, PendingDespawn};
use crate::plugins::boss::spawn_lone_boss;
use crate::plugins::core::score::{GameOver, ScoreBoard};
use crate::plugins::formations::{layout::ENTRY_HEIGHT, spawn_formation, Formation};
use crate::plugins::player::PlayerReady;

/// What the director waits on for the current wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveTarget {
    Formation(Entity),
    Boss(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DirectorStage {
    #[default]
    AwaitingPlayer,
    Opening { remaining: f32 },
    Spawning { elapsed: f32 },
    InProgress { elapsed: f32 },
    Intermission { remaining: f32 },
    Finished,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct WaveDirector {
    current_wave: usize,
    wave_in_progress: bool,
    active: Option<WaveTarget>,
    stage: DirectorStage,
}

impl WaveDirector {
    /// Zero-based index of the current (or next) wave.
    #[inline]
    pub fn current_wave(&self) -> usize {
        self.current_wave
    }

    #[inline]
    pub fn wave_in_progress(&self) -> bool {
        self.wave_in_progress
    }

    #[inline]
    pub fn active(&self) -> Option<WaveTarget> {
        self.active
    }

    #[inline]
    pub fn stage(&self) -> DirectorStage {
        self.stage
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.stage == DirectorStage::Finished
    }

    /// Start the next wave on the following tick.
    pub fn skip_intermission(&mut self) {
        if let DirectorStage::Intermission { remaining } = &mut self.stage {
            *remaining = 0.0;
        }
    }
}

/// One-based number of a started wave.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveStarted {
    pub wave: usize,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveCompleted {
    pub wave: usize,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllWavesCompleted;

pub fn reset_director(mut director: ResMut<WaveDirector>) {
    *director = WaveDirector::default();
}

pub fn await_player_ready(
    mut ready: MessageReader<PlayerReady>,
    script: Res<WaveScript>,
    mut director: ResMut<WaveDirector>,
) {
    if ready.read().count() == 0 || director.stage != DirectorStage::AwaitingPlayer {
        return;
    }
    info!("player ready, first wave in {:.1}s", script.opening_delay);
    director.stage = DirectorStage::Opening { remaining: script.opening_delay };
}

/// Count down the opening and intermission delays and start waves when they run out.
#[allow(clippy::too_many_arguments)]
pub fn advance_director(
    mut commands: Commands,
    time: Res<Time>,
    script: Res<WaveScript>,
    playfield: Res<Playfield>,
    mut director: ResMut<WaveDirector>,
    mut score: ResMut<ScoreBoard>,
    mut started: MessageWriter<WaveStarted>,
    mut all_done: MessageWriter<AllWavesCompleted>,
    mut game_over: MessageWriter<GameOver>,
) {
    let dt = time.delta_secs();

    match &mut director.stage {
        DirectorStage::Opening { remaining } | DirectorStage::Intermission { remaining } => {
            *remaining -= dt;
            if *remaining > 0.0 {
                return;
            }
        }
        _ => return,
    }

    let index = director.current_wave;
    let Some(wave) = script.get(index) else {
        finish(&mut director, &mut all_done, &mut game_over);
        return;
    };

    let (active, stage) = match wave {
        WaveSpec::Formation(spec) => (
            Some(WaveTarget::Formation(spawn_formation(&mut commands, spec, &playfield))),
            DirectorStage::Spawning { elapsed: 0.0 },
        ),
        WaveSpec::Boss { boss: Some(profile) } => {
            let spawn_at = Vec2::new(profile.entry_target.x, playfield.top() + ENTRY_HEIGHT);
            (
                Some(WaveTarget::Boss(spawn_lone_boss(&mut commands, profile, spawn_at))),
                DirectorStage::InProgress { elapsed: 0.0 },
            )
        }
        WaveSpec::Boss { boss: None } => {
            error!("wave {}: no boss profile, nothing spawned", index + 1);
            (None, DirectorStage::InProgress { elapsed: 0.0 })
        }
    };

    director.active = active;
    director.stage = stage;
    director.wave_in_progress = true;
    score.set_wave((index + 1) as u32);

    info!("wave {} of {} started", index + 1, script.len());
    started.write(WaveStarted { wave: index + 1 });
}

/// Wait for the wave's spawns to land, then poll for clearance.
#[allow(clippy::too_many_arguments)]
pub fn poll_wave_clearance(
    mut commands: Commands,
    time: Res<Time>,
    script: Res<WaveScript>,
    mut director: ResMut<WaveDirector>,
    mut formations: Query<&mut Formation>,
    live: Query<(), (With<Actor>, Without<PendingDespawn>)>,
    mut completed: MessageWriter<WaveCompleted>,
    mut all_done: MessageWriter<AllWavesCompleted>,
    mut game_over: MessageWriter<GameOver>,
) {
    let dt = time.delta_secs();
    let is_live = |e: Entity| live.contains(e);
    let active = director.active;

    match &mut director.stage {
        DirectorStage::Spawning { elapsed } => {
            *elapsed += dt;
            let spawned = match active {
                Some(WaveTarget::Formation(fe)) => formations.get(fe).ok().is_none_or(|f| {
                    f.is_populated() && f.entities().filter(|&e| is_live(e)).count() >= f.expected()
                }),
                _ => true,
            };

            if spawned && *elapsed >= script.settle_delay {
                director.stage = DirectorStage::InProgress { elapsed: 0.0 };
            } else if *elapsed >= script.spawn_timeout {
                warn!(
                    "wave {}: spawning not finished after {:.1}s, continuing with what arrived",
                    director.current_wave + 1,
                    script.spawn_timeout
                );
                director.stage = DirectorStage::InProgress { elapsed: 0.0 };
            }
            return;
        }
        DirectorStage::InProgress { elapsed } => {
            *elapsed += dt;
            if *elapsed < script.poll_grace {
                return;
            }
        }
        _ => return,
    }

    let cleared = match active {
        Some(WaveTarget::Formation(fe)) => {
            formations.get_mut(fe).ok().is_none_or(|mut f| f.is_cleared(is_live))
        }
        Some(WaveTarget::Boss(be)) => !is_live(be),
        None => true,
    };
    if !cleared {
        return;
    }

    let wave = director.current_wave + 1;
    info!("wave {wave} cleared");
    completed.write(WaveCompleted { wave });

    if let Some(WaveTarget::Formation(fe)) = active {
        commands.entity(fe).try_despawn();
    }
    director.active = None;
    director.wave_in_progress = false;

    if wave < script.len() {
        director.current_wave = wave;
        director.stage = DirectorStage::Intermission { remaining: script.delay_between_waves };
    } else {
        finish(&mut director, &mut all_done, &mut game_over);
    }
}

fn finish(
    director: &mut WaveDirector,
    all_done: &mut MessageWriter<AllWavesCompleted>,
    game_over: &mut MessageWriter<GameOver>,
) {
    info!("all waves completed");
    director.stage = DirectorStage::Finished;
    director.wave_in_progress = false;
    all_done.write(AllWavesCompleted);
    game_over.write(GameOver { victory: true });
}
