//! Core plugin: shared resources, match bookkeeping and global settings.
//!
//! The services gameplay talks to (score, audio cues, scene outcome, randomness) are plain
//! resources and messages registered here, so every other plugin and every test can
//! construct them explicitly.

pub mod cues;
pub mod score;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::{
    playfield::Playfield,
    sets::{CombatSet, SimSet},
    state::GameState,
    tunables::Tunables,
};
use cues::{PlaySound, SoundCue};
use score::{FinalStats, GameOver, MatchClock, MatchOutcome, ScoreBoard};

/// Deterministic RNG shared by gameplay (teleports, drops).
#[derive(Resource, Debug, Clone)]
pub struct CombatRng(pub ChaCha8Rng);

impl CombatRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

pub fn plugin(app: &mut App) {
    // `init_resource` keeps values a test (or the binary) inserted beforehand.
    app.init_resource::<Tunables>();
    app.init_resource::<Playfield>();

    let seed = app.world().resource::<Tunables>().rng_seed;
    app.insert_resource(CombatRng::seeded(seed));
    app.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)));

    app.init_resource::<ScoreBoard>()
        .init_resource::<MatchClock>()
        .init_resource::<MatchOutcome>();

    app.add_message::<PlaySound>().add_message::<GameOver>();

    app.add_systems(OnEnter(GameState::InGame), reset_match)
        .add_systems(
            FixedUpdate,
            tick_match_clock
                .in_set(SimSet::Timers)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            resolve_game_over
                .in_set(CombatSet::Outcome)
                .run_if(in_state(GameState::InGame)),
        );
}

fn reset_match(
    tunables: Res<Tunables>,
    mut score: ResMut<ScoreBoard>,
    mut clock: ResMut<MatchClock>,
    mut outcome: ResMut<MatchOutcome>,
    mut rng: ResMut<CombatRng>,
) {
    score.reset();
    *clock = MatchClock::default();
    *outcome = MatchOutcome::default();
    *rng = CombatRng::seeded(tunables.rng_seed);
}

fn tick_match_clock(time: Res<Time>, mut clock: ResMut<MatchClock>) {
    clock.elapsed += time.delta_secs();
}

/// First `GameOver` wins; later ones in the same match are ignored.
fn resolve_game_over(
    mut requests: MessageReader<GameOver>,
    mut outcome: ResMut<MatchOutcome>,
    score: Res<ScoreBoard>,
    clock: Res<MatchClock>,
    mut next: ResMut<NextState<GameState>>,
    mut sounds: MessageWriter<PlaySound>,
) {
    for req in requests.read() {
        if outcome.is_decided() {
            continue;
        }

        let stats = FinalStats {
            victory: req.victory,
            score: score.score(),
            wave: score.wave(),
            survival_secs: clock.elapsed,
        };
        info!(
            "match over: victory={} score={} wave={} survived={:.1}s",
            stats.victory, stats.score, stats.wave, stats.survival_secs
        );

        outcome.0 = Some(stats);
        if req.victory {
            sounds.write(PlaySound(SoundCue::PowerUp));
        }
        next.set(GameState::GameOver);
    }
}

#[cfg(test)]
mod tests;
