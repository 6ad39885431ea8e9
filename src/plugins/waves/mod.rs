//! Waves plugin: the director that walks the wave script and reports progress.
//!
//! The director starts on `PlayerReady`, spawns one formation (or lone boss) per wave,
//! waits for it to be cleared and, after the last wave, ends the match with a victory.

pub mod director;
pub mod loader;
pub mod script;

use bevy::prelude::*;

use crate::common::{sets::SimSet, state::GameState};
use director::{AllWavesCompleted, WaveCompleted, WaveDirector, WaveStarted};
use script::WaveScript;

pub fn plugin(app: &mut App) {
    app.init_resource::<WaveScript>()
        .init_resource::<WaveDirector>()
        .add_message::<WaveStarted>()
        .add_message::<WaveCompleted>()
        .add_message::<AllWavesCompleted>();

    app.add_systems(OnEnter(GameState::InGame), director::reset_director);

    app.add_systems(
        FixedUpdate,
        (director::await_player_ready, director::advance_director)
            .chain()
            .in_set(SimSet::Director)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedUpdate,
        director::poll_wave_clearance
            .in_set(SimSet::Poll)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Replace the built-in script with `assets/data/waves.ron` when it loads cleanly.
pub fn load_script_from_disk(mut script: ResMut<WaveScript>) {
    match loader::load_wave_script(loader::WAVE_SCRIPT_PATH) {
        Ok(loaded) => {
            info!("loaded {} waves from {}", loaded.len(), loader::WAVE_SCRIPT_PATH);
            *script = loaded;
        }
        Err(err) => warn!("{err}; using the built-in wave script"),
    }
}

#[cfg(test)]
mod tests;
