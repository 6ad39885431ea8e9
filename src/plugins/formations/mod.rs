//! Formations: groups of enemies that fly in together, then hold, drift, zig-zag or orbit.
//!
//! A formation is its own entity holding the anchor and member offsets. Members are ordinary
//! actors spawned `Dormant`; they are released (and start shooting) when the anchor reaches
//! its target. The wave director only asks a formation one question: is it cleared?

pub mod components;
pub mod layout;
pub mod spawn;
pub mod systems;

use bevy::prelude::*;

use crate::common::{sets::SimSet, state::GameState};

pub use components::Formation;
pub use layout::{FormationKind, FormationSpec, LayoutSpec};
pub use spawn::spawn_formation;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        spawn::populate_formations
            .in_set(SimSet::Spawn)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedUpdate,
        systems::advance_formations
            .in_set(SimSet::Movement)
            .run_if(in_state(GameState::InGame)),
    );
}

#[cfg(test)]
mod tests;
