//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: includes DefaultPlugins (window/render), physics and the wave script
//!   from disk, plus the game plugins.
//! - `configure_headless`: gameplay only, for integration tests. Collisions are injected
//!   as avian messages instead of being detected.
//!
//! Schedule layout shared by both:
//! ```text
//! FixedUpdate:     Timers -> Director -> Spawn -> Movement -> Phases -> Attacks -> Poll
//! FixedPostUpdate: [avian collision events] -> Collisions -> Damage -> Death -> Outcome -> Cleanup
//! PostUpdate:      despawn PendingDespawn
//! ```

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::{
    sets::{CombatSet, SimSet},
    state::GameState,
};
use crate::plugins;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Bevy Shmup".into(),
            resolution: WindowResolution::new(960, 800),
            ..default()
        }),
        ..default()
    }));

    configure_game(app);
    plugins::physics::plugin(app);
    plugins::register_render(app);
    app.add_systems(Startup, plugins::waves::load_script_from_disk);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (camera/backdrop) or physics.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();

    app.configure_sets(
        FixedUpdate,
        (
            SimSet::Timers,
            SimSet::Director,
            SimSet::Spawn,
            SimSet::Movement,
            SimSet::Phases,
            SimSet::Attacks,
            SimSet::Poll,
        )
            .chain(),
    )
    .configure_sets(
        FixedPostUpdate,
        (
            CombatSet::Collisions,
            CombatSet::Damage,
            CombatSet::Death,
            CombatSet::Outcome,
            CombatSet::Cleanup,
        )
            .chain()
            .after(CollisionEventSystems),
    );

    plugins::register_gameplay(app);
}
