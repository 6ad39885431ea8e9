//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod actors;
pub mod attacks;
pub mod boss;
pub mod core;
pub mod formations;
pub mod physics;
pub mod pickups;
pub mod player;
pub mod projectiles;
pub mod waves;

// Render-only
pub mod camera;
pub mod world;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    actors::plugin(app);
    attacks::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    formations::plugin(app);
    boss::plugin(app);
    waves::plugin(app);
    player::plugin(app);
    pickups::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    world::plugin(app);
    camera::plugin(app);
}
