//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime, `StatesPlugin` the state machine.
//! - time advances by one fixed step per `update`, so `FixedUpdate` runs once per frame.
//! - we then call `bevy_shmup::game::configure_headless` to install gameplay plugins.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy_shmup::common::tunables::Tunables;
use bevy_shmup::plugins::waves::script::WaveScript;

pub const STEP: f64 = 1.0 / 64.0;

pub fn app_headless() -> App {
    app_with_script(WaveScript::default())
}

/// Headless app running `script` instead of the built-in waves.
pub fn app_with_script(script: WaveScript) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(Time::<Fixed>::from_seconds(STEP));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(STEP)));

    // Plugins keep pre-inserted resources.
    app.insert_resource(Tunables { projectile_pool_capacity: 32, ..default() });
    app.insert_resource(script);

    bevy_shmup::game::configure_headless(&mut app);
    app
}

/// Run `secs` worth of fixed steps.
pub fn run_for(app: &mut App, secs: f64) {
    let frames = (secs / STEP).ceil() as usize;
    for _ in 0..frames {
        app.update();
    }
}
