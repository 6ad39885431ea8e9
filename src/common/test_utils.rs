//! Test helpers.
//!
//! `World::run_system_once` executes a system without building a schedule. Systems that use
//! `Commands` only enqueue structural changes, so we flush before returning to make them
//! visible to assertions.

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Insert a `Time` resource that has already advanced by `secs` (elapsed == delta == secs).
pub fn insert_time(world: &mut World, secs: f32) {
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(secs));
    world.insert_resource(time);
}

/// Advance the world's `Time` by `secs`; the next system sees `delta_secs() == secs`.
pub fn advance_time(world: &mut World, secs: f32) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(secs));
}

/// Make sure the message buffer for `M` exists so readers/writers can run.
pub fn ensure_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Drain every buffered `M` (both halves of the double buffer).
pub fn drain_messages<M: Message>(world: &mut World) -> Vec<M> {
    world
        .get_resource_mut::<Messages<M>>()
        .map(|mut msgs| msgs.drain().collect())
        .unwrap_or_default()
}
