//! Schedule ordering for one simulation tick.
//!
//! ```text
//! FixedUpdate:      Timers -> Director -> Spawn -> Movement -> Phases -> Attacks -> Poll
//! FixedPostUpdate:  (avian collision events)
//!                   -> Collisions -> Damage -> Death -> Outcome -> Cleanup
//! PostUpdate:       structural despawns (PendingDespawn)
//! ```
//!
//! Formation movement always finishes before the wave director polls for clearance,
//! and spawns queued by the director are applied before the members are positioned.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Timers,
    Director,
    Spawn,
    Movement,
    Phases,
    Attacks,
    Poll,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Collisions,
    Damage,
    Death,
    Outcome,
    Cleanup,
}
