//! Buffered spawn requests.
//!
//! Producers (attack strategies, the player's gun) only write intent; the allocator is the
//! single consumer that touches the pool.

use bevy::prelude::*;

use super::components::ProjectileProfile;
use crate::plugins::actors::components::Faction;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectile {
    pub owner: Faction,
    pub pos: Vec2,
    /// Zero means "the owner's forward".
    pub direction: Vec2,
    pub profile: ProjectileProfile,
    pub source: Option<Entity>,
}
