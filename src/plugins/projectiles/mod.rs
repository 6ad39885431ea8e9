//! Projectiles plugin: **message-based producer → consumer** spawning + pooling.
//!
//! # Data flow
//! ```text
//! FixedUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Movement: advance_projectiles                                         │
//!│      - translates Active projectiles, counts down lifetime                 │
//!│      - expired / out of bounds -> PendingReturn                            │
//!│                                                                            │
//!│  (B) Producers: attack strategies, the player's gun                        │
//!│      - write SpawnProjectile messages                                      │
//!│                                                                            │
//!│  (C) Consumer: allocate_projectiles                                        │
//!│      - pops ProjectilePool.free, writes Projectile/Transform/layers        │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//! FixedPostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (D) Physics emits CollisionStart messages (avian)                         │
//!│  (E) resolve_projectile_hits -> DamageRequest, PendingReturn               │
//!│  (F) return_to_pool_commit -> ProjectilePool.free                          │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Destroying" a projectile always means returning it to the pool.
//! The allocator is the only system that pops from the pool; the commit is the only one
//! that pushes back.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod messages;
pub mod motion;
pub mod pool;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::{
    sets::{CombatSet, SimSet},
    state::GameState,
    tunables::Tunables,
};

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let capacity = app
            .world()
            .get_resource::<Tunables>()
            .map_or(Tunables::default().projectile_pool_capacity, |t| {
                t.projectile_pool_capacity
            });

        app.insert_resource(pool::ProjectilePool::new(capacity))
            .add_systems(Startup, pool::init_projectile_pool);

        app.add_message::<messages::SpawnProjectile>();
        // Headless builds run without the physics plugin; hits are injected by tests.
        app.add_message::<CollisionStart>();

        app.add_systems(
            FixedUpdate,
            (
                motion::advance_projectiles.in_set(SimSet::Movement),
                allocator::allocate_projectiles.after(SimSet::Attacks),
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                collision::resolve_projectile_hits.in_set(CombatSet::Collisions),
                commit::return_to_pool_commit.in_set(CombatSet::Cleanup),
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(OnExit(GameState::InGame), commit::recall_all_projectiles);
    }
}
