//! Tunable gameplay constants.
//!
//! Distances are world units (pixels); 64 units roughly correspond to one ship length.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    pub player_max_health: i32,
    /// Seconds between two player shots.
    pub player_fire_interval: f32,
    pub player_bullet_speed: f32,
    pub player_bullet_damage: i32,
    pub player_bullet_lifetime: f32,
    /// Distance the ship keeps from the playfield edges.
    pub player_edge_buffer: f32,
    pub player_entrance_speed: f32,
    pub projectile_pool_capacity: usize,
    /// Projectiles further than this outside the playfield are recycled.
    pub projectile_cull_margin: f32,
    /// Actors further than this below the playfield bottom are removed.
    pub actor_cull_margin: f32,
    pub death_effect_secs: f32,
    pub pickup_drop_chance: f32,
    pub pickup_fall_speed: f32,
    pub pickup_lifetime: f32,
    pub pickup_invulnerability_secs: f32,
    pub rng_seed: u64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 64.0,
            player_speed: 320.0,
            player_max_health: 100,
            player_fire_interval: 0.2,
            player_bullet_speed: 640.0,
            player_bullet_damage: 10,
            player_bullet_lifetime: 3.0,
            player_edge_buffer: 32.0,
            player_entrance_speed: 160.0,
            projectile_pool_capacity: 512,
            projectile_cull_margin: 64.0,
            actor_cull_margin: 128.0,
            death_effect_secs: 0.5,
            pickup_drop_chance: 0.05,
            pickup_fall_speed: 128.0,
            pickup_lifetime: 10.0,
            pickup_invulnerability_secs: 5.0,
            rng_seed: 0x5eed_cafe,
        }
    }
}
