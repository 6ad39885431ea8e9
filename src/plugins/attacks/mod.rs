//! Attack plugin: every actor carries an `Arsenal` of strategies that fire on timers.
//!
//! Strategies are a closed set of patterns (`AttackPattern`) rather than separate
//! components, so "disable every attacker, then enable the ones for this phase" is a
//! plain loop over one `Vec`.

pub mod strategy;
pub mod systems;

use bevy::prelude::*;

use crate::common::{sets::SimSet, state::GameState};
use crate::plugins::actors::profile::EnemyProfile;
use strategy::AttackStrategy;

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Arsenal {
    pub strategies: Vec<AttackStrategy>,
}

impl Arsenal {
    pub fn new(strategies: Vec<AttackStrategy>) -> Self {
        Self { strategies }
    }

    pub fn from_profile(profile: &EnemyProfile) -> Self {
        let strategy = AttackStrategy::from_spec(
            profile.attack,
            profile.fire_rate,
            profile.projectile,
            profile.fire_points.clone(),
        );
        Self { strategies: strategy.into_iter().collect() }
    }

    pub fn disable_all(&mut self) {
        for s in &mut self.strategies {
            s.set_enabled(false);
        }
    }

    /// Enable the strategies that apply to `phase` and restart their cadence from `now`.
    /// Returns how many ended up enabled.
    pub fn enable_phase(&mut self, phase: u8, now: f32) -> usize {
        for s in self.strategies.iter_mut().filter(|s| s.applies_to_phase(phase)) {
            s.set_enabled(true);
            s.reset_cadence(now, phase);
        }
        self.enabled_count()
    }

    pub fn enable_immediate_shooting(&mut self, now: f32) {
        for s in &mut self.strategies {
            s.enable_immediate_shooting(now);
        }
    }

    pub fn enabled_count(&self) -> usize {
        self.strategies.iter().filter(|s| s.is_enabled()).count()
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        systems::fire_arsenals
            .in_set(SimSet::Attacks)
            .run_if(in_state(GameState::InGame)),
    );
}

#[cfg(test)]
mod tests;
