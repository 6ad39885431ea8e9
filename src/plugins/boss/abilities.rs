//! Shield and teleport: health-gated abilities with their own duration/cooldown clocks.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldSpec {
    pub duration: f32,
    pub cooldown: f32,
    pub trigger_ratio: f32,
}

impl Default for ShieldSpec {
    fn default() -> Self {
        Self { duration: 5.0, cooldown: 15.0, trigger_ratio: 0.3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportSpec {
    pub cooldown: f32,
    pub range: f32,
    pub trigger_ratio: f32,
    /// Rejection-sampling budget per attempt.
    pub max_attempts: u32,
}

impl Default for TeleportSpec {
    fn default() -> Self {
        Self { cooldown: 10.0, range: 192.0, trigger_ratio: 0.2, max_attempts: 32 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityState {
    Ready,
    Active { remaining: f32 },
    Cooldown { remaining: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldChange {
    Dropped,
    Recharged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shield {
    pub spec: ShieldSpec,
    state: AbilityState,
}

impl Shield {
    pub fn new(spec: ShieldSpec) -> Self {
        Self { spec, state: AbilityState::Ready }
    }

    #[inline]
    pub fn state(&self) -> AbilityState {
        self.state
    }

    #[inline]
    pub fn is_up(&self) -> bool {
        matches!(self.state, AbilityState::Active { .. })
    }

    pub fn tick(&mut self, dt: f32) -> Option<ShieldChange> {
        let remaining = match &mut self.state {
            AbilityState::Ready => return None,
            AbilityState::Active { remaining } | AbilityState::Cooldown { remaining } => {
                *remaining -= dt;
                *remaining
            }
        };
        if remaining > 0.0 {
            return None;
        }

        if self.is_up() {
            self.state = AbilityState::Cooldown { remaining: self.spec.cooldown };
            Some(ShieldChange::Dropped)
        } else {
            self.state = AbilityState::Ready;
            Some(ShieldChange::Recharged)
        }
    }

    /// Raise the shield if it is available and health is low enough.
    pub fn try_raise(&mut self, health_ratio: f32) -> bool {
        if self.state != AbilityState::Ready || health_ratio > self.spec.trigger_ratio {
            return false;
        }
        self.state = AbilityState::Active { remaining: self.spec.duration };
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Teleport {
    pub spec: TeleportSpec,
    state: AbilityState,
}

impl Teleport {
    pub fn new(spec: TeleportSpec) -> Self {
        Self { spec, state: AbilityState::Ready }
    }

    #[inline]
    pub fn state(&self) -> AbilityState {
        self.state
    }

    pub fn tick(&mut self, dt: f32) {
        if let AbilityState::Cooldown { remaining } = &mut self.state {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.state = AbilityState::Ready;
            }
        }
    }

    #[inline]
    pub fn is_ready_for(&self, health_ratio: f32) -> bool {
        self.state == AbilityState::Ready && health_ratio <= self.spec.trigger_ratio
    }

    pub fn start_cooldown(&mut self) {
        self.state = AbilityState::Cooldown { remaining: self.spec.cooldown };
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct BossAbilities {
    pub shield: Option<Shield>,
    pub teleport: Option<Teleport>,
}

impl BossAbilities {
    #[inline]
    pub fn should_block_damage(&self) -> bool {
        self.shield.as_ref().is_some_and(Shield::is_up)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    Shield,
    Teleport,
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct BossAbilityUsed {
    pub boss: Entity,
    pub ability: Ability,
}

/// Random point within `range` of `from` (per axis), inside `bounds` and at least
/// `range / 2` away from `from`. `None` when the sampling budget runs out.
pub fn pick_teleport_destination<R: Rng + ?Sized>(
    rng: &mut R,
    from: Vec2,
    range: f32,
    bounds: Rect,
    max_attempts: u32,
) -> Option<Vec2> {
    if range <= 0.0 {
        return None;
    }
    let min_distance = range * 0.5;

    (0..max_attempts).find_map(|_| {
        let offset = Vec2::new(
            rng.random_range(-range..=range),
            rng.random_range(-range..=range),
        );
        let candidate = from + offset;
        (bounds.contains(candidate) && candidate.distance(from) >= min_distance)
            .then_some(candidate)
    })
}
