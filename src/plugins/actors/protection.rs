//! Spawn protection: a countdown during which damage is fully absorbed.
//!
//! The countdown starts at spawn and keeps running while the actor is still entering with
//! its formation. A failsafe countdown of `duration + FAILSAFE_SLACK` backs it up and
//! force-clears the protection if the primary one ever fails to end it.
//! Both live inside the component, which is dropped together with its actor.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct SpawnProtection {
    active: bool,
    remaining: f32,
    failsafe: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionTick {
    Inactive,
    Holding,
    Expired,
    ForcedExpiry,
}

impl SpawnProtection {
    pub const FAILSAFE_SLACK: f32 = 1.0;

    pub fn new(duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            active: duration > 0.0,
            remaining: duration,
            failsafe: duration + Self::FAILSAFE_SLACK,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.remaining = 0.0;
    }

    pub fn tick(&mut self, dt: f32) -> ProtectionTick {
        if !self.active {
            return ProtectionTick::Inactive;
        }

        self.failsafe -= dt;
        self.remaining = (self.remaining - dt).max(0.0);

        if self.remaining <= 0.0 {
            self.active = false;
            ProtectionTick::Expired
        } else if self.failsafe <= 0.0 {
            self.cancel();
            ProtectionTick::ForcedExpiry
        } else {
            ProtectionTick::Holding
        }
    }
}

pub const PROTECTED_ALPHA: f32 = 0.5;

pub fn tick_spawn_protection(
    time: Res<Time>,
    mut q: Query<(Entity, &mut SpawnProtection, Option<&mut Sprite>)>,
) {
    let dt = time.delta_secs();

    for (e, mut protection, sprite) in &mut q {
        match protection.tick(dt) {
            ProtectionTick::Inactive | ProtectionTick::Holding => continue,
            ProtectionTick::Expired => debug!("{e}: spawn protection expired"),
            ProtectionTick::ForcedExpiry => {
                warn!("{e}: spawn protection force-cleared by failsafe")
            }
        }

        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(1.0);
        }
    }
}
