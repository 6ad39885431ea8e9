//! Attack strategies: timer-driven emitters of projectile shots.
//!
//! A strategy never spawns anything itself. `tick` returns the shots that are due and the
//! firing system turns them into `SpawnProjectile` requests. All waiting (cooldowns, burst
//! spacing) is expressed as deadlines on the simulation clock.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::plugins::projectiles::components::ProjectileProfile;

/// Data form of an enemy's attack, as written in profiles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AttackSpec {
    None,
    #[default]
    Single,
    /// `count` shots `delay` apart; the next burst starts `cooldown` after this one started.
    Burst { count: u32, delay: f32, cooldown: f32 },
    Spread { count: u32, angle_deg: f32 },
}

/// Per-phase parameters of the boss attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseAttack {
    pub fire_rate: f32,
    pub projectile: ProjectileProfile,
    pub burst_count: u32,
    pub burst_delay: f32,
    pub spread_count: u32,
    pub spread_angle_deg: f32,
}

impl Default for PhaseAttack {
    fn default() -> Self {
        Self {
            fire_rate: 1.5,
            projectile: ProjectileProfile { damage: 15, speed: 384.0, lifetime: 3.0 },
            burst_count: 1,
            burst_delay: 0.2,
            spread_count: 1,
            spread_angle_deg: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTable {
    pub phase1: PhaseAttack,
    pub phase2: PhaseAttack,
    pub phase3: PhaseAttack,
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            phase1: PhaseAttack::default(),
            phase2: PhaseAttack {
                fire_rate: 2.0,
                projectile: ProjectileProfile { damage: 20, speed: 448.0, lifetime: 3.0 },
                burst_count: 3,
                burst_delay: 0.2,
                ..default()
            },
            phase3: PhaseAttack {
                fire_rate: 3.0,
                projectile: ProjectileProfile { damage: 25, speed: 512.0, lifetime: 3.0 },
                spread_count: 5,
                spread_angle_deg: 30.0,
                ..default()
            },
        }
    }
}

impl PhaseTable {
    pub fn get(&self, phase: u8) -> Option<&PhaseAttack> {
        match phase {
            1 => Some(&self.phase1),
            2 => Some(&self.phase2),
            3 => Some(&self.phase3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackPattern {
    Single,
    Burst { count: u32, delay: f32, cooldown: f32 },
    Spread { count: u32, angle_deg: f32 },
    /// Boss only: phase 1 single, phase 2 burst from every fire point, phase 3 spread.
    PhaseBased(PhaseTable),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttackConfigError {
    #[error("no projectile profile assigned")]
    MissingProjectile,
    #[error("no fire point assigned")]
    MissingFirePoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Muzzle offset in the shooter's local space.
    pub offset: Vec2,
    pub direction: Vec2,
    pub projectile: ProjectileProfile,
}

/// Shots released by one tick; `announce` asks for a single fire cue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Salvo {
    pub shots: Vec<Shot>,
    pub announce: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Volley {
    shots_left: u32,
    next_shot_at: f32,
    delay: f32,
    points: Vec<Vec2>,
    direction: Vec2,
    projectile: ProjectileProfile,
}

/// Seconds between volleys for a rate in volleys per second. Zero or negative never fires.
#[inline]
pub fn interval(fire_rate: f32) -> f32 {
    if fire_rate > 0.0 { fire_rate.recip() } else { f32::INFINITY }
}

/// Directions evenly fanned over `spread_deg`, centred on `forward`.
///
/// One projectile goes straight along `forward`; there is no angle step to divide by.
pub fn fan_directions(forward: Vec2, count: u32, spread_deg: f32) -> Vec<Vec2> {
    match count {
        0 => Vec::new(),
        1 => vec![forward],
        n => {
            let step = spread_deg / (n - 1) as f32;
            let start = -spread_deg * 0.5;
            (0..n)
                .map(|i| Vec2::from_angle((start + step * i as f32).to_radians()).rotate(forward))
                .collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackStrategy {
    pub pattern: AttackPattern,
    /// Seconds between volleys (single/spread) or between burst starts.
    pub cooldown: f32,
    pub projectile: Option<ProjectileProfile>,
    pub fire_points: Vec<Vec2>,
    pub forward: Vec2,
    /// Boss phase this strategy belongs to; `None` means every phase.
    pub phase: Option<u8>,
    enabled: bool,
    next_fire_at: f32,
    volley: Option<Volley>,
    faulted: bool,
}

impl AttackStrategy {
    pub fn new(
        pattern: AttackPattern,
        cooldown: f32,
        projectile: Option<ProjectileProfile>,
        fire_points: Vec<Vec2>,
    ) -> Self {
        Self {
            pattern,
            cooldown,
            projectile,
            fire_points,
            forward: Vec2::NEG_Y,
            phase: None,
            enabled: true,
            next_fire_at: 0.0,
            volley: None,
            faulted: false,
        }
    }

    /// Build from profile data. `AttackSpec::None` yields no strategy.
    pub fn from_spec(
        spec: AttackSpec,
        fire_rate: f32,
        projectile: Option<ProjectileProfile>,
        fire_points: Vec<Vec2>,
    ) -> Option<Self> {
        let (pattern, cooldown) = match spec {
            AttackSpec::None => return None,
            AttackSpec::Single => (AttackPattern::Single, interval(fire_rate)),
            AttackSpec::Burst { count, delay, cooldown } => {
                (AttackPattern::Burst { count, delay, cooldown }, cooldown)
            }
            AttackSpec::Spread { count, angle_deg } => {
                (AttackPattern::Spread { count, angle_deg }, interval(fire_rate))
            }
        };
        Some(Self::new(pattern, cooldown, projectile, fire_points))
    }

    pub fn for_phase(mut self, phase: u8) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    #[inline]
    pub fn next_fire_at(&self) -> f32 {
        self.next_fire_at
    }

    #[inline]
    pub fn applies_to_phase(&self, phase: u8) -> bool {
        self.phase.is_none_or(|p| p == phase)
    }

    /// Enabling a faulted strategy is a no-op; disabling drops any burst in flight.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled && !self.faulted;
        if !self.enabled {
            self.volley = None;
        }
    }

    pub fn enable_immediate_shooting(&mut self, now: f32) {
        self.next_fire_at = now;
    }

    /// Restart the cadence from `now`, using the rate that applies in `phase`.
    pub fn reset_cadence(&mut self, now: f32, phase: u8) {
        let wait = match &self.pattern {
            AttackPattern::PhaseBased(table) => {
                table.get(phase).map_or(f32::INFINITY, |a| interval(a.fire_rate))
            }
            _ => self.cooldown,
        };
        self.next_fire_at = now + wait;
    }

    fn validate(&self) -> Result<(), AttackConfigError> {
        if self.fire_points.is_empty() {
            return Err(AttackConfigError::MissingFirePoint);
        }
        if self.projectile.is_none() && !matches!(self.pattern, AttackPattern::PhaseBased(_)) {
            return Err(AttackConfigError::MissingProjectile);
        }
        Ok(())
    }

    /// Advance to `now`. A configuration error disables the strategy and is returned once.
    pub fn tick(&mut self, now: f32, phase: u8) -> Result<Salvo, AttackConfigError> {
        let mut salvo = Salvo::default();
        if !self.enabled {
            return Ok(salvo);
        }
        if let Err(err) = self.validate() {
            self.faulted = true;
            self.set_enabled(false);
            return Err(err);
        }

        self.continue_volley(now, &mut salvo);
        if now < self.next_fire_at {
            return Ok(salvo);
        }

        let primary = self.fire_points[0];
        let forward = self.forward;

        match self.pattern {
            AttackPattern::Single => {
                let Some(projectile) = self.projectile else { return Ok(salvo) };
                salvo.shots.push(Shot { offset: primary, direction: forward, projectile });
                self.next_fire_at = now + self.cooldown;
            }
            AttackPattern::Spread { count, angle_deg } => {
                let Some(projectile) = self.projectile else { return Ok(salvo) };
                salvo.shots.extend(
                    fan_directions(forward, count, angle_deg)
                        .into_iter()
                        .map(|direction| Shot { offset: primary, direction, projectile }),
                );
                self.next_fire_at = now + self.cooldown;
            }
            AttackPattern::Burst { count, delay, .. } => {
                let Some(projectile) = self.projectile else { return Ok(salvo) };
                if self.volley.is_some() {
                    return Ok(salvo);
                }
                self.start_volley(now, count, delay, vec![primary], projectile, &mut salvo);
                self.next_fire_at = now + self.cooldown;
            }
            AttackPattern::PhaseBased(table) => {
                let Some(attack) = table.get(phase).copied() else { return Ok(salvo) };
                match phase {
                    1 => salvo.shots.push(Shot {
                        offset: primary,
                        direction: forward,
                        projectile: attack.projectile,
                    }),
                    2 => {
                        if self.volley.is_some() {
                            return Ok(salvo);
                        }
                        let points = self.fire_points.clone();
                        self.start_volley(
                            now,
                            attack.burst_count,
                            attack.burst_delay,
                            points,
                            attack.projectile,
                            &mut salvo,
                        );
                    }
                    _ => salvo.shots.extend(
                        fan_directions(forward, attack.spread_count, attack.spread_angle_deg)
                            .into_iter()
                            .map(|direction| Shot {
                                offset: primary,
                                direction,
                                projectile: attack.projectile,
                            }),
                    ),
                }
                self.next_fire_at = now + interval(attack.fire_rate);
            }
        }

        salvo.announce = !salvo.shots.is_empty();
        Ok(salvo)
    }

    fn start_volley(
        &mut self,
        now: f32,
        count: u32,
        delay: f32,
        points: Vec<Vec2>,
        projectile: ProjectileProfile,
        salvo: &mut Salvo,
    ) {
        if count == 0 {
            return;
        }
        let direction = self.forward;
        salvo.shots.extend(points.iter().map(|&offset| Shot { offset, direction, projectile }));

        if count > 1 {
            self.volley = Some(Volley {
                shots_left: count - 1,
                next_shot_at: now + delay,
                delay,
                points,
                direction,
                projectile,
            });
        }
    }

    fn continue_volley(&mut self, now: f32, salvo: &mut Salvo) {
        let Some(volley) = self.volley.as_mut() else { return };

        while volley.shots_left > 0 && now >= volley.next_shot_at {
            salvo.shots.extend(volley.points.iter().map(|&offset| Shot {
                offset,
                direction: volley.direction,
                projectile: volley.projectile,
            }));
            volley.shots_left -= 1;
            volley.next_shot_at += volley.delay;
        }

        if volley.shots_left == 0 {
            self.volley = None;
        }
    }
}
