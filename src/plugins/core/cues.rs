//! Sound cues.
//!
//! Gameplay never plays audio itself; it writes `PlaySound` and whatever audio backend is
//! installed drains the messages. Nothing blocks on playback.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    PlayerShoot,
    PlayerHit,
    PlayerExplosion,
    EnemyShoot,
    EnemyHit,
    EnemyExplosion,
    BossShoot,
    BossHit,
    BossExplosion,
    ProjectileHit,
    PowerUp,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySound(pub SoundCue);
