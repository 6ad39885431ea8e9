//! Match bookkeeping: score, wave counter, clock and the final outcome.

use bevy::prelude::*;

/// Process-wide score/wave accumulator. Single writer per tick.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u32,
    wave: u32,
}

impl ScoreBoard {
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn set_wave(&mut self, wave: u32) {
        self.wave = wave;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Simulated seconds spent in the current match.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MatchClock {
    pub elapsed: f32,
}

/// Request to end the match. Only the first one per match is honoured.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub victory: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalStats {
    pub victory: bool,
    pub score: u32,
    pub wave: u32,
    pub survival_secs: f32,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct MatchOutcome(pub Option<FinalStats>);

impl MatchOutcome {
    #[inline]
    pub fn is_decided(&self) -> bool {
        self.0.is_some()
    }
}
