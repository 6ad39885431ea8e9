use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BossPhase {
    /// Not in the arena yet.
    #[default]
    Entry = 0,
    One = 1,
    Two = 2,
    Three = 3,
}

impl BossPhase {
    #[inline]
    pub fn number(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossEntry {
    /// Flies in on its own: linear interpolation over `duration`.
    Gliding { from: Vec2, to: Vec2, elapsed: f32, duration: f32 },
    /// Carried in by a formation, which calls `arrive` when it settles.
    Escorted,
    Arrived,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Boss {
    pub phase: BossPhase,
    pub entry: BossEntry,
    /// Health ratios that open phase 2 and phase 3, strictly decreasing.
    pub thresholds: [f32; 2],
    pub tints: [Color; 3],
}

impl Boss {
    pub fn new(entry: BossEntry, thresholds: [f32; 2], tints: [Color; 3]) -> Self {
        Self { phase: BossPhase::Entry, entry, thresholds, tints }
    }

    #[inline]
    pub fn entered_arena(&self) -> bool {
        self.entry == BossEntry::Arrived
    }

    pub fn arrive(&mut self) {
        self.entry = BossEntry::Arrived;
    }

    /// Advance a glide. Returns the new position while gliding, `None` otherwise.
    pub fn step_glide(&mut self, dt: f32) -> Option<Vec2> {
        let BossEntry::Gliding { from, to, elapsed, duration } = &mut self.entry else {
            return None;
        };

        *elapsed += dt;
        let t = if *duration > 0.0 { (*elapsed / *duration).min(1.0) } else { 1.0 };
        let pos = from.lerp(*to, t);
        if t >= 1.0 {
            self.entry = BossEntry::Arrived;
        }
        Some(pos)
    }

    /// Phase the health ratio calls for, checked from the most severe threshold down.
    pub fn target_phase(&self, ratio: f32) -> BossPhase {
        if ratio <= self.thresholds[1] {
            BossPhase::Three
        } else if ratio <= self.thresholds[0] {
            BossPhase::Two
        } else {
            BossPhase::One
        }
    }

    /// Next phase to activate, if any. Phases never decrease and nothing changes before
    /// the boss has entered the arena.
    pub fn pending_phase(&self, ratio: f32) -> Option<BossPhase> {
        if !self.entered_arena() {
            return None;
        }
        let target = self.target_phase(ratio);
        (target > self.phase).then_some(target)
    }

    pub fn tint(&self) -> Color {
        match self.phase {
            BossPhase::Entry | BossPhase::One => self.tints[0],
            BossPhase::Two => self.tints[1],
            BossPhase::Three => self.tints[2],
        }
    }
}

/// Written once per activated phase.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossPhaseChanged {
    pub boss: Entity,
    pub from: BossPhase,
    pub to: BossPhase,
}
