use bevy::prelude::*;

use super::layout::{FormationKind, FormationSpec, LayoutSpec, ENTRY_HEIGHT};
use crate::common::playfield::Playfield;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryState {
    /// Anchor interpolates linearly from `from` to `to` over `duration`.
    Entering { from: Vec2, to: Vec2, elapsed: f32, duration: f32 },
    Active,
}

/// One member and where it sits relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationSlot {
    pub entity: Entity,
    /// Offset at creation; rotations are always applied to this, never to `offset`.
    pub origin: Vec2,
    pub offset: Vec2,
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    Hold,
    /// Whole formation sinks at `speed`.
    Drift { speed: f32 },
    /// Each row slides sideways on its own and reverses at the edges.
    ZigZag { rows_moving_right: Vec<bool>, row_speed: f32, edge_buffer: f32, drift: f32 },
    /// Members orbit the anchor; `angle_deg` accumulates.
    Orbit { angle_deg: f32, rotation_speed: f32, drift: f32 },
}

impl Motion {
    pub fn for_layout(layout: &LayoutSpec) -> Self {
        match *layout {
            LayoutSpec::StraightRow { move_speed, .. } => Self::Drift { speed: move_speed },
            LayoutSpec::Grid { stay_in_position: true, .. } => Self::Hold,
            LayoutSpec::Grid { move_speed, .. } => Self::Drift { speed: move_speed },
            LayoutSpec::ZigZag {
                rows,
                row_speed,
                edge_buffer,
                downward_speed,
                stay_in_position,
                ..
            } => Self::ZigZag {
                // Even rows start rightward, odd rows leftward.
                rows_moving_right: (0..rows).map(|r| r % 2 == 0).collect(),
                row_speed,
                edge_buffer,
                drift: if stay_in_position { 0.0 } else { downward_speed },
            },
            LayoutSpec::Circle { rotation_speed, move_speed, stay_in_position, .. } => Self::Orbit {
                angle_deg: 0.0,
                rotation_speed,
                drift: if stay_in_position { 0.0 } else { move_speed },
            },
        }
    }
}

/// A group of actors moved as one, owned by the wave director.
///
/// The member list only ever shrinks: destroyed actors are pruned on every poll and nothing
/// is added after `populate`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Formation {
    pub kind: FormationKind,
    pub anchor: Vec2,
    pub entry: EntryState,
    pub motion: Motion,
    slots: Vec<FormationSlot>,
    centerpiece: Option<Entity>,
    expected: usize,
    populated: bool,
}

impl Formation {
    pub fn new(
        kind: FormationKind,
        from: Vec2,
        to: Vec2,
        entry_duration: f32,
        motion: Motion,
    ) -> Self {
        Self {
            kind,
            anchor: from,
            entry: EntryState::Entering { from, to, elapsed: 0.0, duration: entry_duration },
            motion,
            slots: Vec::new(),
            centerpiece: None,
            expected: 0,
            populated: false,
        }
    }

    pub fn from_spec(spec: &FormationSpec, playfield: &Playfield) -> Self {
        let to = spec.layout.target_anchor(playfield);
        let from = Vec2::new(to.x, playfield.top() + ENTRY_HEIGHT);
        Self::new(
            spec.layout.kind(),
            from,
            to,
            spec.entry_duration,
            Motion::for_layout(&spec.layout),
        )
    }

    /// Hand over the members. Only the first call has any effect.
    pub fn populate(&mut self, slots: Vec<FormationSlot>, centerpiece: Option<Entity>) {
        if self.populated {
            return;
        }
        self.expected = slots.len() + usize::from(centerpiece.is_some());
        self.slots = slots;
        self.centerpiece = centerpiece;
        self.populated = true;
    }

    #[inline]
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Members (centerpiece included) handed over by `populate`.
    #[inline]
    pub fn expected(&self) -> usize {
        self.expected
    }

    #[inline]
    pub fn is_entering(&self) -> bool {
        matches!(self.entry, EntryState::Entering { .. })
    }

    pub fn members(&self) -> impl Iterator<Item = &FormationSlot> {
        self.slots.iter()
    }

    #[inline]
    pub fn centerpiece(&self) -> Option<Entity> {
        self.centerpiece
    }

    /// Every entity the formation still tracks.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().map(|s| s.entity).chain(self.centerpiece)
    }

    /// Drop members that are no longer alive. Returns how many were removed.
    pub fn prune(&mut self, is_live: impl Fn(Entity) -> bool) -> usize {
        let before = self.slots.len() + usize::from(self.centerpiece.is_some());
        self.slots.retain(|s| is_live(s.entity));
        if self.centerpiece.is_some_and(|c| !is_live(c)) {
            self.centerpiece = None;
        }
        before - self.slots.len() - usize::from(self.centerpiece.is_some())
    }

    pub fn remaining_count(&mut self, is_live: impl Fn(Entity) -> bool) -> usize {
        self.prune(is_live);
        self.slots.len() + usize::from(self.centerpiece.is_some())
    }

    pub fn is_cleared(&mut self, is_live: impl Fn(Entity) -> bool) -> bool {
        self.remaining_count(is_live) == 0
    }

    #[inline]
    pub fn slot_position(&self, slot: &FormationSlot) -> Vec2 {
        self.anchor + slot.offset
    }

    /// Advance the entry glide. Returns `true` on the tick the anchor arrives.
    pub fn step_entry(&mut self, dt: f32) -> bool {
        let EntryState::Entering { from, to, elapsed, duration } = &mut self.entry else {
            return false;
        };

        *elapsed += dt;
        let t = if *duration > 0.0 { (*elapsed / *duration).min(1.0) } else { 1.0 };
        self.anchor = from.lerp(*to, t);

        if t >= 1.0 {
            self.entry = EntryState::Active;
            return true;
        }
        false
    }

    pub fn step_motion(&mut self, dt: f32, playfield: &Playfield) {
        let Self { anchor, motion, slots, .. } = self;

        match motion {
            Motion::Hold => {}
            Motion::Drift { speed } => anchor.y -= *speed * dt,
            Motion::ZigZag { rows_moving_right, row_speed, edge_buffer, drift } => {
                let right_edge = playfield.right() - *edge_buffer;
                let left_edge = playfield.left() + *edge_buffer;

                for (row, moving_right) in rows_moving_right.iter_mut().enumerate() {
                    let mut xs = slots
                        .iter()
                        .filter(|s| s.row == row)
                        .map(|s| anchor.x + s.offset.x);
                    if *moving_right {
                        if xs.any(|x| x >= right_edge) {
                            *moving_right = false;
                        }
                    } else if xs.any(|x| x <= left_edge) {
                        *moving_right = true;
                    }

                    let dx = if *moving_right { *row_speed } else { -*row_speed } * dt;
                    for slot in slots.iter_mut().filter(|s| s.row == row) {
                        slot.offset.x += dx;
                    }
                }
                anchor.y -= *drift * dt;
            }
            Motion::Orbit { angle_deg, rotation_speed, drift } => {
                *angle_deg += *rotation_speed * dt;
                let rotation = Vec2::from_angle(angle_deg.to_radians());
                for slot in slots.iter_mut() {
                    slot.offset = rotation.rotate(slot.origin);
                }
                anchor.y -= *drift * dt;
            }
        }
    }

    /// Row direction flags of a zig-zag formation.
    pub fn row_directions(&self) -> Option<&[bool]> {
        match &self.motion {
            Motion::ZigZag { rows_moving_right, .. } => Some(rows_moving_right),
            _ => None,
        }
    }
}
