//! Playfield bounds in world space (origin at the centre).

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub half_extents: Vec2,
}

impl Default for Playfield {
    fn default() -> Self {
        Self { half_extents: Vec2::new(384.0, 320.0) }
    }
}

impl Playfield {
    #[inline]
    pub fn top(&self) -> f32 {
        self.half_extents.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        -self.half_extents.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        -self.half_extents.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.half_extents.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// `true` if `point` lies inside the playfield grown by `margin` on every side.
    #[inline]
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        let ext = self.half_extents + Vec2::splat(margin);
        point.x.abs() <= ext.x && point.y.abs() <= ext.y
    }

    /// Rect covering the central part of the playfield, `inset` given as a fraction of the
    /// full width/height removed from each side (0.1 keeps the 10%..90% band).
    pub fn inner_rect(&self, inset: f32) -> Rect {
        let inset = inset.clamp(0.0, 0.49);
        let size = self.half_extents * 2.0;
        let min = Vec2::new(self.left(), self.bottom()) + size * inset;
        let max = Vec2::new(self.right(), self.top()) - size * inset;
        Rect::from_corners(min, max)
    }

    /// Clamp a point so it stays `buffer` units inside the edges.
    pub fn clamp_inside(&self, point: Vec2, buffer: f32) -> Vec2 {
        let ext = (self.half_extents - Vec2::splat(buffer)).max(Vec2::ZERO);
        point.clamp(-ext, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_respects_margin() {
        let field = Playfield { half_extents: Vec2::new(100.0, 50.0) };
        assert!(field.contains(Vec2::new(100.0, 50.0), 0.0));
        assert!(!field.contains(Vec2::new(0.0, 60.0), 0.0));
        assert!(field.contains(Vec2::new(0.0, 60.0), 20.0));
    }

    #[test]
    fn inner_rect_keeps_central_band() {
        let field = Playfield { half_extents: Vec2::new(100.0, 50.0) };
        let rect = field.inner_rect(0.1);
        assert!((rect.min.x - -80.0).abs() < 1e-4);
        assert!((rect.max.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn clamp_inside_applies_buffer() {
        let field = Playfield { half_extents: Vec2::new(100.0, 50.0) };
        let p = field.clamp_inside(Vec2::new(500.0, -500.0), 10.0);
        assert_eq!(p, Vec2::new(90.0, -40.0));
    }
}
