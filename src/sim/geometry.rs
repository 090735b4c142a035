//! Axis-aligned geometry for platforms, bodies and hitboxes
//!
//! Screen-style coordinates: x grows right, y grows down. A rectangle is
//! anchored at its top-left corner. All edge tests are inclusive, so two
//! rectangles that merely touch count as intersecting.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at `pos` with the given size
    #[inline]
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Point containment, edges included
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Overlap test, edges included
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.right() < self.x
            || other.x > self.right()
            || other.bottom() < self.y
            || other.y > self.bottom())
    }

    /// Strict horizontal overlap (touching edges do not count)
    #[inline]
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        other.right() > self.x && other.x < self.right()
    }
}

/// Surface material of a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Normal,
    /// Hides a crouching character from view
    Grass,
    /// Speeds up anyone standing on it
    Ice,
}

/// A static platform. Immutable once the arena is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    #[serde(default)]
    pub terrain: Terrain,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32, height: f32, terrain: Terrain) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            terrain,
        }
    }

    /// Y coordinate of the walkable surface
    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.y
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.rect.intersects(other)
    }
}
