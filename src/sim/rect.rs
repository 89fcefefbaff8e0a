//! Axis-aligned rectangles and rounded-rectangle containment
//!
//! Screen convention: `y` grows downward, so `top` is the smaller `y`.
//! Every test here is closed: a point exactly on a boundary counts as inside.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its top-left corner and size
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

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Grow (positive) or shrink (negative) by `amount` on every side
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }

    /// Closed bounding-box test
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// True if `other` lies strictly inside this rectangle (no shared edge)
    pub fn strictly_contains_rect(&self, other: &Rect) -> bool {
        other.left() > self.left()
            && other.right() < self.right()
            && other.top() > self.top()
            && other.bottom() < self.bottom()
    }

    /// Point-in-rounded-rectangle with corner radius `radius`
    pub fn contains_rounded(&self, p: Vec2, radius: f32) -> bool {
        if !self.contains(p) {
            return false;
        }

        let core = self.inset(radius);
        if core.width < 0.0 || core.height < 0.0 {
            // Radius too large: plain rectangle
            return true;
        }

        if core.contains(p) {
            return true;
        }

        match Corner::classify(p, &core) {
            Some(corner) => p.distance_squared(corner.center(&core)) <= radius * radius,
            None => true,
        }
    }
}

/// The four corner regions of a rounded rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Which corner region `p` falls in, relative to the shrunk core rectangle.
    ///
    /// Returns `None` for points level with the core along either axis; those sit
    /// in a straight edge margin rather than a corner.
    pub fn classify(p: Vec2, core: &Rect) -> Option<Self> {
        let left = p.x < core.left();
        let right = p.x > core.right();
        let above = p.y < core.top();
        let below = p.y > core.bottom();

        match (left, right, above, below) {
            (true, _, true, _) => Some(Corner::TopLeft),
            (_, true, true, _) => Some(Corner::TopRight),
            (true, _, _, true) => Some(Corner::BottomLeft),
            (_, true, _, true) => Some(Corner::BottomRight),
            _ => None,
        }
    }

    /// Circle centre of this corner, which is the matching vertex of the core rectangle
    pub fn center(self, core: &Rect) -> Vec2 {
        match self {
            Corner::TopLeft => Vec2::new(core.left(), core.top()),
            Corner::TopRight => Vec2::new(core.right(), core.top()),
            Corner::BottomLeft => Vec2::new(core.left(), core.bottom()),
            Corner::BottomRight => Vec2::new(core.right(), core.bottom()),
        }
    }
}

/// A rectangle paired with its corner radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f32,
}

impl RoundedRect {
    pub const fn new(rect: Rect, radius: f32) -> Self {
        Self { rect, radius }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.rect.contains_rounded(p, self.radius)
    }

    /// The radius is small enough that the core rectangle does not collapse
    pub fn is_well_formed(&self) -> bool {
        2.0 * self.radius <= self.rect.width.min(self.rect.height)
    }
}
