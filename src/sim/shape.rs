//! Collider geometry
//!
//! Two shapes cover every collider in the arena:
//! - `Rect`: axis-aligned box, origin at the top-left corner
//! - `Circle`: centre point plus radius

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    /// Width (>= 0)
    pub w: f32,
    /// Height (>= 0)
    pub h: f32,
}

impl Rect {
    /// Negative extents are clamped to zero.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Point containment, edges inclusive
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Whether `other` lies entirely inside this rect (shared edges allowed)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Closest point of the rect to `p`, clamped per axis
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left(), self.right()),
            p.y.clamp(self.top(), self.bottom()),
        )
    }
}

/// A circle given by its centre and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    /// Radius (>= 0)
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Axis-aligned bounds of the circle
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

/// Shape used for collision testing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    Rect(Rect),
    Circle(Circle),
}

impl Collider {
    /// Axis-aligned bounds, used for world-boundary checks
    pub fn bounds(&self) -> Rect {
        match self {
            Collider::Rect(r) => *r,
            Collider::Circle(c) => c.bounds(),
        }
    }

    /// Top-left corner of the bounds (where a sprite of this collider is drawn)
    pub fn top_left(&self) -> Vec2 {
        self.bounds().top_left()
    }

    /// Move the collider so its anchor sits at `anchor`.
    ///
    /// Rect anchors are the top-left corner; circle anchors are the centre.
    pub fn move_to(&mut self, anchor: Vec2) {
        match self {
            Collider::Rect(r) => {
                r.x = anchor.x;
                r.y = anchor.y;
            }
            Collider::Circle(c) => c.center = anchor,
        }
    }
}

impl From<Rect> for Collider {
    fn from(r: Rect) -> Self {
        Collider::Rect(r)
    }
}

impl From<Circle> for Collider {
    fn from(c: Circle) -> Self {
        Collider::Circle(c)
    }
}
