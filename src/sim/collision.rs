//! Collision predicates
//!
//! Pure overlap tests between the two collider shapes. Touching is never
//! colliding: shapes must share interior area (or, for circles, come
//! strictly closer than the sum of their radii).

use super::shape::{Circle, Collider, Rect};
use crate::distance_squared;

/// Check whether two axis-aligned rectangles overlap
///
/// Separating-axis test: any side of `a` lying on or beyond the opposite
/// side of `b` means no overlap.
pub fn rect_overlap(a: &Rect, b: &Rect) -> bool {
    if a.bottom() <= b.top() {
        return false;
    }
    if a.top() >= b.bottom() {
        return false;
    }
    if a.right() <= b.left() {
        return false;
    }
    if a.left() >= b.right() {
        return false;
    }
    true
}

/// Check whether two circles overlap
///
/// Compares squared distances so no square root is needed.
pub fn circle_overlap(a: &Circle, b: &Circle) -> bool {
    let total_radius = a.radius + b.radius;
    distance_squared(a.center, b.center) < total_radius * total_radius
}

/// Check whether a circle overlaps a rectangle
///
/// Finds the point of `rect` closest to the circle centre by clamping each
/// axis independently, then compares its squared distance to the radius.
/// A centre strictly inside the rect collides even at radius 0.
pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let c = circle.center;
    if c.x > rect.left() && c.x < rect.right() && c.y > rect.top() && c.y < rect.bottom() {
        return true;
    }

    let closest = rect.closest_point(c);
    distance_squared(c, closest) < circle.radius * circle.radius
}

impl Collider {
    /// Check whether two colliders overlap, whatever their shapes
    pub fn overlaps(&self, other: &Collider) -> bool {
        match (self, other) {
            (Collider::Rect(a), Collider::Rect(b)) => rect_overlap(a, b),
            (Collider::Circle(a), Collider::Circle(b)) => circle_overlap(a, b),
            (Collider::Circle(c), Collider::Rect(r)) | (Collider::Rect(r), Collider::Circle(c)) => {
                circle_rect_overlap(c, r)
            }
        }
    }
}
