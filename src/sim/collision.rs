//! Collision detection and response for axis-aligned geometry
//!
//! Everything in the arena is a circle (the ball) or an axis-aligned
//! rectangle (paddle, bricks, walls), so the whole collision story is
//! circle-vs-AABB with a contact normal for the response.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Closest point inside the box to `p`
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Collision point (if hit)
    pub point: Vec2,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a circle and an AABB
///
/// Returns collision info if the circle overlaps the box, including the
/// surface normal for reflection and the penetration depth for pushing
/// the circle back out.
pub fn circle_aabb_collision(center: Vec2, radius: f32, aabb: &Aabb) -> CollisionResult {
    let closest = aabb.clamp_point(center);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    if dist_sq > 1e-6 {
        // Circle center is outside the box: normal points from the
        // contact point toward the center.
        let dist = dist_sq.sqrt();
        CollisionResult {
            hit: true,
            point: closest,
            normal: offset / dist,
            penetration: radius - dist,
        }
    } else {
        // Circle center is inside the box (deep overlap): pick the face
        // with the smallest separation and push out through it.
        let to_left = center.x - aabb.min.x;
        let to_right = aabb.max.x - center.x;
        let to_top = center.y - aabb.min.y;
        let to_bottom = aabb.max.y - center.y;

        let (face_dist, normal) = [
            (to_left, Vec2::NEG_X),
            (to_right, Vec2::X),
            (to_top, Vec2::NEG_Y),
            (to_bottom, Vec2::Y),
        ]
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, Vec2::NEG_Y));

        CollisionResult {
            hit: true,
            point: center,
            normal,
            penetration: radius + face_dist,
        }
    }
}

/// Mirror the velocity component along the dominant axis of the contact
/// normal. Arcade-style response: a hit on a vertical face flips `vx`, a
/// hit on a horizontal face flips `vy`, never both.
#[inline]
pub fn reflect_axis(velocity: Vec2, normal: Vec2) -> Vec2 {
    if normal.x.abs() > normal.y.abs() {
        Vec2::new(-velocity.x, velocity.y)
    } else {
        Vec2::new(velocity.x, -velocity.y)
    }
}
