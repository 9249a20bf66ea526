//! Directed lines, rays and segments.

use super::Point;
use nalgebra::Vector2;

/// The part of the line through `origin` along `direction` that lies between
/// `start` and `end`. A missing bound means the edge is unbounded that way.
///
/// When both bounds are present, `end - start` is a positive multiple of
/// `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectedEdge {
    pub origin: Point,
    pub direction: Vector2<f64>,
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl DirectedEdge {
    /// Bounded segment from `start` to `end`.
    pub fn segment(start: Point, end: Point) -> Self {
        Self {
            origin: start,
            direction: end - start,
            start: Some(start),
            end: Some(end),
        }
    }

    /// Ray leaving `start` along `direction`.
    pub fn ray(start: Point, direction: Vector2<f64>) -> Self {
        Self {
            origin: start,
            direction,
            start: Some(start),
            end: None,
        }
    }

    /// Ray arriving at `end` along `direction`, unbounded behind.
    pub fn ray_to(direction: Vector2<f64>, end: Point) -> Self {
        Self {
            origin: end,
            direction,
            start: None,
            end: Some(end),
        }
    }

    /// Full line through `origin`.
    pub fn line(origin: Point, direction: Vector2<f64>) -> Self {
        Self {
            origin,
            direction,
            start: None,
            end: None,
        }
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Same point set, opposite direction.
    pub fn flip(&self) -> Self {
        Self {
            origin: self.origin,
            direction: -self.direction,
            start: self.end,
            end: self.start,
        }
    }

    /// `origin + direction`. Fixes an orientation; it need not lie on a
    /// bounded edge.
    #[inline]
    pub fn point_after(&self) -> Point {
        self.origin + self.direction
    }

    /// Replace unbounded ends by `origin ∓ max_steps * direction`.
    pub fn to_bounded_segment(&self, max_steps: f64) -> Self {
        let start = self
            .start
            .unwrap_or_else(|| self.origin - self.direction * max_steps);
        let end = self
            .end
            .unwrap_or_else(|| self.origin + self.direction * max_steps);
        Self {
            start: Some(start),
            end: Some(end),
            ..*self
        }
    }
}
