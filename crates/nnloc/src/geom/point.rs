//! `Point` plus the scalar primitives the sweep and the map call.

use nalgebra::Vector2;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

/// A point in the plane.
///
/// Equality is exact on both coordinates. Hashing agrees with equality
/// (`-0.0` and `0.0` hash the same). Coordinates are expected to be
/// non-NaN; the public builders reject NaN input before it gets here.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vec(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Midpoint of `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }
}

impl PartialEq for Point {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `+ 0.0` folds -0.0 into 0.0 so hashing matches `==`.
        (self.x + 0.0).to_bits().hash(state);
        (self.y + 0.0).to_bits().hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Vector2<f64>> for Point {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Sub for Point {
    type Output = Vector2<f64>;
    #[inline]
    fn sub(self, rhs: Point) -> Vector2<f64> {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector2<f64>> for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Vector2<f64>) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Vector2<f64>> for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Vector2<f64>) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Failures of the pure helpers in this module.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeomError {
    Collinear { a: Point, b: Point, c: Point },
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collinear { a, b, c } => {
                write!(f, "points {a}, {b}, {c} are collinear; no circumcenter")
            }
        }
    }
}

impl std::error::Error for GeomError {}

/// z-component of `u × v`. Positive when `v` is counterclockwise from `u`.
#[inline]
pub fn cross(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// `(e1 - s1) × (e2 - s2)`.
#[inline]
pub fn cross_product(s1: Point, e1: Point, s2: Point, e2: Point) -> f64 {
    cross(e1 - s1, e2 - s2)
}

/// Counterclockwise perpendicular `(-y, x)`.
#[inline]
pub fn perp(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Center of the circle through `a`, `b`, `c`.
///
/// Solves the two perpendicular-bisector equations through `a`.
/// Collinear input (zero determinant) is reported, not divided through.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Result<Point, GeomError> {
    let (a1, b1) = (b.x - a.x, b.y - a.y);
    let (a2, b2) = (c.x - a.x, c.y - a.y);
    let c1 = 0.5 * (a1 * (b.x + a.x) + b1 * (b.y + a.y));
    let c2 = 0.5 * (a2 * (c.x + a.x) + b2 * (c.y + a.y));
    let det = a1 * b2 - a2 * b1;
    if det == 0.0 || !det.is_finite() {
        return Err(GeomError::Collinear { a, b, c });
    }
    Ok(Point::new(
        (c1 * b2 - c2 * b1) / det,
        (c2 * a1 - c1 * a2) / det,
    ))
}
