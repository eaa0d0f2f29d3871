//! 2-D geometry primitives shared by every subsystem.
//!
//! Coordinates are single-precision metres in a flat floor plane.  `f32`
//! keeps agent and node arrays compact; the force model never needs more
//! than ~1 mm of resolution at room scale.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Threshold below which a vector or distance is treated as zero.
pub const GEOM_EPS: f32 = 1e-8;

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A 2-D point or direction in floor coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Fixed fallback direction for degenerate cases (coincident points,
    /// zero-length walls).  Deterministic so runs are reproducible.
    pub const UNIT_X: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2-D cross product (z component of the 3-D cross).
    #[inline]
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Counter-clockwise perpendicular of the same length.
    #[inline]
    pub fn perp(self) -> Vec2 {
        Vec2::new(-self.y, self.x)
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `Vec2::ZERO` when the length is
    /// below [`GEOM_EPS`].  Callers that need a non-zero fallback use
    /// [`Vec2::UNIT_X`] explicitly.
    #[inline]
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len < GEOM_EPS {
            Vec2::ZERO
        } else {
            self / len
        }
    }

    /// Clamp the vector's length to `max_len`, preserving direction.
    pub fn clamped(self, max_len: f32) -> Vec2 {
        let len = self.length();
        if len > max_len && len > GEOM_EPS {
            self * (max_len / len)
        } else {
            self
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn div(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A line segment between two floor points — a wall, an exit, or one tick of
/// agent travel.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    #[inline]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.a.distance(self.b)
    }

    #[inline]
    pub fn midpoint(self) -> Vec2 {
        (self.a + self.b) * 0.5
    }

    /// Closest point on the segment to `p`.
    ///
    /// Zero-length segments return `a` — the documented fallback for
    /// degenerate geometry; this never produces NaN.
    pub fn closest_point(self, p: Vec2) -> Vec2 {
        let ab = self.b - self.a;
        let len_sq = ab.length_squared();
        if len_sq < GEOM_EPS {
            return self.a;
        }
        let t = ((p - self.a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.a + ab * t
    }

    /// Distance from `p` to the nearest point of the segment.
    #[inline]
    pub fn distance_to(self, p: Vec2) -> f32 {
        self.closest_point(p).distance(p)
    }

    /// Unit normal of the segment pointing toward the side `p` lies on.
    ///
    /// Degenerate segments (or `p` exactly on the line) fall back to
    /// [`Vec2::UNIT_X`] so callers never divide by zero.
    pub fn normal_towards(self, p: Vec2) -> Vec2 {
        let dir = (self.b - self.a).normalized();
        if dir == Vec2::ZERO {
            let away = (p - self.a).normalized();
            return if away == Vec2::ZERO { Vec2::UNIT_X } else { away };
        }
        let n = dir.perp();
        let side = (p - self.a).dot(n);
        if side.abs() < GEOM_EPS {
            Vec2::UNIT_X
        } else if side < 0.0 {
            -n
        } else {
            n
        }
    }

    /// `true` if the two segments properly cross (interiors intersect).
    ///
    /// Collinear overlap and shared endpoints are *not* crossings — this
    /// matches the strict orientation test used for edge filtering, so a
    /// graph edge may touch a wall endpoint without being discarded.
    pub fn intersects(self, other: Segment) -> bool {
        let o1 = orient(self.a, self.b, other.a);
        let o2 = orient(self.a, self.b, other.b);
        let o3 = orient(other.a, other.b, self.a);
        let o4 = orient(other.a, other.b, self.b);
        o1 * o2 < 0.0 && o3 * o4 < 0.0
    }

    /// Intersection point of two properly crossing segments.
    ///
    /// Returns `None` when the segments are parallel, degenerate, or do not
    /// cross within both parameter ranges.
    pub fn intersection_point(self, other: Segment) -> Option<Vec2> {
        let r = self.b - self.a;
        let s = other.b - other.a;
        let denom = r.cross(s);
        if denom.abs() < GEOM_EPS {
            return None;
        }
        let qp = other.a - self.a;
        let t = qp.cross(s) / denom;
        let u = qp.cross(r) / denom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(self.a + r * t)
        } else {
            None
        }
    }
}

/// Signed orientation of the triple `(p, q, r)` — positive when `r` is left
/// of the directed line `p → q`.
#[inline]
fn orient(p: Vec2, q: Vec2, r: Vec2) -> f32 {
    (q - p).cross(r - p)
}
