//! The `Environment` trait and its segment-soup implementation, `FloorPlan`.

use evac_core::{Segment, SimRng, Vec2};

use crate::{EnvError, EnvResult};

/// Which kind of static segment a spatial query is interested in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Wall,
    Exit,
}

// ── Environment trait ─────────────────────────────────────────────────────────

/// Read-only geometric queries consumed by the rest of the framework.
///
/// Implementations must be `Send + Sync`; the simulator holds one for the
/// whole run and every subsystem borrows it immutably.
pub trait Environment: Send + Sync {
    /// Wall segments in a stable order (indices are meaningful to callers).
    fn walls(&self) -> &[Segment];

    /// Exit segments in a stable order.
    fn exits(&self) -> &[Segment];

    /// Index of the first segment of `kind` properly crossed by the travel
    /// segment `from → to`, or `None` if the path is clear.
    fn first_hit(&self, from: Vec2, to: Vec2, kind: SegmentKind) -> Option<usize> {
        let travel = Segment::new(from, to);
        let set = match kind {
            SegmentKind::Wall => self.walls(),
            SegmentKind::Exit => self.exits(),
        };
        set.iter().position(|s| travel.intersects(*s))
    }

    /// `true` if `pos` is inside the floor and clear of every wall.
    fn is_free(&self, pos: Vec2) -> bool;

    /// `(width, height)` of the floor rectangle.
    fn bounds(&self) -> (f32, f32);
}

// ── FloorPlan ─────────────────────────────────────────────────────────────────

/// A rectangular floor with wall and exit segments.
///
/// Positions are metres with the origin at the bottom-left corner.  Walls
/// and exits keep the order they were supplied in; query results report
/// indices into those slices.
#[derive(Clone, Debug)]
pub struct FloorPlan {
    width:  f32,
    height: f32,
    walls:  Vec<Segment>,
    exits:  Vec<Segment>,
    /// Minimum distance from any wall for a position to count as free.
    /// Matches the largest spawnable agent radius so spawns never overlap
    /// a wall.
    clearance: f32,
}

impl FloorPlan {
    /// Default wall clearance used by [`FloorPlan::is_free`].
    pub const DEFAULT_CLEARANCE: f32 = 0.4;

    /// Cap on rejection-sampling attempts in [`random_free_position`].
    ///
    /// [`random_free_position`]: FloorPlan::random_free_position
    const MAX_SPAWN_ATTEMPTS: usize = 10_000;

    /// Create a floor plan and validate its geometry.
    pub fn new(
        width:  f32,
        height: f32,
        walls:  Vec<Segment>,
        exits:  Vec<Segment>,
    ) -> EnvResult<Self> {
        if width <= 0.0 || height <= 0.0 {
            return Err(EnvError::BadDimensions { width, height });
        }
        if exits.is_empty() {
            return Err(EnvError::NoExits);
        }
        for (i, e) in exits.iter().enumerate() {
            if e.length() < 1e-6 {
                return Err(EnvError::DegenerateExit(i));
            }
        }
        Ok(Self {
            width,
            height,
            walls,
            exits,
            clearance: Self::DEFAULT_CLEARANCE,
        })
    }

    /// Construct without validation, for geometry that is known valid at
    /// compile time (the canned scenarios).  Invariants are still checked
    /// in debug builds.
    pub(crate) fn from_static(
        width:  f32,
        height: f32,
        walls:  Vec<Segment>,
        exits:  Vec<Segment>,
    ) -> Self {
        debug_assert!(width > 0.0 && height > 0.0);
        debug_assert!(exits.iter().all(|e| e.length() >= 1e-6));
        debug_assert!(!exits.is_empty());
        Self {
            width,
            height,
            walls,
            exits,
            clearance: Self::DEFAULT_CLEARANCE,
        }
    }

    /// Override the wall clearance used by free-position checks.
    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = clearance;
        self
    }

    pub fn clearance(&self) -> f32 {
        self.clearance
    }

    /// Add perimeter walls along all four floor edges, leaving gaps where an
    /// exit lies on the boundary.
    ///
    /// Interior exits are ignored here; they simply never get a wall drawn
    /// through them because the gap logic only looks at boundary-aligned
    /// exits.
    pub fn add_boundary_walls(&mut self) {
        let w = self.width;
        let h = self.height;
        let edges = [
            (Vec2::new(0.0, 0.0), Vec2::new(w, 0.0)),   // bottom
            (Vec2::new(0.0, h), Vec2::new(w, h)),       // top
            (Vec2::new(0.0, 0.0), Vec2::new(0.0, h)),   // left
            (Vec2::new(w, 0.0), Vec2::new(w, h)),       // right
        ];
        for (a, b) in edges {
            let segments = self.edge_minus_exits(a, b);
            self.walls.extend(segments);
        }
    }

    /// Split the boundary edge `a → b` into wall segments, removing the
    /// spans covered by exits that lie on this edge.
    fn edge_minus_exits(&self, a: Vec2, b: Vec2) -> Vec<Segment> {
        let dir = (b - a).normalized();
        let len = a.distance(b);

        // Project boundary exits onto the edge as (start, end) spans.
        let mut spans: Vec<(f32, f32)> = self
            .exits
            .iter()
            .filter(|e| on_edge(e.a, a, b) && on_edge(e.b, a, b))
            .map(|e| {
                let ta = (e.a - a).dot(dir);
                let tb = (e.b - a).dot(dir);
                (ta.min(tb), ta.max(tb))
            })
            .collect();
        spans.sort_by(|x, y| x.0.total_cmp(&y.0));

        let mut walls = Vec::new();
        let mut cursor = 0.0_f32;
        for (start, end) in spans {
            if start > cursor + 1e-4 {
                walls.push(Segment::new(a + dir * cursor, a + dir * start));
            }
            cursor = cursor.max(end);
        }
        if cursor < len - 1e-4 {
            walls.push(Segment::new(a + dir * cursor, a + dir * len));
        }
        walls
    }

    /// Rejection-sample a uniformly distributed free position.
    ///
    /// Samples keep [`clearance`](FloorPlan::clearance) away from the floor
    /// boundary so spawned agents never start inside a perimeter wall.
    pub fn random_free_position(&self, rng: &mut SimRng) -> EnvResult<Vec2> {
        let m = self.clearance;
        for _ in 0..Self::MAX_SPAWN_ATTEMPTS {
            let pos = Vec2::new(
                rng.gen_range(m..self.width - m),
                rng.gen_range(m..self.height - m),
            );
            if self.is_free(pos) {
                return Ok(pos);
            }
        }
        Err(EnvError::NoFreePosition(Self::MAX_SPAWN_ATTEMPTS))
    }
}

impl Environment for FloorPlan {
    fn walls(&self) -> &[Segment] {
        &self.walls
    }

    fn exits(&self) -> &[Segment] {
        &self.exits
    }

    fn is_free(&self, pos: Vec2) -> bool {
        if pos.x < 0.0 || pos.x > self.width || pos.y < 0.0 || pos.y > self.height {
            return false;
        }
        self.walls.iter().all(|w| w.distance_to(pos) > self.clearance)
    }

    fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// `true` if `p` lies on the boundary edge `a → b` (within tolerance).
fn on_edge(p: Vec2, a: Vec2, b: Vec2) -> bool {
    Segment::new(a, b).distance_to(p) < 1e-4
}
