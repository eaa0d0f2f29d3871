//! Canned 10×10 benchmark rooms.
//!
//! These are the standard scenarios used for parameter sweeps and the
//! demos.  All of them call [`FloorPlan::add_boundary_walls`] so the only
//! way out is through an exit segment.

use evac_core::{Segment, Vec2};

use crate::floorplan::FloorPlan;

fn seg(ax: f32, ay: f32, bx: f32, by: f32) -> Segment {
    Segment::new(Vec2::new(ax, ay), Vec2::new(bx, by))
}

/// Empty room, one 2-unit exit centred on the right wall.
pub fn empty_room() -> FloorPlan {
    let mut plan = FloorPlan::from_static(
        10.0,
        10.0,
        vec![],
        vec![seg(10.0, 4.0, 10.0, 6.0)],
    );
    plan.add_boundary_walls();
    plan
}

/// A dividing wall with a 2-unit gap in the middle, exit on the right wall.
pub fn bottleneck() -> FloorPlan {
    let mut plan = FloorPlan::from_static(
        10.0,
        10.0,
        vec![seg(5.0, 0.0, 5.0, 4.0), seg(5.0, 6.0, 5.0, 10.0)],
        vec![seg(10.0, 4.0, 10.0, 6.0)],
    );
    plan.add_boundary_walls();
    plan
}

/// No internal walls; one exit on each of the left and right walls.
pub fn two_doors() -> FloorPlan {
    let mut plan = FloorPlan::from_static(
        10.0,
        10.0,
        vec![],
        vec![seg(0.0, 4.0, 0.0, 6.0), seg(10.0, 2.0, 10.0, 4.0)],
    );
    plan.add_boundary_walls();
    plan
}

/// Zig-zag path: the first wall blocks the top, the second blocks the
/// bottom, forcing an S-shaped route to the right-wall exit.
pub fn slalom() -> FloorPlan {
    let mut plan = FloorPlan::from_static(
        10.0,
        10.0,
        vec![seg(4.0, 4.0, 4.0, 10.0), seg(6.0, 0.0, 6.0, 6.0)],
        vec![seg(10.0, 4.0, 10.0, 6.0)],
    );
    plan.add_boundary_walls();
    plan
}
