//! Unit tests for evac-dynamics.

use evac_core::{AgentId, Segment, Vec2};
use evac_env::FloorPlan;

use crate::{AgentState, DynamicsError, MovementModel, SocialForceModel, Target};

fn seg(ax: f32, ay: f32, bx: f32, by: f32) -> Segment {
    Segment::new(Vec2::new(ax, ay), Vec2::new(bx, by))
}

/// Open 20×20 floor: no walls, so only the driving force acts.
fn open_floor() -> FloorPlan {
    FloorPlan::new(20.0, 20.0, vec![], vec![seg(20.0, 9.0, 20.0, 11.0)])
        .expect("static test geometry is valid")
}

fn agent_at(x: f32, y: f32) -> AgentState {
    AgentState::new(AgentId(0), Vec2::new(x, y), 0.3, 60.0, 3.0)
}

#[cfg(test)]
mod driving {
    use super::*;

    #[test]
    fn zero_net_force_keeps_velocity() {
        let env = open_floor();
        let model = SocialForceModel::default();

        // Already moving at max speed straight at the target: the desired
        // velocity equals the current one, so nothing changes but position.
        let mut a = agent_at(5.0, 5.0).with_velocity(Vec2::new(3.0, 0.0));
        a.target = Some(Target::Point(Vec2::new(15.0, 5.0)));

        model.step(&mut a, &[], &env, 0.1).unwrap();

        assert!((a.vel.x - 3.0).abs() < 1e-5);
        assert!(a.vel.y.abs() < 1e-5);
        assert!((a.pos.x - 5.3).abs() < 1e-5);
        assert!((a.pos.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn agent_standing_on_target_brakes() {
        let env = open_floor();
        let model = SocialForceModel::default();

        let mut a = agent_at(5.0, 5.0).with_velocity(Vec2::new(1.0, 0.0));
        a.target = Some(Target::Point(Vec2::new(5.0, 5.0)));

        model.step(&mut a, &[], &env, 0.1).unwrap();

        assert!(a.vel.x < 1.0);
        assert!(a.vel.x > 0.0);
    }

    #[test]
    fn speed_is_clamped_to_max() {
        let env = open_floor();
        let model = SocialForceModel::default();

        let mut a = agent_at(2.0, 10.0);
        a.target = Some(Target::Point(Vec2::new(18.0, 10.0)));

        // Large dt would overshoot max speed without the clamp.
        model.step(&mut a, &[], &env, 1.0).unwrap();
        assert!(a.speed() <= a.max_speed + 1e-4);
    }

    #[test]
    fn missing_target_fails_loudly() {
        let env = open_floor();
        let model = SocialForceModel::default();

        let mut a = agent_at(5.0, 5.0);
        let r = model.step(&mut a, &[], &env, 0.1);
        assert!(matches!(r, Err(DynamicsError::MissingTarget(_))));
    }

    #[test]
    fn exit_target_steers_to_closest_point() {
        let env = open_floor();
        let model = SocialForceModel::default();

        // Exit spans y ∈ [9, 11] at x = 20; from (10, 10.5) the closest
        // point is (20, 10.5), so motion is purely horizontal.
        let mut a = agent_at(10.0, 10.5);
        a.target = Some(Target::Exit(seg(20.0, 9.0, 20.0, 11.0)));

        model.step(&mut a, &[], &env, 0.1).unwrap();
        assert!(a.vel.x > 0.0);
        assert!(a.vel.y.abs() < 1e-5);
    }
}

#[cfg(test)]
mod repulsion {
    use super::*;

    #[test]
    fn overlapping_agents_separate() {
        let env = open_floor();
        let model = SocialForceModel::default();

        // Radius 0.3 each, 0.1 apart: deep overlap.
        let mut a = agent_at(5.0, 5.0);
        let mut b = AgentState::new(AgentId(1), Vec2::new(5.1, 5.0), 0.3, 60.0, 3.0);
        a.target = Some(Target::Point(a.pos));
        b.target = Some(Target::Point(b.pos));

        let before = a.pos.distance(b.pos);
        let snapshot = [a.snapshot(), b.snapshot()];
        model.step(&mut a, &snapshot, &env, 0.05).unwrap();
        model.step(&mut b, &snapshot, &env, 0.05).unwrap();

        assert!(a.pos.distance(b.pos) > before);
    }

    #[test]
    fn step_order_does_not_matter() {
        let env = open_floor();
        let model = SocialForceModel::default();

        let make = |flip: bool| {
            let mut a = agent_at(5.0, 5.0);
            let mut b = AgentState::new(AgentId(1), Vec2::new(5.4, 5.0), 0.3, 60.0, 3.0);
            a.target = Some(Target::Point(Vec2::new(10.0, 5.0)));
            b.target = Some(Target::Point(Vec2::new(10.0, 5.0)));
            let snapshot = [a.snapshot(), b.snapshot()];
            if flip {
                model.step(&mut b, &snapshot, &env, 0.05).unwrap();
                model.step(&mut a, &snapshot, &env, 0.05).unwrap();
            } else {
                model.step(&mut a, &snapshot, &env, 0.05).unwrap();
                model.step(&mut b, &snapshot, &env, 0.05).unwrap();
            }
            (a.pos, b.pos)
        };

        let (a1, b1) = make(false);
        let (a2, b2) = make(true);
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
    }

    #[test]
    fn coincident_agents_stay_finite() {
        let env = open_floor();
        let model = SocialForceModel::default();

        let mut a = agent_at(5.0, 5.0);
        let b = AgentState::new(AgentId(1), Vec2::new(5.0, 5.0), 0.3, 60.0, 3.0);
        a.target = Some(Target::Point(Vec2::new(10.0, 5.0)));

        let snapshot = [a.snapshot(), b.snapshot()];
        model.step(&mut a, &snapshot, &env, 0.05).unwrap();

        assert!(a.pos.x.is_finite() && a.pos.y.is_finite());
        assert!(a.vel.x.is_finite() && a.vel.y.is_finite());
    }
}

#[cfg(test)]
mod walls {
    use super::*;
    use evac_env::Environment;

    fn floor_with_divider() -> FloorPlan {
        FloorPlan::new(
            10.0,
            10.0,
            vec![seg(5.0, 0.0, 5.0, 10.0)],
            vec![seg(0.0, 4.0, 0.0, 6.0)],
        )
        .expect("static test geometry is valid")
    }

    #[test]
    fn crossing_a_wall_is_resolved() {
        let env = floor_with_divider();
        let model = SocialForceModel::default();

        // Fast enough to punch through the divider in one large step,
        // starting far enough out that wall repulsion is negligible.
        let mut a = agent_at(4.0, 5.0).with_velocity(Vec2::new(3.0, 0.0));
        a.target = Some(Target::Point(Vec2::new(9.0, 5.0)));

        model.step(&mut a, &[], &env, 0.5).unwrap();

        // Pushed back to the starting side, no residual penetration, and
        // no velocity into the wall.
        assert!(a.pos.x < 5.0);
        assert!(env.walls()[0].distance_to(a.pos) >= a.radius);
        assert!(a.vel.x <= 1e-4);
    }

    #[test]
    fn wall_repulsion_acts_before_contact() {
        let env = floor_with_divider();
        let model = SocialForceModel::default();

        // At rest 0.05 outside body contact, within the personal-space
        // falloff; the target is the agent's own position so the driving
        // term vanishes and only wall repulsion remains.
        let mut a = agent_at(4.65, 5.0);
        a.target = Some(Target::Point(Vec2::new(4.65, 5.0)));

        model.step(&mut a, &[], &env, 0.05).unwrap();
        assert!(a.vel.x < 0.0);
    }
}
