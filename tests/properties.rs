use flipper_pinball::sim::{
    Ball, Bumper, GameState, InputState, Table, apply_flipper, resolve_bumper, tick,
};
use glam::Vec2;
use proptest::prelude::*;

fn any_input() -> impl Strategy<Value = InputState> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, launch_requested)| {
        InputState {
            left,
            right,
            launch_requested,
            restart_requested: false,
        }
    })
}

proptest! {
    #[test]
    fn score_never_decreases(seed in any::<u64>(), inputs in prop::collection::vec(any_input(), 1..400)) {
        let table = Table::default();
        let mut state = GameState::new(&table, seed);
        let mut last = state.score;
        for input in &inputs {
            let report = tick(&mut state, &table, input);
            prop_assert!(state.score >= last);
            prop_assert_eq!(state.score - last, report.score_delta);
            last = state.score;
        }
    }

    #[test]
    fn idle_ball_never_moves(seed in any::<u64>(), frames in 1usize..200, left in any::<bool>(), right in any::<bool>()) {
        let table = Table::default();
        let mut state = GameState::new(&table, seed);
        let ball = state.ball.clone();
        let input = InputState { left, right, ..Default::default() };
        for _ in 0..frames {
            tick(&mut state, &table, &input);
        }
        prop_assert_eq!(state.ball, ball);
    }

    #[test]
    fn ball_stays_inside_side_and_top_walls(
        x in 0.0f32..420.0,
        y in 0.0f32..600.0,
        vx in -40.0f32..40.0,
        vy in -40.0f32..40.0,
    ) {
        let table = Table::default();
        let mut state = GameState::new(&table, 1);
        state.launched = true;
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::new(vx, vy);

        tick(&mut state, &table, &InputState::default());

        let r = state.ball.radius;
        prop_assert!(state.ball.pos.x >= table.walls.left + r);
        prop_assert!(state.ball.pos.x <= table.walls.right - r);
        prop_assert!(state.ball.pos.y >= table.walls.top + r);
    }

    #[test]
    fn bumper_contact_lands_on_contact_circle(
        angle in 0.0f32..std::f32::consts::TAU,
        dist in 0.0f32..29.5,
        vx in -20.0f32..20.0,
        vy in -20.0f32..20.0,
    ) {
        let bumper = Bumper::new(210.0, 240.0, 20.0, 60);
        let offset = Vec2::new(angle.cos(), angle.sin()) * dist;
        let mut ball = Ball { pos: bumper.pos + offset, vel: Vec2::new(vx, vy), radius: 10.0 };
        let speed_before = ball.vel.length();

        let hit = resolve_bumper(&mut ball, &bumper, 1.2);
        prop_assert!(hit.is_some());
        prop_assert!(((ball.pos - bumper.pos).length() - 30.0).abs() < 1e-3);
        prop_assert!((ball.vel.length() - (speed_before + 1.2)).abs() < 1e-3);
    }

    #[test]
    fn flipper_kick_always_sends_ball_up(
        dx in -60.0f32..60.0,
        dy in -11.0f32..29.0,
        vx in -20.0f32..20.0,
        vy in -20.0f32..20.0,
    ) {
        let table = Table::default();
        for flipper in &table.flippers {
            let mut ball = Ball { pos: flipper.pivot + Vec2::new(dx, dy), vel: Vec2::new(vx, vy), radius: 10.0 };
            if apply_flipper(&mut ball, flipper, &table.tuning) {
                prop_assert!(ball.vel.y <= -4.0);
            }
        }
    }
}
