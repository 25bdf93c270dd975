//! Demo autopilot
//!
//! Produces the input a very patient player would: launch whenever the ball
//! is waiting, and hold a flipper only while a falling ball is in (or one
//! frame from) its capture window.

use super::collision::in_flipper_window;
use super::state::{Ball, GameState};
use super::table::{FlipperSide, Table};
use super::tick::InputState;

/// Pick this frame's input for `state`
pub fn drive(state: &GameState, table: &Table) -> InputState {
    let mut input = InputState::default();
    if !state.running {
        return input;
    }
    if !state.launched {
        input.launch_requested = true;
        return input;
    }

    let ball = &state.ball;
    if ball.vel.y <= 0.0 {
        return input;
    }

    // Where the ball will be after the next integration step
    let next = Ball {
        pos: ball.pos + (ball.vel + glam::Vec2::Y * table.board.gravity) * table.board.friction,
        vel: ball.vel,
        radius: ball.radius,
    };

    for flipper in &table.flippers {
        let hold = in_flipper_window(ball, flipper, &table.tuning)
            || in_flipper_window(&next, flipper, &table.tuning);
        match flipper.side {
            FlipperSide::Left => input.left = hold,
            FlipperSide::Right => input.right = hold,
        }
    }

    input
}
