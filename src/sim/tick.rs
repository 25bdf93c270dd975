//! Per-frame simulation tick
//!
//! Core game loop step that advances the simulation deterministically. The
//! order of operations matters for reproducing trajectories:
//! gravity, friction, integrate, walls, bumpers, flippers, drain.

use super::collision::{apply_flipper, resolve_bumper, resolve_walls};
use super::state::{GameEvent, GameState, Wall};
use super::table::{FlipperSide, Table};

/// Input commands for a single tick (sampled once, at the start)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Left flipper held
    pub left: bool,
    /// Right flipper held
    pub right: bool,
    /// Launch the waiting ball (space/click)
    pub launch_requested: bool,
    /// Full restart (restart button)
    pub restart_requested: bool,
}

/// What a tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Points gained this tick
    pub score_delta: u64,
    pub events: Vec<GameEvent>,
}

impl StepReport {
    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Fold a later report into this one
    pub fn merge(&mut self, other: StepReport) {
        self.score_delta += other.score_delta;
        self.events.extend(other.events);
    }

    pub fn is_empty(&self) -> bool {
        self.score_delta == 0 && self.events.is_empty()
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, table: &Table, input: &InputState) -> StepReport {
    let mut report = StepReport::default();

    if input.restart_requested {
        state.restart(table);
        report.push(GameEvent::Restarted);
    }

    // Game over: nothing moves, flippers don't even follow the keys
    if !state.running {
        return report;
    }

    state.time_ticks += 1;
    state.set_flippers(input.left, input.right);

    if input.launch_requested {
        if let Some(event) = state.launch(table) {
            report.push(event);
        }
    }

    if state.launched {
        step_physics(state, table, &mut report);
    }

    report
}

/// One physics step on a launched ball
fn step_physics(state: &mut GameState, table: &Table, report: &mut StepReport) {
    let board = &table.board;
    let tuning = &table.tuning;
    let ball = &mut state.ball;

    ball.vel.y += board.gravity;
    ball.vel *= board.friction;
    ball.pos += ball.vel;

    let hits = resolve_walls(ball, &table.walls, tuning.wall_restitution);
    for (hit, wall) in [
        (hits.left, Wall::Left),
        (hits.right, Wall::Right),
        (hits.top, Wall::Top),
    ] {
        if hit {
            report.push(GameEvent::WallBounce { wall });
        }
    }

    // Every bumper, in list order, against wherever the ball is now
    let mut points = 0;
    for (index, bumper) in table.bumpers.iter().enumerate() {
        if let Some(hit) = resolve_bumper(ball, bumper, tuning.bumper_boost) {
            log::debug!(
                "Bumper {} hit, leaving at speed {:.2} (+{})",
                index,
                hit.speed,
                bumper.score
            );
            points += bumper.score;
            report.push(GameEvent::BumperHit {
                index,
                points: bumper.score,
            });
        }
    }

    for flipper in &table.flippers {
        let held = match flipper.side {
            FlipperSide::Left => state.left_active,
            FlipperSide::Right => state.right_active,
        };
        if held && apply_flipper(ball, flipper, tuning) {
            log::debug!("{} flipper kick, vel now {:?}", flipper.side.as_str(), ball.vel);
            points += tuning.flipper_points;
            report.push(GameEvent::FlipperKick {
                side: flipper.side,
                points: tuning.flipper_points,
            });
        }
    }

    let drained = ball.pos.y - ball.radius > board.height;
    log::trace!(
        "tick {}: pos={:?} vel={:?}",
        state.time_ticks,
        ball.pos,
        ball.vel
    );

    state.award(points);
    report.score_delta += points;

    if drained {
        let game_over = state.drain(table);
        report.push(GameEvent::BallDrained {
            remaining: state.balls,
        });
        if game_over {
            report.push(GameEvent::GameOver {
                final_score: state.score,
            });
        }
    }
}
