//! Game state and core simulation types
//!
//! Everything that changes between frames lives here; the table it runs
//! against does not.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::table::{FlipperSide, Table};

/// Where the match is, derived from `launched` and `running`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at the start position, waiting for a launch input
    Idle,
    /// Ball in play
    Launched,
    /// Out of balls; only a restart leaves this phase
    GameOver,
}

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched { vx: f32, vy: f32 },
    WallBounce { wall: Wall },
    /// `index` is the bumper's position in the table's bumper list
    BumperHit { index: usize, points: u64 },
    FlipperKick { side: FlipperSide, points: u64 },
    BallDrained { remaining: u32 },
    GameOver { final_score: u64 },
    Restarted,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A ball sitting still at `pos`
    pub fn at_rest(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// RNG state wrapper for serialization
///
/// Each draw builds a fresh PCG stream from `(seed, stream)` and then bumps
/// `stream`, so the sequence survives a serialize/deserialize round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }

    /// Uniform draw in `[-amplitude, amplitude]`
    pub fn next_symmetric(&mut self, amplitude: f32) -> f32 {
        let mut rng = self.to_rng();
        self.stream = self.stream.wrapping_add(1);
        if amplitude <= 0.0 {
            return 0.0;
        }
        rng.random_range(-amplitude..=amplitude)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Only ever increases, except on restart
    pub score: u64,
    /// Balls left, including the one in play
    pub balls: u32,
    /// False exactly while the ball waits at the start position
    pub launched: bool,
    /// False once the last ball drains
    pub running: bool,
    pub left_active: bool,
    pub right_active: bool,
    pub ball: Ball,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh game on `table`
    pub fn new(table: &Table, seed: u64) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            score: 0,
            balls: table.start_balls,
            launched: false,
            running: true,
            left_active: false,
            right_active: false,
            ball: Ball::at_rest(table.ball_start(), table.ball_radius),
            time_ticks: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if !self.running {
            GamePhase::GameOver
        } else if self.launched {
            GamePhase::Launched
        } else {
            GamePhase::Idle
        }
    }

    pub fn is_flipper_active(&self, side: FlipperSide) -> bool {
        match side {
            FlipperSide::Left => self.left_active,
            FlipperSide::Right => self.right_active,
        }
    }

    pub fn set_flippers(&mut self, left: bool, right: bool) {
        self.left_active = left;
        self.right_active = right;
    }

    /// Add points. Score is monotone, so there's no way to take them back.
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Put the ball back at the start position and wait for a launch
    pub fn reset_ball(&mut self, table: &Table) {
        self.ball = Ball::at_rest(table.ball_start(), table.ball_radius);
        self.launched = false;
    }

    /// Send the ball up with a little horizontal jitter.
    ///
    /// Returns the launch event, or `None` if the ball is already in play or
    /// the game is over.
    pub fn launch(&mut self, table: &Table) -> Option<GameEvent> {
        if self.launched || !self.running {
            return None;
        }
        let vx = self.rng_state.next_symmetric(table.tuning.launch_jitter);
        let vy = -table.tuning.launch_speed;
        self.ball.vel = Vec2::new(vx, vy);
        self.launched = true;
        log::info!("Ball launched (vx={:.3}, vy={:.3})", vx, vy);
        Some(GameEvent::Launched { vx, vy })
    }

    /// Lose the ball in play. Returns true if that was the last one.
    pub fn drain(&mut self, table: &Table) -> bool {
        self.balls = self.balls.saturating_sub(1);
        if self.balls == 0 {
            // Ball stays where it drained; restart puts it back
            self.running = false;
            log::info!("Game over, final score {}", self.score);
            true
        } else {
            log::info!("Ball drained, {} left", self.balls);
            self.reset_ball(table);
            false
        }
    }

    /// Full restart: fresh score, fresh balls, ball back at the start.
    ///
    /// The RNG keeps running so consecutive games don't repeat launches.
    pub fn restart(&mut self, table: &Table) {
        self.score = 0;
        self.balls = table.start_balls;
        self.running = true;
        self.set_flippers(false, false);
        self.reset_ball(table);
        log::info!("Game restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let table = Table::default();
        let state = GameState::new(&table, 7);
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.balls, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.pos, Vec2::new(210.0, 560.0));
        assert_eq!(state.ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_launch_sets_velocity() {
        let table = Table::default();
        let mut state = GameState::new(&table, 7);

        let event = state.launch(&table);
        assert!(matches!(event, Some(GameEvent::Launched { .. })));
        assert!(state.launched);
        assert_eq!(state.ball.vel.y, -7.0);
        assert!((-1.0..=1.0).contains(&state.ball.vel.x));
        assert_eq!(state.phase(), GamePhase::Launched);
    }

    #[test]
    fn test_launch_ignored_when_in_play_or_over() {
        let table = Table::default();
        let mut state = GameState::new(&table, 7);
        state.launch(&table);
        let vel = state.ball.vel;
        assert!(state.launch(&table).is_none());
        assert_eq!(state.ball.vel, vel);

        let mut over = GameState::new(&table, 7);
        over.running = false;
        assert!(over.launch(&table).is_none());
        assert!(!over.launched);
    }

    #[test]
    fn test_launch_jitter_varies_between_launches() {
        let table = Table::default();
        let mut state = GameState::new(&table, 42);
        let mut seen = Vec::new();
        for _ in 0..4 {
            state.launch(&table);
            seen.push(state.ball.vel.x);
            state.reset_ball(&table);
        }
        assert!(seen.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_serialized_state_resumes_identically() {
        let table = Table::default();
        let mut state = GameState::new(&table, 31337);
        state.launch(&table);
        state.reset_ball(&table);

        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);

        state.launch(&table);
        restored.launch(&table);
        assert_eq!(restored.ball.vel, state.ball.vel);
    }

    #[test]
    fn test_drain_last_ball_ends_game() {
        let table = Table::default();
        let mut state = GameState::new(&table, 1);
        state.balls = 1;
        state.launched = true;
        assert!(state.drain(&table));
        assert_eq!(state.balls, 0);
        assert_eq!(state.phase(), GamePhase::GameOver);

        // Never goes below zero
        state.drain(&table);
        assert_eq!(state.balls, 0);
    }

    #[test]
    fn test_restart_from_game_over() {
        let table = Table::default();
        let mut state = GameState::new(&table, 1);
        state.score = 500;
        state.balls = 0;
        state.running = false;
        state.left_active = true;

        state.restart(&table);
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.balls, 3);
        assert!(!state.left_active);
        assert_eq!(state.ball.pos, table.ball_start());
    }
}
