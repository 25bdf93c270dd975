//! The pinball table: board, walls, bumpers, flippers and tuning
//!
//! A `Table` is immutable for a session. `GameState` holds everything that
//! changes from frame to frame.

use anyhow::{Result, bail};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Board rectangle and the per-frame forces acting on the ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    pub width: f32,
    pub height: f32,
    /// Added to vy every frame
    pub gravity: f32,
    /// Velocity multiplier every frame (< 1 damps)
    pub friction: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            gravity: GRAVITY,
            friction: FRICTION,
        }
    }
}

/// Side and top walls. The bottom is open: that's the drain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Walls {
    pub left: f32,
    pub right: f32,
    pub top: f32,
}

impl Walls {
    /// Walls inset by `inset` from the left, right and top board edges
    pub fn inset(board: &Board, inset: f32) -> Self {
        Self {
            left: inset,
            right: board.width - inset,
            top: inset,
        }
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::inset(&Board::default(), WALL_INSET)
    }
}

/// A fixed circular obstacle that scores on contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bumper {
    pub pos: Vec2,
    pub radius: f32,
    pub score: u64,
}

impl Bumper {
    pub fn new(x: f32, y: f32, radius: f32, score: u64) -> Self {
        Self {
            pos: Vec2::new(x, y),
            radius,
            score,
        }
    }
}

/// Which flipper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipperSide {
    Left,
    Right,
}

impl FlipperSide {
    /// Sign of the lateral kick this flipper gives the ball
    pub fn direction(self) -> f32 {
        match self {
            FlipperSide::Left => -1.0,
            FlipperSide::Right => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlipperSide::Left => "left",
            FlipperSide::Right => "right",
        }
    }
}

/// Flipper geometry. Whether it is held lives in `GameState`.
///
/// Physics never rotates the flipper: the capture window is always measured
/// from the rest pivot. The angles only matter to whoever draws it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flipper {
    pub side: FlipperSide,
    pub pivot: Vec2,
    pub width: f32,
    pub height: f32,
    pub rest_angle: f32,
    pub active_angle: f32,
}

impl Flipper {
    /// Default flipper for `side`, placed symmetrically about the board center
    pub fn for_board(board: &Board, side: FlipperSide) -> Self {
        let dir = side.direction();
        Self {
            side,
            pivot: Vec2::new(
                board.width / 2.0 + dir * FLIPPER_OFFSET_X,
                board.height - FLIPPER_OFFSET_Y,
            ),
            width: FLIPPER_WIDTH,
            height: FLIPPER_HEIGHT,
            rest_angle: dir * FLIPPER_REST_ANGLE,
            active_angle: dir * FLIPPER_ACTIVE_ANGLE,
        }
    }

    /// Drawn rotation for the given held state
    pub fn visual_angle(&self, active: bool) -> f32 {
        if active {
            self.active_angle
        } else {
            self.rest_angle
        }
    }

    /// Radius around the pivot inside which a held flipper kicks the ball
    #[inline]
    pub fn capture_radius(&self, tuning: &Tuning) -> f32 {
        self.width / tuning.flipper_capture_divisor
    }
}

/// Per-interaction constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub wall_restitution: f32,
    pub bumper_boost: f32,
    pub flipper_capture_divisor: f32,
    pub flipper_window_above: f32,
    pub flipper_window_below: f32,
    pub flipper_upward_kick: f32,
    pub flipper_lateral_kick: f32,
    pub flipper_points: u64,
    pub launch_speed: f32,
    pub launch_jitter: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            wall_restitution: WALL_RESTITUTION,
            bumper_boost: BUMPER_BOOST,
            flipper_capture_divisor: FLIPPER_CAPTURE_DIVISOR,
            flipper_window_above: FLIPPER_WINDOW_ABOVE,
            flipper_window_below: FLIPPER_WINDOW_BELOW,
            flipper_upward_kick: FLIPPER_UPWARD_KICK,
            flipper_lateral_kick: FLIPPER_LATERAL_KICK,
            flipper_points: FLIPPER_POINTS,
            launch_speed: LAUNCH_SPEED,
            launch_jitter: LAUNCH_JITTER,
        }
    }
}

/// The immutable environment every tick runs against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub board: Board,
    pub walls: Walls,
    pub ball_radius: f32,
    /// Checked in this order every frame
    pub bumpers: Vec<Bumper>,
    /// Left, then right
    pub flippers: [Flipper; 2],
    pub tuning: Tuning,
    pub start_balls: u32,
}

impl Default for Table {
    fn default() -> Self {
        let board = Board::default();
        Self {
            walls: Walls::inset(&board, WALL_INSET),
            ball_radius: BALL_RADIUS,
            bumpers: vec![
                Bumper::new(120.0, 140.0, 18.0, 50),
                Bumper::new(300.0, 160.0, 22.0, 75),
                Bumper::new(210.0, 240.0, 20.0, 60),
                Bumper::new(150.0, 320.0, 18.0, 40),
                Bumper::new(280.0, 340.0, 18.0, 40),
            ],
            flippers: [
                Flipper::for_board(&board, FlipperSide::Left),
                Flipper::for_board(&board, FlipperSide::Right),
            ],
            tuning: Tuning::default(),
            start_balls: START_BALLS,
            board,
        }
    }
}

impl Table {
    /// Where the ball waits for launch
    pub fn ball_start(&self) -> Vec2 {
        Vec2::new(
            self.board.width / 2.0,
            self.board.height - BALL_START_OFFSET,
        )
    }

    pub fn flipper(&self, side: FlipperSide) -> &Flipper {
        match side {
            FlipperSide::Left => &self.flippers[0],
            FlipperSide::Right => &self.flippers[1],
        }
    }

    /// Reject tables the physics step can't make sense of
    pub fn validate(&self) -> Result<()> {
        self.check_finite()?;
        let b = &self.board;
        if !(b.width > 0.0 && b.height > 0.0) {
            bail!("board must have positive size, got {}x{}", b.width, b.height);
        }
        if !(b.friction > 0.0 && b.friction <= 1.0) {
            bail!("friction must be in (0, 1], got {}", b.friction);
        }
        if !(self.ball_radius > 0.0) {
            bail!("ball radius must be positive, got {}", self.ball_radius);
        }
        let w = &self.walls;
        if !(0.0 <= w.left && w.left < w.right && w.right <= b.width) {
            bail!(
                "side walls must satisfy 0 <= left < right <= {}, got left={} right={}",
                b.width,
                w.left,
                w.right
            );
        }
        if !(0.0 <= w.top && w.top < b.height) {
            bail!("top wall must be inside the board, got {}", w.top);
        }
        if w.right - w.left <= 2.0 * self.ball_radius {
            bail!("ball (r={}) doesn't fit between the walls", self.ball_radius);
        }
        for (i, bumper) in self.bumpers.iter().enumerate() {
            if !(bumper.radius > 0.0) {
                bail!("bumper {i} must have a positive radius");
            }
            let inside = bumper.pos.x - bumper.radius >= w.left
                && bumper.pos.x + bumper.radius <= w.right
                && bumper.pos.y - bumper.radius >= w.top
                && bumper.pos.y + bumper.radius <= b.height;
            if !inside {
                bail!("bumper {i} at {:?} pokes outside the walls", bumper.pos);
            }
        }
        if self.flippers[0].side != FlipperSide::Left || self.flippers[1].side != FlipperSide::Right
        {
            bail!("flippers must be listed left then right");
        }
        if !(self.tuning.flipper_capture_divisor > 0.0) {
            bail!("flipper capture divisor must be positive");
        }
        let jitter = self.tuning.launch_jitter;
        if !(jitter >= 0.0 && (2.0 * jitter).is_finite()) {
            bail!("launch jitter must be >= 0 and leave a finite range, got {}", jitter);
        }
        if self.start_balls == 0 {
            bail!("a game needs at least one ball");
        }
        Ok(())
    }
}

impl Table {
    /// Every float the step reads must be finite. JSON like `1e39` parses
    /// to infinity for an f32 field.
    fn check_finite(&self) -> Result<()> {
        let b = &self.board;
        let w = &self.walls;
        let t = &self.tuning;
        let fields = [
            ("board.width", b.width),
            ("board.height", b.height),
            ("board.gravity", b.gravity),
            ("board.friction", b.friction),
            ("walls.left", w.left),
            ("walls.right", w.right),
            ("walls.top", w.top),
            ("ball_radius", self.ball_radius),
            ("tuning.wall_restitution", t.wall_restitution),
            ("tuning.bumper_boost", t.bumper_boost),
            ("tuning.flipper_capture_divisor", t.flipper_capture_divisor),
            ("tuning.flipper_window_above", t.flipper_window_above),
            ("tuning.flipper_window_below", t.flipper_window_below),
            ("tuning.flipper_upward_kick", t.flipper_upward_kick),
            ("tuning.flipper_lateral_kick", t.flipper_lateral_kick),
            ("tuning.launch_speed", t.launch_speed),
            ("tuning.launch_jitter", t.launch_jitter),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                bail!("{name} must be finite, got {value}");
            }
        }
        for (i, bumper) in self.bumpers.iter().enumerate() {
            if !(bumper.pos.is_finite() && bumper.radius.is_finite()) {
                bail!("bumper {i} must have finite position and radius");
            }
        }
        for flipper in &self.flippers {
            let finite = flipper.pivot.is_finite()
                && flipper.width.is_finite()
                && flipper.height.is_finite()
                && flipper.rest_angle.is_finite()
                && flipper.active_angle.is_finite();
            if !finite {
                bail!("{} flipper geometry must be finite", flipper.side.as_str());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = Table::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.bumpers.len(), 5);
        assert_eq!(table.walls.right, BOARD_WIDTH - WALL_INSET);
    }

    #[test]
    fn test_flipper_layout() {
        let table = Table::default();
        let left = table.flipper(FlipperSide::Left);
        let right = table.flipper(FlipperSide::Right);
        assert_eq!(left.pivot, Vec2::new(120.0, 550.0));
        assert_eq!(right.pivot, Vec2::new(300.0, 550.0));
        assert_eq!(left.rest_angle, -0.2);
        assert_eq!(right.visual_angle(true), 0.8);
        assert!((left.capture_radius(&table.tuning) - 90.0 / 1.4).abs() < 1e-5);
    }

    #[test]
    fn test_ball_start() {
        let table = Table::default();
        assert_eq!(table.ball_start(), Vec2::new(210.0, 560.0));
    }

    #[test]
    fn test_validate_rejects_bad_friction() {
        let mut table = Table::default();
        table.board.friction = 1.5;
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("friction"));
    }

    #[test]
    fn test_validate_rejects_bumper_outside_walls() {
        let mut table = Table::default();
        table.bumpers.push(Bumper::new(5.0, 200.0, 18.0, 10));
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_tuning() {
        let mut table = Table::default();
        table.tuning.launch_jitter = f32::INFINITY;
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("tuning.launch_jitter"));

        // Finite, but 2 * jitter overflows the sampling range
        let mut table = Table::default();
        table.tuning.launch_jitter = f32::MAX;
        assert!(table.validate().is_err());

        let mut table = Table::default();
        table.tuning.launch_jitter = -1.0;
        assert!(table.validate().is_err());

        let mut table = Table::default();
        table.board.gravity = f32::NAN;
        assert!(table.validate().is_err());

        let mut table = Table::default();
        table.tuning.bumper_boost = f32::NEG_INFINITY;
        assert!(table.validate().is_err());

        let mut table = Table::default();
        table.flippers[1].pivot.x = f32::INFINITY;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_swapped_flippers() {
        let mut table = Table::default();
        table.flippers.swap(0, 1);
        assert!(table.validate().is_err());
    }
}
