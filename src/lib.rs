//! Flipper Pinball - A small pinball table simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics step, collisions, game state)
//! - `input`: Key/pointer mapping into per-tick input
//! - `snapshot`: Read-only state for rendering and HUD
//! - `scheduler`: Host-frame or fixed-timestep tick driver
//! - `settings`: JSON configuration

pub mod input;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use input::InputTracker;
pub use scheduler::{FrameScheduler, TimingMode};
pub use settings::Settings;
pub use snapshot::Snapshot;

/// Default table constants
///
/// Velocities and accelerations are per frame, not per second: the table
/// was tuned against a display-refresh loop.
pub mod consts {
    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 420.0;
    pub const BOARD_HEIGHT: f32 = 640.0;
    /// Inset of the side and top walls from the board edge
    pub const WALL_INSET: f32 = 18.0;

    /// Downward acceleration added to vy every frame
    pub const GRAVITY: f32 = 0.25;
    /// Multiplicative velocity damping every frame
    pub const FRICTION: f32 = 0.995;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Start position sits this far above the bottom edge
    pub const BALL_START_OFFSET: f32 = 80.0;
    pub const START_BALLS: u32 = 3;

    /// Launch: straight up with a little horizontal jitter
    pub const LAUNCH_SPEED: f32 = 7.0;
    pub const LAUNCH_JITTER: f32 = 1.0;

    /// Velocity kept (and reversed) on a wall bounce
    pub const WALL_RESTITUTION: f32 = 0.9;
    /// Speed added on every bumper hit
    pub const BUMPER_BOOST: f32 = 1.2;

    /// Flipper defaults
    pub const FLIPPER_OFFSET_X: f32 = 90.0;
    pub const FLIPPER_OFFSET_Y: f32 = 90.0;
    pub const FLIPPER_WIDTH: f32 = 90.0;
    pub const FLIPPER_HEIGHT: f32 = 16.0;
    pub const FLIPPER_REST_ANGLE: f32 = 0.2;
    pub const FLIPPER_ACTIVE_ANGLE: f32 = 0.8;
    /// Capture radius is width / this
    pub const FLIPPER_CAPTURE_DIVISOR: f32 = 1.4;
    /// Vertical capture window relative to the pivot (exclusive)
    pub const FLIPPER_WINDOW_ABOVE: f32 = 12.0;
    pub const FLIPPER_WINDOW_BELOW: f32 = 30.0;
    pub const FLIPPER_UPWARD_KICK: f32 = 4.0;
    pub const FLIPPER_LATERAL_KICK: f32 = 2.4;
    pub const FLIPPER_POINTS: u64 = 10;
}
