//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (bumper list order, left flipper before right)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod collision;
pub mod state;
pub mod table;
pub mod tick;

pub use collision::{BumperHit, WallHits, apply_flipper, resolve_bumper, resolve_walls};
pub use state::{Ball, GameEvent, GamePhase, GameState, RngState, Wall};
pub use table::{Board, Bumper, Flipper, FlipperSide, Table, Tuning, Walls};
pub use tick::{InputState, StepReport, tick};
