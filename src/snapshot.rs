//! Read-only view of the game for rendering and the HUD
//!
//! Plain data, cheap to clone and serialize. Nothing here feeds back into
//! the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{FlipperSide, GamePhase, GameState, Table};

/// Text shown on the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HudMessage {
    Ready,
    GameOver,
}

impl HudMessage {
    pub fn text(&self) -> &'static str {
        match self {
            HudMessage::Ready => "Press Space to launch. Arrow keys or A/D flip.",
            HudMessage::GameOver => "Game over. Click restart to play again.",
        }
    }
}

/// Overlay shown while the ball waits or after the game ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudOverlay {
    pub visible: bool,
    pub message: HudMessage,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlipperView {
    pub side: FlipperSide,
    pub pivot: Vec2,
    pub width: f32,
    pub height: f32,
    /// Drawn rotation (the physics ignores it)
    pub angle: f32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BumperView {
    pub pos: Vec2,
    pub radius: f32,
    pub score: u64,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub balls: u32,
    pub running: bool,
    pub ball: BallView,
    pub flippers: Vec<FlipperView>,
    pub bumpers: Vec<BumperView>,
    pub hud: HudOverlay,
}

impl Snapshot {
    pub fn capture(state: &GameState, table: &Table) -> Self {
        let message = if state.running {
            HudMessage::Ready
        } else {
            HudMessage::GameOver
        };

        Self {
            tick: state.time_ticks,
            phase: state.phase(),
            score: state.score,
            balls: state.balls,
            running: state.running,
            ball: BallView {
                pos: state.ball.pos,
                radius: state.ball.radius,
            },
            flippers: table
                .flippers
                .iter()
                .map(|f| {
                    let active = state.is_flipper_active(f.side);
                    FlipperView {
                        side: f.side,
                        pivot: f.pivot,
                        width: f.width,
                        height: f.height,
                        angle: f.visual_angle(active),
                        active,
                    }
                })
                .collect(),
            bumpers: table
                .bumpers
                .iter()
                .map(|b| BumperView {
                    pos: b.pos,
                    radius: b.radius,
                    score: b.score,
                })
                .collect(),
            hud: HudOverlay {
                visible: !state.launched || !state.running,
                message,
                text: message.text(),
            },
        }
    }

    /// One-line status for logs and terminals
    pub fn status_line(&self) -> String {
        format!(
            "tick {:>6} | score {:>6} | balls {} | {:?}",
            self.tick, self.score, self.balls, self.phase
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_idle_shows_ready_overlay() {
        let table = Table::default();
        let state = GameState::new(&table, 1);
        let snap = Snapshot::capture(&state, &table);

        assert!(snap.hud.visible);
        assert_eq!(snap.hud.message, HudMessage::Ready);
        assert_eq!(snap.bumpers.len(), 5);
        assert_eq!(snap.flippers[0].angle, -0.2);
        assert_eq!(snap.ball.pos, table.ball_start());
    }

    #[test]
    fn test_snapshot_hides_overlay_in_play() {
        let table = Table::default();
        let mut state = GameState::new(&table, 1);
        state.launch(&table);
        state.set_flippers(true, false);
        let snap = Snapshot::capture(&state, &table);

        assert!(!snap.hud.visible);
        assert!(snap.flippers[0].active);
        assert_eq!(snap.flippers[0].angle, -0.8);
        assert_eq!(snap.flippers[1].angle, 0.2);
    }

    #[test]
    fn test_snapshot_game_over() {
        let table = Table::default();
        let mut state = GameState::new(&table, 1);
        state.launched = true;
        state.running = false;
        state.balls = 0;
        let snap = Snapshot::capture(&state, &table);

        assert!(snap.hud.visible);
        assert_eq!(snap.hud.message, HudMessage::GameOver);
        assert_eq!(snap.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_snapshot_serializes() {
        let table = Table::default();
        let state = GameState::new(&table, 1);
        let json = serde_json::to_string(&Snapshot::capture(&state, &table)).unwrap();
        assert!(json.contains("\"Ready\""));
        assert!(json.contains("\"balls\":3"));
    }
}
