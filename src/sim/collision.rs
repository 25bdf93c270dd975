//! Collision detection and response
//!
//! Three kinds of contact, each a pure function of the ball and one piece of
//! table geometry:
//! - walls: clamp back inside and reverse with some energy loss
//! - bumpers: snap onto the contact circle and fire outward with a boost
//! - flippers: no contact geometry at all, just a velocity kick inside a
//!   capture window around the rest pivot

use glam::Vec2;

use super::state::Ball;
use super::table::{Bumper, Flipper, Tuning, Walls};

/// Which walls were hit during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Result of a bumper contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumperHit {
    /// Outward unit normal from the bumper center at contact
    pub normal: Vec2,
    /// Speed the ball leaves with
    pub speed: f32,
}

/// Push the ball back inside the side and top walls.
///
/// Left is checked before right, then top. There is no bottom wall.
pub fn resolve_walls(ball: &mut Ball, walls: &Walls, restitution: f32) -> WallHits {
    let mut hits = WallHits::default();

    if ball.pos.x - ball.radius < walls.left {
        ball.pos.x = walls.left + ball.radius;
        ball.vel.x *= -restitution;
        hits.left = true;
    }
    if ball.pos.x + ball.radius > walls.right {
        ball.pos.x = walls.right - ball.radius;
        ball.vel.x *= -restitution;
        hits.right = true;
    }
    if ball.pos.y - ball.radius < walls.top {
        ball.pos.y = walls.top + ball.radius;
        ball.vel.y *= -restitution;
        hits.top = true;
    }

    hits
}

/// Bounce the ball off a bumper if they overlap.
///
/// This is not an elastic reflection: the incoming direction is thrown away
/// and the ball leaves along the contact normal at its current speed plus
/// `boost`. A ball sitting exactly on the bumper center leaves along +x.
pub fn resolve_bumper(ball: &mut Ball, bumper: &Bumper, boost: f32) -> Option<BumperHit> {
    let delta = ball.pos - bumper.pos;
    let contact = ball.radius + bumper.radius;
    if delta.length() >= contact {
        return None;
    }

    let angle = delta.y.atan2(delta.x);
    let normal = Vec2::new(angle.cos(), angle.sin());
    let speed = ball.speed() + boost;

    ball.pos = bumper.pos + normal * contact;
    ball.vel = normal * speed;

    Some(BumperHit { normal, speed })
}

/// Whether the ball is inside a flipper's capture window
pub fn in_flipper_window(ball: &Ball, flipper: &Flipper, tuning: &Tuning) -> bool {
    let delta = ball.pos - flipper.pivot;
    delta.length() < flipper.capture_radius(tuning)
        && delta.y > -tuning.flipper_window_above
        && delta.y < tuning.flipper_window_below
}

/// Kick the ball upward (and sideways) if it's in the flipper's window.
///
/// The caller decides whether the flipper is held. Position is left alone,
/// so two overlapping windows stack their kicks.
pub fn apply_flipper(ball: &mut Ball, flipper: &Flipper, tuning: &Tuning) -> bool {
    if !in_flipper_window(ball, flipper, tuning) {
        return false;
    }
    ball.vel.y = -ball.vel.y.abs() - tuning.flipper_upward_kick;
    ball.vel.x += flipper.side.direction() * tuning.flipper_lateral_kick;
    true
}
