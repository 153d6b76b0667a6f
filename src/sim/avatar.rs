//! The player avatar: a single-axis physics body
//!
//! Only `y` and the vertical velocity change during a run. The wing animation
//! runs on its own accumulator and never feeds back into gameplay.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner of the avatar box (x never changes)
    pub pos: Vec2,
    /// Box size
    pub size: Vec2,
    /// Vertical velocity (pixels/s, positive = down)
    pub velocity: f32,
    /// Obstacle hits are ignored while set (floor contact still ends the run)
    pub invincible: bool,
    /// Current wing frame index
    pub frame: usize,
    /// Time accumulated toward the next frame
    #[serde(default)]
    frame_time: f32,
}

impl Avatar {
    /// Create an avatar centered at the default x and the given y
    pub fn new(center_y: f32) -> Self {
        let size = Vec2::new(AVATAR_WIDTH, AVATAR_HEIGHT);
        let pos = Vec2::new(AVATAR_CENTER_X, center_y) - size / 2.0;
        Self {
            pos,
            size,
            velocity: 0.0,
            invincible: false,
            frame: 0,
            frame_time: 0.0,
        }
    }

    /// Bounding box for collision tests
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.pos + self.size)
    }

    /// Lowest allowed top edge for an arena of the given height
    pub fn floor(&self, arena_height: f32) -> f32 {
        (arena_height - self.size.y).max(0.0)
    }

    /// Kick upward
    pub fn flap(&mut self) {
        self.velocity = FLAP_VELOCITY;
    }

    /// Integrate one step. Returns true when the avatar touched the floor.
    ///
    /// Velocity is updated before position (semi-implicit Euler). The ceiling
    /// clamps position and zeroes velocity; the floor clamps position and
    /// reports the contact.
    pub fn tick(&mut self, dt: f32, floor: f32) -> bool {
        self.velocity += GRAVITY * dt;
        self.pos.y += self.velocity * dt;

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity = 0.0;
        }
        if self.pos.y > floor {
            self.pos.y = floor;
            return true;
        }
        false
    }

    /// Advance the wing animation (cosmetic only)
    pub fn animate(&mut self, dt: f32) {
        self.frame_time += dt;
        if self.frame_time >= AVATAR_FRAME_INTERVAL {
            self.frame_time = 0.0;
            self.frame = (self.frame + 1) % AVATAR_FRAMES;
        }
    }

    /// Display tilt in degrees; nose up while rising, down while falling
    pub fn rotation_degrees(&self) -> f32 {
        -self.velocity * AVATAR_TILT_FACTOR
    }
}
