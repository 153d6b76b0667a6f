//! Obstacles (paired bars with a gap) and the field that keeps them spaced

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Which bar of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarSide {
    Upper,
    Lower,
}

/// A pair of bars sharing a horizontal position, separated by a fixed gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Trailing (right) edge of both bars
    pub x: f32,
    /// Vertical center of the opening
    pub gap_center: f32,
    /// Set once the avatar has cleared this obstacle in the current pass
    pub passed: bool,
}

impl Obstacle {
    /// Create an obstacle with a random gap for an arena of the given height
    pub fn new<R: Rng>(id: u32, x: f32, arena_height: f32, rng: &mut R) -> Self {
        Self {
            id,
            x,
            gap_center: random_gap_center(arena_height, rng),
            passed: false,
        }
    }

    /// Leading (left) edge
    pub fn left(&self) -> f32 {
        self.x - PIPE_WIDTH
    }

    pub fn gap_top(&self) -> f32 {
        self.gap_center - PIPE_GAP / 2.0
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + PIPE_GAP / 2.0
    }

    /// Bounding box of one bar
    pub fn bar(&self, side: BarSide) -> Rect {
        match side {
            BarSide::Upper => Rect::from_xywh(
                self.left(),
                self.gap_top() - PIPE_HEIGHT,
                PIPE_WIDTH,
                PIPE_HEIGHT,
            ),
            BarSide::Lower => Rect::from_xywh(self.left(), self.gap_bottom(), PIPE_WIDTH, PIPE_HEIGHT),
        }
    }

    /// Scroll left. Returns true if the obstacle left the arena and was recycled.
    pub fn tick<R: Rng>(&mut self, dt: f32, arena_width: f32, arena_height: f32, rng: &mut R) -> bool {
        self.x -= PIPE_SPEED * dt;
        if self.x < 0.0 {
            self.recycle(arena_width, arena_height, rng);
            return true;
        }
        false
    }

    /// Re-enter from the right edge with a fresh gap
    pub fn recycle<R: Rng>(&mut self, arena_width: f32, arena_height: f32, rng: &mut R) {
        self.x = arena_width + PIPE_WIDTH;
        self.gap_center = random_gap_center(arena_height, rng);
        self.passed = false;
    }
}

/// Lowest and highest gap centers that keep the whole opening on screen
pub fn gap_center_band(arena_height: f32) -> (f32, f32) {
    let lo = PIPE_GAP * 1.5;
    let hi = (arena_height - PIPE_GAP / 2.0).max(lo);
    (lo, hi)
}

fn random_gap_center<R: Rng>(arena_height: f32, rng: &mut R) -> f32 {
    let (lo, hi) = gap_center_band(arena_height);
    rng.random_range(lo..=hi)
}

/// Ordered obstacles, front = nearest to the avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    pub min_spacing: f32,
}

impl ObstacleField {
    /// Lay out `count` obstacles off the right edge, `PIPE_MIN_SPACING` apart
    pub fn new<R: Rng>(count: usize, arena_width: f32, arena_height: f32, rng: &mut R) -> Self {
        let obstacles = (0..count)
            .map(|i| {
                let center = arena_width + i as f32 * PIPE_MIN_SPACING;
                Obstacle::new(i as u32, center + PIPE_WIDTH / 2.0, arena_height, rng)
            })
            .collect();
        Self {
            obstacles,
            min_spacing: PIPE_MIN_SPACING,
        }
    }

    /// Build a field from explicit obstacles (front first)
    pub fn from_obstacles(obstacles: Vec<Obstacle>, min_spacing: f32) -> Self {
        Self {
            obstacles,
            min_spacing,
        }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Scroll every obstacle, move recycled ones to the back, then enforce spacing.
    /// Returns the number of obstacles recycled this tick.
    pub fn tick<R: Rng>(&mut self, dt: f32, arena_width: f32, arena_height: f32, rng: &mut R) -> usize {
        let recycled: Vec<bool> = self
            .obstacles
            .iter_mut()
            .map(|o| o.tick(dt, arena_width, arena_height, rng))
            .collect();

        let count = recycled.iter().filter(|&&r| r).count();
        if count > 0 {
            // Stable partition keeps relative order within both groups
            let mut flags = recycled.into_iter();
            let (mut keep, wrapped): (Vec<_>, Vec<_>) = self
                .obstacles
                .drain(..)
                .partition(|_| !flags.next().unwrap_or(false));
            keep.extend(wrapped);
            self.obstacles = keep;
        }

        self.enforce_spacing();
        count
    }

    /// Push trailing obstacles forward until every adjacent pair is at least
    /// `min_spacing` apart. Never pulls an obstacle backward.
    pub fn enforce_spacing(&mut self) {
        for i in 1..self.obstacles.len() {
            let min_x = self.obstacles[i - 1].x + self.min_spacing;
            if self.obstacles[i].x - self.obstacles[i - 1].x < self.min_spacing {
                self.obstacles[i].x = min_x;
            }
        }
    }

    /// Mark obstacles whose trailing edge is behind `avatar_left` as passed.
    /// Returns how many transitioned this call.
    pub fn mark_passed(&mut self, avatar_left: f32) -> u32 {
        let mut newly_passed = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.x < avatar_left {
                obstacle.passed = true;
                newly_passed += 1;
            }
        }
        newly_passed
    }

    /// The first obstacle the avatar has not cleared yet
    pub fn next_ahead(&self, avatar_left: f32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.x >= avatar_left)
    }
}
