//! Collectible power-ups and their timed effects

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Doubles the score on pickup and awards 2 per obstacle while active
    DoublePoints,
    /// Obstacle collisions are ignored while active
    Invincibility,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::DoublePoints, PowerUpKind::Invincibility];

    /// Effect duration in seconds
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::DoublePoints => DOUBLE_POINTS_DURATION,
            PowerUpKind::Invincibility => INVINCIBILITY_DURATION,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::DoublePoints => "double_points",
            PowerUpKind::Invincibility => "invincibility",
        }
    }
}

/// How a newly collected effect interacts with the ones already running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EffectPolicy {
    /// One slot: the new effect replaces the old type and timer
    #[default]
    Overwrite,
    /// One timer per kind; collecting a running kind refreshes its timer
    Stack,
}

/// How the per-tick spawn roll is computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnModel {
    /// Fixed chance each tick regardless of dt (spawn rate follows frame rate)
    PerTick { chance: f64 },
    /// Poisson arrivals: chance = 1 - exp(-rate * dt), rate in spawns/s
    TimeScaled { rate: f64 },
}

impl Default for SpawnModel {
    fn default() -> Self {
        SpawnModel::PerTick {
            chance: POWER_UP_SPAWN_CHANCE,
        }
    }
}

impl SpawnModel {
    /// Time-scaled model with the same average rate as the per-tick default at the frame cap
    pub fn time_scaled_default() -> Self {
        SpawnModel::TimeScaled {
            rate: POWER_UP_SPAWN_CHANCE * MAX_FPS as f64,
        }
    }

    /// Spawn probability for a tick of length `dt`
    pub fn chance(&self, dt: f32) -> f64 {
        match *self {
            SpawnModel::PerTick { chance } => chance.clamp(0.0, 1.0),
            SpawnModel::TimeScaled { rate } => (1.0 - (-rate.max(0.0) * dt.max(0.0) as f64).exp()).clamp(0.0, 1.0),
        }
    }
}

/// A collectible entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Center position
    pub pos: Vec2,
}

impl PowerUp {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(POWER_UP_SIZE))
    }
}

/// A running timed effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    /// Seconds left, never negative
    pub remaining: f32,
}

/// Spawns power-ups and tracks active effect timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpManager {
    /// Uncollected power-ups on screen
    pub pickups: Vec<PowerUp>,
    /// Active effects (at most one under `EffectPolicy::Overwrite`)
    pub effects: Vec<ActiveEffect>,
    pub policy: EffectPolicy,
    pub spawn_model: SpawnModel,
    next_id: u32,
}

impl PowerUpManager {
    pub fn new(policy: EffectPolicy, spawn_model: SpawnModel) -> Self {
        Self {
            pickups: Vec::new(),
            effects: Vec::with_capacity(PowerUpKind::ALL.len()),
            policy,
            spawn_model,
            next_id: 1,
        }
    }

    /// Whether an effect of this kind is running
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Seconds left on the given effect (0 when inactive)
    pub fn remaining(&self, kind: PowerUpKind) -> f32 {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining)
            .unwrap_or(0.0)
    }

    /// The most recently started effect
    pub fn current(&self) -> Option<&ActiveEffect> {
        self.effects.last()
    }

    /// Score increment per cleared obstacle under the running effects
    pub fn score_multiplier(&self) -> u64 {
        if self.is_active(PowerUpKind::DoublePoints) { 2 } else { 1 }
    }

    /// Place a power-up directly (used by spawning and tests)
    pub fn spawn(&mut self, kind: PowerUpKind, pos: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.pickups.push(PowerUp { id, kind, pos });
        log::debug!("Power-up {} spawned at ({:.0}, {:.0})", kind.as_str(), pos.x, pos.y);
        id
    }

    /// Roll for a spawn this tick. Returns the kind spawned, if any.
    pub fn roll_spawn<R: Rng>(&mut self, dt: f32, arena_width: f32, arena_height: f32, rng: &mut R) -> Option<PowerUpKind> {
        if rng.random::<f64>() >= self.spawn_model.chance(dt) {
            return None;
        }
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let x = random_in_band(POWER_UP_MARGIN, arena_width - POWER_UP_MARGIN, rng);
        let y = random_in_band(POWER_UP_MARGIN, arena_height - POWER_UP_MARGIN, rng);
        self.spawn(kind, Vec2::new(x, y));
        Some(kind)
    }

    /// Remove every power-up overlapping `bounds` and return their kinds in spawn order.
    ///
    /// The overlap scan completes before anything is removed.
    pub fn collect(&mut self, bounds: &Rect) -> Vec<PowerUpKind> {
        let hits: Vec<bool> = self.pickups.iter().map(|p| p.bounds().intersects(bounds)).collect();
        let collected: Vec<PowerUpKind> = self
            .pickups
            .iter()
            .zip(&hits)
            .filter(|&(_, &hit)| hit)
            .map(|(p, _)| p.kind)
            .collect();
        if !collected.is_empty() {
            let mut flags = hits.iter();
            self.pickups.retain(|_| !flags.next().copied().unwrap_or(false));
        }
        collected
    }

    /// Start (or restart) the timer for a collected effect
    pub fn activate(&mut self, kind: PowerUpKind) {
        let effect = ActiveEffect {
            kind,
            remaining: kind.duration(),
        };
        match self.policy {
            EffectPolicy::Overwrite => {
                self.effects.clear();
                self.effects.push(effect);
            }
            EffectPolicy::Stack => {
                if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
                    existing.remaining = effect.remaining;
                } else {
                    self.effects.push(effect);
                }
            }
        }
        log::debug!("Effect {} active for {:.1}s", kind.as_str(), effect.remaining);
    }

    /// Count down every timer by `dt` and return the effects that ended.
    ///
    /// `invincible` is cleared when an effect ends: on any expiry under
    /// `Overwrite`, only on invincibility expiry under `Stack`.
    pub fn decay(&mut self, dt: f32, invincible: &mut bool) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for effect in &mut self.effects {
            effect.remaining -= dt;
            if effect.remaining <= 0.0 {
                effect.remaining = 0.0;
                expired.push(effect.kind);
            }
        }
        if expired.is_empty() {
            return expired;
        }

        self.effects.retain(|e| e.remaining > 0.0);
        let clears_invincible = match self.policy {
            EffectPolicy::Overwrite => true,
            EffectPolicy::Stack => expired.contains(&PowerUpKind::Invincibility),
        };
        if clears_invincible {
            *invincible = false;
        }
        for kind in &expired {
            log::debug!("Effect {} expired", kind.as_str());
        }
        expired
    }
}

fn random_in_band<R: Rng>(lo: f32, hi: f32, rng: &mut R) -> f32 {
    if hi <= lo { lo } else { rng.random_range(lo..=hi) }
}
