//! Run state and core simulation types
//!
//! A `GameSession` owns every entity of one run. It is created when a run
//! starts and dropped when the run ends; only the high score outlives it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::environment::Environment;
use super::obstacle::ObstacleField;
use super::powerup::{ActiveEffect, EffectPolicy, PowerUp, PowerUpKind, PowerUpManager, SpawnModel};
use crate::consts::*;

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Avatar reached the bottom of the arena
    Floor,
    /// Avatar touched a bar without invincibility
    Obstacle,
}

/// Things that happened during a tick, drained by the game layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    /// An obstacle was cleared; `points` were added, bringing the total to `score`
    Scored { points: u64, score: u64 },
    PowerUpCollected { kind: PowerUpKind, score: u64 },
    EffectExpired(PowerUpKind),
    /// The run ended (emitted once per run)
    Crashed(CrashCause),
}

/// Per-run configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub arena: Arena,
    pub effect_policy: EffectPolicy,
    pub spawn_model: SpawnModel,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            effect_policy: EffectPolicy::default(),
            spawn_model: SpawnModel::default(),
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    pub avatar: Avatar,
    pub obstacles: ObstacleField,
    pub powerups: PowerUpManager,
    pub environment: Environment,
    /// Current score, never decreases during a run
    pub score: u64,
    /// Best score known to this run
    pub high_score: u64,
    /// Run has ended
    pub terminated: bool,
    /// Ticks are suspended
    pub paused: bool,
    /// How the run ended, once it has
    pub crash: Option<CrashCause>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds
    pub elapsed: f32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameSession {
    /// Start a fresh run
    pub fn new(seed: u64, high_score: u64, config: SessionConfig) -> Self {
        let arena = config.arena;
        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacles = ObstacleField::new(PIPE_COUNT, arena.width, arena.height, &mut rng);
        Self {
            seed,
            arena,
            avatar: Avatar::new(arena.height / 2.0),
            obstacles,
            powerups: PowerUpManager::new(config.effect_policy, config.spawn_model),
            environment: Environment::default(),
            score: 0,
            high_score,
            terminated: false,
            paused: false,
            crash: None,
            time_ticks: 0,
            elapsed: 0.0,
            events: Vec::new(),
            rng,
        }
    }

    /// End the run; only the first cause is recorded
    pub fn end_run(&mut self, cause: CrashCause) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        self.crash = Some(cause);
        self.events.push(GameEvent::Crashed(cause));
    }

    /// Apply a collected power-up's immediate effect and start its timer
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::DoublePoints => {
                self.score = self.score.saturating_mul(2);
            }
            PowerUpKind::Invincibility => {
                self.avatar.invincible = true;
            }
        }
        self.powerups.activate(kind);
        self.events.push(GameEvent::PowerUpCollected {
            kind,
            score: self.score,
        });
    }

    /// Raise the high score to the current score if it is better
    pub fn latch_high_score(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Serializable view of the run for logs and summaries
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed: self.seed,
            score: self.score,
            high_score: self.high_score,
            terminated: self.terminated,
            crash: self.crash,
            time_ticks: self.time_ticks,
            elapsed: self.elapsed,
            avatar_y: self.avatar.pos.y,
            obstacle_x: self.obstacles.iter().map(|o| o.x).collect(),
            pickups: self.powerups.pickups.clone(),
            effects: self.powerups.effects.clone(),
        }
    }
}

/// Point-in-time summary of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub score: u64,
    pub high_score: u64,
    pub terminated: bool,
    pub crash: Option<CrashCause>,
    pub time_ticks: u64,
    pub elapsed: f32,
    pub avatar_y: f32,
    pub obstacle_x: Vec<f32>,
    pub pickups: Vec<PowerUp>,
    pub effects: Vec<ActiveEffect>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::new(1, 12, SessionConfig::default());
        assert_eq!(session.score, 0);
        assert_eq!(session.high_score, 12);
        assert!(!session.terminated);
        assert!(!session.paused);
        assert_eq!(session.obstacles.len(), PIPE_COUNT);
        assert!(session.powerups.pickups.is_empty());
    }

    #[test]
    fn test_end_run_emits_once() {
        let mut session = GameSession::new(1, 0, SessionConfig::default());
        session.end_run(CrashCause::Obstacle);
        session.end_run(CrashCause::Floor);
        assert_eq!(session.crash, Some(CrashCause::Obstacle));
        assert_eq!(session.drain_events(), vec![GameEvent::Crashed(CrashCause::Obstacle)]);
        assert!(session.events.is_empty());
    }

    #[test]
    fn test_double_points_doubles_immediately() {
        let mut session = GameSession::new(1, 0, SessionConfig::default());
        session.score = 4;
        session.apply_power_up(PowerUpKind::DoublePoints);
        assert_eq!(session.score, 8);
        assert!(session.powerups.is_active(PowerUpKind::DoublePoints));
    }

    #[test]
    fn test_invincibility_sets_flag() {
        let mut session = GameSession::new(1, 0, SessionConfig::default());
        session.apply_power_up(PowerUpKind::Invincibility);
        assert!(session.avatar.invincible);
        assert_eq!(
            session.powerups.remaining(PowerUpKind::Invincibility),
            INVINCIBILITY_DURATION
        );
    }

    #[test]
    fn test_latch_high_score_only_raises() {
        let mut session = GameSession::new(1, 10, SessionConfig::default());
        session.score = 3;
        session.latch_high_score();
        assert_eq!(session.high_score, 10);
        session.score = 15;
        session.latch_high_score();
        assert_eq!(session.high_score, 15);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameSession::new(42, 0, SessionConfig::default());
        let b = GameSession::new(42, 0, SessionConfig::default());
        let gaps_a: Vec<f32> = a.obstacles.iter().map(|o| o.gap_center).collect();
        let gaps_b: Vec<f32> = b.obstacles.iter().map(|o| o.gap_center).collect();
        assert_eq!(gaps_a, gaps_b);
    }
}
