//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of I/O:
//! - Delta-time driven, one tick per frame
//! - Seeded RNG only
//! - Side effects are reported as `GameEvent`s, never performed
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod avatar;
pub mod collision;
pub mod environment;
pub mod obstacle;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use autopilot::wants_flap;
pub use avatar::Avatar;
pub use collision::{ObstacleHit, avatar_obstacle_collision, first_obstacle_hit};
pub use environment::Environment;
pub use obstacle::{BarSide, Obstacle, ObstacleField, gap_center_band};
pub use powerup::{ActiveEffect, EffectPolicy, PowerUp, PowerUpKind, PowerUpManager, SpawnModel};
pub use rect::Rect;
pub use state::{Arena, CrashCause, GameEvent, GameSession, SessionConfig, SessionSnapshot};
pub use tick::{TickInput, tick};
