//! Skyflap - A side-scrolling gap-flying arcade game
//!
//! Core modules:
//! - `sim`: Simulation (avatar physics, obstacles, power-ups, day/night, scoring)
//! - `game`: Top-level screen state machine (menu, settings, playing, paused, game over)
//! - `platform`: Time, input and storage collaborators
//! - `audio`: Sound request routing
//! - `renderer`: Draw request emission
//! - `app`: Frame driver tying the game to its collaborators

pub mod app;
pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use error::StoreError;
pub use game::{FrameEffects, Game, Screen};
pub use highscores::HighScore;
pub use settings::{EffectPolicy, Resolution, Settings, SpawnModel};

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions (portrait)
    pub const ARENA_WIDTH: f32 = 400.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Alternate landscape arena width
    pub const WIDE_ARENA_WIDTH: f32 = 800.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1000.0;
    /// Velocity applied on flap (negative = up, pixels/s)
    pub const FLAP_VELOCITY: f32 = -300.0;

    /// Avatar box and fixed horizontal center
    pub const AVATAR_WIDTH: f32 = 34.0;
    pub const AVATAR_HEIGHT: f32 = 24.0;
    pub const AVATAR_CENTER_X: f32 = 100.0;
    /// Number of wing frames and seconds per frame
    pub const AVATAR_FRAMES: usize = 3;
    pub const AVATAR_FRAME_INTERVAL: f32 = 0.1;
    /// Display tilt in degrees per pixel/s of vertical velocity
    pub const AVATAR_TILT_FACTOR: f32 = 0.05;

    /// Obstacle bar dimensions
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_HEIGHT: f32 = 500.0;
    /// Vertical opening between the two bars
    pub const PIPE_GAP: f32 = 150.0;
    /// Minimum horizontal distance between consecutive obstacles
    pub const PIPE_MIN_SPACING: f32 = 200.0;
    /// Horizontal scroll speed (pixels/s)
    pub const PIPE_SPEED: f32 = 200.0;
    pub const PIPE_COUNT: usize = 3;

    /// Seconds for one day->night (or night->day) crossfade
    pub const TRANSITION_TIME: f32 = 5.0;

    /// Power-up spawn chance per tick
    pub const POWER_UP_SPAWN_CHANCE: f64 = 0.01;
    /// Power-up centers stay this far from the arena edges
    pub const POWER_UP_MARGIN: f32 = 100.0;
    pub const POWER_UP_SIZE: f32 = 30.0;
    pub const DOUBLE_POINTS_DURATION: f32 = 10.0;
    pub const INVINCIBILITY_DURATION: f32 = 5.0;

    /// Frame-rate cap and the tick rate the per-tick spawn chance was tuned for
    pub const MAX_FPS: u32 = 120;
    /// Largest frame delta handed to the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Full opacity for background crossfade weights
    pub const FULL_OPACITY: u8 = 255;
}
