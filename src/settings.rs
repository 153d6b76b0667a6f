//! Game settings and preferences
//!
//! Persisted as JSON next to the high score file. Unknown or missing fields
//! fall back to their defaults so older files keep loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StoreError;
use crate::sim::{Arena, SessionConfig};

pub use crate::sim::{EffectPolicy, SpawnModel};

/// Window/arena resolution presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    /// 400 x 600
    #[default]
    Portrait,
    /// 800 x 600
    Landscape,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Portrait => "400x600",
            Resolution::Landscape => "800x600",
        }
    }

    /// Width and height in pixels
    pub fn size(&self) -> (f32, f32) {
        match self {
            Resolution::Portrait => (ARENA_WIDTH, ARENA_HEIGHT),
            Resolution::Landscape => (WIDE_ARENA_WIDTH, ARENA_HEIGHT),
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Resolution::Portrait => Resolution::Landscape,
            Resolution::Landscape => Resolution::Portrait,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    /// Arena size, applied at the next run
    pub resolution: Resolution,
    pub fullscreen: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    pub sound_enabled: bool,
    /// Volume (0.0 - 1.0)
    pub volume: f32,

    // === Rules ===
    pub effect_policy: EffectPolicy,
    pub spawn_model: SpawnModel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: Resolution::Portrait,
            fullscreen: false,
            show_fps: true,

            sound_enabled: true,
            volume: 1.0,

            effect_policy: EffectPolicy::Overwrite,
            spawn_model: SpawnModel::default(),
        }
    }
}

impl Settings {
    /// Per-run simulation configuration derived from these settings
    pub fn session_config(&self) -> SessionConfig {
        let (width, height) = self.resolution.size();
        SessionConfig {
            arena: Arena { width, height },
            effect_policy: self.effect_policy,
            spawn_model: self.spawn_model,
        }
    }

    /// Volume clamped to 0.0 - 1.0
    pub fn effective_volume(&self) -> f32 {
        if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a file, using defaults if it is missing or invalid
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}, using defaults: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to a file as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
