//! Best score across runs
//!
//! Persisted through a `HighScoreStore`. Storage failures never interrupt play:
//! they are logged and the game continues with what it has.

use serde::{Deserialize, Serialize};

use crate::platform::HighScoreStore;

/// The persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished run; returns true if it set a new best
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Read the stored best, falling back to 0 if the store is unreadable
    pub fn load(store: &mut dyn HighScoreStore) -> Self {
        match store.load() {
            Ok(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            Err(e) => {
                log::warn!("Could not load high score, starting from 0: {}", e);
                Self::default()
            }
        }
    }

    /// Write the best score; returns false if the store rejected it
    pub fn save(&self, store: &mut dyn HighScoreStore) -> bool {
        match store.save(self.best) {
            Ok(()) => {
                log::info!("High score saved ({})", self.best);
                true
            }
            Err(e) => {
                log::warn!("Could not save high score {}: {}", self.best, e);
                false
            }
        }
    }
}
