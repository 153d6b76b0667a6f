//! Frame driver
//!
//! `App` owns the game and every collaborator, and performs the side effects
//! the game requests each frame.

use std::path::PathBuf;

use serde::Serialize;

use crate::audio::AudioManager;
use crate::consts::MAX_FRAME_DT;
use crate::game::Game;
use crate::platform::{FpsCounter, HighScoreStore, InputSource, TimeSource};
use crate::renderer::{DrawCommand, Renderer, scene};
use crate::sim::SessionSnapshot;

/// Totals reported when the loop exits
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub high_score: u64,
    pub runs: Vec<SessionSnapshot>,
}

pub struct App {
    pub game: Game,
    clock: Box<dyn TimeSource>,
    input: Box<dyn InputSource>,
    renderer: Box<dyn Renderer>,
    audio: AudioManager,
    store: Box<dyn HighScoreStore>,
    /// Where settings are written after edits; `None` keeps them in memory
    settings_path: Option<PathBuf>,
    fps: FpsCounter,
    commands: Vec<DrawCommand>,
    summary: RunSummary,
}

impl App {
    pub fn new(
        game: Game,
        clock: Box<dyn TimeSource>,
        input: Box<dyn InputSource>,
        renderer: Box<dyn Renderer>,
        audio: AudioManager,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let mut app = Self {
            game,
            clock,
            input,
            renderer,
            audio,
            store,
            settings_path: None,
            fps: FpsCounter::new(),
            commands: Vec::new(),
            summary: RunSummary::default(),
        };
        app.apply_settings();
        app
    }

    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Push audio and display settings to the collaborators
    fn apply_settings(&mut self) {
        let settings = &self.game.settings;
        self.audio.set_muted(!settings.sound_enabled);
        self.audio.set_volume(settings.effective_volume());
        let (w, h) = settings.resolution.size();
        self.renderer.configure(w as u32, h as u32, settings.fullscreen);
    }

    /// Run one frame; returns false once the game wants to exit
    pub fn step(&mut self) -> bool {
        let dt = self.clock.delta_time().clamp(0.0, MAX_FRAME_DT);
        let fps = self.fps.record(self.clock.now());

        let events = self.input.poll(&self.game);
        let effects = self.game.update(&events, dt);

        for sound in &effects.sounds {
            self.audio.play(*sound);
        }
        if let Some(best) = effects.save_high_score {
            self.game.high_score.save(&mut *self.store);
            log::debug!("Persisted high score {}", best);
        }
        if effects.settings_changed {
            let settings = &self.game.settings;
            log::info!(
                "Settings changed: sound {}, fullscreen {}, resolution {}",
                settings.sound_enabled,
                settings.fullscreen,
                settings.resolution.as_str()
            );
            self.save_settings();
            if effects.display_changed {
                self.apply_settings();
            } else {
                self.audio.set_muted(!self.game.settings.sound_enabled);
            }
        }
        if let Some(run) = effects.run_ended {
            log::debug!(
                "Run {} lasted {:.1}s ({} ticks)",
                run.seed,
                run.elapsed,
                run.time_ticks
            );
            self.summary.runs.push(run);
        }

        scene::build(&self.game, fps, &mut self.commands);
        self.renderer.submit(&self.commands);
        self.summary.frames += 1;

        !self.game.quit
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.game.settings.save_to(path) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Step until the game quits or `max_frames` frames have run
    pub fn run(&mut self, max_frames: Option<u64>) -> RunSummary {
        while max_frames.is_none_or(|max| self.summary.frames < max) {
            if !self.step() {
                break;
            }
        }
        self.summary.high_score = self.game.high_score.best();
        self.summary.clone()
    }
}
