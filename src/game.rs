//! Top-level screen state machine
//!
//! Wraps a `GameSession` with the menu, settings, pause and game-over screens.
//! `Game::update` consumes one frame of input and reports the side effects the
//! caller must perform (sounds, persistence) as `FrameEffects`.

use serde::Serialize;

use crate::audio::SoundEffect;
use crate::highscores::HighScore;
use crate::platform::{InputEvent, Key};
use crate::settings::Settings;
use crate::sim::{GameSession, SessionSnapshot, TickInput, tick};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Screen {
    Menu,
    Settings,
    Playing,
    Paused,
    GameOver,
}

/// Work requested by one frame of `Game::update`
#[derive(Debug, Clone, Default)]
pub struct FrameEffects {
    /// Sounds to play, in event order
    pub sounds: Vec<SoundEffect>,
    /// New best score to persist
    pub save_high_score: Option<u64>,
    /// Settings were edited and should be saved
    pub settings_changed: bool,
    /// Resolution or fullscreen changed; the display must be reconfigured
    pub display_changed: bool,
    /// Final state of a run that ended this frame
    pub run_ended: Option<SessionSnapshot>,
}

/// The game outside of a single run
#[derive(Debug, Clone)]
pub struct Game {
    pub screen: Screen,
    pub settings: Settings,
    pub high_score: HighScore,
    /// Current or most recently finished run
    pub session: Option<GameSession>,
    /// Run N is seeded with `base_seed + N`
    pub base_seed: u64,
    pub runs_started: u32,
    /// Exit was requested
    pub quit: bool,
}

impl Game {
    pub fn new(settings: Settings, high_score: HighScore, base_seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            settings,
            high_score,
            session: None,
            base_seed,
            runs_started: 0,
            quit: false,
        }
    }

    /// Dimensions the renderer should draw into
    pub fn arena_size(&self) -> (f32, f32) {
        match &self.session {
            Some(session) if self.screen != Screen::Menu && self.screen != Screen::Settings => {
                (session.arena.width, session.arena.height)
            }
            _ => self.settings.resolution.size(),
        }
    }

    /// Process one frame: handle input events in order, then advance the run
    /// by `dt` if one is in progress
    pub fn update(&mut self, events: &[InputEvent], dt: f32) -> FrameEffects {
        let mut effects = FrameEffects::default();
        let was_playing = self.screen == Screen::Playing;
        let mut flap = false;

        for event in events {
            self.handle_event(*event, &mut flap, &mut effects);
            if self.quit {
                return effects;
            }
        }

        if !was_playing || self.screen != Screen::Playing {
            return effects;
        }

        let Some(session) = self.session.as_mut() else {
            return effects;
        };
        tick(session, &TickInput { flap }, dt);
        for event in session.drain_events() {
            if let Some(sound) = SoundEffect::for_event(&event) {
                effects.sounds.push(sound);
            }
        }
        if session.terminated {
            self.finish_run(&mut effects);
        }
        effects
    }

    fn handle_event(&mut self, event: InputEvent, flap: &mut bool, effects: &mut FrameEffects) {
        if event == InputEvent::Quit {
            self.quit = true;
            return;
        }

        match (self.screen, event) {
            (Screen::Menu, InputEvent::KeyDown(Key::Enter) | InputEvent::MouseDown) => self.start_run(),
            (Screen::Menu, InputEvent::KeyDown(Key::S)) => self.screen = Screen::Settings,
            (Screen::Menu, InputEvent::KeyDown(Key::Escape)) => self.quit = true,

            (Screen::Settings, InputEvent::KeyDown(Key::Escape)) => self.screen = Screen::Menu,
            (Screen::Settings, InputEvent::KeyDown(Key::F)) => {
                self.settings.fullscreen = !self.settings.fullscreen;
                effects.settings_changed = true;
                effects.display_changed = true;
            }
            (Screen::Settings, InputEvent::KeyDown(Key::M)) => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                effects.settings_changed = true;
            }
            (Screen::Settings, InputEvent::KeyDown(Key::R)) => {
                self.settings.resolution = self.settings.resolution.toggled();
                effects.settings_changed = true;
                effects.display_changed = true;
            }

            (Screen::Playing, InputEvent::KeyDown(Key::Space) | InputEvent::MouseDown) => *flap = true,
            (Screen::Playing, InputEvent::KeyDown(Key::P)) => self.set_paused(true),
            (Screen::Playing, InputEvent::KeyDown(Key::Escape)) => self.quit = true,

            (Screen::Paused, InputEvent::KeyDown(Key::P)) => self.set_paused(false),
            (Screen::Paused, InputEvent::KeyDown(Key::Escape)) => self.quit = true,

            (Screen::GameOver, InputEvent::KeyDown(Key::Enter)) => self.start_run(),
            (Screen::GameOver, InputEvent::KeyDown(Key::Escape)) => self.quit = true,

            _ => {}
        }
    }

    /// Begin a fresh run with the next seed
    fn start_run(&mut self) {
        let seed = self.base_seed.wrapping_add(self.runs_started as u64);
        self.runs_started += 1;
        let session = GameSession::new(seed, self.high_score.best(), self.settings.session_config());
        log::info!(
            "Run {} started (seed {}, arena {}x{})",
            self.runs_started,
            seed,
            session.arena.width,
            session.arena.height
        );
        self.session = Some(session);
        self.screen = Screen::Playing;
    }

    fn set_paused(&mut self, paused: bool) {
        if let Some(session) = self.session.as_mut() {
            session.paused = paused;
        }
        self.screen = if paused { Screen::Paused } else { Screen::Playing };
        log::debug!("{}", if paused { "Paused" } else { "Resumed" });
    }

    fn finish_run(&mut self, effects: &mut FrameEffects) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if self.high_score.record(session.high_score) {
            log::info!("New high score: {}", self.high_score.best());
            effects.save_high_score = Some(self.high_score.best());
        }
        effects.run_ended = Some(session.snapshot());
        self.screen = Screen::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Resolution;
    use crate::sim::{CrashCause, SpawnModel};

    const DT: f32 = 1.0 / 120.0;

    fn quiet_settings() -> Settings {
        Settings {
            spawn_model: SpawnModel::PerTick { chance: 0.0 },
            ..Default::default()
        }
    }

    fn key(k: Key) -> InputEvent {
        InputEvent::KeyDown(k)
    }

    fn playing_game() -> Game {
        let mut game = Game::new(quiet_settings(), HighScore::new(3), 100);
        game.update(&[key(Key::Enter)], DT);
        game
    }

    /// Fall until the run ends, returning the effects of the final frame
    fn run_to_crash(game: &mut Game) -> FrameEffects {
        for _ in 0..(120 * 3) {
            let effects = game.update(&[], DT);
            if game.screen == Screen::GameOver {
                return effects;
            }
        }
        panic!("run did not end");
    }

    #[test]
    fn test_starts_on_menu() {
        let game = Game::new(Settings::default(), HighScore::default(), 0);
        assert_eq!(game.screen, Screen::Menu);
        assert!(game.session.is_none());
    }

    #[test]
    fn test_enter_starts_run() {
        let game = playing_game();
        assert_eq!(game.screen, Screen::Playing);
        assert_eq!(game.runs_started, 1);
        let session = game.session.as_ref().unwrap();
        assert_eq!(session.seed, 100);
        assert_eq!(session.high_score, 3);
        // The starting frame does not advance the run
        assert_eq!(session.time_ticks, 0);
    }

    #[test]
    fn test_mouse_starts_run() {
        let mut game = Game::new(quiet_settings(), HighScore::default(), 0);
        game.update(&[InputEvent::MouseDown], DT);
        assert_eq!(game.screen, Screen::Playing);
    }

    #[test]
    fn test_flap_plays_sound() {
        let mut game = playing_game();
        let effects = game.update(&[key(Key::Space)], DT);
        assert_eq!(effects.sounds, vec![SoundEffect::Flap]);
        assert!(game.session.as_ref().unwrap().avatar.velocity < 0.0);
    }

    #[test]
    fn test_pause_suspends_ticks() {
        let mut game = playing_game();
        game.update(&[], DT);
        game.update(&[key(Key::P)], DT);
        assert_eq!(game.screen, Screen::Paused);
        let before = game.session.as_ref().unwrap().time_ticks;

        let effects = game.update(&[key(Key::Space)], DT);
        assert!(effects.sounds.is_empty());
        game.update(&[], DT);
        assert_eq!(game.session.as_ref().unwrap().time_ticks, before);

        game.update(&[key(Key::P)], DT);
        assert_eq!(game.screen, Screen::Playing);
        game.update(&[], DT);
        assert_eq!(game.session.as_ref().unwrap().time_ticks, before + 1);
    }

    #[test]
    fn test_crash_goes_to_game_over() {
        let mut game = playing_game();
        let effects = run_to_crash(&mut game);
        assert!(effects.sounds.contains(&SoundEffect::Hit));
        let summary = effects.run_ended.unwrap();
        assert_eq!(summary.crash, Some(CrashCause::Floor));
        // Score 0 does not beat 3
        assert_eq!(effects.save_high_score, None);
        assert_eq!(game.high_score.best(), 3);
    }

    #[test]
    fn test_new_best_requests_save() {
        let mut game = playing_game();
        game.session.as_mut().unwrap().score = 9;
        let effects = run_to_crash(&mut game);
        assert_eq!(effects.save_high_score, Some(9));
        assert_eq!(game.high_score.best(), 9);
    }

    #[test]
    fn test_retry_uses_next_seed() {
        let mut game = playing_game();
        run_to_crash(&mut game);
        game.update(&[key(Key::Enter)], DT);
        assert_eq!(game.screen, Screen::Playing);
        assert_eq!(game.runs_started, 2);
        assert_eq!(game.session.as_ref().unwrap().seed, 101);
    }

    #[test]
    fn test_settings_toggles() {
        let mut game = Game::new(Settings::default(), HighScore::default(), 0);
        game.update(&[key(Key::S)], DT);
        assert_eq!(game.screen, Screen::Settings);

        let effects = game.update(&[key(Key::M)], DT);
        assert!(effects.settings_changed);
        assert!(!effects.display_changed);
        assert!(!game.settings.sound_enabled);

        let effects = game.update(&[key(Key::R), key(Key::F)], DT);
        assert!(effects.display_changed);
        assert_eq!(game.settings.resolution, Resolution::Landscape);
        assert!(game.settings.fullscreen);
        assert_eq!(game.arena_size(), (800.0, 600.0));

        game.update(&[key(Key::Escape)], DT);
        assert_eq!(game.screen, Screen::Menu);
        assert!(!game.quit);
    }

    #[test]
    fn test_resolution_applies_to_next_run() {
        let mut game = Game::new(quiet_settings(), HighScore::default(), 0);
        game.update(&[key(Key::S)], DT);
        game.update(&[key(Key::R)], DT);
        game.update(&[key(Key::Escape)], DT);
        game.update(&[key(Key::Enter)], DT);
        assert_eq!(game.session.as_ref().unwrap().arena.width, 800.0);
    }

    #[test]
    fn test_quit_from_any_screen() {
        let mut game = Game::new(Settings::default(), HighScore::default(), 0);
        game.update(&[InputEvent::Quit], DT);
        assert!(game.quit);

        let mut game = playing_game();
        game.update(&[key(Key::Escape)], DT);
        assert!(game.quit);
    }

    #[test]
    fn test_ignored_keys() {
        let mut game = Game::new(Settings::default(), HighScore::default(), 0);
        game.update(&[key(Key::Space), key(Key::P), key(Key::Other)], DT);
        assert_eq!(game.screen, Screen::Menu);

        let mut game = playing_game();
        run_to_crash(&mut game);
        game.update(&[key(Key::Space), InputEvent::MouseDown], DT);
        assert_eq!(game.screen, Screen::GameOver);
    }
}
