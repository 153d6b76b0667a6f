//! Sound effect dispatch
//!
//! Playback itself belongs to an `AudioSink`; the manager decides whether
//! and how loudly a named effect is played.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Avatar flapped
    Flap,
    /// Obstacle cleared
    Score,
    /// Run ended
    Hit,
    /// Power-up collected
    PowerUp,
}

impl SoundEffect {
    /// Asset name of the effect
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Flap => "flap",
            SoundEffect::Score => "score",
            SoundEffect::Hit => "hit",
            SoundEffect::PowerUp => "powerup",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUp),
            GameEvent::Crashed(_) => Some(SoundEffect::Hit),
            GameEvent::EffectExpired(_) => None,
        }
    }
}

/// Something that can play a named effect
pub trait AudioSink {
    /// `volume` is in 0.0..=1.0 and always positive
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Logs each effect, for headless runs
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    /// Effects played so far
    pub played: u64,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("Sound {} at volume {:.2}", effect.as_str(), volume);
        self.played += 1;
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            volume: 1.0,
            muted: false,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = if vol.is_finite() { vol.clamp(0.0, 1.0) } else { 0.0 };
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("volume", &self.volume)
            .field("muted", &self.muted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::sim::{CrashCause, PowerUpKind};

    /// Sink that shares its history with the test
    struct SharedSink(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioSink for SharedSink {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    fn manager() -> (AudioManager, Rc<RefCell<Vec<(SoundEffect, f32)>>>) {
        let played = Rc::new(RefCell::new(Vec::new()));
        (AudioManager::new(Box::new(SharedSink(played.clone()))), played)
    }

    #[test]
    fn test_plays_at_volume() {
        let (mut audio, played) = manager();
        audio.set_volume(0.5);
        audio.play(SoundEffect::Flap);
        assert_eq!(*played.borrow(), vec![(SoundEffect::Flap, 0.5)]);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let (mut audio, played) = manager();
        audio.set_muted(true);
        audio.play(SoundEffect::Hit);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_zero_volume_plays_nothing() {
        let (mut audio, played) = manager();
        audio.set_volume(0.0);
        audio.play(SoundEffect::Score);
        audio.set_volume(f32::NAN);
        audio.play(SoundEffect::Score);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Flapped), Some(SoundEffect::Flap));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored { points: 1, score: 1 }),
            Some(SoundEffect::Score)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Crashed(CrashCause::Floor)),
            Some(SoundEffect::Hit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EffectExpired(PowerUpKind::Invincibility)),
            None
        );
    }
}
