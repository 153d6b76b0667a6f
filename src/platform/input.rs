//! Input events and sources

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::game::{Game, Screen};
use crate::sim::wants_flap;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Enter,
    Escape,
    P,
    S,
    F,
    M,
    R,
    Other,
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window close request
    Quit,
    KeyDown(Key),
    MouseDown,
}

/// Produces the events for one frame
pub trait InputSource {
    fn poll(&mut self, game: &Game) -> Vec<InputEvent>;
}

/// Replays a fixed queue of frames, then reports nothing
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Vec<InputEvent>>,
    {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Queue one more frame of events
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }

    /// Queue `count` frames with no input
    pub fn push_idle(&mut self, count: usize) {
        for _ in 0..count {
            self.frames.push_back(Vec::new());
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _game: &Game) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Plays unattended: starts runs from the menu, steers through gaps,
/// and exits after `max_runs` runs have ended
#[derive(Debug, Clone)]
pub struct AutopilotInput {
    max_runs: u32,
}

impl AutopilotInput {
    pub fn new(max_runs: u32) -> Self {
        Self {
            max_runs: max_runs.max(1),
        }
    }
}

impl InputSource for AutopilotInput {
    fn poll(&mut self, game: &Game) -> Vec<InputEvent> {
        let event = match game.screen {
            Screen::Menu => Some(InputEvent::KeyDown(Key::Enter)),
            Screen::Settings => Some(InputEvent::KeyDown(Key::Escape)),
            Screen::Paused => Some(InputEvent::KeyDown(Key::P)),
            Screen::Playing => game
                .session
                .as_ref()
                .filter(|session| wants_flap(session))
                .map(|_| InputEvent::KeyDown(Key::Space)),
            Screen::GameOver => {
                if game.runs_started >= self.max_runs {
                    Some(InputEvent::Quit)
                } else {
                    Some(InputEvent::KeyDown(Key::Enter))
                }
            }
        };
        event.into_iter().collect()
    }
}
