//! Platform abstraction layer
//!
//! Collaborators the game consumes but does not implement itself:
//! - Time/ticks
//! - Input events
//! - Storage (persisted high score)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{AutopilotInput, InputEvent, InputSource, Key, ScriptedInput};
pub use storage::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
pub use time::{FixedClock, FpsCounter, FrameClock, TimeSource};
