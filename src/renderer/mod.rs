//! Rendering interface
//!
//! The game never draws directly. Each frame it builds a list of
//! `DrawCommand`s (see `scene`) and hands them to a `Renderer` backend.

pub mod log_renderer;
pub mod scene;

use glam::Vec2;
use serde::Serialize;

use crate::sim::{BarSide, PowerUpKind, Rect};

pub use log_renderer::LogRenderer;

/// Background image layers crossfaded by the day/night cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackgroundLayer {
    Day,
    Night,
}

/// Text sizes (36 px and 24 px fonts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontSize {
    Large,
    Small,
}

/// Which point of the text box `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAnchor {
    TopLeft,
    /// Horizontally centered, top edge at `pos.y`
    TopCenter,
    Center,
}

/// One draw request, in back-to-front order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Fill the frame with black
    Clear,
    Background { layer: BackgroundLayer, opacity: u8 },
    Bar { rect: Rect, side: BarSide },
    /// `frame` indexes the flap animation, `rotation` is in degrees
    Avatar { rect: Rect, frame: usize, rotation: f32, invincible: bool },
    PowerUp { kind: PowerUpKind, rect: Rect },
    Text {
        text: String,
        pos: Vec2,
        anchor: TextAnchor,
        size: FontSize,
    },
    /// Dim the whole frame behind a menu
    Overlay { opacity: u8 },
}

/// A drawing backend
pub trait Renderer {
    /// Present one complete frame
    fn submit(&mut self, commands: &[DrawCommand]);

    /// Resize or change the display mode
    fn configure(&mut self, width: u32, height: u32, fullscreen: bool);
}
