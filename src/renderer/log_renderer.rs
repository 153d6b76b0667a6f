//! Headless renderer that only keeps statistics

use super::{DrawCommand, Renderer};

/// Counts submitted frames and keeps the most recent one
#[derive(Debug, Clone, Default)]
pub struct LogRenderer {
    pub frames: u64,
    pub commands: u64,
    pub last_frame: Vec<DrawCommand>,
    /// Latest (width, height, fullscreen) from `configure`
    pub display: Option<(u32, u32, bool)>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text strings of the most recent frame
    pub fn last_texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for LogRenderer {
    fn submit(&mut self, commands: &[DrawCommand]) {
        self.frames += 1;
        self.commands += commands.len() as u64;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(commands);
        log::trace!("Frame {}: {} draw commands", self.frames, commands.len());
    }

    fn configure(&mut self, width: u32, height: u32, fullscreen: bool) {
        log::info!(
            "Display {}x{}{}",
            width,
            height,
            if fullscreen { " (fullscreen)" } else { "" }
        );
        self.display = Some((width, height, fullscreen));
    }
}
