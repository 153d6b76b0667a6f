//! Builds the draw list for the current screen

use glam::Vec2;

use super::{BackgroundLayer, DrawCommand, FontSize, TextAnchor};
use crate::game::{Game, Screen};
use crate::sim::{BarSide, GameSession};

/// Opacity of the dimming layer behind pause and game-over text
const OVERLAY_OPACITY: u8 = 150;
/// Distance of the FPS counter from the right edge
const FPS_INSET: f32 = 70.0;
const HUD_MARGIN: f32 = 10.0;

fn text(out: &mut Vec<DrawCommand>, s: impl Into<String>, pos: Vec2, anchor: TextAnchor, size: FontSize) {
    out.push(DrawCommand::Text {
        text: s.into(),
        pos,
        anchor,
        size,
    });
}

fn on_off(flag: bool) -> &'static str {
    if flag { "On" } else { "Off" }
}

/// Replace `out` with the commands for one frame of `game`
pub fn build(game: &Game, fps: u32, out: &mut Vec<DrawCommand>) {
    out.clear();
    let (width, height) = game.arena_size();
    let center = Vec2::new(width / 2.0, height / 2.0);

    match game.screen {
        Screen::Menu => {
            out.push(DrawCommand::Clear);
            let lines = [
                ("Skyflap", -90.0),
                ("Press Enter to Start", -20.0),
                ("Press S for Settings", 30.0),
                ("Press ESC to Quit", 80.0),
            ];
            for (line, dy) in lines {
                text(out, line, center + Vec2::new(0.0, dy), TextAnchor::TopCenter, FontSize::Large);
            }
        }
        Screen::Settings => {
            out.push(DrawCommand::Clear);
            let settings = &game.settings;
            let lines = [
                ("Settings".to_string(), -150.0),
                (format!("Fullscreen: {}", on_off(settings.fullscreen)), -90.0),
                (format!("Sound: {}", on_off(settings.sound_enabled)), -60.0),
                (format!("Resolution: {}", settings.resolution.as_str()), -30.0),
                ("Press R to Toggle Resolution".to_string(), 0.0),
                ("Press F to Toggle Fullscreen".to_string(), 30.0),
                ("Press M to Toggle Sound".to_string(), 60.0),
                ("Press ESC to Go Back".to_string(), 90.0),
            ];
            for (line, dy) in lines {
                text(out, line, center + Vec2::new(0.0, dy), TextAnchor::TopCenter, FontSize::Large);
            }
        }
        Screen::Playing | Screen::Paused | Screen::GameOver => {
            let Some(session) = game.session.as_ref() else {
                out.push(DrawCommand::Clear);
                return;
            };
            world(session, out);
            hud(session, game.settings.show_fps, fps, out);

            let lines: &[(&str, f32)] = match game.screen {
                Screen::Paused => &[("Game Paused", 0.0), ("Press P to Resume", 50.0)],
                Screen::GameOver => &[
                    ("You Died", 0.0),
                    ("Press Enter to Retry", 50.0),
                    ("Press ESC to Quit", 100.0),
                ],
                _ => &[],
            };
            if !lines.is_empty() {
                out.push(DrawCommand::Overlay {
                    opacity: OVERLAY_OPACITY,
                });
                for &(line, dy) in lines {
                    text(out, line, center + Vec2::new(0.0, dy), TextAnchor::Center, FontSize::Large);
                }
            }
        }
    }
}

/// Backgrounds, bars, avatar and pickups
fn world(session: &GameSession, out: &mut Vec<DrawCommand>) {
    let (day, night) = session.environment.opacities();
    out.push(DrawCommand::Background {
        layer: BackgroundLayer::Day,
        opacity: day,
    });
    out.push(DrawCommand::Background {
        layer: BackgroundLayer::Night,
        opacity: night,
    });

    for obstacle in session.obstacles.iter() {
        for side in [BarSide::Upper, BarSide::Lower] {
            out.push(DrawCommand::Bar {
                rect: obstacle.bar(side),
                side,
            });
        }
    }

    let avatar = &session.avatar;
    out.push(DrawCommand::Avatar {
        rect: avatar.bounds(),
        frame: avatar.frame,
        rotation: avatar.rotation_degrees(),
        invincible: avatar.invincible,
    });

    for pickup in &session.powerups.pickups {
        out.push(DrawCommand::PowerUp {
            kind: pickup.kind,
            rect: pickup.bounds(),
        });
    }
}

/// Score, high score, and the optional FPS counter
fn hud(session: &GameSession, show_fps: bool, fps: u32, out: &mut Vec<DrawCommand>) {
    let width = session.arena.width;
    text(
        out,
        format!("Score: {}", session.score),
        Vec2::splat(HUD_MARGIN),
        TextAnchor::TopLeft,
        FontSize::Large,
    );
    text(
        out,
        format!("High Score: {}", session.high_score.max(session.score)),
        Vec2::new(width / 2.0, HUD_MARGIN),
        TextAnchor::TopCenter,
        FontSize::Small,
    );
    if show_fps {
        text(
            out,
            format!("FPS: {fps}"),
            Vec2::new(width - FPS_INSET, HUD_MARGIN),
            TextAnchor::TopLeft,
            FontSize::Small,
        );
    }
}
