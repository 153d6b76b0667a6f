//! Demo steering: decides when to flap so the avatar tracks the next gap

use super::state::GameSession;

/// How far ahead (seconds) the avatar's fall is projected
const LOOKAHEAD: f32 = 0.02;
/// Aim this far below the gap center, since a flap rises ~45 px
const AIM_OFFSET: f32 = 20.0;

/// True if flapping now keeps the avatar on course for the next gap
pub fn wants_flap(session: &GameSession) -> bool {
    if session.terminated || session.paused {
        return false;
    }
    let bounds = session.avatar.bounds();
    let target = session
        .obstacles
        .next_ahead(bounds.left())
        .map(|o| o.gap_center + AIM_OFFSET)
        .unwrap_or(session.arena.height / 2.0);

    // Only flap while falling, otherwise the avatar climbs into the ceiling
    if session.avatar.velocity < 0.0 {
        return false;
    }
    let projected = bounds.center().y + session.avatar.velocity * LOOKAHEAD;
    projected > target
}
