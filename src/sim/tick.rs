//! Per-frame simulation tick
//!
//! Order within a tick: input -> avatar -> obstacles (scroll + spacing) ->
//! collisions (obstacles, then power-ups) -> scoring -> effect timers ->
//! day/night -> power-up spawn roll -> wing animation.

use super::collision::first_obstacle_hit;
use super::state::{CrashCause, GameEvent, GameSession};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap this tick (space/click)
    pub flap: bool,
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    // Don't tick if paused or over
    if session.paused || session.terminated {
        return;
    }
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    session.time_ticks += 1;
    session.elapsed += dt;

    if input.flap {
        session.avatar.flap();
        session.events.push(GameEvent::Flapped);
    }

    let floor = session.avatar.floor(session.arena.height);
    if session.avatar.tick(dt, floor) {
        session.end_run(CrashCause::Floor);
    }

    let arena = session.arena;
    session
        .obstacles
        .tick(dt, arena.width, arena.height, &mut session.rng);

    let bounds = session.avatar.bounds();
    if let Some(hit) = first_obstacle_hit(&bounds, session.obstacles.iter()) {
        if session.avatar.invincible {
            log::trace!("Invincible pass through obstacle {}", hit.obstacle_id);
        } else {
            log::debug!("Hit {:?} bar of obstacle {}", hit.bar, hit.obstacle_id);
            session.end_run(CrashCause::Obstacle);
        }
    }

    for kind in session.powerups.collect(&bounds) {
        session.apply_power_up(kind);
    }

    let cleared = session.obstacles.mark_passed(bounds.left());
    for _ in 0..cleared {
        let points = session.powerups.score_multiplier();
        session.score = session.score.saturating_add(points);
        session.events.push(GameEvent::Scored {
            points,
            score: session.score,
        });
    }

    let expired = session.powerups.decay(dt, &mut session.avatar.invincible);
    session
        .events
        .extend(expired.into_iter().map(GameEvent::EffectExpired));

    session.environment.tick(dt);

    session
        .powerups
        .roll_spawn(dt, arena.width, arena.height, &mut session.rng);

    session.avatar.animate(dt);

    if session.terminated {
        session.latch_high_score();
        log::info!(
            "Run over ({:?}): score {} high {}",
            session.crash,
            session.score,
            session.high_score
        );
    }
}
