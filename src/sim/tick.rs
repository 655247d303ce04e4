//! Per-frame simulation tick
//!
//! Advances the game by one display frame: input, motion, then every timer
//! that fell due during the frame, in time order.

use super::collision::check_collisions;
use super::motion::{advance, jump};
use super::spawn::{expire_hazard, spawn_hazard};
use super::state::{GameEvent, GameState, Viewport};

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key presses, applied in order
    pub jumps: u32,
    /// Current viewport size, queried live by the host
    pub viewport: Option<Viewport>,
}

/// A timer firing inside one frame.
///
/// Variant order is the tie-break for timers due at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Due {
    Expire(u32),
    Spawn,
    CollisionCheck,
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if let Some(viewport) = input.viewport {
        state.viewport = viewport;
    }

    for _ in 0..input.jumps {
        jump(&mut state.avatar);
        state.events.push(GameEvent::Jumped {
            y: state.avatar.pos.y,
        });
    }

    state.frames += 1;
    if let Some(direction) = advance(&mut state.avatar, state.viewport) {
        state.events.push(GameEvent::Turned { direction });
    }

    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
    let frame_end = state.time_ms + dt_ms;

    while let Some((at_ms, due)) = next_due(state, frame_end) {
        state.time_ms = at_ms;
        match due {
            Due::Expire(id) => {
                expire_hazard(state, id);
            }
            Due::Spawn => {
                state.spawn_timer.poll(at_ms);
                spawn_hazard(state, at_ms);
            }
            Due::CollisionCheck => {
                state.collision_timer.poll(at_ms);
                check_collisions(state);
            }
        }
    }

    state.time_ms = frame_end;
}

/// Earliest timer due at or before `until_ms`
fn next_due(state: &GameState, until_ms: f64) -> Option<(f64, Due)> {
    let expiry = state.next_expiry().map(|(at, id)| (at, Due::Expire(id)));
    let spawn = Some((state.spawn_timer.next_due_ms(), Due::Spawn));
    let check = Some((state.collision_timer.next_due_ms(), Due::CollisionCheck));

    [expiry, spawn, check]
        .into_iter()
        .flatten()
        .filter(|(at, _)| *at <= until_ms)
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
}
