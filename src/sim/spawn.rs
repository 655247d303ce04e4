//! Hazard spawning and expiry

use glam::Vec2;
use rand::Rng;

use super::state::{Edge, GameEvent, GameState, Hazard, Viewport};
use crate::axis_limit;
use crate::consts::{HAZARD_LIFETIME_MS, HAZARD_SIZE};

/// Pick a uniformly random edge and a uniformly random spot along it.
///
/// The returned corner keeps the whole hazard inside the viewport.
pub fn random_edge_position<R: Rng>(rng: &mut R, viewport: Viewport) -> (Edge, Vec2) {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along: f32 = rng.random();
    let max_x = axis_limit(viewport.width, HAZARD_SIZE);
    let max_y = axis_limit(viewport.height, HAZARD_SIZE);

    let pos = match edge {
        Edge::Top => Vec2::new(along * max_x, 0.0),
        Edge::Right => Vec2::new(max_x, along * max_y),
        Edge::Bottom => Vec2::new(along * max_x, max_y),
        Edge::Left => Vec2::new(0.0, along * max_y),
    };
    (edge, pos)
}

/// Spawn one hazard at `now_ms`; it expires `HAZARD_LIFETIME_MS` later.
///
/// Returns the new hazard's ID.
pub fn spawn_hazard(state: &mut GameState, now_ms: f64) -> u32 {
    let viewport = state.viewport;
    let (edge, pos) = random_edge_position(&mut state.rng, viewport);
    let id = state.next_hazard_id();

    state.hazards.push(Hazard {
        id,
        pos,
        edge,
        spawned_at_ms: now_ms,
        expires_at_ms: now_ms + HAZARD_LIFETIME_MS,
        collided: false,
    });
    state.events.push(GameEvent::HazardSpawned { id, edge });
    id
}

/// Remove hazard `id` and award a point for surviving it.
///
/// Collisions during its lifetime don't matter. An ID that is no longer
/// active awards nothing.
pub fn expire_hazard(state: &mut GameState, id: u32) -> bool {
    let Some(index) = state.hazards.iter().position(|h| h.id == id) else {
        return false;
    };
    state.hazards.remove(index);
    state.score += 1;
    state.events.push(GameEvent::HazardExpired {
        id,
        score: state.score,
    });
    true
}
