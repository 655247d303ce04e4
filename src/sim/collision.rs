//! Axis-aligned bounding box collision between the avatar and hazards

use glam::Vec2;

use super::state::{GameEvent, GameState};
use crate::consts::{AVATAR_SIZE, HAZARD_SIZE};

/// Strict overlap test between two squares given by top-left corner and edge length.
///
/// Squares that only share an edge do not overlap.
pub fn aabb_overlap(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    b_pos.x < a_pos.x + a_size
        && b_pos.x + b_size > a_pos.x
        && b_pos.y < a_pos.y + a_size
        && b_pos.y + b_size > a_pos.y
}

/// Test every active hazard against the avatar.
///
/// Each overlapping hazard resets the score to zero and is flagged as collided;
/// hazards are never removed here. Returns the number of overlapping hazards.
pub fn check_collisions(state: &mut GameState) -> usize {
    let avatar_pos = state.avatar.pos;
    let mut hits = 0;

    for hazard in &mut state.hazards {
        if !aabb_overlap(avatar_pos, AVATAR_SIZE, hazard.pos, HAZARD_SIZE) {
            continue;
        }
        hits += 1;
        hazard.collided = true;
        let score_lost = state.score;
        state.score = 0;
        state.events.push(GameEvent::Collision {
            hazard_id: hazard.id,
            score_lost,
        });
    }

    hits
}
