//! Property tests for the simulation invariants

use std::collections::HashMap;

use edge_runner::consts::*;
use edge_runner::sim::{
    Avatar, Direction, GameEvent, GameState, TickInput, Viewport, aabb_overlap, advance,
    check_collisions, jump, random_edge_position, spawn_hazard, tick,
};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Right),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Up),
    ]
}

fn viewport() -> impl Strategy<Value = Viewport> {
    (10.0f32..2000.0, 10.0f32..2000.0).prop_map(|(w, h)| Viewport::new(w, h))
}

/// An avatar placed anywhere inside the viewport
fn avatar_in(vp: Viewport) -> impl Strategy<Value = Avatar> {
    let max = vp.max_corner(AVATAR_SIZE);
    (0.0f32..=1.0, 0.0f32..=1.0, direction()).prop_map(move |(fx, fy, direction)| Avatar {
        pos: Vec2::new(fx * max.x, fy * max.y),
        direction,
    })
}

fn in_bounds(avatar: &Avatar, vp: Viewport) -> bool {
    let max = vp.max_corner(AVATAR_SIZE);
    avatar.pos.x >= 0.0 && avatar.pos.y >= 0.0 && avatar.pos.x <= max.x && avatar.pos.y <= max.y
}

proptest! {
    #[test]
    fn avatar_stays_on_screen(
        (vp, start) in viewport().prop_flat_map(|vp| (Just(vp), avatar_in(vp))),
        frames in 0usize..3000,
        jump_every in 1usize..200,
    ) {
        let mut avatar = start;
        for frame in 0..frames {
            if frame % jump_every == 0 {
                jump(&mut avatar);
            }
            advance(&mut avatar, vp);
            prop_assert!(in_bounds(&avatar, vp), "frame {}: {:?} outside {:?}", frame, avatar, vp);
        }
    }

    #[test]
    fn turn_happens_exactly_at_boundary(
        (vp, start) in viewport().prop_flat_map(|vp| (Just(vp), avatar_in(vp))),
    ) {
        let max = vp.max_corner(AVATAR_SIZE);
        let moved = start.pos + start.direction.delta() * MOVE_STEP;
        let reaches = match start.direction {
            Direction::Right => moved.x >= max.x,
            Direction::Down => moved.y >= max.y,
            Direction::Left => moved.x <= 0.0,
            Direction::Up => moved.y <= 0.0,
        };

        let mut avatar = start;
        let turned = advance(&mut avatar, vp);
        prop_assert_eq!(turned.is_some(), reaches);
        if reaches {
            prop_assert_eq!(avatar.direction, start.direction.next());
        } else {
            prop_assert_eq!(avatar.direction, start.direction);
        }
    }

    #[test]
    fn jump_never_goes_above_top(y in 0.0f32..2000.0, x in 0.0f32..2000.0) {
        let mut avatar = Avatar { pos: Vec2::new(x, y), direction: Direction::Left };
        jump(&mut avatar);
        prop_assert_eq!(avatar.pos.y, (y - JUMP_OFFSET).max(0.0));
        prop_assert_eq!(avatar.pos.x, x);
    }

    #[test]
    fn spawned_hazards_fit_on_screen(vp in viewport(), seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..50 {
            let (_, pos) = random_edge_position(&mut rng, vp);
            let max = vp.max_corner(HAZARD_SIZE);
            prop_assert!(pos.x >= 0.0 && pos.x <= max.x);
            prop_assert!(pos.y >= 0.0 && pos.y <= max.y);
        }
    }

    #[test]
    fn collision_matches_box_overlap(
        ax in 0.0f32..500.0, ay in 0.0f32..500.0,
        hx in 0.0f32..500.0, hy in 0.0f32..500.0,
        score in 0u64..1000,
    ) {
        let mut state = GameState::new(1, Viewport::new(600.0, 600.0));
        spawn_hazard(&mut state, 0.0);
        state.hazards[0].pos = Vec2::new(hx, hy);
        state.avatar.pos = Vec2::new(ax, ay);
        state.score = score;

        let overlap = aabb_overlap(state.avatar.pos, AVATAR_SIZE, state.hazards[0].pos, HAZARD_SIZE);
        let hits = check_collisions(&mut state);

        prop_assert_eq!(hits, usize::from(overlap));
        prop_assert_eq!(state.hazards[0].collided, overlap);
        prop_assert_eq!(state.score, if overlap { 0 } else { score });
        prop_assert_eq!(state.hazards.len(), 1);
    }

    #[test]
    fn hazards_expire_once_after_lifetime(
        seed in any::<u64>(),
        vp in viewport(),
        deltas in prop::collection::vec(0.0f64..120.0, 1..600),
    ) {
        let mut state = GameState::new(seed, vp);
        let mut spawned_at: HashMap<u32, f64> = HashMap::new();
        let mut expired: HashMap<u32, u32> = HashMap::new();

        for (i, dt) in deltas.iter().enumerate() {
            let input = TickInput { jumps: u32::from(i % 17 == 0), ..Default::default() };
            tick(&mut state, &input, *dt);

            for hazard in &state.hazards {
                prop_assert_eq!(hazard.expires_at_ms - hazard.spawned_at_ms, HAZARD_LIFETIME_MS);
                // Still alive means not yet due
                prop_assert!(hazard.expires_at_ms > state.time_ms);
                spawned_at.entry(hazard.id).or_insert(hazard.spawned_at_ms);
            }
            for event in state.drain_events() {
                if let GameEvent::HazardExpired { id, .. } = event {
                    *expired.entry(id).or_default() += 1;
                }
            }
        }

        prop_assert!(expired.values().all(|&n| n == 1));
        // Every hazard that was seen alive and is now past due has expired
        for (id, at) in &spawned_at {
            if at + HAZARD_LIFETIME_MS <= state.time_ms {
                prop_assert!(expired.contains_key(id), "hazard {} never expired", id);
            }
        }
        // Score only ever comes from expiries
        prop_assert!(state.score <= expired.len() as u64);
    }
}
