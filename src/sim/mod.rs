//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from the frame deltas passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (by hazard ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{aabb_overlap, check_collisions};
pub use motion::{advance, jump};
pub use spawn::{expire_hazard, random_edge_position, spawn_hazard};
pub use state::{Avatar, Direction, Edge, GameEvent, GameState, Hazard, Viewport};
pub use tick::{TickInput, tick};
pub use timer::Interval;
