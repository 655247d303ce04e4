//! Game state and core simulation types
//!
//! Everything the four behaviors read or write lives in [`GameState`], which is
//! owned by a single coordinator.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::timer::Interval;
use crate::axis_limit;
use crate::consts::*;

/// Direction of travel around the perimeter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// 90° clockwise turn: Right -> Down -> Left -> Up -> Right
    pub fn next(self) -> Self {
        match self {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }

    /// Unit step in screen coordinates (y grows downward)
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Right => Vec2::X,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Up => Vec2::NEG_Y,
        }
    }
}

/// Screen edge a hazard was spawned on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Visible area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest top-left corner for a square of edge `size`
    pub fn max_corner(&self, size: f32) -> Vec2 {
        Vec2::new(axis_limit(self.width, size), axis_limit(self.height, size))
    }

    /// Clamp a square's top-left corner so the square stays on screen
    pub fn clamp_corner(&self, pos: Vec2, size: f32) -> Vec2 {
        pos.clamp(Vec2::ZERO, self.max_corner(size))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The player's square
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Avatar {
    /// Top-left corner
    pub pos: Vec2,
    pub direction: Direction,
}

/// A transient obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub edge: Edge,
    pub spawned_at_ms: f64,
    pub expires_at_ms: f64,
    /// Set when the avatar touched this hazard (drives the flash cue only)
    pub collided: bool,
}

/// Things that happened during a tick, drained by the host for logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { y: f32 },
    Turned { direction: Direction },
    HazardSpawned { id: u32, edge: Edge },
    HazardExpired { id: u32, score: u64 },
    Collision { hazard_id: u32, score_lost: u64 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Last viewport reported by the host
    pub viewport: Viewport,
    pub avatar: Avatar,
    /// Active hazards (sorted by id)
    pub hazards: Vec<Hazard>,
    pub score: u64,
    /// Simulation clock
    pub time_ms: f64,
    /// Frames simulated so far
    pub frames: u64,
    pub spawn_timer: Interval,
    pub collision_timer: Interval,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    /// Next hazard ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            avatar: Avatar::default(),
            hazards: Vec::new(),
            score: 0,
            time_ms: 0.0,
            frames: 0,
            spawn_timer: Interval::new(SPAWN_INTERVAL_MS, 0.0),
            collision_timer: Interval::new(COLLISION_CHECK_INTERVAL_MS, 0.0),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new hazard ID
    pub fn next_hazard_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Earliest pending hazard expiry, if any
    pub fn next_expiry(&self) -> Option<(f64, u32)> {
        self.hazards
            .iter()
            .map(|h| (h.expires_at_ms, h.id))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cancel everything still pending. Returns how many hazard expiries were dropped.
    ///
    /// Both repeating timers are released, so later ticks never spawn,
    /// score or check collisions.
    pub fn teardown(&mut self) -> usize {
        let cancelled = self.hazards.len();
        self.spawn_timer.cancel();
        self.collision_timer.cancel();
        self.hazards.clear();
        self.events.clear();
        cancelled
    }
}
