//! Edge Runner - a perimeter-running dodge game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, jumps, hazards, collisions)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Frame timing and loop lifecycle shared by browser/native hosts
//! - `settings`: Cosmetic preferences (LocalStorage + URL query)

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Avatar edge length (CSS pixels)
    pub const AVATAR_SIZE: f32 = 50.0;
    /// Hazard edge length (CSS pixels)
    pub const HAZARD_SIZE: f32 = 20.0;
    /// Distance the avatar travels per display frame
    pub const MOVE_STEP: f32 = 4.0;
    /// Upward offset applied by one jump
    pub const JUMP_OFFSET: f32 = 100.0;

    /// Time between hazard spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// How long a hazard stays on screen
    pub const HAZARD_LIFETIME_MS: f64 = 2000.0;
    /// Time between collision checks
    pub const COLLISION_CHECK_INTERVAL_MS: f64 = 50.0;

    /// Nominal frame length, used for the very first frame
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame delta fed to the simulation (prevents spawn bursts after a stall)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
}

/// Largest coordinate an entity of `size` may take along an axis of `extent`.
///
/// Collapses to 0 when the entity does not fit.
#[inline]
pub fn axis_limit(extent: f32, size: f32) -> f32 {
    (extent - size).max(0.0)
}
