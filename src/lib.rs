//! Ninja Fox - a side-scrolling platformer runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, generation, game state)
//! - `input`: Logical action capability consumed by the simulation
//! - `audio`: Sound cue capability and mute state
//! - `renderer`: Draw capability and quad batching for the host renderer
//! - `settings`: Data-driven game balance

pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame accepted into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical playfield dimensions (pixels)
    pub const GAME_WIDTH: f32 = 320.0;
    pub const GAME_HEIGHT: f32 = 240.0;

    /// Platform grid unit
    pub const TILE_SIZE: f32 = 16.0;

    /// Player falls past this y => game over
    pub const DEATH_LINE: f32 = GAME_HEIGHT + 50.0;

    /// Camera follow: fraction of the remaining offset closed each step
    pub const CAMERA_SMOOTHING: f32 = 0.1;
    /// Camera keeps the player this far from the left edge
    pub const CAMERA_LEAD: f32 = GAME_WIDTH / 3.0;

    /// Pixels of player travel per meter of distance
    pub const PIXELS_PER_METER: f32 = 10.0;
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else if target > current {
        current + max_delta
    } else {
        current - max_delta
    }
}
