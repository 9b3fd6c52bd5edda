//! Game balance settings
//!
//! A static settings object read by the simulation. Every threshold the core
//! branches on (spawn distances, hazard unlocks, ice physics, stages) lives
//! here so it can be tuned from JSON without touching code.

use serde::{Deserialize, Serialize};

/// Gated content that unlocks as the run progresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hazard {
    RedGoblin,
    Bird,
    FirePlatform,
    MovingPlatform,
}

/// Where the run currently is: meters travelled and the stage reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub distance: u32,
    pub stage: u32,
}

impl Progress {
    pub fn new(distance: u32, stage: u32) -> Self {
        Self { distance, stage }
    }
}

/// Game settings/balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Pickups (pixels of player travel) ===
    /// Spawn a magazine roughly this often
    pub magazine_spawn_distance: f32,
    /// Spawn a heart roughly this often
    pub heart_spawn_distance: f32,
    /// Random offset applied to each pickup interval (+/-)
    pub spawn_variance: f32,

    // === Difficulty (meters) ===
    /// Enemy spawn interval shrinks by 10% of base every this many meters
    pub difficulty_interval: u32,
    pub red_goblin_distance: u32,
    pub bird_distance: u32,
    pub fire_distance: u32,
    pub moving_platform_distance: u32,

    // === Ice physics ===
    /// Horizontal acceleration on one-way platforms (px/s^2)
    pub ice_base_acceleration: f32,
    /// Multiplied in once per difficulty level past the first
    pub ice_acceleration_decay: f32,

    // === Stages ===
    /// Stage progression gates content; false = continuous distance gating
    pub stages_mode: bool,
    /// Meters per stage
    pub stage_distance: u32,
    pub total_stages: u32,
    pub red_goblin_stage: u32,
    pub bird_stage: u32,
    pub moving_platform_stage: u32,
    pub fire_stage: u32,

    // === Audio ===
    pub music_muted: bool,
    pub sfx_muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            magazine_spawn_distance: 1000.0,
            heart_spawn_distance: 2000.0,
            spawn_variance: 500.0,

            difficulty_interval: 500,
            red_goblin_distance: 500,
            bird_distance: 1000,
            fire_distance: 1500,
            moving_platform_distance: 2000,

            ice_base_acceleration: 400.0,
            ice_acceleration_decay: 0.9,

            stages_mode: true,
            stage_distance: 100,
            total_stages: 5,
            red_goblin_stage: 2,
            bird_stage: 3,
            moving_platform_stage: 4,
            fire_stage: 5,

            music_muted: false,
            sfx_muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Stage reached after travelling `distance` meters (1-based, capped)
    pub fn stage_for_distance(&self, distance: u32) -> u32 {
        let per_stage = if self.stages_mode {
            self.stage_distance
        } else {
            self.difficulty_interval
        };
        (1 + distance / per_stage.max(1)).min(self.total_stages.max(1))
    }

    /// Difficulty level used for physics scaling (1-based)
    pub fn difficulty_level(&self, progress: Progress) -> u32 {
        if self.stages_mode {
            progress.stage.max(1)
        } else {
            1 + progress.distance / self.difficulty_interval.max(1)
        }
    }

    /// Enemy spawn rate multiplier: +10% per difficulty interval
    pub fn difficulty_multiplier(&self, distance: u32) -> f32 {
        1.0 + (distance / self.difficulty_interval.max(1)) as f32 * 0.1
    }

    /// Whether `hazard` may appear at this point of the run
    pub fn is_unlocked(&self, hazard: Hazard, progress: Progress) -> bool {
        if self.stages_mode {
            let stage = match hazard {
                Hazard::RedGoblin => self.red_goblin_stage,
                Hazard::Bird => self.bird_stage,
                Hazard::FirePlatform => self.fire_stage,
                Hazard::MovingPlatform => self.moving_platform_stage,
            };
            progress.stage >= stage
        } else {
            let distance = match hazard {
                Hazard::RedGoblin => self.red_goblin_distance,
                Hazard::Bird => self.bird_distance,
                Hazard::FirePlatform => self.fire_distance,
                Hazard::MovingPlatform => self.moving_platform_distance,
            };
            progress.distance >= distance
        }
    }

    /// Horizontal acceleration while standing on ice (gets slipperier)
    pub fn ice_acceleration(&self, progress: Progress) -> f32 {
        let level = self.difficulty_level(progress);
        self.ice_base_acceleration * self.ice_acceleration_decay.powi(level as i32 - 1)
    }
}
