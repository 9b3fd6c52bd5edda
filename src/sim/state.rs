//! Game state and session-level types
//!
//! Everything a run needs lives in `GameState`; `tick` is the only thing
//! that mutates it during play.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::manager::EnemyManager;
use super::particles::ParticleSystem;
use super::pickup::PickupField;
use super::platform::PlatformGenerator;
use super::player::Player;
use super::projectile::Projectile;
use crate::consts::*;
use crate::settings::{Progress, Settings};

/// Where the player spawns at the start of a run
pub const PLAYER_START: Vec2 = Vec2::new(100.0, 100.0);

/// Session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen, waiting for a start press
    Splash,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended, waiting for a retry press
    GameOver,
}

/// Side-scrolling camera; only x follows the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub target_x: f32,
    pub smoothing: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            target_x: 0.0,
            smoothing: CAMERA_SMOOTHING,
        }
    }
}

impl Camera {
    /// Ease toward keeping the player a third of the way into the screen
    pub fn follow(&mut self, player_x: f32) {
        self.target_x = player_x - CAMERA_LEAD;
        self.x += (self.target_x - self.x) * self.smoothing;
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Short camera jolt on hits
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    /// Pixels
    pub intensity: f32,
    /// Seconds remaining
    pub time: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, intensity: f32, duration: f32) {
        self.intensity = intensity;
        self.time = duration;
    }

    pub fn update(&mut self, dt: f32) {
        if self.time > 0.0 {
            self.time = (self.time - dt).max(0.0);
        }
    }

    pub fn is_active(&self) -> bool {
        self.time > 0.0
    }

    /// Deterministic jitter for the current tick
    pub fn offset(&self, time_ticks: u64) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        let t = time_ticks as f32;
        Vec2::new((t * 1.7).sin(), (t * 2.3).cos()) * self.intensity
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub mode: GameMode,
    pub score: u64,
    /// Meters travelled (`player.x / 10`)
    pub distance: u32,
    pub stage: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub camera: Camera,
    pub platforms: PlatformGenerator,
    pub enemies: EnemyManager,
    /// Player-fired bullets
    pub bullets: Vec<Projectile>,
    pub pickups: PickupField,
    /// Visual only
    pub particles: ParticleSystem,
    pub shake: ScreenShake,
    pub settings: Settings,
    pub rng: Pcg32,
}

impl GameState {
    /// Fresh session on the splash screen
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let platforms = PlatformGenerator::new(&settings, &mut rng);
        let pickups = PickupField::new(&settings, &mut rng);
        Self {
            seed,
            mode: GameMode::Splash,
            score: 0,
            distance: 0,
            stage: 1,
            time_ticks: 0,
            player: Player::new(PLAYER_START),
            camera: Camera::default(),
            platforms,
            enemies: EnemyManager::new(),
            bullets: Vec::new(),
            pickups,
            particles: ParticleSystem::new(),
            shake: ScreenShake::default(),
            settings,
            rng,
        }
    }

    /// Begin a run. From game over this is a full reset on a new seed drawn
    /// from the current RNG, so replays stay reproducible.
    pub fn start(&mut self) {
        if self.mode == GameMode::GameOver {
            let seed = self.rng.random::<u64>();
            let settings = self.settings.clone();
            *self = Self::new(seed, settings);
        }
        self.mode = GameMode::Playing;
        log::info!("Run started (seed {})", self.seed);
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.distance, self.stage)
    }

    /// Recompute distance and stage from the player's position. Returns the
    /// new stage when it changed.
    pub fn update_progress(&mut self) -> Option<u32> {
        self.distance = (self.player.body.pos.x.max(0.0) / PIXELS_PER_METER) as u32;
        let stage = self.settings.stage_for_distance(self.distance);
        if stage != self.stage {
            self.stage = stage;
            return Some(stage);
        }
        None
    }

    pub fn is_playing(&self) -> bool {
        self.mode == GameMode::Playing
    }
}
