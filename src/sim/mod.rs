//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Input and audio reach it only through the `InputSource`/`AudioSink` traits
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod manager;
pub mod particles;
pub mod pickup;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::{Body, Rect, Side, is_resting_on, lands_on_top, overlaps, resolve_solid_collision};
pub use enemy::{Enemy, EnemyKind, EnemyStats};
pub use manager::{CombatOutcome, EnemyManager, ProjectileOutcome};
pub use particles::{Particle, ParticleColor, ParticleSystem};
pub use pickup::{Pickup, PickupField, PickupKind};
pub use platform::{Platform, PlatformGenerator, PlatformKind, Sweep};
pub use player::{Attack, Player, PlayerState};
pub use projectile::{Owner, Projectile, ProjectileKind};
pub use state::{Camera, GameMode, GameState, ScreenShake};
pub use tick::{FixedTimestep, Game, StepContext, tick};
