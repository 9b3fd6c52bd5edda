//! Collectibles: stars, ammo magazines and hearts

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps};
use super::platform::PlatformGenerator;
use super::player::Player;
use crate::consts::*;
use crate::settings::Settings;

/// Stars kept alive ahead of the player
pub const MAX_STARS: usize = 10;
/// Minimum spacing between stars on either axis
pub const STAR_SPACING: f32 = 30.0;
/// Placement attempts per step
pub const STAR_ATTEMPTS: u32 = 100;
pub const STAR_SCORE: u64 = 5;
/// Pickups this far behind the camera are dropped
pub const CLEANUP_MARGIN: f32 = 50.0;
/// Magazines and hearts hover this high above their platform
pub const HOVER_HEIGHT: f32 = 20.0;
/// Stars prefer platforms right of `camera_right - STAR_LOOKBACK`
const STAR_LOOKBACK: f32 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// +5 score
    Star,
    /// Refills ammo
    Magazine,
    /// +1 health, only when hurt
    Heart,
}

impl PickupKind {
    pub fn size(self) -> Vec2 {
        match self {
            PickupKind::Star => Vec2::new(12.0, 12.0),
            PickupKind::Magazine => Vec2::new(16.0, 12.0),
            PickupKind::Heart => Vec2::new(16.0, 16.0),
        }
    }

    /// Bob frequency (rad/s) and amplitude (px)
    fn bob(self) -> (f32, f32) {
        match self {
            PickupKind::Star => (3.0, 4.0),
            PickupKind::Magazine => (2.0, 3.0),
            PickupKind::Heart => (2.5, 4.0),
        }
    }
}

/// A stationary collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    base_y: f32,
    bob_time: f32,
    pub collected: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            base_y: pos.y,
            bob_time: 0.0,
            collected: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        let (frequency, amplitude) = self.kind.bob();
        self.bob_time += dt;
        self.pos.y = self.base_y + (self.bob_time * frequency).sin() * amplitude;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.kind.size())
    }
}

/// A pickup the player just took
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collected {
    pub kind: PickupKind,
    pub center: Vec2,
    /// Score awarded
    pub score: u64,
}

/// All live pickups plus the distance schedule for magazines and hearts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupField {
    pickups: Vec<Pickup>,
    next_magazine_x: f32,
    next_heart_x: f32,
}

impl PickupField {
    pub fn new(settings: &Settings, rng: &mut impl Rng) -> Self {
        Self {
            pickups: Vec::new(),
            next_magazine_x: jittered(settings.magazine_spawn_distance, settings.spawn_variance, rng),
            next_heart_x: jittered(settings.heart_spawn_distance, settings.spawn_variance, rng),
        }
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn push(&mut self, pickup: Pickup) {
        self.pickups.push(pickup);
    }

    pub fn update(&mut self, dt: f32) {
        for pickup in &mut self.pickups {
            pickup.update(dt);
        }
    }

    /// Apply every pickup the player touches. A heart at full health is left
    /// in place.
    pub fn collect(&mut self, player: &mut Player) -> Vec<Collected> {
        let bounds = player.bounds();
        let mut collected = Vec::new();

        for pickup in &mut self.pickups {
            if pickup.collected || !overlaps(&bounds, &pickup.bounds()) {
                continue;
            }
            let score = match pickup.kind {
                PickupKind::Star => STAR_SCORE,
                PickupKind::Magazine => {
                    player.ammo = player.max_ammo;
                    0
                }
                PickupKind::Heart => {
                    if player.health >= player.max_health {
                        continue;
                    }
                    player.health += 1;
                    0
                }
            };
            pickup.collected = true;
            collected.push(Collected {
                kind: pickup.kind,
                center: pickup.bounds().center(),
                score,
            });
        }

        self.pickups.retain(|p| !p.collected);
        collected
    }

    /// Drop pickups behind the camera, top stars back up and place
    /// magazines and hearts on their distance schedule.
    pub fn spawn(
        &mut self,
        camera_x: f32,
        player_x: f32,
        platforms: &PlatformGenerator,
        settings: &Settings,
        rng: &mut impl Rng,
    ) {
        let cutoff = camera_x - CLEANUP_MARGIN;
        self.pickups.retain(|p| p.pos.x > cutoff);

        let camera_right = camera_x + GAME_WIDTH;
        self.spawn_stars(camera_right, platforms, rng);

        if player_x >= self.next_magazine_x {
            if let Some(pos) = hover_spot(camera_right, PickupKind::Magazine, platforms, rng) {
                self.pickups.push(Pickup::new(PickupKind::Magazine, pos));
                self.next_magazine_x =
                    player_x + jittered(settings.magazine_spawn_distance, settings.spawn_variance, rng);
                log::debug!("Magazine placed at ({:.0}, {:.0})", pos.x, pos.y);
            }
        }
        if player_x >= self.next_heart_x {
            if let Some(pos) = hover_spot(camera_right, PickupKind::Heart, platforms, rng) {
                self.pickups.push(Pickup::new(PickupKind::Heart, pos));
                self.next_heart_x = player_x + jittered(settings.heart_spawn_distance, settings.spawn_variance, rng);
                log::debug!("Heart placed at ({:.0}, {:.0})", pos.x, pos.y);
            }
        }
    }

    fn star_count(&self) -> usize {
        self.pickups.iter().filter(|p| p.kind == PickupKind::Star).count()
    }

    fn spawn_stars(&mut self, camera_right: f32, platforms: &PlatformGenerator, rng: &mut impl Rng) {
        let all = platforms.platforms();
        let mut candidates: Vec<&Rect> = all
            .iter()
            .map(|p| &p.rect)
            .filter(|r| r.x > camera_right - STAR_LOOKBACK)
            .collect();
        if candidates.is_empty() {
            candidates = all.iter().map(|p| &p.rect).collect();
        }
        if candidates.is_empty() {
            return;
        }

        let mut attempts = 0;
        while self.star_count() < MAX_STARS && attempts < STAR_ATTEMPTS {
            attempts += 1;
            let rect = candidates[rng.random_range(0..candidates.len())];
            let pos = Vec2::new(
                rect.x + rng.random::<f32>() * rect.width,
                rect.y - 30.0 - rng.random::<f32>() * 40.0,
            );
            let too_close = self.pickups.iter().any(|p| {
                p.kind == PickupKind::Star
                    && (p.pos.x - pos.x).abs() < STAR_SPACING
                    && (p.pos.y - pos.y).abs() < STAR_SPACING
            });
            if !too_close {
                self.pickups.push(Pickup::new(PickupKind::Star, pos));
            }
        }
    }
}

/// `base` plus uniform jitter in `[-variance, variance]`
fn jittered(base: f32, variance: f32, rng: &mut impl Rng) -> f32 {
    base + (rng.random::<f32>() * 2.0 - 1.0) * variance
}

/// Above a random platform starting past the camera's right edge
fn hover_spot(camera_right: f32, kind: PickupKind, platforms: &PlatformGenerator, rng: &mut impl Rng) -> Option<Vec2> {
    let ahead: Vec<&Rect> = platforms
        .platforms()
        .iter()
        .map(|p| &p.rect)
        .filter(|r| r.x > camera_right)
        .collect();
    if ahead.is_empty() {
        return None;
    }
    let rect = ahead[rng.random_range(0..ahead.len())];
    let size = kind.size();
    Some(Vec2::new(
        rect.x + (rect.width - size.x) / 2.0,
        rect.y - HOVER_HEIGHT - size.y,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::platform::{Platform, PlatformKind};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y))
    }

    #[test]
    fn test_star_adds_score() {
        let mut field = PickupField {
            pickups: vec![Pickup::new(PickupKind::Star, Vec2::new(105.0, 105.0))],
            next_magazine_x: f32::MAX,
            next_heart_x: f32::MAX,
        };
        let mut player = player_at(100.0, 100.0);
        let collected = field.collect(&mut player);
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].score, STAR_SCORE);
        assert!(field.pickups().is_empty());
    }

    #[test]
    fn test_heart_only_when_hurt() {
        let mut field = PickupField {
            pickups: vec![Pickup::new(PickupKind::Heart, Vec2::new(105.0, 105.0))],
            next_magazine_x: f32::MAX,
            next_heart_x: f32::MAX,
        };
        let mut player = player_at(100.0, 100.0);

        // Full health: heart stays
        assert!(field.collect(&mut player).is_empty());
        assert_eq!(player.health, player.max_health);
        assert_eq!(field.pickups().len(), 1);

        player.health = 1;
        let collected = field.collect(&mut player);
        assert_eq!(collected[0].kind, PickupKind::Heart);
        assert_eq!(player.health, 2);
        assert!(field.pickups().is_empty());
    }

    #[test]
    fn test_magazine_refills_ammo() {
        let mut field = PickupField {
            pickups: vec![Pickup::new(PickupKind::Magazine, Vec2::new(105.0, 105.0))],
            next_magazine_x: f32::MAX,
            next_heart_x: f32::MAX,
        };
        let mut player = player_at(100.0, 100.0);
        player.ammo = 0;
        field.collect(&mut player);
        assert_eq!(player.ammo, player.max_ammo);
    }

    #[test]
    fn test_bob_stays_within_amplitude() {
        let mut star = Pickup::new(PickupKind::Star, Vec2::new(0.0, 100.0));
        for _ in 0..300 {
            star.update(1.0 / 60.0);
            assert!((star.pos.y - 100.0).abs() <= 4.0 + 1e-4);
        }
    }

    #[test]
    fn test_stars_respect_cap_and_spacing() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(21);
        let platforms = PlatformGenerator::new(&settings, &mut rng);
        let mut field = PickupField::new(&settings, &mut rng);

        for step in 0..20 {
            field.spawn(step as f32 * 10.0, 100.0, &platforms, &settings, &mut rng);
        }

        let stars: Vec<_> = field.pickups().iter().filter(|p| p.kind == PickupKind::Star).collect();
        assert!(!stars.is_empty());
        assert!(stars.len() <= MAX_STARS);
        for (i, a) in stars.iter().enumerate() {
            for b in &stars[i + 1..] {
                assert!(
                    (a.pos.x - b.pos.x).abs() >= STAR_SPACING || (a.pos.y - b.pos.y).abs() >= STAR_SPACING
                );
            }
        }
    }

    #[test]
    fn test_pickups_behind_camera_are_dropped() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(8);
        let mut platforms = PlatformGenerator::new(&settings, &mut rng);
        platforms.set_platforms(Vec::new());

        let mut field = PickupField {
            pickups: vec![
                Pickup::new(PickupKind::Star, Vec2::new(10.0, 100.0)),
                Pickup::new(PickupKind::Heart, Vec2::new(500.0, 100.0)),
            ],
            next_magazine_x: f32::MAX,
            next_heart_x: f32::MAX,
        };
        field.spawn(200.0, 300.0, &platforms, &settings, &mut rng);
        assert_eq!(field.pickups().len(), 1);
        assert_eq!(field.pickups()[0].kind, PickupKind::Heart);
    }

    #[test]
    fn test_magazine_waits_for_platform_ahead() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(8);
        let mut platforms = PlatformGenerator::new(&settings, &mut rng);
        platforms.set_platforms(vec![Platform::new(Rect::new(0.0, 200.0, 100.0, 16.0), PlatformKind::Solid, 1)]);

        let mut field = PickupField {
            pickups: Vec::new(),
            next_magazine_x: 1000.0,
            next_heart_x: f32::MAX,
        };

        // Nothing past the camera's right edge: retried later
        field.spawn(0.0, 1200.0, &platforms, &settings, &mut rng);
        assert!(field.pickups().iter().all(|p| p.kind != PickupKind::Magazine));
        assert_eq!(field.next_magazine_x, 1000.0);

        platforms.set_platforms(vec![Platform::new(Rect::new(400.0, 150.0, 64.0, 8.0), PlatformKind::OneWay, 1)]);
        field.spawn(0.0, 1200.0, &platforms, &settings, &mut rng);
        let magazine = field
            .pickups()
            .iter()
            .find(|p| p.kind == PickupKind::Magazine)
            .expect("placed");
        assert_eq!(magazine.pos, Vec2::new(424.0, 118.0));
        assert!(field.next_magazine_x >= 1200.0 + 500.0);
    }
}
