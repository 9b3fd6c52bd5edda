//! Procedural platform generation
//!
//! The generator owns every platform in the world. It keeps a `frontier`
//! (the rightmost generated x) a screen ahead of the camera and retires
//! platforms once they scroll far enough behind it.
//!
//! Reachability is guaranteed by construction: each new platform sits at
//! most `MAX_UP_DELTA` above and `MAX_DOWN_DELTA` below the previous one,
//! both inside the player's jump arc.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps};
use crate::consts::*;
use crate::settings::{Hazard, Progress, Settings};

/// Highest a platform may sit above the previous one (player jumps ~56px)
pub const MAX_UP_DELTA: f32 = 48.0;
/// Lowest a platform may sit below the previous one
pub const MAX_DOWN_DELTA: f32 = 80.0;
/// Keep platforms below the HUD strip
pub const MIN_PLATFORM_Y: f32 = 40.0;
/// Keep platforms above the bottom of the screen
pub const MAX_PLATFORM_Y: f32 = GAME_HEIGHT - 50.0;

/// Platforms further than this behind the camera are dropped
pub const RETIRE_MARGIN: f32 = 100.0;
/// Generation kicks in once the frontier is closer than this past the screen
pub const LOOKAHEAD: f32 = 200.0;
/// How far past the lookahead edge each batch generates
pub const BATCH_AHEAD: f32 = 400.0;

pub const GROUND_HEIGHT: f32 = 32.0;
pub const SOLID_HEIGHT: f32 = 16.0;
pub const THIN_HEIGHT: f32 = 8.0;

/// Fire hazard dimensions (sits on top of its platform)
pub const FIRE_WIDTH: f32 = 16.0;
pub const FIRE_HEIGHT: f32 = 12.0;

/// Chance of a moving platform once unlocked
const MOVING_CHANCE: f32 = 0.2;
/// Chance of a fire-bearing platform once unlocked
const FIRE_CHANCE: f32 = 0.15;
/// Plain platforms above this roll are one-way (70%)
const SOLID_CHANCE: f32 = 0.3;

/// Horizontal sweep of a moving platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    /// Leftmost x the platform's left edge reaches
    pub left: f32,
    /// Rightmost x the platform's left edge reaches
    pub right: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Pixels per second
    pub speed: f32,
}

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Collides on every side
    Solid,
    /// Landing-only; doubles as ice
    OneWay,
    /// Landing-only, oscillates horizontally
    Moving(Sweep),
    /// Solid with a fire hazard on top
    FireBearing { hazard: Rect },
}

/// A platform entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
    /// Stage this platform was generated in (palette, ice strength)
    pub stage: u32,
}

impl Platform {
    pub fn new(rect: Rect, kind: PlatformKind, stage: u32) -> Self {
        Self { rect, kind, stage }
    }

    /// Landing-only surfaces: one-way and moving
    pub fn is_landing_only(&self) -> bool {
        matches!(self.kind, PlatformKind::OneWay | PlatformKind::Moving(_))
    }

    /// Standing here makes the player slide
    pub fn is_ice(&self) -> bool {
        self.kind == PlatformKind::OneWay
    }

    /// Horizontal velocity (non-zero only for moving platforms)
    pub fn velocity_x(&self) -> f32 {
        match self.kind {
            PlatformKind::Moving(sweep) => sweep.direction * sweep.speed,
            _ => 0.0,
        }
    }

    pub fn hazard(&self) -> Option<Rect> {
        match self.kind {
            PlatformKind::FireBearing { hazard } => Some(hazard),
            _ => None,
        }
    }

    /// Advance a moving platform, bouncing at the ends of its sweep
    fn advance(&mut self, dt: f32) {
        if let PlatformKind::Moving(ref mut sweep) = self.kind {
            self.rect.x += sweep.direction * sweep.speed * dt;
            if self.rect.x <= sweep.left {
                self.rect.x = sweep.left;
                sweep.direction = 1.0;
            } else if self.rect.x >= sweep.right {
                self.rect.x = sweep.right;
                sweep.direction = -1.0;
            }
        }
    }

    /// Flip a moving platform's direction and shift it by `nudge`
    fn bounce(&mut self, nudge: f32) {
        if let PlatformKind::Moving(ref mut sweep) = self.kind {
            sweep.direction = -sweep.direction;
            self.rect.x = (self.rect.x + nudge).clamp(sweep.left, sweep.right);
        }
    }
}

/// Shape chosen for the next platform before it is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Solid,
    OneWay,
    Moving,
    Fire,
}

/// Owns and grows the platform sequence
#[derive(Debug, Clone)]
pub struct PlatformGenerator {
    platforms: Vec<Platform>,
    /// Rightmost generated x
    frontier: f32,
    /// Last generated platform (reachability anchor)
    last: Rect,
}

impl PlatformGenerator {
    /// Ground slab plus two screens of platforms
    pub fn new(settings: &Settings, rng: &mut impl Rng) -> Self {
        let ground = Rect::new(
            0.0,
            GAME_HEIGHT - GROUND_HEIGHT,
            GAME_WIDTH * 3.0,
            GROUND_HEIGHT,
        );
        let mut generator = Self {
            platforms: vec![Platform::new(ground, PlatformKind::Solid, 1)],
            frontier: 0.0,
            last: ground,
        };
        generator.extend(GAME_WIDTH * 2.0, Progress::new(0, 1), settings, rng);
        generator
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn frontier(&self) -> f32 {
        self.frontier
    }

    /// Generate platforms until the frontier reaches `to_x`
    pub fn extend(&mut self, to_x: f32, progress: Progress, settings: &Settings, rng: &mut impl Rng) {
        while self.frontier < to_x {
            let gap = (2.0 + rng.random::<f32>() * 3.0) * TILE_SIZE;
            let x = self.frontier + gap;

            let min_y = (self.last.y - MAX_UP_DELTA).max(MIN_PLATFORM_Y);
            let max_y = (self.last.y + MAX_DOWN_DELTA).min(MAX_PLATFORM_Y);
            let y = min_y + rng.random::<f32>() * (max_y - min_y);

            let style = pick_style(progress, settings, rng);
            let platform = match style {
                Style::Solid | Style::OneWay => {
                    let width = (3 + rng.random_range(0..6)) as f32 * TILE_SIZE;
                    if style == Style::Solid {
                        Platform::new(Rect::new(x, y, width, SOLID_HEIGHT), PlatformKind::Solid, progress.stage)
                    } else {
                        Platform::new(Rect::new(x, y, width, THIN_HEIGHT), PlatformKind::OneWay, progress.stage)
                    }
                }
                Style::Fire => {
                    // 3+ tiles of landing room on each side of the flame
                    let width = (7 + rng.random_range(0..3)) as f32 * TILE_SIZE;
                    let hazard = Rect::new(
                        x + (width - FIRE_WIDTH) / 2.0,
                        y - FIRE_HEIGHT,
                        FIRE_WIDTH,
                        FIRE_HEIGHT,
                    );
                    Platform::new(
                        Rect::new(x, y, width, SOLID_HEIGHT),
                        PlatformKind::FireBearing { hazard },
                        progress.stage,
                    )
                }
                Style::Moving => {
                    let width = (3 + rng.random_range(0..2)) as f32 * TILE_SIZE;
                    let travel = (3 + rng.random_range(0..3)) as f32 * TILE_SIZE;
                    let sweep = Sweep {
                        left: x,
                        right: x + travel,
                        direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
                        speed: 30.0 + rng.random::<f32>() * 20.0,
                    };
                    Platform::new(Rect::new(x, y, width, THIN_HEIGHT), PlatformKind::Moving(sweep), progress.stage)
                }
            };

            // The next gap is measured from the far end of a moving sweep
            self.frontier = match platform.kind {
                PlatformKind::Moving(sweep) => sweep.right + platform.rect.width,
                _ => platform.rect.right(),
            };
            self.last = platform.rect;

            log::debug!("Generated {:?} platform at ({:.0}, {:.0})", style, x, y);
            self.platforms.push(platform);
        }
    }

    /// Drop platforms whose trailing edge is left of `before_x`
    pub fn retire(&mut self, before_x: f32) {
        self.platforms.retain(|p| match p.kind {
            PlatformKind::Moving(sweep) => sweep.right + p.rect.width > before_x,
            _ => p.rect.right() > before_x,
        });
    }

    /// All platforms intersecting `rect`
    pub fn query(&self, rect: Rect) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(move |p| overlaps(&p.rect, &rect))
    }

    /// Does `rect` touch any fire hazard
    pub fn hazard_hit(&self, rect: &Rect) -> bool {
        self.platforms
            .iter()
            .filter_map(Platform::hazard)
            .any(|hazard| overlaps(&hazard, rect))
    }

    /// Per-step upkeep: move, retire behind the camera, generate ahead
    pub fn update(
        &mut self,
        dt: f32,
        camera_x: f32,
        progress: Progress,
        settings: &Settings,
        rng: &mut impl Rng,
    ) {
        for platform in &mut self.platforms {
            platform.advance(dt);
        }
        self.separate_moving_platforms();

        let right_edge = camera_x + GAME_WIDTH + LOOKAHEAD;
        if self.frontier < right_edge {
            self.extend(right_edge + BATCH_AHEAD, progress, settings, rng);
        }

        self.retire(camera_x - RETIRE_MARGIN);
    }

    /// Swap in a hand-built layout
    #[cfg(test)]
    pub(crate) fn set_platforms(&mut self, platforms: Vec<Platform>) {
        self.frontier = platforms.iter().map(|p| p.rect.right()).fold(0.0, f32::max);
        if let Some(last) = platforms.last() {
            self.last = last.rect;
        }
        self.platforms = platforms;
    }

    /// Moving platforms that run into each other both turn around
    fn separate_moving_platforms(&mut self) {
        let moving: Vec<usize> = self
            .platforms
            .iter()
            .enumerate()
            .filter(|(_, p)| matches!(p.kind, PlatformKind::Moving(_)))
            .map(|(i, _)| i)
            .collect();

        for (n, &i) in moving.iter().enumerate() {
            for &j in &moving[n + 1..] {
                let a = self.platforms[i].rect;
                let b = self.platforms[j].rect;
                let horizontal = a.x < b.right() && a.right() > b.x;
                let near_vertical = (a.y - b.y).abs() < a.height.max(b.height) + THIN_HEIGHT;
                if horizontal && near_vertical {
                    let (left, right) = if a.x <= b.x { (i, j) } else { (j, i) };
                    self.platforms[left].bounce(-1.0);
                    self.platforms[right].bounce(1.0);
                }
            }
        }
    }
}

/// Stage-gated weighted choice of the next platform's shape
fn pick_style(progress: Progress, settings: &Settings, rng: &mut impl Rng) -> Style {
    let roll = rng.random::<f32>();
    if settings.is_unlocked(Hazard::MovingPlatform, progress) && roll < MOVING_CHANCE {
        return Style::Moving;
    }
    if settings.is_unlocked(Hazard::FirePlatform, progress)
        && (MOVING_CHANCE..MOVING_CHANCE + FIRE_CHANCE).contains(&roll)
    {
        return Style::Fire;
    }
    if rng.random::<f32>() > SOLID_CHANCE {
        Style::OneWay
    } else {
        Style::Solid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn late_game() -> Progress {
        Progress::new(3000, 5)
    }

    #[test]
    fn test_new_has_ground_and_two_screens() {
        let mut rng = Pcg32::seed_from_u64(1);
        let generator = PlatformGenerator::new(&Settings::default(), &mut rng);
        let ground = &generator.platforms()[0];
        assert_eq!(ground.kind, PlatformKind::Solid);
        assert_eq!(ground.rect.y, GAME_HEIGHT - GROUND_HEIGHT);
        assert!(generator.frontier() >= GAME_WIDTH * 2.0);
        assert!(generator.platforms().len() > 1);
    }

    #[test]
    fn test_reachability_bound_over_10k_platforms() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(0xF0C5);
        let mut generator = PlatformGenerator::new(&settings, &mut rng);

        while generator.platforms().len() < 10_000 {
            let to_x = generator.frontier() + 5_000.0;
            generator.extend(to_x, late_game(), &settings, &mut rng);
        }

        for pair in generator.platforms().windows(2) {
            let (p1, p2) = (&pair[0].rect, &pair[1].rect);
            assert!(
                p2.y >= p1.y - MAX_UP_DELTA - 1e-3 && p2.y <= p1.y + MAX_DOWN_DELTA + 1e-3,
                "unreachable step {} -> {}",
                p1.y,
                p2.y
            );
            assert!(p2.x > p1.x, "platforms out of order");
        }
    }

    #[test]
    fn test_early_stages_have_only_plain_platforms() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut generator = PlatformGenerator::new(&settings, &mut rng);
        generator.extend(20_000.0, Progress::new(0, 1), &settings, &mut rng);

        assert!(
            generator
                .platforms()
                .iter()
                .all(|p| matches!(p.kind, PlatformKind::Solid | PlatformKind::OneWay))
        );
        let one_way = generator.platforms().iter().filter(|p| p.is_ice()).count();
        assert!(one_way * 2 > generator.platforms().len(), "one-way should be the majority");
    }

    #[test]
    fn test_late_stages_mix_in_hazards() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut generator = PlatformGenerator::new(&settings, &mut rng);
        generator.extend(50_000.0, late_game(), &settings, &mut rng);

        let moving = generator
            .platforms()
            .iter()
            .filter(|p| matches!(p.kind, PlatformKind::Moving(_)))
            .count();
        let fire: Vec<_> = generator.platforms().iter().filter(|p| p.hazard().is_some()).collect();
        assert!(moving > 0);
        assert!(!fire.is_empty());

        for platform in fire {
            let hazard = platform.hazard().expect("fire platform");
            assert!(hazard.x - platform.rect.x >= 3.0 * TILE_SIZE);
            assert!(platform.rect.right() - hazard.right() >= 3.0 * TILE_SIZE);
            assert_eq!(hazard.bottom(), platform.rect.y);
        }
    }

    #[test]
    fn test_moving_platform_stays_in_sweep() {
        let sweep = Sweep {
            left: 100.0,
            right: 150.0,
            direction: 1.0,
            speed: 40.0,
        };
        let mut platform = Platform::new(Rect::new(100.0, 100.0, 48.0, 8.0), PlatformKind::Moving(sweep), 4);
        for _ in 0..600 {
            platform.advance(1.0 / 60.0);
            assert!(platform.rect.x >= 100.0 && platform.rect.x <= 150.0);
        }
        assert!(platform.velocity_x().abs() == 40.0);
    }

    #[test]
    fn test_colliding_moving_platforms_reverse() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut generator = PlatformGenerator::new(&settings, &mut rng);
        generator.platforms.clear();

        let a = Sweep { left: 0.0, right: 200.0, direction: 1.0, speed: 40.0 };
        let b = Sweep { left: 0.0, right: 200.0, direction: -1.0, speed: 40.0 };
        generator.platforms.push(Platform::new(Rect::new(50.0, 100.0, 48.0, 8.0), PlatformKind::Moving(a), 4));
        generator.platforms.push(Platform::new(Rect::new(90.0, 104.0, 48.0, 8.0), PlatformKind::Moving(b), 4));

        generator.separate_moving_platforms();
        assert!(generator.platforms[0].velocity_x() < 0.0);
        assert!(generator.platforms[1].velocity_x() > 0.0);
        assert_eq!(generator.platforms[0].rect.x, 49.0);
        assert_eq!(generator.platforms[1].rect.x, 91.0);
    }

    #[test]
    fn test_update_retires_and_extends() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut generator = PlatformGenerator::new(&settings, &mut rng);

        let camera_x = 3000.0;
        generator.update(1.0 / 60.0, camera_x, Progress::new(300, 1), &settings, &mut rng);

        assert!(generator.frontier() >= camera_x + GAME_WIDTH + LOOKAHEAD);
        assert!(
            generator
                .platforms()
                .iter()
                .all(|p| p.rect.right() > camera_x - RETIRE_MARGIN)
        );
    }

    #[test]
    fn test_query_and_hazard() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut generator = PlatformGenerator::new(&settings, &mut rng);
        generator.platforms.clear();

        let hazard = Rect::new(156.0, 88.0, FIRE_WIDTH, FIRE_HEIGHT);
        generator.platforms.push(Platform::new(
            Rect::new(100.0, 100.0, 128.0, 16.0),
            PlatformKind::FireBearing { hazard },
            5,
        ));
        generator.platforms.push(Platform::new(Rect::new(300.0, 100.0, 64.0, 8.0), PlatformKind::OneWay, 5));

        assert_eq!(generator.query(Rect::new(90.0, 90.0, 20.0, 20.0)).count(), 1);
        assert_eq!(generator.query(Rect::new(0.0, 0.0, 400.0, 200.0)).count(), 2);
        assert_eq!(generator.query(Rect::new(0.0, 0.0, 50.0, 50.0)).count(), 0);

        assert!(generator.hazard_hit(&Rect::new(150.0, 80.0, 24.0, 24.0)));
        assert!(!generator.hazard_hit(&Rect::new(100.0, 76.0, 24.0, 24.0)));
    }
}
