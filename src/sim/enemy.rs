//! Enemy kinds and their per-step behaviour
//!
//! Every enemy shares one record; what differs between kinds lives in the
//! static `EnemyStats` table so the manager, renderer and scoring all read
//! the same numbers.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect, is_resting_on, lands_on_top};
use super::platform::PlatformGenerator;
use super::projectile::{Owner, PROJECTILE_SIZE, Projectile, ProjectileKind};
use crate::settings::{Hazard, Progress, Settings};

/// Gravity for walking enemies (px/s^2)
pub const PATROL_GRAVITY: f32 = 600.0;
/// Ranged enemies only fire at a player this close horizontally
pub const SHOOT_RANGE: f32 = 200.0;
/// Minimum time between two player hits landing on the same enemy
pub const HIT_COOLDOWN: f32 = 0.3;
const GROUND_EPSILON: f32 = 0.01;

/// How an enemy moves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Walk back and forth across the spawning platform
    Patrol,
    /// Drift left along a sine wave around the spawn height
    Fly { amplitude: f32, frequency: f32 },
}

/// Optional ranged attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranged {
    pub projectile: ProjectileKind,
    pub interval_min: f32,
    pub interval_max: f32,
    /// Horizontal speed of fired projectiles
    pub speed: f32,
}

/// Static per-kind parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub size: Vec2,
    pub speed: f32,
    pub hp: u32,
    pub points: u64,
    pub motion: Motion,
    pub ranged: Option<Ranged>,
    /// Relative weight in the spawn draw
    pub spawn_weight: u32,
}

const GOBLIN: EnemyStats = EnemyStats {
    size: Vec2::new(14.0, 14.0),
    speed: 30.0,
    hp: 1,
    points: 10,
    motion: Motion::Patrol,
    ranged: Some(Ranged {
        projectile: ProjectileKind::Bullet,
        interval_min: 2.0,
        interval_max: 4.0,
        speed: 100.0,
    }),
    spawn_weight: 45,
};

const RED_GOBLIN: EnemyStats = EnemyStats {
    size: Vec2::new(14.0, 14.0),
    speed: 45.0,
    hp: 1,
    points: 25,
    motion: Motion::Patrol,
    ranged: Some(Ranged {
        projectile: ProjectileKind::Bullet,
        interval_min: 0.8,
        interval_max: 1.4,
        speed: 170.0,
    }),
    spawn_weight: 15,
};

const BAT: EnemyStats = EnemyStats {
    size: Vec2::new(12.0, 10.0),
    speed: 60.0,
    hp: 1,
    points: 20,
    motion: Motion::Fly {
        amplitude: 30.0,
        frequency: 3.0,
    },
    ranged: None,
    spawn_weight: 20,
};

const BIRD: EnemyStats = EnemyStats {
    size: Vec2::new(16.0, 12.0),
    speed: 50.0,
    hp: 1,
    points: 30,
    motion: Motion::Fly {
        amplitude: 12.0,
        frequency: 2.0,
    },
    ranged: Some(Ranged {
        projectile: ProjectileKind::Poop,
        interval_min: 1.5,
        interval_max: 2.5,
        speed: 0.0,
    }),
    spawn_weight: 10,
};

const ARMORED_BEETLE: EnemyStats = EnemyStats {
    size: Vec2::new(16.0, 12.0),
    speed: 20.0,
    hp: 2,
    points: 50,
    motion: Motion::Patrol,
    ranged: None,
    spawn_weight: 10,
};

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Goblin,
    RedGoblin,
    Bat,
    Bird,
    ArmoredBeetle,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Goblin,
        EnemyKind::RedGoblin,
        EnemyKind::Bat,
        EnemyKind::Bird,
        EnemyKind::ArmoredBeetle,
    ];

    pub fn stats(self) -> &'static EnemyStats {
        match self {
            EnemyKind::Goblin => &GOBLIN,
            EnemyKind::RedGoblin => &RED_GOBLIN,
            EnemyKind::Bat => &BAT,
            EnemyKind::Bird => &BIRD,
            EnemyKind::ArmoredBeetle => &ARMORED_BEETLE,
        }
    }

    /// Whether this kind may spawn yet
    pub fn is_eligible(self, progress: Progress, settings: &Settings) -> bool {
        match self {
            EnemyKind::RedGoblin => settings.is_unlocked(Hazard::RedGoblin, progress),
            EnemyKind::Bird => settings.is_unlocked(Hazard::Bird, progress),
            _ => true,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    pub hp: u32,
    pub max_hp: u32,
    pub dead: bool,
    pub anim_time: f32,
    /// Player hits are ignored until this runs out
    pub hit_cooldown: f32,
    patrol_left: f32,
    patrol_right: f32,
    base_y: f32,
    wave_time: f32,
    shoot_cooldown: f32,
    shoot_interval: f32,
}

impl Enemy {
    /// Enemy at `pos` patrolling `[left, right]`; starts walking left
    pub fn new(kind: EnemyKind, pos: Vec2, left: f32, right: f32) -> Self {
        let stats = kind.stats();
        let mut body = Body::new(pos, stats.size);
        body.vel.x = -stats.speed;
        Self {
            kind,
            body,
            hp: stats.hp,
            max_hp: stats.hp,
            dead: false,
            anim_time: 0.0,
            hit_cooldown: 0.0,
            patrol_left: left,
            patrol_right: right,
            base_y: pos.y,
            wave_time: 0.0,
            shoot_cooldown: 0.0,
            shoot_interval: stats.ranged.map_or(0.0, |r| r.interval_min),
        }
    }

    /// Draw the per-instance randomness: fire interval and wave phase
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        let stats = self.kind.stats();
        if let Some(ranged) = stats.ranged {
            self.shoot_interval = ranged.interval_min + rng.random::<f32>() * (ranged.interval_max - ranged.interval_min);
        }
        if matches!(stats.motion, Motion::Fly { .. }) {
            self.wave_time = rng.random::<f32>() * std::f32::consts::TAU;
        }
    }

    /// Place a new enemy of `kind` relative to `platform`
    pub fn spawn_on(kind: EnemyKind, platform: &Rect, rng: &mut impl Rng) -> Self {
        let size = kind.stats().size;
        let pos = match kind {
            EnemyKind::Bat => Vec2::new(platform.x + platform.width / 2.0, platform.y - 60.0),
            EnemyKind::Bird => Vec2::new(platform.x + platform.width / 2.0, (platform.y - 90.0).max(30.0)),
            _ => Vec2::new(platform.x + 20.0, platform.y - size.y - 2.0),
        };
        let mut enemy = Self::new(kind, pos, platform.x, platform.right());
        enemy.randomize(rng);
        enemy
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    pub fn points(&self) -> u64 {
        self.kind.stats().points
    }

    /// Took a hit but survived (beetle shell darkens)
    pub fn is_damaged(&self) -> bool {
        self.hp < self.max_hp
    }

    /// Returns true if this call killed the enemy
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.dead {
            return false;
        }
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            self.dead = true;
            return true;
        }
        false
    }

    /// Move, collide and maybe fire. Returns a projectile to hand to the
    /// manager.
    pub fn update(&mut self, dt: f32, platforms: &PlatformGenerator, player_x: f32) -> Option<Projectile> {
        let stats = self.kind.stats();
        self.anim_time += dt;
        if self.hit_cooldown > 0.0 {
            self.hit_cooldown = (self.hit_cooldown - dt).max(0.0);
        }

        match stats.motion {
            Motion::Patrol => self.patrol(dt, stats.speed, platforms),
            Motion::Fly { amplitude, frequency } => {
                self.body.pos.x += self.body.vel.x * dt;
                self.wave_time += dt * frequency;
                self.body.pos.y = self.base_y + self.wave_time.sin() * amplitude;
            }
        }

        let ranged = stats.ranged?;
        self.shoot_cooldown -= dt;
        if self.shoot_cooldown > 0.0 || (self.body.pos.x - player_x).abs() >= SHOOT_RANGE {
            return None;
        }
        self.shoot_cooldown = self.shoot_interval;

        let center = self.bounds().center();
        let shot = match ranged.projectile {
            ProjectileKind::Bullet => {
                let direction = if player_x >= self.body.pos.x { 1.0 } else { -1.0 };
                let x = if direction > 0.0 {
                    self.body.pos.x + self.body.size.x
                } else {
                    self.body.pos.x - PROJECTILE_SIZE
                };
                Projectile::bullet(
                    Owner::Enemy,
                    Vec2::new(x, center.y - PROJECTILE_SIZE / 2.0),
                    direction * ranged.speed,
                )
            }
            ProjectileKind::Poop => Projectile::poop(
                Vec2::new(center.x - PROJECTILE_SIZE / 2.0, self.body.pos.y + self.body.size.y),
                ranged.speed,
            ),
        };
        Some(shot)
    }

    fn patrol(&mut self, dt: f32, speed: f32, platforms: &PlatformGenerator) {
        self.body.pos.x += self.body.vel.x * dt;
        if self.body.pos.x <= self.patrol_left {
            self.body.pos.x = self.patrol_left;
            self.body.vel.x = speed;
        } else if self.body.pos.x + self.body.size.x >= self.patrol_right {
            self.body.pos.x = self.patrol_right - self.body.size.x;
            self.body.vel.x = -speed;
        }

        if !self.body.grounded {
            self.body.vel.y += PATROL_GRAVITY * dt;
        }
        self.body.pos.y += self.body.vel.y * dt;

        self.body.grounded = false;
        let nearby = self.bounds().inflate(10.0);
        for platform in platforms.query(nearby) {
            let rect = &platform.rect;
            if lands_on_top(&self.body, rect, dt) || is_resting_on(&self.body, rect, GROUND_EPSILON) {
                self.body.pos.y = rect.y - self.body.size.y;
                self.body.vel.y = 0.0;
                self.body.grounded = true;
            }
        }
    }
}
