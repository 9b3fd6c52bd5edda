//! Projectiles: bullets (player and goblins) and bird droppings

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect};
use crate::consts::*;

pub const PROJECTILE_SIZE: f32 = 6.0;
/// Downward acceleration on droppings (px/s^2)
pub const POOP_GRAVITY: f32 = 300.0;
/// Bullets survive this far behind the player...
pub const BULLET_BEHIND_MARGIN: f32 = 150.0;
/// ...and this far past the right edge of a screen ahead of the player
pub const BULLET_AHEAD_MARGIN: f32 = 50.0;

/// Motion law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Straight horizontal line at constant speed
    Bullet,
    /// Ballistic fall
    Poop,
}

/// Who fired it (decides what it can hurt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// A projectile entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub owner: Owner,
    pub body: Body,
    pub dead: bool,
}

impl Projectile {
    pub fn bullet(owner: Owner, pos: Vec2, vx: f32) -> Self {
        let mut body = Body::new(pos, Vec2::splat(PROJECTILE_SIZE));
        body.vel.x = vx;
        Self {
            kind: ProjectileKind::Bullet,
            owner,
            body,
            dead: false,
        }
    }

    pub fn poop(pos: Vec2, vx: f32) -> Self {
        let mut body = Body::new(pos, Vec2::splat(PROJECTILE_SIZE));
        body.vel.x = vx;
        Self {
            kind: ProjectileKind::Poop,
            owner: Owner::Enemy,
            body,
            dead: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.kind == ProjectileKind::Poop {
            self.body.vel.y += POOP_GRAVITY * dt;
        }
        self.body.integrate(dt);
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    /// Left the live window around the player
    pub fn is_out_of_bounds(&self, player_x: f32) -> bool {
        let x = self.body.pos.x;
        let outside_window =
            x < player_x - BULLET_BEHIND_MARGIN || x > player_x + GAME_WIDTH + BULLET_AHEAD_MARGIN;
        match self.kind {
            ProjectileKind::Bullet => outside_window,
            ProjectileKind::Poop => outside_window || self.body.pos.y > DEATH_LINE,
        }
    }
}
