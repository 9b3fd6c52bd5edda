//! Flat-color sprites for every entity

use glam::Vec2;

use super::vertex::colors;
use super::{Draw, Surface};
use crate::consts::*;
use crate::sim::collision::Rect;
use crate::sim::enemy::{Enemy, EnemyKind};
use crate::sim::particles::{Particle, ParticleColor};
use crate::sim::pickup::{Pickup, PickupKind};
use crate::sim::platform::{Platform, PlatformKind};
use crate::sim::player::{Attack, Player, PlayerState};
use crate::sim::projectile::{Owner, Projectile, ProjectileKind};
use crate::sim::state::GameState;

fn fill(surface: &mut dyn Surface, rect: Rect, camera: Vec2, color: [f32; 4]) {
    surface.fill_rect(rect.x - camera.x, rect.y - camera.y, rect.width, rect.height, color);
}

fn with_alpha(mut color: [f32; 4], alpha: f32) -> [f32; 4] {
    color[3] *= alpha;
    color
}

impl Draw for Platform {
    fn draw(&self, surface: &mut dyn Surface, camera: Vec2) {
        let color = match self.kind {
            PlatformKind::Solid if self.rect.height > 16.0 => colors::GROUND,
            PlatformKind::Solid => colors::SOLID,
            PlatformKind::OneWay => colors::ICE,
            PlatformKind::Moving(_) => colors::MOVING,
            PlatformKind::FireBearing { .. } => colors::SOLID,
        };
        fill(surface, self.rect, camera, color);

        if let Some(hazard) = self.hazard() {
            fill(surface, hazard, camera, colors::FIRE);
        }
    }
}

impl Draw for Player {
    fn draw(&self, surface: &mut dyn Surface, camera: Vec2) {
        // Blink while invulnerable
        if self.is_invulnerable() && (self.anim_time * 10.0) as u32 % 2 == 1 {
            return;
        }

        let color = match self.state {
            PlayerState::Hurt => colors::FOX_HURT,
            PlayerState::Kicking | PlayerState::Stabbing => colors::FOX_ATTACK,
            _ => colors::FOX,
        };
        fill(surface, self.bounds(), camera, color);

        if self.attack() == Some(Attack::Stab) {
            if let Some(blade) = self.attack_hitbox() {
                let blade = Rect::new(blade.x, blade.y + blade.height / 2.0 - 1.0, blade.width, 2.0);
                fill(surface, blade, camera, colors::BLADE);
            }
        }
    }
}

impl Draw for Enemy {
    fn draw(&self, surface: &mut dyn Surface, camera: Vec2) {
        let color = match self.kind {
            EnemyKind::Goblin => colors::GOBLIN,
            EnemyKind::RedGoblin => colors::RED_GOBLIN,
            EnemyKind::Bat => colors::BAT,
            EnemyKind::Bird => colors::BIRD,
            EnemyKind::ArmoredBeetle if self.is_damaged() => colors::BEETLE_DAMAGED,
            EnemyKind::ArmoredBeetle => colors::BEETLE,
        };
        fill(surface, self.bounds(), camera, color);
    }
}

impl Draw for Projectile {
    fn draw(&self, surface: &mut dyn Surface, camera: Vec2) {
        let color = match (self.kind, self.owner) {
            (ProjectileKind::Poop, _) => colors::POOP,
            (ProjectileKind::Bullet, Owner::Player) => colors::PLAYER_BULLET,
            (ProjectileKind::Bullet, Owner::Enemy) => colors::ENEMY_BULLET,
        };
        fill(surface, self.bounds(), camera, color);
    }
}

impl Draw for Pickup {
    fn draw(&self, surface: &mut dyn Surface, camera: Vec2) {
        let color = match self.kind {
            PickupKind::Star => colors::STAR,
            PickupKind::Magazine => colors::MAGAZINE,
            PickupKind::Heart => colors::HEART,
        };
        fill(surface, self.bounds(), camera, color);
    }
}

impl Draw for Particle {
    fn draw(&self, surface: &mut dyn Surface, camera: Vec2) {
        let color = match self.color {
            ParticleColor::Green => colors::GOBLIN,
            ParticleColor::Gold => colors::STAR,
            ParticleColor::Red => colors::HEART,
            ParticleColor::Silver => colors::MAGAZINE,
        };
        let rect = Rect::from_pos_size(self.pos, Vec2::splat(self.size));
        fill(surface, rect, camera, with_alpha(color, self.alpha()));
    }
}

/// Draw a full frame back to front
pub fn draw_scene(state: &GameState, surface: &mut dyn Surface, camera: Vec2) {
    surface.fill_rect(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT, colors::SKY);

    for platform in state.platforms.platforms() {
        platform.draw(surface, camera);
    }
    for pickup in state.pickups.pickups() {
        pickup.draw(surface, camera);
    }
    for enemy in state.enemies.enemies().iter().filter(|e| !e.dead) {
        enemy.draw(surface, camera);
    }
    for projectile in state.enemies.projectiles().iter().chain(&state.bullets) {
        if !projectile.dead {
            projectile.draw(surface, camera);
        }
    }
    state.player.draw(surface, camera);
    for particle in state.particles.particles() {
        particle.draw(surface, camera);
    }
}
