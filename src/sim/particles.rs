//! Cosmetic particle bursts
//!
//! Particles never affect gameplay.

use glam::Vec2;
use rand::Rng;

/// Downward pull on sparks (px/s^2)
pub const PARTICLE_GRAVITY: f32 = 400.0;
/// Upper bound on live particles
pub const MAX_PARTICLES: usize = 256;

/// Palette entry; the renderer maps these to colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Enemy hit, projectile destroyed
    Green,
    /// Star collected
    Gold,
    /// Heart collected, fire
    Red,
    /// Magazine collected
    Silver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    pub size: f32,
    pub age: f32,
    pub lifetime: f32,
}

impl Particle {
    /// 1 when fresh, 0 when expired
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Radial burst of `count` sparks around `pos`, biased upward
    pub fn emit(&mut self, pos: Vec2, count: usize, color: ParticleColor, rng: &mut impl Rng) {
        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            let speed = 50.0 + rng.random::<f32>() * 50.0;
            let vel = Vec2::new(angle.cos() * speed, angle.sin() * speed - 50.0);
            self.particles.push(Particle {
                pos,
                vel,
                color,
                size: 2.0 + rng.random::<f32>() * 2.0,
                age: 0.0,
                lifetime: 0.5 + rng.random::<f32>() * 0.5,
            });
        }
        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            particle.vel.y += PARTICLE_GRAVITY * dt;
            particle.age += dt;
        }
        self.particles.retain(|p| p.age < p.lifetime);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_expires() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::new();
        system.emit(Vec2::new(50.0, 50.0), 8, ParticleColor::Gold, &mut rng);
        assert_eq!(system.particles().len(), 8);
        assert!(system.particles().iter().all(|p| p.alpha() == 1.0));

        for _ in 0..30 {
            system.update(1.0 / 60.0);
        }
        assert!(system.particles().iter().all(|p| p.alpha() < 1.0));

        for _ in 0..40 {
            system.update(1.0 / 60.0);
        }
        assert!(system.particles().is_empty());
    }

    #[test]
    fn test_capped() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut system = ParticleSystem::new();
        for _ in 0..100 {
            system.emit(Vec2::ZERO, 8, ParticleColor::Green, &mut rng);
        }
        assert_eq!(system.particles().len(), MAX_PARTICLES);
    }
}
