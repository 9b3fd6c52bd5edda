//! Enemy and enemy-projectile bookkeeping
//!
//! Owns every live enemy and every enemy-fired projectile: spawning on a
//! distance schedule, per-step updates, despawning, and the player-facing
//! collision checks.

use glam::Vec2;
use rand::Rng;

use super::collision::{Rect, overlaps};
use super::enemy::{Enemy, EnemyKind, HIT_COOLDOWN};
use super::platform::{PlatformGenerator, PlatformKind};
use super::player::Player;
use super::projectile::Projectile;
use crate::consts::*;
use crate::settings::{Progress, Settings};

/// Maximum enemies alive at once
pub const MAX_ENEMIES: usize = 5;
/// First spawn happens once the player passes this x
pub const FIRST_SPAWN_X: f32 = 200.0;
/// Enemies this far behind the player are dropped
pub const DESPAWN_BEHIND: f32 = 100.0;
/// ...or this far past the camera's right edge
pub const DESPAWN_AHEAD: f32 = 400.0;
/// Spawn platforms must start within this distance of the spawn x
const SPAWN_WINDOW: f32 = 100.0;

/// Result of an enemy touching the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatOutcome {
    /// The player's attack or a stomp landed
    EnemyHit {
        kind: EnemyKind,
        killed: bool,
        points: u64,
        center: Vec2,
    },
    /// The enemy's body hit the player
    PlayerHit { kind: EnemyKind },
}

/// Result of an enemy projectile touching the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileOutcome {
    /// Swatted out of the air by an attack
    Destroyed { center: Vec2 },
    PlayerHit,
}

#[derive(Debug, Clone)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    /// Shots fired during the enemy pass, appended once it completes
    pending: Vec<Projectile>,
    next_spawn_x: f32,
    difficulty: f32,
}

impl Default for EnemyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyManager {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pending: Vec::new(),
            next_spawn_x: FIRST_SPAWN_X,
            difficulty: 1.0,
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut [Projectile] {
        &mut self.projectiles
    }

    pub fn push_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
        self.trim();
    }

    pub fn push_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn next_spawn_x(&self) -> f32 {
        self.next_spawn_x
    }

    /// Per-step upkeep: despawn, update survivors, spawn
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        player_x: f32,
        camera_x: f32,
        platforms: &PlatformGenerator,
        progress: Progress,
        settings: &Settings,
        rng: &mut impl Rng,
    ) {
        let far_right = camera_x + GAME_WIDTH + DESPAWN_AHEAD;
        let pending = &mut self.pending;
        self.enemies.retain_mut(|enemy| {
            let x = enemy.body.pos.x;
            if enemy.dead || x < player_x - DESPAWN_BEHIND || x > far_right || enemy.body.pos.y > GAME_HEIGHT + 100.0 {
                return false;
            }
            if let Some(shot) = enemy.update(dt, platforms, player_x) {
                pending.push(shot);
            }
            true
        });

        self.projectiles.retain_mut(|projectile| {
            if projectile.dead || projectile.is_out_of_bounds(player_x) {
                return false;
            }
            projectile.update(dt);
            true
        });
        self.projectiles.append(&mut self.pending);

        if player_x > self.next_spawn_x {
            let spawn_x = player_x + GAME_WIDTH;
            if let Some(kind) = choose_kind(progress, settings, rng) {
                self.spawn_enemy(kind, spawn_x, platforms, rng);
            }
            self.difficulty = settings.difficulty_multiplier(progress.distance);
            self.next_spawn_x = player_x + (150.0 + rng.random::<f32>() * 200.0) / self.difficulty;
        }

        self.trim();
    }

    /// Place `kind` on a random platform near `spawn_x`. Returns false when
    /// no platform qualifies. Moving platforms never host spawns, since
    /// patrol bounds are fixed at spawn time.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, spawn_x: f32, platforms: &PlatformGenerator, rng: &mut impl Rng) -> bool {
        let candidates: Vec<&Rect> = platforms
            .platforms()
            .iter()
            .filter(|p| !matches!(p.kind, PlatformKind::Moving(_)))
            .map(|p| &p.rect)
            .filter(|r| (r.x - spawn_x).abs() < SPAWN_WINDOW && r.y < GAME_HEIGHT - 50.0)
            .collect();
        if candidates.is_empty() {
            return false;
        }

        let rect = candidates[rng.random_range(0..candidates.len())];
        let enemy = Enemy::spawn_on(kind, rect, rng);
        log::debug!("Spawned {:?} at ({:.0}, {:.0})", kind, enemy.body.pos.x, enemy.body.pos.y);
        self.enemies.push(enemy);
        true
    }

    /// Oldest enemies go first when over the cap
    fn trim(&mut self) {
        if self.enemies.len() > MAX_ENEMIES {
            let excess = self.enemies.len() - MAX_ENEMIES;
            self.enemies.drain(..excess);
        }
    }

    /// First enemy that interacts with the player this step.
    ///
    /// An active attack hitbox wins; otherwise a falling player whose
    /// vertical midline is above the enemy's stomps it; otherwise a body
    /// overlap hurts the player.
    pub fn check_player_collisions(&mut self, player: &mut Player) -> Option<CombatOutcome> {
        let bounds = player.bounds();

        for enemy in self.enemies.iter_mut().filter(|e| !e.dead) {
            let enemy_bounds = enemy.bounds();

            if player.attack_hits(&enemy_bounds) {
                if enemy.hit_cooldown > 0.0 {
                    continue;
                }
                enemy.hit_cooldown = HIT_COOLDOWN;
                let killed = enemy.take_damage(1);
                return Some(enemy_hit(enemy, killed));
            }

            if !overlaps(&bounds, &enemy_bounds) {
                continue;
            }

            if player.body.vel.y > 0.0 && bounds.center().y < enemy_bounds.center().y {
                let killed = enemy.take_damage(1);
                player.bounce();
                return Some(enemy_hit(enemy, killed));
            }

            return Some(CombatOutcome::PlayerHit { kind: enemy.kind });
        }

        None
    }

    /// First enemy projectile touching the player or their attack
    pub fn check_projectile_collisions(&mut self, player: &Player) -> Option<ProjectileOutcome> {
        let bounds = player.bounds();

        for projectile in self.projectiles.iter_mut().filter(|p| !p.dead) {
            let shot = projectile.bounds();
            if player.attack_hits(&shot) {
                projectile.dead = true;
                return Some(ProjectileOutcome::Destroyed { center: shot.center() });
            }
            if overlaps(&bounds, &shot) {
                projectile.dead = true;
                return Some(ProjectileOutcome::PlayerHit);
            }
        }

        None
    }
}

fn enemy_hit(enemy: &Enemy, killed: bool) -> CombatOutcome {
    CombatOutcome::EnemyHit {
        kind: enemy.kind,
        killed,
        points: if killed { enemy.points() } else { 0 },
        center: enemy.bounds().center(),
    }
}

/// Weighted draw over the kinds eligible at `progress`
pub fn choose_kind(progress: Progress, settings: &Settings, rng: &mut impl Rng) -> Option<EnemyKind> {
    let eligible: Vec<EnemyKind> = EnemyKind::ALL
        .into_iter()
        .filter(|k| k.is_eligible(progress, settings))
        .collect();
    let total: u32 = eligible.iter().map(|k| k.stats().spawn_weight).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.random_range(0..total);
    for kind in eligible {
        let weight = kind.stats().spawn_weight;
        if roll < weight {
            return Some(kind);
        }
        roll -= weight;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::platform::{Platform, Sweep};
    use crate::sim::player::STOMP_BOUNCE;
    use crate::sim::projectile::Owner;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn empty_world() -> PlatformGenerator {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut world = PlatformGenerator::new(&Settings::default(), &mut rng);
        world.set_platforms(Vec::new());
        world
    }

    #[test]
    fn test_stomp_kills_goblin() {
        let mut manager = EnemyManager::new();
        manager.push_enemy(Enemy::new(EnemyKind::Goblin, Vec2::new(100.0, 58.0), 0.0, 200.0));

        let mut player = Player::new(Vec2::new(100.0, 50.0));
        player.body.vel.y = 50.0;

        let outcome = manager.check_player_collisions(&mut player);
        match outcome {
            Some(CombatOutcome::EnemyHit { killed, points, .. }) => {
                assert!(killed);
                assert_eq!(points, 10);
            }
            other => panic!("expected a stomp, got {:?}", other),
        }
        assert_eq!(player.body.vel.y, STOMP_BOUNCE);
        assert!(manager.enemies()[0].dead);
    }

    #[test]
    fn test_body_contact_hurts_player() {
        let mut manager = EnemyManager::new();
        manager.push_enemy(Enemy::new(EnemyKind::Bat, Vec2::new(105.0, 60.0), 0.0, 0.0));

        let mut player = Player::new(Vec2::new(100.0, 50.0));
        player.body.vel.y = -50.0;
        assert_eq!(
            manager.check_player_collisions(&mut player),
            Some(CombatOutcome::PlayerHit { kind: EnemyKind::Bat })
        );
    }

    #[test]
    fn test_beetle_needs_two_hits() {
        let mut manager = EnemyManager::new();
        manager.push_enemy(Enemy::new(EnemyKind::ArmoredBeetle, Vec2::new(110.0, 60.0), 0.0, 200.0));
        let world = empty_world();

        let mut player = Player::new(Vec2::new(100.0, 50.0));
        let mut input = crate::input::InputState::new();
        input.press(crate::input::Action::Kick);
        player.handle_input(&mut input, DT, 400.0);

        let first = manager.check_player_collisions(&mut player);
        assert!(matches!(first, Some(CombatOutcome::EnemyHit { killed: false, points: 0, .. })));

        // Same swing again on the next step: still cooling down
        assert_eq!(manager.check_player_collisions(&mut player), None);

        for _ in 0..20 {
            manager.enemies_mut()[0].update(DT, &world, 100.0);
        }
        manager.enemies_mut()[0].body.pos = Vec2::new(110.0, 60.0);
        let second = manager.check_player_collisions(&mut player);
        assert!(matches!(second, Some(CombatOutcome::EnemyHit { killed: true, points: 50, .. })));
    }

    #[test]
    fn test_enemies_behind_player_despawn() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let world = empty_world();
        let mut manager = EnemyManager::new();
        manager.push_enemy(Enemy::new(EnemyKind::Bat, Vec2::new(50.0, 100.0), 0.0, 0.0));
        manager.push_enemy(Enemy::new(EnemyKind::Bat, Vec2::new(400.0, 100.0), 0.0, 0.0));

        manager.update(DT, 160.0, 100.0, &world, Progress::new(0, 1), &settings, &mut rng);
        assert_eq!(manager.enemies().len(), 1);
        assert!(manager.enemies()[0].body.pos.x > 300.0);
    }

    #[test]
    fn test_enemy_shot_joins_projectiles_after_the_pass() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut world = empty_world();
        world.set_platforms(vec![Platform::new(Rect::new(0.0, 150.0, 400.0, 16.0), PlatformKind::Solid, 1)]);
        let mut manager = EnemyManager::new();
        manager.push_enemy(Enemy::new(EnemyKind::Goblin, Vec2::new(200.0, 136.0), 0.0, 400.0));

        manager.update(DT, 150.0, 50.0, &world, Progress::new(15, 1), &settings, &mut rng);
        let shots: Vec<&Projectile> = manager.projectiles().iter().filter(|p| p.owner == Owner::Enemy).collect();
        assert_eq!(shots.len(), 1);

        // Queued after the projectile pass, so it has not moved yet
        let goblin_x = manager.enemies()[0].body.pos.x;
        let fired_at = shots[0].body.pos.x;
        assert_eq!(fired_at, goblin_x - crate::sim::projectile::PROJECTILE_SIZE);

        manager.update(DT, 150.0, 50.0, &world, Progress::new(15, 1), &settings, &mut rng);
        assert_eq!(manager.projectiles().len(), 1);
        assert!((manager.projectiles()[0].body.pos.x - (fired_at - 100.0 * DT)).abs() < 1e-3);
    }

    #[test]
    fn test_cap_trims_oldest() {
        let mut manager = EnemyManager::new();
        for i in 0..8 {
            manager.push_enemy(Enemy::new(EnemyKind::Bat, Vec2::new(i as f32 * 10.0, 100.0), 0.0, 0.0));
        }
        assert_eq!(manager.enemies().len(), MAX_ENEMIES);
        assert_eq!(manager.enemies()[0].body.pos.x, 30.0);
    }

    #[test]
    fn test_spawn_schedule() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut world = empty_world();
        world.set_platforms(vec![Platform::new(Rect::new(500.0, 120.0, 64.0, 8.0), PlatformKind::OneWay, 1)]);
        let mut manager = EnemyManager::new();

        // Not yet past the first threshold
        manager.update(DT, 150.0, 50.0, &world, Progress::new(15, 1), &settings, &mut rng);
        assert!(manager.enemies().is_empty());
        assert_eq!(manager.next_spawn_x(), FIRST_SPAWN_X);

        manager.update(DT, 210.0, 100.0, &world, Progress::new(21, 1), &settings, &mut rng);
        assert_eq!(manager.enemies().len(), 1);
        let next = manager.next_spawn_x();
        assert!((210.0 + 150.0..=210.0 + 350.0).contains(&next));
    }

    #[test]
    fn test_no_platform_no_spawn() {
        let mut rng = Pcg32::seed_from_u64(5);
        let world = empty_world();
        let mut manager = EnemyManager::new();
        assert!(!manager.spawn_enemy(EnemyKind::Goblin, 500.0, &world, &mut rng));
        assert!(manager.enemies().is_empty());
    }

    #[test]
    fn test_moving_platforms_never_host_spawns() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut world = empty_world();
        let sweep = Sweep {
            left: 500.0,
            right: 580.0,
            direction: 1.0,
            speed: 40.0,
        };
        world.set_platforms(vec![Platform::new(
            Rect::new(500.0, 120.0, 48.0, 8.0),
            PlatformKind::Moving(sweep),
            4,
        )]);
        let mut manager = EnemyManager::new();
        assert!(!manager.spawn_enemy(EnemyKind::Goblin, 500.0, &world, &mut rng));

        world.set_platforms(vec![
            Platform::new(Rect::new(500.0, 120.0, 48.0, 8.0), PlatformKind::Moving(sweep), 4),
            Platform::new(Rect::new(540.0, 150.0, 64.0, 16.0), PlatformKind::Solid, 4),
        ]);
        for _ in 0..20 {
            assert!(manager.spawn_enemy(EnemyKind::Goblin, 500.0, &world, &mut rng));
        }
        assert!(manager.enemies().iter().all(|e| e.body.pos.x >= 540.0));
    }

    #[test]
    fn test_stage_one_never_draws_late_kinds() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..2_000 {
            let kind = choose_kind(Progress::new(50, 1), &settings, &mut rng).expect("eligible kinds");
            assert!(!matches!(kind, EnemyKind::RedGoblin | EnemyKind::Bird));
        }

        let mut seen_bird = false;
        for _ in 0..2_000 {
            seen_bird |= choose_kind(Progress::new(300, 3), &settings, &mut rng) == Some(EnemyKind::Bird);
        }
        assert!(seen_bird);
    }

    #[test]
    fn test_projectile_swatted_or_hits() {
        let mut manager = EnemyManager::new();
        manager.projectiles.push(Projectile::bullet(Owner::Enemy, Vec2::new(110.0, 60.0), -100.0));

        let player = Player::new(Vec2::new(100.0, 50.0));
        assert_eq!(manager.check_projectile_collisions(&player), Some(ProjectileOutcome::PlayerHit));
        assert!(manager.projectiles()[0].dead);
        assert_eq!(manager.check_projectile_collisions(&player), None);

        // Kick reaches past the body
        manager.projectiles.push(Projectile::bullet(Owner::Enemy, Vec2::new(126.0, 60.0), -100.0));
        let mut player = Player::new(Vec2::new(100.0, 50.0));
        let mut input = crate::input::InputState::new();
        input.press(crate::input::Action::Kick);
        player.handle_input(&mut input, DT, 400.0);
        assert!(matches!(
            manager.check_projectile_collisions(&player),
            Some(ProjectileOutcome::Destroyed { .. })
        ));
    }
}
