//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically: the mode
//! machine, the per-step update order while playing, scoring, and the
//! frame accumulator that turns wall-clock time into whole steps.

use glam::Vec2;

use super::collision::overlaps;
use super::manager::{CombatOutcome, ProjectileOutcome};
use super::particles::ParticleColor;
use super::pickup::PickupKind;
use super::state::{GameMode, GameState};
use crate::audio::{AudioSink, SoundKind};
use crate::consts::*;
use crate::input::{Action, InputSource};
use crate::settings::Settings;

/// Points for destroying an enemy projectile
pub const PROJECTILE_SCORE: u64 = 2;

/// Capabilities a step may use
pub struct StepContext<'a> {
    pub input: &'a mut dyn InputSource,
    pub audio: &'a mut dyn AudioSink,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, ctx: &mut StepContext<'_>, dt: f32) {
    let pause = ctx.input.is_action_pressed(Action::Pause);

    match state.mode {
        GameMode::Splash | GameMode::GameOver => {
            if pause {
                flush_presses(ctx.input);
                state.start();
            }
            return;
        }
        GameMode::Paused => {
            if pause {
                flush_presses(ctx.input);
                state.mode = GameMode::Playing;
                log::debug!("Resumed");
            }
            return;
        }
        GameMode::Playing => {
            if pause {
                state.mode = GameMode::Paused;
                log::debug!("Paused");
                return;
            }
        }
    }

    step_playing(state, ctx, dt);
}

/// Discard edges that arrived while the game wasn't listening
fn flush_presses(input: &mut dyn InputSource) {
    for action in Action::ALL {
        input.is_action_pressed(action);
    }
}

fn step_playing(state: &mut GameState, ctx: &mut StepContext<'_>, dt: f32) {
    let progress = state.progress();

    // Player
    let ice = state.settings.ice_acceleration(progress);
    let outcome = state.player.handle_input(ctx.input, dt, ice);
    if let Some(sound) = outcome.sound {
        ctx.audio.play_sound(sound);
    }
    if let Some(shot) = outcome.shot {
        state.bullets.push(shot);
    }
    if state.player.update(dt, &state.platforms) {
        ctx.audio.play_sound(SoundKind::Land);
    }

    // World
    let player_x = state.player.body.pos.x;
    state.camera.follow(player_x);
    state
        .platforms
        .update(dt, state.camera.x, progress, &state.settings, &mut state.rng);
    state.enemies.update(
        dt,
        player_x,
        state.camera.x,
        &state.platforms,
        progress,
        &state.settings,
        &mut state.rng,
    );
    state.bullets.retain_mut(|bullet| {
        if bullet.dead || bullet.is_out_of_bounds(player_x) {
            return false;
        }
        bullet.update(dt);
        true
    });

    resolve_combat(state, ctx);

    // Pickups
    state.pickups.update(dt);
    for item in state.pickups.collect(&mut state.player) {
        state.score += item.score;
        ctx.audio.play_sound(SoundKind::Star);
        let color = match item.kind {
            PickupKind::Star => ParticleColor::Gold,
            PickupKind::Magazine => ParticleColor::Silver,
            PickupKind::Heart => ParticleColor::Red,
        };
        state.particles.emit(item.center, 6, color, &mut state.rng);
    }
    state.pickups.spawn(
        state.camera.x,
        state.player.body.pos.x,
        &state.platforms,
        &state.settings,
        &mut state.rng,
    );

    state.particles.update(dt);

    if let Some(stage) = state.update_progress() {
        log::info!("Stage {} reached at {}m", stage, state.distance);
    }

    if state.player.body.pos.y > DEATH_LINE || state.player.health == 0 {
        state.mode = GameMode::GameOver;
        ctx.audio.play_sound(SoundKind::Death);
        log::info!(
            "Game over: score {}, distance {}m, stage {}",
            state.score,
            state.distance,
            state.stage
        );
    }

    state.shake.update(dt);
    state.time_ticks += 1;
}

/// Enemies, enemy projectiles, player bullets and fire, in that order
fn resolve_combat(state: &mut GameState, ctx: &mut StepContext<'_>) {
    match state.enemies.check_player_collisions(&mut state.player) {
        Some(CombatOutcome::EnemyHit { kind, killed, points, center }) => {
            ctx.audio.play_sound(SoundKind::Enemy);
            state.score += points;
            state.particles.emit(center, 8, ParticleColor::Green, &mut state.rng);
            state.shake.trigger(2.0, 0.1);
            if killed {
                log::debug!("{:?} defeated (+{})", kind, points);
            }
        }
        Some(CombatOutcome::PlayerHit { .. }) => hurt_player(state, ctx, 4.0, 0.2),
        None => {}
    }

    match state.enemies.check_projectile_collisions(&state.player) {
        Some(ProjectileOutcome::Destroyed { center }) => {
            ctx.audio.play_sound(SoundKind::Enemy);
            state.score += PROJECTILE_SCORE;
            state.particles.emit(center, 6, ParticleColor::Green, &mut state.rng);
        }
        Some(ProjectileOutcome::PlayerHit) => hurt_player(state, ctx, 3.0, 0.15),
        None => {}
    }

    for bullet in state.bullets.iter_mut().filter(|b| !b.dead) {
        let shot = bullet.bounds();

        if let Some(enemy) = state
            .enemies
            .enemies_mut()
            .iter_mut()
            .find(|e| !e.dead && overlaps(&e.bounds(), &shot))
        {
            bullet.dead = true;
            if enemy.take_damage(1) {
                state.score += enemy.points();
            }
            ctx.audio.play_sound(SoundKind::Enemy);
            state
                .particles
                .emit(enemy.bounds().center(), 8, ParticleColor::Green, &mut state.rng);
            continue;
        }

        if let Some(projectile) = state
            .enemies
            .projectiles_mut()
            .iter_mut()
            .find(|p| !p.dead && overlaps(&p.bounds(), &shot))
        {
            bullet.dead = true;
            projectile.dead = true;
            state.score += PROJECTILE_SCORE;
            ctx.audio.play_sound(SoundKind::Enemy);
            state.particles.emit(shot.center(), 6, ParticleColor::Green, &mut state.rng);
        }
    }

    if state.platforms.hazard_hit(&state.player.bounds()) {
        let center = state.player.bounds().center();
        if state.player.take_damage() {
            ctx.audio.play_sound(SoundKind::Damage);
            state.shake.trigger(3.0, 0.15);
            state.particles.emit(center, 6, ParticleColor::Red, &mut state.rng);
        }
    }
}

fn hurt_player(state: &mut GameState, ctx: &mut StepContext<'_>, intensity: f32, duration: f32) {
    if state.player.take_damage() {
        ctx.audio.play_sound(SoundKind::Damage);
        state.shake.trigger(intensity, duration);
    }
}

/// Converts variable frame times into whole simulation steps
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `frame_dt` (capped at `MAX_FRAME_DT`) and return how many steps
    /// to run now. Backlog beyond `MAX_SUBSTEPS` is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator %= SIM_DT;
        }
        steps
    }

    /// Leftover time as a fraction of a step (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / SIM_DT
    }
}

/// A session plus its clock: the host calls `frame` once per display frame
/// and renders afterwards.
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    clock: FixedTimestep,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed, settings),
            clock: FixedTimestep::new(),
        }
    }

    /// Run as many fixed steps as `frame_dt` pays for. Returns the count.
    pub fn frame(&mut self, frame_dt: f32, input: &mut dyn InputSource, audio: &mut dyn AudioSink) -> u32 {
        let steps = self.clock.advance(frame_dt);
        let mut ctx = StepContext { input, audio };
        for _ in 0..steps {
            tick(&mut self.state, &mut ctx, SIM_DT);
        }
        steps
    }

    /// Camera position including shake, for the renderer
    pub fn view_offset(&self) -> Vec2 {
        self.state.camera.offset() + self.state.shake.offset(self.state.time_ticks)
    }
}
