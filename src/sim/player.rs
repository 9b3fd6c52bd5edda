//! The player character: movement, jumping, attacks and damage
//!
//! Input is read through the `InputSource` capability in `handle_input`;
//! physics and platform collision run in `update`. The two are split so the
//! loop can poll input, then advance physics, in its fixed order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Body, Rect, is_resting_on, lands_on_top, overlaps, resolve_solid_collision};
use super::platform::PlatformGenerator;
use super::projectile::{Owner, PROJECTILE_SIZE, Projectile};
use crate::approach;
use crate::audio::SoundKind;
use crate::input::{Action, InputSource};

pub const PLAYER_SIZE: f32 = 24.0;
/// Run speed (px/s)
pub const RUN_SPEED: f32 = 120.0;
/// Initial jump velocity (negative = up)
pub const JUMP_VELOCITY: f32 = -300.0;
pub const GRAVITY: f32 = 800.0;

/// Grace period after leaving the ground during which a jump still counts
pub const COYOTE_TIME: f32 = 0.1;
/// How long an early jump press is remembered
pub const JUMP_BUFFER: f32 = 0.15;

pub const KICK_DURATION: f32 = 0.25;
/// Forward drift during a kick
pub const KICK_NUDGE: f32 = 50.0;
pub const STAB_DURATION: f32 = 0.2;
pub const HURT_DURATION: f32 = 0.3;
pub const INVULNERABLE_DURATION: f32 = 1.0;
/// Damage knockback: (-facing * x, y)
pub const KNOCKBACK: Vec2 = Vec2::new(100.0, -200.0);
/// Upward velocity after stomping an enemy
pub const STOMP_BOUNCE: f32 = -200.0;

pub const MAX_HEALTH: u32 = 3;
pub const MAX_AMMO: u32 = 10;
pub const SHOT_SPEED: f32 = 250.0;

/// Resting contact tolerance for ground detection
const GROUND_EPSILON: f32 = 0.01;
/// Platform search margin around the player
const QUERY_MARGIN: f32 = 20.0;

/// Animation / control state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Idle,
    Running,
    Jumping,
    Falling,
    Kicking,
    Stabbing,
    Hurt,
}

impl PlayerState {
    /// States that ignore movement input until they expire
    pub fn is_locked(self) -> bool {
        matches!(self, PlayerState::Kicking | PlayerState::Stabbing | PlayerState::Hurt)
    }
}

/// Melee attack in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attack {
    Kick,
    Stab,
}

/// What one input poll produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputOutcome {
    pub sound: Option<SoundKind>,
    pub shot: Option<Projectile>,
}

/// The ninja fox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub state: PlayerState,
    /// +1 right, -1 left
    pub facing: f32,
    pub health: u32,
    pub max_health: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    /// Standing on a one-way (ice) platform
    pub on_ice: bool,
    /// One mid-air jump, armed by a ground jump
    pub double_jump_available: bool,
    /// Time spent in the current state
    pub state_time: f32,
    pub anim_time: f32,
    coyote_counter: f32,
    jump_buffer_counter: f32,
    attack: Option<Attack>,
    attack_time: f32,
    invulnerable_time: f32,
    /// Horizontal velocity of the moving platform underfoot
    carry: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(PLAYER_SIZE)),
            state: PlayerState::Idle,
            facing: 1.0,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            ammo: MAX_AMMO,
            max_ammo: MAX_AMMO,
            on_ice: false,
            double_jump_available: false,
            state_time: 0.0,
            anim_time: 0.0,
            coyote_counter: 0.0,
            jump_buffer_counter: 0.0,
            attack: None,
            attack_time: 0.0,
            invulnerable_time: 0.0,
            carry: 0.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    pub fn attack(&self) -> Option<Attack> {
        self.attack
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_time > 0.0
    }

    /// Read actions for this step.
    ///
    /// Locked states (kick, stab, hurt) skip input entirely; presses made
    /// meanwhile stay pending until the lock ends.
    pub fn handle_input(&mut self, input: &mut dyn InputSource, dt: f32, ice_acceleration: f32) -> InputOutcome {
        let mut outcome = InputOutcome::default();
        if self.state.is_locked() {
            return outcome;
        }

        let mut target_vx = 0.0;
        if input.is_action_down(Action::Left) {
            target_vx = -RUN_SPEED;
            self.facing = -1.0;
        }
        if input.is_action_down(Action::Right) {
            target_vx = RUN_SPEED;
            self.facing = 1.0;
        }

        if self.on_ice && self.body.grounded {
            self.body.vel.x = approach(self.body.vel.x, target_vx, ice_acceleration * dt);
        } else {
            self.body.vel.x = target_vx;
        }

        if input.is_action_pressed(Action::Jump) {
            self.jump_buffer_counter = JUMP_BUFFER;
        }
        if self.jump_buffer_counter > 0.0 {
            if self.coyote_counter > 0.0 {
                self.body.vel.y = JUMP_VELOCITY;
                self.jump_buffer_counter = 0.0;
                self.coyote_counter = 0.0;
                self.body.grounded = false;
                self.double_jump_available = true;
                outcome.sound = Some(SoundKind::Jump);
                return outcome;
            } else if self.double_jump_available && !self.body.grounded {
                self.body.vel.y = JUMP_VELOCITY;
                self.jump_buffer_counter = 0.0;
                self.double_jump_available = false;
                outcome.sound = Some(SoundKind::Jump);
                return outcome;
            }
        }

        // Attacks work in the air too
        if input.is_action_pressed(Action::Kick) {
            self.start_attack(Attack::Kick);
            outcome.sound = Some(SoundKind::Kick);
            return outcome;
        }
        if input.is_action_pressed(Action::Stab) {
            self.start_attack(Attack::Stab);
            outcome.sound = Some(SoundKind::Sword);
            return outcome;
        }

        if input.is_action_pressed(Action::Shoot) && self.ammo > 0 {
            self.ammo -= 1;
            let x = if self.facing > 0.0 {
                self.body.pos.x + self.body.size.x
            } else {
                self.body.pos.x - PROJECTILE_SIZE
            };
            let y = self.body.pos.y + self.body.size.y / 2.0 - PROJECTILE_SIZE / 2.0;
            outcome.shot = Some(Projectile::bullet(Owner::Player, Vec2::new(x, y), self.facing * SHOT_SPEED));
            outcome.sound = Some(SoundKind::Shoot);
        }

        outcome
    }

    fn start_attack(&mut self, attack: Attack) {
        self.attack = Some(attack);
        self.state_time = 0.0;
        match attack {
            Attack::Kick => {
                self.state = PlayerState::Kicking;
                self.attack_time = KICK_DURATION;
                self.body.vel.x = self.facing * KICK_NUDGE;
            }
            Attack::Stab => {
                self.state = PlayerState::Stabbing;
                self.attack_time = STAB_DURATION;
                self.body.vel.x = 0.0;
            }
        }
    }

    /// Apply one hit. Returns false (and changes nothing) while invulnerable.
    pub fn take_damage(&mut self) -> bool {
        if self.is_invulnerable() {
            return false;
        }

        self.health = self.health.saturating_sub(1);
        self.invulnerable_time = INVULNERABLE_DURATION;
        self.attack = None;
        self.attack_time = 0.0;
        self.state = PlayerState::Hurt;
        self.state_time = 0.0;
        self.body.vel = Vec2::new(-self.facing * KNOCKBACK.x, KNOCKBACK.y);
        self.body.grounded = false;
        true
    }

    /// Bounce off a stomped enemy
    pub fn bounce(&mut self) {
        self.body.vel.y = STOMP_BOUNCE;
        self.body.grounded = false;
    }

    /// Timers, gravity, integration and platform collision.
    /// Returns true on the step the player touches down.
    pub fn update(&mut self, dt: f32, platforms: &PlatformGenerator) -> bool {
        if self.jump_buffer_counter > 0.0 {
            self.jump_buffer_counter -= dt;
        }
        if self.invulnerable_time > 0.0 {
            self.invulnerable_time = (self.invulnerable_time - dt).max(0.0);
        }
        self.state_time += dt;
        self.anim_time += dt;

        if self.attack.is_some() {
            self.attack_time -= dt;
            if self.attack_time <= 0.0 {
                self.attack = None;
                self.state = PlayerState::Idle;
            }
        }
        if self.state == PlayerState::Hurt && self.state_time > HURT_DURATION {
            self.state = PlayerState::Idle;
        }

        if !self.body.grounded {
            self.body.vel.y += GRAVITY * dt;
        }
        self.body.integrate(dt);
        self.body.pos.x += self.carry * dt;

        if self.body.pos.x < 0.0 {
            self.body.pos.x = 0.0;
            self.body.vel.x = 0.0;
        }

        let was_grounded = self.body.grounded;
        self.body.grounded = false;
        self.on_ice = false;
        self.carry = 0.0;

        let nearby = self.bounds().inflate(QUERY_MARGIN);
        for platform in platforms.query(nearby) {
            let rect = platform.rect;
            if self.lands_on(&rect, dt) {
                self.body.pos.y = rect.y - self.body.size.y;
                self.body.vel.y = 0.0;
                self.body.grounded = true;
                self.on_ice = platform.is_ice();
                self.carry = platform.velocity_x();
            } else if !platform.is_landing_only() {
                resolve_solid_collision(&mut self.body, &rect);
            }
        }

        if self.body.grounded {
            self.coyote_counter = COYOTE_TIME;
            self.double_jump_available = false;
        } else {
            self.coyote_counter -= dt;
        }

        if !self.state.is_locked() {
            self.state = if !self.body.grounded {
                if self.body.vel.y < 0.0 {
                    PlayerState::Jumping
                } else {
                    PlayerState::Falling
                }
            } else if self.body.vel.x.abs() > 0.0 {
                PlayerState::Running
            } else {
                PlayerState::Idle
            };
        }

        !was_grounded && self.body.grounded
    }

    /// Crossing the top this step, or resting on it
    fn lands_on(&self, rect: &Rect, dt: f32) -> bool {
        lands_on_top(&self.body, rect, dt) || is_resting_on(&self.body, rect, GROUND_EPSILON)
    }

    /// Active melee hitbox, if attacking
    pub fn attack_hitbox(&self) -> Option<Rect> {
        let Body { pos, size, .. } = self.body;
        match self.attack? {
            Attack::Kick => Some(Rect::new(pos.x - 10.0, pos.y - 10.0, size.x + 20.0, size.y + 20.0)),
            Attack::Stab => {
                let x = if self.facing > 0.0 { pos.x + size.x - 8.0 } else { pos.x - 8.0 };
                Some(Rect::new(x, pos.y - 10.0, 16.0, size.y + 20.0))
            }
        }
    }

    /// Attack hitbox overlaps `rect`
    pub fn attack_hits(&self, rect: &Rect) -> bool {
        self.attack_hitbox().is_some_and(|hitbox| overlaps(&hitbox, rect))
    }
}
