//! Ninja Fox headless runner
//!
//! Drives the simulation with a simple autopilot: hold right, hop every so
//! often and kick anything that gets close. Useful for soak-testing
//! generation and balance from the command line.
//!
//! Usage: `ninja-fox [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use ninja_fox::{
    Settings,
    audio::{MuteState, SoundQueue},
    consts::*,
    input::{Action, InputState},
    renderer::{QuadBatch, draw_scene},
    sim::Game,
};

/// Simulated seconds per run
#[cfg(not(target_arch = "wasm32"))]
const RUN_SECONDS: f32 = 60.0;
/// Autopilot jumps this often (seconds)
#[cfg(not(target_arch = "wasm32"))]
const HOP_INTERVAL: f32 = 0.75;
/// Kick enemies closer than this (pixels)
#[cfg(not(target_arch = "wasm32"))]
const KICK_RANGE: f32 = 40.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let settings = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Settings::load_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {} ({}), using default settings", path, e);
                Settings::default()
            }
        },
        None => Settings::default(),
    };

    log::info!("Ninja Fox (headless) starting with seed: {}", seed);

    let mut audio = SoundQueue::new(MuteState::from_settings(&settings));
    let mut game = Game::new(seed, settings);
    let mut input = InputState::new();
    let mut batch = QuadBatch::new(GAME_WIDTH, GAME_HEIGHT);

    // Leave the splash screen
    input.press(Action::Pause);
    game.frame(SIM_DT, &mut input, &mut audio);
    input.release(Action::Pause);
    input.press(Action::Right);

    let mut elapsed = 0.0;
    let mut hop_timer = 0.0;
    let mut sounds = 0usize;
    let mut peak_quads = 0usize;

    while elapsed < RUN_SECONDS && game.state.is_playing() {
        autopilot(&game, &mut input, &mut hop_timer);

        game.frame(SIM_DT, &mut input, &mut audio);
        sounds += audio.drain().len();

        batch.clear();
        draw_scene(&game.state, &mut batch, game.view_offset());
        peak_quads = peak_quads.max(batch.quad_count());

        elapsed += SIM_DT;
        hop_timer += SIM_DT;
    }

    let state = &game.state;
    log::info!(
        "Run over after {:.1}s: score {}, distance {}m, stage {}, health {}/{}",
        elapsed,
        state.score,
        state.distance,
        state.stage,
        state.player.health,
        state.player.max_health
    );
    log::debug!("{} sound cues, peak {} quads per frame", sounds, peak_quads);

    println!(
        "seed={} mode={:?} score={} distance={} stage={}",
        seed, state.mode, state.score, state.distance, state.stage
    );
}

/// Press jump on a timer and kick when an enemy is within reach
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(game: &Game, input: &mut InputState, hop_timer: &mut f32) {
    input.release(Action::Jump);
    input.release(Action::Kick);

    if *hop_timer >= HOP_INTERVAL {
        *hop_timer = 0.0;
        input.press(Action::Jump);
    }

    let player = game.state.player.bounds().center();
    let threat = game
        .state
        .enemies
        .enemies()
        .iter()
        .filter(|e| !e.dead)
        .any(|e| e.bounds().center().distance(player) < KICK_RANGE);
    if threat {
        input.press(Action::Kick);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly; nothing to run here
}
