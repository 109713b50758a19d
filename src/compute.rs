/// Run lifecycle and the per-frame tick.
///
/// `tick` is the only thing the host calls while a run is live.  It runs
/// motion, then collision, then the wave/phase checks, and returns the sound
/// cues produced along the way.  All randomness comes through the injected
/// RNG and all timing through the `now` clock (milliseconds, monotonic), so a
/// seeded RNG plus a scripted clock replays exactly.

use rand::Rng;
use tracing::{debug, info};

use crate::audio::Sound;
use crate::collision;
use crate::entities::{GamePhase, GameState, Player, Wave, STARTING_LIVES};
use crate::input::InputState;
use crate::motion;
use crate::wave;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh state sitting on the title screen.  No wave is loaded until the
/// player starts.
pub fn init_state(high_score: u32) -> GameState {
    GameState {
        player: Player::at_start(),
        enemies: Vec::new(),
        bullets: Vec::new(),
        power_ups: Vec::new(),
        particles: Vec::new(),
        wave: Wave::new(1),
        score: 0,
        high_score,
        lives: STARTING_LIVES,
        active_power_up: None,
        shield: false,
        phase: GamePhase::Start,
        last_shot_at: None,
        shake: 0.0,
        frame: 0,
    }
}

/// Begin a new run from the title screen or the game-over screen.
///
/// Everything except the high score is reset, so restarting from any
/// state yields the same run.
pub fn start_game(state: &mut GameState) {
    let high_score = state.high_score.max(state.score);
    *state = GameState {
        enemies: wave::generate(1),
        phase: GamePhase::Playing,
        ..init_state(high_score)
    };
    info!(high_score, "run started");
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Outside of `Playing` only cosmetic state moves (particles, shake), so the
/// last explosion still plays out behind the game-over overlay.
pub fn tick(
    state: &mut GameState,
    input: &InputState,
    now: u64,
    rng: &mut impl Rng,
) -> Vec<Sound> {
    let mut sounds = Vec::new();
    state.frame += 1;

    expire_power_up(state, now);

    if state.phase != GamePhase::Playing {
        motion::update_particles(state);
        motion::decay_shake(state);
        return sounds;
    }

    motion::update(state, input, now, rng, &mut sounds);
    collision::resolve(state, now, rng, &mut sounds);

    if state.phase == GamePhase::Playing && wave_cleared(state) {
        advance_wave(state, &mut sounds);
    }

    sounds
}

/// Drop the timed power-up once its deadline has passed.
pub fn expire_power_up(state: &mut GameState, now: u64) {
    if let Some(active) = state.active_power_up {
        if now >= active.expires_at {
            debug!(kind = ?active.kind, "power-up expired");
            state.active_power_up = None;
        }
    }
}

// ── Wave progression ─────────────────────────────────────────────────────────

pub fn wave_cleared(state: &GameState) -> bool {
    state.enemies.iter().all(|e| !e.alive)
}

/// The only place `level` grows: exactly one step per cleared wave.
pub fn advance_wave(state: &mut GameState, sounds: &mut Vec<Sound>) {
    let level = state.wave.level + 1;
    state.wave = Wave::new(level);
    state.enemies = wave::generate(level);

    if state.wave.boss {
        sounds.push(Sound::BossSpawn);
        info!(level, "boss wave");
    } else {
        info!(level, "wave started");
    }
}
