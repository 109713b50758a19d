/// Collision & outcome resolution for one tick.
///
/// Every bullet/enemy, bullet/player, enemy/player and power-up/player pair
/// is checked once per tick, against post-motion positions.  Consumed
/// bullets and power-ups are only flagged here; the next motion pass
/// removes them.

use std::f32::consts::TAU;

use rand::Rng;
use tracing::{debug, info};

use crate::audio::Sound;
use crate::entities::{
    ActivePowerUp, EnemyKind, GamePhase, GameState, Particle, PowerUp, PowerUpKind, MAX_LIVES,
};

pub const PARTICLES_PER_KILL: usize = 10;
pub const PARTICLES_PER_BOSS_KILL: usize = 40;
pub const PARTICLE_MAX_SPEED: f32 = 3.0;

pub const POWER_UP_DROP_CHANCE: f64 = 0.15;
pub const BOSS_POWER_UP_DROP_CHANCE: f64 = 1.0;
pub const DOUBLE_FIRE_DURATION_MS: u64 = 10_000;

/// Screen-shake magnitude (pixels) applied when the player loses a life.
pub const HIT_SHAKE: f32 = 10.0;

pub fn resolve(state: &mut GameState, now: u64, rng: &mut impl Rng, sounds: &mut Vec<Sound>) {
    resolve_player_bullets(state, rng, sounds);
    resolve_player_hits(state, rng, sounds);
    resolve_pickups(state, now, sounds);
}

// ── Player bullets × enemies ─────────────────────────────────────────────────

struct Kill {
    kind: EnemyKind,
    x: f32,
    y: f32,
}

pub fn resolve_player_bullets(state: &mut GameState, rng: &mut impl Rng, sounds: &mut Vec<Sound>) {
    let mut kills = Vec::new();

    for bullet in state.bullets.iter_mut().filter(|b| b.active && b.from_player) {
        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.alive && e.rect.intersects(&bullet.rect))
        else {
            continue;
        };
        bullet.active = false;
        enemy.hp = enemy.hp.saturating_sub(1);
        if enemy.hp == 0 {
            enemy.alive = false;
            kills.push(Kill {
                kind: enemy.kind,
                x: enemy.rect.center_x(),
                y: enemy.rect.center_y(),
            });
        }
    }

    for kill in kills {
        on_enemy_destroyed(state, &kill, rng, sounds);
    }
}

fn on_enemy_destroyed(state: &mut GameState, kill: &Kill, rng: &mut impl Rng, sounds: &mut Vec<Sound>) {
    let (count, drop_chance) = if kill.kind.is_boss() {
        (PARTICLES_PER_BOSS_KILL, BOSS_POWER_UP_DROP_CHANCE)
    } else {
        (PARTICLES_PER_KILL, POWER_UP_DROP_CHANCE)
    };

    spawn_burst(state, kill.x, kill.y, count, kill.kind, rng);
    sounds.push(Sound::Explosion);

    state.score += kill.kind.score_value();
    if state.score > state.high_score {
        state.high_score = state.score;
    }
    if kill.kind.is_boss() {
        info!(level = state.level(), score = state.score, "boss destroyed");
    }

    if rng.gen_bool(drop_chance) {
        let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
        state.power_ups.push(PowerUp::dropped_at(kill.x, kill.y, kind));
    }
}

fn spawn_burst(
    state: &mut GameState,
    x: f32,
    y: f32,
    count: usize,
    kind: EnemyKind,
    rng: &mut impl Rng,
) {
    let color = kind.particle_color();
    state.particles.extend((0..count).map(|_| {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.5..PARTICLE_MAX_SPEED);
        Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            life: 1.0,
            color,
        }
    }));
}

// ── Enemy bullets / bodies × player ──────────────────────────────────────────

/// Every active enemy bullet and every living enemy body overlapping the
/// player is a separate hit.  A bullet is consumed by its hit; a rammer is
/// wrecked by its collision (no score) so it cannot hit again next tick.
pub fn resolve_player_hits(state: &mut GameState, rng: &mut impl Rng, sounds: &mut Vec<Sound>) {
    let player = state.player.rect;

    for i in 0..state.bullets.len() {
        if state.phase != GamePhase::Playing {
            return;
        }
        let bullet = &mut state.bullets[i];
        if bullet.active && !bullet.from_player && bullet.rect.intersects(&player) {
            bullet.active = false;
            hit_player(state, sounds);
        }
    }

    for i in 0..state.enemies.len() {
        if state.phase != GamePhase::Playing {
            return;
        }
        let enemy = &mut state.enemies[i];
        if !enemy.alive || !enemy.rect.intersects(&player) {
            continue;
        }
        enemy.alive = false;
        enemy.hp = 0;
        let (kind, x, y) = (enemy.kind, enemy.rect.center_x(), enemy.rect.center_y());
        spawn_burst(state, x, y, PARTICLES_PER_KILL, kind, rng);
        debug!(?kind, "enemy rammed the player");
        hit_player(state, sounds);
    }
}

fn hit_player(state: &mut GameState, sounds: &mut Vec<Sound>) {
    if state.shield {
        state.shield = false;
        sounds.push(Sound::PowerUp);
        debug!("shield absorbed a hit");
        return;
    }

    state.shake = HIT_SHAKE;
    if state.lives <= 1 {
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        sounds.push(Sound::GameOver);
        info!(score = state.score, level = state.level(), "game over");
    } else {
        state.lives -= 1;
        sounds.push(Sound::Explosion);
        debug!(lives = state.lives, "player hit");
    }
}

// ── Power-ups × player ───────────────────────────────────────────────────────

pub fn resolve_pickups(state: &mut GameState, now: u64, sounds: &mut Vec<Sound>) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let player = state.player.rect;
    let collected: Vec<PowerUpKind> = state
        .power_ups
        .iter_mut()
        .filter(|p| p.active && p.rect.intersects(&player))
        .map(|p| {
            p.active = false;
            p.kind
        })
        .collect();

    for kind in collected {
        apply_power_up(state, kind, now);
        sounds.push(Sound::PowerUp);
    }
}

pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind, now: u64) {
    debug!(?kind, "power-up collected");
    match kind {
        PowerUpKind::ExtraLife => state.lives = (state.lives + 1).min(MAX_LIVES),
        PowerUpKind::Shield => state.shield = true,
        PowerUpKind::DoubleFire => {
            state.active_power_up = Some(ActivePowerUp {
                kind,
                expires_at: now + DOUBLE_FIRE_DURATION_MS,
            })
        }
    }
}
