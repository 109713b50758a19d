/// Per-tick motion and behaviour: player input, enemy formation/dive/boss
/// patterns, and kinematics for bullets, power-ups and particles.
///
/// Runs to completion before the collision pass, so collisions always see
/// post-motion positions.  All randomness comes through the injected RNG.

use std::f32::consts::PI;

use rand::Rng;

use crate::audio::Sound;
use crate::entities::{
    Bullet, Enemy, EnemyKind, GameState, ENEMY_BULLET_HEIGHT, PLAYER_SIZE, PLAYFIELD_HEIGHT,
    PLAYFIELD_WIDTH,
};
use crate::input::InputState;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_BULLET_SPEED: f32 = 7.0;
pub const FIRE_COOLDOWN_MS: u64 = 300;
pub const DOUBLE_FIRE_COOLDOWN_MS: u64 = 150;
/// Horizontal offset of each double-fire barrel from the ship's centre.
pub const DOUBLE_FIRE_OFFSET: f32 = 10.0;

// ── Formation ────────────────────────────────────────────────────────────────

pub const SWAY_STEP: f32 = 0.02;
/// The shared sway phase reverses once it reaches ±SWAY_PHASE_LIMIT.
pub const SWAY_PHASE_LIMIT: f32 = 1.0;
pub const SWAY_AMPLITUDE: f32 = 30.0;
/// Speed at which a recycled diver drops back into its slot.
pub const FORMATION_RETURN_SPEED: f32 = 2.0;

pub const DIVE_CHANCE: f64 = 0.0015;
pub const DIVE_WOBBLE_STEP: f32 = 0.05;
pub const DIVE_WOBBLE: f32 = 40.0;
/// Cap on a diver's sideways drift toward the player, pixels per tick.
pub const DIVE_MAX_DRIFT: f32 = 1.5;

// ── Boss ─────────────────────────────────────────────────────────────────────

pub const BOSS_DESCENT_SPEED: f32 = 1.0;
pub const BOSS_SWAY: f32 = 150.0;
pub const BOSS_FIRE_CHANCE: f64 = 0.03;
pub const BOSS_FAN_SIZE: usize = 7;
/// Angle between neighbouring bullets in a boss fan.
pub const BOSS_FAN_SPREAD: f32 = PI / 12.0;

// ── Projectiles & debris ─────────────────────────────────────────────────────

/// Bullets are discarded once this far outside the playfield.
pub const OFFSCREEN_MARGIN: f32 = 20.0;
pub const POWER_UP_FALL_SPEED: f32 = 2.0;
pub const PARTICLE_DECAY: f32 = 0.02;
pub const SHAKE_DECAY: f32 = 1.0;

// ── Difficulty curve ─────────────────────────────────────────────────────────

pub fn dive_speed(level: u32) -> f32 {
    2.5 + level as f32 * 0.25
}

pub fn enemy_bullet_speed(level: u32) -> f32 {
    4.0 + level as f32 * 0.5
}

/// Chance per tick that some formation enemy fires.
pub fn enemy_fire_chance(level: u32) -> f64 {
    (0.01 + level as f64 * 0.005).min(1.0)
}

// ── Entry point ──────────────────────────────────────────────────────────────

/// Advance every entity by one tick.  Cues are appended to `sounds`.
pub fn update(
    state: &mut GameState,
    input: &InputState,
    now: u64,
    rng: &mut impl Rng,
    sounds: &mut Vec<Sound>,
) {
    update_player(state, input, now, sounds);
    update_enemies(state, now, rng);
    update_bullets(state);
    update_power_ups(state);
    update_particles(state);
    decay_shake(state);
}

pub fn update_player(
    state: &mut GameState,
    input: &InputState,
    now: u64,
    sounds: &mut Vec<Sound>,
) {
    let rect = &mut state.player.rect;
    rect.x = (rect.x + input.direction() * PLAYER_SPEED).clamp(0.0, PLAYFIELD_WIDTH - PLAYER_SIZE);

    if !input.fire {
        return;
    }
    let cooldown = if state.double_fire_active() {
        DOUBLE_FIRE_COOLDOWN_MS
    } else {
        FIRE_COOLDOWN_MS
    };
    let ready = state
        .last_shot_at
        .map_or(true, |last| now.saturating_sub(last) > cooldown);
    if !ready {
        return;
    }

    let cx = state.player.rect.center_x();
    let y = state.player.rect.y;
    if state.double_fire_active() {
        state
            .bullets
            .push(Bullet::player(cx - DOUBLE_FIRE_OFFSET, y, PLAYER_BULLET_SPEED));
        state
            .bullets
            .push(Bullet::player(cx + DOUBLE_FIRE_OFFSET, y, PLAYER_BULLET_SPEED));
    } else {
        state.bullets.push(Bullet::player(cx, y, PLAYER_BULLET_SPEED));
    }
    state.last_shot_at = Some(now);
    sounds.push(Sound::Shoot);
}

// ── Enemies ──────────────────────────────────────────────────────────────────

pub fn update_enemies(state: &mut GameState, now: u64, rng: &mut impl Rng) {
    let level = state.level();
    advance_sway(state);
    let sway = state.wave.sway_phase.sin() * SWAY_AMPLITUDE;
    let player_center = (state.player.rect.center_x(), state.player.rect.center_y());

    let mut new_bullets = Vec::new();
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        match enemy.kind {
            EnemyKind::Boss => {
                move_boss(enemy, now);
                if boss_resting(enemy) && rng.gen_bool(BOSS_FIRE_CHANCE) {
                    boss_fan(enemy, player_center, level, &mut new_bullets);
                }
            }
            EnemyKind::Tier(tier) => {
                if enemy.diving {
                    move_diver(enemy, level);
                } else {
                    move_in_formation(enemy, sway);
                    let in_slot = enemy.rect.y >= enemy.origin.y;
                    if tier.can_dive() && in_slot && rng.gen_bool(DIVE_CHANCE) {
                        start_dive(enemy, player_center, level);
                    }
                }
            }
        }
    }

    // One roll per tick; a random living wave member takes the shot.
    if rng.gen_bool(enemy_fire_chance(level)) {
        let shooters: Vec<usize> = state
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive && !e.kind.is_boss())
            .map(|(i, _)| i)
            .collect();
        if !shooters.is_empty() {
            let shooter = &state.enemies[shooters[rng.gen_range(0..shooters.len())]];
            new_bullets.push(Bullet::enemy(
                shooter.rect.center_x(),
                shooter.rect.bottom(),
                0.0,
                enemy_bullet_speed(level),
            ));
        }
    }

    state.bullets.extend(new_bullets);
}

fn advance_sway(state: &mut GameState) {
    let wave = &mut state.wave;
    wave.sway_phase += SWAY_STEP * wave.sway_dir;
    if wave.sway_phase >= SWAY_PHASE_LIMIT {
        wave.sway_phase = SWAY_PHASE_LIMIT;
        wave.sway_dir = -1.0;
    } else if wave.sway_phase <= -SWAY_PHASE_LIMIT {
        wave.sway_phase = -SWAY_PHASE_LIMIT;
        wave.sway_dir = 1.0;
    }
}

fn move_in_formation(enemy: &mut Enemy, sway: f32) {
    enemy.rect.x = enemy.origin.x + sway;
    if enemy.rect.y < enemy.origin.y {
        enemy.rect.y = (enemy.rect.y + FORMATION_RETURN_SPEED).min(enemy.origin.y);
    }
}

/// Aim the dive at the player's current position: spread the horizontal gap
/// over the ticks it takes to fall to the player's row.
fn start_dive(enemy: &mut Enemy, target: (f32, f32), level: u32) {
    let ticks = ((target.1 - enemy.rect.center_y()) / dive_speed(level)).max(1.0);
    enemy.diving = true;
    enemy.dive_phase = 0.0;
    enemy.dive_drift =
        ((target.0 - enemy.rect.center_x()) / ticks).clamp(-DIVE_MAX_DRIFT, DIVE_MAX_DRIFT);
}

fn move_diver(enemy: &mut Enemy, level: u32) {
    enemy.dive_phase += DIVE_WOBBLE_STEP;
    let ticks = enemy.dive_phase / DIVE_WOBBLE_STEP;
    enemy.rect.y += dive_speed(level);
    enemy.rect.x = enemy.origin.x
        + enemy.dive_drift * ticks
        + enemy.dive_phase.sin() * DIVE_WOBBLE;

    // Fell out of the bottom: recycle above the top and rejoin the formation.
    if enemy.rect.y > PLAYFIELD_HEIGHT {
        enemy.rect.y = -enemy.rect.height;
        enemy.diving = false;
        enemy.dive_phase = 0.0;
        enemy.dive_drift = 0.0;
    }
}

fn boss_resting(boss: &Enemy) -> bool {
    boss.rect.y >= boss.origin.y
}

fn move_boss(boss: &mut Enemy, now: u64) {
    if !boss_resting(boss) {
        boss.rect.y = (boss.rect.y + BOSS_DESCENT_SPEED).min(boss.origin.y);
    }
    boss.rect.x = boss.origin.x + (now as f32 / 1000.0).sin() * BOSS_SWAY;
}

/// A fan of bullets centred on the direction of the player.
fn boss_fan(boss: &Enemy, target: (f32, f32), level: u32, out: &mut Vec<Bullet>) {
    let (cx, cy) = (boss.rect.center_x(), boss.rect.bottom());
    let aim = (target.1 - cy).atan2(target.0 - cx);
    let speed = enemy_bullet_speed(level);
    let half = (BOSS_FAN_SIZE as f32 - 1.0) / 2.0;
    for i in 0..BOSS_FAN_SIZE {
        let angle = aim + (i as f32 - half) * BOSS_FAN_SPREAD;
        out.push(Bullet::enemy(
            cx,
            cy - ENEMY_BULLET_HEIGHT / 2.0,
            angle.cos() * speed,
            angle.sin() * speed,
        ));
    }
}

// ── Bullets, power-ups, particles ────────────────────────────────────────────

fn on_screen(x: f32, y: f32, margin: f32) -> bool {
    x > -margin
        && x < PLAYFIELD_WIDTH + margin
        && y > -margin
        && y < PLAYFIELD_HEIGHT + margin
}

pub fn update_bullets(state: &mut GameState) {
    state.bullets.retain(|b| b.active);
    for bullet in &mut state.bullets {
        bullet.rect.x += bullet.vx;
        bullet.rect.y += bullet.vy;
    }
    state
        .bullets
        .retain(|b| on_screen(b.rect.x, b.rect.y, OFFSCREEN_MARGIN));
}

pub fn update_power_ups(state: &mut GameState) {
    state.power_ups.retain(|p| p.active);
    for power_up in &mut state.power_ups {
        power_up.rect.y += POWER_UP_FALL_SPEED;
    }
    state.power_ups.retain(|p| p.rect.y < PLAYFIELD_HEIGHT);
}

pub fn update_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.x += particle.vx;
        particle.y += particle.vy;
        particle.life -= PARTICLE_DECAY;
    }
    state.particles.retain(|p| p.life > 0.0);
}

pub fn decay_shake(state: &mut GameState) {
    state.shake = (state.shake - SHAKE_DECAY).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_rises_with_level() {
        assert!(enemy_bullet_speed(2) > enemy_bullet_speed(1));
        assert!(enemy_fire_chance(2) > enemy_fire_chance(1));
        assert!(dive_speed(6) > dive_speed(1));
    }

    #[test]
    fn fire_chance_never_exceeds_one() {
        assert!(enemy_fire_chance(10_000) <= 1.0);
    }

    #[test]
    fn on_screen_respects_margin() {
        assert!(on_screen(-19.0, 0.0, OFFSCREEN_MARGIN));
        assert!(!on_screen(-21.0, 0.0, OFFSCREEN_MARGIN));
        assert!(!on_screen(0.0, PLAYFIELD_HEIGHT + 21.0, OFFSCREEN_MARGIN));
    }
}
