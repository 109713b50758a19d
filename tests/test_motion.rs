use galaga_next::compute::{init_state, start_game};
use galaga_next::entities::*;
use galaga_next::motion::*;
use galaga_next::wave::generate;

use rand::rngs::mock::StepRng;

/// Every probability roll fails.
fn quiet_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

/// Every probability roll succeeds; every choice picks the first option.
fn lucky_rng() -> StepRng {
    StepRng::new(0, 0)
}

fn playing_state() -> GameState {
    let mut s = init_state(0);
    start_game(&mut s);
    s
}

fn boss_state() -> GameState {
    let mut s = playing_state();
    s.wave = Wave::new(5);
    s.enemies = generate(5);
    s
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ── Formation ─────────────────────────────────────────────────────────────────

#[test]
fn formation_sways_together() {
    let mut s = playing_state();
    update_enemies(&mut s, 0, &mut quiet_rng());

    let offset = SWAY_STEP.sin() * SWAY_AMPLITUDE;
    for e in &s.enemies {
        assert!(close(e.rect.x, e.origin.x + offset), "{e:?}");
        assert_eq!(e.rect.y, e.origin.y);
    }
}

#[test]
fn sway_reverses_at_its_limit() {
    let mut s = playing_state();
    s.wave.sway_phase = SWAY_PHASE_LIMIT - SWAY_STEP / 2.0;

    update_enemies(&mut s, 0, &mut quiet_rng());
    assert_eq!(s.wave.sway_phase, SWAY_PHASE_LIMIT);
    assert_eq!(s.wave.sway_dir, -1.0);

    update_enemies(&mut s, 16, &mut quiet_rng());
    assert!(s.wave.sway_phase < SWAY_PHASE_LIMIT);
}

#[test]
fn sway_stays_bounded_over_many_ticks() {
    let mut s = playing_state();
    for i in 0..500 {
        update_enemies(&mut s, i * 16, &mut quiet_rng());
        assert!(s.wave.sway_phase.abs() <= SWAY_PHASE_LIMIT);
    }
}

// ── Dives & enemy fire ────────────────────────────────────────────────────────

#[test]
fn only_upper_tiers_dive() {
    let mut s = playing_state();
    update_enemies(&mut s, 0, &mut lucky_rng());

    for e in &s.enemies {
        match e.kind {
            EnemyKind::Tier(Tier::Base) => assert!(!e.diving),
            EnemyKind::Tier(_) => assert!(e.diving),
            EnemyKind::Boss => unreachable!(),
        }
    }
}

#[test]
fn one_enemy_shot_per_tick_at_most() {
    let mut s = playing_state();
    update_enemies(&mut s, 0, &mut lucky_rng());

    assert_eq!(s.bullets.len(), 1);
    let shot = &s.bullets[0];
    assert!(!shot.from_player);
    assert_eq!(shot.vx, 0.0);
    assert_eq!(shot.vy, enemy_bullet_speed(1));
    assert!(close(shot.rect.center_x(), s.enemies[0].rect.center_x()));
    assert_eq!(shot.rect.y, s.enemies[0].rect.bottom());
}

#[test]
fn quiet_tick_fires_nothing() {
    let mut s = playing_state();
    update_enemies(&mut s, 0, &mut quiet_rng());
    assert!(s.bullets.is_empty());
    assert!(s.enemies.iter().all(|e| !e.diving));
}

#[test]
fn diver_falls_and_wobbles() {
    let mut s = playing_state();
    s.enemies[0].diving = true;
    let origin = s.enemies[0].origin;

    update_enemies(&mut s, 0, &mut quiet_rng());

    let e = &s.enemies[0];
    assert!(e.diving);
    assert!(close(e.rect.y, origin.y + dive_speed(1)));
    assert!(close(e.rect.x, origin.x + DIVE_WOBBLE_STEP.sin() * DIVE_WOBBLE));
}

#[test]
fn dives_aim_at_the_player() {
    let mut s = playing_state();
    update_enemies(&mut s, 0, &mut lucky_rng());

    let player_x = s.player.rect.center_x();
    for e in s.enemies.iter().filter(|e| e.diving) {
        assert!(e.dive_drift.abs() <= DIVE_MAX_DRIFT);
        if e.rect.center_x() < player_x {
            assert!(e.dive_drift > 0.0, "{e:?}");
        } else {
            assert!(e.dive_drift < 0.0, "{e:?}");
        }
    }
}

#[test]
fn dive_drift_is_capped() {
    let mut s = playing_state();
    s.enemies.truncate(1);
    s.enemies[0].origin.y = 560.0;
    s.enemies[0].rect.y = 560.0;
    s.player.rect.x = PLAYFIELD_WIDTH - PLAYER_SIZE;

    update_enemies(&mut s, 0, &mut lucky_rng());

    assert!(s.enemies[0].diving);
    assert_eq!(s.enemies[0].dive_drift, DIVE_MAX_DRIFT);
}

#[test]
fn diver_closes_on_the_player() {
    let mut s = playing_state();
    s.enemies.truncate(1);
    s.enemies[0].diving = true;
    s.enemies[0].dive_drift = 1.0;
    let origin = s.enemies[0].origin;

    for i in 0..10 {
        update_enemies(&mut s, i * 16, &mut quiet_rng());
    }

    let e = &s.enemies[0];
    let wobble = (10.0 * DIVE_WOBBLE_STEP).sin() * DIVE_WOBBLE;
    assert!((e.rect.x - (origin.x + 10.0 + wobble)).abs() < 1e-2);
}

#[test]
fn diver_recycles_above_the_top_and_returns_to_slot() {
    let mut s = playing_state();
    s.enemies.truncate(1);
    s.enemies[0].diving = true;
    s.enemies[0].rect.y = PLAYFIELD_HEIGHT - 1.0;

    update_enemies(&mut s, 0, &mut quiet_rng());
    let e = &s.enemies[0];
    assert!(!e.diving);
    assert_eq!(e.dive_drift, 0.0);
    assert_eq!(e.rect.y, -ENEMY_SIZE);

    update_enemies(&mut s, 16, &mut quiet_rng());
    assert_eq!(s.enemies[0].rect.y, -ENEMY_SIZE + FORMATION_RETURN_SPEED);

    for i in 0..200 {
        update_enemies(&mut s, i * 16, &mut quiet_rng());
    }
    let e = &s.enemies[0];
    assert_eq!(e.rect.y, e.origin.y);
    assert!(e.alive);
}

#[test]
fn dead_enemies_do_not_move() {
    let mut s = playing_state();
    s.enemies[3].alive = false;
    s.enemies[3].hp = 0;
    let before = s.enemies[3].rect;
    update_enemies(&mut s, 0, &mut quiet_rng());
    assert_eq!(s.enemies[3].rect, before);
}

// ── Boss ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_descends_before_attacking() {
    let mut s = boss_state();
    update_enemies(&mut s, 0, &mut lucky_rng());

    let boss = &s.enemies[0];
    assert_eq!(boss.rect.y, -BOSS_HEIGHT + BOSS_DESCENT_SPEED);
    assert_eq!(boss.rect.x, boss.origin.x);
    assert!(s.bullets.is_empty(), "no fan while still entering");
}

#[test]
fn boss_stops_at_rest_height() {
    let mut s = boss_state();
    for i in 0..200 {
        update_enemies(&mut s, i * 16, &mut quiet_rng());
    }
    assert_eq!(s.enemies[0].rect.y, s.enemies[0].origin.y);
}

#[test]
fn boss_sways_on_the_clock() {
    let mut s = boss_state();
    s.enemies[0].rect.y = s.enemies[0].origin.y;
    update_enemies(&mut s, 1_000, &mut quiet_rng());
    let boss = &s.enemies[0];
    assert!(close(boss.rect.x, boss.origin.x + 1.0f32.sin() * BOSS_SWAY));
}

#[test]
fn resting_boss_fires_an_aimed_fan() {
    let mut s = boss_state();
    s.enemies[0].rect.y = s.enemies[0].origin.y;

    update_enemies(&mut s, 0, &mut lucky_rng());

    assert_eq!(s.bullets.len(), BOSS_FAN_SIZE);
    let speed = enemy_bullet_speed(5);
    for b in &s.bullets {
        assert!(!b.from_player);
        assert!(close(b.vx.hypot(b.vy), speed));
    }

    // Boss and player share a centre line: the middle bullet drops straight down.
    let middle = &s.bullets[BOSS_FAN_SIZE / 2];
    assert!(middle.vx.abs() < 1e-3);
    assert!(close(middle.vy, speed));

    let first = &s.bullets[0];
    let last = &s.bullets[BOSS_FAN_SIZE - 1];
    assert!(close(first.vx, -last.vx));
    assert!(close(first.vy, last.vy));
}

// ── Bullets, power-ups, particles, shake ──────────────────────────────────────

#[test]
fn bullets_move_by_their_velocity() {
    let mut s = playing_state();
    s.bullets.push(Bullet::enemy(100.0, 100.0, 1.5, 4.0));
    update_bullets(&mut s);
    assert_eq!(s.bullets[0].rect.center_x(), 101.5);
    assert_eq!(s.bullets[0].rect.y, 104.0);
}

#[test]
fn inactive_bullets_are_dropped() {
    let mut s = playing_state();
    let mut spent = Bullet::player(100.0, 300.0, 7.0);
    spent.active = false;
    s.bullets.push(spent);
    update_bullets(&mut s);
    assert!(s.bullets.is_empty());
}

#[test]
fn bullets_leave_past_the_margin() {
    let mut s = playing_state();
    // Ends at y = -19: still inside the margin.
    s.bullets.push(Bullet::player(100.0, -12.0, 7.0));
    // Ends at y = -21: gone.
    s.bullets.push(Bullet::player(200.0, -14.0, 7.0));
    s.bullets
        .push(Bullet::enemy(100.0, PLAYFIELD_HEIGHT + 18.0, 0.0, 4.0));

    update_bullets(&mut s);

    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].rect.y, -19.0);
}

#[test]
fn power_ups_fall_and_leave_at_the_bottom() {
    let mut s = playing_state();
    let mut low = PowerUp::dropped_at(100.0, 0.0, PowerUpKind::Shield);
    low.rect.y = PLAYFIELD_HEIGHT - 1.0;
    let mut taken = PowerUp::dropped_at(100.0, 0.0, PowerUpKind::ExtraLife);
    taken.active = false;
    s.power_ups.push(PowerUp::dropped_at(100.0, 100.0, PowerUpKind::DoubleFire));
    s.power_ups.push(low);
    s.power_ups.push(taken);

    update_power_ups(&mut s);

    assert_eq!(s.power_ups.len(), 1);
    assert_eq!(s.power_ups[0].kind, PowerUpKind::DoubleFire);
    assert_eq!(s.power_ups[0].rect.center_y(), 100.0 + POWER_UP_FALL_SPEED);
}

#[test]
fn particles_fade_out() {
    let mut s = playing_state();
    s.particles.push(Particle {
        x: 0.0,
        y: 0.0,
        vx: 1.0,
        vy: -1.0,
        life: 0.03,
        color: ParticleColor::Yellow,
    });

    update_particles(&mut s);
    assert_eq!(s.particles.len(), 1);
    assert_eq!((s.particles[0].x, s.particles[0].y), (1.0, -1.0));
    assert!(s.particles[0].life < 0.03);

    update_particles(&mut s);
    assert!(s.particles.is_empty());
}

#[test]
fn shake_decays_to_zero() {
    let mut s = playing_state();
    s.shake = 2.5;
    decay_shake(&mut s);
    assert_eq!(s.shake, 1.5);
    decay_shake(&mut s);
    decay_shake(&mut s);
    assert_eq!(s.shake, 0.0);
    decay_shake(&mut s);
    assert_eq!(s.shake, 0.0);
}
