/// Wave layouts: a 4×8 formation on ordinary levels, a lone boss on every
/// fifth level.

use crate::entities::{
    Enemy, EnemyKind, Point, Tier, BOSS_HEIGHT, BOSS_WIDTH, ENEMY_SIZE, PLAYFIELD_WIDTH,
};
use crate::geometry::Rect;

pub const ENEMY_ROWS: usize = 4;
pub const ENEMY_COLS: usize = 8;
pub const ENEMY_GAP: f32 = 15.0;
pub const GRID_LEFT: f32 = 50.0;
pub const GRID_TOP: f32 = 80.0;

pub const BOSS_EVERY: u32 = 5;
/// Y at which the boss stops descending and starts its attack pattern.
pub const BOSS_REST_Y: f32 = 60.0;

pub fn is_boss_level(level: u32) -> bool {
    level % BOSS_EVERY == 0
}

pub fn boss_hit_points(level: u32) -> u32 {
    20 + level * 5
}

fn tier_for_row(row: usize) -> Tier {
    match row {
        0 => Tier::Elite,
        1 => Tier::Mid,
        _ => Tier::Base,
    }
}

/// Build the enemies for `level` (1-based).  The caller replaces its whole
/// enemy store with the result.
pub fn generate(level: u32) -> Vec<Enemy> {
    if is_boss_level(level) {
        return vec![boss(level)];
    }

    let mut enemies = Vec::with_capacity(ENEMY_ROWS * ENEMY_COLS);
    for row in 0..ENEMY_ROWS {
        let tier = tier_for_row(row);
        for col in 0..ENEMY_COLS {
            let x = col as f32 * (ENEMY_SIZE + ENEMY_GAP) + GRID_LEFT;
            let y = row as f32 * (ENEMY_SIZE + ENEMY_GAP) + GRID_TOP;
            enemies.push(Enemy {
                rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
                origin: Point { x, y },
                kind: EnemyKind::Tier(tier),
                hp: tier.hit_points(),
                max_hp: tier.hit_points(),
                alive: true,
                diving: false,
                dive_phase: 0.0,
                dive_drift: 0.0,
            });
        }
    }
    enemies
}

fn boss(level: u32) -> Enemy {
    let x = PLAYFIELD_WIDTH / 2.0 - BOSS_WIDTH / 2.0;
    let hp = boss_hit_points(level);
    Enemy {
        // Enters from just above the visible area.
        rect: Rect::new(x, -BOSS_HEIGHT, BOSS_WIDTH, BOSS_HEIGHT),
        origin: Point { x, y: BOSS_REST_Y },
        kind: EnemyKind::Boss,
        hp,
        max_hp: hp,
        alive: true,
        diving: false,
        dive_phase: 0.0,
        dive_drift: 0.0,
    }
}
