/// Read-only view of one frame, built after the tick for the renderer.

use crate::entities::{EnemyKind, GamePhase, GameState, ParticleColor, PowerUpKind};
use crate::geometry::Rect;

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyView {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub hp: u32,
    pub hp_fraction: f32,
    pub diving: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BulletView {
    pub rect: Rect,
    pub from_player: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUpView {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub color: ParticleColor,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub player: Rect,
    pub shield: bool,
    /// Living enemies only.
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub power_ups: Vec<PowerUpView>,
    pub particles: Vec<ParticleView>,
    pub shake: f32,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub level: u32,
    pub boss_wave: bool,
    pub phase: GamePhase,
    /// Milliseconds left on the timed power-up, if one is running.
    pub power_up_remaining: Option<(PowerUpKind, u64)>,
}

impl Snapshot {
    pub fn capture(state: &GameState, now: u64) -> Self {
        Snapshot {
            player: state.player.rect,
            shield: state.shield,
            enemies: state
                .living_enemies()
                .map(|e| EnemyView {
                    rect: e.rect,
                    kind: e.kind,
                    hp: e.hp,
                    hp_fraction: e.hp_fraction(),
                    diving: e.diving,
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .filter(|b| b.active)
                .map(|b| BulletView {
                    rect: b.rect,
                    from_player: b.from_player,
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .filter(|p| p.active)
                .map(|p| PowerUpView {
                    rect: p.rect,
                    kind: p.kind,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    x: p.x,
                    y: p.y,
                    color: p.color,
                    alpha: p.life.clamp(0.0, 1.0),
                })
                .collect(),
            shake: state.shake,
            score: state.score,
            high_score: state.high_score,
            lives: state.lives,
            level: state.wave.level,
            boss_wave: state.wave.boss,
            phase: state.phase,
            power_up_remaining: state
                .active_power_up
                .map(|a| (a.kind, a.expires_at.saturating_sub(now))),
        }
    }
}
