/// All game entity types: pure data, no simulation logic.
///
/// Coordinates are playfield pixels with a top-left origin.  The renderer
/// scales the fixed 480×640 playfield onto whatever surface it draws to.

use crate::geometry::Rect;

// ── Playfield & player ───────────────────────────────────────────────────────

pub const PLAYFIELD_WIDTH: f32 = 480.0;
pub const PLAYFIELD_HEIGHT: f32 = 640.0;

pub const PLAYER_SIZE: f32 = 40.0;
/// Distance of the player's top edge from the bottom of the playfield.
pub const PLAYER_BOTTOM_OFFSET: f32 = 60.0;

pub const STARTING_LIVES: u32 = 3;
pub const MAX_LIVES: u32 = 5;

pub const ENEMY_SIZE: f32 = 30.0;
pub const BOSS_WIDTH: f32 = 96.0;
pub const BOSS_HEIGHT: f32 = 64.0;

// ── Enemy kinds ──────────────────────────────────────────────────────────────

/// Formation tier of an ordinary wave member.  Higher tiers sit in the
/// back row, take more hits and are worth more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Elite,
    Mid,
    Base,
}

impl Tier {
    pub fn hit_points(self) -> u32 {
        match self {
            Tier::Elite => 2,
            Tier::Mid | Tier::Base => 1,
        }
    }

    pub fn score_value(self) -> u32 {
        match self {
            Tier::Elite => 300,
            Tier::Mid => 200,
            Tier::Base => 100,
        }
    }

    /// Only the upper two rows ever break formation to dive.
    pub fn can_dive(self) -> bool {
        matches!(self, Tier::Elite | Tier::Mid)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Tier(Tier),
    Boss,
}

pub const BOSS_SCORE: u32 = 5000;

impl EnemyKind {
    pub fn score_value(self) -> u32 {
        match self {
            EnemyKind::Tier(tier) => tier.score_value(),
            EnemyKind::Boss => BOSS_SCORE,
        }
    }

    pub fn is_boss(self) -> bool {
        self == EnemyKind::Boss
    }

    /// Particle tint used when this kind explodes.
    pub fn particle_color(self) -> ParticleColor {
        match self {
            EnemyKind::Tier(Tier::Elite) => ParticleColor::Red,
            EnemyKind::Tier(Tier::Mid) => ParticleColor::Yellow,
            EnemyKind::Tier(Tier::Base) => ParticleColor::Green,
            EnemyKind::Boss => ParticleColor::Magenta,
        }
    }
}

// ── Status ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the player to start.
    Start,
    Playing,
    /// Simulation frozen until an explicit restart.
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Two parallel shots and a shorter cooldown, for a limited time.
    DoubleFire,
    /// Absorbs the next hit.  No timer.
    Shield,
    /// Instantly adds one life (max 5).
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::DoubleFire,
        PowerUpKind::Shield,
        PowerUpKind::ExtraLife,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleColor {
    White,
    Red,
    Yellow,
    Green,
    Magenta,
    Cyan,
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
}

impl Player {
    pub fn at_start() -> Self {
        Player {
            rect: Rect::new(
                PLAYFIELD_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
                PLAYFIELD_HEIGHT - PLAYER_BOTTOM_OFFSET,
                PLAYER_SIZE,
                PLAYER_SIZE,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    /// Fixed at creation.  Player bullets only hit enemies and vice versa.
    pub from_player: bool,
    /// Cleared when the bullet is consumed by a hit.
    pub active: bool,
}

pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
pub const PLAYER_BULLET_HEIGHT: f32 = 12.0;
pub const ENEMY_BULLET_WIDTH: f32 = 4.0;
pub const ENEMY_BULLET_HEIGHT: f32 = 8.0;

impl Bullet {
    /// A player shot centred on `center_x`, travelling straight up.
    pub fn player(center_x: f32, y: f32, speed: f32) -> Self {
        Bullet {
            rect: Rect::new(
                center_x - PLAYER_BULLET_WIDTH / 2.0,
                y,
                PLAYER_BULLET_WIDTH,
                PLAYER_BULLET_HEIGHT,
            ),
            vx: 0.0,
            vy: -speed,
            from_player: true,
            active: true,
        }
    }

    pub fn enemy(center_x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Bullet {
            rect: Rect::new(
                center_x - ENEMY_BULLET_WIDTH / 2.0,
                y,
                ENEMY_BULLET_WIDTH,
                ENEMY_BULLET_HEIGHT,
            ),
            vx,
            vy,
            from_player: false,
            active: true,
        }
    }
}

/// Formation anchor of an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Grid slot for wave members, resting position for the boss.
    pub origin: Point,
    pub kind: EnemyKind,
    pub hp: u32,
    pub max_hp: u32,
    /// Flips to false once: on the lethal hit, or on ramming the player.
    pub alive: bool,
    pub diving: bool,
    /// Phase of the dive wobble, independent of the formation sway.
    pub dive_phase: f32,
    /// Sideways drift per tick toward where the player was when the dive began.
    pub dive_drift: f32,
}

impl Enemy {
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub active: bool,
}

pub const POWER_UP_SIZE: f32 = 20.0;

impl PowerUp {
    /// A power-up dropped where an enemy died.
    pub fn dropped_at(center_x: f32, center_y: f32, kind: PowerUpKind) -> Self {
        PowerUp {
            rect: Rect::new(
                center_x - POWER_UP_SIZE / 2.0,
                center_y - POWER_UP_SIZE / 2.0,
                POWER_UP_SIZE,
                POWER_UP_SIZE,
            ),
            kind,
            active: true,
        }
    }
}

/// Cosmetic explosion debris.  Never collides with anything.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life in `[0, 1]`; doubles as render alpha.
    pub life: f32,
    pub color: ParticleColor,
}

// ── Wave & run state ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Wave {
    pub level: u32,
    pub boss: bool,
    /// Shared formation oscillator, kept within `[-1, 1]`.
    pub sway_phase: f32,
    /// +1.0 or -1.0.
    pub sway_dir: f32,
}

impl Wave {
    pub fn new(level: u32) -> Self {
        Wave {
            level,
            boss: crate::wave::is_boss_level(level),
            sway_phase: 0.0,
            sway_dir: 1.0,
        }
    }
}

/// The single timed power-up that may be running, with its deadline on the
/// simulation clock (milliseconds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub expires_at: u64,
}

// ── Master game state ────────────────────────────────────────────────────────

/// Everything one run owns.  Renderers and audio only ever see snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Player and enemy bullets share one store; `from_player` tells them apart.
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub wave: Wave,
    pub score: u32,
    /// Best score ever seen, raised live during play.
    pub high_score: u32,
    pub lives: u32,
    pub active_power_up: Option<ActivePowerUp>,
    pub shield: bool,
    pub phase: GamePhase,
    pub last_shot_at: Option<u64>,
    /// Current screen-shake magnitude in pixels; decays every tick.
    pub shake: f32,
    pub frame: u64,
}

impl GameState {
    pub fn level(&self) -> u32 {
        self.wave.level
    }

    pub fn double_fire_active(&self) -> bool {
        matches!(
            self.active_power_up,
            Some(ActivePowerUp { kind: PowerUpKind::DoubleFire, .. })
        )
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }
}
