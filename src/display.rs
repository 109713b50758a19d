/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable `Snapshot` of
/// the frame.  No game logic is performed; this module only scales the
/// 480×640 playfield onto the terminal grid and translates it into
/// terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use galaga_next::entities::{
    EnemyKind, GamePhase, ParticleColor, PowerUpKind, Tier, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
};
use galaga_next::snapshot::{BulletView, EnemyView, ParticleView, PowerUpView, Snapshot};
use rand::Rng;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Cyan;
const C_SHIELD: Color = Color::Blue;
const C_ENEMY_ELITE: Color = Color::Red;
const C_ENEMY_MID: Color = Color::Yellow;
const C_ENEMY_BASE: Color = Color::Green;
const C_BOSS: Color = Color::Magenta;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_ENEMY: Color = Color::Red;
const C_STAR: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;
const C_BONUS_DOUBLE: Color = Color::Yellow;
const C_BONUS_SHIELD: Color = Color::Cyan;
const C_BONUS_LIFE: Color = Color::Magenta;
const C_POWERUP_ACTIVE: Color = Color::Yellow;

const CONTROLS: &str = "← → / A D : Move   SPACE : Shoot   Q : Quit";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal size the frame is drawn into.  Row 0 is the HUD, rows 1 and
/// `rows-2` are the border, the last row is the controls hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    fn inner_width(&self) -> f32 {
        self.cols.saturating_sub(2).max(1) as f32
    }

    fn inner_height(&self) -> f32 {
        self.rows.saturating_sub(4).max(1) as f32
    }

    /// Terminal cell for a playfield point, shifted `shake` columns.
    /// `None` when the point lies outside the visible playfield.
    pub fn to_cell(&self, x: f32, y: f32, shake: i32) -> Option<(u16, u16)> {
        if !(0.0..PLAYFIELD_WIDTH).contains(&x) || !(0.0..PLAYFIELD_HEIGHT).contains(&y) {
            return None;
        }
        let col = 1 + (x / PLAYFIELD_WIDTH * self.inner_width()) as i32 + shake;
        let row = 2 + (y / PLAYFIELD_HEIGHT * self.inner_height()) as i32;
        if col < 1 || col > self.cols as i32 - 2 {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

/// Horizontal jitter in columns.  Alternates sign as the magnitude decays
/// one step per tick, so the screen rattles rather than drifts.
pub fn shake_offset(shake: f32) -> i32 {
    if shake <= 0.0 {
        return 0;
    }
    let magnitude = (shake / 5.0).ceil() as i32;
    if (shake as i32) % 2 == 0 {
        magnitude
    } else {
        -magnitude
    }
}

// ── Starfield ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Star {
    x: f32,
    y: f32,
    speed: f32,
}

/// Background stars scrolling down the playfield.  Purely cosmetic, so it
/// lives with the renderer rather than in the simulation.
#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0.0..PLAYFIELD_WIDTH),
                y: rng.gen_range(0.0..PLAYFIELD_HEIGHT),
                speed: rng.gen_range(1.0..3.0),
            })
            .collect();
        Starfield { stars }
    }

    pub fn scroll(&mut self) {
        for star in &mut self.stars {
            star.y += star.speed;
            if star.y >= PLAYFIELD_HEIGHT {
                star.y = 0.0;
            }
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    stars: &Starfield,
    view: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let shake = shake_offset(snap.shake);

    draw_border(out, view)?;
    draw_hud(out, snap, view)?;
    draw_stars(out, stars, view)?;

    for enemy in &snap.enemies {
        draw_enemy(out, enemy, view, shake)?;
    }
    for power_up in &snap.power_ups {
        draw_power_up(out, power_up, view, shake)?;
    }
    for bullet in &snap.bullets {
        draw_bullet(out, bullet, view, shake)?;
    }
    for particle in &snap.particles {
        draw_particle(out, particle, view, shake)?;
    }

    if snap.phase == GamePhase::Playing {
        draw_player(out, snap, view, shake)?;
    }
    draw_controls_hint(out, view)?;

    match snap.phase {
        GamePhase::Start => draw_title(out, snap, view)?,
        GamePhase::GameOver => draw_game_over(out, snap, view)?,
        GamePhase::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn print_at<W: Write>(
    out: &mut W,
    col: u16,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

/// Print `text` centred on `col`, kept inside the side walls.
fn print_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    col: u16,
    row: u16,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    let len = text.chars().count() as u16;
    let max_start = view.cols.saturating_sub(len + 1).max(1);
    let start = col.saturating_sub(len / 2).clamp(1, max_start);
    print_at(out, start, row, color, text)
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, view: Viewport) -> std::io::Result<()> {
    // Score and high score, left
    print_at(
        out,
        1,
        0,
        C_HUD_SCORE,
        &format!("Score:{:>7}  Hi:{:>7}", snap.score, snap.high_score),
    )?;

    // Level, centre
    let (level_str, level_color) = if snap.boss_wave {
        (format!("[ BOSS {} ]", snap.level), C_BOSS)
    } else {
        (format!("[ LEVEL {} ]", snap.level), Color::White)
    };
    let lx = (view.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    print_at(out, lx, 0, level_color, &level_str)?;

    // Active power-up, shield and lives, right-aligned
    let power_tag = match snap.power_up_remaining {
        Some((PowerUpKind::DoubleFire, ms)) => format!("[» DOUBLE {:>2}s] ", ms / 1000 + 1),
        _ => String::new(),
    };
    let shield_tag = if snap.shield { "[◊ SHIELD] " } else { "" };
    let lives_str = format!("Lives:{}", "♥".repeat(snap.lives as usize));
    let width = power_tag.chars().count() + shield_tag.chars().count() + lives_str.chars().count();

    let rx = view.cols.saturating_sub(width as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    if !power_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_POWERUP_ACTIVE))?;
        out.queue(Print(&power_tag))?;
    }
    if !shield_tag.is_empty() {
        out.queue(style::SetForegroundColor(C_SHIELD))?;
        out.queue(Print(shield_tag))?;
    }
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_stars<W: Write>(out: &mut W, stars: &Starfield, view: Viewport) -> std::io::Result<()> {
    for star in &stars.stars {
        if let Some((col, row)) = view.to_cell(star.x, star.y, 0) {
            let glyph = if star.speed > 2.0 { "." } else { "·" };
            print_at(out, col, row, C_STAR, glyph)?;
        }
    }
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    view: Viewport,
    shake: i32,
) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let p = &snap.player;
    let Some((col, row)) = view.to_cell(p.center_x(), p.y, shake) else {
        return Ok(());
    };
    let color = if snap.shield { C_SHIELD } else { C_PLAYER };
    print_at(out, col, row, color, "▲")?;

    let wing_row = row + 1;
    if wing_row < view.rows.saturating_sub(2) {
        let left = col.saturating_sub(1).max(1);
        let body = if snap.shield { "(█)" } else { "/█\\" };
        print_at(out, left, wing_row, color, body)?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &EnemyView,
    view: Viewport,
    shake: i32,
) -> std::io::Result<()> {
    let r = &enemy.rect;
    let Some((col, row)) = view.to_cell(r.center_x(), r.y, shake) else {
        return Ok(());
    };
    let play_bottom = view.rows.saturating_sub(2);

    let (top, bottom, color) = match enemy.kind {
        EnemyKind::Tier(Tier::Elite) => {
            // Second hit point shown as a filled core.
            let top = if enemy.hp > 1 { "«◆»" } else { "«◇»" };
            (top, "╚═╝", C_ENEMY_ELITE)
        }
        EnemyKind::Tier(Tier::Mid) => ("(◎)", "╰─╯", C_ENEMY_MID),
        EnemyKind::Tier(Tier::Base) => ("<▼>", "/ \\", C_ENEMY_BASE),
        EnemyKind::Boss => return draw_boss(out, enemy, view, col, row),
    };
    let left = col.saturating_sub(1).max(1);
    print_at(out, left, row, color, top)?;
    if row + 1 < play_bottom {
        print_at(out, left, row + 1, color, bottom)?;
    }
    Ok(())
}

fn draw_boss<W: Write>(
    out: &mut W,
    boss: &EnemyView,
    view: Viewport,
    col: u16,
    row: u16,
) -> std::io::Result<()> {
    // Health bar above the hull, 10 segments.
    let filled = (boss.hp_fraction * 10.0).ceil() as usize;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled.min(10)));
    if row > 2 {
        print_at(out, col.saturating_sub(5).max(1), row - 1, C_HUD_LIVES, &bar)?;
    }

    let hull = ["╔═◢███◣═╗", "╚╦▀▀█▀▀╦╝", " ▼  ▼  ▼ "];
    let play_bottom = view.rows.saturating_sub(2);
    for (i, line) in hull.iter().enumerate() {
        let r = row + i as u16;
        if r < play_bottom {
            print_at(out, col.saturating_sub(4).max(1), r, C_BOSS, line)?;
        }
    }
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &BulletView,
    view: Viewport,
    shake: i32,
) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(bullet.rect.center_x(), bullet.rect.y, shake) else {
        return Ok(());
    };
    if bullet.from_player {
        print_at(out, col, row, C_BULLET_PLAYER, "║")
    } else {
        print_at(out, col, row, C_BULLET_ENEMY, "•")
    }
}

/// Draw a falling power-up.
///
/// Symbols:
///   »  (yellow)   DoubleFire: twin shots, faster cooldown
///   ◊  (cyan)     Shield:     absorbs the next hit
///   ♥  (magenta)  ExtraLife:  instantly restores one life
fn draw_power_up<W: Write>(
    out: &mut W,
    power_up: &PowerUpView,
    view: Viewport,
    shake: i32,
) -> std::io::Result<()> {
    let r = &power_up.rect;
    let Some((col, row)) = view.to_cell(r.center_x(), r.center_y(), shake) else {
        return Ok(());
    };
    let (glyph, color) = match power_up.kind {
        PowerUpKind::DoubleFire => ("»", C_BONUS_DOUBLE),
        PowerUpKind::Shield => ("◊", C_BONUS_SHIELD),
        PowerUpKind::ExtraLife => ("♥", C_BONUS_LIFE),
    };
    print_at(out, col, row, color, glyph)
}

fn particle_color(color: ParticleColor) -> Color {
    match color {
        ParticleColor::White => Color::White,
        ParticleColor::Red => Color::Red,
        ParticleColor::Yellow => Color::Yellow,
        ParticleColor::Green => Color::Green,
        ParticleColor::Magenta => Color::Magenta,
        ParticleColor::Cyan => Color::Cyan,
    }
}

fn draw_particle<W: Write>(
    out: &mut W,
    particle: &ParticleView,
    view: Viewport,
    shake: i32,
) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(particle.x, particle.y, shake) else {
        return Ok(());
    };
    // Fade by swapping glyphs; terminals have no alpha.
    let glyph = if particle.alpha > 0.66 {
        "*"
    } else if particle.alpha > 0.33 {
        "+"
    } else {
        "·"
    };
    print_at(out, col, row, particle_color(particle.color), glyph)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    print_at(out, 1, view.rows.saturating_sub(1), C_HINT, CONTROLS)
}

// ── Title overlay ─────────────────────────────────────────────────────────────

fn draw_title<W: Write>(out: &mut W, snap: &Snapshot, view: Viewport) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let cy = view.rows / 2;

    print_centered(out, view, cx, cy.saturating_sub(6), Color::Cyan, "★  GALAGA  NEXT  ★")?;
    if snap.high_score > 0 {
        let best = format!("Best Score: {}", snap.high_score);
        print_centered(out, view, cx, cy.saturating_sub(5), Color::Yellow, &best)?;
    }

    // Power-up legend
    let legend: &[(&str, Color, &str)] = &[
        ("»", C_BONUS_DOUBLE, " DoubleFire — twin shots for 10s"),
        ("◊", C_BONUS_SHIELD, " Shield     — absorbs one hit"),
        ("♥", C_BONUS_LIFE, " ExtraLife  — +1 life (max 5)"),
    ];
    let left = cx.saturating_sub(17).max(1);
    print_at(out, left, cy.saturating_sub(3), Color::White, "Power-ups (catch falling items):")?;
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        print_at(out, left, row, *color, sym)?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(*desc))?;
    }

    print_centered(out, view, cx, cy + 2, C_BOSS, "A boss waits at every fifth wave")?;
    print_centered(out, view, cx, cy + 4, Color::White, "SPACE / ENTER - Start   Q - Quit")?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, snap: &Snapshot, view: Viewport) -> std::io::Result<()> {
    let new_best = snap.score >= snap.high_score && snap.score > 0;
    let score_line = format!("Final Score: {:>7}", snap.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>7} ★", snap.high_score)
    } else {
        format!("Best Score:  {:>7}", snap.high_score)
    };
    let level_line = format!("Reached level {}", snap.level);

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), if new_best { Color::Yellow } else { Color::DarkGrey }),
        (level_line.as_str(), Color::White),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        print_centered(out, view, cx, start_row + i as u16, *color, msg)?;
    }
    Ok(())
}
