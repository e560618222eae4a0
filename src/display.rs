//! Rendering layer; all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! round. No game logic happens here: the simulation's pixel space is
//! scaled onto the terminal grid and drawn cell by cell.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use skyfire::compute::Round;
use skyfire::entities::{
    Boss, BossVariant, Enemy, EnemyVariant, Explosion, ExplosionPhase, ExplosionScale, Pickup,
    PickupKind,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HEALTH_OK: Color = Color::Green;
const C_HEALTH_LOW: Color = Color::Red;
const C_SHOT_PLAYER: Color = Color::Cyan;
const C_SHOT_HOSTILE: Color = Color::Magenta;
const C_PICKUP_POWER: Color = Color::Yellow;
const C_PICKUP_HEALTH: Color = Color::Green;
const C_FIREBALL: Color = Color::Yellow;
const C_ASH: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

/// Craft colour per power tier.
const C_PLAYER_TIER: [Color; 3] = [Color::White, Color::Cyan, Color::Yellow];

// ── Arena-to-terminal scaling ─────────────────────────────────────────────────

/// Playfield geometry. Row 0 is the HUD, row 1 the top border, the last two
/// rows are the bottom border and the key hint; everything between maps the
/// arena, linearly scaled.
struct Grid {
    cols: u16,
    rows: u16,
    arena_w: f32,
    arena_h: f32,
}

impl Grid {
    fn new((cols, rows): (u16, u16), round: &Round) -> Self {
        Grid {
            cols,
            rows,
            arena_w: round.arena.width,
            arena_h: round.arena.height,
        }
    }

    /// Map an arena point to a terminal cell, or `None` once it has drifted
    /// outside the arena (explosions sink past the bottom while burning).
    fn cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x > self.arena_w || p.y > self.arena_h {
            return None;
        }
        let span_x = f32::from(self.cols.saturating_sub(3));
        let span_y = f32::from(self.rows.saturating_sub(5));
        let col = 1.0 + p.x / self.arena_w * span_x;
        let row = 2.0 + p.y / self.arena_h * span_y;
        Some((col as u16, row as u16))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, round: &Round) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let grid = Grid::new(terminal::size()?, round);

    draw_border(out, &grid)?;
    draw_hud(out, round, &grid)?;

    for enemy in &round.enemies {
        draw_enemy(out, &grid, enemy)?;
    }
    for boss in &round.bosses {
        draw_boss(out, &grid, boss)?;
    }
    for pickup in &round.pickups {
        draw_pickup(out, &grid, pickup)?;
    }
    for shot in round.player_shots.iter() {
        draw_shot(out, &grid, shot.pos, C_SHOT_PLAYER, "║")?;
    }
    for shot in round.hostile_shots.iter() {
        draw_shot(out, &grid, shot.pos, C_SHOT_HOSTILE, "•")?;
    }
    for burst in round.explosions.iter() {
        draw_explosion(out, &grid, burst)?;
    }

    draw_player(out, round, &grid)?;
    draw_controls_hint(out, &grid)?;

    if round.over {
        draw_game_over(out, round, &grid)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, grid.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    let w = grid.cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Bottom bar, one row above the hint
    out.queue(cursor::MoveTo(0, grid.rows.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..grid.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(grid.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, round: &Round, grid: &Grid) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>6}", round.score as u32)))?;

    // Health bar — right, ten cells plus the number
    let max = round.tuning.max_health.max(1);
    let health = round.player.health.clamp(0, max);
    let filled = (health * 10 + max - 1) / max; // ceiling, so 1 hp still shows
    let bar: String = "█".repeat(filled as usize) + &"░".repeat(10 - filled as usize);
    let hud = format!("HP {} {:>3}", bar, health);

    let rx = grid.cols.saturating_sub(hud.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    let color = if health * 4 <= max {
        C_HEALTH_LOW
    } else {
        C_HEALTH_OK
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(hud))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, round: &Round, grid: &Grid) -> std::io::Result<()> {
    // 2-row sprite, coloured by power tier:
    //   ▲       ← tip
    //  /█\      ← fuselage + wings
    let Some((col, row)) = grid.cell(round.player.center()) else {
        return Ok(());
    };
    let tier = usize::from(round.player.power).min(C_PLAYER_TIER.len() - 1);
    out.queue(style::SetForegroundColor(C_PLAYER_TIER[tier]))?;

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;

    let wing_row = row + 1;
    if wing_row < grid.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), wing_row))?;
        out.queue(Print("/█\\"))?;
    }

    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, grid: &Grid, enemy: &Enemy) -> std::io::Result<()> {
    let Some((col, row)) = grid.cell(enemy.center()) else {
        return Ok(());
    };
    let (sprite, color) = match enemy.variant {
        EnemyVariant::Corona => ("{☼}", Color::Yellow),
        EnemyVariant::Dart => ("«▼»", Color::Green),
        EnemyVariant::Skimmer => ("(◊)", Color::Cyan),
        EnemyVariant::Striker => ("[▼]", Color::Red),
        EnemyVariant::Helix => ("{§}", Color::Magenta),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_boss<W: Write>(out: &mut W, grid: &Grid, boss: &Boss) -> std::io::Result<()> {
    let Some((col, row)) = grid.cell(boss.center()) else {
        return Ok(());
    };
    let (top, face, color) = match boss.variant {
        BossVariant::Vortex => ("◢█▀█◣", " ◥█◤ ", Color::Blue),
        BossVariant::Scythe => ("◄█▄█►", " ▼▼▼ ", Color::Red),
        BossVariant::Gemini => ("▞█▄█▚", " ◆ ◆ ", Color::Cyan),
        BossVariant::Trident => ("╠█▄█╣", " ╽╽╽ ", Color::Yellow),
        BossVariant::Reaper => ("◤█▄█◥", " ▽▽▽ ", Color::Magenta),
    };
    let lx = col.saturating_sub(2).max(1);
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(Print(top))?;
    if row + 1 < grid.rows.saturating_sub(2) {
        out.queue(cursor::MoveTo(lx, row + 1))?;
        out.queue(Print(face))?;
    }
    Ok(())
}

fn draw_shot<W: Write>(
    out: &mut W,
    grid: &Grid,
    pos: Vec2,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    let Some((col, row)) = grid.cell(pos) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Falling collectibles.
///
/// Symbols:
///   ★  (yellow) — power-up: one more shot per volley
///   ✚  (green)  — health pack
fn draw_pickup<W: Write>(out: &mut W, grid: &Grid, pickup: &Pickup) -> std::io::Result<()> {
    let Some((col, row)) = grid.cell(pickup.pos) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    match pickup.kind {
        PickupKind::PowerUp => {
            out.queue(style::SetForegroundColor(C_PICKUP_POWER))?;
            out.queue(Print("★"))?;
        }
        PickupKind::HealthPack => {
            out.queue(style::SetForegroundColor(C_PICKUP_HEALTH))?;
            out.queue(Print("✚"))?;
        }
    }
    Ok(())
}

fn draw_explosion<W: Write>(out: &mut W, grid: &Grid, burst: &Explosion) -> std::io::Result<()> {
    let Some((col, row)) = grid.cell(burst.pos + burst.size() / 2.0) else {
        return Ok(());
    };
    let wide = burst.scale == ExplosionScale::Boss;
    let (sprite, color) = match burst.phase() {
        ExplosionPhase::Fireball if wide => ("✶✶✶", C_FIREBALL),
        ExplosionPhase::Fireball => ("✶", C_FIREBALL),
        ExplosionPhase::Ash if wide => ("▒▒▒", C_ASH),
        ExplosionPhase::Ash => ("▒", C_ASH),
    };
    let lx = if wide { col.saturating_sub(1).max(1) } else { col };
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sprite))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, grid.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←→↑↓ / WASD : Move   (autofire)   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, round: &Round, grid: &Grid) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", round.score as u32);

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let cx = grid.cols / 2;
    let total_rows = lines.len() + 2; // box + score + hint
    let start_row = (grid.rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let hint = "R - Play Again  Q - Quit";
    let hint_row = score_row + 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, hint_row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
