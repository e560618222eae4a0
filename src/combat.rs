//! Movement, fire patterns and hit tests.
//!
//! Per-variant behavior is a set of small lookup functions plus one update
//! function per entity class; `compute` calls these and never matches on a
//! variant itself. All shots enter play through one volley builder so the
//! row-placement rule is written exactly once.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{
    Arena, Boss, BossVariant, Enemy, EnemyVariant, Explosion, ExplosionScale, Projectile,
    BOSS_SIZE, ENEMY_SIZE, HOSTILE_SHOT_SIZE, PLAYER_SHOT_SIZE,
};
use crate::pool::Pool;

/// Frames between an enemy's stochastic wander turns.
const WANDER_PERIOD: u32 = 80;
/// Window (frames since spawn) in which settling variants descend slower.
const HOVER_WINDOW: std::ops::Range<u32> = 40..160;
/// Shots in one ring emission.
const RING_SHOTS: u32 = 6;

/// Shots per enemy burst.
const ENEMY_BURST: u32 = 3;
const RING_BURST: u32 = 5;

/// Emissions per boss burst.
const SWEEP_BURST: u32 = 20;
const TWIN_BURST: u32 = 10;
const TRIDENT_BURST: u32 = 1;

// ── Hit tests ─────────────────────────────────────────────────────────────

/// Coarse disc test: centers closer than the radius sum.
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) < (ra + rb) * (ra + rb)
}

/// Axis-aligned rectangle overlap, used for pickup grabs.
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && b_pos.x < a_pos.x + a_size.x
        && a_pos.y < b_pos.y + b_size.y
        && b_pos.y < a_pos.y + a_size.y
}

// ── Volleys ───────────────────────────────────────────────────────────────

/// Fire `count` player shots straight up, centered on `anchor`.
pub fn spawn_player_volley(pool: &mut Pool<Projectile>, anchor: Vec2, count: u32, t: &Tuning) {
    spawn_volley(
        pool,
        anchor,
        count,
        Vec2::new(0.0, -1.0),
        t.player_shot_speed,
        t.volley_spacing,
        PLAYER_SHOT_SIZE,
    );
}

/// Hostile counterpart. `dir` must be unit length.
pub fn spawn_hostile_volley(
    pool: &mut Pool<Projectile>,
    anchor: Vec2,
    count: u32,
    dir: Vec2,
    t: &Tuning,
) {
    spawn_volley(
        pool,
        anchor,
        count,
        dir,
        t.hostile_shot_speed,
        t.volley_spacing,
        HOSTILE_SHOT_SIZE,
    );
}

/// The one batch-fire entry point. Shot `i` of `count` sits at horizontal
/// offset `(i - (count - 1) / 2) * spacing`, with its bottom-center on the
/// offset anchor, so the row is symmetric around `anchor` for any count.
fn spawn_volley(
    pool: &mut Pool<Projectile>,
    anchor: Vec2,
    count: u32,
    dir: Vec2,
    speed: f32,
    spacing: f32,
    size: Vec2,
) {
    for i in 0..count {
        let offset = (i as f32 - (count as f32 - 1.0) / 2.0) * spacing;
        let handle = pool.acquire();
        let shot = pool.get_mut(handle);
        shot.pos = Vec2::new(anchor.x + offset - size.x / 2.0, anchor.y - size.y);
        shot.dir = dir;
        shot.speed = speed;
    }
}

/// Light a pooled explosion centered where something died.
pub fn spawn_explosion(pool: &mut Pool<Explosion>, center: Vec2, scale: ExplosionScale, t: &Tuning) {
    let handle = pool.acquire();
    let burst = pool.get_mut(handle);
    burst.scale = scale;
    burst.pos = center - burst.size() / 2.0;
    burst.remaining = match scale {
        ExplosionScale::Enemy => t.enemy_explosion_frames,
        ExplosionScale::Boss => t.boss_explosion_frames,
    };
}

// ── Enemy behavior ────────────────────────────────────────────────────────

/// Ring-firing variants drift in at half speed.
fn enemy_speed(variant: EnemyVariant, t: &Tuning) -> f32 {
    match variant {
        EnemyVariant::Corona | EnemyVariant::Helix => t.enemy_speed / 2.0,
        _ => t.enemy_speed,
    }
}

/// Ring-firing variants re-arm half as often.
fn enemy_fire_cycle(variant: EnemyVariant, t: &Tuning) -> u32 {
    match variant {
        EnemyVariant::Corona | EnemyVariant::Helix => 2 * t.enemy_fire_cycle,
        _ => t.enemy_fire_cycle,
    }
}

fn enemy_burst(variant: EnemyVariant) -> u32 {
    match variant {
        EnemyVariant::Corona | EnemyVariant::Helix => RING_BURST,
        _ => ENEMY_BURST,
    }
}

/// One AI step for an enemy: wander, descend, bounce, then trigger or drain
/// its burst. Returns `false` once the enemy leaves through the bottom edge.
pub fn update_enemy(
    e: &mut Enemy,
    arena: &Arena,
    t: &Tuning,
    shots: &mut Pool<Projectile>,
    rng: &mut impl Rng,
) -> bool {
    let speed = enemy_speed(e.variant, t);

    // Wander: every WANDER_PERIOD frames, a coin flip turns the drift around.
    if e.frame % WANDER_PERIOD == 0 && rng.gen_bool(0.5) {
        e.dir = -e.dir;
    }

    // Settling variants descend at 1.0x speed inside the hover window,
    // everyone else at 1.5x all the way down.
    let settling = matches!(e.variant, EnemyVariant::Skimmer | EnemyVariant::Striker)
        && HOVER_WINDOW.contains(&e.frame);
    let descent = if settling { speed } else { 1.5 * speed };
    e.pos.x += 0.5 * e.dir * speed;
    e.pos.y += descent;

    // Bounce off the side walls; no clamp, the turn brings it back.
    if e.pos.x < 0.0 || e.pos.x + ENEMY_SIZE.x > arena.width {
        e.dir = -e.dir;
    }

    // Burst trigger on the fire cycle (including the spawn frame), otherwise
    // drain one pending shot whenever the cooldown has run out.
    if e.frame % enemy_fire_cycle(e.variant, t) == 0 {
        e.pending_shots = enemy_burst(e.variant);
        fire_enemy_shot(e, t, shots);
    } else if e.pending_shots > 0 && e.shot_cooldown == 0 {
        fire_enemy_shot(e, t, shots);
    }
    if e.shot_cooldown > 0 {
        e.shot_cooldown -= 1;
    }

    e.frame += 1;

    // Leaving through the bottom despawns without any effect.
    e.pos.y + ENEMY_SIZE.y <= arena.height
}

/// Emit one burst step. Ring variants put six shots on 60 degree spokes
/// around the hull; everyone else drops a single shot from the bottom.
fn fire_enemy_shot(e: &mut Enemy, t: &Tuning, shots: &mut Pool<Projectile>) {
    match e.variant {
        EnemyVariant::Corona | EnemyVariant::Helix => {
            // Helix offsets each ring's spawn points by a phase tied to the
            // shots still pending, so consecutive rings trace a spiral. The
            // travel directions stay on the plain spokes for both variants.
            let phase = match e.variant {
                EnemyVariant::Helix => e.pending_shots as f32 * 2.0 / (RING_SHOTS as f32 + 1.0),
                _ => 0.0,
            };
            for i in 0..RING_SHOTS {
                let spoke = TAU * i as f32 / RING_SHOTS as f32;
                let dir = Vec2::new(spoke.cos(), spoke.sin());
                let offset = Vec2::new((spoke + phase).cos(), (spoke + phase).sin());
                let anchor = e.center() + offset * e.radius();
                spawn_hostile_volley(shots, anchor, 1, dir, t);
            }
            e.shot_cooldown = (0.5 * t.fire_wait as f32) as u32;
        }
        _ => {
            spawn_hostile_volley(shots, e.bottom_center(), 1, Vec2::new(0.0, 1.0), t);
            e.shot_cooldown = t.fire_wait;
        }
    }
    e.pending_shots -= 1;
}

// ── Boss behavior ─────────────────────────────────────────────────────────

fn boss_burst(variant: BossVariant) -> u32 {
    match variant {
        BossVariant::Scythe | BossVariant::Reaper => SWEEP_BURST,
        BossVariant::Vortex | BossVariant::Gemini => TWIN_BURST,
        BossVariant::Trident => TRIDENT_BURST,
    }
}

/// One AI step for a boss: patrol along the top and drain any active burst.
pub fn update_boss(b: &mut Boss, arena: &Arena, t: &Tuning, shots: &mut Pool<Projectile>) {
    b.pos.x += b.dir * t.boss_speed;
    if b.pos.x < 0.0 || b.pos.x + BOSS_SIZE.x > arena.width {
        b.dir = -b.dir;
    }
    if b.pending_shots > 0 && b.shot_cooldown == 0 {
        fire_boss_shot(b, t, shots);
    }
    if b.shot_cooldown > 0 {
        b.shot_cooldown -= 1;
    }
}

/// External burst trigger, sent on the controller's cadence. Ignored while a
/// burst is still draining; otherwise arms the variant's burst, flips the
/// sweep sign and fires the first emission at once.
pub fn trigger_boss_fire(b: &mut Boss, t: &Tuning, shots: &mut Pool<Projectile>) {
    if b.pending_shots > 0 {
        return;
    }
    b.aim_sign = -b.aim_sign;
    b.burst_len = boss_burst(b.variant);
    b.pending_shots = b.burst_len;
    fire_boss_shot(b, t, shots);
}

/// One burst emission. Sweep variants walk one shot across a fan as the
/// burst drains; paired variants launch two offset shots per emission;
/// Trident dumps its whole salvo at once.
fn fire_boss_shot(b: &mut Boss, t: &Tuning, shots: &mut Pool<Projectile>) {
    let fraction = b.pending_shots as f32 / b.burst_len as f32;
    match b.variant {
        BossVariant::Scythe | BossVariant::Reaper => {
            // Fan from 0.9 pi down to 0.14 pi as the burst empties, mirrored
            // horizontally by the alternating aim sign.
            let angle = PI * (0.8 * fraction + 0.1);
            let dir = Vec2::new(b.aim_sign * angle.cos(), angle.sin());
            spawn_hostile_volley(shots, b.bottom_center(), 1, dir, t);
            b.shot_cooldown = (0.3 * t.fire_wait as f32) as u32;
        }
        BossVariant::Vortex | BossVariant::Gemini => {
            // Two shots per emission, one volley-spacing apart. The x and y
            // fan rates differ, so the pair curls as the burst drains.
            let dir = Vec2::new(
                b.aim_sign * (PI * (0.8 * fraction + 0.1)).cos(),
                (PI * (0.4 * fraction + 0.1)).sin(),
            )
            .normalize();
            spawn_hostile_volley(shots, b.bottom_center(), 2, dir, t);
            b.shot_cooldown = (0.8 * t.fire_wait as f32) as u32;
        }
        BossVariant::Trident => {
            // Three straight down plus one companion on each 60 degree
            // shoulder, all in the single emission of the burst.
            let shoulder = TAU / 6.0;
            spawn_hostile_volley(shots, b.bottom_center(), 3, Vec2::new(0.0, 1.0), t);
            for angle in [shoulder, 2.0 * shoulder] {
                let dir = Vec2::new(angle.cos(), angle.sin());
                spawn_hostile_volley(shots, b.bottom_center(), 1, dir, t);
            }
        }
    }
    b.pending_shots -= 1;
}
