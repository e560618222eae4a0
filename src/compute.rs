//! The fixed-timestep frame pipeline.
//!
//! [`Round`] owns every live entity and walks them through the same stage
//! order every frame: player, spawn timers, AI, motion, collisions,
//! bookkeeping. Later stages read what earlier ones just wrote, so the order
//! is part of the game's contract, not a convenience.
//!
//! Randomness comes in through the `rng` argument of
//! [`Round::advance_frame`]; the round itself holds no generator, which
//! keeps replays and tests deterministic under a seeded source.

use glam::Vec2;
use rand::Rng;

use crate::combat::{self, circles_overlap, rects_overlap};
use crate::config::{Tuning, TuningError};
use crate::entities::{
    hit_radius, Arena, Boss, Enemy, Explosion, ExplosionScale, FrameResult, InputState, Pickup,
    PickupKind, PlayerCraft, Projectile, BOSS_SIZE, HOSTILE_SHOT_SIZE, PICKUP_SIZE,
    PLAYER_SHOT_SIZE, PLAYER_SIZE,
};
use crate::pool::Pool;
use crate::waves::WaveController;

/// Slots pre-seeded into each projectile pool so the opening volleys reuse
/// storage instead of growing it.
const SHOT_POOL_RESERVE: usize = 10;

// ── Round state ───────────────────────────────────────────────────────────

/// One playable round. Fields are public for staging and rendering; the
/// presentation layer holds `&Round` and so can only look.
#[derive(Clone, Debug)]
pub struct Round {
    pub tuning: Tuning,
    pub arena: Arena,
    pub player: PlayerCraft,
    pub enemies: Vec<Enemy>,
    pub bosses: Vec<Boss>,
    pub player_shots: Pool<Projectile>,
    pub hostile_shots: Pool<Projectile>,
    pub pickups: Vec<Pickup>,
    pub explosions: Pool<Explosion>,
    pub waves: WaveController,
    /// Fractional score accumulator; reports truncate it.
    pub score: f64,
    /// Frames advanced since the last reset.
    pub frame: u64,
    pub over: bool,
}

/// Place the craft horizontally centered with its underside at 95% of the
/// arena height, full health, no power, cooldown wound to a full period.
fn spawn_player(t: &Tuning, arena: &Arena) -> PlayerCraft {
    PlayerCraft {
        pos: Vec2::new(
            arena.width / 2.0 - PLAYER_SIZE.x / 2.0,
            arena.height * 0.95 - PLAYER_SIZE.y,
        ),
        vx: 0.0,
        vy: 0.0,
        health: t.max_health,
        power: 0,
        fire_cooldown: t.player_fire_period,
    }
}

impl Round {
    /// Build a round in its start state. The tuning table and arena are
    /// validated here, once; a `Round` that exists never re-checks its
    /// numbers.
    pub fn new(tuning: Tuning, arena: Arena) -> Result<Self, TuningError> {
        tuning.validate()?;
        // Spawns pick a random x in `0..width - sprite`; the boss is the
        // widest sprite, so an arena it fits leaves every range non-empty.
        if arena.width <= BOSS_SIZE.x {
            return Err(TuningError::ArenaTooSmall("width"));
        }
        if arena.height <= BOSS_SIZE.y {
            return Err(TuningError::ArenaTooSmall("height"));
        }
        log::info!("round built: arena {}x{}", arena.width, arena.height);
        Ok(Round {
            player: spawn_player(&tuning, &arena),
            enemies: Vec::new(),
            bosses: Vec::new(),
            player_shots: Pool::with_reserve(SHOT_POOL_RESERVE),
            hostile_shots: Pool::with_reserve(SHOT_POOL_RESERVE),
            pickups: Vec::new(),
            explosions: Pool::new(),
            waves: WaveController::new(&tuning),
            score: 0.0,
            frame: 0,
            over: false,
            tuning,
            arena,
        })
    }

    /// Restore the start state in place. Pools keep the storage they grew
    /// last round; every slot just returns to the reserve.
    pub fn reset(&mut self) {
        self.player = spawn_player(&self.tuning, &self.arena);
        self.enemies.clear();
        self.bosses.clear();
        self.player_shots.release_all();
        self.hostile_shots.release_all();
        self.pickups.clear();
        self.explosions.release_all();
        self.waves = WaveController::new(&self.tuning);
        self.score = 0.0;
        self.frame = 0;
        self.over = false;
        log::info!("round reset");
    }

    /// Run one simulation step. A finished round ignores the step and keeps
    /// handing back its final report.
    pub fn advance_frame(&mut self, input: InputState, rng: &mut impl Rng) -> FrameResult {
        if self.over {
            return self.report();
        }
        self.frame += 1;
        self.score += self.tuning.time_bonus;

        // ── 1. Player: velocity from input, move, clamp, autofire ─────────
        self.update_player(input);

        // ── 2. Spawn timers: pickups, enemies, the boss clock ─────────────
        self.roll_pickups(rng);
        if self
            .waves
            .enemy_due(self.frame, !self.bosses.is_empty(), &self.tuning)
        {
            let enemy = self.waves.spawn_enemy(&self.arena, &self.tuning, rng);
            self.enemies.push(enemy);
        }
        if self.waves.boss_due(self.frame, &self.tuning) {
            let boss = self.waves.spawn_boss(&self.arena, &self.tuning, rng);
            self.bosses.push(boss);
        }

        // ── 3. AI: bosses get their external trigger, then everyone acts ──
        if self.frame % u64::from(self.tuning.boss_fire_period) == 0 {
            for boss in &mut self.bosses {
                combat::trigger_boss_fire(boss, &self.tuning, &mut self.hostile_shots);
            }
        }
        for boss in &mut self.bosses {
            combat::update_boss(boss, &self.arena, &self.tuning, &mut self.hostile_shots);
        }
        let arena = self.arena;
        let tuning = &self.tuning;
        let hostile_shots = &mut self.hostile_shots;
        self.enemies
            .retain_mut(|e| combat::update_enemy(e, &arena, tuning, hostile_shots, rng));

        // ── 4. Motion: projectiles, pickups, explosions ────────────────────
        self.move_projectiles();
        self.move_pickups();
        let drift = self.tuning.explosion_drift;
        self.explosions.retain_active(|burst| {
            burst.pos.y += drift;
            burst.remaining -= 1;
            burst.remaining > 0
        });

        // ── 5. Collisions, in fixed order ──────────────────────────────────
        self.resolve_collisions();

        // ── 6. Round bookkeeping ───────────────────────────────────────────
        if self.player.health <= 0 {
            self.over = true;
            log::info!(
                "round over at frame {}: score {}",
                self.frame,
                self.score as u32
            );
        }
        self.report()
    }

    /// Apply input as velocity, move, clamp position and health, and run the
    /// fire cooldown. Clamping fixes one edge per frame, checked left, right,
    /// top, bottom; a corner overshoot finishes straightening next frame.
    fn update_player(&mut self, input: InputState) {
        let t = &self.tuning;
        let p = &mut self.player;

        p.vx = 0.0;
        p.vy = 0.0;
        if input.left {
            p.vx = -t.player_speed;
        }
        if input.right {
            p.vx = t.player_speed;
        }
        if input.up {
            p.vy = -t.player_speed;
        }
        if input.down {
            p.vy = t.player_speed;
        }
        p.pos.x += p.vx;
        p.pos.y += p.vy;

        if p.pos.x < 0.0 {
            p.pos.x = 0.0;
        } else if p.pos.x + PLAYER_SIZE.x > self.arena.width {
            p.pos.x = self.arena.width - PLAYER_SIZE.x;
        } else if p.pos.y < 0.0 {
            p.pos.y = 0.0;
        } else if p.pos.y + PLAYER_SIZE.y > self.arena.height {
            p.pos.y = self.arena.height - PLAYER_SIZE.y;
        }

        // A health pack may have pushed health over the ceiling last frame.
        if p.health > t.max_health {
            p.health = t.max_health;
        }

        p.fire_cooldown -= 1;
        if p.fire_cooldown == 0 {
            let volley = u32::from(p.power) + 1;
            combat::spawn_player_volley(&mut self.player_shots, p.top_center(), volley, t);
            p.fire_cooldown = t.player_fire_period;
        }
    }

    /// Each absent pickup kind rolls its appearance chance on its own, so at
    /// most one of each kind is ever falling.
    fn roll_pickups(&mut self, rng: &mut impl Rng) {
        for kind in [PickupKind::PowerUp, PickupKind::HealthPack] {
            if self.pickups.iter().any(|p| p.kind == kind) {
                continue;
            }
            if rng.gen_bool(self.tuning.pickup_chance) {
                let x = rng.gen_range(0.0..self.arena.width - 2.0 * PICKUP_SIZE.x);
                self.pickups.push(Pickup {
                    pos: Vec2::new(x, 0.0),
                    kind,
                });
            }
        }
    }

    /// Straight-line motion; shots recycle once they leave the arena.
    fn move_projectiles(&mut self) {
        let arena = self.arena;
        self.player_shots.retain_active(|shot| {
            shot.pos += shot.dir * shot.speed;
            shot.pos.y >= 0.0
        });
        // The bottom edge cuts at first contact; the other edges only once
        // the shot is fully outside, so angled shots can graze the walls.
        self.hostile_shots.retain_active(|shot| {
            shot.pos += shot.dir * shot.speed;
            shot.pos.x + HOSTILE_SHOT_SIZE.x > 0.0
                && shot.pos.x < arena.width
                && shot.pos.y + HOSTILE_SHOT_SIZE.y > 0.0
                && shot.pos.y + HOSTILE_SHOT_SIZE.y <= arena.height
        });
    }

    /// Pickups fall straight down. Grabbing is a rectangle test against the
    /// craft; anything past the bottom edge despawns quietly.
    fn move_pickups(&mut self) {
        let fall = self.tuning.pickup_fall_speed;
        let player_pos = self.player.pos;
        let arena_height = self.arena.height;
        let mut grabbed = Vec::new();
        self.pickups.retain_mut(|pickup| {
            pickup.pos.y += fall;
            if rects_overlap(pickup.pos, PICKUP_SIZE, player_pos, PLAYER_SIZE) {
                grabbed.push(pickup.kind);
                return false;
            }
            pickup.pos.y <= arena_height
        });
        for kind in grabbed {
            match kind {
                PickupKind::PowerUp => self.player.gain_power(),
                PickupKind::HealthPack => self.player.health += self.tuning.health_pack_gain,
            }
            log::debug!("pickup grabbed: {kind:?}");
        }
    }

    /// The five hit checks, always in this order. A projectile recycled by
    /// an earlier check is gone before a later one looks, and the resolver
    /// stops outright once the player is out.
    fn resolve_collisions(&mut self) {
        let hit_damage = self.tuning.hit_damage;
        let collide_damage = self.tuning.collide_damage;
        let player_center = self.player.center();
        let player_radius = self.player.radius();

        // 1. Enemy hulls ramming the craft. The rammed enemy vanishes with
        //    no explosion and no score; only the player pays.
        let player = &mut self.player;
        self.enemies.retain(|e| {
            if circles_overlap(e.center(), e.radius(), player_center, player_radius) {
                player.health -= collide_damage;
                player.lose_power();
                false
            } else {
                true
            }
        });
        if self.player.health <= 0 {
            return;
        }

        // 2. Hostile shots striking the craft, one hit per shot.
        let player = &mut self.player;
        self.hostile_shots.retain_active(|shot| {
            let center = shot.pos + HOSTILE_SHOT_SIZE / 2.0;
            if circles_overlap(
                center,
                hit_radius(HOSTILE_SHOT_SIZE),
                player_center,
                player_radius,
            ) {
                player.health -= hit_damage;
                player.lose_power();
                false
            } else {
                true
            }
        });
        if self.player.health <= 0 {
            return;
        }

        // 3. Player shots into enemies. Enemies are visited in spawn order;
        //    a shot spent on one cannot also hit the next.
        let shot_handles = self.player_shots.handles();
        let mut killed = Vec::new();
        for (idx, enemy) in self.enemies.iter_mut().enumerate() {
            for &handle in &shot_handles {
                if !self.player_shots.is_active(handle) {
                    continue;
                }
                let shot = self.player_shots.get(handle);
                let center = shot.pos + PLAYER_SHOT_SIZE / 2.0;
                if circles_overlap(
                    center,
                    hit_radius(PLAYER_SHOT_SIZE),
                    enemy.center(),
                    enemy.radius(),
                ) {
                    self.player_shots.release(handle);
                    enemy.health -= hit_damage;
                }
            }
            if enemy.health <= 0 {
                killed.push(idx);
            }
        }
        for &idx in killed.iter().rev() {
            let enemy = self.enemies.remove(idx);
            self.score += f64::from(self.tuning.enemy_score);
            combat::spawn_explosion(
                &mut self.explosions,
                enemy.center(),
                ExplosionScale::Enemy,
                &self.tuning,
            );
        }

        // 4. Boss hulls against the craft. The boss shrugs the contact off.
        for boss in &self.bosses {
            if circles_overlap(boss.center(), boss.radius(), player_center, player_radius) {
                self.player.health -= collide_damage;
                self.player.lose_power();
            }
        }
        if self.player.health <= 0 {
            return;
        }

        // 5. Player shots into bosses. A dead boss pays out, burns at boss
        //    scale and hands its kill to the wave controller.
        let mut killed = Vec::new();
        for (idx, boss) in self.bosses.iter_mut().enumerate() {
            for &handle in &shot_handles {
                if !self.player_shots.is_active(handle) {
                    continue;
                }
                let shot = self.player_shots.get(handle);
                let center = shot.pos + PLAYER_SHOT_SIZE / 2.0;
                if circles_overlap(
                    center,
                    hit_radius(PLAYER_SHOT_SIZE),
                    boss.center(),
                    boss.radius(),
                ) {
                    self.player_shots.release(handle);
                    boss.health -= hit_damage;
                }
            }
            if boss.health <= 0 {
                killed.push(idx);
            }
        }
        for &idx in killed.iter().rev() {
            let boss = self.bosses.remove(idx);
            self.score += f64::from(self.tuning.boss_score);
            combat::spawn_explosion(
                &mut self.explosions,
                boss.center(),
                ExplosionScale::Boss,
                &self.tuning,
            );
            self.waves.note_boss_kill(self.frame);
        }
    }

    /// Snapshot for the caller. Reported health never goes below zero even
    /// though the stored value may.
    fn report(&self) -> FrameResult {
        FrameResult {
            score: self.score as u32,
            player_health: self.player.health.max(0),
            round_over: self.over,
        }
    }
}
