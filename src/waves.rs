//! Spawn cadences, appearance cycling and difficulty escalation.
//!
//! The controller owns the numbers that outlive any single entity: which
//! palette slot spawns next, what health fresh enemies and bosses get, and
//! when the next boss is due. Round reset just rebuilds the struct.

use glam::Vec2;
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{Arena, Boss, BossVariant, Enemy, EnemyVariant, BOSS_SIZE, ENEMY_SIZE};

#[derive(Clone, Debug)]
pub struct WaveController {
    /// Appearance slot shared by enemy and boss spawns; advances on every
    /// boss kill. Starts at 1, so slot 0 only appears after a full lap.
    slot: u32,
    /// Health given to newly spawned enemies.
    enemy_baseline: i32,
    /// Health given to the next boss.
    boss_baseline: i32,
    /// Armed by a boss kill; the next enemy spawn consumes it and raises the
    /// class baseline.
    level_up: bool,
    /// The first boss spawns at the starting baseline; every later one bumps
    /// it first.
    boss_seen: bool,
    /// Frame of the last boss kill. Zero until the first kill, which makes
    /// the round opener use the same delay.
    last_boss_kill: u64,
}

impl WaveController {
    pub fn new(t: &Tuning) -> Self {
        WaveController {
            slot: 1,
            enemy_baseline: t.enemy_health,
            boss_baseline: t.boss_health,
            level_up: false,
            boss_seen: false,
            last_boss_kill: 0,
        }
    }

    /// True on the frames an enemy is due. Bosses suppress enemy spawns
    /// while they hold the field.
    pub fn enemy_due(&self, frame: u64, boss_present: bool, t: &Tuning) -> bool {
        !boss_present && frame % u64::from(t.enemy_spawn_cycle) == 0
    }

    /// True on the one frame the next boss is due.
    pub fn boss_due(&self, frame: u64, t: &Tuning) -> bool {
        frame == self.last_boss_kill + u64::from(t.boss_spawn_delay)
    }

    /// Build a fresh enemy somewhere along the top edge, consuming a pending
    /// level-up into the class baseline first.
    pub fn spawn_enemy(&mut self, arena: &Arena, t: &Tuning, rng: &mut impl Rng) -> Enemy {
        if self.level_up {
            self.enemy_baseline += t.enemy_health_step;
            self.level_up = false;
            log::debug!("enemy baseline raised to {}", self.enemy_baseline);
        }
        let variant = EnemyVariant::from_slot(self.slot);
        log::debug!("enemy spawn: {variant:?} with {} health", self.enemy_baseline);
        Enemy {
            pos: Vec2::new(rng.gen_range(0.0..arena.width - ENEMY_SIZE.x), 0.0),
            variant,
            health: self.enemy_baseline,
            dir: 1.0,
            frame: 0,
            shot_cooldown: 0,
            pending_shots: 0,
        }
    }

    /// Build the next boss along the top edge, raising the class baseline on
    /// every spawn after the first.
    pub fn spawn_boss(&mut self, arena: &Arena, t: &Tuning, rng: &mut impl Rng) -> Boss {
        if self.boss_seen {
            self.boss_baseline += t.boss_health_step;
        }
        self.boss_seen = true;
        let variant = BossVariant::from_slot(self.slot);
        log::debug!("boss spawn: {variant:?} with {} health", self.boss_baseline);
        Boss {
            pos: Vec2::new(rng.gen_range(0.0..arena.width - BOSS_SIZE.x), 0.0),
            variant,
            health: self.boss_baseline,
            dir: 1.0,
            pending_shots: 0,
            burst_len: 0,
            aim_sign: 1.0,
            shot_cooldown: 0,
        }
    }

    /// Record a boss kill: advance the palette, arm the enemy level-up and
    /// restart the respawn clock.
    pub fn note_boss_kill(&mut self, frame: u64) {
        self.slot += 1;
        self.level_up = true;
        self.last_boss_kill = frame;
        log::debug!("boss down at frame {frame}, palette slot now {}", self.slot);
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn enemy_baseline(&self) -> i32 {
        self.enemy_baseline
    }

    pub fn boss_baseline(&self) -> i32 {
        self.boss_baseline
    }
}
