//! The gameplay tuning table.
//!
//! Every balance number sits in one serde-friendly struct so a round can be
//! rebuilt from a single value and the binary can load overrides from a JSON
//! file. A table is validated once when a round is built; the per-frame code
//! trusts it afterwards and divides by these numbers freely.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected [`Tuning`] values.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TuningError {
    /// A frame-cycle length the simulation takes a modulo by was zero.
    #[error("{0} must be a non-zero number of frames")]
    ZeroCycle(&'static str),
    /// A speed or capacity that must be positive was not.
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    /// A per-frame chance outside `0.0..=1.0`.
    #[error("{0} must be a probability between 0 and 1")]
    NotAProbability(&'static str),
    /// An arena dimension too small to place the largest sprite.
    #[error("arena {0} must exceed the boss sprite")]
    ArenaTooSmall(&'static str),
}

/// Balance constants for one round.
///
/// Distances are pixels, times are frames at the fixed 60 steps per second,
/// speeds are pixels per frame. `#[serde(default)]` lets an override file
/// name only the fields it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player health at round start, and the ceiling the clamp restores.
    pub max_health: i32,
    /// Health restored by a health pack. May overshoot the ceiling for one
    /// frame; the next frame clamps it back.
    pub health_pack_gain: i32,
    /// Damage taken from a projectile impact, either direction.
    pub hit_damage: i32,
    /// Damage the player takes from body contact with an enemy or boss.
    pub collide_damage: i32,
    /// Health of a freshly spawned enemy before any escalation.
    pub enemy_health: i32,
    /// Added to the enemy baseline each time a boss falls.
    pub enemy_health_step: i32,
    /// Health of the first boss.
    pub boss_health: i32,
    /// Added to the boss baseline on every spawn after the first.
    pub boss_health_step: i32,
    pub player_speed: f32,
    pub player_shot_speed: f32,
    pub hostile_shot_speed: f32,
    pub pickup_fall_speed: f32,
    /// Base enemy speed; ring-firing variants drift at half of it.
    pub enemy_speed: f32,
    pub boss_speed: f32,
    /// Horizontal gap between shots of one volley.
    pub volley_spacing: f32,
    /// Frames between automatic player volleys.
    pub player_fire_period: u32,
    /// Frames between enemy burst triggers; ring variants re-arm half as often.
    pub enemy_fire_cycle: u32,
    /// Base frames between shots inside a burst. Variants scale it down.
    pub fire_wait: u32,
    /// Frames between the external fire triggers sent to every boss.
    pub boss_fire_period: u32,
    /// Frames between enemy spawns while no boss holds the field.
    pub enemy_spawn_cycle: u32,
    /// Frames from a boss kill (or round start) to the next boss spawn.
    pub boss_spawn_delay: u32,
    /// Per-frame chance that an absent pickup kind appears.
    pub pickup_chance: f64,
    pub enemy_score: u32,
    pub boss_score: u32,
    /// Score trickle awarded every frame survived.
    pub time_bonus: f64,
    pub enemy_explosion_frames: u32,
    pub boss_explosion_frames: u32,
    /// Downward drift of a burning explosion, pixels per frame.
    pub explosion_drift: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            max_health: 160,
            health_pack_gain: 40,
            hit_damage: 10,
            collide_damage: 20,
            enemy_health: 30,
            enemy_health_step: 10,
            boss_health: 200,
            boss_health_step: 80,
            player_speed: 4.0,
            player_shot_speed: 10.0,
            hostile_shot_speed: 4.0,
            pickup_fall_speed: 2.0,
            enemy_speed: 2.0,
            boss_speed: 1.5,
            volley_spacing: 30.0,
            player_fire_period: 20,
            enemy_fire_cycle: 120,
            fire_wait: 25,
            boss_fire_period: 70,
            enemy_spawn_cycle: 100,
            boss_spawn_delay: 1500,
            pickup_chance: 0.001,
            enemy_score: 40,
            boss_score: 200,
            time_bonus: 1.0 / 30.0,
            enemy_explosion_frames: 7,
            boss_explosion_frames: 10,
            explosion_drift: 4.0,
        }
    }
}

impl Tuning {
    /// Check every constraint the simulation assumes. Called once by
    /// `Round::new`; a table that passes here never fails mid-frame.
    pub fn validate(&self) -> Result<(), TuningError> {
        let cycles = [
            ("player_fire_period", self.player_fire_period),
            ("enemy_fire_cycle", self.enemy_fire_cycle),
            ("fire_wait", self.fire_wait),
            ("boss_fire_period", self.boss_fire_period),
            ("enemy_spawn_cycle", self.enemy_spawn_cycle),
            ("boss_spawn_delay", self.boss_spawn_delay),
            ("enemy_explosion_frames", self.enemy_explosion_frames),
            ("boss_explosion_frames", self.boss_explosion_frames),
        ];
        for (name, frames) in cycles {
            if frames == 0 {
                return Err(TuningError::ZeroCycle(name));
            }
        }
        if self.max_health <= 0 {
            return Err(TuningError::NonPositive("max_health"));
        }
        let speeds = [
            ("player_speed", self.player_speed),
            ("player_shot_speed", self.player_shot_speed),
            ("hostile_shot_speed", self.hostile_shot_speed),
            ("pickup_fall_speed", self.pickup_fall_speed),
            ("enemy_speed", self.enemy_speed),
            ("boss_speed", self.boss_speed),
        ];
        for (name, speed) in speeds {
            if speed <= 0.0 {
                return Err(TuningError::NonPositive(name));
            }
        }
        if !(0.0..=1.0).contains(&self.pickup_chance) {
            return Err(TuningError::NotAProbability("pickup_chance"));
        }
        Ok(())
    }
}
