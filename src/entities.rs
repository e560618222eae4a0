//! Entity data for the simulation.
//!
//! Types here are plain fields plus small intrinsic helpers (geometry
//! accessors and invariant-keeping setters). Everything that makes entities
//! act lives in `combat` and `compute`; everything that draws them lives in
//! the binary.

use glam::Vec2;

// ── Arena and per-frame I/O ───────────────────────────────────────────────

/// Fixed rectangular play area in pixels. Origin is the top-left corner and
/// y grows downward, so "descending" means increasing y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Arena { width, height }
    }
}

/// Directional key state for one frame. When opposite keys are both held
/// the later assignment wins; two perpendicular keys add up, so diagonal
/// travel is faster than straight travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// What one simulation step reports back to the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameResult {
    pub score: u32,
    /// Never negative; may exceed the maximum for one frame after a health
    /// pack lands.
    pub player_health: i32,
    pub round_over: bool,
}

// ── Sprite footprints ─────────────────────────────────────────────────────

pub const PLAYER_SIZE: Vec2 = Vec2::new(64.0, 68.0);
pub const ENEMY_SIZE: Vec2 = Vec2::new(32.0, 34.0);
pub const BOSS_SIZE: Vec2 = Vec2::new(96.0, 102.0);
pub const PLAYER_SHOT_SIZE: Vec2 = Vec2::new(5.0, 20.0);
pub const HOSTILE_SHOT_SIZE: Vec2 = Vec2::new(5.0, 21.0);
pub const PICKUP_SIZE: Vec2 = Vec2::new(25.0, 25.0);

/// Collision disc radius for a sprite: half its larger dimension. Coarse on
/// purpose, every collision in the game uses the same rule.
pub fn hit_radius(size: Vec2) -> f32 {
    size.max_element() / 2.0
}

// ── Player craft ──────────────────────────────────────────────────────────

/// Highest reachable power tier. Tier `n` fires `n + 1` shots per volley.
pub const POWER_MAX: u8 = 2;

#[derive(Clone, Debug)]
pub struct PlayerCraft {
    /// Top-left corner.
    pub pos: Vec2,
    /// Velocity chosen from this frame's input, pixels per frame.
    pub vx: f32,
    pub vy: f32,
    pub health: i32,
    /// Current power tier, `0..=POWER_MAX`.
    pub power: u8,
    /// Frames until the next automatic volley.
    pub fire_cooldown: u32,
}

impl PlayerCraft {
    pub fn center(&self) -> Vec2 {
        self.pos + PLAYER_SIZE / 2.0
    }

    /// Muzzle anchor; volleys line up on this point.
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + PLAYER_SIZE.x / 2.0, self.pos.y)
    }

    pub fn radius(&self) -> f32 {
        hit_radius(PLAYER_SIZE)
    }

    /// Raise the power tier by one, capped at [`POWER_MAX`].
    pub fn gain_power(&mut self) {
        self.power = (self.power + 1).min(POWER_MAX);
    }

    /// Any damaging hit drops the tier straight back to zero.
    pub fn lose_power(&mut self) {
        self.power = 0;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────

/// Enemy appearance palette. The variant fixes speed, fire cycle, burst size
/// and shot pattern; `Skimmer` and `Striker` share a flight profile and only
/// differ in looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyVariant {
    /// Slow drifter that fires rings of six shots.
    Corona,
    /// Ordinary descender with straight-down single shots.
    Dart,
    /// Ordinary descender that eases off while settling onto the field.
    Skimmer,
    /// Same flight profile as `Skimmer`.
    Striker,
    /// Slow drifter whose rings spawn along a rotating spiral.
    Helix,
}

impl EnemyVariant {
    /// Palette entry for a controller appearance slot.
    pub fn from_slot(slot: u32) -> Self {
        match slot % 5 {
            0 => EnemyVariant::Corona,
            1 => EnemyVariant::Dart,
            2 => EnemyVariant::Skimmer,
            3 => EnemyVariant::Striker,
            _ => EnemyVariant::Helix,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    /// Top-left corner.
    pub pos: Vec2,
    pub variant: EnemyVariant,
    pub health: i32,
    /// Horizontal wander sign, `1.0` or `-1.0`.
    pub dir: f32,
    /// Frames since spawn. Drives wander turns, the settling window and the
    /// burst trigger.
    pub frame: u32,
    /// Frames until the next shot of an active burst may leave.
    pub shot_cooldown: u32,
    /// Shots left in the active burst; zero means idle.
    pub pending_shots: u32,
}

impl Enemy {
    pub fn center(&self) -> Vec2 {
        self.pos + ENEMY_SIZE / 2.0
    }

    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + ENEMY_SIZE.x / 2.0, self.pos.y + ENEMY_SIZE.y)
    }

    pub fn radius(&self) -> f32 {
        hit_radius(ENEMY_SIZE)
    }
}

// ── Bosses ────────────────────────────────────────────────────────────────

/// Boss appearance palette; the first boss of a round takes slot 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossVariant {
    /// Paired shot streams walking across a fan.
    Vortex,
    /// Single stream swept over a wide fan, alternating direction per burst.
    Scythe,
    /// Paired streams, like `Vortex`.
    Gemini,
    /// One salvo per trigger: three straight down, one on each shoulder.
    Trident,
    /// Wide alternating sweep, like `Scythe`.
    Reaper,
}

impl BossVariant {
    pub fn from_slot(slot: u32) -> Self {
        match slot % 5 {
            0 => BossVariant::Vortex,
            1 => BossVariant::Scythe,
            2 => BossVariant::Gemini,
            3 => BossVariant::Trident,
            _ => BossVariant::Reaper,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Boss {
    /// Top-left corner.
    pub pos: Vec2,
    pub variant: BossVariant,
    pub health: i32,
    /// Patrol sign, `1.0` or `-1.0`.
    pub dir: f32,
    /// Emissions left in the active burst; zero means the next external
    /// trigger is accepted.
    pub pending_shots: u32,
    /// Burst length chosen at the last trigger. Sweep patterns read the
    /// `pending / burst_len` fraction to place each shot on the fan.
    pub burst_len: u32,
    /// Sweep direction sign, flipped on every accepted trigger.
    pub aim_sign: f32,
    pub shot_cooldown: u32,
}

impl Boss {
    pub fn center(&self) -> Vec2 {
        self.pos + BOSS_SIZE / 2.0
    }

    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + BOSS_SIZE.x / 2.0, self.pos.y + BOSS_SIZE.y)
    }

    pub fn radius(&self) -> f32 {
        hit_radius(BOSS_SIZE)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────

/// One pooled shot. Whether it is friendly or hostile is implicit in which
/// pool holds it; player shots always travel straight up.
#[derive(Clone, Debug, Default)]
pub struct Projectile {
    /// Top-left corner.
    pub pos: Vec2,
    /// Unit travel direction.
    pub dir: Vec2,
    /// Pixels per frame along `dir`.
    pub speed: f32,
}

// ── Pickups ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    /// Widens the player volley by one shot.
    PowerUp,
    /// Restores a fixed chunk of health on contact.
    HealthPack,
}

/// A falling collectible. At most one of each kind exists at a time.
#[derive(Clone, Debug)]
pub struct Pickup {
    /// Top-left corner.
    pub pos: Vec2,
    pub kind: PickupKind,
}

// ── Explosions ────────────────────────────────────────────────────────────

/// Render tag: a fireball for most of the burn, ash for the last frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionPhase {
    Fireball,
    Ash,
}

/// Footprint class of an explosion, matching what died.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExplosionScale {
    #[default]
    Enemy,
    Boss,
}

#[derive(Clone, Debug, Default)]
pub struct Explosion {
    /// Top-left corner.
    pub pos: Vec2,
    /// Frames left to burn; the slot recycles when this reaches zero.
    pub remaining: u32,
    pub scale: ExplosionScale,
}

impl Explosion {
    pub fn phase(&self) -> ExplosionPhase {
        if self.remaining <= 1 {
            ExplosionPhase::Ash
        } else {
            ExplosionPhase::Fireball
        }
    }

    pub fn size(&self) -> Vec2 {
        match self.scale {
            ExplosionScale::Enemy => ENEMY_SIZE,
            ExplosionScale::Boss => BOSS_SIZE,
        }
    }
}
