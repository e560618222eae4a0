use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use skyfire::combat::{spawn_hostile_volley, spawn_player_volley};
use skyfire::compute::Round;
use skyfire::config::{Tuning, TuningError};
use skyfire::entities::*;

// Every cadence pushed out of reach and every trickle silenced, so a test
// sees exactly what it staged and nothing else.
fn quiet_tuning() -> Tuning {
    Tuning {
        player_fire_period: 100_000,
        enemy_fire_cycle: 100_000,
        boss_fire_period: 100_000,
        enemy_spawn_cycle: 100_000,
        boss_spawn_delay: 1_000_000,
        pickup_chance: 0.0,
        time_bonus: 0.0,
        ..Tuning::default()
    }
}

fn make_round(t: Tuning) -> Round {
    Round::new(t, Arena::new(480.0, 640.0)).unwrap()
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> InputState {
    InputState::default()
}

fn make_enemy(x: f32, y: f32, health: i32) -> Enemy {
    Enemy {
        pos: Vec2::new(x, y),
        variant: EnemyVariant::Dart,
        health,
        dir: 1.0,
        frame: 1, // off the spawn-frame trigger and the wander roll
        shot_cooldown: 0,
        pending_shots: 0,
    }
}

fn make_boss(x: f32, y: f32, health: i32) -> Boss {
    Boss {
        pos: Vec2::new(x, y),
        variant: BossVariant::Scythe,
        health,
        dir: 1.0,
        pending_shots: 0,
        burst_len: 0,
        aim_sign: 1.0,
        shot_cooldown: 0,
    }
}

// ── construction / reset ──────────────────────────────────────────────────────

#[test]
fn new_round_start_state() {
    let round = make_round(quiet_tuning());
    // Horizontally centered, underside at 95% of the arena height
    let expected = Vec2::new(
        480.0 / 2.0 - PLAYER_SIZE.x / 2.0,
        640.0 * 0.95 - PLAYER_SIZE.y,
    );
    assert_eq!(round.player.pos, expected);
    assert_eq!(round.player.health, 160);
    assert_eq!(round.player.power, 0);
    assert!(round.enemies.is_empty());
    assert!(round.bosses.is_empty());
    assert!(round.pickups.is_empty());
    assert_eq!(round.player_shots.active_len(), 0);
    assert_eq!(round.player_shots.reserve_len(), 10); // pre-seeded storage
    assert_eq!(round.score, 0.0);
    assert_eq!(round.frame, 0);
    assert!(!round.over);
}

#[test]
fn new_rejects_a_bad_table() {
    let mut t = Tuning::default();
    t.enemy_spawn_cycle = 0;
    let err = Round::new(t, Arena::new(480.0, 640.0)).unwrap_err();
    assert_eq!(err, TuningError::ZeroCycle("enemy_spawn_cycle"));
}

#[test]
fn new_rejects_an_arena_smaller_than_the_boss() {
    let err = Round::new(Tuning::default(), Arena::new(96.0, 640.0)).unwrap_err();
    assert_eq!(err, TuningError::ArenaTooSmall("width"));
    let err = Round::new(Tuning::default(), Arena::new(480.0, 102.0)).unwrap_err();
    assert_eq!(err, TuningError::ArenaTooSmall("height"));
}

#[test]
fn reset_restores_the_start_state() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.enemies.push(make_enemy(100.0, 100.0, 30));
    round.bosses.push(make_boss(100.0, 10.0, 200));
    round.pickups.push(Pickup {
        pos: Vec2::new(50.0, 50.0),
        kind: PickupKind::PowerUp,
    });
    round.player.health = 1;
    for _ in 0..5 {
        round.advance_frame(idle(), &mut rng);
    }

    round.reset();
    assert_eq!(round.frame, 0);
    assert_eq!(round.score, 0.0);
    assert!(!round.over);
    assert_eq!(round.player.health, 160);
    assert_eq!(round.player.power, 0);
    assert!(round.enemies.is_empty());
    assert!(round.bosses.is_empty());
    assert!(round.pickups.is_empty());
    assert_eq!(round.player_shots.active_len(), 0);
    assert_eq!(round.hostile_shots.active_len(), 0);
    assert_eq!(round.explosions.active_len(), 0);
    assert_eq!(round.waves.slot(), 1);
}

// ── frame bookkeeping ─────────────────────────────────────────────────────────

#[test]
fn score_trickles_with_time() {
    let mut t = quiet_tuning();
    t.time_bonus = 0.25;
    let mut round = make_round(t);
    let mut rng = seeded_rng();
    let mut last = FrameResult {
        score: 0,
        player_health: 0,
        round_over: false,
    };
    for _ in 0..8 {
        last = round.advance_frame(idle(), &mut rng);
    }
    assert_eq!(round.frame, 8);
    assert_eq!(round.score, 2.0);
    assert_eq!(last.score, 2); // reports truncate the accumulator
    assert_eq!(last.player_health, 160);
    assert!(!last.round_over);
}

// ── player movement ───────────────────────────────────────────────────────────

#[test]
fn movement_follows_held_keys() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    let start = round.player.pos;

    let right = InputState {
        right: true,
        ..idle()
    };
    round.advance_frame(right, &mut rng);
    assert_eq!(round.player.pos, start + Vec2::new(4.0, 0.0));

    // Perpendicular keys add up
    let up_left = InputState {
        up: true,
        left: true,
        ..idle()
    };
    round.advance_frame(up_left, &mut rng);
    assert_eq!(round.player.pos, start + Vec2::new(0.0, -4.0));
}

#[test]
fn opposite_keys_later_binding_wins() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    let start = round.player.pos;
    let both = InputState {
        left: true,
        right: true,
        ..idle()
    };
    round.advance_frame(both, &mut rng);
    assert_eq!(round.player.pos.x, start.x + 4.0); // right overrides left
}

#[test]
fn clamp_fixes_one_edge_per_frame() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.player.pos = Vec2::new(1.0, 1.0);
    let into_corner = InputState {
        left: true,
        up: true,
        ..idle()
    };
    round.advance_frame(into_corner, &mut rng);
    // x got fixed this frame, y is still past the edge
    assert_eq!(round.player.pos, Vec2::new(0.0, -3.0));
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.player.pos, Vec2::new(0.0, 0.0));
}

// ── autofire ──────────────────────────────────────────────────────────────────

#[test]
fn autofire_fires_on_its_period() {
    let mut t = quiet_tuning();
    t.player_fire_period = 3;
    let mut round = make_round(t);
    let mut rng = seeded_rng();

    round.advance_frame(idle(), &mut rng);
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.player_shots.active_len(), 0); // cooldown still winding
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.player_shots.active_len(), 1); // fired on the third frame

    for _ in 0..3 {
        round.advance_frame(idle(), &mut rng);
    }
    assert_eq!(round.player_shots.active_len(), 2); // and again three later
}

#[test]
fn power_tier_widens_the_volley() {
    let mut t = quiet_tuning();
    t.player_fire_period = 3;
    let mut round = make_round(t);
    let mut rng = seeded_rng();
    round.player.power = 2;
    for _ in 0..3 {
        round.advance_frame(idle(), &mut rng);
    }
    assert_eq!(round.player_shots.active_len(), 3); // tier 2 → 3-shot volley
}

// ── projectile motion ─────────────────────────────────────────────────────────

#[test]
fn player_shots_recycle_past_the_top() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    // Bottom-center on y=25 → top at y=5; one 10px step leaves the arena
    spawn_player_volley(
        &mut round.player_shots,
        Vec2::new(240.0, 25.0),
        1,
        &round.tuning,
    );
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.player_shots.active_len(), 0);
    assert_eq!(round.player_shots.reserve_len(), 10); // the slot went back
}

#[test]
fn hostile_shots_recycle_outside_the_arena() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    // Heading down from just above the bottom edge
    spawn_hostile_volley(
        &mut round.hostile_shots,
        Vec2::new(300.0, 660.0),
        1,
        Vec2::new(0.0, 1.0),
        &round.tuning,
    );
    // Heading left from just inside the left edge
    spawn_hostile_volley(
        &mut round.hostile_shots,
        Vec2::new(2.0, 300.0),
        1,
        Vec2::new(-1.0, 0.0),
        &round.tuning,
    );
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.hostile_shots.active_len(), 1); // left-goer still clipping in
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.hostile_shots.active_len(), 0);
}

#[test]
fn bottom_edge_cuts_hostile_shots_at_first_contact() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    // Craft hugging the floor, directly under the shot
    round.player.pos = Vec2::new(208.0, 640.0 - PLAYER_SIZE.y);
    // Shot bottom already past the floor, body still overlapping the craft
    spawn_hostile_volley(
        &mut round.hostile_shots,
        Vec2::new(240.0, 644.0),
        1,
        Vec2::new(0.0, 1.0),
        &round.tuning,
    );
    let health = round.player.health;
    round.advance_frame(idle(), &mut rng);
    // Recycled during the motion stage, so the resolver never sees it
    assert_eq!(round.hostile_shots.active_len(), 0);
    assert_eq!(round.player.health, health);
}

#[test]
fn projectiles_advance_along_their_direction() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    let dir = Vec2::new(0.6, 0.8);
    spawn_hostile_volley(
        &mut round.hostile_shots,
        Vec2::new(300.0, 300.0),
        1,
        dir,
        &round.tuning,
    );
    let start = round.hostile_shots.iter().next().unwrap().pos;
    round.advance_frame(idle(), &mut rng);
    let after = round.hostile_shots.iter().next().unwrap().pos;
    assert_eq!(after, start + dir * round.tuning.hostile_shot_speed);
}

#[test]
fn explosions_burn_down_drift_and_recycle() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    let h = round.explosions.acquire();
    let burst = round.explosions.get_mut(h);
    burst.pos = Vec2::new(50.0, 50.0);
    burst.remaining = 2;
    burst.scale = ExplosionScale::Enemy;

    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.explosions.active_len(), 1);
    let burst = round.explosions.iter().next().unwrap();
    assert_eq!(burst.pos.y, 54.0); // drifts down 4 per frame
    assert_eq!(burst.phase(), ExplosionPhase::Ash);

    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.explosions.active_len(), 0);
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn enemies_spawn_on_their_cycle_and_shoot_at_once() {
    let mut t = quiet_tuning();
    t.enemy_spawn_cycle = 5;
    let mut round = make_round(t);
    let mut rng = seeded_rng();
    for _ in 0..4 {
        round.advance_frame(idle(), &mut rng);
    }
    assert!(round.enemies.is_empty());
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.enemies.len(), 1);

    let e = &round.enemies[0];
    assert_eq!(e.variant, EnemyVariant::Dart); // palette slot 1
    assert_eq!(e.health, 30);
    assert_eq!(e.pos.y, 3.0); // spawned on the top edge, already descending
    assert_eq!(e.frame, 1);
    // The spawn frame is also a burst trigger
    assert_eq!(e.pending_shots, 2);
    assert_eq!(round.hostile_shots.active_len(), 1);

    for _ in 0..5 {
        round.advance_frame(idle(), &mut rng);
    }
    assert_eq!(round.enemies.len(), 2); // one per cadence tick, never more
}

#[test]
fn bosses_suppress_enemy_spawns() {
    let mut t = quiet_tuning();
    t.enemy_spawn_cycle = 5;
    let mut round = make_round(t);
    let mut rng = seeded_rng();
    round.bosses.push(make_boss(100.0, 10.0, 200));
    for _ in 0..5 {
        round.advance_frame(idle(), &mut rng);
    }
    assert!(round.enemies.is_empty()); // frame 5 passed without a spawn

    round.bosses.clear();
    for _ in 0..5 {
        round.advance_frame(idle(), &mut rng);
    }
    assert_eq!(round.enemies.len(), 1); // frame 10 spawned again
}

#[test]
fn boss_arrives_on_the_spawn_delay() {
    let mut t = quiet_tuning();
    t.boss_spawn_delay = 6;
    let mut round = make_round(t);
    let mut rng = seeded_rng();
    for _ in 0..5 {
        round.advance_frame(idle(), &mut rng);
    }
    assert!(round.bosses.is_empty());
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.bosses.len(), 1);

    let b = &round.bosses[0];
    assert_eq!(b.variant, BossVariant::Scythe); // palette slot 1
    assert_eq!(b.health, 200);
    assert_eq!(b.pos.y, 0.0); // patrols the top, never descends
}

// ── pickups ───────────────────────────────────────────────────────────────────

#[test]
fn pickup_rolls_fill_each_absent_kind() {
    let mut t = quiet_tuning();
    t.pickup_chance = 1.0;
    let mut round = make_round(t);
    let mut rng = seeded_rng();
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.pickups.len(), 2); // one of each kind
    assert_ne!(round.pickups[0].kind, round.pickups[1].kind);
    assert_eq!(round.pickups[0].pos.y, 2.0); // rolled, then fell this frame

    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.pickups.len(), 2); // present kinds don't re-roll
}

#[test]
fn health_pack_heals_on_grab() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.player.health = 100;
    round.pickups.push(Pickup {
        pos: Vec2::new(220.0, 530.0),
        kind: PickupKind::HealthPack,
    });
    let report = round.advance_frame(idle(), &mut rng);
    assert!(round.pickups.is_empty());
    assert_eq!(round.player.health, 140);
    assert_eq!(report.player_health, 140);
}

#[test]
fn health_pack_overshoot_clamps_next_frame() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.player.health = 150;
    round.pickups.push(Pickup {
        pos: Vec2::new(220.0, 530.0),
        kind: PickupKind::HealthPack,
    });
    let report = round.advance_frame(idle(), &mut rng);
    assert_eq!(report.player_health, 190); // visible for one frame
    let report = round.advance_frame(idle(), &mut rng);
    assert_eq!(report.player_health, 160); // ceiling restored
}

#[test]
fn power_pickup_raises_the_tier() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.pickups.push(Pickup {
        pos: Vec2::new(220.0, 530.0),
        kind: PickupKind::PowerUp,
    });
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.player.power, 1);
}

#[test]
fn pickups_fall_past_the_bottom_quietly() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.pickups.push(Pickup {
        pos: Vec2::new(10.0, 639.0),
        kind: PickupKind::HealthPack,
    });
    let health = round.player.health;
    round.advance_frame(idle(), &mut rng);
    assert!(round.pickups.is_empty());
    assert_eq!(round.player.health, health); // no grab happened
}

// ── collisions ────────────────────────────────────────────────────────────────

#[test]
fn enemy_contact_hurts_and_removes_the_enemy() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.player.power = 1;
    // Dead center on the craft
    let center = round.player.center();
    round
        .enemies
        .push(make_enemy(center.x - 16.0, center.y - 17.0, 30));
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.player.health, 140); // 160 - 20
    assert_eq!(round.player.power, 0); // any hit drops the tier
    assert!(round.enemies.is_empty());
    assert_eq!(round.explosions.active_len(), 0); // rammed enemies die silently
    assert_eq!(round.score, 0.0); // and pay nothing
}

#[test]
fn hostile_shot_damage_is_per_shot() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.player.power = 2;
    // One step above the craft's center, heading down into it
    spawn_hostile_volley(
        &mut round.hostile_shots,
        Vec2::new(242.5, 570.0),
        1,
        Vec2::new(0.0, 1.0),
        &round.tuning,
    );
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.player.health, 150); // 160 - 10
    assert_eq!(round.player.power, 0);
    assert_eq!(round.hostile_shots.active_len(), 0); // the shot is spent
}

#[test]
fn player_shot_kills_and_scores() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.enemies.push(make_enemy(100.0, 100.0, 10));
    // One 10px step under the enemy's post-move center (117, 120)
    spawn_player_volley(
        &mut round.player_shots,
        Vec2::new(119.5, 160.0),
        1,
        &round.tuning,
    );
    round.advance_frame(idle(), &mut rng);
    assert!(round.enemies.is_empty());
    assert_eq!(round.score, 40.0);
    assert_eq!(round.player_shots.active_len(), 0);
    assert_eq!(round.explosions.active_len(), 1);
    let burst = round.explosions.iter().next().unwrap();
    assert_eq!(burst.size(), ENEMY_SIZE);
    assert_eq!(burst.pos, Vec2::new(101.0, 103.0)); // centered on the wreck
}

#[test]
fn spent_shots_cannot_hit_twice() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    // Two enemies stacked on the same spot, one shot
    round.enemies.push(make_enemy(100.0, 100.0, 10));
    round.enemies.push(make_enemy(100.0, 100.0, 10));
    spawn_player_volley(
        &mut round.player_shots,
        Vec2::new(119.5, 160.0),
        1,
        &round.tuning,
    );
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.enemies.len(), 1); // only the first died
    assert_eq!(round.enemies[0].health, 10);
    assert_eq!(round.score, 40.0);
}

#[test]
fn two_shots_stack_damage() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.enemies.push(make_enemy(100.0, 100.0, 30));
    spawn_player_volley(
        &mut round.player_shots,
        Vec2::new(119.5, 160.0),
        1,
        &round.tuning,
    );
    spawn_player_volley(
        &mut round.player_shots,
        Vec2::new(119.5, 165.0),
        1,
        &round.tuning,
    );
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.enemies.len(), 1);
    assert_eq!(round.enemies[0].health, 10); // 30 - 2 * 10
    assert_eq!(round.player_shots.active_len(), 0);
}

#[test]
fn boss_contact_hurts_but_the_boss_stays() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    let center = round.player.center();
    round
        .bosses
        .push(make_boss(center.x - 48.0, center.y - 51.0, 200));
    round.advance_frame(idle(), &mut rng);
    assert_eq!(round.player.health, 140);
    assert_eq!(round.bosses.len(), 1); // the boss shrugs it off
}

#[test]
fn boss_kill_scores_and_advances_the_palette() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.bosses.push(make_boss(100.0, 10.0, 10));
    // One step under the boss's post-move center (149.5, 61)
    spawn_player_volley(
        &mut round.player_shots,
        Vec2::new(152.0, 100.0),
        1,
        &round.tuning,
    );
    round.advance_frame(idle(), &mut rng);
    assert!(round.bosses.is_empty());
    assert_eq!(round.score, 200.0);
    assert_eq!(round.waves.slot(), 2);
    let burst = round.explosions.iter().next().unwrap();
    assert_eq!(burst.size(), BOSS_SIZE);
}

#[test]
fn boss_kill_arms_the_enemy_level_up() {
    let mut t = quiet_tuning();
    t.enemy_spawn_cycle = 4;
    let mut round = make_round(t);
    let mut rng = seeded_rng();
    round.bosses.push(make_boss(100.0, 10.0, 10));
    spawn_player_volley(
        &mut round.player_shots,
        Vec2::new(152.0, 100.0),
        1,
        &round.tuning,
    );
    round.advance_frame(idle(), &mut rng); // boss dies on frame 1
    assert_eq!(round.waves.enemy_baseline(), 30); // not consumed yet

    for _ in 0..3 {
        round.advance_frame(idle(), &mut rng);
    }
    // Frame 4 spawn consumes the level-up and wears the next palette slot
    assert_eq!(round.enemies.len(), 1);
    assert_eq!(round.enemies[0].health, 40);
    assert_eq!(round.enemies[0].variant, EnemyVariant::Skimmer);
    assert_eq!(round.waves.enemy_baseline(), 40);
}

#[test]
fn boss_baseline_escalates_on_the_next_spawn() {
    let mut t = quiet_tuning();
    t.boss_spawn_delay = 3;
    let mut round = make_round(t);
    let mut rng = seeded_rng();
    for _ in 0..3 {
        round.advance_frame(idle(), &mut rng);
    }
    assert_eq!(round.bosses.len(), 1);
    assert_eq!(round.bosses[0].health, 200); // first spawn keeps the base value

    // Park it on known ground and shoot it dead
    round.bosses[0].pos = Vec2::new(100.0, 10.0);
    round.bosses[0].health = 10;
    spawn_player_volley(
        &mut round.player_shots,
        Vec2::new(152.0, 100.0),
        1,
        &round.tuning,
    );
    round.advance_frame(idle(), &mut rng); // frame 4: the kill
    assert!(round.bosses.is_empty());
    assert_eq!(round.waves.boss_baseline(), 200); // the bump waits for the spawn

    for _ in 0..3 {
        round.advance_frame(idle(), &mut rng);
    }
    // Frame 7: one step tougher, wearing the next palette slot
    assert_eq!(round.bosses.len(), 1);
    assert_eq!(round.bosses[0].health, 280);
    assert_eq!(round.bosses[0].variant, BossVariant::Gemini);
    assert_eq!(round.waves.boss_baseline(), 280);
}

// ── round over ────────────────────────────────────────────────────────────────

#[test]
fn round_over_freezes_the_simulation() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.player.health = 10;
    spawn_hostile_volley(
        &mut round.hostile_shots,
        Vec2::new(242.5, 570.0),
        1,
        Vec2::new(0.0, 1.0),
        &round.tuning,
    );
    let report = round.advance_frame(idle(), &mut rng);
    assert!(report.round_over);
    assert_eq!(report.player_health, 0);

    let frame = round.frame;
    let again = round.advance_frame(idle(), &mut rng);
    assert_eq!(again, report); // frozen report
    assert_eq!(round.frame, frame); // nothing advanced
}

#[test]
fn player_death_stops_the_resolver_mid_frame() {
    let mut round = make_round(quiet_tuning());
    let mut rng = seeded_rng();
    round.player.health = 10;
    // A rammer on the craft ends the round in the first collision step...
    let center = round.player.center();
    round
        .enemies
        .push(make_enemy(center.x - 16.0, center.y - 17.0, 30));
    // ...so this victim never gets shot at
    round.enemies.push(make_enemy(100.0, 100.0, 10));
    spawn_player_volley(
        &mut round.player_shots,
        Vec2::new(119.5, 160.0),
        1,
        &round.tuning,
    );
    let report = round.advance_frame(idle(), &mut rng);
    assert!(report.round_over);
    assert_eq!(report.player_health, 0); // never reported negative
    assert_eq!(round.enemies.len(), 1); // the victim survived
    assert_eq!(round.enemies[0].health, 10);
    assert_eq!(round.player_shots.active_len(), 1); // the shot was never spent
    assert_eq!(round.score, 0.0);
}

// ── long runs ─────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn survival_run_reports_stay_in_bounds(seed in any::<u64>(), frames in 1usize..240) {
        let tuning = Tuning::default();
        let ceiling = tuning.max_health + tuning.health_pack_gain;
        let mut round = Round::new(tuning, Arena::new(480.0, 640.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut last_score = 0;
        for frame in 0..frames {
            let input = InputState {
                left: frame % 3 == 0,
                right: frame % 5 == 0,
                up: frame % 7 == 0,
                down: frame % 2 == 0,
            };
            let report = round.advance_frame(input, &mut rng);
            prop_assert!(report.player_health >= 0);
            prop_assert!(report.player_health <= ceiling);
            prop_assert!(report.score >= last_score);
            last_score = report.score;
        }
    }
}
