use skyfire::config::{Tuning, TuningError};

// ── validation ────────────────────────────────────────────────────────────────

#[test]
fn default_table_validates() {
    assert_eq!(Tuning::default().validate(), Ok(()));
}

#[test]
fn zero_cycles_are_rejected() {
    let mut t = Tuning::default();
    t.enemy_spawn_cycle = 0;
    let err = t.validate().unwrap_err();
    assert_eq!(err, TuningError::ZeroCycle("enemy_spawn_cycle"));
    assert_eq!(
        err.to_string(),
        "enemy_spawn_cycle must be a non-zero number of frames"
    );
}

#[test]
fn non_positive_speeds_are_rejected() {
    let mut t = Tuning::default();
    t.boss_speed = 0.0;
    assert_eq!(t.validate(), Err(TuningError::NonPositive("boss_speed")));
    t.boss_speed = -2.0;
    assert_eq!(t.validate(), Err(TuningError::NonPositive("boss_speed")));
}

#[test]
fn non_positive_max_health_is_rejected() {
    let mut t = Tuning::default();
    t.max_health = 0;
    assert_eq!(t.validate(), Err(TuningError::NonPositive("max_health")));
}

#[test]
fn out_of_range_chance_is_rejected() {
    let mut t = Tuning::default();
    t.pickup_chance = 1.5;
    assert_eq!(
        t.validate(),
        Err(TuningError::NotAProbability("pickup_chance"))
    );
    t.pickup_chance = -0.1;
    assert!(t.validate().is_err());
    t.pickup_chance = 0.0; // the edges themselves are fine
    assert_eq!(t.validate(), Ok(()));
    t.pickup_chance = 1.0;
    assert_eq!(t.validate(), Ok(()));
}

// ── override files ────────────────────────────────────────────────────────────

#[test]
fn override_file_names_only_what_it_changes() {
    // Every field not in the JSON falls back to the default table
    let t: Tuning = serde_json::from_str(r#"{ "max_health": 50, "boss_score": 500 }"#)
        .expect("partial override should parse");
    assert_eq!(t.max_health, 50);
    assert_eq!(t.boss_score, 500);
    assert_eq!(t.hit_damage, Tuning::default().hit_damage);
    assert_eq!(t.player_fire_period, Tuning::default().player_fire_period);
}

#[test]
fn empty_override_is_the_default_table() {
    let t: Tuning = serde_json::from_str("{}").expect("empty override should parse");
    assert_eq!(t, Tuning::default());
}
