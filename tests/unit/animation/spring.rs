use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn heavily_damped_spring_converges_over_segment() {
    let cfg = SpringConfig {
        mass: 1.0,
        stiffness: 100.0,
        damping: 200.0,
        velocity: 0.0,
    };
    assert_eq!(cfg.progress(0.0, 30.0, fps30()), 0.0);
    let end = cfg.progress(30.0, 30.0, fps30());
    assert!((end - 1.0).abs() < SETTLE_EPSILON, "end = {end}");

    // Overdamped motion never overshoots and never goes backwards.
    let mut prev = 0.0;
    for f in 0..=30 {
        let p = cfg.progress(f as f64, 30.0, fps30());
        assert!(p >= prev - 1e-12 && p <= 1.0 + 1e-9, "frame {f}: {p}");
        prev = p;
    }
}

#[test]
fn underdamped_spring_overshoots() {
    let cfg = SpringPreset::Bouncy.config();
    let max = (0..=60)
        .map(|f| cfg.progress(f as f64, 60.0, fps30()))
        .fold(f64::MIN, f64::max);
    assert!(max > 1.05, "max = {max}");
    let end = cfg.progress(60.0, 60.0, fps30());
    assert!((end - 1.0).abs() < SETTLE_EPSILON);
}

#[test]
fn critically_damped_settles() {
    // zeta = 20 / (2 * sqrt(100)) = 1
    let cfg = SpringConfig {
        mass: 1.0,
        stiffness: 100.0,
        damping: 20.0,
        velocity: 0.0,
    };
    let t = cfg.settle_secs();
    assert!(t > 0.0 && t < MAX_SETTLE_SECS);
    assert!((cfg.step(t) - 1.0).abs() <= SETTLE_EPSILON + 1e-9);
    assert!((cfg.progress(24.0, 24.0, fps30()) - 1.0).abs() < SETTLE_EPSILON);
}

#[test]
fn initial_velocity_moves_early_progress() {
    let rest = SpringPreset::Smooth.config();
    let kicked = SpringConfig {
        velocity: 5.0,
        ..rest
    };
    assert!(kicked.step(0.05) > rest.step(0.05));
}

#[test]
fn degenerate_inputs_degrade() {
    let cfg = SpringConfig::default();
    assert_eq!(cfg.progress(f64::NAN, 10.0, fps30()), 0.0);
    assert_eq!(cfg.progress(-4.0, 10.0, fps30()), 0.0);
    assert_eq!(cfg.progress(5.0, 0.0, fps30()), 1.0);

    let broken = SpringConfig {
        stiffness: 0.0,
        ..SpringConfig::default()
    };
    assert!(!broken.is_valid());
    assert_eq!(broken.progress(5.0, 10.0, fps30()), 0.5);
}

#[test]
fn presets_resolve_by_name_with_default_fallback() {
    assert_eq!(SpringConfig::preset("snappy"), SpringPreset::Snappy.config());
    assert_eq!(SpringConfig::preset("HEAVY"), SpringPreset::Heavy.config());
    assert_eq!(SpringConfig::preset("nope"), SpringConfig::default());
}

#[test]
fn config_fields_default_when_omitted() {
    let cfg: SpringConfig = serde_json::from_str("{\"damping\": 200}").unwrap();
    assert_eq!(cfg.mass, 1.0);
    assert_eq!(cfg.stiffness, 100.0);
    assert_eq!(cfg.damping, 200.0);
    assert_eq!(cfg.velocity, 0.0);
}
