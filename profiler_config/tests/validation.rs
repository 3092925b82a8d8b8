use profiler_config::{CurveKind, PhaseKind, load_toml};

const TWO_PHASE: &str = r#"
[global_stop]
weight = 40.0
time_ms = 60000

[[phases]]
type = "pressure"
restriction = 3.0
target = { start = 0.0, end = 9.0, curve = "linear" }
stop = { time_ms = 5000 }

[[phases]]
type = "flow"
target = { start = 2.0, end = 2.0, curve = "ease_in_out", time_ms = 1000 }
stop = { weight = 36.0, pressure_above = 10.0 }
"#;

#[test]
fn parses_two_phase_profile() {
    let cfg = load_toml(TWO_PHASE).expect("parse TOML");
    cfg.validate().expect("valid config should pass");

    assert_eq!(cfg.phases.len(), 2);
    let p0 = &cfg.phases[0];
    assert_eq!(p0.kind, PhaseKind::Pressure);
    assert_eq!(p0.target.curve, CurveKind::Linear);
    assert_eq!(p0.target.time_ms, 0);
    assert_eq!(p0.stop.time_ms, 5000);
    assert_eq!(p0.stop.weight, 0.0);

    let p1 = &cfg.phases[1];
    assert_eq!(p1.kind, PhaseKind::Flow);
    assert_eq!(p1.target.curve, CurveKind::EaseInOut);
    // omitted stop time stays inactive
    assert_eq!(p1.stop.time_ms, -1);
    assert_eq!(p1.stop.weight, 36.0);
    assert_eq!(p1.restriction, 0.0);

    assert_eq!(cfg.global_stop.weight, 40.0);
    assert_eq!(cfg.global_stop.time_ms, 60_000);
    assert_eq!(cfg.global_stop.water_pumped, 0.0);
    assert!(cfg.replay.stop_on_finish);
    assert_eq!(cfg.replay.max_ticks, 0);
}

#[test]
fn global_stop_defaults_to_inactive() {
    let cfg = load_toml(
        r#"
[[phases]]
target = { start = 9.0, end = 9.0 }
"#,
    )
    .expect("parse TOML");
    cfg.validate().expect("valid");
    assert_eq!(cfg.global_stop.time_ms, -1);
    assert_eq!(cfg.phases[0].kind, PhaseKind::Pressure);
    assert_eq!(cfg.phases[0].stop.time_ms, -1);
}

#[test]
fn rejects_empty_phase_list() {
    let cfg = load_toml("[global_stop]\nweight = 36.0\n").expect("parse TOML");
    let err = cfg.validate().expect_err("should reject empty phases");
    assert!(format!("{err}").contains("at least one phase"));
}

#[test]
fn rejects_non_finite_threshold() {
    let cfg = load_toml(
        r#"
[[phases]]
target = { start = 0.0, end = 9.0 }
stop = { weight = nan }
"#,
    )
    .expect("parse TOML");
    let err = cfg.validate().expect_err("nan weight");
    assert!(format!("{err}").contains("phases[0].stop.weight"));
}

#[test]
fn rejects_unknown_rotation() {
    let cfg = load_toml(
        r#"
[logging]
rotation = "weekly"

[[phases]]
target = { start = 0.0, end = 9.0 }
"#,
    )
    .expect("parse TOML");
    let err = cfg.validate().expect_err("weekly rotation");
    assert!(format!("{err}").contains("logging.rotation"));
}

#[test]
fn rejects_unknown_curve_at_parse_time() {
    let res = load_toml(
        r#"
[[phases]]
target = { start = 0.0, end = 9.0, curve = "wobbly" }
"#,
    );
    assert!(res.is_err());
}
