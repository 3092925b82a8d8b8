use std::sync::Arc;

use profiler_core::conversions::tick_from_row;
use profiler_core::error::BuildError;
use profiler_core::{
    GlobalStopConditions, PhaseProfiler, PhaseType, Phases, RunParams, TransitionCurve,
};
use rstest::rstest;

#[rstest]
fn builder_without_phases_yields_typed_build_error() {
    let err = PhaseProfiler::builder()
        .try_build()
        .expect_err("should fail with EmptyProfile");

    match err.downcast_ref::<BuildError>() {
        Some(BuildError::EmptyProfile) => {}
        other => panic!("expected EmptyProfile, got: {other:?}"),
    }
}

#[rstest]
fn builder_with_empty_vec_is_rejected() {
    let err = PhaseProfiler::builder()
        .with_phases(Vec::new())
        .try_build()
        .expect_err("empty recipe");
    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::EmptyProfile)
    ));
}

#[rstest]
fn phases_new_rejects_empty() {
    assert!(matches!(Phases::new(Vec::new()), Err(BuildError::EmptyProfile)));
}

const PROFILE: &str = r#"
[[phases]]
type = "flow"
restriction = 3.0
target = { start = 4.0, end = 4.0, curve = "instant" }
stop = { time_ms = 8000, pressure_above = 3.0 }

[[phases]]
type = "pressure"
target = { start = 3.0, end = 9.0, curve = "ease_in_out", time_ms = 4000 }
stop = { weight = 36.0 }

[global_stop]
weight = 40.0
time_ms = 60000

[replay]
max_ticks = 0
stop_on_finish = false
"#;

#[rstest]
fn config_maps_onto_core_types() {
    let cfg = profiler_config::load_toml(PROFILE).expect("parse");
    cfg.validate().expect("valid");

    let phases = Phases::try_from(&cfg).expect("phases");
    assert_eq!(phases.count(), 2);
    let first = phases.get(0).unwrap();
    assert_eq!(first.phase_type, PhaseType::Flow);
    assert_eq!(first.restriction, 3.0);
    assert_eq!(first.target.curve, TransitionCurve::Instant);
    assert_eq!(first.stop_conditions.time, 8_000);
    assert_eq!(first.stop_conditions.pressure_above, 3.0);
    assert_eq!(first.stop_conditions.weight, 0.0);

    let second = phases.get(1).unwrap();
    assert_eq!(second.target.curve, TransitionCurve::EaseInOut);
    assert_eq!(second.target.time, 4_000);
    assert_eq!(second.stop_conditions.time, -1, "omitted stop time is inactive");

    let global: GlobalStopConditions = (&cfg.global_stop).into();
    assert_eq!(global, GlobalStopConditions::new(40.0, 60_000, 0.0));

    let params: RunParams = (&cfg.replay).into();
    assert_eq!(params.max_ticks, None);
    assert!(!params.stop_on_finish);

    let p = PhaseProfiler::builder()
        .with_shared_phases(Arc::new(phases))
        .with_global_stop(global)
        .try_build()
        .expect("profiler");
    assert_eq!(p.global_stop_conditions().weight, 40.0);
}

#[rstest]
fn shot_log_row_becomes_a_tick() {
    let csv = "time_ms,weight,weight_flow,smoothed_pump_flow,pump_flow,pressure,temperature,shot_weight,water_pumped\n\
               12500,18.2,1.9,2.1,2.3,8.8,92.5,18.0,41.5\n";
    let rows = profiler_config::parse_shot_log_csv(csv.as_bytes()).expect("parse");
    let tick = tick_from_row(&rows[0]);

    assert_eq!(tick.time_in_shot_ms, 12_500);
    let s = tick.sensors;
    assert_eq!(s.weight, 18.2);
    assert_eq!(s.weight_flow, 1.9);
    assert_eq!(s.smoothed_pump_flow, 2.1);
    assert_eq!(s.pump_flow, 2.3);
    assert_eq!(s.pressure, 8.8);
    assert_eq!(s.temperature, 92.5);
    assert_eq!(s.shot_weight, 18.0);
    assert_eq!(s.water_pumped, 41.5);
}
