#![no_main]
use libfuzzer_sys::fuzz_target;
use profiler_core::{PhaseProfiler, Phases, SensorState};

fuzz_target!(|data: &str| {
    // Arbitrary TOML must parse or fail cleanly; a validated profile must build
    // and survive a few ticks.
    let Ok(cfg) = profiler_config::load_toml(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    let Ok(phases) = Phases::try_from(&cfg) else {
        return;
    };
    let mut p = PhaseProfiler::new(std::sync::Arc::new(phases));
    p.update_global_stop_conditions(
        cfg.global_stop.weight,
        cfg.global_stop.time_ms,
        cfg.global_stop.water_pumped,
    );
    for t in [0u64, 1, 500, 5_000, 60_000] {
        p.update_phase(t, &SensorState::default());
        let _ = p.current_phase().target();
    }
});
