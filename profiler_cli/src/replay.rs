//! Shot replay: config mapping, shot-log loading and per-tick JSON output.

use std::path::Path;
use std::sync::Arc;

use eyre::WrapErr;
use profiler_config::Config;
use profiler_core::conversions::tick_from_row;
use profiler_core::error::Result as CoreResult;
use profiler_core::mocks::NullSink;
use profiler_core::runner::{RunParams, ShotOutcome, run};
use profiler_core::{GlobalStopConditions, PhaseProfiler, Phases, TickRecord, Transition};
use profiler_traits::IterSource;
use serde_json::{Value, json};

/// f32 -> JSON number without the binary noise of a plain widening cast.
pub fn num(x: f32) -> f64 {
    x.to_string().parse().unwrap_or_else(|_| f64::from(x))
}

pub fn record_json(r: &TickRecord) -> Value {
    json!({
        "time_ms": r.time_in_shot,
        "phase": r.phase_index,
        "type": r.phase_type.as_str(),
        "time_in_phase_ms": r.time_in_phase,
        "target": num(r.target),
        "restriction": num(r.restriction),
        "finished": r.finished,
        "trigger": r.trigger.map(|t| t.as_str()),
    })
}

fn transition_json(t: &Transition) -> Value {
    json!({
        "from": t.from,
        "to": t.to,
        "time_ms": t.time_in_shot,
        "trigger": t.trigger.as_str(),
        "global": t.global,
    })
}

pub fn summary_json(o: &ShotOutcome) -> Value {
    json!({
        "summary": {
            "ticks": o.ticks,
            "finished": o.finished,
            "final_phase": o.final_phase,
            "last_time_ms": o.last_time_in_shot,
            "transitions": o.transitions.iter().map(transition_json).collect::<Vec<_>>(),
        }
    })
}

/// Build the profiler a config describes, global limits included.
pub fn build_profiler(cfg: &Config) -> CoreResult<PhaseProfiler> {
    let phases = Phases::try_from(cfg).map_err(eyre::Report::new)?;
    let global: GlobalStopConditions = (&cfg.global_stop).into();
    PhaseProfiler::builder()
        .with_shared_phases(Arc::new(phases))
        .with_global_stop(global)
        .try_build()
}

pub fn run_replay(
    cfg: &Config,
    log: &Path,
    max_ticks_override: Option<u64>,
    json_mode: bool,
) -> CoreResult<ShotOutcome> {
    let rows = profiler_config::load_shot_log_csv(log)?;
    tracing::debug!(rows = rows.len(), log = %log.display(), "shot log loaded");

    let mut profiler = build_profiler(cfg)?;
    let mut params: RunParams = (&cfg.replay).into();
    if let Some(n) = max_ticks_override {
        params.max_ticks = (n > 0).then_some(n);
    }

    let mut source = IterSource(rows.iter().map(tick_from_row));
    let outcome = run(&mut source, &mut NullSink, &mut profiler, &params, |r| {
        println!("{}", record_json(r));
    })
    .wrap_err_with(|| format!("replay {}", log.display()))?;

    if json_mode {
        println!("{}", summary_json(&outcome));
    } else if outcome.finished {
        println!(
            "shot finished in phase {} at {} ms ({} ticks, {} transitions)",
            outcome.final_phase,
            outcome.last_time_in_shot,
            outcome.ticks,
            outcome.transitions.len()
        );
    } else {
        println!(
            "shot still running in phase {} at {} ms ({} ticks)",
            outcome.final_phase, outcome.last_time_in_shot, outcome.ticks
        );
    }
    Ok(outcome)
}
