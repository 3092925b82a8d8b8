//! Drive a profiler from a sensor source until the shot ends.
//!
//! Used for replaying recorded shots and for hardware-in-the-loop runs where
//! the acquisition layer owns tick timing.

use eyre::WrapErr;
use profiler_traits::{SensorSource, SetpointSink};

use crate::error::{ProfilerError, Result as CoreResult};
use crate::io_error::{Boundary, map_io_error};
use crate::profiler::{PhaseProfiler, Transition};
use crate::record::TickRecord;

#[derive(Debug, Clone)]
pub struct RunParams {
    /// Stop after this many ticks even if the source has more (`None` = no cap).
    pub max_ticks: Option<u64>,
    /// Return as soon as the shot finishes instead of draining the source.
    pub stop_on_finish: bool,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            max_ticks: None,
            stop_on_finish: true,
        }
    }
}

/// Summary of a driven shot.
#[derive(Debug, Clone, Default)]
pub struct ShotOutcome {
    pub ticks: u64,
    pub finished: bool,
    /// Index of the phase shown when the run ended.
    pub final_phase: usize,
    pub last_time_in_shot: u64,
    /// Last boundary crossed on each tick that advanced.
    pub transitions: Vec<Transition>,
}

/// Feed every tick of `source` through `profiler`.
///
/// Each unfinished tick pushes the current setpoint to `sink`; the sink is
/// stopped once, on the tick the shot finishes. `on_tick` observes the state
/// after every tick. Tick times must be non-decreasing.
pub fn run<S, K, F>(
    source: &mut S,
    sink: &mut K,
    profiler: &mut PhaseProfiler,
    params: &RunParams,
    mut on_tick: F,
) -> CoreResult<ShotOutcome>
where
    S: SensorSource + ?Sized,
    K: SetpointSink + ?Sized,
    F: FnMut(&TickRecord),
{
    let mut outcome = ShotOutcome::default();
    let mut last_time: Option<u64> = None;
    let mut sink_stopped = false;

    tracing::info!(
        phases = profiler.phases().count(),
        max_ticks = params.max_ticks,
        "shot start"
    );

    loop {
        if let Some(max) = params.max_ticks
            && outcome.ticks >= max
        {
            tracing::warn!(max_ticks = max, "tick cap reached");
            break;
        }

        let tick = source
            .next_tick()
            .map_err(|e| eyre::Report::new(map_io_error(&*e, Boundary::Source)))
            .wrap_err("read sensor tick")?;
        let Some(tick) = tick else {
            break;
        };

        let now = tick.time_in_shot_ms;
        if let Some(prev) = last_time
            && now < prev
        {
            return Err(eyre::Report::new(ProfilerError::State(format!(
                "tick time went backwards: {prev} -> {now}"
            ))));
        }
        last_time = Some(now);

        let before = profiler.current_phase_idx();
        profiler.update_phase(now, &tick.sensors);
        let advanced = profiler.current_phase_idx() != before;
        if advanced && let Some(t) = profiler.last_transition() {
            outcome.transitions.push(*t);
        }

        outcome.ticks += 1;
        outcome.last_time_in_shot = now;
        on_tick(&TickRecord::capture(now, profiler, advanced));

        if profiler.is_finished() {
            if !sink_stopped {
                sink.stop()
                    .map_err(|e| eyre::Report::new(map_io_error(&*e, Boundary::Sink)))
                    .wrap_err("stop setpoint sink")?;
                sink_stopped = true;
            }
            if params.stop_on_finish {
                break;
            }
        } else {
            sink.apply(profiler.current_phase().setpoint())
                .map_err(|e| eyre::Report::new(map_io_error(&*e, Boundary::Sink)))
                .wrap_err("apply setpoint")?;
        }
    }

    outcome.finished = profiler.is_finished();
    outcome.final_phase = profiler.current_phase().index();
    tracing::info!(
        ticks = outcome.ticks,
        finished = outcome.finished,
        final_phase = outcome.final_phase,
        time_in_shot = outcome.last_time_in_shot,
        "shot end"
    );
    Ok(outcome)
}
