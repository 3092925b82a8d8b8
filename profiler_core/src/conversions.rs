//! `From` implementations bridging `profiler_config` types to core types.

use profiler_traits::{SensorState, Tick};

use crate::curve::TransitionCurve;
use crate::error::BuildError;
use crate::phase::{Phase, PhaseType, Phases, Target};
use crate::runner::RunParams;
use crate::stop::{GlobalStopConditions, PhaseStopConditions};

// ── Phase ────────────────────────────────────────────────────────────────────

impl From<profiler_config::PhaseKind> for PhaseType {
    fn from(k: profiler_config::PhaseKind) -> Self {
        match k {
            profiler_config::PhaseKind::Flow => PhaseType::Flow,
            profiler_config::PhaseKind::Pressure => PhaseType::Pressure,
        }
    }
}

impl From<profiler_config::CurveKind> for TransitionCurve {
    fn from(k: profiler_config::CurveKind) -> Self {
        match k {
            profiler_config::CurveKind::EaseIn => TransitionCurve::EaseIn,
            profiler_config::CurveKind::EaseOut => TransitionCurve::EaseOut,
            profiler_config::CurveKind::EaseInOut => TransitionCurve::EaseInOut,
            profiler_config::CurveKind::Linear => TransitionCurve::Linear,
            profiler_config::CurveKind::Instant => TransitionCurve::Instant,
        }
    }
}

impl From<&profiler_config::StopCfg> for PhaseStopConditions {
    fn from(c: &profiler_config::StopCfg) -> Self {
        Self {
            time: c.time_ms,
            weight: c.weight,
            pressure_above: c.pressure_above,
            pressure_below: c.pressure_below,
            water_pumped_in_phase: c.water_pumped_in_phase,
            flow_above: c.flow_above,
            flow_below: c.flow_below,
        }
    }
}

impl From<&profiler_config::PhaseCfg> for Phase {
    fn from(c: &profiler_config::PhaseCfg) -> Self {
        Self {
            phase_type: c.kind.into(),
            target: Target {
                start: c.target.start,
                end: c.target.end,
                curve: c.target.curve.into(),
                time: c.target.time_ms,
            },
            restriction: c.restriction,
            stop_conditions: (&c.stop).into(),
        }
    }
}

impl TryFrom<&profiler_config::Config> for Phases {
    type Error = BuildError;
    fn try_from(c: &profiler_config::Config) -> Result<Self, Self::Error> {
        Phases::new(c.phases.iter().map(Phase::from).collect())
    }
}

// ── Global stop ──────────────────────────────────────────────────────────────

impl From<&profiler_config::GlobalStopCfg> for GlobalStopConditions {
    fn from(c: &profiler_config::GlobalStopCfg) -> Self {
        Self::new(c.weight, c.time_ms, c.water_pumped)
    }
}

// ── Replay ───────────────────────────────────────────────────────────────────

impl From<&profiler_config::ReplayCfg> for RunParams {
    fn from(c: &profiler_config::ReplayCfg) -> Self {
        Self {
            max_ticks: (c.max_ticks > 0).then_some(c.max_ticks),
            stop_on_finish: c.stop_on_finish,
        }
    }
}

// ── Shot log ─────────────────────────────────────────────────────────────────

/// One logged row as a replay tick.
pub fn tick_from_row(r: &profiler_config::ShotLogRow) -> Tick {
    Tick::new(
        r.time_ms,
        SensorState {
            weight: r.weight,
            weight_flow: r.weight_flow,
            smoothed_pump_flow: r.smoothed_pump_flow,
            pump_flow: r.pump_flow,
            pressure: r.pressure,
            temperature: r.temperature,
            shot_weight: r.shot_weight,
            water_pumped: r.water_pumped,
        },
    )
}
