//! Stop-condition predicates for a single phase and for the whole shot.
//!
//! Float thresholds are inactive when `<= 0.0` (NaN is never active). Time
//! thresholds are inactive only when negative, so a time of `0` is reached on
//! the very first tick it is evaluated.
//!
//! Every comparison is strict. A reading sitting exactly on `threshold -
//! stop_delta` does not end the phase: 35.8 g at 0.4 g/s against a 36 g stop
//! (margin 0.2 g) keeps running, and the next heavier reading ends it.

use crate::snapshot::ShotSnapshot;
use profiler_traits::SensorState;

/// Scale weight (g) above which the scale-derived flow is trusted over the
/// pump flow estimate.
pub const WEIGHT_FLOW_MIN_WEIGHT_G: f32 = 0.4;

/// Which threshold ended a phase or the shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopTrigger {
    Time,
    Weight,
    PressureAbove,
    PressureBelow,
    WaterPumped,
    FlowAbove,
    FlowBelow,
}

impl StopTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            StopTrigger::Time => "time",
            StopTrigger::Weight => "weight",
            StopTrigger::PressureAbove => "pressure_above",
            StopTrigger::PressureBelow => "pressure_below",
            StopTrigger::WaterPumped => "water_pumped",
            StopTrigger::FlowAbove => "flow_above",
            StopTrigger::FlowBelow => "flow_below",
        }
    }
}

impl core::fmt::Display for StopTrigger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anticipatory margin subtracted from volume/weight thresholds.
///
/// Half of the current flow: scale flow once there is weight on the scale,
/// otherwise the smoothed pump flow. Compensates for the liquid still in
/// flight between the actuator cutting off and the sensor settling.
#[inline]
pub fn stop_delta(state: &SensorState) -> f32 {
    let flow = if state.weight > WEIGHT_FLOW_MIN_WEIGHT_G {
        state.weight_flow
    } else {
        state.smoothed_pump_flow
    };
    flow / 2.0
}

#[inline]
fn active(threshold: f32) -> bool {
    threshold > 0.0
}

#[inline]
fn time_reached(limit_ms: i64, elapsed_ms: u64) -> bool {
    matches!(u64::try_from(limit_ms), Ok(limit) if elapsed_ms >= limit)
}

/// Per-phase stop thresholds. Fixed at authoring time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStopConditions {
    /// Milliseconds in phase; negative disables.
    pub time: i64,
    /// Shot weight (g).
    pub weight: f32,
    /// Pressure (bar).
    pub pressure_above: f32,
    pub pressure_below: f32,
    /// Water pumped since the phase started (ml).
    pub water_pumped_in_phase: f32,
    /// Smoothed pump flow (ml/s).
    pub flow_above: f32,
    pub flow_below: f32,
}

impl Default for PhaseStopConditions {
    fn default() -> Self {
        Self {
            time: -1,
            weight: 0.0,
            pressure_above: 0.0,
            pressure_below: 0.0,
            water_pumped_in_phase: 0.0,
            flow_above: 0.0,
            flow_below: 0.0,
        }
    }
}

impl PhaseStopConditions {
    /// First threshold (in declaration order) that is currently met, if any.
    pub fn reached_by(
        &self,
        state: &SensorState,
        time_in_shot: u64,
        at_phase_start: &ShotSnapshot,
    ) -> Option<StopTrigger> {
        let stop_delta = stop_delta(state);
        let time_in_phase = time_in_shot.saturating_sub(at_phase_start.time_in_shot);
        let water_in_phase = state.water_pumped - at_phase_start.water_pumped;

        if time_reached(self.time, time_in_phase) {
            Some(StopTrigger::Time)
        } else if active(self.weight) && state.shot_weight > self.weight - stop_delta {
            Some(StopTrigger::Weight)
        } else if active(self.pressure_above) && state.pressure > self.pressure_above {
            Some(StopTrigger::PressureAbove)
        } else if active(self.pressure_below) && state.pressure < self.pressure_below {
            Some(StopTrigger::PressureBelow)
        } else if active(self.water_pumped_in_phase)
            && water_in_phase > self.water_pumped_in_phase - stop_delta
        {
            Some(StopTrigger::WaterPumped)
        } else if active(self.flow_above) && state.smoothed_pump_flow > self.flow_above {
            Some(StopTrigger::FlowAbove)
        } else if active(self.flow_below) && state.smoothed_pump_flow < self.flow_below {
            Some(StopTrigger::FlowBelow)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_reached(
        &self,
        state: &SensorState,
        time_in_shot: u64,
        at_phase_start: &ShotSnapshot,
    ) -> bool {
        self.reached_by(state, time_in_shot, at_phase_start)
            .is_some()
    }

    /// True when no field can ever fire.
    pub fn is_open_ended(&self) -> bool {
        self.time < 0
            && !active(self.weight)
            && !active(self.pressure_above)
            && !active(self.pressure_below)
            && !active(self.water_pumped_in_phase)
            && !active(self.flow_above)
            && !active(self.flow_below)
    }
}

/// Whole-shot safety limits. Updated between ticks by the config/UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalStopConditions {
    /// Shot weight (g).
    pub weight: f32,
    /// Milliseconds since shot start; negative disables.
    pub time: i64,
    /// Total water pumped (ml).
    pub water_pumped: f32,
}

impl Default for GlobalStopConditions {
    fn default() -> Self {
        Self {
            weight: 0.0,
            time: -1,
            water_pumped: 0.0,
        }
    }
}

impl GlobalStopConditions {
    pub fn new(weight: f32, time: i64, water_pumped: f32) -> Self {
        Self {
            weight,
            time,
            water_pumped,
        }
    }

    pub fn reached_by(&self, state: &SensorState, time_in_shot: u64) -> Option<StopTrigger> {
        let stop_delta = stop_delta(state);

        if active(self.weight) && state.shot_weight > self.weight - stop_delta {
            Some(StopTrigger::Weight)
        } else if active(self.water_pumped) && state.water_pumped > self.water_pumped {
            Some(StopTrigger::WaterPumped)
        } else if time_reached(self.time, time_in_shot) {
            Some(StopTrigger::Time)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_reached(&self, state: &SensorState, time_in_shot: u64) -> bool {
        self.reached_by(state, time_in_shot).is_some()
    }
}
