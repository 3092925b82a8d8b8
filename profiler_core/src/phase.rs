//! Recipe nodes: a target ramp, a restriction and the conditions ending it.

use crate::curve::{TransitionCurve, map_range};
use crate::error::BuildError;
use crate::snapshot::ShotSnapshot;
use crate::stop::{PhaseStopConditions, StopTrigger};
use profiler_traits::SensorState;

/// What the phase target controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseType {
    Flow,
    Pressure,
}

impl PhaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseType::Flow => "flow",
            PhaseType::Pressure => "pressure",
        }
    }
}

/// Setpoint ramp of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Target {
    pub start: f32,
    pub end: f32,
    pub curve: TransitionCurve,
    /// Ramp length in ms. `0` borrows the phase's stop time.
    pub time: i64,
}

impl Target {
    /// Constant setpoint.
    pub fn flat(value: f32) -> Self {
        Self {
            start: value,
            end: value,
            curve: TransitionCurve::Instant,
            time: 0,
        }
    }

    pub fn ramp(start: f32, end: f32, curve: TransitionCurve, time: i64) -> Self {
        Self {
            start,
            end,
            curve,
            time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub phase_type: PhaseType,
    pub target: Target,
    pub restriction: f32,
    pub stop_conditions: PhaseStopConditions,
}

impl Phase {
    /// Length of the target ramp in ms, never negative.
    pub fn transition_time(&self) -> u64 {
        let time = if self.target.time > 0 {
            self.target.time
        } else {
            self.stop_conditions.time
        };
        u64::try_from(time).unwrap_or(0)
    }

    /// Setpoint after `time_in_phase` ms.
    pub fn target(&self, time_in_phase: u64) -> f32 {
        map_range(
            time_in_phase,
            self.transition_time(),
            self.target.start,
            self.target.end,
            self.target.curve,
        )
    }

    #[inline]
    pub fn restriction(&self) -> f32 {
        self.restriction
    }

    #[inline]
    pub fn is_stop_condition_reached(
        &self,
        state: &SensorState,
        time_in_shot: u64,
        at_phase_start: &ShotSnapshot,
    ) -> bool {
        self.stop_conditions
            .is_reached(state, time_in_shot, at_phase_start)
    }

    #[inline]
    pub fn stop_trigger(
        &self,
        state: &SensorState,
        time_in_shot: u64,
        at_phase_start: &ShotSnapshot,
    ) -> Option<StopTrigger> {
        self.stop_conditions
            .reached_by(state, time_in_shot, at_phase_start)
    }
}

/// Ordered, non-empty phase sequence of one recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Phases {
    phases: Vec<Phase>,
}

impl Phases {
    pub fn new(phases: Vec<Phase>) -> Result<Self, BuildError> {
        if phases.is_empty() {
            return Err(BuildError::EmptyProfile);
        }
        Ok(Self { phases })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.phases.len()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Phase at `index`, clamped to the last one.
    #[inline]
    pub fn clamped(&self, index: usize) -> &Phase {
        // `phases` is non-empty by construction.
        &self.phases[index.min(self.phases.len() - 1)]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phase> {
        self.phases.iter()
    }
}

impl TryFrom<Vec<Phase>> for Phases {
    type Error = BuildError;
    fn try_from(phases: Vec<Phase>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}

impl<'a> IntoIterator for &'a Phases {
    type Item = &'a Phase;
    type IntoIter = std::slice::Iter<'a, Phase>;
    fn into_iter(self) -> Self::IntoIter {
        self.phases.iter()
    }
}
