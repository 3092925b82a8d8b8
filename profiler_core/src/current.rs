//! Read-only view of the active phase.

use crate::phase::{Phase, PhaseType};

/// Index and elapsed time of the active phase, refreshed in place every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PhaseCursor {
    pub(crate) index: usize,
    pub(crate) time_in_phase: u64,
}

impl PhaseCursor {
    #[inline]
    pub(crate) fn update(&mut self, index: usize, time_in_phase: u64) {
        self.index = index;
        self.time_in_phase = time_in_phase;
    }
}

/// Projection of the active phase borrowed from the profiler's sequence.
///
/// Cheap to build; holds no state of its own beyond the cursor values.
#[derive(Debug, Clone, Copy)]
pub struct CurrentPhase<'a> {
    index: usize,
    phase: &'a Phase,
    time_in_phase: u64,
}

impl<'a> CurrentPhase<'a> {
    pub fn new(index: usize, phase: &'a Phase, time_in_phase: u64) -> Self {
        Self {
            index,
            phase,
            time_in_phase,
        }
    }

    pub fn phase(&self) -> &'a Phase {
        self.phase
    }

    pub fn phase_type(&self) -> PhaseType {
        self.phase.phase_type
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Milliseconds since this phase became active.
    pub fn time_in_phase(&self) -> u64 {
        self.time_in_phase
    }

    pub fn target(&self) -> f32 {
        self.phase.target(self.time_in_phase)
    }

    pub fn restriction(&self) -> f32 {
        self.phase.restriction()
    }

    pub fn setpoint(&self) -> profiler_traits::Setpoint {
        profiler_traits::Setpoint {
            flow_controlled: matches!(self.phase_type(), PhaseType::Flow),
            target: self.target(),
            restriction: self.restriction(),
        }
    }
}
