//! Per-tick output of a profiled shot, the unit of a replay log.

use crate::profiler::PhaseProfiler;

/// State of the profiler after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRecord {
    pub time_in_shot: u64,
    pub phase_index: usize,
    pub phase_type: crate::phase::PhaseType,
    pub time_in_phase: u64,
    pub target: f32,
    pub restriction: f32,
    pub finished: bool,
    /// Set when this tick crossed a phase boundary.
    pub trigger: Option<crate::stop::StopTrigger>,
}

impl TickRecord {
    /// Capture after `update_phase`; `advanced` tells whether the index moved.
    pub fn capture(time_in_shot: u64, profiler: &PhaseProfiler, advanced: bool) -> Self {
        let current = profiler.current_phase();
        Self {
            time_in_shot,
            phase_index: current.index(),
            phase_type: current.phase_type(),
            time_in_phase: current.time_in_phase(),
            target: current.target(),
            restriction: current.restriction(),
            finished: profiler.is_finished(),
            trigger: if advanced {
                profiler.last_transition().map(|t| t.trigger)
            } else {
                None
            },
        }
    }
}
