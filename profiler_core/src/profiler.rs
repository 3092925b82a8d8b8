//! Phase-advancement state machine driven once per control tick.

use std::sync::Arc;

use profiler_traits::SensorState;

use crate::current::{CurrentPhase, PhaseCursor};
use crate::error::{BuildError, Result};
use crate::phase::{Phase, Phases};
use crate::snapshot::ShotSnapshot;
use crate::stop::{GlobalStopConditions, StopTrigger};

/// A phase boundary crossed during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Index of the phase that ended.
    pub from: usize,
    /// Index now active; equals the phase count when the shot finished.
    pub to: usize,
    pub time_in_shot: u64,
    pub trigger: StopTrigger,
    /// True when a whole-shot limit ended the shot.
    pub global: bool,
}

/// Instruction from an outer layer (config/UI, shot lifecycle), applied
/// between ticks.
#[derive(Debug, Clone)]
pub enum ProfilerCommand {
    UpdateGlobalStopConditions {
        weight: f32,
        time: i64,
        water_volume: f32,
    },
    Reset,
    /// Swap the recipe; implies a reset.
    LoadPhases(Arc<Phases>),
}

/// Drives a shot through its phase sequence.
///
/// Single writer: `update_phase` is called once per tick with non-decreasing
/// shot time. Given the same tick sequence it produces the same phase views.
#[derive(Debug, Clone)]
pub struct PhaseProfiler {
    phases: Arc<Phases>,
    current_phase_idx: usize,
    phase_changed_snapshot: ShotSnapshot,
    current: PhaseCursor,
    global_stop: GlobalStopConditions,
    last_transition: Option<Transition>,
}

impl PhaseProfiler {
    pub fn new(phases: Arc<Phases>) -> Self {
        let mut profiler = Self {
            phases,
            current_phase_idx: 0,
            phase_changed_snapshot: ShotSnapshot::zeroed(),
            current: PhaseCursor::default(),
            global_stop: GlobalStopConditions::default(),
            last_transition: None,
        };
        profiler.reset();
        profiler
    }

    pub fn builder() -> ProfilerBuilder {
        ProfilerBuilder::default()
    }

    /// Advance the state machine for one tick.
    ///
    /// Global limits are checked before the active phase and override it.
    /// When the active phase is done the next one is evaluated against the
    /// same tick, so several already-satisfied phases can be skipped at once.
    pub fn update_phase(&mut self, time_in_shot: u64, state: &SensorState) {
        let count = self.phases.count();

        // Every pass either returns or advances the index, and a pass at
        // index == count always returns.
        for _ in 0..=count {
            let time_in_phase =
                time_in_shot.saturating_sub(self.phase_changed_snapshot.time_in_shot);

            if self.current_phase_idx >= count {
                self.current_phase_idx = count;
                self.current.update(count - 1, time_in_phase);
                return;
            }

            if let Some(trigger) = self.global_stop.reached_by(state, time_in_shot) {
                tracing::info!(
                    phase = self.current_phase_idx,
                    time_in_shot,
                    trigger = %trigger,
                    "global stop condition reached"
                );
                self.last_transition = Some(Transition {
                    from: self.current_phase_idx,
                    to: count,
                    time_in_shot,
                    trigger,
                    global: true,
                });
                self.current_phase_idx = count;
                self.current.update(count - 1, time_in_phase);
                return;
            }

            let idx = self.current_phase_idx;
            let trigger = self.phases.clamped(idx).stop_trigger(
                state,
                time_in_shot,
                &self.phase_changed_snapshot,
            );
            let Some(trigger) = trigger else {
                self.current.update(idx, time_in_phase);
                return;
            };

            self.current_phase_idx = idx + 1;
            self.phase_changed_snapshot = ShotSnapshot::capture(time_in_shot, state);
            self.last_transition = Some(Transition {
                from: idx,
                to: idx + 1,
                time_in_shot,
                trigger,
                global: false,
            });
            tracing::debug!(
                from = idx,
                to = idx + 1,
                time_in_shot,
                trigger = %trigger,
                "phase stop condition reached"
            );
        }
        debug_assert!(self.is_finished(), "phase loop exhausted without finishing");
    }

    /// View of the active phase (the last phase once finished).
    pub fn current_phase(&self) -> CurrentPhase<'_> {
        CurrentPhase::new(
            self.current.index,
            self.phases.clamped(self.current.index),
            self.current.time_in_phase,
        )
    }

    pub fn is_finished(&self) -> bool {
        self.current_phase_idx >= self.phases.count()
    }

    /// Raw phase index; equals the phase count once finished.
    pub fn current_phase_idx(&self) -> usize {
        self.current_phase_idx
    }

    pub fn phase_changed_snapshot(&self) -> &ShotSnapshot {
        &self.phase_changed_snapshot
    }

    pub fn phases(&self) -> &Arc<Phases> {
        &self.phases
    }

    pub fn global_stop_conditions(&self) -> &GlobalStopConditions {
        &self.global_stop
    }

    /// Most recent phase boundary, cleared by `reset`.
    pub fn last_transition(&self) -> Option<&Transition> {
        self.last_transition.as_ref()
    }

    /// Tighten or loosen whole-shot limits. Takes effect on the next tick.
    pub fn update_global_stop_conditions(&mut self, weight: f32, time: i64, water_volume: f32) {
        self.global_stop = GlobalStopConditions::new(weight, time, water_volume);
        tracing::debug!(weight, time, water_volume, "global stop conditions updated");
    }

    /// Prepare for a new shot. Global stop conditions are kept.
    pub fn reset(&mut self) {
        self.current_phase_idx = 0;
        self.phase_changed_snapshot = ShotSnapshot::zeroed();
        self.current.update(0, 0);
        self.last_transition = None;
    }

    /// Replace the recipe and reset.
    pub fn load_phases(&mut self, phases: Arc<Phases>) {
        tracing::debug!(count = phases.count(), "phases loaded");
        self.phases = phases;
        self.reset();
    }

    pub fn apply(&mut self, command: ProfilerCommand) {
        match command {
            ProfilerCommand::UpdateGlobalStopConditions {
                weight,
                time,
                water_volume,
            } => self.update_global_stop_conditions(weight, time, water_volume),
            ProfilerCommand::Reset => self.reset(),
            ProfilerCommand::LoadPhases(phases) => self.load_phases(phases),
        }
    }
}

/// Builder for [`PhaseProfiler`]; validated on `try_build()`.
#[derive(Debug, Default)]
pub struct ProfilerBuilder {
    phases: Option<Arc<Phases>>,
    raw_phases: Option<Vec<Phase>>,
    global_stop: Option<GlobalStopConditions>,
}

impl ProfilerBuilder {
    pub fn with_phases(mut self, phases: Vec<Phase>) -> Self {
        self.raw_phases = Some(phases);
        self.phases = None;
        self
    }

    pub fn with_shared_phases(mut self, phases: Arc<Phases>) -> Self {
        self.phases = Some(phases);
        self.raw_phases = None;
        self
    }

    pub fn with_global_stop(mut self, global_stop: GlobalStopConditions) -> Self {
        self.global_stop = Some(global_stop);
        self
    }

    pub fn try_build(self) -> Result<PhaseProfiler> {
        let phases = match (self.phases, self.raw_phases) {
            (Some(shared), _) => shared,
            (None, Some(raw)) => Arc::new(Phases::new(raw).map_err(eyre::Report::new)?),
            (None, None) => return Err(eyre::Report::new(BuildError::EmptyProfile)),
        };
        let mut profiler = PhaseProfiler::new(phases);
        if let Some(g) = self.global_stop {
            profiler.global_stop = g;
        }
        Ok(profiler)
    }
}
