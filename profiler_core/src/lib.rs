#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Shot phase profiler (hardware-agnostic).
//!
//! Decides, once per control tick, which phase of a shot recipe is active,
//! which setpoint and restriction it commands, and when the shot is over.
//! Sensor acquisition and actuation stay outside; they meet the engine through
//! `profiler_traits::SensorSource` and `profiler_traits::SetpointSink`.
//!
//! ## Architecture
//!
//! - **Stop conditions**: per-phase and whole-shot predicates (`stop` module)
//! - **Phases**: target ramps and recipes (`phase`, `curve` modules)
//! - **Current phase**: borrowed view of the active phase (`current` module)
//! - **Profiler**: the phase-advancement state machine (`profiler` module)
//! - **Runner**: replay/drive loop over a sensor source (`runner` module)
//!
//! ## Determinism
//!
//! The tick path does no I/O, reads no clock and allocates nothing; feeding
//! the same `(time, sensors)` sequence reproduces the same phase views.

pub mod conversions;
pub mod current;
pub mod curve;
pub mod error;
pub mod io_error;
pub mod mocks;
pub mod phase;
pub mod profiler;
pub mod record;
pub mod runner;
pub mod snapshot;
pub mod stop;

pub use current::CurrentPhase;
pub use curve::TransitionCurve;
pub use error::{BuildError, ProfilerError, Result};
pub use phase::{Phase, PhaseType, Phases, Target};
pub use profiler::{PhaseProfiler, ProfilerBuilder, ProfilerCommand, Transition};
pub use record::TickRecord;
pub use runner::{RunParams, ShotOutcome};
pub use snapshot::ShotSnapshot;
pub use stop::{GlobalStopConditions, PhaseStopConditions, StopTrigger};

pub use profiler_traits::{SensorState, Setpoint, Tick};
