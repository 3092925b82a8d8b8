//! Seams between the shot profiler and its external collaborators.
//!
//! The acquisition layer produces [`SensorState`] snapshots through
//! [`SensorSource`]; the actuator layer consumes [`Setpoint`]s through
//! [`SetpointSink`]. Nothing in here knows about phases.

pub mod sensors;

pub use sensors::{SensorState, Tick};

/// Setpoint handed to the actuator/PID layer once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoint {
    /// Whether `target` is a flow (ml/s) or a pressure (bar) setpoint.
    pub flow_controlled: bool,
    pub target: f32,
    /// Secondary limiter (pressure ceiling for flow phases and vice versa).
    pub restriction: f32,
}

pub trait SensorSource {
    /// Next tick, or `Ok(None)` once the source is exhausted.
    fn next_tick(&mut self) -> Result<Option<Tick>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait SetpointSink {
    fn apply(&mut self, setpoint: Setpoint) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Adapts any in-memory tick iterator (recorded shot logs, tests) into a source.
#[derive(Debug, Clone)]
pub struct IterSource<I>(pub I);

impl<I> SensorSource for IterSource<I>
where
    I: Iterator<Item = Tick>,
{
    fn next_tick(&mut self) -> Result<Option<Tick>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.0.next())
    }
}
