//! Test and helper mocks for profiler_core

use profiler_traits::{Setpoint, SetpointSink};

/// A sink that accepts and discards every setpoint; useful when replaying a
/// recorded shot with no actuator attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SetpointSink for NullSink {
    fn apply(&mut self, _setpoint: Setpoint) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
    fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(())
    }
}
