//! Sensor values frozen at a phase boundary.

use profiler_traits::SensorState;

/// Subset of the sensor state captured at a specific instant of the shot.
///
/// Used as the origin for "since phase start" deltas (time in phase, water
/// pumped in phase).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShotSnapshot {
    pub time_in_shot: u64,
    pub pressure: f32,
    pub pump_flow: f32,
    pub temperature: f32,
    pub shot_weight: f32,
    pub water_pumped: f32,
}

impl ShotSnapshot {
    pub fn capture(time_in_shot: u64, state: &SensorState) -> Self {
        Self {
            time_in_shot,
            pressure: state.pressure,
            pump_flow: state.pump_flow,
            temperature: state.temperature,
            shot_weight: state.shot_weight,
            water_pumped: state.water_pumped,
        }
    }

    /// Snapshot at time 0 with every field zeroed.
    #[inline]
    pub const fn zeroed() -> Self {
        Self {
            time_in_shot: 0,
            pressure: 0.0,
            pump_flow: 0.0,
            temperature: 0.0,
            shot_weight: 0.0,
            water_pumped: 0.0,
        }
    }
}
