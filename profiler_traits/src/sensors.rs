/// Live measurements for one control tick, already filtered and calibrated.
///
/// Units: grams, grams/s, ml/s, bar, °C, ml.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorState {
    /// Weight currently on the scale.
    pub weight: f32,
    /// Flow derived from the scale weight.
    pub weight_flow: f32,
    pub smoothed_pump_flow: f32,
    /// Raw (unsmoothed) pump flow.
    pub pump_flow: f32,
    pub pressure: f32,
    pub temperature: f32,
    /// Cumulative beverage weight for this shot.
    pub shot_weight: f32,
    /// Cumulative water pumped for this shot.
    pub water_pumped: f32,
}

/// One sample delivered by the acquisition layer: shot time plus sensors.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tick {
    /// Milliseconds since the shot started.
    pub time_in_shot_ms: u64,
    pub sensors: SensorState,
}

impl Tick {
    #[inline]
    pub fn new(time_in_shot_ms: u64, sensors: SensorState) -> Self {
        Self {
            time_in_shot_ms,
            sensors,
        }
    }
}
