//! Target ramps: map elapsed phase time onto a setpoint range.

/// Exponent shared by the ease-in / ease-out ramps.
const EASE_EXPONENT: f32 = 1.675;

/// Shape of the ramp between a phase's start and end setpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionCurve {
    EaseIn,
    EaseOut,
    EaseInOut,
    #[default]
    Linear,
    /// Jump straight to the end value.
    Instant,
}

impl TransitionCurve {
    /// Shape a progress ratio in `[0, 1]`.
    pub fn apply(self, pct: f32) -> f32 {
        match self {
            TransitionCurve::Linear => pct,
            TransitionCurve::EaseIn => pct.powf(EASE_EXPONENT),
            TransitionCurve::EaseOut => 1.0 - (1.0 - pct).powf(EASE_EXPONENT),
            TransitionCurve::EaseInOut => {
                0.5 * (((pct - 0.5) * core::f32::consts::PI).sin() + 1.0)
            }
            TransitionCurve::Instant => 1.0,
        }
    }
}

/// Round to one decimal place (setpoint resolution).
#[inline]
fn round_1dp(x: f32) -> f32 {
    (x * 10.0).round() / 10.0
}

/// Interpolate `x` over the domain `[0, span]` onto `[start, end]`.
///
/// Outside the domain the ratio is clamped, so `x >= span` yields `end`.
/// A zero-length domain yields `end` directly.
pub fn map_range(x: u64, span: u64, start: f32, end: f32, curve: TransitionCurve) -> f32 {
    if span == 0 {
        return end;
    }
    let pct = (x as f64 / span as f64).clamp(0.0, 1.0) as f32;
    round_1dp(start + (end - start) * curve.apply(pct))
}
