//! Value domain to needle angle mapping.
//!
//! The dial sweeps 160 degrees, from 10 to 170, leaving a 10 degree dead
//! zone at each end for visual clearance. Out-of-domain values are clamped
//! to [5, 175] so the needle still rests at a legible position instead of
//! wrapping or disappearing - a presentation choice, not an error.

use crate::config::GaugeConfig;

/// Needle angle of the first graduation.
pub const SWEEP_START_DEG: f32 = 10.0;

/// Angular span covered by the graduations.
pub const SWEEP_SPAN_DEG: f32 = 160.0;

/// Needle angle of the last graduation.
pub const SWEEP_END_DEG: f32 = SWEEP_START_DEG + SWEEP_SPAN_DEG;

/// Hard floor for the needle, just outside the first graduation.
pub const CLAMP_MIN_DEG: f32 = 5.0;

/// Hard ceiling for the needle, just outside the last graduation.
pub const CLAMP_MAX_DEG: f32 = 175.0;

/// Map a domain value onto a clamped needle angle in degrees.
///
/// The value is normalized over the declared range
/// (`num_major_ticks * tick_delta`) relative to `start_value`, mapped onto
/// the [10, 170] sweep and clamped to [5, 175].
#[inline]
pub fn value_to_angle(value: f32, config: &GaugeConfig) -> f32 {
    let range = config.num_major_ticks as f32 * config.tick_delta;
    let normalized = (value - config.start_value) / range;
    let angle = SWEEP_START_DEG + SWEEP_SPAN_DEG * normalized;
    angle.clamp(CLAMP_MIN_DEG, CLAMP_MAX_DEG)
}
