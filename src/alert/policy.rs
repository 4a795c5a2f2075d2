//! Actuator policies: pure mappings from [`AlertState`] to outputs.
//!
//! | Output | Away | Home, unacknowledged | Home, acknowledged |
//! |--------|------|----------------------|--------------------|
//! | LED    | off  | blink                | steady on          |
//! | Tone   | off  | on unless muted      | off                |
//! | Servo  | distance gauge, independent of acknowledge/mute          |||

use super::AlertState;
use crate::config::{ServoCalibration, ServoDirection};

/// Full servo sweep in degrees before calibration.
const SERVO_SWEEP_DEG: f64 = 180.0;

/// Map a distance onto the servo gauge.
///
/// The distance is clamped to `[0, max_distance]`, scaled linearly onto
/// 0–180°, shifted by the calibration offset and clamped to the
/// calibration's end-stop limits.  With [`ServoDirection::NearIsHigh`]
/// zero distance is full deflection:
///
/// `angle = clamp(180 - d / max * 180 + offset, min, max)`
pub fn servo_angle(distance: f64, max_distance: f64, cal: &ServoCalibration) -> u8 {
    // NaN never reaches here from the router, but keep the gauge parked.
    let d = if distance.is_nan() { max_distance } else { distance };
    let d = d.clamp(0.0, max_distance);
    let scaled = d / max_distance * SERVO_SWEEP_DEG;
    let raw = match cal.direction {
        ServoDirection::NearIsHigh => SERVO_SWEEP_DEG - scaled,
        ServoDirection::NearIsLow => scaled,
    } + cal.offset_deg;

    raw.clamp(f64::from(cal.min_angle), f64::from(cal.max_angle)) as u8
}

/// Whether the alarm tone should sound on this check.
pub fn tone_enabled(state: &AlertState) -> bool {
    state.is_alerting() && !state.is_muted()
}

/// LED blink phase.  Only advances while alerting; otherwise the output
/// is forced and the phase is left where it was.
#[derive(Debug, Clone, Default)]
pub struct LedBlinker {
    phase_on: bool,
}

impl LedBlinker {
    pub fn new() -> Self {
        Self { phase_on: false }
    }

    /// Compute the LED level for one firing of the LED task.
    pub fn next(&mut self, state: &AlertState) -> bool {
        if !state.is_home() {
            false
        } else if state.is_acknowledged() {
            true
        } else {
            self.phase_on = !self.phase_on;
            self.phase_on
        }
    }
}
