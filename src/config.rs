//! System configuration parameters
//!
//! All tunable parameters for the PetHome gauge.  The firmware boots with
//! [`AlertConfig::default()`]; values that fail [`AlertConfig::validate`]
//! are rejected as a whole and the defaults are used instead.

use heapless::String;
use serde::{Deserialize, Serialize};

/// Which end of the servo sweep represents "at home".
///
/// Two hardware revisions of the gauge face exist.  The current face has
/// the home marker at the high end of the sweep; the first face had it
/// at the low end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServoDirection {
    /// Zero distance drives the needle to full deflection (current face).
    NearIsHigh,
    /// Zero distance drives the needle to minimum deflection (first face).
    NearIsLow,
}

/// Servo gauge calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServoCalibration {
    /// Offset applied after the linear mapping, in degrees.
    pub offset_deg: f64,
    /// Lowest angle ever commanded (mechanical end-stop guard).
    pub min_angle: u8,
    /// Highest angle ever commanded (mechanical end-stop guard).
    pub max_angle: u8,
    pub direction: ServoDirection,
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self {
            offset_deg: -11.0,
            min_angle: 2,
            max_angle: 165,
            direction: ServoDirection::NearIsHigh,
        }
    }
}

/// Core alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    // --- Distance ---
    /// Distance at or below which the pet counts as home.
    pub home_distance: f64,
    /// Distance mapped to the far end of the gauge.  Larger readings are
    /// clamped when the gauge is driven, never when stored.
    pub max_distance: f64,

    // --- Actuators ---
    pub servo: ServoCalibration,
    /// Alarm tone frequency (Hz)
    pub tone_frequency_hz: u16,
    /// Alarm tone duration (milliseconds)
    pub tone_duration_ms: u32,

    // --- Periodic tasks ---
    /// Position request publish interval (milliseconds)
    pub position_request_interval_ms: u32,
    /// Servo refresh interval (milliseconds)
    pub servo_interval_ms: u32,
    /// Alarm tone check interval (milliseconds)
    pub tone_interval_ms: u32,
    /// LED blink half-period (milliseconds)
    pub led_interval_ms: u32,

    // --- Timing ---
    /// Control loop period (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Button debounce time (milliseconds)
    pub button_debounce_ms: u32,
    /// Maximum gap between clicks of a multi-click (milliseconds)
    pub button_multiclick_ms: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            // Distance
            home_distance: 5.0,
            max_distance: 50.0,

            // Actuators
            servo: ServoCalibration::default(),
            tone_frequency_hz: 440,
            tone_duration_ms: 2000,

            // Periodic tasks
            position_request_interval_ms: 5 * 60 * 1000, // 5 min
            servo_interval_ms: 5 * 1000,
            tone_interval_ms: 5 * 1000,
            led_interval_ms: 500, // 1 Hz blink

            // Timing
            control_loop_interval_ms: 10,
            button_debounce_ms: 20,
            button_multiclick_ms: 250,
        }
    }
}

impl AlertConfig {
    /// Range-check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "max_distance must be positive and finite",
            ));
        }
        if !self.home_distance.is_finite() || self.home_distance > self.max_distance {
            return Err(ConfigError::ValidationFailed(
                "home_distance must not exceed max_distance",
            ));
        }
        if self.servo.min_angle >= self.servo.max_angle {
            return Err(ConfigError::ValidationFailed(
                "servo min_angle must be below max_angle",
            ));
        }
        if self.servo.max_angle > 180 {
            return Err(ConfigError::ValidationFailed("servo max_angle must be <= 180"));
        }
        if !self.servo.offset_deg.is_finite() {
            return Err(ConfigError::ValidationFailed("servo offset must be finite"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Connectivity settings.  Defaults are baked in at build time from the
/// `PETHOME_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub wifi_ssid: String<32>,
    pub wifi_password: String<64>,
    pub mqtt_url: String<96>,
    /// Topic prefix shared by every message this device sends or receives.
    pub topic_prefix: String<32>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: bounded(option_env!("PETHOME_WIFI_SSID").unwrap_or("")),
            wifi_password: bounded(option_env!("PETHOME_WIFI_PASSWORD").unwrap_or("")),
            mqtt_url: bounded(option_env!("PETHOME_MQTT_URL").unwrap_or("mqtt://broker.local:1883")),
            topic_prefix: bounded(option_env!("PETHOME_TOPIC_PREFIX").unwrap_or("pethome")),
        }
    }
}

/// Copy as much of `s` as fits; over-long build-time values are truncated.
fn bounded<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Errors from [`AlertConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}
