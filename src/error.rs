//! Unified error types for the PetHome firmware.
//!
//! The alert core itself never fails: malformed input degrades to a
//! default (see [`ParseError`]).  [`Error`] covers the outer ring only
//! (configuration and connectivity).  Neither is fatal: `main()` logs the
//! error and continues on defaults or offline.

use core::fmt;

use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible outer-ring operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(ConfigError),
    /// A communication subsystem failed.
    Comms(CommsError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    WifiConnectFailed,
    MqttConnectFailed,
    MqttSubscribeFailed,
    MqttPublishFailed,
    /// The inbound command channel was full and the command was dropped.
    InboxFull,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WifiConnectFailed => write!(f, "WiFi connect failed"),
            Self::MqttConnectFailed => write!(f, "MQTT connect failed"),
            Self::MqttSubscribeFailed => write!(f, "MQTT subscribe failed"),
            Self::MqttPublishFailed => write!(f, "MQTT publish failed"),
            Self::InboxFull => write!(f, "inbound command queue full"),
        }
    }
}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Payload parse errors
// ---------------------------------------------------------------------------

/// Why a remote payload could not be read as the requested type.
///
/// Never surfaced to the sender: the input router substitutes the
/// documented default and logs the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Payload was empty or whitespace only.
    Empty,
    /// Payload is not a number.
    InvalidNumber,
    /// Payload parsed to NaN.
    NotANumber,
    /// Payload is numeric but does not fit the target type.
    OutOfRange,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty payload"),
            Self::InvalidNumber => write!(f, "not a number"),
            Self::NotANumber => write!(f, "NaN"),
            Self::OutOfRange => write!(f, "number out of range"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comms_error_converts_and_displays() {
        let e: Error = CommsError::InboxFull.into();
        assert_eq!(e, Error::Comms(CommsError::InboxFull));
        assert_eq!(e.to_string(), "comms: inbound command queue full");
    }

    #[test]
    fn config_error_converts() {
        let e: Error = ConfigError::ValidationFailed("bad").into();
        assert_eq!(e.to_string(), "config: validation failed: bad");
    }

    #[test]
    fn mqtt_failures_display() {
        let e: Error = CommsError::MqttSubscribeFailed.into();
        assert_eq!(e.to_string(), "comms: MQTT subscribe failed");
        assert_eq!(CommsError::MqttPublishFailed.to_string(), "MQTT publish failed");
    }
}
