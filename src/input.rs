//! Input router: raw stimuli to typed [`AppCommand`]s.
//!
//! | Stimulus                         | Command                                   | Reply            |
//! |----------------------------------|-------------------------------------------|------------------|
//! | Tracker distance update          | `SetDistance(parse_distance)`             | —                |
//! | Acknowledge button, single click | `SetAcknowledged(true)`                   | —                |
//! | Mute button, single click        | `ToggleMuted`                             | —                |
//! | `setDistance`                    | `SetDistance(parse_distance)`             | truncated value  |
//! | `setAcknowledged` / `setMute`    | `SetAcknowledged` / `SetMuted(flag != 0)` | raw flag integer |
//! | `setApiRequestIntervalMinutes`   | `SetPositionInterval(minutes * 60 000)`   | applied minutes  |
//!
//! The interval is saturated to `u32::MAX` ms, so an oversized request
//! replies with the whole minutes that were actually applied.
//!
//! Parsing is permissive.  Every parser returns a typed `Result`; the
//! routing functions replace an `Err` with the documented default (0)
//! and log a warning instead of rejecting the input.
//!
//! Flag coercion: `"true"` / `"false"` in any letter case map to 1 / 0;
//! anything else is parsed as a decimal integer.  The flag is set when
//! that integer is non-zero, and the integer itself is the reply, so
//! `"TRUE"` replies 1 and `"3"` sets the flag and replies 3.
//!
//! The reply of every remote function depends only on its payload, which
//! lets the transport answer the caller on its own thread while the
//! mutation itself is applied later by the control loop.

use log::{debug, warn};

use crate::app::commands::AppCommand;
use crate::error::ParseError;

const MS_PER_MINUTE: u32 = 60 * 1000;

/// Physical buttons on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Acknowledge,
    Mute,
}

/// Click gestures reported by the button driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickEvent {
    Single,
    Double,
}

/// Remote functions exposed to the cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCommand {
    SetDistance,
    SetAcknowledged,
    SetMute,
    SetApiRequestIntervalMinutes,
}

impl RemoteCommand {
    pub const ALL: [Self; 4] = [
        Self::SetDistance,
        Self::SetAcknowledged,
        Self::SetMute,
        Self::SetApiRequestIntervalMinutes,
    ];

    /// Name the function is registered under.
    pub fn name(self) -> &'static str {
        match self {
            Self::SetDistance => "setDistance",
            Self::SetAcknowledged => "setAcknowledged",
            Self::SetMute => "setMute",
            Self::SetApiRequestIntervalMinutes => "setApiRequestIntervalMinutes",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Outcome of routing one remote call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Routed {
    pub command: AppCommand,
    /// Integer returned to the caller.
    pub reply: i32,
}

// ── Parsers ───────────────────────────────────────────────────

/// Parse a distance reading.
///
/// Magnitudes beyond `f64` (`"1e400"`, `"inf"`) are kept as `±inf` and
/// left for the gauge policy to clamp; only NaN is rejected.
pub fn parse_distance(payload: &str) -> Result<f64, ParseError> {
    let s = payload.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    let value: f64 = s.parse().map_err(|_| ParseError::InvalidNumber)?;
    if value.is_nan() {
        return Err(ParseError::NotANumber);
    }
    Ok(value)
}

/// Parse a decimal `i32`.
pub fn parse_int(payload: &str) -> Result<i32, ParseError> {
    let s = payload.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    let wide: i64 = s.parse().map_err(|_| ParseError::InvalidNumber)?;
    i32::try_from(wide).map_err(|_| ParseError::OutOfRange)
}

/// Parse a boolean-ish flag into its integer form (see module docs).
pub fn parse_flag(payload: &str) -> Result<i32, ParseError> {
    let s = payload.trim();
    if s.eq_ignore_ascii_case("true") {
        Ok(1)
    } else if s.eq_ignore_ascii_case("false") {
        Ok(0)
    } else {
        parse_int(s)
    }
}

fn or_default<T: Default>(what: &str, payload: &str, parsed: Result<T, ParseError>) -> T {
    parsed.unwrap_or_else(|e| {
        warn!("Input: {} payload {:?} rejected ({}), using default", what, payload, e);
        T::default()
    })
}

// ── Routing ───────────────────────────────────────────────────

/// Route a tracker distance update.
pub fn route_distance_update(payload: &str) -> AppCommand {
    AppCommand::SetDistance(or_default("distance", payload, parse_distance(payload)))
}

/// Route a remote function call.
pub fn route_remote(command: RemoteCommand, payload: &str) -> Routed {
    match command {
        RemoteCommand::SetDistance => {
            let distance = or_default("setDistance", payload, parse_distance(payload));
            Routed {
                command: AppCommand::SetDistance(distance),
                // Saturating float-to-int cast.
                reply: distance as i32,
            }
        }
        RemoteCommand::SetAcknowledged => {
            let flag = or_default("setAcknowledged", payload, parse_flag(payload));
            Routed {
                command: AppCommand::SetAcknowledged(flag != 0),
                reply: flag,
            }
        }
        RemoteCommand::SetMute => {
            let flag = or_default("setMute", payload, parse_flag(payload));
            Routed {
                command: AppCommand::SetMuted(flag != 0),
                reply: flag,
            }
        }
        RemoteCommand::SetApiRequestIntervalMinutes => {
            let minutes = or_default("setApiRequestIntervalMinutes", payload, parse_int(payload));
            // Negative minutes collapse to 0, which fires on every tick.
            let interval_ms = minutes.max(0).unsigned_abs().saturating_mul(MS_PER_MINUTE);
            Routed {
                command: AppCommand::SetPositionInterval { interval_ms },
                reply: i32::try_from(interval_ms / MS_PER_MINUTE).unwrap_or(i32::MAX),
            }
        }
    }
}

/// Route a button gesture.  Only single clicks are bound.
pub fn route_click(button: ButtonId, click: ClickEvent) -> Option<AppCommand> {
    match (button, click) {
        (ButtonId::Acknowledge, ClickEvent::Single) => Some(AppCommand::SetAcknowledged(true)),
        (ButtonId::Mute, ClickEvent::Single) => Some(AppCommand::ToggleMuted),
        (button, click) => {
            debug!("Input: {:?} {:?} click ignored", button, click);
            None
        }
    }
}
