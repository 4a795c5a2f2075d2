//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (clock, gauge hardware, buttons, cloud link, event
//! sinks) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.  Every actuator call is fire-and-forget: ports return
//! nothing and adapters log their own failures.

use crate::alert::StateSnapshot;
use crate::input::{ButtonId, ClickEvent};

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Wraps at `u32::MAX`; consumers must
/// compare timestamps with `wrapping_sub`.
pub trait TimePort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the gauge.
pub trait ActuatorPort {
    /// Move the gauge needle to `degrees` (already calibrated and clamped).
    fn set_servo_angle(&mut self, degrees: u8);

    /// Switch the home indicator LED.
    fn set_led(&mut self, on: bool);

    /// Switch the mute indicator LED.
    fn set_mute_led(&mut self, on: bool);

    /// Start a tone; returns immediately.
    fn play_tone(&mut self, frequency_hz: u16, duration_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the two push buttons.  Debounce and click counting
/// happen behind this port.
pub trait ButtonPort {
    fn poll_click(&mut self, button: ButtonId, now_ms: u32) -> Option<ClickEvent>;
}

// ───────────────────────────────────────────────────────────────
// Cloud port (driven adapter: domain → pub/sub)
// ───────────────────────────────────────────────────────────────

/// Outbound side of the cloud link.  Inbound traffic arrives as
/// [`AppCommand`](super::commands::AppCommand)s through the
/// [`inbox`](super::inbox).
pub trait CloudPort {
    /// Ask the tracker integration for a fresh position.  No payload,
    /// no response; the answer arrives later as a distance update.
    fn request_position(&mut self);

    /// Publish the observable state variables.
    fn publish_state(&mut self, snapshot: &StateSnapshot);
}

/// No link: outbound traffic is dropped and the gauge runs locally.
impl<C: CloudPort> CloudPort for Option<C> {
    fn request_position(&mut self) {
        if let Some(cloud) = self {
            cloud.request_position();
        }
    }

    fn publish_state(&mut self, snapshot: &StateSnapshot) {
        if let Some(cloud) = self {
            cloud.publish_state(snapshot);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
