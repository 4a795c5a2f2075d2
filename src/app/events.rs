//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, publish over MQTT, etc.

use crate::alert::{AlertPhase, StateSnapshot};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started (carries initial phase).
    Started(AlertPhase),

    /// The alert phase changed.
    PhaseChanged { from: AlertPhase, to: AlertPhase },

    /// The mute flag changed.
    MuteChanged(bool),

    /// A distance reading was stored.
    DistanceUpdated(f64),

    /// A position request was published.
    PositionRequested,

    /// The position-request interval was reconfigured.
    IntervalChanged { interval_ms: u32 },

    /// The gauge needle was moved.
    ServoMoved(u8),

    /// The alarm tone was started.
    ToneStarted,

    /// The published state variables changed.
    StatePublished(StateSnapshot),
}
