//! Home/acknowledge/mute alert state.
//!
//! ```text
//!                distance <= home            acknowledge(true)
//!   ┌──────┐ ─────────────────▶ ┌─────────────────┐ ───────────▶ ┌───────────────┐
//!   │ Away │                    │ HomeUnacknowl.  │              │ HomeAcknowl.  │
//!   └──────┘ ◀───────────────── └─────────────────┘ ◀─────────── └───────────────┘
//!      ▲        distance > home                     acknowledge(false)   │
//!      └──────────────────────── distance > home ────────────────────────┘
//! ```
//!
//! `muted` overlays every phase and only silences the buzzer.
//!
//! Leaving home always clears `acknowledged`: immediately when a distance
//! update moves the pet out, and on every tick through
//! [`AlertState::reset_if_away`] for acknowledgements set while away.

pub mod policy;

use serde::Serialize;

use crate::config::AlertConfig;

/// Derived alert phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertPhase {
    Away,
    HomeUnacknowledged,
    HomeAcknowledged,
}

/// The single owned alert state of the device.
#[derive(Debug, Clone)]
pub struct AlertState {
    /// Last reported distance, stored exactly as received.
    distance: f64,
    acknowledged: bool,
    muted: bool,
    home_distance: f64,
}

impl AlertState {
    /// Start "away": distance at the far end of the gauge, nothing
    /// acknowledged, not muted.
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            distance: config.max_distance,
            acknowledged: false,
            muted: false,
            home_distance: config.home_distance,
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_home(&self) -> bool {
        self.distance <= self.home_distance
    }

    pub fn phase(&self) -> AlertPhase {
        match (self.is_home(), self.acknowledged) {
            (false, _) => AlertPhase::Away,
            (true, false) => AlertPhase::HomeUnacknowledged,
            (true, true) => AlertPhase::HomeAcknowledged,
        }
    }

    /// Home, not acknowledged: LED blinks and (unless muted) the buzzer sounds.
    pub fn is_alerting(&self) -> bool {
        self.phase() == AlertPhase::HomeUnacknowledged
    }

    /// Store a new distance reading.  Moving out of the home zone clears
    /// any acknowledgement.
    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance;
        if !self.is_home() {
            self.acknowledged = false;
        }
    }

    pub fn set_acknowledged(&mut self, acknowledged: bool) {
        self.acknowledged = acknowledged;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip the mute flag and return the new value.
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Clear `acknowledged` while away.  Returns `true` if it was set.
    pub fn reset_if_away(&mut self) -> bool {
        if !self.is_home() && self.acknowledged {
            self.acknowledged = false;
            true
        } else {
            false
        }
    }

    /// Externally observable variables.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            distance: self.distance,
            acknowledged: self.acknowledged,
            mute: self.muted,
        }
    }
}

/// The published state variables (`distance`, `acknowledged`, `mute`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub distance: f64,
    pub acknowledged: bool,
    pub mute: bool,
}
