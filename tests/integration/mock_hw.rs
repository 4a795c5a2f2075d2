//! Mock adapters for integration tests.
//!
//! Record every port call so tests can assert on the full command
//! history without touching real GPIO/PWM registers or a broker.

use std::collections::VecDeque;

use pethome::alert::StateSnapshot;
use pethome::app::events::AppEvent;
use pethome::app::ports::{ActuatorPort, ButtonPort, CloudPort, EventSink};
use pethome::input::{ButtonId, ClickEvent};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Servo(u8),
    Led(bool),
    MuteLed(bool),
    Tone { frequency_hz: u16, duration_ms: u32 },
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_servo(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Servo(deg) => Some(*deg),
            _ => None,
        })
    }

    pub fn last_led(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Led(on) => Some(*on),
            _ => None,
        })
    }

    pub fn last_mute_led(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::MuteLed(on) => Some(*on),
            _ => None,
        })
    }

    pub fn tone_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Tone { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ActuatorPort for MockHardware {
    fn set_servo_angle(&mut self, degrees: u8) {
        self.calls.push(ActuatorCall::Servo(degrees));
    }

    fn set_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Led(on));
    }

    fn set_mute_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::MuteLed(on));
    }

    fn play_tone(&mut self, frequency_hz: u16, duration_ms: u32) {
        self.calls.push(ActuatorCall::Tone {
            frequency_hz,
            duration_ms,
        });
    }
}

// ── MockCloud ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockCloud {
    pub position_requests: u32,
    pub published: Vec<StateSnapshot>,
}

impl CloudPort for MockCloud {
    fn request_position(&mut self) {
        self.position_requests += 1;
    }

    fn publish_state(&mut self, snapshot: &StateSnapshot) {
        self.published.push(*snapshot);
    }
}

// ── MockButtons ───────────────────────────────────────────────

/// Scripted clicks, handed out in order as their button is polled.
#[derive(Default)]
pub struct MockButtons {
    pub pending: VecDeque<(ButtonId, ClickEvent)>,
}

#[allow(dead_code)]
impl MockButtons {
    pub fn click(&mut self, button: ButtonId, click: ClickEvent) {
        self.pending.push_back((button, click));
    }
}

impl ButtonPort for MockButtons {
    fn poll_click(&mut self, button: ButtonId, _now_ms: u32) -> Option<ClickEvent> {
        match self.pending.front() {
            Some(&(b, click)) if b == button => {
                self.pending.pop_front();
                Some(click)
            }
            _ => None,
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
