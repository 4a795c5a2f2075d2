//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the alert state, the periodic task set and the LED
//! blink phase.  It exposes a clean, hardware-agnostic API.  All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!   AppCommand ──▶ ┌─────────────────────────┐ ──▶ EventSink
//!   ButtonPort ──▶ │       AppService        │
//!                  │ AlertState · TaskSet    │ ──▶ ActuatorPort
//!                  └─────────────────────────┘ ──▶ CloudPort
//! ```
//!
//! ## Tick order
//!
//! 1. Away-reset: clear `acknowledged` if the pet is not home.
//! 2. Periodic tasks in [`TaskId::ORDER`](crate::scheduler::TaskId::ORDER).
//! 3. Mirror `muted` onto the mute LED if it changed.
//! 4. Publish the state variables if they changed.
//!
//! The reset runs first so that no task ever observes "acknowledged
//! while away".

use log::info;

use crate::alert::policy::LedBlinker;
use crate::alert::{AlertPhase, AlertState, StateSnapshot};
use crate::config::AlertConfig;
use crate::input::{self, ButtonId, ClickEvent};
use crate::scheduler::{TaskContext, TaskId, TaskSet};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{ActuatorPort, ButtonPort, CloudPort, EventSink};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: AlertConfig,
    state: AlertState,
    tasks: TaskSet,
    blinker: LedBlinker,
    last_published: Option<StateSnapshot>,
    mute_led: Option<bool>,
}

impl AppService {
    /// Construct the service from configuration.  The alert state starts
    /// "away".
    pub fn new(config: AlertConfig) -> Self {
        let state = AlertState::new(&config);
        let tasks = TaskSet::new(&config);
        Self {
            config,
            state,
            tasks,
            blinker: LedBlinker::new(),
            last_published: None,
            mute_led: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.state.phase()));
        info!("AppService started in {:?}", self.state.phase());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: away-reset → periodic tasks → publish.
    /// Returns the tasks that fired.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut impl ActuatorPort,
        cloud: &mut impl CloudPort,
        sink: &mut impl EventSink,
    ) -> heapless::Vec<TaskId, 4> {
        // 1. Away-reset
        let before = self.state.phase();
        if self.state.reset_if_away() {
            info!("Acknowledgement cleared: not home");
        }
        self.emit_phase_change(before, sink);

        // 2. Periodic tasks
        let mut ctx = TaskContext {
            state: &self.state,
            blinker: &mut self.blinker,
            config: &self.config,
            hw: &mut *hw,
            cloud: &mut *cloud,
            sink: &mut *sink,
        };
        let fired = self.tasks.run(now_ms, &mut ctx);

        // 3. Mute indicator
        self.sync_mute_led(hw);

        // 4. Publish observable variables
        self.publish_if_changed(cloud, sink);

        fired
    }

    /// Poll both buttons and apply any clicks.
    pub fn poll_buttons(&mut self, now_ms: u32, buttons: &mut impl ButtonPort, sink: &mut impl EventSink) {
        for button in [ButtonId::Acknowledge, ButtonId::Mute] {
            if let Some(click) = buttons.poll_click(button, now_ms) {
                self.handle_click(button, click, sink);
            }
        }
    }

    // ── Input handling ────────────────────────────────────────

    pub fn handle_click(&mut self, button: ButtonId, click: ClickEvent, sink: &mut impl EventSink) {
        info!("Button: {:?} {:?} click", button, click);
        if let Some(cmd) = input::route_click(button, click) {
            self.handle_command(cmd, sink);
        }
    }

    /// Apply one typed mutation.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        let before = self.state.phase();
        match cmd {
            AppCommand::SetDistance(distance) => {
                info!("Distance set to {:.1}", distance);
                self.state.set_distance(distance);
                sink.emit(&AppEvent::DistanceUpdated(distance));
            }
            AppCommand::SetAcknowledged(acknowledged) => {
                info!("Acknowledged set to {}", acknowledged);
                self.state.set_acknowledged(acknowledged);
            }
            AppCommand::SetMuted(muted) => {
                if self.state.is_muted() != muted {
                    self.state.set_muted(muted);
                    sink.emit(&AppEvent::MuteChanged(muted));
                }
                info!("Mute set to {}", muted);
            }
            AppCommand::ToggleMuted => {
                let muted = self.state.toggle_muted();
                info!("Mute toggled to {}", muted);
                sink.emit(&AppEvent::MuteChanged(muted));
            }
            AppCommand::SetPositionInterval { interval_ms } => {
                self.tasks.set_interval_ms(TaskId::PositionRequest, interval_ms);
                sink.emit(&AppEvent::IntervalChanged { interval_ms });
            }
        }
        self.emit_phase_change(before, sink);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    pub fn phase(&self) -> AlertPhase {
        self.state.phase()
    }

    pub fn task_interval_ms(&self, id: TaskId) -> u32 {
        self.tasks.interval_ms(id)
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_phase_change(&self, before: AlertPhase, sink: &mut impl EventSink) {
        let after = self.state.phase();
        if after != before {
            sink.emit(&AppEvent::PhaseChanged {
                from: before,
                to: after,
            });
        }
    }

    fn sync_mute_led(&mut self, hw: &mut impl ActuatorPort) {
        let muted = self.state.is_muted();
        if self.mute_led != Some(muted) {
            hw.set_mute_led(muted);
            self.mute_led = Some(muted);
        }
    }

    fn publish_if_changed(&mut self, cloud: &mut impl CloudPort, sink: &mut impl EventSink) {
        let snapshot = self.state.snapshot();
        if self.last_published != Some(snapshot) {
            cloud.publish_state(&snapshot);
            sink.emit(&AppEvent::StatePublished(snapshot));
            self.last_published = Some(snapshot);
        }
    }
}
