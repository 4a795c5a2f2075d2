//! End-to-end alert behaviour through `AppService` with mock adapters.

use pethome::alert::{AlertPhase, StateSnapshot};
use pethome::app::commands::AppCommand;
use pethome::app::events::AppEvent;
use pethome::app::service::AppService;
use pethome::config::AlertConfig;
use pethome::input::{ButtonId, ClickEvent};
use pethome::scheduler::TaskId;

use crate::mock_hw::{ActuatorCall, MockButtons, MockCloud, MockHardware, RecordingSink};

/// Control-loop step used by the rig.  Matches the LED interval so every
/// step fires the LED task.
const STEP_MS: u32 = 500;

struct Rig {
    app: AppService,
    hw: MockHardware,
    cloud: MockCloud,
    sink: RecordingSink,
    now: u32,
}

impl Rig {
    fn new() -> Self {
        let mut rig = Self {
            app: AppService::new(AlertConfig::default()),
            hw: MockHardware::new(),
            cloud: MockCloud::default(),
            sink: RecordingSink::default(),
            now: 0,
        };
        rig.app.start(&mut rig.sink);
        rig
    }

    fn advance_to(&mut self, until: u32) {
        while self.now < until {
            self.now += STEP_MS;
            self.app
                .tick(self.now, &mut self.hw, &mut self.cloud, &mut self.sink);
        }
    }

    fn command(&mut self, cmd: AppCommand) {
        self.app.handle_command(cmd, &mut self.sink);
    }

    fn leds(&self) -> Vec<bool> {
        self.hw
            .calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Led(on) => Some(*on),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn away_home_acknowledge_and_leave() {
    let mut rig = Rig::new();

    // Away: LED off, no tone, needle at minimum deflection.
    rig.advance_to(5_000);
    assert_eq!(rig.app.phase(), AlertPhase::Away);
    assert!(rig.leds().iter().all(|on| !on));
    assert_eq!(rig.hw.tone_count(), 0);
    assert_eq!(rig.hw.last_servo(), Some(2));

    // Home: LED blinks, tone sounds, needle at maximum deflection.
    rig.command(AppCommand::SetDistance(0.0));
    rig.hw.clear();
    rig.advance_to(10_000);
    assert_eq!(rig.app.phase(), AlertPhase::HomeUnacknowledged);
    assert_eq!(rig.leds(), [true, false].repeat(5));
    assert_eq!(rig.hw.last_servo(), Some(165));
    assert!(rig.hw.calls.contains(&ActuatorCall::Tone {
        frequency_hz: 440,
        duration_ms: 2_000,
    }));

    // Acknowledge: LED steady, tone stops.
    rig.command(AppCommand::SetAcknowledged(true));
    rig.hw.clear();
    rig.advance_to(15_000);
    assert_eq!(rig.app.phase(), AlertPhase::HomeAcknowledged);
    assert!(rig.leds().iter().all(|on| *on));
    assert_eq!(rig.hw.tone_count(), 0);

    // Leave: LED off, acknowledgement gone.
    rig.command(AppCommand::SetDistance(50.0));
    rig.hw.clear();
    rig.advance_to(16_000);
    assert!(!rig.app.state().is_acknowledged());
    assert_eq!(rig.hw.last_led(), Some(false));

    // Coming back re-triggers the alert.
    rig.command(AppCommand::SetDistance(0.0));
    rig.hw.clear();
    rig.advance_to(20_000);
    assert_eq!(rig.app.phase(), AlertPhase::HomeUnacknowledged);
    assert_eq!(rig.hw.tone_count(), 1);
}

#[test]
fn tasks_run_in_fixed_order_then_state_is_published() {
    let mut rig = Rig::new();
    rig.command(AppCommand::SetDistance(0.0));
    rig.sink.clear();

    // 5 min is a common multiple of every default interval.
    let fired = rig
        .app
        .tick(300_000, &mut rig.hw, &mut rig.cloud, &mut rig.sink);

    assert_eq!(fired.as_slice(), &TaskId::ORDER);
    assert_eq!(
        rig.hw.calls,
        vec![
            ActuatorCall::Servo(165),
            ActuatorCall::Tone {
                frequency_hz: 440,
                duration_ms: 2_000
            },
            ActuatorCall::Led(true),
            ActuatorCall::MuteLed(false),
        ]
    );
    assert_eq!(rig.cloud.position_requests, 1);
    assert_eq!(
        rig.sink.events,
        vec![
            AppEvent::PositionRequested,
            AppEvent::ServoMoved(165),
            AppEvent::ToneStarted,
            AppEvent::StatePublished(StateSnapshot {
                distance: 0.0,
                acknowledged: false,
                mute: false,
            }),
        ]
    );
}

#[test]
fn acknowledgement_set_while_away_is_cleared_on_next_tick() {
    let mut rig = Rig::new();
    rig.command(AppCommand::SetAcknowledged(true));
    assert!(rig.app.state().is_acknowledged());

    rig.advance_to(STEP_MS);
    assert!(!rig.app.state().is_acknowledged());
    assert_eq!(rig.cloud.published.last().map(|s| s.acknowledged), Some(false));

    // The next arrival alerts as usual.
    rig.command(AppCommand::SetDistance(1.0));
    rig.advance_to(5_000);
    assert_eq!(rig.hw.tone_count(), 1);
}

#[test]
fn mute_silences_tone_but_not_led() {
    let mut rig = Rig::new();
    rig.command(AppCommand::SetDistance(2.0));
    rig.command(AppCommand::ToggleMuted);

    rig.advance_to(10_000);
    assert_eq!(rig.hw.tone_count(), 0);
    let leds = rig.leds();
    assert!(leds.contains(&true) && leds.contains(&false));

    rig.command(AppCommand::ToggleMuted);
    rig.advance_to(15_000);
    assert_eq!(rig.hw.tone_count(), 1);
}

#[test]
fn mute_led_follows_mute_state() {
    let mut rig = Rig::new();
    rig.advance_to(STEP_MS);
    assert_eq!(rig.hw.last_mute_led(), Some(false));

    rig.command(AppCommand::ToggleMuted);
    rig.hw.clear();
    rig.advance_to(2_000);
    // Switched once, on the tick after the change.
    let mute_leds: Vec<_> = rig
        .hw
        .calls
        .iter()
        .filter(|c| matches!(c, ActuatorCall::MuteLed(_)))
        .collect();
    assert_eq!(mute_leds, [&ActuatorCall::MuteLed(true)]);

    rig.command(AppCommand::SetMuted(false));
    rig.advance_to(2_500);
    assert_eq!(rig.hw.last_mute_led(), Some(false));
}

#[test]
fn buttons_acknowledge_and_toggle_mute() {
    let mut rig = Rig::new();
    rig.command(AppCommand::SetDistance(0.0));
    rig.sink.clear();

    let mut buttons = MockButtons::default();
    buttons.click(ButtonId::Mute, ClickEvent::Double);
    buttons.click(ButtonId::Acknowledge, ClickEvent::Single);
    buttons.click(ButtonId::Mute, ClickEvent::Single);

    // Double click on mute is not bound.
    rig.app.poll_buttons(0, &mut buttons, &mut rig.sink);
    assert!(!rig.app.state().is_muted());
    assert!(!rig.app.state().is_acknowledged());

    rig.app.poll_buttons(10, &mut buttons, &mut rig.sink);
    assert!(rig.app.state().is_acknowledged());
    assert!(rig.app.state().is_muted());
    assert!(rig.sink.events.contains(&AppEvent::MuteChanged(true)));
    assert!(buttons.pending.is_empty());
}

#[test]
fn state_is_published_only_when_it_changes() {
    let mut rig = Rig::new();
    rig.advance_to(2_000);
    assert_eq!(rig.cloud.published.len(), 1);

    rig.command(AppCommand::ToggleMuted);
    rig.advance_to(4_000);
    assert_eq!(rig.cloud.published.len(), 2);
    assert!(rig.cloud.published[1].mute);
}

#[test]
fn position_request_follows_reconfigured_interval() {
    let mut rig = Rig::new();
    rig.command(AppCommand::SetPositionInterval { interval_ms: 60_000 });
    rig.advance_to(180_000);
    assert_eq!(rig.cloud.position_requests, 3);

    // Zero fires on every tick.
    rig.command(AppCommand::SetPositionInterval { interval_ms: 0 });
    rig.advance_to(181_000);
    assert_eq!(rig.cloud.position_requests, 5);
}
