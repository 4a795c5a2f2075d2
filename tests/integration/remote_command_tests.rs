//! Cloud traffic end to end: broker message → router → inbox → AppService,
//! with replies and state publishes observed on the simulated MQTT link.

use pethome::adapters::cloud::CloudRouter;
use pethome::adapters::mqtt::MqttCloud;
use pethome::app::inbox::Inbox;
use pethome::app::service::AppService;
use pethome::config::AlertConfig;
use pethome::scheduler::TaskId;

use crate::mock_hw::{MockHardware, RecordingSink};

struct Device {
    app: AppService,
    mqtt: MqttCloud,
    inbox: &'static Inbox,
    hw: MockHardware,
    sink: RecordingSink,
}

impl Device {
    fn new(inbox: &'static Inbox) -> Self {
        Self {
            app: AppService::new(AlertConfig::default()),
            mqtt: MqttCloud::new(CloudRouter::new("pethome"), inbox),
            inbox,
            hw: MockHardware::new(),
            sink: RecordingSink::default(),
        }
    }

    /// Deliver one message and let the control loop drain the inbox.
    fn receive(&mut self, topic: &str, payload: &str) {
        self.mqtt.deliver(topic, payload.as_bytes());
        let (app, sink) = (&mut self.app, &mut self.sink);
        self.inbox.drain(|cmd| app.handle_command(cmd, sink));
    }

    fn tick(&mut self, now_ms: u32) {
        self.app
            .tick(now_ms, &mut self.hw, &mut self.mqtt, &mut self.sink);
    }

    fn last_reply(&self) -> Option<(&str, &[u8])> {
        self.mqtt
            .published()
            .iter()
            .rev()
            .find(|(t, _)| t.ends_with("/result"))
            .map(|(t, b)| (t.as_str(), b.as_slice()))
    }
}

#[test]
fn set_mute_true_replies_one() {
    static INBOX: Inbox = Inbox::new();
    let mut dev = Device::new(&INBOX);

    dev.receive("pethome/fn/setMute", "TRUE");
    assert!(dev.app.state().is_muted());
    assert_eq!(dev.last_reply(), Some(("pethome/fn/setMute/result", &b"1"[..])));
}

#[test]
fn set_mute_three_is_truthy_and_echoed() {
    static INBOX: Inbox = Inbox::new();
    let mut dev = Device::new(&INBOX);

    dev.receive("pethome/fn/setMute", "3");
    assert!(dev.app.state().is_muted());
    assert_eq!(dev.last_reply(), Some(("pethome/fn/setMute/result", &b"3"[..])));

    dev.receive("pethome/fn/setMute", "false");
    assert!(!dev.app.state().is_muted());
    assert_eq!(dev.last_reply(), Some(("pethome/fn/setMute/result", &b"0"[..])));
}

#[test]
fn set_distance_replies_truncated_value() {
    static INBOX: Inbox = Inbox::new();
    let mut dev = Device::new(&INBOX);

    dev.receive("pethome/fn/setDistance", "12.9");
    assert!((dev.app.state().distance() - 12.9).abs() < f64::EPSILON);
    assert_eq!(
        dev.last_reply(),
        Some(("pethome/fn/setDistance/result", &b"12"[..]))
    );
}

#[test]
fn malformed_distance_means_home() {
    static INBOX: Inbox = Inbox::new();
    let mut dev = Device::new(&INBOX);

    dev.receive("pethome/position", "no fix");
    assert_eq!(dev.app.state().distance(), 0.0);
    assert!(dev.app.state().is_home());
}

#[test]
fn acknowledge_remotely_then_revoke() {
    static INBOX: Inbox = Inbox::new();
    let mut dev = Device::new(&INBOX);

    dev.receive("pethome/position", "1.5");
    dev.receive("pethome/fn/setAcknowledged", "true");
    assert!(dev.app.state().is_acknowledged());

    dev.receive("pethome/fn/setAcknowledged", "0");
    assert!(!dev.app.state().is_acknowledged());
    assert!(dev.app.state().is_alerting());
}

#[test]
fn poll_interval_in_minutes() {
    static INBOX: Inbox = Inbox::new();
    let mut dev = Device::new(&INBOX);

    dev.receive("pethome/fn/setApiRequestIntervalMinutes", "2");
    assert_eq!(dev.app.task_interval_ms(TaskId::PositionRequest), 120_000);
    assert_eq!(
        dev.last_reply(),
        Some(("pethome/fn/setApiRequestIntervalMinutes/result", &b"2"[..]))
    );

    dev.tick(120_000);
    assert!(
        dev.mqtt
            .published()
            .iter()
            .any(|(t, body)| t == "pethome/request" && body.is_empty())
    );
}

#[test]
fn state_changes_are_published_as_json() {
    static INBOX: Inbox = Inbox::new();
    let mut dev = Device::new(&INBOX);

    dev.tick(10);
    dev.receive("pethome/fn/setMute", "1");
    dev.tick(20);

    let states: Vec<&[u8]> = dev
        .mqtt
        .published()
        .iter()
        .filter(|(t, _)| t == "pethome/state")
        .map(|(_, b)| b.as_slice())
        .collect();
    assert_eq!(
        states,
        vec![
            &br#"{"distance":50.0,"acknowledged":false,"mute":false}"#[..],
            &br#"{"distance":50.0,"acknowledged":false,"mute":true}"#[..],
        ]
    );
}
