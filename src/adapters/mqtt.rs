//! MQTT cloud adapter.
//!
//! Implements [`CloudPort`] on top of the broker connection and feeds
//! inbound messages through [`CloudRouter`] into an [`Inbox`].
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp-idf-svc` MQTT client.  A dedicated
//!   thread pumps the connection, (re)subscribes on every connect and
//!   answers remote calls on `<prefix>/fn/<name>/result`.
//! - **all other targets**: simulation stub that records every outbound
//!   publish and lets tests inject inbound messages with
//!   [`MqttCloud::deliver`].

use log::{info, warn};

use super::cloud::{self, CloudRouter, Inbound};
use crate::alert::StateSnapshot;
use crate::app::inbox::Inbox;
use crate::app::ports::CloudPort;

#[cfg(target_os = "espidf")]
use std::sync::{Arc, Mutex, PoisonError};

#[cfg(target_os = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};

use crate::error::CommsError;

/// Route one inbound message, queue its command and send the reply.
///
/// The reply is sent even when the inbox is full: it depends only on the
/// payload, so the caller still learns how its argument was read.
pub fn handle_inbound(
    router: &CloudRouter,
    inbox: &Inbox,
    topic: &str,
    payload: &[u8],
    mut reply: impl FnMut(&str, &[u8]),
) -> Option<Inbound> {
    let inbound = router.route(topic, payload)?;
    if inbox.post(inbound.command).is_err() {
        warn!("MQTT: command from '{}' dropped", topic);
    }
    if let Some((command, value)) = inbound.reply {
        let body = cloud::reply_payload(value);
        reply(router.reply_topic(command).as_str(), body.as_bytes());
    }
    Some(inbound)
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct MqttCloud {
    router: Arc<CloudRouter>,
    client: Arc<Mutex<EspMqttClient<'static>>>,
}

#[cfg(target_os = "espidf")]
impl MqttCloud {
    /// Connect to the broker and start the connection thread.
    pub fn connect(
        url: &str,
        client_id: &str,
        router: CloudRouter,
        inbox: &'static Inbox,
    ) -> Result<Self, CommsError> {
        let conf = MqttClientConfiguration {
            client_id: Some(client_id),
            ..Default::default()
        };
        let (client, mut connection) = EspMqttClient::new(url, &conf).map_err(|e| {
            warn!("MQTT: client init failed ({})", e);
            CommsError::MqttConnectFailed
        })?;

        let router = Arc::new(router);
        let client = Arc::new(Mutex::new(client));

        let pump_router = Arc::clone(&router);
        let pump_client = Arc::clone(&client);
        std::thread::Builder::new()
            .name("mqtt".into())
            .stack_size(6 * 1024)
            .spawn(move || {
                while let Ok(event) = connection.next() {
                    match event.payload() {
                        EventPayload::Connected(_) => {
                            info!("MQTT: connected");
                            if let Err(e) = subscribe_all(&pump_client, &pump_router) {
                                warn!("MQTT: {}, remote calls unavailable until reconnect", e);
                            }
                        }
                        EventPayload::Disconnected => warn!("MQTT: disconnected"),
                        EventPayload::Received {
                            topic: Some(topic),
                            data,
                            ..
                        } => {
                            handle_inbound(&pump_router, inbox, topic, data, |t, body| {
                                if let Err(e) = enqueue(&pump_client, t, body, false) {
                                    warn!("MQTT: {} (reply on '{}')", e, t);
                                }
                            });
                        }
                        _ => {}
                    }
                }
                warn!("MQTT: connection closed");
            })
            .map_err(|_| CommsError::MqttConnectFailed)?;

        info!("MQTT: client started for {}", url);
        Ok(Self { router, client })
    }

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> Result<(), CommsError> {
        enqueue(&self.client, topic, payload, retain)
    }
}

#[cfg(target_os = "espidf")]
fn enqueue(
    client: &Mutex<EspMqttClient<'static>>,
    topic: &str,
    payload: &[u8],
    retain: bool,
) -> Result<(), CommsError> {
    let mut c = client.lock().unwrap_or_else(PoisonError::into_inner);
    c.enqueue(topic, QoS::AtLeastOnce, retain, payload)
        .map(|_| ())
        .map_err(|_| CommsError::MqttPublishFailed)
}

/// Subscribe to every inbound topic; stops at the first refusal.
#[cfg(target_os = "espidf")]
fn subscribe_all(client: &Mutex<EspMqttClient<'static>>, router: &CloudRouter) -> Result<(), CommsError> {
    let mut c = client.lock().unwrap_or_else(PoisonError::into_inner);
    for topic in router.subscriptions() {
        c.subscribe(&topic, QoS::AtLeastOnce).map_err(|_| {
            warn!("MQTT: subscribe '{}' refused", topic);
            CommsError::MqttSubscribeFailed
        })?;
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct MqttCloud {
    router: CloudRouter,
    inbox: &'static Inbox,
    published: Vec<(String, Vec<u8>)>,
}

#[cfg(not(target_os = "espidf"))]
impl MqttCloud {
    pub fn new(router: CloudRouter, inbox: &'static Inbox) -> Self {
        info!("MQTT(sim): topics under '{}'", router.prefix());
        Self {
            router,
            inbox,
            published: Vec::new(),
        }
    }

    /// Simulate the broker delivering one message to the device.
    pub fn deliver(&mut self, topic: &str, payload: &[u8]) -> Option<Inbound> {
        let published = &mut self.published;
        handle_inbound(&self.router, self.inbox, topic, payload, |t, body| {
            published.push((t.to_owned(), body.to_vec()));
        })
    }

    /// Every outbound `(topic, payload)` in publish order.
    pub fn published(&self) -> &[(String, Vec<u8>)] {
        &self.published
    }

    #[allow(clippy::unnecessary_wraps)]
    fn publish(&mut self, topic: &str, payload: &[u8], _retain: bool) -> Result<(), CommsError> {
        self.published.push((topic.to_owned(), payload.to_vec()));
        Ok(())
    }
}

impl CloudPort for MqttCloud {
    fn request_position(&mut self) {
        let topic = self.router.request_topic();
        if let Err(e) = self.publish(&topic, b"", false) {
            warn!("MQTT: {} (position request)", e);
        }
    }

    fn publish_state(&mut self, snapshot: &StateSnapshot) {
        let topic = self.router.state_topic();
        let sent = match cloud::state_payload(snapshot) {
            Ok(body) => self.publish(&topic, &body, true),
            Err(e) => {
                warn!("MQTT: state encode failed ({})", e);
                return;
            }
        };
        if let Err(e) = sent {
            warn!("MQTT: {} (state)", e);
        }
    }
}
