//! Cloud topic routing.
//!
//! Maps the pub/sub topic space onto the application core.  Everything
//! here is transport-agnostic and host-tested; the MQTT adapter only
//! moves bytes.
//!
//! | Direction | Topic                         | Payload                       |
//! |-----------|-------------------------------|-------------------------------|
//! | in        | `<prefix>/position`           | distance (decimal text)       |
//! | in        | `<prefix>/fn/<name>`          | remote call argument          |
//! | out       | `<prefix>/fn/<name>/result`   | integer reply                 |
//! | out       | `<prefix>/request`            | empty (position request)      |
//! | out       | `<prefix>/state`              | JSON `{distance,acknowledged,mute}` |

use core::fmt::Write;

use heapless::String;
use log::{debug, warn};

use crate::alert::StateSnapshot;
use crate::app::commands::AppCommand;
use crate::input::{self, RemoteCommand};

/// Topic buffer.  Prefix (≤ 32 bytes) plus the longest suffix fits.
pub type Topic = String<96>;

/// A routed inbound message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inbound {
    pub command: AppCommand,
    /// Remote-call reply, `None` for plain distance updates.
    pub reply: Option<(RemoteCommand, i32)>,
}

pub struct CloudRouter {
    prefix: String<32>,
}

impl CloudRouter {
    pub fn new(prefix: &str) -> Self {
        let mut p = String::new();
        for c in prefix.trim_end_matches('/').chars() {
            if p.push(c).is_err() {
                warn!("Cloud: topic prefix truncated to '{}'", p);
                break;
            }
        }
        Self { prefix: p }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn position_topic(&self) -> Topic {
        self.topic(format_args!("position"))
    }

    pub fn request_topic(&self) -> Topic {
        self.topic(format_args!("request"))
    }

    pub fn state_topic(&self) -> Topic {
        self.topic(format_args!("state"))
    }

    pub fn function_topic(&self, command: RemoteCommand) -> Topic {
        self.topic(format_args!("fn/{}", command.name()))
    }

    pub fn reply_topic(&self, command: RemoteCommand) -> Topic {
        self.topic(format_args!("fn/{}/result", command.name()))
    }

    /// Every topic the device must subscribe to.
    pub fn subscriptions(&self) -> heapless::Vec<Topic, 5> {
        let mut subs = heapless::Vec::new();
        // Capacity is exactly 1 + RemoteCommand::ALL.len().
        let _ = subs.push(self.position_topic());
        for cmd in RemoteCommand::ALL {
            let _ = subs.push(self.function_topic(cmd));
        }
        subs
    }

    /// Route one inbound message.  Unknown topics are ignored.
    pub fn route(&self, topic: &str, payload: &[u8]) -> Option<Inbound> {
        let rest = topic.strip_prefix(self.prefix.as_str())?.strip_prefix('/')?;
        let text = core::str::from_utf8(payload).unwrap_or_else(|_| {
            warn!("Cloud: non-UTF-8 payload on '{}', treated as empty", topic);
            ""
        });

        if rest == "position" {
            return Some(Inbound {
                command: input::route_distance_update(text),
                reply: None,
            });
        }

        let Some(command) = rest.strip_prefix("fn/").and_then(RemoteCommand::from_name) else {
            debug!("Cloud: ignoring topic '{}'", topic);
            return None;
        };
        let routed = input::route_remote(command, text);
        Some(Inbound {
            command: routed.command,
            reply: Some((command, routed.reply)),
        })
    }

    fn topic(&self, suffix: core::fmt::Arguments<'_>) -> Topic {
        let mut t = Topic::new();
        // Cannot overflow: prefix ≤ 32 bytes, longest suffix < 64 bytes.
        let _ = write!(t, "{}/{}", self.prefix, suffix);
        t
    }
}

/// Integer reply payload for a remote call.
pub fn reply_payload(reply: i32) -> String<12> {
    let mut s = String::new();
    // i32::MIN is 11 characters.
    let _ = write!(s, "{}", reply);
    s
}

/// JSON body for the `state` topic.
pub fn state_payload(snapshot: &StateSnapshot) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(snapshot)
}
