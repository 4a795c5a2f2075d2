//! Inbound command channel.
//!
//! The cloud transport delivers distance updates and remote calls on its
//! own thread.  It routes them to [`AppCommand`]s there and posts them
//! here; the control loop drains the channel once per tick and stays the
//! only mutator of the alert state.
//!
//! ```text
//! ┌──────────────┐  AppCommand  ┌──────────────┐
//! │  MQTT task   │─────────────▶│ Control Loop │
//! │  (callback)  │              │  (sync)      │
//! └──────────────┘              └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use super::commands::AppCommand;
use crate::error::CommsError;

/// Channel depth for inbound commands.
const INBOX_DEPTH: usize = 8;

/// Bounded MPMC queue between transport and control loop.
pub struct Inbox {
    channel: Channel<CriticalSectionRawMutex, AppCommand, INBOX_DEPTH>,
}

impl Inbox {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueue without blocking.  A full inbox drops the command.
    pub fn post(&self, cmd: AppCommand) -> Result<(), CommsError> {
        self.channel.try_send(cmd).map_err(|_| {
            warn!("Inbox: full, dropping {:?}", cmd);
            CommsError::InboxFull
        })
    }

    /// Hand every pending command to `handler`, in arrival order.
    pub fn drain(&self, mut handler: impl FnMut(AppCommand)) {
        while let Ok(cmd) = self.channel.try_receive() {
            handler(cmd);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide inbox shared by the transport callback and the control loop.
pub static INBOX: Inbox = Inbox::new();
