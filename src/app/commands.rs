//! Inbound commands to the application service.
//!
//! These are already-parsed, typed mutations.  Raw payloads from the
//! cloud or remote functions are turned into commands by
//! [`input`](crate::input), so a command is always `Copy` and can cross
//! the inbound channel without allocation.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppCommand {
    /// New distance reading (tracker update or remote `setDistance`).
    SetDistance(f64),

    /// Set or revoke the home acknowledgement.
    SetAcknowledged(bool),

    /// Set the mute flag.
    SetMuted(bool),

    /// Flip the mute flag (mute button).
    ToggleMuted,

    /// Reconfigure the position-request interval.
    SetPositionInterval { interval_ms: u32 },
}
