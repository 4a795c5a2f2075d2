//! Application core — pure domain logic, zero I/O.
//!
//! Orchestrates the alert state machine and the periodic gauge tasks.
//! All interaction with hardware and the cloud happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod inbox;
pub mod ports;
pub mod service;
