//! Actuator and input drivers for the gauge board.

pub mod button;
pub mod buzzer;
pub mod indicator_led;
pub mod servo;
pub mod watchdog;
