//! GPIO / peripheral pin assignments for the PetHome gauge board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Gauge servo (SG90-class hobby servo)
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the servo signal line.
pub const SERVO_GPIO: i32 = 1;
/// Hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// Pulse width at 0°.
pub const SERVO_MIN_PULSE_US: u32 = 500;
/// Pulse width at 180°.
pub const SERVO_MAX_PULSE_US: u32 = 2500;

// ---------------------------------------------------------------------------
// Piezo buzzer
// ---------------------------------------------------------------------------

/// LEDC PWM output driving the piezo; frequency is set per tone.
pub const BUZZER_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Indicator LEDs
// ---------------------------------------------------------------------------

/// Digital output, active HIGH.
pub const HOME_LED_GPIO: i32 = 7;
/// Mute indicator, digital output, active HIGH.  Lit while muted.
pub const MUTE_LED_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

pub const ACK_BUTTON_GPIO: i32 = 4;
pub const MUTE_BUTTON_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// LEDC allocation
// ---------------------------------------------------------------------------

/// LEDC timer for the servo (fixed 50 Hz).
pub const LEDC_TIMER_SERVO: u32 = 0;
/// LEDC timer for the buzzer (frequency retuned per tone).
pub const LEDC_TIMER_BUZZER: u32 = 1;
pub const LEDC_CH_SERVO: u32 = 0;
pub const LEDC_CH_BUZZER: u32 = 1;
/// Servo timer resolution (bits).  14 bits gives ~1.2 µs steps at 50 Hz.
pub const SERVO_DUTY_BITS: u32 = 14;
/// Buzzer timer resolution (bits).
pub const BUZZER_DUTY_BITS: u32 = 10;
