//! Hardware adapters — bridge the gauge peripherals to the port traits.
//!
//! [`GaugeHardware`] owns the servo, the home and mute LEDs and the buzzer and
//! exposes them through [`ActuatorPort`].  [`ButtonPanel`] owns the two
//! push buttons and exposes them through [`ButtonPort`].  Both are generic
//! over `embedded-hal` traits: the firmware plugs in `esp_idf_svc::hal`
//! drivers, the host tests plug in mocks.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::{debug, warn};

use crate::app::ports::{ActuatorPort, ButtonPort};
use crate::config::AlertConfig;
use crate::drivers::button::ClickButton;
use crate::drivers::buzzer::{Buzzer, TonePwm};
use crate::drivers::indicator_led::IndicatorLed;
use crate::drivers::servo::ServoDriver;
use crate::input::{ButtonId, ClickEvent};

// ───────────────────────────────────────────────────────────────
// Actuators
// ───────────────────────────────────────────────────────────────

/// Servo + home LED + mute LED + buzzer behind [`ActuatorPort`].
pub struct GaugeHardware<S, L, B> {
    servo: ServoDriver<S>,
    led: IndicatorLed<L>,
    mute_led: IndicatorLed<L>,
    buzzer: Buzzer<B>,
    now_ms: u32,
}

impl<S, L, B> GaugeHardware<S, L, B>
where
    S: SetDutyCycle,
    L: OutputPin,
    B: TonePwm,
{
    pub fn new(
        servo: ServoDriver<S>,
        led: IndicatorLed<L>,
        mute_led: IndicatorLed<L>,
        buzzer: Buzzer<B>,
    ) -> Self {
        Self {
            servo,
            led,
            mute_led,
            buzzer,
            now_ms: 0,
        }
    }

    /// Advance the adapter clock and end any expired tone.  Call once per
    /// control-loop iteration, before the service tick.
    pub fn tick(&mut self, now_ms: u32) {
        self.now_ms = now_ms;
        self.buzzer.tick(now_ms);
    }

    pub fn servo_mut(&mut self) -> &mut ServoDriver<S> {
        &mut self.servo
    }

    pub fn servo_angle(&self) -> Option<u8> {
        self.servo.angle()
    }

    pub fn is_led_on(&self) -> bool {
        self.led.is_on()
    }

    pub fn is_mute_led_on(&self) -> bool {
        self.mute_led.is_on()
    }

    pub fn is_tone_playing(&self) -> bool {
        self.buzzer.is_playing()
    }
}

impl<S, L, B> ActuatorPort for GaugeHardware<S, L, B>
where
    S: SetDutyCycle,
    L: OutputPin,
    B: TonePwm,
{
    fn set_servo_angle(&mut self, degrees: u8) {
        if self.servo.set_angle(degrees).is_err() {
            warn!("Servo: failed to move to {}°", degrees);
        }
    }

    fn set_led(&mut self, on: bool) {
        if self.led.set(on).is_err() {
            warn!("LED: failed to switch {}", if on { "on" } else { "off" });
        }
    }

    fn set_mute_led(&mut self, on: bool) {
        if self.mute_led.set(on).is_err() {
            warn!("Mute LED: failed to switch {}", if on { "on" } else { "off" });
        }
    }

    fn play_tone(&mut self, frequency_hz: u16, duration_ms: u32) {
        self.buzzer.play(frequency_hz, duration_ms, self.now_ms);
    }
}

// ───────────────────────────────────────────────────────────────
// Buttons
// ───────────────────────────────────────────────────────────────

/// Acknowledge + mute buttons (active-low) behind [`ButtonPort`].
pub struct ButtonPanel<A, M> {
    ack_pin: A,
    mute_pin: M,
    ack: ClickButton,
    mute: ClickButton,
}

impl<A: InputPin, M: InputPin> ButtonPanel<A, M> {
    pub fn new(ack_pin: A, mute_pin: M, config: &AlertConfig) -> Self {
        let button = || ClickButton::new(config.button_debounce_ms, config.button_multiclick_ms);
        Self {
            ack_pin,
            mute_pin,
            ack: button(),
            mute: button(),
        }
    }
}

impl<A: InputPin, M: InputPin> ButtonPort for ButtonPanel<A, M> {
    fn poll_click(&mut self, button: ButtonId, now_ms: u32) -> Option<ClickEvent> {
        let (level, detector) = match button {
            ButtonId::Acknowledge => (self.ack_pin.is_low().ok(), &mut self.ack),
            ButtonId::Mute => (self.mute_pin.is_low().ok(), &mut self.mute),
        };
        // A read error counts as "released" so a flaky pin never produces clicks.
        let pressed = level.unwrap_or_else(|| {
            debug!("Button {:?}: read failed", button);
            false
        });
        detector.update(now_ms, pressed)
    }
}
