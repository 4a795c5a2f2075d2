//! Gauge servo driver.
//!
//! Standard hobby servo on a 50 Hz PWM channel: 0.5 ms pulse = 0°,
//! 2.5 ms pulse = 180°.  Generic over any `embedded-hal` PWM channel, so
//! the host tests drive it with a recording mock and the target drives
//! it with an LEDC channel.

use embedded_hal::pwm::SetDutyCycle;
use log::info;

use crate::pins;

/// PWM frame length in microseconds.
const FRAME_US: u32 = 1_000_000 / pins::SERVO_PWM_FREQ_HZ;

/// Positions visited by [`ServoDriver::self_test`].
const SELF_TEST_SWEEP: [u8; 3] = [0, 90, 180];

/// Pulse width for `degrees` (clamped to 0–180).
pub fn pulse_width_us(degrees: u8) -> u32 {
    let deg = u32::from(degrees.min(180));
    pins::SERVO_MIN_PULSE_US + (pins::SERVO_MAX_PULSE_US - pins::SERVO_MIN_PULSE_US) * deg / 180
}

pub struct ServoDriver<P> {
    pwm: P,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: None }
    }

    /// Move to `degrees` (clamped to 0–180).
    pub fn set_angle(&mut self, degrees: u8) -> Result<(), P::Error> {
        let degrees = degrees.min(180);
        let pulse = pulse_width_us(degrees);
        // Both values fit in u16: pulse <= 2500, frame = 20000.
        self.pwm.set_duty_cycle_fraction(pulse as u16, FRAME_US as u16)?;
        self.angle = Some(degrees);
        Ok(())
    }

    /// Last commanded angle, `None` before the first move.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }

    /// Sweep 0° → 90° → 180° so a technician can see the full travel.
    /// `pause` is called between moves with the dwell time in ms.
    pub fn self_test(&mut self, mut pause: impl FnMut(u32)) -> Result<(), P::Error> {
        info!("Servo: self-test sweep");
        for (i, &deg) in SELF_TEST_SWEEP.iter().enumerate() {
            self.set_angle(deg)?;
            if i + 1 < SELF_TEST_SWEEP.len() {
                pause(1000);
            }
        }
        Ok(())
    }
}
