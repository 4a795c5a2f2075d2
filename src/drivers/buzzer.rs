//! Piezo buzzer driver.
//!
//! Tones are non-blocking: [`Buzzer::play`] starts the PWM and records a
//! deadline, and [`Buzzer::tick`] (called every control-loop iteration)
//! silences the output once the duration has passed.  The deadline check
//! uses `wrapping_sub`, so tones that straddle the clock wrap end on time.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

/// A PWM channel whose carrier frequency can be retuned.
pub trait TonePwm: SetDutyCycle {
    fn set_frequency_hz(&mut self, hz: u32) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveTone {
    started_ms: u32,
    duration_ms: u32,
}

pub struct Buzzer<P> {
    pwm: P,
    active: Option<ActiveTone>,
}

impl<P: TonePwm> Buzzer<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, active: None }
    }

    /// Start a tone at 50 % duty.  A tone already playing is replaced.
    pub fn play(&mut self, frequency_hz: u16, duration_ms: u32, now_ms: u32) {
        let started = self
            .pwm
            .set_frequency_hz(u32::from(frequency_hz))
            .and_then(|()| self.pwm.set_duty_cycle_percent(50));
        match started {
            Ok(()) => {
                self.active = Some(ActiveTone {
                    started_ms: now_ms,
                    duration_ms,
                });
            }
            Err(_) => {
                warn!("Buzzer: failed to start {} Hz tone", frequency_hz);
                self.silence();
            }
        }
    }

    /// Stop the tone once its duration has elapsed.
    pub fn tick(&mut self, now_ms: u32) {
        if let Some(tone) = self.active {
            if now_ms.wrapping_sub(tone.started_ms) >= tone.duration_ms {
                self.silence();
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    fn silence(&mut self) {
        if self.pwm.set_duty_cycle_fully_off().is_err() {
            warn!("Buzzer: failed to silence output");
        }
        self.active = None;
    }
}
