//! PetHome Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GaugeHardware     ButtonPanel    MqttCloud     SystemClock    │
//! │  (ActuatorPort)    (ButtonPort)   (CloudPort)   (TimePort)     │
//! │  LogEventSink      WiFi STA       INBOX (mqtt thread → loop)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  AlertState · TaskSet (4 cooldowns) · LedBlinker       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{OutputPin, PinDriver, Pull};
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::prelude::*;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::{EspError, esp, ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_set_freq};
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use pethome::adapters::cloud::CloudRouter;
use pethome::adapters::hardware::{ButtonPanel, GaugeHardware};
use pethome::adapters::log_sink::LogEventSink;
use pethome::adapters::mqtt::MqttCloud;
use pethome::adapters::time::SystemClock;
use pethome::adapters::wifi;
use pethome::app::inbox::INBOX;
use pethome::app::ports::TimePort;
use pethome::app::service::AppService;
use pethome::config::{AlertConfig, NetworkConfig};
use pethome::drivers::buzzer::{Buzzer, TonePwm};
use pethome::drivers::indicator_led::IndicatorLed;
use pethome::drivers::servo::ServoDriver;
use pethome::drivers::watchdog::Watchdog;
use pethome::error::{self, CommsError};
use pethome::pins;

// ── LEDC channel as an embedded-hal PWM ───────────────────────

struct LedcPwm<'d> {
    driver: LedcDriver<'d>,
    timer: u32,
}

impl embedded_hal::pwm::ErrorType for LedcPwm<'_> {
    type Error = EspError;
}

impl embedded_hal::pwm::SetDutyCycle for LedcPwm<'_> {
    fn max_duty_cycle(&self) -> u16 {
        self.driver.get_max_duty() as u16
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), EspError> {
        self.driver.set_duty(u32::from(duty))
    }
}

impl TonePwm for LedcPwm<'_> {
    fn set_frequency_hz(&mut self, hz: u32) -> Result<(), EspError> {
        // SAFETY: the timer was configured by `LedcTimerDriver` and outlives
        // this channel.
        esp!(unsafe { ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, self.timer, hz) })
    }
}

/// Use `candidate` if it validates, otherwise fall back to the defaults.
fn load_config(candidate: AlertConfig) -> AlertConfig {
    match candidate.validate() {
        Ok(()) => candidate,
        Err(e) => {
            warn!("Config rejected ({}), using defaults", e);
            AlertConfig::default()
        }
    }
}

/// Join the network and start the MQTT link.  The Wi-Fi handle must stay
/// alive for as long as the cloud link is used.
fn connect_cloud(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: Option<EspDefaultNvsPartition>,
    net: &NetworkConfig,
) -> error::Result<(BlockingWifi<EspWifi<'static>>, MqttCloud)> {
    let wifi_link = wifi::connect(modem, sysloop, nvs, net).map_err(|e| {
        warn!("WiFi: {}", e);
        CommsError::from(e)
    })?;
    let router = CloudRouter::new(&net.topic_prefix);
    let cloud = MqttCloud::connect(&net.mqtt_url, &net.topic_prefix, router, &INBOX)?;
    Ok((wifi_link, cloud))
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PetHome v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config(AlertConfig::default());
    let net = NetworkConfig::default();

    let watchdog = Watchdog::default();

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take().ok();

    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(pins::SERVO_PWM_FREQ_HZ.Hz())
            .resolution(Resolution::Bits14),
    )?;
    let servo_pwm = LedcPwm {
        driver: LedcDriver::new(peripherals.ledc.channel0, &servo_timer, peripherals.pins.gpio1)?,
        timer: pins::LEDC_TIMER_SERVO,
    };

    let buzzer_timer = LedcTimerDriver::new(
        peripherals.ledc.timer1,
        &TimerConfig::default()
            .frequency(u32::from(config.tone_frequency_hz).Hz())
            .resolution(Resolution::Bits10),
    )?;
    let mut buzzer_pwm = LedcPwm {
        driver: LedcDriver::new(peripherals.ledc.channel1, &buzzer_timer, peripherals.pins.gpio2)?,
        timer: pins::LEDC_TIMER_BUZZER,
    };
    buzzer_pwm.driver.set_duty(0)?;

    // Both LEDs share one driver type.
    let led_pin = PinDriver::output(peripherals.pins.gpio7.downgrade_output())?;
    let mute_led_pin = PinDriver::output(peripherals.pins.gpio6.downgrade_output())?;

    let mut ack_pin = PinDriver::input(peripherals.pins.gpio4)?;
    ack_pin.set_pull(Pull::Up)?;
    let mut mute_pin = PinDriver::input(peripherals.pins.gpio5)?;
    mute_pin.set_pull(Pull::Up)?;

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = GaugeHardware::new(
        ServoDriver::new(servo_pwm),
        IndicatorLed::new(led_pin),
        IndicatorLed::new(mute_led_pin),
        Buzzer::new(buzzer_pwm),
    );
    if let Err(e) = hw.servo_mut().self_test(FreeRtos::delay_ms) {
        warn!("Servo self-test failed: {}", e);
    }

    let mut buttons = ButtonPanel::new(ack_pin, mute_pin, &config);
    let clock = SystemClock::new();
    let mut log_sink = LogEventSink::new();

    // ── 5. Network ────────────────────────────────────────────
    // Without a link the gauge still runs on local input.
    let (_wifi_link, mut cloud) = match connect_cloud(peripherals.modem, sysloop, nvs, &net) {
        Ok((wifi_link, cloud)) => (Some(wifi_link), Some(cloud)),
        Err(e) => {
            error!("Cloud unavailable ({}), running offline", e);
            (None, None)
        }
    };

    // ── 6. Application service ────────────────────────────────
    let mut app = AppService::new(config.clone());
    app.start(&mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        let now = clock.now_ms();

        INBOX.drain(|cmd| app.handle_command(cmd, &mut log_sink));
        app.poll_buttons(now, &mut buttons, &mut log_sink);

        hw.tick(now);
        app.tick(now, &mut hw, &mut cloud, &mut log_sink);

        watchdog.feed();
        FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}
