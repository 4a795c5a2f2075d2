//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to                    |
//! |------------|----------------|--------------------------------|
//! | `hardware` | ActuatorPort   | servo PWM, LED GPIO, buzzer PWM|
//! |            | ButtonPort     | button GPIOs                   |
//! | `cloud`    | —              | topic routing, JSON payloads   |
//! | `mqtt`     | CloudPort      | MQTT broker                    |
//! | `log_sink` | EventSink      | Serial log output              |
//! | `time`     | TimePort       | ESP32 system timer             |
//! | `wifi`     | —              | ESP-IDF WiFi STA               |

pub mod cloud;
pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod time;
pub mod wifi;
