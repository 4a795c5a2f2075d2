//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production, stderr on host).

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(phase) => info!("START | phase={:?}", phase),
            AppEvent::PhaseChanged { from, to } => info!("STATE | {:?} -> {:?}", from, to),
            AppEvent::MuteChanged(muted) => info!("ALERT | mute={}", muted),
            AppEvent::DistanceUpdated(d) => info!("INPUT | distance={:.2}", d),
            AppEvent::PositionRequested => info!("CLOUD | position requested"),
            AppEvent::IntervalChanged { interval_ms } => {
                info!("CLOUD | position interval={}ms", interval_ms);
            }
            AppEvent::ServoMoved(deg) => debug!("GAUGE | servo={}°", deg),
            AppEvent::ToneStarted => info!("ALERT | tone"),
            AppEvent::StatePublished(s) => info!(
                "CLOUD | state distance={:.2} acknowledged={} mute={}",
                s.distance, s.acknowledged, s.mute
            ),
        }
    }
}
