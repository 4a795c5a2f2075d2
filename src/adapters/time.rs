//! Monotonic clock adapter.
//!
//! - **`target_os = "espidf"`** — `esp_timer_get_time()` (µs since boot).
//! - **other targets** — `std::time::Instant`, for host-side simulation.
//!
//! Both truncate to a `u32` millisecond count that wraps after ~49.7 days;
//! the scheduler compares timestamps with `wrapping_sub`.

use crate::app::ports::TimePort;

pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl TimePort for SystemClock {
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u32 {
        // SAFETY: reads the ESP-IDF high-resolution timer; no preconditions.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        (us / 1000) as u32
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}
