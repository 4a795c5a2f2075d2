//! Debounced multi-click detector.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up.  The control loop
//! samples the pin every tick and feeds the level into
//! [`ClickButton::update`], which runs the debounce + click-count state
//! machine.  All timing uses `wrapping_sub` on the `u32` millisecond clock.
//!
//! ## Gesture detection
//!
//! | Gesture      | Condition                                         | Event    |
//! |--------------|---------------------------------------------------|----------|
//! | Single click | One release, no further press within the window   | `Single` |
//! | Double click | Two or more releases, each within the window      | `Double` |
//!
//! A gesture is reported once the multi-click window after the last
//! release has expired.

use crate::input::ClickEvent;

pub struct ClickButton {
    debounce_ms: u32,
    multiclick_ms: u32,
    /// Last raw sample and when it last changed.
    raw: bool,
    raw_since_ms: u32,
    /// Debounced level.
    stable: bool,
    clicks: u8,
    last_release_ms: u32,
}

impl ClickButton {
    pub fn new(debounce_ms: u32, multiclick_ms: u32) -> Self {
        Self {
            debounce_ms,
            multiclick_ms,
            raw: false,
            raw_since_ms: 0,
            stable: false,
            clicks: 0,
            last_release_ms: 0,
        }
    }

    /// Feed one sample (`pressed` = switch closed).  Returns a classified
    /// gesture, if one just completed.
    pub fn update(&mut self, now_ms: u32, pressed: bool) -> Option<ClickEvent> {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since_ms = now_ms;
        }

        if self.raw != self.stable && now_ms.wrapping_sub(self.raw_since_ms) >= self.debounce_ms {
            self.stable = self.raw;
            if !self.stable {
                self.clicks = self.clicks.saturating_add(1);
                self.last_release_ms = now_ms;
            }
        }

        if !self.stable
            && self.clicks > 0
            && now_ms.wrapping_sub(self.last_release_ms) > self.multiclick_ms
        {
            let clicks = core::mem::take(&mut self.clicks);
            return Some(if clicks == 1 {
                ClickEvent::Single
            } else {
                ClickEvent::Double
            });
        }

        None
    }
}
