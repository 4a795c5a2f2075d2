//! Rate-limited action trigger.
//!
//! A [`Cooldown`] binds one action at construction and runs it at most
//! once per [`update`](Cooldown::update), and only once `interval_ms` has
//! passed since the last firing.
//!
//! Elapsed time is `now.wrapping_sub(last_fired)` on the `u32`
//! millisecond clock.  That difference stays correct across the ~49.7 day
//! wrap of the counter, where a plain `now >= last_fired + interval`
//! comparison would stall or fire continuously.
//!
//! The action receives a caller-supplied context on every firing, so it
//! can reach shared state without capturing it:
//!
//! ```
//! use pethome::cooldown::Cooldown;
//!
//! let mut fired = 0u32;
//! let mut cd = Cooldown::new(1_000, |n: &mut u32| *n += 1);
//! cd.update(1_000, &mut fired);
//! cd.update(1_500, &mut fired);
//! assert_eq!(fired, 1);
//! ```

/// Interval-gated action.
pub struct Cooldown<F> {
    interval_ms: u32,
    last_fired_ms: u32,
    action: F,
}

impl<F> Cooldown<F> {
    /// Create a cooldown that has "last fired" at time zero.
    ///
    /// An interval of zero is accepted and fires on every update.
    pub fn new(interval_ms: u32, action: F) -> Self {
        Self {
            interval_ms,
            last_fired_ms: 0,
            action,
        }
    }

    /// Run the action if the interval has elapsed.  Returns whether it fired.
    pub fn update<C: ?Sized>(&mut self, now_ms: u32, ctx: &mut C) -> bool
    where
        F: FnMut(&mut C),
    {
        if now_ms.wrapping_sub(self.last_fired_ms) >= self.interval_ms {
            self.last_fired_ms = now_ms;
            (self.action)(ctx);
            true
        } else {
            false
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Replace the interval.  The last firing time is kept, so a shorter
    /// interval may fire on the next update and a longer one is measured
    /// from the last firing rather than from now.
    pub fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms;
    }

    /// Timestamp of the last firing (0 before the first one).
    pub fn last_fired_ms(&self) -> u32 {
        self.last_fired_ms
    }
}

impl<F> core::fmt::Debug for Cooldown<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cooldown")
            .field("interval_ms", &self.interval_ms)
            .field("last_fired_ms", &self.last_fired_ms)
            .finish_non_exhaustive()
    }
}
