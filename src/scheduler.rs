//! Periodic task set.
//!
//! Four independently timed tasks, each a [`Cooldown`] bound at
//! construction to a task function.  Task functions receive a
//! [`TaskContext`] that borrows the alert state, the LED blinker and the
//! ports for the duration of one tick; nothing is captured.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  TaskSet::run(now)        fixed order, once per tick       │
//! │                                                            │
//! │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐    │
//! │  │ position │─▶│  servo   │─▶│   tone   │─▶│   LED    │    │
//! │  │  5 min   │  │   5 s    │  │   5 s    │  │  500 ms  │    │
//! │  └────┬─────┘  └────┬─────┘  └────┬─────┘  └────┬─────┘    │
//! │       ▼             ▼             ▼             ▼          │
//! │   CloudPort     ActuatorPort  ActuatorPort  ActuatorPort   │
//! └────────────────────────────────────────────────────────────┘
//! ```

use log::info;

use crate::alert::AlertState;
use crate::alert::policy::{LedBlinker, servo_angle, tone_enabled};
use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, CloudPort, EventSink};
use crate::config::AlertConfig;
use crate::cooldown::Cooldown;

/// Everything a task may read or drive during one tick.
pub struct TaskContext<'a> {
    pub state: &'a AlertState,
    pub blinker: &'a mut LedBlinker,
    pub config: &'a AlertConfig,
    pub hw: &'a mut dyn ActuatorPort,
    pub cloud: &'a mut dyn CloudPort,
    pub sink: &'a mut dyn EventSink,
}

/// Signature shared by every periodic task.
pub type TaskFn = fn(&mut TaskContext<'_>);

/// Identifies a task in the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskId {
    PositionRequest,
    Servo,
    Tone,
    Led,
}

impl TaskId {
    /// Execution order within a tick.
    pub const ORDER: [Self; 4] = [Self::PositionRequest, Self::Servo, Self::Tone, Self::Led];
}

/// The four periodic tasks of the gauge.
#[derive(Debug)]
pub struct TaskSet {
    position: Cooldown<TaskFn>,
    servo: Cooldown<TaskFn>,
    tone: Cooldown<TaskFn>,
    led: Cooldown<TaskFn>,
}

impl TaskSet {
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            position: Cooldown::new(config.position_request_interval_ms, request_position as TaskFn),
            servo: Cooldown::new(config.servo_interval_ms, update_servo as TaskFn),
            tone: Cooldown::new(config.tone_interval_ms, play_tone as TaskFn),
            led: Cooldown::new(config.led_interval_ms, update_led as TaskFn),
        }
    }

    /// Update every cooldown in [`TaskId::ORDER`].  Returns the tasks that
    /// fired, in firing order.
    pub fn run(&mut self, now_ms: u32, ctx: &mut TaskContext<'_>) -> heapless::Vec<TaskId, 4> {
        let mut fired = heapless::Vec::new();
        for id in TaskId::ORDER {
            if self.cooldown_mut(id).update(now_ms, ctx) {
                // Capacity equals the number of tasks.
                let _ = fired.push(id);
            }
        }
        fired
    }

    pub fn interval_ms(&self, id: TaskId) -> u32 {
        self.cooldown(id).interval_ms()
    }

    pub fn set_interval_ms(&mut self, id: TaskId, interval_ms: u32) {
        info!("Tasks: {:?} interval -> {} ms", id, interval_ms);
        self.cooldown_mut(id).set_interval_ms(interval_ms);
    }

    fn cooldown(&self, id: TaskId) -> &Cooldown<TaskFn> {
        match id {
            TaskId::PositionRequest => &self.position,
            TaskId::Servo => &self.servo,
            TaskId::Tone => &self.tone,
            TaskId::Led => &self.led,
        }
    }

    fn cooldown_mut(&mut self, id: TaskId) -> &mut Cooldown<TaskFn> {
        match id {
            TaskId::PositionRequest => &mut self.position,
            TaskId::Servo => &mut self.servo,
            TaskId::Tone => &mut self.tone,
            TaskId::Led => &mut self.led,
        }
    }
}

// ── Task functions ────────────────────────────────────────────

fn request_position(ctx: &mut TaskContext<'_>) {
    info!("Tasks: requesting position");
    ctx.cloud.request_position();
    ctx.sink.emit(&AppEvent::PositionRequested);
}

fn update_servo(ctx: &mut TaskContext<'_>) {
    let angle = servo_angle(ctx.state.distance(), ctx.config.max_distance, &ctx.config.servo);
    ctx.hw.set_servo_angle(angle);
    ctx.sink.emit(&AppEvent::ServoMoved(angle));
}

fn play_tone(ctx: &mut TaskContext<'_>) {
    if tone_enabled(ctx.state) {
        ctx.hw.play_tone(ctx.config.tone_frequency_hz, ctx.config.tone_duration_ms);
        ctx.sink.emit(&AppEvent::ToneStarted);
    }
}

fn update_led(ctx: &mut TaskContext<'_>) {
    let on = ctx.blinker.next(ctx.state);
    ctx.hw.set_led(on);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::StateSnapshot;

    #[derive(Default)]
    struct Recorder {
        angles: Vec<u8>,
        leds: Vec<bool>,
        tones: u32,
        requests: u32,
    }

    impl ActuatorPort for Recorder {
        fn set_servo_angle(&mut self, degrees: u8) {
            self.angles.push(degrees);
        }
        fn set_led(&mut self, on: bool) {
            self.leds.push(on);
        }
        fn set_mute_led(&mut self, _on: bool) {}
        fn play_tone(&mut self, _frequency_hz: u16, _duration_ms: u32) {
            self.tones += 1;
        }
    }

    impl CloudPort for Recorder {
        fn request_position(&mut self) {
            self.requests += 1;
        }
        fn publish_state(&mut self, _snapshot: &StateSnapshot) {}
    }

    struct NullSink;
    impl EventSink for NullSink {
        fn emit(&mut self, _event: &AppEvent) {}
    }

    fn run_at(
        tasks: &mut TaskSet,
        now: u32,
        state: &AlertState,
        blinker: &mut LedBlinker,
        hw: &mut Recorder,
        cloud: &mut Recorder,
    ) -> heapless::Vec<TaskId, 4> {
        let config = AlertConfig::default();
        let mut sink = NullSink;
        let mut ctx = TaskContext {
            state,
            blinker,
            config: &config,
            hw,
            cloud,
            sink: &mut sink,
        };
        tasks.run(now, &mut ctx)
    }

    #[test]
    fn all_tasks_fire_in_order_once_due() {
        let config = AlertConfig::default();
        let mut tasks = TaskSet::new(&config);
        let state = AlertState::new(&config);
        let mut blinker = LedBlinker::new();
        let (mut hw, mut cloud) = (Recorder::default(), Recorder::default());

        let fired = run_at(
            &mut tasks,
            config.position_request_interval_ms,
            &state,
            &mut blinker,
            &mut hw,
            &mut cloud,
        );
        assert_eq!(fired.as_slice(), &TaskId::ORDER);
        assert_eq!(cloud.requests, 1);
        assert_eq!(hw.angles, vec![2]);
        assert_eq!(hw.leds, vec![false]);
        assert_eq!(hw.tones, 0, "no tone while away");
    }

    #[test]
    fn led_runs_faster_than_servo() {
        let config = AlertConfig::default();
        let mut tasks = TaskSet::new(&config);
        let mut state = AlertState::new(&config);
        state.set_distance(0.0);
        let mut blinker = LedBlinker::new();
        let (mut hw, mut cloud) = (Recorder::default(), Recorder::default());

        for now in (0..=5_000).step_by(100) {
            run_at(&mut tasks, now, &state, &mut blinker, &mut hw, &mut cloud);
        }
        assert_eq!(hw.leds, vec![true, false, true, false, true, false, true, false, true, false]);
        assert_eq!(hw.angles, vec![165]);
        assert_eq!(hw.tones, 1);
        assert_eq!(cloud.requests, 0);
    }

    #[test]
    fn interval_can_be_reconfigured() {
        let config = AlertConfig::default();
        let mut tasks = TaskSet::new(&config);
        tasks.set_interval_ms(TaskId::PositionRequest, 60_000);
        assert_eq!(tasks.interval_ms(TaskId::PositionRequest), 60_000);
        assert_eq!(tasks.interval_ms(TaskId::Led), config.led_interval_ms);
    }
}
