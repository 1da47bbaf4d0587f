//! Timer engine for the Pomodoro Timer.
//!
//! This module provides the core timer state machine:
//! - Mode transitions (Work → Short/Long Break → Work)
//! - Countdown driven by external `tick()` calls (one call = one second)
//! - Pause/resume, reset, manual skip and runtime time adjustment
//! - Long break after every `cycles_before_long` completed work sessions
//!
//! The engine reads no clock and performs no I/O. Every mutating call that
//! can emit returns the resulting [`TimerEvent`] and the caller decides which
//! side effects to trigger.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::TimerConfig;

/// Amount of time consumed by a single `tick()`.
pub const TICK: Duration = Duration::from_secs(1);

/// Lower bound for a mode's duration after `adjust_time`.
pub const MIN_MODE_DURATION: Duration = Duration::from_secs(60);

/// Lower bound for the remaining time after `adjust_time`.
pub const MIN_REMAINING: Duration = TICK;

// ============================================================================
// TimerMode
// ============================================================================

/// The session type currently being counted down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Focused work session
    Work,
    /// Short break between work sessions
    ShortBreak,
    /// Long break inserted every `cycles_before_long` work sessions
    LongBreak,
}

impl TimerMode {
    /// Returns the human-readable label of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Work => "Work",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Returns true for both break modes.
    pub fn is_break(&self) -> bool {
        matches!(self, TimerMode::ShortBreak | TimerMode::LongBreak)
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        TimerMode::Work
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RunState
// ============================================================================

/// Whether the countdown advances on `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Not yet started for the current mode
    Idle,
    /// Counting down
    Running,
    /// Halted by the user
    Paused,
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Idle
    }
}

// ============================================================================
// TimerEvent
// ============================================================================

/// Signals returned by the engine's mutating operations.
///
/// Calls that may have nothing to report return `Option<TimerEvent>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    /// One second elapsed without a transition
    Tick,
    /// Countdown began from `Idle`
    Started,
    /// A work session expired or was skipped
    WorkDone,
    /// A break expired or was skipped
    BreakDone,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Pomodoro state machine.
///
/// Owned and mutated by a single driver; no interior mutability and no
/// sharing across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    work_duration: Duration,
    short_break_duration: Duration,
    long_break_duration: Duration,
    cycles_before_long: u32,

    mode: TimerMode,
    run_state: RunState,
    remaining: Duration,
    /// Completed work sessions
    cycle: u32,
}

impl TimerEngine {
    /// Creates an engine in `(Work, Idle)` with the full work duration remaining.
    ///
    /// A `cycles_before_long` of 0 disables long breaks. Durations are not
    /// validated here; see [`TimerConfig::validate`].
    pub fn new(
        work_duration: Duration,
        short_break_duration: Duration,
        long_break_duration: Duration,
        cycles_before_long: u32,
    ) -> Self {
        Self {
            work_duration,
            short_break_duration,
            long_break_duration,
            cycles_before_long,
            mode: TimerMode::Work,
            run_state: RunState::Idle,
            remaining: work_duration,
            cycle: 0,
        }
    }

    /// Creates an engine from the durations and threshold in `config`.
    pub fn from_config(config: &TimerConfig) -> Self {
        Self::new(
            config.work_duration,
            config.short_break,
            config.long_break,
            config.cycles_before_long,
        )
    }

    /// Starts, pauses or resumes the countdown.
    ///
    /// Returns `Some(TimerEvent::Started)` only when leaving `Idle`.
    pub fn toggle(&mut self) -> Option<TimerEvent> {
        match self.run_state {
            RunState::Idle => {
                self.run_state = RunState::Running;
                Some(TimerEvent::Started)
            }
            RunState::Running => {
                self.run_state = RunState::Paused;
                None
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                None
            }
        }
    }

    /// Restores the full duration of the current mode and returns to `Idle`.
    ///
    /// Mode and cycle count are left untouched.
    pub fn reset(&mut self) {
        self.run_state = RunState::Idle;
        self.remaining = self.current_duration();
    }

    /// Ends the current session immediately, regardless of run state.
    pub fn skip(&mut self) -> TimerEvent {
        self.advance()
    }

    /// Consumes one second while running.
    ///
    /// Returns `None` unless running, the transition event when the
    /// countdown reaches zero, and `Some(TimerEvent::Tick)` otherwise.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.run_state != RunState::Running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(TICK);
        if self.remaining.is_zero() {
            return Some(self.advance());
        }
        Some(TimerEvent::Tick)
    }

    /// Adds `delta_secs` (may be negative) to the active mode's duration and
    /// to the remaining time.
    ///
    /// The mode's duration never drops below [`MIN_MODE_DURATION`]; the
    /// remaining time stays within `[MIN_REMAINING, current_duration()]`.
    /// Inactive modes are never touched.
    pub fn adjust_time(&mut self, delta_secs: i64) {
        let duration = self.current_duration_mut();
        *duration = shift(*duration, delta_secs).max(MIN_MODE_DURATION);

        let ceiling = *duration;
        self.remaining = shift(self.remaining, delta_secs)
            .max(MIN_REMAINING)
            .min(ceiling);
    }

    /// Fraction of the current session already elapsed, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        let total = self.current_duration();
        if total.is_zero() {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining);
        elapsed.as_secs_f64() / total.as_secs_f64()
    }

    /// Full duration of the active mode.
    pub fn current_duration(&self) -> Duration {
        match self.mode {
            TimerMode::Work => self.work_duration,
            TimerMode::ShortBreak => self.short_break_duration,
            TimerMode::LongBreak => self.long_break_duration,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Number of completed work sessions.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn work_duration(&self) -> Duration {
        self.work_duration
    }

    pub fn short_break_duration(&self) -> Duration {
        self.short_break_duration
    }

    pub fn long_break_duration(&self) -> Duration {
        self.long_break_duration
    }

    pub fn cycles_before_long(&self) -> u32 {
        self.cycles_before_long
    }

    /// Returns true if the countdown is advancing.
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Returns true if the countdown was halted by the user.
    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    fn current_duration_mut(&mut self) -> &mut Duration {
        match self.mode {
            TimerMode::Work => &mut self.work_duration,
            TimerMode::ShortBreak => &mut self.short_break_duration,
            TimerMode::LongBreak => &mut self.long_break_duration,
        }
    }

    /// Moves to the next mode and lands in `Idle`.
    fn advance(&mut self) -> TimerEvent {
        let event = match self.mode {
            TimerMode::Work => {
                self.cycle += 1;
                if self.cycles_before_long > 0 && self.cycle % self.cycles_before_long == 0 {
                    self.mode = TimerMode::LongBreak;
                    self.remaining = self.long_break_duration;
                } else {
                    self.mode = TimerMode::ShortBreak;
                    self.remaining = self.short_break_duration;
                }
                TimerEvent::WorkDone
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => {
                self.mode = TimerMode::Work;
                self.remaining = self.work_duration;
                TimerEvent::BreakDone
            }
        };

        self.run_state = RunState::Idle;
        event
    }
}

/// Applies a signed number of seconds to `value`, saturating at zero.
fn shift(value: Duration, delta_secs: i64) -> Duration {
    let magnitude = Duration::from_secs(delta_secs.unsigned_abs());
    if delta_secs >= 0 {
        value.saturating_add(magnitude)
    } else {
        value.saturating_sub(magnitude)
    }
}

// ============================================================================
// Tests
// ============================================================================
