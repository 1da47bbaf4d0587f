//! Timer module for the Pomodoro Timer.
//!
//! - `engine`: the mode/run-state machine with countdown, skip, reset and
//!   time adjustment

pub mod engine;

pub use engine::{
    RunState, TimerEngine, TimerEvent, TimerMode, MIN_MODE_DURATION, MIN_REMAINING, TICK,
};
