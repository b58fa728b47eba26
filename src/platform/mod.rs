//! Platform abstraction layer
//!
//! The simulation never talks to a window system directly. It sees three seams:
//! - `EventSource`: drainable per-frame input events
//! - `TickSource`: monotonic millisecond clock
//! - `RenderSink`: draw commands plus a present call

pub mod demo;
pub mod input;

use std::cell::Cell;
use std::time::{Duration, Instant};

pub use demo::{RandomInput, ScriptedEvents};
pub use input::{InputEvent, JoystickState, Key, MouseButton, axis_direction};

use crate::renderer::DrawCommand;

/// Source of discrete input events, polled until empty once per frame
pub trait EventSource {
    /// Next pending event, or `None` once this frame's queue is drained
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Drain every pending event in order
    fn drain(&mut self) -> Vec<InputEvent> {
        std::iter::from_fn(|| self.poll_event()).collect()
    }
}

/// Monotonically non-decreasing millisecond counter
pub trait TickSource {
    fn ticks(&self) -> u64;

    /// Block for `ms` milliseconds (frame capping)
    fn delay(&self, ms: u64);
}

/// Receives draw commands for one frame, then presents it
pub trait RenderSink {
    fn clear(&mut self, color: [u8; 4]);
    fn draw(&mut self, cmd: &DrawCommand);
    fn present(&mut self);
}

/// Wall clock backed by `Instant`, epoch at construction
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SystemClock {
    fn ticks(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn delay(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Hand-driven clock for tests and headless runs
///
/// `delay` advances the clock instead of sleeping.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TickSource for ManualClock {
    fn ticks(&self) -> u64 {
        self.now.get()
    }

    fn delay(&self, ms: u64) {
        self.advance(ms);
    }
}
