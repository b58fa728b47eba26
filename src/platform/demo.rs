//! Canned event sources for tests and headless runs
//!
//! Both sources hand out one frame of events per drain: `poll_event`
//! returns `None` at each frame boundary.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::EventSource;
use super::input::{InputEvent, Key};

/// Pre-recorded events, one list per frame
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<VecDeque<InputEvent>>,
    current: Option<VecDeque<InputEvent>>,
}

impl ScriptedEvents {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().map(VecDeque::from).collect(),
            current: None,
        }
    }

    /// Append another frame of events
    pub fn push_frame(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events.into());
    }

    /// Frames not yet handed out
    pub fn remaining_frames(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll_event(&mut self) -> Option<InputEvent> {
        if self.current.is_none() {
            self.current = Some(self.frames.pop_front()?);
        }
        let next = self.current.as_mut().and_then(|frame| frame.pop_front());
        if next.is_none() {
            self.current = None;
        }
        next
    }
}

/// Seeded autopilot pressing and releasing arrow keys at random
///
/// Held keys occasionally produce repeat key-downs, just like a real
/// keyboard. Emits `Quit` once `quit_after` frames have been produced.
#[derive(Debug, Clone)]
pub struct RandomInput {
    rng: Pcg32,
    held: Vec<Key>,
    frame: u64,
    quit_after: u64,
    pending: Option<VecDeque<InputEvent>>,
}

impl RandomInput {
    /// Chance per frame of toggling one arrow key
    const TOGGLE_CHANCE: f64 = 0.2;
    /// Chance per frame of an auto-repeat for one held key
    const REPEAT_CHANCE: f64 = 0.3;

    pub fn new(seed: u64, quit_after: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held: Vec::new(),
            frame: 0,
            quit_after,
            pending: None,
        }
    }

    /// Keys currently held down
    pub fn held(&self) -> &[Key] {
        &self.held
    }

    fn generate_frame(&mut self) -> VecDeque<InputEvent> {
        let mut events = VecDeque::new();
        self.frame += 1;

        if self.frame > self.quit_after {
            // Release everything before quitting so velocity settles at zero
            for key in self.held.drain(..) {
                events.push_back(InputEvent::key_up(key));
            }
            events.push_back(InputEvent::Quit);
            return events;
        }

        if !self.held.is_empty() && self.rng.random_bool(Self::REPEAT_CHANCE) {
            let key = self.held[self.rng.random_range(0..self.held.len())];
            events.push_back(InputEvent::KeyDown { key, repeat: true });
        }

        if self.rng.random_bool(Self::TOGGLE_CHANCE) {
            let key = Key::ARROWS[self.rng.random_range(0..Key::ARROWS.len())];
            if let Some(i) = self.held.iter().position(|&k| k == key) {
                self.held.swap_remove(i);
                events.push_back(InputEvent::key_up(key));
            } else {
                self.held.push(key);
                events.push_back(InputEvent::key_down(key));
            }
        }

        events
    }
}

impl EventSource for RandomInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        if self.pending.is_none() {
            let frame = self.generate_frame();
            self.pending = Some(frame);
        }
        let next = self.pending.as_mut().and_then(|frame| frame.pop_front());
        if next.is_none() {
            self.pending = None;
        }
        next
    }
}
