//! Input events as the simulation sees them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::JOYSTICK_DEAD_ZONE;

/// Key symbols the arena cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
    /// Any other key, by platform keycode
    Other(u32),
}

impl Key {
    /// Unit velocity direction for movement keys (screen space, y down)
    pub fn direction(self) -> Option<Vec2> {
        match self {
            Key::Up => Some(Vec2::new(0.0, -1.0)),
            Key::Down => Some(Vec2::new(0.0, 1.0)),
            Key::Left => Some(Vec2::new(-1.0, 0.0)),
            Key::Right => Some(Vec2::new(1.0, 0.0)),
            _ => None,
        }
    }

    pub const ARROWS: [Key; 4] = [Key::Up, Key::Down, Key::Left, Key::Right];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// One discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window close / quit request
    Quit,
    /// `repeat` is set for auto-repeat events generated while a key is held
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key, repeat: bool },
    MouseMotion { x: i32, y: i32 },
    MouseButtonDown { button: MouseButton, x: i32, y: i32 },
    MouseButtonUp { button: MouseButton, x: i32, y: i32 },
    /// Analog stick motion: `axis` 0 is x, 1 is y
    JoyAxis { axis: u8, value: i16 },
}

impl InputEvent {
    pub fn key_down(key: Key) -> Self {
        InputEvent::KeyDown { key, repeat: false }
    }

    pub fn key_up(key: Key) -> Self {
        InputEvent::KeyUp { key, repeat: false }
    }
}

/// Map an analog axis value to -1, 0 or 1 around a dead zone
#[inline]
pub fn axis_direction(value: i16, dead_zone: i16) -> i8 {
    if value < -dead_zone {
        -1
    } else if value > dead_zone {
        1
    } else {
        0
    }
}

/// 8-way stick direction tracked from axis events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickState {
    pub x_dir: i8,
    pub y_dir: i8,
    dead_zone: i16,
}

impl Default for JoystickState {
    fn default() -> Self {
        Self::new(JOYSTICK_DEAD_ZONE)
    }
}

impl JoystickState {
    pub fn new(dead_zone: i16) -> Self {
        Self {
            x_dir: 0,
            y_dir: 0,
            dead_zone,
        }
    }

    /// Update from an event; non-axis events and axes beyond 1 are ignored
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::JoyAxis { axis, value } = *event {
            match axis {
                0 => self.x_dir = axis_direction(value, self.dead_zone),
                1 => self.y_dir = axis_direction(value, self.dead_zone),
                _ => {}
            }
        }
    }

    pub fn is_centered(&self) -> bool {
        self.x_dir == 0 && self.y_dir == 0
    }

    /// Direction angle in degrees (0 when centred)
    pub fn angle_degrees(&self) -> f64 {
        if self.is_centered() {
            return 0.0;
        }
        (self.y_dir as f64).atan2(self.x_dir as f64).to_degrees()
    }
}
