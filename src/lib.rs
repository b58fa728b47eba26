//! Dot Arena - a kinematic dot moving through a walled arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (shapes, collisions, timers, the dot, the frame step)
//! - `platform`: Event source, tick source and render sink seams
//! - `renderer`: Draw commands and a software canvas
//! - `settings`: Data-driven configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::{DotShape, Settings};

use glam::Vec2;

/// Arena configuration constants
pub mod consts {
    /// Arena dimensions
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Dot defaults
    pub const DOT_WIDTH: f32 = 20.0;
    pub const DOT_HEIGHT: f32 = 20.0;
    /// Velocity change per key press (pixels per frame)
    pub const DOT_VEL: f32 = 10.0;

    /// Analog stick values inside +/- this band read as centred
    pub const JOYSTICK_DEAD_ZONE: i16 = 8000;

    /// Frame cap
    pub const SCREEN_FPS: u32 = 60;
    pub const SCREEN_TICKS_PER_FRAME: u64 = 1000 / SCREEN_FPS as u64;

    /// Average fps readings above this are a first-frame division artifact
    pub const MAX_SANE_FPS: f32 = 2_000_000.0;

    /// Largest world edge a settings file may ask for, in pixels
    pub const MAX_WORLD_DIM: f32 = 16_384.0;
}

/// Squared distance between two points (no square root)
#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    let d = b - a;
    d.x * d.x + d.y * d.y
}
