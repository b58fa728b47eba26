//! Rendering module
//!
//! The simulation emits `DrawCommand`s into any `RenderSink`; `Canvas` is the
//! built-in software sink.

pub mod canvas;

pub use canvas::Canvas;

use glam::Vec2;

use crate::sim::{Circle, Rect};

/// Mirror flags for sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// A single draw request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: [u8; 4],
    },
    FillCircle {
        circle: Circle,
        color: [u8; 4],
    },
    /// Sprite quad at a top-left position
    ///
    /// `clip` overrides the drawn size, `angle` rotates (degrees, clockwise)
    /// about the quad centre.
    Sprite {
        top_left: Vec2,
        size: Vec2,
        clip: Option<Rect>,
        angle: f64,
        flip: Flip,
        color: [u8; 4],
    },
}

impl DrawCommand {
    /// Plain unrotated sprite
    pub fn sprite(top_left: Vec2, size: Vec2, color: [u8; 4]) -> Self {
        DrawCommand::Sprite {
            top_left,
            size,
            clip: None,
            angle: 0.0,
            flip: Flip::None,
            color,
        }
    }
}

/// Colors for arena elements
pub mod colors {
    pub const BACKGROUND: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
    pub const WALL: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];
    pub const DOT: [u8; 4] = [0xFF, 0x00, 0x00, 0xFF];
}
