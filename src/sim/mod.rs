//! Deterministic simulation module
//!
//! All arena logic lives here. This module must stay pure and deterministic:
//! - Time only through an injected `TickSource`
//! - Input only through an `EventSource`
//! - Output only through a `RenderSink`

pub mod actor;
pub mod collision;
pub mod frame;
pub mod shape;
pub mod timer;

pub use actor::{Blocked, Dot};
pub use collision::{circle_overlap, circle_rect_overlap, rect_overlap};
pub use frame::{FpsCounter, FrameLimiter, FrameOutcome, RunLimits, RunSummary, Scene, run};
pub use shape::{Circle, Collider, Rect};
pub use timer::{Timer, TimerState};
