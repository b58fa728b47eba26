//! Frame-stepped arena loop
//!
//! One frame: drain every pending event, steer the dot, integrate once,
//! render, present. The loop ends when a `Quit` event sets the quit flag.

use glam::Vec2;

use super::actor::{Blocked, Dot};
use super::shape::{Collider, Rect};
use super::timer::Timer;
use crate::consts::MAX_SANE_FPS;
use crate::platform::{EventSource, InputEvent, JoystickState, RenderSink, TickSource};
use crate::renderer::{DrawCommand, colors};
use crate::settings::{DotShape, Settings};

/// Everything one arena run owns; passed explicitly, never global
#[derive(Debug, Clone)]
pub struct Scene {
    pub dot: Dot,
    pub obstacles: Vec<Collider>,
    pub bounds: Rect,
    pub joystick: JoystickState,
    quit: bool,
    frame: u64,
}

/// What happened during one `Scene::step`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Events consumed this frame
    pub events: usize,
    pub blocked: Blocked,
    pub quit: bool,
}

impl Scene {
    pub fn new(dot: Dot, obstacles: Vec<Collider>, bounds: Rect) -> Self {
        Self {
            dot,
            obstacles,
            bounds,
            joystick: JoystickState::default(),
            quit: false,
            frame: 0,
        }
    }

    /// Build the arena described by `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        let start = Vec2::new(settings.dot_start.0, settings.dot_start.1);
        let dot = match settings.dot_shape {
            DotShape::Box { width, height } => {
                Dot::boxed(start, Vec2::new(width, height), settings.dot_velocity)
            }
            DotShape::Circle { radius } => Dot::round(start, radius, settings.dot_velocity),
        };
        let bounds = Rect::new(0.0, 0.0, settings.screen_width, settings.screen_height);

        let mut scene = Self::new(dot, settings.obstacles.clone(), bounds);
        scene.joystick = JoystickState::new(settings.joystick_dead_zone);
        scene
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Frames stepped so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Drain this frame's events, then integrate the dot once
    pub fn step(&mut self, events: &mut impl EventSource) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        while let Some(event) = events.poll_event() {
            outcome.events += 1;
            if event == InputEvent::Quit {
                self.quit = true;
            }
            self.joystick.handle_event(&event);
            self.dot.handle_event(&event);
        }

        outcome.blocked = self.dot.integrate(&self.bounds, &self.obstacles);
        outcome.quit = self.quit;
        self.frame += 1;
        outcome
    }

    /// Clear, draw obstacles then the dot, present
    pub fn render(&self, sink: &mut impl RenderSink) {
        sink.clear(colors::BACKGROUND);
        for obstacle in &self.obstacles {
            let cmd = match *obstacle {
                Collider::Rect(rect) => DrawCommand::FillRect {
                    rect,
                    color: colors::WALL,
                },
                Collider::Circle(circle) => DrawCommand::FillCircle {
                    circle,
                    color: colors::WALL,
                },
            };
            sink.draw(&cmd);
        }
        self.dot.render(sink);
        sink.present();
    }
}

/// Average frames per second since `start`
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    timer: Timer,
    frames: u64,
}

impl FpsCounter {
    pub fn start(&mut self, clock: &impl TickSource) {
        self.frames = 0;
        self.timer.start(clock);
    }

    /// Count one finished frame
    pub fn count_frame(&mut self) {
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn average_fps(&self, clock: &impl TickSource) -> f32 {
        let secs = self.timer.elapsed(clock) as f32 / 1000.0;
        let fps = self.frames as f32 / secs;
        // 0 elapsed ms divides to infinity (or NaN with 0 frames)
        if !fps.is_finite() || fps > MAX_SANE_FPS {
            0.0
        } else {
            fps
        }
    }
}

/// Holds each frame to at least `ticks_per_frame` milliseconds
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    cap_timer: Timer,
    ticks_per_frame: u64,
}

impl FrameLimiter {
    /// `fps` of 0 is treated as 1
    pub fn new(fps: u32) -> Self {
        Self {
            cap_timer: Timer::new(),
            ticks_per_frame: 1000 / fps.max(1) as u64,
        }
    }

    pub fn ticks_per_frame(&self) -> u64 {
        self.ticks_per_frame
    }

    pub fn begin_frame(&mut self, clock: &impl TickSource) {
        self.cap_timer.start(clock);
    }

    /// Milliseconds left in this frame's budget (0 once over budget)
    pub fn remaining_ms(&self, clock: &impl TickSource) -> u64 {
        self.ticks_per_frame
            .saturating_sub(self.cap_timer.elapsed(clock))
    }

    /// Sleep out the rest of the frame budget
    pub fn wait(&self, clock: &impl TickSource) {
        let remaining = self.remaining_ms(clock);
        if remaining > 0 {
            clock.delay(remaining);
        }
    }
}

/// Loop bounds for `run`
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLimits {
    /// Stop after this many frames even without a quit event
    pub max_frames: Option<u64>,
    /// Cap the frame rate (None leaves pacing to the sink, e.g. vsync)
    pub fps_cap: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed_ms: u64,
    pub average_fps: f32,
    pub quit_requested: bool,
    /// Frames in which at least one axis was rolled back
    pub blocked_frames: u64,
}

/// Run the arena until quit (or `limits.max_frames`)
pub fn run(
    scene: &mut Scene,
    events: &mut impl EventSource,
    clock: &impl TickSource,
    sink: &mut impl RenderSink,
    limits: RunLimits,
) -> RunSummary {
    let mut fps = FpsCounter::default();
    let mut limiter = limits.fps_cap.map(FrameLimiter::new);
    let mut blocked_frames = 0;

    log::info!(
        "Arena running: {} obstacles, bounds {}x{}, fps cap {:?}",
        scene.obstacles.len(),
        scene.bounds.w,
        scene.bounds.h,
        limits.fps_cap
    );
    fps.start(clock);

    while !scene.quit_requested() {
        if limits.max_frames.is_some_and(|max| fps.frames() >= max) {
            break;
        }
        if let Some(limiter) = limiter.as_mut() {
            limiter.begin_frame(clock);
        }

        let outcome = scene.step(events);
        if outcome.blocked.any() {
            blocked_frames += 1;
        }
        scene.render(sink);
        fps.count_frame();

        if let Some(limiter) = limiter.as_ref() {
            limiter.wait(clock);
        }
    }

    let summary = RunSummary {
        frames: fps.frames(),
        elapsed_ms: fps.timer.elapsed(clock),
        average_fps: fps.average_fps(clock),
        quit_requested: scene.quit_requested(),
        blocked_frames,
    };
    log::info!(
        "Arena stopped after {} frames ({:.1} fps avg)",
        summary.frames,
        summary.average_fps
    );
    summary
}
