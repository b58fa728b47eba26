//! The dot: a kinematic actor steered by arrow keys
//!
//! Velocity changes only on key transitions; position integrates one axis
//! at a time and any axis step that leaves the world or hits an obstacle is
//! undone in full.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::{Circle, Collider, Rect};
use crate::platform::{InputEvent, RenderSink};
use crate::renderer::{DrawCommand, colors};

/// Which axes were rolled back during an integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Blocked {
    pub x: bool,
    pub y: bool,
}

impl Blocked {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dot {
    /// Top-left corner for box dots, centre for round dots
    pos: Vec2,
    /// Pixels per frame
    vel: Vec2,
    /// Velocity change per key press
    step: f32,
    /// Always co-located with `pos`
    collider: Collider,
}

impl Dot {
    /// Box-shaped dot with its top-left corner at `top_left`
    pub fn boxed(top_left: Vec2, size: Vec2, step: f32) -> Self {
        Self::with_collider(top_left, Rect::new(0.0, 0.0, size.x, size.y).into(), step)
    }

    /// Round dot centred at `center`
    pub fn round(center: Vec2, radius: f32, step: f32) -> Self {
        Self::with_collider(center, Circle::new(Vec2::ZERO, radius).into(), step)
    }

    /// Dot at `pos` using `collider`'s shape (its position is overwritten)
    pub fn with_collider(pos: Vec2, mut collider: Collider, step: f32) -> Self {
        collider.move_to(pos);
        Self {
            pos,
            vel: Vec2::ZERO,
            step,
            collider,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Teleport, keeping the collider in step
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.shift_collider();
    }

    fn shift_collider(&mut self) {
        self.collider.move_to(self.pos);
    }

    /// Adjust velocity from a key transition
    ///
    /// Auto-repeat events are ignored so a held key counts once.
    pub fn handle_event(&mut self, event: &InputEvent) {
        let (key, sign) = match *event {
            InputEvent::KeyDown { key, repeat: false } => (key, 1.0_f32),
            InputEvent::KeyUp { key, repeat: false } => (key, -1.0_f32),
            _ => return,
        };
        if let Some(dir) = key.direction() {
            self.vel += dir * self.step * sign;
        }
    }

    /// Advance one frame inside `bounds`, avoiding `obstacles`
    ///
    /// X resolves fully before Y, so Y is tested against the X-resolved
    /// collider.
    pub fn integrate(&mut self, bounds: &Rect, obstacles: &[Collider]) -> Blocked {
        let blocked = Blocked {
            x: self.try_move(Axis::X, bounds, obstacles),
            y: self.try_move(Axis::Y, bounds, obstacles),
        };
        if blocked.any() {
            log::debug!("Dot rolled back at {:?} ({:?})", self.pos, blocked);
        }
        blocked
    }

    /// Step along one axis, undoing it on a violation. Returns true when undone.
    ///
    /// Only the moving axis is held to the world edges.
    fn try_move(&mut self, axis: Axis, bounds: &Rect, obstacles: &[Collider]) -> bool {
        let delta = match axis {
            Axis::X => Vec2::new(self.vel.x, 0.0),
            Axis::Y => Vec2::new(0.0, self.vel.y),
        };
        if delta == Vec2::ZERO {
            return false;
        }

        self.pos += delta;
        self.shift_collider();

        let b = self.collider.bounds();
        let out_of_bounds = match axis {
            Axis::X => b.left() < bounds.left() || b.right() > bounds.right(),
            Axis::Y => b.top() < bounds.top() || b.bottom() > bounds.bottom(),
        };
        if out_of_bounds || obstacles.iter().any(|o| self.collider.overlaps(o)) {
            self.pos -= delta;
            self.shift_collider();
            return true;
        }
        false
    }

    /// Draw the dot's sprite at its top-left corner
    pub fn render(&self, sink: &mut impl RenderSink) {
        let bounds = self.collider.bounds();
        sink.draw(&DrawCommand::sprite(bounds.top_left(), bounds.size(), colors::DOT));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Key;

    const STEP: f32 = 10.0;

    fn world() -> Rect {
        Rect::new(0.0, 0.0, 640.0, 480.0)
    }

    fn box_dot(x: f32, y: f32) -> Dot {
        Dot::boxed(Vec2::new(x, y), Vec2::new(20.0, 20.0), STEP)
    }

    #[derive(Default)]
    struct Recorder(Vec<DrawCommand>);

    impl RenderSink for Recorder {
        fn clear(&mut self, _color: [u8; 4]) {}
        fn draw(&mut self, cmd: &DrawCommand) {
            self.0.push(*cmd);
        }
        fn present(&mut self) {}
    }

    #[test]
    fn test_key_press_and_release() {
        let mut dot = box_dot(50.0, 50.0);
        dot.handle_event(&InputEvent::key_down(Key::Right));
        assert_eq!(dot.velocity(), Vec2::new(STEP, 0.0));
        dot.handle_event(&InputEvent::key_down(Key::Up));
        assert_eq!(dot.velocity(), Vec2::new(STEP, -STEP));
        dot.handle_event(&InputEvent::key_up(Key::Right));
        dot.handle_event(&InputEvent::key_up(Key::Up));
        assert_eq!(dot.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_repeat_key_down_ignored() {
        let mut dot = box_dot(50.0, 50.0);
        dot.handle_event(&InputEvent::key_down(Key::Left));
        for _ in 0..5 {
            dot.handle_event(&InputEvent::KeyDown {
                key: Key::Left,
                repeat: true,
            });
        }
        assert_eq!(dot.velocity(), Vec2::new(-STEP, 0.0));
        dot.handle_event(&InputEvent::KeyUp {
            key: Key::Left,
            repeat: true,
        });
        assert_eq!(dot.velocity(), Vec2::new(-STEP, 0.0));
    }

    #[test]
    fn test_non_movement_events_ignored() {
        let mut dot = box_dot(50.0, 50.0);
        dot.handle_event(&InputEvent::key_down(Key::Space));
        dot.handle_event(&InputEvent::MouseMotion { x: 3, y: 4 });
        dot.handle_event(&InputEvent::JoyAxis { axis: 0, value: 30000 });
        dot.handle_event(&InputEvent::Quit);
        assert_eq!(dot.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_up_press_move_release() {
        let mut dot = box_dot(50.0, 50.0);
        dot.handle_event(&InputEvent::key_down(Key::Up));
        assert_eq!(dot.velocity(), Vec2::new(0.0, -10.0));
        let blocked = dot.integrate(&world(), &[]);
        assert!(!blocked.any());
        assert_eq!(dot.position(), Vec2::new(50.0, 40.0));
        dot.handle_event(&InputEvent::key_up(Key::Up));
        assert_eq!(dot.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_rollback_at_world_edge() {
        // 20-wide world and a 20-wide dot: any x step leaves the world
        let bounds = Rect::new(0.0, 0.0, 20.0, 100.0);
        let mut dot = Dot::boxed(Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0), 1.0);
        dot.handle_event(&InputEvent::key_down(Key::Right));
        assert_eq!(dot.velocity(), Vec2::new(1.0, 0.0));

        let blocked = dot.integrate(&bounds, &[]);
        assert!(blocked.x);
        assert_eq!(dot.position(), Vec2::new(0.0, 0.0));
        assert_eq!(dot.collider().top_left(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_rollback_is_all_or_nothing() {
        // 5 px from the right edge with a 10 px step: no partial move
        let mut dot = box_dot(615.0, 50.0);
        dot.handle_event(&InputEvent::key_down(Key::Right));
        dot.integrate(&world(), &[]);
        assert_eq!(dot.position(), Vec2::new(615.0, 50.0));
    }

    #[test]
    fn test_y_overhang_does_not_block_x() {
        // Bottom edge at 490 hangs past the 480 world, X stays legal
        let mut dot = box_dot(50.0, 470.0);
        dot.handle_event(&InputEvent::key_down(Key::Right));

        let blocked = dot.integrate(&world(), &[]);
        assert_eq!(blocked, Blocked::default());
        assert_eq!(dot.position(), Vec2::new(60.0, 470.0));

        // Moving further down is still refused
        dot.handle_event(&InputEvent::key_down(Key::Down));
        let blocked = dot.integrate(&world(), &[]);
        assert_eq!(blocked, Blocked { x: false, y: true });
        assert_eq!(dot.position(), Vec2::new(70.0, 470.0));
    }

    #[test]
    fn test_wall_blocks_x_but_not_y() {
        let wall: Collider = Rect::new(80.0, 0.0, 40.0, 400.0).into();
        let mut dot = box_dot(55.0, 100.0);
        dot.handle_event(&InputEvent::key_down(Key::Right));
        dot.handle_event(&InputEvent::key_down(Key::Down));

        let blocked = dot.integrate(&world(), &[wall]);
        assert_eq!(blocked, Blocked { x: true, y: false });
        assert_eq!(dot.position(), Vec2::new(55.0, 110.0));
    }

    #[test]
    fn test_x_resolved_before_y() {
        // Obstacle sits diagonally below-right. X alone clears it, then Y
        // runs into it from above.
        let block: Collider = Rect::new(70.0, 75.0, 20.0, 20.0).into();
        let mut dot = box_dot(50.0, 50.0);
        dot.handle_event(&InputEvent::key_down(Key::Right));
        dot.handle_event(&InputEvent::key_down(Key::Down));

        let blocked = dot.integrate(&world(), &[block]);
        assert_eq!(blocked, Blocked { x: false, y: true });
        assert_eq!(dot.position(), Vec2::new(60.0, 50.0));
    }

    #[test]
    fn test_round_dot_bounds_and_obstacles() {
        let mut dot = Dot::round(Vec2::new(10.0, 50.0), 10.0, STEP);
        dot.handle_event(&InputEvent::key_down(Key::Left));
        // Centre 0 would put the left edge at -10
        assert!(dot.integrate(&world(), &[]).x);
        assert_eq!(dot.position(), Vec2::new(10.0, 50.0));

        let other: Collider = Circle::new(Vec2::new(35.0, 50.0), 10.0).into();
        let mut dot = Dot::round(Vec2::new(10.0, 50.0), 10.0, STEP);
        dot.handle_event(&InputEvent::key_down(Key::Right));
        // Centres 15 apart after the move, radii sum 20
        assert!(dot.integrate(&world(), &[other]).x);
        assert_eq!(dot.position(), Vec2::new(10.0, 50.0));
    }

    #[test]
    fn test_render_top_left() {
        let mut sink = Recorder::default();
        Dot::round(Vec2::new(100.0, 100.0), 10.0, STEP).render(&mut sink);
        box_dot(30.0, 40.0).render(&mut sink);

        assert_eq!(
            sink.0,
            vec![
                DrawCommand::sprite(Vec2::new(90.0, 90.0), Vec2::new(20.0, 20.0), colors::DOT),
                DrawCommand::sprite(Vec2::new(30.0, 40.0), Vec2::new(20.0, 20.0), colors::DOT),
            ]
        );
    }
}
