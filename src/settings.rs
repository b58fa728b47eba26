//! Arena settings
//!
//! Stored as JSON. Every field has a default, so a settings file only needs
//! the values it wants to change.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::{Circle, Collider, Rect};

/// Collider shape of the player dot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DotShape {
    /// Positioned by its top-left corner
    Box { width: f32, height: f32 },
    /// Positioned by its centre
    Circle { radius: f32 },
}

impl Default for DotShape {
    fn default() -> Self {
        DotShape::Box {
            width: DOT_WIDTH,
            height: DOT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub obstacles: Vec<Collider>,

    // === Dot ===
    pub dot_shape: DotShape,
    /// Starting anchor (top-left for boxes, centre for circles)
    pub dot_start: (f32, f32),
    /// Velocity change per key press
    pub dot_velocity: f32,

    // === Input ===
    pub joystick_dead_zone: i16,

    // === Pacing ===
    /// Frame cap; `None` leaves pacing to vsync
    pub fps_cap: Option<u32>,

    // === Headless demo ===
    pub demo_seed: u64,
    pub demo_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            // A tall wall plus a round post
            obstacles: vec![
                Rect::new(300.0, 40.0, 40.0, 400.0).into(),
                Circle::new(Vec2::new(SCREEN_WIDTH / 4.0, SCREEN_HEIGHT / 4.0), DOT_WIDTH / 2.0)
                    .into(),
            ],

            dot_shape: DotShape::default(),
            dot_start: (0.0, 0.0),
            dot_velocity: DOT_VEL,

            joystick_dead_zone: JOYSTICK_DEAD_ZONE,

            fps_cap: Some(SCREEN_FPS),

            demo_seed: 0x5EED,
            demo_frames: 600,
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like `load`, but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| Error::io(path, e))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the arena cannot run with
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(Error::InvalidSettings(msg));

        let in_range = |v: f32| v > 0.0 && v <= MAX_WORLD_DIM;
        if !(in_range(self.screen_width) && in_range(self.screen_height)) {
            return bad(format!(
                "world size must be in (0, {MAX_WORLD_DIM}], got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        if !(self.dot_velocity >= 0.0) {
            return bad(format!("dot_velocity must be >= 0, got {}", self.dot_velocity));
        }
        if self.joystick_dead_zone < 0 {
            return bad(format!(
                "joystick_dead_zone must be >= 0, got {}",
                self.joystick_dead_zone
            ));
        }
        if self.fps_cap == Some(0) {
            return bad("fps_cap must be at least 1 (or null)".to_string());
        }
        // serde bypasses the clamping constructors
        let extent = |v: f32| v >= 0.0 && v.is_finite();
        for (i, obstacle) in self.obstacles.iter().enumerate() {
            let ok = match obstacle {
                Collider::Rect(r) => r.top_left().is_finite() && extent(r.w) && extent(r.h),
                Collider::Circle(c) => c.center.is_finite() && extent(c.radius),
            };
            if !ok {
                return bad(format!(
                    "obstacle {i} needs a finite position and non-negative size, got {obstacle:?}"
                ));
            }
        }
        let (x, y) = self.dot_start;
        let dot_bounds = match self.dot_shape {
            DotShape::Box { width, height } if width < 0.0 || height < 0.0 => {
                return bad(format!("dot size must be >= 0, got {width}x{height}"));
            }
            DotShape::Circle { radius } if radius < 0.0 => {
                return bad(format!("dot radius must be >= 0, got {radius}"));
            }
            DotShape::Box { width, height } => Rect::new(x, y, width, height),
            DotShape::Circle { radius } => Circle::new(Vec2::new(x, y), radius).bounds(),
        };
        let world = Rect::new(0.0, 0.0, self.screen_width, self.screen_height);
        if !world.contains_rect(&dot_bounds) {
            return bad(format!("dot must start inside the world, got {dot_bounds:?}"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("dot_arena_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.dot_velocity, 10.0);
        assert_eq!(settings.fps_cap, Some(60));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "dot_velocity": 5.0, "dot_shape": { "kind": "circle", "radius": 8.0 } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.dot_velocity, 5.0);
        assert_eq!(settings.dot_shape, DotShape::Circle { radius: 8.0 });
        assert_eq!(settings.screen_width, SCREEN_WIDTH);
        assert_eq!(settings.obstacles.len(), 2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut s = Settings::default();
        s.screen_width = 0.0;
        assert!(matches!(s.validate(), Err(Error::InvalidSettings(_))));

        let mut s = Settings::default();
        s.fps_cap = Some(0);
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.dot_shape = DotShape::Circle { radius: -1.0 };
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.dot_velocity = f32::NAN;
        assert!(s.validate().is_err());

        // A circle's anchor is its centre, so (0, 0) hangs off the world
        let mut s = Settings::default();
        s.dot_shape = DotShape::Circle { radius: 10.0 };
        assert!(s.validate().is_err());
        s.dot_start = (10.0, 10.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_obstacles() {
        let json = r#"{ "obstacles": [
            { "shape": "rect", "x": 10.0, "y": 10.0, "w": -50.0, "h": 20.0 }
        ] }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(matches!(settings.validate(), Err(Error::InvalidSettings(_))));

        let json = r#"{ "obstacles": [
            { "shape": "circle", "center": [100.0, 100.0], "radius": -3.0 }
        ] }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(matches!(settings.validate(), Err(Error::InvalidSettings(_))));

        let mut s = Settings::default();
        s.obstacles.push(Rect { x: f32::NAN, y: 0.0, w: 1.0, h: 1.0 }.into());
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.obstacles.push(Circle { center: Vec2::ZERO, radius: f32::INFINITY }.into());
        assert!(s.validate().is_err());

        // Zero-sized obstacles are degenerate but legal
        let mut s = Settings::default();
        s.obstacles.push(Rect::new(5.0, 5.0, 0.0, 0.0).into());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_caps_world_size() {
        let mut s = Settings::default();
        s.screen_width = MAX_WORLD_DIM;
        assert!(s.validate().is_ok());

        s.screen_width = 1.0e9;
        assert!(matches!(s.validate(), Err(Error::InvalidSettings(_))));

        s.screen_width = SCREEN_WIDTH;
        s.screen_height = f32::INFINITY;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_save_load_file() {
        let path = temp_path("save_load");
        let mut settings = Settings::default();
        settings.fps_cap = None;
        settings.obstacles = vec![Rect::new(1.0, 2.0, 3.0, 4.0).into()];
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_errors() {
        let missing = temp_path("missing");
        assert!(matches!(Settings::load(&missing), Err(Error::Io { .. })));
        assert_eq!(Settings::load_or_default(&missing).unwrap(), Settings::default());

        let path = temp_path("malformed");
        std::fs::write(&path, "{ not json").unwrap();
        let result = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
