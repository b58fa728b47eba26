//! Software RGBA canvas
//!
//! Headless render sink: rasterizes draw commands into a pixel buffer that
//! can be streamed out as raw bytes or dumped as a PPM image.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::Vec2;

use super::DrawCommand;
use crate::error::{Error, Result};
use crate::platform::RenderSink;
use crate::sim::{Circle, Rect};

#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    /// Back buffer, drawn into between presents
    pixels: Vec<[u8; 4]>,
    /// Last presented frame
    front: Vec<[u8; 4]>,
    frames_presented: u64,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0xFF]; len],
            front: vec![[0, 0, 0, 0xFF]; len],
            frames_presented: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Pixel of the last presented frame
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.front.get(Self::index(self.width, x, y)).copied()
    }

    /// Last presented frame as tightly packed RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.front)
    }

    /// Write the last presented frame as a binary PPM (P6)
    pub fn write_ppm(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut out = BufWriter::new(file);

        let mut data = Vec::with_capacity(self.front.len() * 3 + 32);
        data.extend_from_slice(format!("P6\n{} {}\n255\n", self.width, self.height).as_bytes());
        for px in &self.front {
            data.extend_from_slice(&px[..3]);
        }
        out.write_all(&data).map_err(|e| Error::io(path, e))?;
        out.flush().map_err(|e| Error::io(path, e))?;

        log::info!("Wrote {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Pixel index range covered by [lo, hi) along an axis of length `len`
    fn span(lo: f32, hi: f32, len: u32) -> std::ops::Range<u32> {
        let start = lo.round().clamp(0.0, len as f32) as u32;
        let end = hi.round().clamp(0.0, len as f32) as u32;
        start..end.max(start)
    }

    /// Row-major offset, widened before multiplying
    fn index(width: u32, x: u32, y: u32) -> usize {
        y as usize * width as usize + x as usize
    }

    fn put(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let idx = Self::index(self.width, x, y);
        if let Some(px) = self.pixels.get_mut(idx) {
            *px = color;
        }
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: [u8; 4]) {
        let xs = Self::span(rect.left(), rect.right(), self.width);
        for y in Self::span(rect.top(), rect.bottom(), self.height) {
            for x in xs.clone() {
                self.put(x, y, color);
            }
        }
    }

    pub fn fill_circle(&mut self, circle: &Circle, color: [u8; 4]) {
        let bounds = circle.bounds();
        let r2 = circle.radius * circle.radius;
        let xs = Self::span(bounds.left(), bounds.right(), self.width);
        for y in Self::span(bounds.top(), bounds.bottom(), self.height) {
            for x in xs.clone() {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if crate::distance_squared(p, circle.center) < r2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Fill a quad rotated by `angle` degrees about its centre
    fn fill_rotated(&mut self, rect: &Rect, angle: f64, color: [u8; 4]) {
        let center = rect.center();
        let half = rect.size() / 2.0;
        let (sin, cos) = (angle.to_radians() as f32).sin_cos();

        // Bounding radius of the rotated quad
        let reach = half.length();
        let bounds = Rect::new(center.x - reach, center.y - reach, reach * 2.0, reach * 2.0);
        let xs = Self::span(bounds.left(), bounds.right(), self.width);
        for y in Self::span(bounds.top(), bounds.bottom(), self.height) {
            for x in xs.clone() {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                // Undo the rotation
                let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos);
                if local.x.abs() < half.x && local.y.abs() < half.y {
                    self.put(x, y, color);
                }
            }
        }
    }
}

impl RenderSink for Canvas {
    fn clear(&mut self, color: [u8; 4]) {
        self.pixels.fill(color);
    }

    fn draw(&mut self, cmd: &DrawCommand) {
        match *cmd {
            DrawCommand::FillRect { rect, color } => self.fill_rect(&rect, color),
            DrawCommand::FillCircle { circle, color } => self.fill_circle(&circle, color),
            // `flip` is a no-op for solid quads
            DrawCommand::Sprite {
                top_left,
                size,
                clip,
                angle,
                color,
                ..
            } => {
                let size = clip.map(|c| c.size()).unwrap_or(size);
                let quad = Rect::new(top_left.x, top_left.y, size.x, size.y);
                if angle == 0.0 {
                    self.fill_rect(&quad, color);
                } else {
                    self.fill_rotated(&quad, angle, color);
                }
            }
        }
    }

    fn present(&mut self) {
        self.front.copy_from_slice(&self.pixels);
        self.frames_presented += 1;
    }
}
