// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A CPU-side RGBA8 framebuffer and the primitive drawing operations on it.

use super::BlendMode;
use crate::math::{Color, Vec2};

/// A software framebuffer of sRGB-encoded RGBA8 pixels, row-major, top-left origin.
///
/// Every drawing call goes through [`Frame::put_pixel`], which clips to the
/// frame bounds and combines the source color with the destination according
/// to the frame's current [`BlendMode`].
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    blend_mode: BlendMode,
}

impl Frame {
    /// Creates a frame filled with opaque black, using [`BlendMode::Blend`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
            blend_mode: BlendMode::Blend,
        }
    }

    /// Returns the frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the blend mode used by subsequent drawing calls.
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    /// Changes the blend mode used by subsequent drawing calls.
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    /// Returns the pixels as a flat byte slice, ready for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Returns the color at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Overwrites the whole frame with `color`, ignoring the blend mode.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Draws a single pixel. Coordinates outside the frame are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.pixels[idx] = self.blend_mode.apply(color, self.pixels[idx]);
    }

    /// Fills an axis-aligned rectangle. Fractional edges are rounded.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if !(w > 0.0 && h > 0.0) {
            return;
        }
        let x0 = (x.round() as i64).max(0);
        let y0 = (y.round() as i64).max(0);
        let x1 = ((x + w).round() as i64).min(self.width as i64);
        let y1 = ((y + h).round() as i64).min(self.height as i64);
        for py in y0..y1 {
            for px in x0..x1 {
                self.put_pixel(px as i32, py as i32, color);
            }
        }
    }

    /// Draws the one-pixel outline of a rectangle.
    ///
    /// Only the part of the outline inside the frame is visited.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let (x0, y0) = (x.round() as i64, y.round() as i64);
        let (x1, y1) = ((x + w).round() as i64 - 1, (y + h).round() as i64 - 1);
        if x1 < x0 || y1 < y0 {
            return;
        }
        let (width, height) = (self.width as i64, self.height as i64);
        let inside_x = |px: i64| (0..width).contains(&px);
        let inside_y = |py: i64| (0..height).contains(&py);

        let (cx0, cx1) = (x0.max(0), x1.min(width - 1));
        for px in cx0..=cx1 {
            if inside_y(y0) {
                self.put_pixel(px as i32, y0 as i32, color);
            }
            if y1 != y0 && inside_y(y1) {
                self.put_pixel(px as i32, y1 as i32, color);
            }
        }

        let (cy0, cy1) = ((y0 + 1).max(0), (y1 - 1).min(height - 1));
        for py in cy0..=cy1 {
            if inside_x(x0) {
                self.put_pixel(x0 as i32, py as i32, color);
            }
            if x1 != x0 && inside_x(x1) {
                self.put_pixel(x1 as i32, py as i32, color);
            }
        }
    }

    /// Draws a one-pixel line between two points (Bresenham).
    ///
    /// Non-finite endpoints are ignored.
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        if !from.is_finite() || !to.is_finite() {
            return;
        }
        // Clamp far-away endpoints so the step count stays bounded.
        let limit = (self.width.max(self.height) as f32) * 4.0;
        let clamp = |v: f32| v.clamp(-limit, limit).round() as i32;
        let (mut x0, mut y0) = (clamp(from.x), clamp(from.y));
        let (x1, y1) = (clamp(to.x), clamp(to.y));

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Fills a disk centered on `center`.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !(radius > 0.0) || !center.is_finite() {
            return;
        }
        let r2 = radius * radius;
        let y0 = (center.y - radius).floor() as i32;
        let y1 = (center.y + radius).ceil() as i32;
        let x0 = (center.x - radius).floor() as i32;
        let x1 = (center.x + radius).ceil() as i32;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let d = Vec2::new(px as f32 + 0.5, py as f32 + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.put_pixel(px, py, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut frame = Frame::new(4, 4);
        frame.fill_rect(-2.0, 2.0, 10.0, 10.0, Color::WHITE);
        assert_eq!(frame.pixel(0, 1), Some(Color::BLACK));
        assert_eq!(frame.pixel(0, 2), Some(Color::WHITE));
        assert_eq!(frame.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(frame.pixel(4, 3), None);
    }

    #[test]
    fn test_put_pixel_uses_blend_mode() {
        let mut frame = Frame::new(1, 1);
        frame.clear(Color::WHITE);
        frame.put_pixel(0, 0, Color::BLACK.with_alpha(128));
        let blended = frame.pixel(0, 0).unwrap();
        assert!(blended.r > 100 && blended.r < 155, "got {blended:?}");

        frame.set_blend_mode(BlendMode::None);
        frame.put_pixel(0, 0, Color::BLACK.with_alpha(128));
        assert_eq!(frame.pixel(0, 0), Some(Color::BLACK.with_alpha(128)));
    }

    #[test]
    fn test_draw_line_hits_both_endpoints() {
        let mut frame = Frame::new(10, 10);
        frame.draw_line(Vec2::new(1.0, 1.0), Vec2::new(8.0, 5.0), Color::RED);
        assert_eq!(frame.pixel(1, 1), Some(Color::RED));
        assert_eq!(frame.pixel(8, 5), Some(Color::RED));
    }

    #[test]
    fn test_draw_line_ignores_non_finite() {
        let mut frame = Frame::new(4, 4);
        frame.draw_line(Vec2::ZERO, Vec2::new(f32::INFINITY, 1.0), Color::RED);
        assert!(frame.as_bytes().chunks(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_stroke_rect_leaves_inside_untouched() {
        let mut frame = Frame::new(5, 5);
        frame.stroke_rect(0.0, 0.0, 5.0, 5.0, Color::WHITE);
        assert_eq!(frame.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(frame.pixel(4, 4), Some(Color::WHITE));
        assert_eq!(frame.pixel(2, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_stroke_rect_far_larger_than_frame_is_clipped() {
        let mut frame = Frame::new(10, 10);
        let started = std::time::Instant::now();
        frame.stroke_rect(0.0, 0.0, 2e9, 2e9, Color::RED);
        assert!(started.elapsed() < std::time::Duration::from_millis(100));
        // Only the top and left edges fall inside the frame.
        assert_eq!(frame.pixel(5, 0), Some(Color::RED));
        assert_eq!(frame.pixel(0, 9), Some(Color::RED));
        assert_eq!(frame.pixel(9, 9), Some(Color::BLACK));

        let mut frame = Frame::new(10, 10);
        frame.stroke_rect(-5.0, -5.0, 10.0, 10.0, Color::RED);
        assert_eq!(frame.pixel(4, 0), Some(Color::RED));
        assert_eq!(frame.pixel(0, 4), Some(Color::RED));
        assert_eq!(frame.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_fill_circle_covers_center_only() {
        let mut frame = Frame::new(9, 9);
        frame.fill_circle(Vec2::new(4.5, 4.5), 2.0, Color::RED);
        assert_eq!(frame.pixel(4, 4), Some(Color::RED));
        assert_eq!(frame.pixel(0, 0), Some(Color::BLACK));
    }
}
