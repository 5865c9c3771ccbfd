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

//! Software rendering of the raycaster view and the contract for presenting it.
//!
//! The raycaster draws every frame on the CPU into a [`Frame`]. A backend
//! implementing [`Renderer`] is only responsible for getting that frame on
//! screen, composited with the configured [`BlendMode`].

pub mod frame;
pub mod scene;

pub use frame::Frame;
pub use scene::Scene;

use crate::math::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a source color is combined with the color already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// The source replaces the destination.
    None,
    /// Alpha blending: `src * a + dst * (1 - a)`.
    #[default]
    Blend,
    /// Additive blending: `dst + src * a`, saturating.
    Add,
    /// Color modulation: `src * dst`.
    Mod,
}

impl BlendMode {
    /// Combines `src` over `dst`.
    pub fn apply(self, src: Color, dst: Color) -> Color {
        match self {
            BlendMode::None => src,
            BlendMode::Blend => {
                if src.a == 255 {
                    return src;
                }
                let a = src.a as f32 / 255.0;
                let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
                Color::new(
                    mix(src.r, dst.r),
                    mix(src.g, dst.g),
                    mix(src.b, dst.b),
                    (src.a as f32 + dst.a as f32 * (1.0 - a)).round() as u8,
                )
            }
            BlendMode::Add => {
                let a = src.a as f32 / 255.0;
                let add = |s: u8, d: u8| (d as f32 + s as f32 * a).round().min(255.0) as u8;
                Color::new(add(src.r, dst.r), add(src.g, dst.g), add(src.b, dst.b), dst.a)
            }
            BlendMode::Mod => {
                let modulate = |s: u8, d: u8| ((s as u16 * d as u16) / 255) as u8;
                Color::new(
                    modulate(src.r, dst.r),
                    modulate(src.g, dst.g),
                    modulate(src.b, dst.b),
                    dst.a,
                )
            }
        }
    }
}

/// An error raised while presenting a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The presentation surface could not provide a target this frame.
    SurfaceUnavailable(String),
    /// The graphics device ran out of memory.
    OutOfMemory,
    /// The renderer was used after its resources were released.
    NotInitialized,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceUnavailable(details) => {
                write!(f, "Presentation surface unavailable: {details}")
            }
            RenderError::OutOfMemory => write!(f, "Graphics device is out of memory"),
            RenderError::NotInitialized => write!(f, "Renderer is not initialized"),
        }
    }
}

impl std::error::Error for RenderError {}

/// A drawing context bound to a window, through which frames reach the screen.
pub trait Renderer {
    /// Sets the blend mode used when compositing frames onto the window.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Returns the blend mode currently in use.
    fn blend_mode(&self) -> BlendMode;

    /// Adapts the presentation target to a new window size in physical pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Presents a finished frame.
    fn present(&mut self, frame: &Frame) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_opaque_source_replaces() {
        let src = Color::rgb(10, 20, 30);
        assert_eq!(BlendMode::Blend.apply(src, Color::WHITE), src);
        assert_eq!(BlendMode::None.apply(src.with_alpha(0), Color::WHITE), src.with_alpha(0));
    }

    #[test]
    fn test_blend_transparent_source_keeps_destination() {
        let dst = Color::rgb(40, 50, 60);
        assert_eq!(BlendMode::Blend.apply(Color::TRANSPARENT, dst), dst);
    }

    #[test]
    fn test_add_and_mod() {
        let dst = Color::rgb(200, 100, 0);
        assert_eq!(
            BlendMode::Add.apply(Color::rgb(100, 100, 100), dst),
            Color::rgb(255, 200, 100)
        );
        assert_eq!(
            BlendMode::Mod.apply(Color::rgb(255, 0, 255), dst),
            Color::rgb(200, 0, 0)
        );
    }
}
