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

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Combines the windowing handle traits required by graphics backends.
/// This is used to satisfy Rust's "trait object" rules.
pub trait WindowHandle: HasWindowHandle + HasDisplayHandle {}

impl<T: HasWindowHandle + HasDisplayHandle> WindowHandle for T {}

/// A shareable, thread-safe handle from which a renderer can build its surface.
pub type UmbraWindowHandle = Arc<dyn WindowHandle + Send + Sync>;

/// A trait that abstracts the behavior of a window.
///
/// Any windowing backend (Winit, SDL2, Glfw, etc.) can implement this trait
/// to host the raycaster.
pub trait UmbraWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Returns the physical dimensions (width, height) of the window's inner area.
    fn inner_size(&self) -> (u32, u32);

    /// Returns the scale factor of the window.
    fn scale_factor(&self) -> f64;

    /// Requests that the window be redrawn.
    fn request_redraw(&self);

    /// Captures (locks and hides) or releases the mouse cursor.
    ///
    /// Returns `true` if the requested state is now in effect.
    fn set_cursor_captured(&self, captured: bool) -> bool;

    /// Clones an Arc'd, thread-safe handle to the window.
    /// This is necessary for the renderer to create a surface.
    fn clone_handle_arc(&self) -> UmbraWindowHandle;

    /// Returns the unique identifier for the window.
    fn id(&self) -> u64;
}

/// Where the window is placed on screen when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPosition {
    /// Centered on the primary monitor.
    #[default]
    Centered,
    /// At an explicit physical position (top-left corner of the window).
    At {
        /// Horizontal position in physical pixels.
        x: i32,
        /// Vertical position in physical pixels.
        y: i32,
    },
}

/// Computes the top-left corner that centers a window on a monitor.
///
/// All values are in physical pixels. A window larger than the monitor is
/// pinned to the monitor's origin instead of being pushed off-screen.
///
/// # Examples
///
/// ```
/// use umbra_core::platform::window::centered_origin;
/// assert_eq!(centered_origin((0, 0), (1920, 1080), (900, 660)), (510, 210));
/// ```
pub fn centered_origin(
    monitor_origin: (i32, i32),
    monitor_size: (u32, u32),
    window_size: (u32, u32),
) -> (i32, i32) {
    let axis = |origin: i32, monitor: u32, window: u32| {
        let free = monitor.saturating_sub(window) as i32;
        origin + free / 2
    };
    (
        axis(monitor_origin.0, monitor_size.0, window_size.0),
        axis(monitor_origin.1, monitor_size.1, window_size.1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_origin_respects_monitor_offset() {
        assert_eq!(
            centered_origin((1920, 0), (1280, 720), (900, 660)),
            (1920 + 190, 30)
        );
    }

    #[test]
    fn test_centered_origin_oversized_window() {
        assert_eq!(centered_origin((10, 20), (800, 600), (900, 660)), (10, 20));
    }
}
