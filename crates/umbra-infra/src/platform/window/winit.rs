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

//! A `winit`-based implementation of the `UmbraWindow` trait.

use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use std::sync::Arc;
use umbra_core::platform::window::{centered_origin, UmbraWindow, UmbraWindowHandle};
use umbra_core::platform::WindowPosition;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    error::OsError,
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Window, WindowId},
};

/// A wrapper around a `winit::window::Window` that implements the `UmbraWindow` trait.
///
/// It uses an `Arc` internally to allow for cheap cloning and shared ownership
/// with the renderer's surface.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

/// A builder for creating `WinitWindow` instances.
pub struct WinitWindowBuilder {
    title: String,
    width: u32,
    height: u32,
    borderless: bool,
    position: WindowPosition,
}

impl WinitWindowBuilder {
    /// Creates a new `WinitWindowBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            title: "Umbra".to_string(),
            width: 900,
            height: 660,
            borderless: false,
            position: WindowPosition::Centered,
        }
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner dimensions of the window to be built.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Removes the window decorations.
    pub fn with_borderless(mut self, borderless: bool) -> Self {
        self.borderless = borderless;
        self
    }

    /// Sets where the window appears on screen.
    pub fn with_position(mut self, position: WindowPosition) -> Self {
        self.position = position;
        self
    }

    /// Builds the `WinitWindow` using the provided `winit` event loop.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<WinitWindow, OsError> {
        log::info!(
            "Building window with title: '{}' and size: {}x{}",
            self.title,
            self.width,
            self.height
        );

        let mut window_attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_decorations(!self.borderless)
            .with_resizable(false)
            .with_visible(true);

        if let Some(origin) = self.physical_origin(event_loop) {
            window_attributes = window_attributes.with_position(origin);
        }

        let window = event_loop.create_window(window_attributes)?;

        log::info!("Winit window created successfully (id: {:?}).", window.id());
        Ok(WinitWindow {
            inner: Arc::new(window),
        })
    }

    fn physical_origin(&self, event_loop: &ActiveEventLoop) -> Option<PhysicalPosition<i32>> {
        match self.position {
            WindowPosition::At { x, y } => Some(PhysicalPosition::new(x, y)),
            WindowPosition::Centered => {
                let Some(monitor) = event_loop.primary_monitor() else {
                    log::debug!("No primary monitor reported, leaving placement to the OS.");
                    return None;
                };
                let window_size =
                    LogicalSize::new(self.width, self.height).to_physical::<u32>(monitor.scale_factor());
                let monitor_origin = monitor.position();
                let monitor_size = monitor.size();
                let (x, y) = centered_origin(
                    (monitor_origin.x, monitor_origin.y),
                    (monitor_size.width, monitor_size.height),
                    (window_size.width, window_size.height),
                );
                Some(PhysicalPosition::new(x, y))
            }
        }
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WinitWindow {
    /// Returns the `winit` identifier, used to route window events.
    pub fn winit_id(&self) -> WindowId {
        self.inner.id()
    }
}

impl HasWindowHandle for WinitWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.inner.window_handle()
    }
}

impl HasDisplayHandle for WinitWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.inner.display_handle()
    }
}

impl UmbraWindow for WinitWindow {
    fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// Locks the cursor to the window, falling back to confining it where
    /// locking is unsupported (X11, Windows).
    fn set_cursor_captured(&self, captured: bool) -> bool {
        let result = if captured {
            self.inner
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.inner.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.inner.set_cursor_grab(CursorGrabMode::None)
        };

        match result {
            Ok(()) => {
                self.inner.set_cursor_visible(!captured);
                log::debug!("Cursor {}.", if captured { "captured" } else { "released" });
                true
            }
            Err(e) => {
                log::warn!("Failed to change cursor grab: {e}");
                false
            }
        }
    }

    fn clone_handle_arc(&self) -> UmbraWindowHandle {
        self.inner.clone()
    }

    fn id(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.inner.id().hash(&mut hasher);
        hasher.finish()
    }
}
