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

use super::{BootstrapError, Platform};
use crate::config::WindowConfig;
use crate::render::{BlendMode, Renderer};

/// Owns the subsystem, window and renderer for the lifetime of a run,
/// together with the running flag that gates the main loop.
///
/// Fields are declared in release order: the renderer goes first, then the
/// window, then the subsystem, mirroring acquisition in reverse.
pub struct GameContext<S, W, R: Renderer> {
    renderer: Option<R>,
    window: Option<W>,
    subsystem: Option<S>,
    running: bool,
}

impl<S, W, R: Renderer> GameContext<S, W, R> {
    /// Creates an empty context. Nothing is acquired and the game is not running.
    pub fn new() -> Self {
        Self {
            renderer: None,
            window: None,
            subsystem: None,
            running: false,
        }
    }

    /// Runs the bootstrap chain against `platform`.
    ///
    /// On success the running flag is set and both the window and the
    /// renderer are available. On failure the diagnostic is logged, every
    /// resource acquired so far is released, and the running flag stays
    /// cleared.
    ///
    /// # Errors
    /// Returns a [`BootstrapError`] naming the step that failed, or
    /// [`BootstrapError::AlreadyInitialized`] if resources are already held.
    pub fn initialize<P>(
        &mut self,
        platform: &mut P,
        config: &WindowConfig,
    ) -> Result<(), BootstrapError>
    where
        P: Platform<Subsystem = S, Window = W, Renderer = R>,
    {
        if self.is_initialized() {
            return Err(BootstrapError::AlreadyInitialized);
        }
        self.running = false;

        match self.acquire(platform, config) {
            Ok(()) => {
                log::info!("Bootstrap complete, entering the main loop.");
                self.running = true;
                Ok(())
            }
            Err(e) => {
                log::error!("{e}");
                self.release();
                Err(e)
            }
        }
    }

    fn acquire<P>(&mut self, platform: &mut P, config: &WindowConfig) -> Result<(), BootstrapError>
    where
        P: Platform<Subsystem = S, Window = W, Renderer = R>,
    {
        log::info!("Initializing windowing/graphics subsystem...");
        let subsystem = platform
            .init_subsystem()
            .map_err(|e| BootstrapError::Subsystem(e.to_string()))?;
        let subsystem = self.subsystem.insert(subsystem);

        log::info!(
            "Creating window '{}' ({}x{})...",
            config.title,
            config.width,
            config.height
        );
        let window = platform
            .create_window(subsystem, config)
            .map_err(|e| BootstrapError::Window(e.to_string()))?;
        let window = self.window.insert(window);

        log::info!("Creating renderer...");
        let renderer = platform
            .create_renderer(subsystem, window)
            .map_err(|e| BootstrapError::Renderer(e.to_string()))?;
        let renderer = self.renderer.insert(renderer);

        renderer.set_blend_mode(BlendMode::Blend);
        Ok(())
    }

    /// Returns `true` while the main loop should keep going.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clears the running flag. Resources stay alive until [`teardown`](Self::teardown).
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Main loop stop requested.");
        }
        self.running = false;
    }

    /// Returns `true` if any resource is currently held.
    pub fn is_initialized(&self) -> bool {
        self.subsystem.is_some() || self.window.is_some() || self.renderer.is_some()
    }

    /// Returns the window, if one was created.
    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    /// Returns the renderer, if one was created.
    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    /// Returns the window and the renderer together, when both exist.
    pub fn window_and_renderer_mut(&mut self) -> Option<(&W, &mut R)> {
        match (self.window.as_ref(), self.renderer.as_mut()) {
            (Some(window), Some(renderer)) => Some((window, renderer)),
            _ => None,
        }
    }

    /// Stops the game and releases the renderer, the window and the subsystem, in that order.
    ///
    /// Safe to call after a partial failure and more than once: resources
    /// that were never acquired, or were already released, are skipped.
    pub fn teardown(&mut self) {
        self.running = false;
        if self.is_initialized() {
            log::info!("Tearing down game context...");
            self.release();
            log::info!("Game context teardown complete.");
        }
    }

    fn release(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            drop(renderer);
            log::debug!("Renderer released.");
        }
        if let Some(window) = self.window.take() {
            drop(window);
            log::debug!("Window released.");
        }
        if let Some(subsystem) = self.subsystem.take() {
            drop(subsystem);
            log::debug!("Subsystem released.");
        }
    }
}

impl<S, W, R: Renderer> Default for GameContext<S, W, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, W, R: Renderer> Drop for GameContext<S, W, R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
