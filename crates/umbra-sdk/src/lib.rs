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

//! The public entry point of the Umbra raycaster.
//!
//! [`Engine::run`] validates a configuration, opens the window on the first
//! `resumed` event and drives input, update and rendering from the `winit`
//! event loop until the player quits.

#![warn(missing_docs)]

mod config;

pub use config::load_config;

use anyhow::{Context, Result};
use std::time::Duration;
use umbra_core::platform::UmbraWindow;
use umbra_core::render::{Frame, RenderError, Renderer};
use umbra_core::{EngineConfig, FrameClock, Game, GameContext};
use umbra_infra::{
    translate_device_event, translate_winit_input, GraphicsSubsystem, WgpuRenderer, WinitPlatform,
    WinitWindow,
};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

/// Everything a launcher needs: the engine, config loading and the config types.
pub mod prelude {
    pub use crate::{load_config, Engine};
    pub use umbra_core::config::{PlayerConfig, RenderConfig, WindowConfig, WorldConfig};
    pub use umbra_core::EngineConfig;
}

type WinitGameContext = GameContext<GraphicsSubsystem, WinitWindow, WgpuRenderer>;

const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// The internal state of the running engine, managed by the winit event loop.
struct EngineState {
    config: EngineConfig,
    context: WinitGameContext,
    game: Game,
    frame: Frame,
    clock: FrameClock,
    error: Option<anyhow::Error>,
}

impl EngineState {
    fn is_our_window(&self, id: WindowId) -> bool {
        self.context
            .window()
            .is_some_and(|window| window.winit_id() == id)
    }

    fn quit(&mut self, event_loop: &ActiveEventLoop) {
        self.context.stop();
        event_loop.exit();
    }

    /// Applies what the game asked for while handling input: cursor capture and quitting.
    fn apply_game_requests(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(capture) = self.game.take_capture_request() {
            if let Some(window) = self.context.window() {
                let applied = window.set_cursor_captured(capture);
                self.game
                    .set_cursor_captured(if applied { capture } else { !capture });
            }
        }
        if self.game.wants_quit() {
            log::info!("Quit requested, exiting event loop...");
            self.quit(event_loop);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.context.is_running() {
            return;
        }

        self.game.update();
        self.game.render(&mut self.frame);

        let Some(renderer) = self.context.renderer_mut() else {
            return;
        };
        match renderer.present(&self.frame) {
            Ok(()) => {
                if let Some(fps) = self.clock.tick() {
                    log::debug!("{fps:.1} FPS");
                }
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("Rendering error: {}", RenderError::OutOfMemory);
                self.error = Some(RenderError::OutOfMemory.into());
                self.quit(event_loop);
            }
            Err(e) => log::warn!("Rendering error: {e}"),
        }
    }
}

impl ApplicationHandler for EngineState {
    /// Runs the bootstrap chain the first time the event loop is ready.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.context.is_initialized() {
            return; // Avoid re-initializing if the app is resumed multiple times.
        }

        log::info!("Application resumed. Bootstrapping window and renderer...");
        let mut platform = WinitPlatform::new(event_loop);
        if let Err(e) = self.context.initialize(&mut platform, &self.config.window) {
            self.error = Some(e.into());
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if !self.is_our_window(id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                self.quit(event_loop);
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.context.renderer_mut() {
                    log::info!("Window resized to: {}x{}", size.width, size.height);
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => {
                log::debug!("Window lost focus, releasing inputs.");
                self.game.release_inputs();
                if let Some(window) = self.context.window() {
                    window.set_cursor_captured(false);
                }
                self.game.set_cursor_captured(false);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {
                if let Some(input_event) = translate_winit_input(&event) {
                    log::trace!("Input event: {input_event:?}");
                    self.game.process_input(&input_event);
                    self.apply_game_requests(event_loop);
                }
            }
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let Some(input_event) = translate_device_event(&event) {
            self.game.process_input(&input_event);
        }
    }

    /// Keeps frames coming while the game is running.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.context.is_running() {
            return;
        }
        if let Some(window) = self.context.window() {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!(
            "Event loop exiting after {} frames.",
            self.clock.total_frames()
        );
        self.context.teardown();
    }
}

/// The public entry point for the raycaster.
pub struct Engine;

impl Engine {
    /// Runs the raycaster with `config`, blocking until the player quits.
    ///
    /// # Errors
    /// Fails if the configuration is invalid, if bootstrapping the window or
    /// the renderer fails, or if the graphics device runs out of memory.
    pub fn run(config: EngineConfig) -> Result<()> {
        log::info!("Umbra: Starting...");
        let game = Game::new(&config).context("Invalid configuration")?;
        let frame = Frame::new(config.window.width, config.window.height);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = EngineState {
            config,
            context: WinitGameContext::new(),
            game,
            frame,
            clock: FrameClock::new(FPS_REPORT_INTERVAL),
            error: None,
        };

        event_loop.run_app(&mut state)?;
        state.context.teardown();

        match state.error.take() {
            Some(e) => Err(e),
            None => {
                log::info!("Umbra: Clean shutdown.");
                Ok(())
            }
        }
    }
}
