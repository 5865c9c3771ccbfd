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

//! Binds the bootstrap chain to `winit` windows and `wgpu` rendering.

use crate::graphics::wgpu::WgpuRenderer;
use crate::platform::window::{WinitWindow, WinitWindowBuilder};
use anyhow::{anyhow, Context};
use umbra_core::config::WindowConfig;
use umbra_core::Platform;
use winit::event_loop::ActiveEventLoop;

/// Proof that a graphics backend is available. Owns the `wgpu` instance.
pub struct GraphicsSubsystem {
    instance: wgpu::Instance,
}

impl GraphicsSubsystem {
    /// Creates the `wgpu` instance and checks that at least one adapter exists.
    ///
    /// # Errors
    /// Fails when no graphics backend exposes an adapter on this machine.
    pub fn new() -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapters = instance.enumerate_adapters(wgpu::Backends::all());
        if adapters.is_empty() {
            return Err(anyhow!("no graphics adapter found on any backend"));
        }
        for adapter in &adapters {
            let info = adapter.get_info();
            log::debug!(
                "Found adapter \"{}\" ({:?}, {:?})",
                info.name,
                info.backend,
                info.device_type
            );
        }
        Ok(Self { instance })
    }

    /// The shared `wgpu` instance.
    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }
}

impl Drop for GraphicsSubsystem {
    fn drop(&mut self) {
        log::debug!("Graphics subsystem shut down.");
    }
}

/// A [`Platform`] that creates its windows on a running `winit` event loop.
pub struct WinitPlatform<'a> {
    event_loop: &'a ActiveEventLoop,
}

impl<'a> WinitPlatform<'a> {
    /// Wraps the active event loop handed to the application handler.
    pub fn new(event_loop: &'a ActiveEventLoop) -> Self {
        Self { event_loop }
    }
}

impl Platform for WinitPlatform<'_> {
    type Subsystem = GraphicsSubsystem;
    type Window = WinitWindow;
    type Renderer = WgpuRenderer;
    type Error = anyhow::Error;

    fn init_subsystem(&mut self) -> anyhow::Result<GraphicsSubsystem> {
        GraphicsSubsystem::new()
    }

    fn create_window(
        &mut self,
        _subsystem: &GraphicsSubsystem,
        config: &WindowConfig,
    ) -> anyhow::Result<WinitWindow> {
        WinitWindowBuilder::new()
            .with_title(config.title.clone())
            .with_dimensions(config.width, config.height)
            .with_borderless(config.borderless)
            .with_position(config.position)
            .build(self.event_loop)
            .context("the OS refused to create the window")
    }

    fn create_renderer(
        &mut self,
        subsystem: &GraphicsSubsystem,
        window: &WinitWindow,
    ) -> anyhow::Result<WgpuRenderer> {
        WgpuRenderer::new(subsystem.instance(), window)
    }
}
