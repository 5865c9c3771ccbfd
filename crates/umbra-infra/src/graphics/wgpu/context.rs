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

use anyhow::anyhow;
use anyhow::Result;
use umbra_core::platform::UmbraWindowHandle;
use wgpu::Instance;

/// Holds the core WGPU state objects required for presenting frames.
/// This structure manages the connection to the graphics API for one window surface.
#[derive(Debug)]
pub struct WgpuGraphicsContext {
    /// The window surface frames are presented to.
    pub surface: wgpu::Surface<'static>,
    /// The adapter chosen as compatible with `surface`.
    pub adapter: wgpu::Adapter,
    /// The logical device created from `adapter`.
    pub device: wgpu::Device,
    /// The command queue of `device`.
    pub queue: wgpu::Queue,
    /// Current swapchain configuration of `surface`.
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Human-readable adapter name, for logs.
    pub adapter_name: String,
    /// The backend API the adapter runs on.
    pub adapter_backend: wgpu::Backend,
}

impl WgpuGraphicsContext {
    /// Asynchronously initializes the graphics context for a window surface.
    ///
    /// ## Arguments
    /// * `instance` - The `wgpu::Instance` owned by the graphics subsystem.
    /// * `window_handle` - A shared handle to the window to present into.
    /// * `window_size` - The initial physical size of the window surface.
    pub async fn new(
        instance: &Instance,
        window_handle: UmbraWindowHandle,
        window_size: (u32, u32),
    ) -> Result<Self> {
        log::info!("Initializing WGPU Graphics Context...");

        // --- 1. Create Surface ---
        let surface = instance
            .create_surface(window_handle)
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;
        log::debug!("WGPU surface created for the window.");

        // --- 2. Select an adapter able to present to that surface ---
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("No suitable graphics adapter: {}", e))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        // --- 3. Create Logical Device and Command Queue from Adapter ---
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Umbra Logical Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| anyhow!("Failed to create logical device: {}", e))?;
        log::info!("Logical device and command queue created.");

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("WGPU Uncaptured Error: {e:?}");
        }));

        // --- 4. Configure Surface ---
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow!("Surface reports no supported texture format"))?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: window_size.0.max(1),
            height: window_size.1.max(1),
            present_mode: surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|m| *m == wgpu::PresentMode::Mailbox)
                .unwrap_or(wgpu::PresentMode::Fifo), // Fifo is guaranteed to be supported
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::debug!(
            "Surface configured: {:?} {}x{} ({:?})",
            surface_config.format,
            surface_config.width,
            surface_config.height,
            surface_config.present_mode
        );

        Ok(WgpuGraphicsContext {
            surface,
            adapter,
            device,
            queue,
            surface_config,
            adapter_name: adapter_info.name,
            adapter_backend: adapter_info.backend,
        })
    }

    /// Reconfigures the underlying surface (swapchain) when the window is resized.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            log::info!(
                "WGPUGraphicsContext: Resizing surface configuration to {new_width}x{new_height}"
            );
            self.surface_config.width = new_width;
            self.surface_config.height = new_height;
            self.reconfigure();
        } else {
            log::warn!(
                "WGPUGraphicsContext: Ignoring resize request to zero dimensions: {new_width}x{new_height}"
            );
        }
    }

    /// Applies the current surface configuration again, e.g. after the surface was lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Returns the current surface texture for rendering.
    pub fn get_current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    /// Returns the texture format of the swapchain.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Returns the size of the swapchain surface.
    pub fn get_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}
