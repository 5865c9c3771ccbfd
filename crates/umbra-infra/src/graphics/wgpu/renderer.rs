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

//! Presents CPU-rendered frames through a fullscreen textured triangle.

use super::context::WgpuGraphicsContext;
use anyhow::Result;
use umbra_core::platform::UmbraWindow;
use umbra_core::render::{BlendMode, Frame, RenderError, Renderer};

const FRAME_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// The GPU texture a frame is uploaded into, with the bind group sampling it.
struct FrameTarget {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

/// A [`Renderer`] backed by `wgpu`.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    frame_target: Option<FrameTarget>,
    pipeline_layout: wgpu::PipelineLayout,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    shader: wgpu::ShaderModule,
    blend_mode: BlendMode,
    context: WgpuGraphicsContext,
}

impl WgpuRenderer {
    /// Creates a renderer presenting into `window`.
    ///
    /// # Errors
    /// Fails if no surface, adapter or device can be obtained for the window.
    pub fn new(instance: &wgpu::Instance, window: &impl UmbraWindow) -> Result<Self> {
        let context = pollster::block_on(WgpuGraphicsContext::new(
            instance,
            window.clone_handle_arc(),
            window.inner_size(),
        ))?;
        let device = &context.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Umbra Present Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/present.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Umbra Frame Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Umbra Present Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Nearest filtering keeps the pixel-art look when the window is scaled.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Umbra Frame Sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let blend_mode = BlendMode::None;
        let pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            context.surface_format(),
            blend_mode,
        );

        log::info!(
            "WGPU renderer ready on \"{}\" ({:?}).",
            context.adapter_name,
            context.adapter_backend
        );

        Ok(Self {
            pipeline,
            frame_target: None,
            pipeline_layout,
            bind_group_layout,
            sampler,
            shader,
            blend_mode,
            context,
        })
    }

    /// Makes sure a frame texture of the given size exists.
    fn ensure_frame_target(&mut self, width: u32, height: u32) {
        if self
            .frame_target
            .as_ref()
            .is_some_and(|target| target.size == (width, height))
        {
            return;
        }

        log::debug!("Creating {width}x{height} frame texture.");
        let device = &self.context.device;
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Umbra Frame Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FRAME_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Umbra Frame Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        self.frame_target = Some(FrameTarget {
            texture,
            bind_group,
            size: (width, height),
        });
    }
}

impl Renderer for WgpuRenderer {
    fn set_blend_mode(&mut self, mode: BlendMode) {
        if mode == self.blend_mode {
            return;
        }
        log::debug!("Switching present pipeline blend mode to {mode:?}.");
        self.pipeline = create_pipeline(
            &self.context.device,
            &self.pipeline_layout,
            &self.shader,
            self.context.surface_format(),
            mode,
        );
        self.blend_mode = mode;
    }

    fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    fn present(&mut self, frame: &Frame) -> Result<(), RenderError> {
        let output = match self.context.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring and skipping this frame.");
                self.context.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::SurfaceUnavailable(e.to_string())),
        };

        let (width, height) = (frame.width(), frame.height());
        self.ensure_frame_target(width, height);
        let Some(target) = &self.frame_target else {
            return Err(RenderError::NotInitialized);
        };
        self.context.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Umbra Present Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Umbra Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &target.bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl Drop for WgpuRenderer {
    fn drop(&mut self) {
        log::debug!("Releasing WGPU renderer on \"{}\".", self.context.adapter_name);
    }
}

/// Builds the present pipeline for one blend mode.
fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    mode: BlendMode,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Umbra Present Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: blend_state(mode),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        multiview: None,
        cache: None,
    })
}

/// Maps a blend mode onto fixed-function blending.
fn blend_state(mode: BlendMode) -> Option<wgpu::BlendState> {
    let keep_alpha = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::Zero,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    };
    match mode {
        BlendMode::None => None,
        BlendMode::Blend => Some(wgpu::BlendState::ALPHA_BLENDING),
        BlendMode::Add => Some(wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: keep_alpha,
        }),
        BlendMode::Mod => Some(wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::Dst,
                dst_factor: wgpu::BlendFactor::Zero,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: keep_alpha,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_state_mapping() {
        assert_eq!(blend_state(BlendMode::None), None);
        assert_eq!(
            blend_state(BlendMode::Blend),
            Some(wgpu::BlendState::ALPHA_BLENDING)
        );
        let add = blend_state(BlendMode::Add).expect("additive blending");
        assert_eq!(add.color.dst_factor, wgpu::BlendFactor::One);
        let modulate = blend_state(BlendMode::Mod).expect("modulation");
        assert_eq!(modulate.color.src_factor, wgpu::BlendFactor::Dst);
        assert_eq!(modulate.alpha.dst_factor, wgpu::BlendFactor::One);
    }
}
