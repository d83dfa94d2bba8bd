//! wgpu implementation of the render backend
//!
//! One pipeline, one growing vertex/index buffer pair, one bind group per
//! texture. Every `draw_indexed` call uploads the staged geometry and
//! submits a single render pass that loads the existing frame contents,
//! giving the immediate-submission semantics the render target expects.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::{debug, info, warn};
use vitrine_core::types::Color;
use vitrine_core::{Result, VitrineError};

use super::{RenderBackend, TextureId};
use crate::clip::ScissorRect;
use crate::vertex::Vertex;

const INITIAL_VERTEX_CAPACITY: usize = 4096;
const INITIAL_INDEX_CAPACITY: usize = 6144;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Globals {
    transform: [[f32; 4]; 4],
}

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

/// GPU resources are acquired in [`WgpuBackend::new`] and released when the
/// backend is dropped; there is no per-call acquisition.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    textures: HashMap<TextureId, GpuTexture>,
    next_texture: u32,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_buffer: wgpu::Buffer,
    index_capacity: usize,
    frame: Option<Frame>,
    bound_texture: Option<TextureId>,
    scissor: Option<ScissorRect>,
    clear_color: wgpu::Color,
}

impl WgpuBackend {
    /// Create the backend for a window.
    ///
    /// Fails hard when no compatible adapter or device can be acquired;
    /// there is no software fallback at this level.
    pub fn new<W>(window: W, width: u32, height: u32) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| VitrineError::backend(format!("failed to create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| VitrineError::backend("no compatible graphics adapter"))?;
        info!(adapter = %adapter.get_info().name, "selected graphics adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("vitrine device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))
        .map_err(|e| VitrineError::backend(format!("failed to acquire device: {e}")))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vitrine gui shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/gui.wgsl").into()),
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vitrine globals layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vitrine texture layout"),
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
            label: Some("vitrine pipeline layout"),
            bind_group_layouts: &[&globals_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vitrine gui pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vitrine globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vitrine globals bind group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("vitrine sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let vertex_buffer = Self::make_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);
        let index_buffer = Self::make_index_buffer(&device, INITIAL_INDEX_CAPACITY);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            pipeline,
            globals_buffer,
            globals_bind_group,
            texture_layout,
            sampler,
            textures: HashMap::new(),
            next_texture: 1,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            index_buffer,
            index_capacity: INITIAL_INDEX_CAPACITY,
            frame: None,
            bound_texture: None,
            scissor: None,
            clear_color: wgpu::Color::BLACK,
        })
    }

    fn make_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vitrine vertex buffer"),
            size: (capacity * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn make_index_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vitrine index buffer"),
            size: (capacity * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Grow the staging buffers to hold the given counts. Capacity doubles
    /// (next power of two) and is never reduced.
    fn ensure_capacity(&mut self, vertex_count: usize, index_count: usize) {
        if vertex_count > self.vertex_capacity {
            let capacity = vertex_count.next_power_of_two();
            debug!(from = self.vertex_capacity, to = capacity, "growing vertex buffer");
            self.vertex_buffer = Self::make_vertex_buffer(&self.device, capacity);
            self.vertex_capacity = capacity;
        }
        if index_count > self.index_capacity {
            let capacity = index_count.next_power_of_two();
            debug!(from = self.index_capacity, to = capacity, "growing index buffer");
            self.index_buffer = Self::make_index_buffer(&self.device, capacity);
            self.index_capacity = capacity;
        }
    }

    fn make_texture_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        view: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vitrine texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn upload_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> GpuTexture {
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("vitrine texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group =
            Self::make_texture_bind_group(&self.device, &self.texture_layout, &self.sampler, &view);

        GpuTexture {
            texture,
            bind_group,
            size: (width, height),
        }
    }
}

impl RenderBackend for WgpuBackend {
    fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = wgpu::Color {
            r: color.r as f64,
            g: color.g as f64,
            b: color.b as f64,
            a: color.a as f64,
        };
    }

    fn begin_frame(&mut self) -> Result<()> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| VitrineError::backend(format!("failed to acquire frame: {e}")))?
            }
            Err(e) => {
                return Err(VitrineError::backend(format!("failed to acquire frame: {e}")));
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vitrine clear encoder"),
            });
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vitrine clear pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        self.queue.submit(std::iter::once(encoder.finish()));

        self.frame = Some(Frame { surface_texture, view });
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        match self.frame.take() {
            Some(frame) => {
                drop(frame.view);
                frame.surface_texture.present();
                Ok(())
            }
            None => Err(VitrineError::backend("end_frame without begin_frame")),
        }
    }

    fn create_texture(&mut self, width: u32, height: u32, pixels: &[u8]) -> TextureId {
        let gpu_texture = self.upload_texture(width, height, pixels);
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, gpu_texture);
        id
    }

    fn write_texture(&mut self, id: TextureId, width: u32, height: u32, pixels: &[u8]) {
        match self.textures.get(&id) {
            Some(existing) if existing.size == (width, height) => {
                let extent = wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                };
                self.queue.write_texture(
                    wgpu::ImageCopyTexture {
                        texture: &existing.texture,
                        mip_level: 0,
                        origin: wgpu::Origin3d::ZERO,
                        aspect: wgpu::TextureAspect::All,
                    },
                    pixels,
                    wgpu::ImageDataLayout {
                        offset: 0,
                        bytes_per_row: Some(4 * width),
                        rows_per_image: Some(height),
                    },
                    extent,
                );
            }
            Some(_) => {
                // Size changed: replace the texture under the same id.
                let gpu_texture = self.upload_texture(width, height, pixels);
                self.textures.insert(id, gpu_texture);
            }
            None => warn!(?id, "write_texture on unknown texture"),
        }
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if self.textures.remove(&id).is_none() {
            warn!(?id, "destroy_texture on unknown texture");
        }
        if self.bound_texture == Some(id) {
            self.bound_texture = None;
        }
    }

    fn bind_texture(&mut self, id: TextureId) {
        self.bound_texture = Some(id);
    }

    fn set_scissor(&mut self, scissor: Option<ScissorRect>) {
        self.scissor = scissor;
    }

    fn set_transform(&mut self, matrix: [[f32; 4]; 4]) {
        self.queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals { transform: matrix }),
        );
    }

    fn draw_indexed(&mut self, vertices: &[Vertex], indices: &[u32]) {
        if vertices.is_empty() || indices.is_empty() {
            return;
        }
        // A zero-area scissor rejects everything; skip the submission.
        if matches!(self.scissor, Some([_, _, w, h]) if w == 0 || h == 0) {
            return;
        }
        self.ensure_capacity(vertices.len(), indices.len());
        self.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        self.queue
            .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(indices));

        let Some(frame) = &self.frame else {
            warn!("draw_indexed outside of a frame");
            return;
        };
        let Some(texture) = self.bound_texture.and_then(|id| self.textures.get(&id)) else {
            warn!("draw_indexed without a bound texture");
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("vitrine batch encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("vitrine batch pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_bind_group(1, &texture.bind_group, &[]);
            if let Some([x, y, w, h]) = self.scissor {
                pass.set_scissor_rect(x, y, w, h);
            }
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
