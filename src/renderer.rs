use std::sync::Arc;

use anyhow::{bail, Context};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::config::ShadowConfig;
use crate::scene::{Material, Scene, Topology};
use crate::traits::{Rasterizer, Viewport};
use crate::types::{srgb_to_linear, GlobalsUniform, ObjectUniform, Vertex};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Hex colors are authored in sRGB; lighting happens in linear space
fn to_linear(color: [f32; 3]) -> [f32; 3] {
    color.map(srgb_to_linear)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Opaque,
    Lines,
    Transparent,
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    object_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pass: Pass,
    cast_shadow: bool,
}

impl GpuMesh {
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// wgpu rasterizer for the hero scene: shadow map, then opaque, line and
/// transparent geometry into a single depth-tested pass
pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    shadow_view: wgpu::TextureView,
    shadows_enabled: bool,
    globals_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    shadow_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    opaque_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    meshes: Vec<GpuMesh>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, shadows: &ShadowConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find an appropriate adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Hero Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("failed to create device")?;

        let config = Self::create_surface_config(&surface, &adapter, size.width.max(1), size.height.max(1));
        surface.configure(&device, &config);

        let depth_view = Self::create_depth_view(&device, config.width, config.height);

        let shadow_size = shadows.extent(device.limits().max_texture_dimension_2d);
        if shadows.enabled && shadow_size < shadows.map_size {
            log::warn!("shadow map clamped from {} to {shadow_size}", shadows.map_size);
        }
        let shadow_view = Self::create_shadow_view(&device, shadow_size);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: std::mem::size_of::<GlobalsUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let shadow_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_bind_group_layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT)],
        });

        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &scene_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_bind_group"),
            layout: &shadow_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shadow Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
        });

        let scene_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&scene_layout, &object_layout],
            push_constant_ranges: &[],
        });
        let shadow_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shadow Pipeline Layout"),
            bind_group_layouts: &[&shadow_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let opaque_pipeline = Self::create_scene_pipeline(
            &device,
            &scene_pipeline_layout,
            &scene_shader,
            config.format,
            SceneTarget {
                label: "Opaque Pipeline",
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: wgpu::BlendState::REPLACE,
                depth_write: true,
            },
        );
        let line_pipeline = Self::create_scene_pipeline(
            &device,
            &scene_pipeline_layout,
            &scene_shader,
            config.format,
            SceneTarget {
                label: "Line Pipeline",
                topology: wgpu::PrimitiveTopology::LineList,
                blend: wgpu::BlendState::REPLACE,
                depth_write: true,
            },
        );
        let transparent_pipeline = Self::create_scene_pipeline(
            &device,
            &scene_pipeline_layout,
            &scene_shader,
            config.format,
            SceneTarget {
                label: "Transparent Pipeline",
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: false,
            },
        );
        let shadow_pipeline = Self::create_shadow_pipeline(&device, &shadow_pipeline_layout, &shadow_shader);

        log::info!(
            "renderer ready: {}x{} {:?}, shadows {}",
            config.width,
            config.height,
            config.format,
            if shadows.enabled { "on" } else { "off" }
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth_view,
            shadow_view,
            shadows_enabled: shadows.enabled,
            globals_buffer,
            scene_bind_group,
            shadow_bind_group,
            object_layout,
            opaque_pipeline,
            line_pipeline,
            transparent_pipeline,
            shadow_pipeline,
            meshes: Vec::new(),
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            // Vsync paces ticks to the display refresh
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_shadow_view(device: &wgpu::Device, size: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Map"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_scene_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        target: SceneTarget,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(target.label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(target.blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: target.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The sky is seen from inside and the road from above only
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: target.depth_write,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_shadow_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shadow Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_shadow"),
                buffers: &[vertex_layout()],
                compilation_options: Default::default(),
            },
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Creates GPU buffers for every drawable, in draw order
    fn upload(&mut self, scene: &Scene) {
        self.meshes = scene
            .drawables()
            .iter()
            .map(|drawable| {
                let mesh = drawable.mesh;
                let geometry = &mesh.geometry;

                let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(mesh.name),
                    contents: bytemuck::cast_slice(&geometry.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(mesh.name),
                    contents: bytemuck::cast_slice(&geometry.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
                let object_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(mesh.name),
                    size: std::mem::size_of::<ObjectUniform>() as wgpu::BufferAddress,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(mesh.name),
                    layout: &self.object_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: object_buffer.as_entire_binding(),
                    }],
                });

                let pass = match (geometry.topology, mesh.material.is_transparent()) {
                    (Topology::Lines, _) => Pass::Lines,
                    (Topology::Triangles, true) => Pass::Transparent,
                    (Topology::Triangles, false) => Pass::Opaque,
                };

                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: geometry.indices.len() as u32,
                    object_buffer,
                    bind_group,
                    pass,
                    cast_shadow: mesh.cast_shadow && geometry.topology == Topology::Triangles,
                }
            })
            .collect();

        log::debug!("uploaded {} meshes", self.meshes.len());
    }

    fn write_uniforms(&self, scene: &Scene) {
        let camera = &scene.camera;
        let sun = &scene.sun;
        let ambient = to_linear(scene.ambient.color).map(|c| c * scene.ambient.intensity);
        let sun_color = to_linear(sun.color).map(|c| c * sun.intensity);
        let fog_color = to_linear(scene.fog.color);
        let shadows = self.shadows_enabled && sun.cast_shadow;

        let globals = GlobalsUniform {
            view_proj: camera.view_proj().to_cols_array_2d(),
            light_view_proj: sun.view_proj().to_cols_array_2d(),
            camera_position: camera.position.extend(1.0).to_array(),
            ambient: [ambient[0], ambient[1], ambient[2], 0.0],
            sun_direction: sun.direction().extend(0.0).to_array(),
            sun_color: [sun_color[0], sun_color[1], sun_color[2], 0.0],
            fog_color: [fog_color[0], fog_color[1], fog_color[2], 1.0],
            fog_shadow: [scene.fog.near, scene.fog.far, if shadows { 1.0 } else { 0.0 }, 0.0],
        };
        self.queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        for (gpu, drawable) in self.meshes.iter().zip(scene.drawables()) {
            let material = drawable.mesh.material;
            let [r, g, b] = to_linear(material.color());
            let params = match material {
                Material::Standard {
                    roughness, metalness, ..
                } => [roughness, metalness, 1.0, if drawable.mesh.receive_shadow { 1.0 } else { 0.0 }],
                Material::Basic { .. } | Material::Line { .. } => [1.0, 0.0, 0.0, 0.0],
            };
            let object = ObjectUniform::new(drawable.world, [r, g, b, material.opacity()], params);
            self.queue.write_buffer(&gpu.object_buffer, 0, bytemuck::bytes_of(&object));
        }
    }
}

struct SceneTarget {
    label: &'static str,
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
    depth_write: bool,
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

impl Rasterizer for Renderer {
    fn set_size(&mut self, viewport: Viewport) {
        if viewport.is_degenerate()
            || (viewport.width == self.config.width && viewport.height == self.config.height)
        {
            return;
        }

        self.config.width = viewport.width;
        self.config.height = viewport.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_view(&self.device, viewport.width, viewport.height);
        log::debug!("surface resized to {}x{}", viewport.width, viewport.height);
    }

    fn render(&mut self, scene: &Scene) -> anyhow::Result<()> {
        if self.meshes.len() != scene.drawables().len() {
            self.upload(scene);
        }

        let output = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                bail!("surface lost; reconfigured for the next frame");
            }
            Err(e) => return Err(e).context("failed to acquire surface texture"),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.write_uniforms(scene);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        if self.shadows_enabled && scene.sun.cast_shadow {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.shadow_pipeline);
            pass.set_bind_group(0, &self.shadow_bind_group, &[]);
            for mesh in self.meshes.iter().filter(|m| m.cast_shadow) {
                mesh.draw(&mut pass);
            }
        }

        {
            let [r, g, b] = to_linear(scene.background);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_bind_group(0, &self.scene_bind_group, &[]);

            for (pipeline, kind) in [
                (&self.opaque_pipeline, Pass::Opaque),
                (&self.line_pipeline, Pass::Lines),
                (&self.transparent_pipeline, Pass::Transparent),
            ] {
                pass.set_pipeline(pipeline);
                for mesh in self.meshes.iter().filter(|m| m.pass == kind) {
                    mesh.draw(&mut pass);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
