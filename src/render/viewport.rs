//! Window surface, scene pipeline and overlay rendering.
//!
//! The viewport owns the GPU device and one scene at a time. Page changes
//! swap the scene through a small state machine: `Idle` for text-only
//! pages, `Loading` while a background read is in flight, then `Ready`
//! with uploaded geometry or `Failed` with the load error.

use anyhow::{Context, Result};
use glam::Mat4;
use std::path::PathBuf;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::pages::SceneSpec;
use crate::render::camera::ActiveCamera;
use crate::scene::animation::NodeAnimator;
use crate::scene::asset::{EmbeddedCamera, NodeHandle, ParkAsset};
use crate::scene::loader::{self, AssetLoad};
use crate::ui::{self, UiFrame, UiResponse};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Background behind every page, scene or not.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.075,
    g: 0.086,
    b: 0.110,
    a: 1.0,
};

/// Direction the key light travels (xyz) and its color; the color's w
/// channel is the flat ambient strength.
const LIGHT_DIRECTION: [f32; 4] = [-0.577, -0.577, -0.577, 0.0];
const LIGHT_COLOR: [f32; 4] = [1.0, 0.98, 0.92, 0.35];

// === GPU Data Structures ===

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniform {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
    base_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    const fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

// === Scene State ===

/// What the overlay should say about the current page's scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SceneStatus {
    /// Text-only page, nothing mounted.
    Idle,
    /// Load in flight; integer percent read so far.
    Loading(u8),
    Ready,
    Failed(String),
}

enum SceneState {
    Idle,
    Loading(AssetLoad),
    Ready(SceneInstance),
    Failed(String),
}

/// One mesh primitive ready to draw: geometry buffers plus its own model
/// uniform, rewritten each frame from the animated node transform.
struct Drawable {
    node: usize,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    base_color: [f32; 4],
}

/// Camera source resolved once at scene build time. An embedded camera
/// tracks its node every frame, so an animated camera keeps working.
enum CameraRig {
    Embedded {
        camera: EmbeddedCamera,
        node: NodeHandle,
        fov_degrees: f32,
    },
    Framed(ActiveCamera),
}

struct SceneInstance {
    asset: ParkAsset,
    animators: Vec<NodeAnimator>,
    drawables: Vec<Drawable>,
    rig: CameraRig,
    transforms: Vec<Mat4>,
}

impl SceneInstance {
    fn advance(&mut self, dt: f32) {
        for animator in &mut self.animators {
            animator.advance(&mut self.asset, dt);
        }
        self.transforms = self.asset.global_transforms();
    }

    fn active_camera(&self) -> ActiveCamera {
        match self.rig {
            CameraRig::Embedded {
                camera,
                node,
                fov_degrees,
            } => ActiveCamera::from_embedded(camera, self.transforms[node.0], fov_degrees),
            CameraRig::Framed(camera) => camera,
        }
    }

    fn upload(&self, queue: &wgpu::Queue) {
        for drawable in &self.drawables {
            let uniform = ModelUniform {
                model: self.transforms[drawable.node].to_cols_array_2d(),
                base_color: drawable.base_color,
            };
            queue.write_buffer(&drawable.model_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
    }
}

// === Viewport ===

pub struct Viewport {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    asset_root: PathBuf,
    spec: Option<SceneSpec>,
    scene: SceneState,
}

impl Viewport {
    pub async fn new(window: Arc<Window>, asset_root: PathBuf, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable graphics adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("failed to acquire graphics device")?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size, vsync);
        surface.configure(&device, &surface_config);
        let depth_view = Self::create_depth_texture(&device, &surface_config);

        let (pipeline, frame_layout, model_layout) =
            Self::create_scene_pipeline(&device, surface_config.format);

        let initial_uniform = FrameUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            light_dir: LIGHT_DIRECTION,
            light_color: LIGHT_COLOR,
        };
        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform"),
            contents: bytemuck::cast_slice(&[initial_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
            label: Some("frame_bind_group"),
        });

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            size,
            depth_view,
            pipeline,
            frame_buffer,
            frame_bind_group,
            model_layout,
            egui_renderer,
            egui_state,
            egui_ctx,
            asset_root,
            spec: None,
            scene: SceneState::Idle,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: PhysicalSize<u32>,
        vsync: bool,
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
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
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

    fn create_scene_pipeline(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> (
        wgpu::RenderPipeline,
        wgpu::BindGroupLayout,
        wgpu::BindGroupLayout,
    ) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let uniform_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry],
            label: Some("frame_bind_group_layout"),
        });
        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[uniform_entry],
            label: Some("model_bind_group_layout"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &model_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Exhibit assets come from several tools; winding is not
                // reliable enough to cull on.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        (pipeline, frame_layout, model_layout)
    }

    /// Swap to a page's scene. Equal specs are left alone so re-entering
    /// the same page does not reload the asset; `None` unmounts.
    pub fn set_page(&mut self, spec: Option<SceneSpec>) {
        if spec == self.spec {
            return;
        }
        self.spec = spec;
        self.scene = match &self.spec {
            Some(spec) => {
                let path = self.asset_root.join(spec.asset);
                log::info!("mounting scene {}", path.display());
                SceneState::Loading(loader::begin_load(&path))
            }
            None => SceneState::Idle,
        };
    }

    pub fn scene_status(&self) -> SceneStatus {
        match &self.scene {
            SceneState::Idle => SceneStatus::Idle,
            SceneState::Loading(load) => SceneStatus::Loading(load.percent()),
            SceneState::Ready(_) => SceneStatus::Ready,
            SceneState::Failed(message) => SceneStatus::Failed(message.clone()),
        }
    }

    /// Per-frame work: finish an in-flight load without blocking, then
    /// advance animations and push the new transforms to the GPU.
    pub fn update(&mut self, dt: f32) {
        let finished = match &self.scene {
            SceneState::Loading(load) => load.try_finish(),
            _ => None,
        };
        if let Some(result) = finished {
            self.scene = match (result, self.spec) {
                (Ok(asset), Some(spec)) => SceneState::Ready(self.build_instance(asset, &spec)),
                (Ok(_), None) => SceneState::Idle,
                (Err(err), _) => SceneState::Failed(format!("{err:#}")),
            };
        }

        if let SceneState::Ready(instance) = &mut self.scene {
            instance.advance(dt);
            instance.upload(&self.queue);
        }
    }

    /// Turn a parsed asset into GPU-resident drawables, bind the page's
    /// motions to their nodes and resolve the camera, all exactly once.
    fn build_instance(&self, asset: ParkAsset, spec: &SceneSpec) -> SceneInstance {
        let animators: Vec<NodeAnimator> = spec
            .animations
            .iter()
            .filter_map(|animation| NodeAnimator::bind(&asset, animation.target, animation.motion))
            .collect();

        let transforms = asset.global_transforms();

        let rig = match asset.camera() {
            Some((camera, node)) => CameraRig::Embedded {
                camera,
                node,
                fov_degrees: spec.fov_degrees,
            },
            None => {
                let bounds = asset.bounds(&transforms);
                CameraRig::Framed(ActiveCamera::framing(bounds, spec.fov_degrees))
            }
        };

        let mut drawables = Vec::new();
        for (node_index, node) in asset.nodes().iter().enumerate() {
            let Some(mesh) = node.mesh else { continue };
            for primitive in &asset.meshes()[mesh].primitives {
                let vertices: Vec<Vertex> = primitive
                    .positions
                    .iter()
                    .zip(&primitive.normals)
                    .map(|(&position, &normal)| Vertex { position, normal })
                    .collect();

                let vertex_buffer = self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Scene Vertices"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
                let index_buffer = self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Scene Indices"),
                        contents: bytemuck::cast_slice(&primitive.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    });

                let uniform = ModelUniform {
                    model: transforms[node_index].to_cols_array_2d(),
                    base_color: primitive.base_color,
                };
                let model_buffer = self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Model Uniform"),
                        contents: bytemuck::cast_slice(&[uniform]),
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    });
                let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &self.model_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: model_buffer.as_entire_binding(),
                    }],
                    label: Some("model_bind_group"),
                });

                drawables.push(Drawable {
                    node: node_index,
                    vertex_buffer,
                    index_buffer,
                    index_count: primitive.indices.len() as u32,
                    model_buffer,
                    bind_group,
                    base_color: primitive.base_color,
                });
            }
        }

        SceneInstance {
            asset,
            animators,
            drawables,
            rig,
            transforms,
        }
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_texture(&self.device, &self.surface_config);
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Let egui see the event first; true means it was consumed.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    pub fn render(
        &mut self,
        window: &Window,
        frame: &UiFrame,
    ) -> std::result::Result<UiResponse, wgpu::SurfaceError> {
        let aspect = self.size.width as f32 / self.size.height.max(1) as f32;
        if let SceneState::Ready(instance) = &self.scene {
            let camera = instance.active_camera();
            let uniform = FrameUniform {
                view_proj: camera.view_proj(aspect).to_cols_array_2d(),
                light_dir: LIGHT_DIRECTION,
                light_color: LIGHT_COLOR,
            };
            self.queue
                .write_buffer(&self.frame_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        // Scene pass
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
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

            if let SceneState::Ready(instance) = &self.scene {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
                for drawable in &instance.drawables {
                    render_pass.set_bind_group(1, &drawable.bind_group, &[]);
                    render_pass.set_vertex_buffer(0, drawable.vertex_buffer.slice(..));
                    render_pass
                        .set_index_buffer(drawable.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..drawable.index_count, 0, 0..1);
                }
            }
        }

        // egui pass - UI overlay
        let raw_input = self.egui_state.take_egui_input(window);
        let mut response = UiResponse::default();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            response = ui::draw(ctx, frame);
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.size.width, self.size.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // SAFETY: The render pass lifetime is actually tied to the encoder,
            // but egui-wgpu requires 'static. This is safe because we drop the
            // render pass before using the encoder again.
            let render_pass_static = unsafe {
                std::mem::transmute::<&mut wgpu::RenderPass<'_>, &mut wgpu::RenderPass<'static>>(
                    &mut render_pass,
                )
            };

            self.egui_renderer
                .render(render_pass_static, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(response)
    }
}
