use bytemuck::Zeroable;
use glam::{EulerRot, Mat4, Vec3};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::asset::AssetSlot;
use crate::camera::OrbitCamera;
use crate::demo::{DemoConfig, HelperDef, MeshDef, ModelDef, TimeMode};
use crate::frame::FrameInfo;
use crate::loaders::{self, ImageData, ModelData};
use crate::panel;
use crate::uniforms::UniformSet;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Device-pixel-ratio cap applied when sizing the surface. High-DPI
/// displays render at most 2x the logical resolution.
pub const PIXEL_RATIO_CAP: f64 = 2.0;

/// Physical surface dimensions for a logical viewport size and a device
/// scale factor capped at [`PIXEL_RATIO_CAP`].
pub fn surface_extent(width: u32, height: u32, scale_factor: f64) -> (u32, u32) {
    let ratio = scale_factor.min(PIXEL_RATIO_CAP).max(0.0);
    let scale = |v: u32| ((v as f64 * ratio).round() as u32).max(1);
    (scale(width), scale(height))
}

/// Overlay scale for the egui pass. egui points are logical pixels and
/// the surface is sized by the capped ratio, so the overlay's
/// pixels-per-point is that same capped ratio, not the raw scale factor.
pub fn overlay_pixels_per_point(scale_factor: f64) -> f32 {
    scale_factor.min(PIXEL_RATIO_CAP).max(0.0) as f32
}

/// Per-mesh uniforms, bind group 0 in every demo shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_pos: [f32; 3],
    time: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct SkyUniforms {
    inv_view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 3],
    _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct HelperColor {
    color: [f32; 3],
    _pad: f32,
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

struct MeshNode {
    buffers: MeshBuffers,
    def: MeshDef,
    frame_buffer: wgpu::Buffer,
    frame_group: wgpu::BindGroup,
}

/// Uploaded glTF model: every primitive draws with the demo material.
struct ModelNode {
    meshes: Vec<MeshBuffers>,
    def: ModelDef,
    frame_buffer: wgpu::Buffer,
    frame_group: wgpu::BindGroup,
}

struct HelperNode {
    buffers: MeshBuffers,
    def: HelperDef,
    frame_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    group: wgpu::BindGroup,
}

/// Texture bindings for the material (group 2). Rebuilt when the model's
/// embedded texture arrives.
struct MaterialTextures {
    layout: wgpu::BindGroupLayout,
    linear_sampler: wgpu::Sampler,
    nearest_sampler: Option<wgpu::Sampler>,
    environment: Option<wgpu::TextureView>,
    textures: Vec<wgpu::TextureView>,
    model_texture: Option<wgpu::TextureView>,
    group: wgpu::BindGroup,
}

/// wgpu renderer driven entirely by a `DemoConfig`: one material pipeline
/// built from the demo's WGSL pair, plus optional skybox and light-helper
/// pipelines, plus the egui overlay.
pub struct DemoRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    config: DemoConfig,
    uniforms: UniformSet,
    params_buffer: Option<wgpu::Buffer>,
    params_group: Option<wgpu::BindGroup>,
    params_scratch: Vec<u8>,

    frame_layout: wgpu::BindGroupLayout,
    material_pipeline: wgpu::RenderPipeline,
    material_textures: Option<MaterialTextures>,

    sky: Option<(wgpu::RenderPipeline, wgpu::BindGroup, wgpu::Buffer)>,
    helper_pipeline: Option<wgpu::RenderPipeline>,
    helpers: Vec<HelperNode>,

    meshes: Vec<MeshNode>,
    model_slot: Option<AssetSlot<ModelData>>,
    model: Option<ModelNode>,

    time: f32,
    no_ui: bool,

    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
}

impl DemoRenderer {
    pub async fn new(
        window: Arc<Window>,
        config: DemoConfig,
        assets: std::path::PathBuf,
        no_ui: bool,
    ) -> Result<Self> {
        let scale_factor = window.scale_factor();
        let logical = window.inner_size().to_logical::<f64>(scale_factor);
        let (surface_width, surface_height) = surface_extent(
            logical.width.round() as u32,
            logical.height.round() as u32,
            scale_factor,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;
        let wireframe_supported = adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE);

        let surface_config =
            Self::create_surface_config(&surface, &adapter, surface_width, surface_height);
        surface.configure(&device, &surface_config);
        let depth_view = Self::create_depth_texture(&device, &surface_config);

        let uniforms = UniformSet::new(config.uniforms.clone());

        // Bind group 0: per-mesh frame uniforms.
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_layout"),
            entries: &[uniform_layout_entry(0)],
        });

        // Bind group 1: demo parameters. Group indices are fixed
        // (frame 0, params 1, textures 2), so a demo with textures but
        // no parameters still occupies index 1 with an empty group.
        let (params_layout, params_buffer, params_group) = if uniforms.is_empty() {
            if config.has_textures() {
                let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("params_layout"),
                    entries: &[],
                });
                let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("params_group"),
                    layout: &layout,
                    entries: &[],
                });
                (Some(layout), None, Some(group))
            } else {
                (None, None, None)
            }
        } else {
            let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("params_layout"),
                entries: &[uniform_layout_entry(0)],
            });
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Params Buffer"),
                contents: &uniforms.to_bytes(),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("params_group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            (Some(layout), Some(buffer), Some(group))
        };

        // Background cubemap, shared by skybox and environment binding.
        let environment_view = config.background.map(|dir| {
            let faces = match loaders::load_cubemap(assets.join(dir)) {
                Ok(faces) => faces,
                Err(err) => {
                    log::error!("cubemap load failed: {err:#}");
                    std::array::from_fn(|_| ImageData::placeholder())
                }
            };
            create_cubemap(&device, &queue, &faces)
        });

        // Bind group 2: samplers + declared textures.
        let material_textures = if config.has_textures() {
            Some(Self::create_material_textures(
                &device,
                &queue,
                &config,
                &assets,
                environment_view.clone(),
            ))
        } else {
            None
        };

        let material_pipeline = Self::create_material_pipeline(
            &device,
            &config,
            &frame_layout,
            params_layout.as_ref(),
            material_textures.as_ref().map(|t| &t.layout),
            surface_config.format,
            wireframe_supported,
        );

        let sky = environment_view
            .as_ref()
            .map(|view| Self::create_sky_pipeline(&device, view, surface_config.format));

        let meshes = config
            .meshes
            .iter()
            .map(|def| {
                let buffers = upload_mesh(&device, &def.geometry.build());
                let (frame_buffer, frame_group) =
                    create_frame_group(&device, &frame_layout, "Mesh Frame");
                MeshNode {
                    buffers,
                    def: def.clone(),
                    frame_buffer,
                    frame_group,
                }
            })
            .collect();

        let (helper_pipeline, helpers) = if config.helpers.is_empty() {
            (None, Vec::new())
        } else {
            let (pipeline, layout) = Self::create_helper_pipeline(
                &device,
                surface_config.format,
                wireframe_supported,
            );
            let helpers = config
                .helpers
                .iter()
                .map(|def| {
                    let buffers = upload_mesh(&device, &def.geometry.build());
                    let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Helper Frame"),
                        contents: bytemuck::bytes_of(&FrameUniforms::zeroed()),
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    });
                    let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Helper Color"),
                        contents: bytemuck::bytes_of(&HelperColor::zeroed()),
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    });
                    let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("helper_group"),
                        layout: &layout,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: frame_buffer.as_entire_binding(),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: color_buffer.as_entire_binding(),
                            },
                        ],
                    });
                    HelperNode {
                        buffers,
                        def: def.clone(),
                        frame_buffer,
                        color_buffer,
                        group,
                    }
                })
                .collect();
            (Some(pipeline), helpers)
        };

        // Kick off the async model load; the loop tolerates its absence.
        let model_slot = config.model.as_ref().map(|def| {
            let path = assets.join(def.file);
            AssetSlot::spawn(move || loaders::load_model(&path))
        });

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

        log::info!("demo '{}' initialized", config.name);

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            depth_view,
            config,
            uniforms,
            params_buffer,
            params_group,
            params_scratch: Vec::new(),
            frame_layout,
            material_pipeline,
            material_textures,
            sky,
            helper_pipeline,
            helpers,
            meshes,
            model_slot,
            model: None,
            time: 0.0,
            no_ui,
            egui_renderer,
            egui_state,
            egui_ctx,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| "Failed to find appropriate adapter".into())
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        // Wireframe rasterization is optional hardware support; request
        // it only when the adapter reports it.
        let mut features = wgpu::Features::empty();
        if adapter
            .features()
            .contains(wgpu::Features::POLYGON_MODE_LINE)
        {
            features |= wgpu::Features::POLYGON_MODE_LINE;
        }

        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: features,
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| e.into())
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
            width: width.max(1),
            height: height.max(1),
            present_mode: surface_caps.present_modes[0],
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
                width: config.width,
                height: config.height,
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

    fn create_material_textures(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &DemoConfig,
        assets: &std::path::Path,
        environment: Option<wgpu::TextureView>,
    ) -> MaterialTextures {
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Linear Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let has_nearest = config.textures.iter().any(|t| t.nearest);
        let nearest_sampler = has_nearest.then(|| {
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("Nearest Sampler"),
                address_mode_u: wgpu::AddressMode::Repeat,
                address_mode_v: wgpu::AddressMode::Repeat,
                address_mode_w: wgpu::AddressMode::Repeat,
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Nearest,
                mipmap_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            })
        });

        let textures: Vec<wgpu::TextureView> = config
            .textures
            .iter()
            .map(|def| {
                let image = match loaders::load_png(assets.join(def.file)) {
                    Ok(image) => image,
                    Err(err) => {
                        log::error!("texture load failed: {err:#}");
                        ImageData::placeholder()
                    }
                };
                create_texture_2d(device, queue, &image, def.file)
            })
            .collect();

        // The model's own texture arrives with the async model; bind a
        // placeholder until then.
        let model_texture = config
            .model_texture
            .then(|| create_texture_2d(device, queue, &ImageData::placeholder(), "model texture"));

        let layout = Self::texture_layout(device, config, has_nearest);
        let group = Self::texture_group(
            device,
            &layout,
            &linear_sampler,
            nearest_sampler.as_ref(),
            environment.as_ref(),
            &textures,
            model_texture.as_ref(),
        );

        MaterialTextures {
            layout,
            linear_sampler,
            nearest_sampler,
            environment,
            textures,
            model_texture,
            group,
        }
    }

    /// Group 2 layout: binding 0 linear sampler, optional binding 1
    /// nearest sampler, then textures in declared order (environment
    /// cube, 2D textures, model texture).
    fn texture_layout(
        device: &wgpu::Device,
        config: &DemoConfig,
        has_nearest: bool,
    ) -> wgpu::BindGroupLayout {
        let mut entries = vec![wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        }];
        let mut binding = 1;

        if has_nearest {
            entries.push(wgpu::BindGroupLayoutEntry {
                binding,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
            binding += 1;
        }

        let mut texture_entry = |dimension| {
            let entry = wgpu::BindGroupLayoutEntry {
                binding,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: dimension,
                    multisampled: false,
                },
                count: None,
            };
            binding += 1;
            entry
        };

        if config.environment_map {
            entries.push(texture_entry(wgpu::TextureViewDimension::Cube));
        }
        for _ in &config.textures {
            entries.push(texture_entry(wgpu::TextureViewDimension::D2));
        }
        if config.model_texture {
            entries.push(texture_entry(wgpu::TextureViewDimension::D2));
        }

        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_layout"),
            entries: &entries,
        })
    }

    fn texture_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        linear_sampler: &wgpu::Sampler,
        nearest_sampler: Option<&wgpu::Sampler>,
        environment: Option<&wgpu::TextureView>,
        textures: &[wgpu::TextureView],
        model_texture: Option<&wgpu::TextureView>,
    ) -> wgpu::BindGroup {
        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Sampler(linear_sampler),
        }];
        let mut binding = 1;

        if let Some(sampler) = nearest_sampler {
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::Sampler(sampler),
            });
            binding += 1;
        }

        for view in environment.into_iter().chain(textures).chain(model_texture) {
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::TextureView(view),
            });
            binding += 1;
        }

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_group"),
            layout,
            entries: &entries,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn create_material_pipeline(
        device: &wgpu::Device,
        config: &DemoConfig,
        frame_layout: &wgpu::BindGroupLayout,
        params_layout: Option<&wgpu::BindGroupLayout>,
        texture_layout: Option<&wgpu::BindGroupLayout>,
        surface_format: wgpu::TextureFormat,
        wireframe_supported: bool,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(config.name),
            source: wgpu::ShaderSource::Wgsl(config.shader.into()),
        });

        // params_layout is present whenever texture_layout is, so the
        // texture group always lands at index 2.
        let mut layouts: Vec<&wgpu::BindGroupLayout> = vec![frame_layout];
        layouts.extend(params_layout);
        layouts.extend(texture_layout);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Material Pipeline Layout"),
            bind_group_layouts: &layouts,
            push_constant_ranges: &[],
        });

        let polygon_mode = if config.wireframe && wireframe_supported {
            wgpu::PolygonMode::Line
        } else {
            wgpu::PolygonMode::Fill
        };
        if config.wireframe && !wireframe_supported {
            log::warn!("wireframe not supported by this adapter, using fill");
        }

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Material Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[crate::geometry::Vertex::layout()],
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
                cull_mode: if config.double_sided {
                    None
                } else {
                    Some(wgpu::Face::Back)
                },
                polygon_mode,
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
        })
    }

    fn create_sky_pipeline(
        device: &wgpu::Device,
        environment: &wgpu::TextureView,
        surface_format: wgpu::TextureFormat,
    ) -> (wgpu::RenderPipeline, wgpu::BindGroup, wgpu::Buffer) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Skybox Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/skybox.wgsl").into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky_layout"),
            entries: &[
                uniform_layout_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::Cube,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sky Uniforms"),
            contents: bytemuck::bytes_of(&SkyUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sky Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky_group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(environment),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sky Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sky Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
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
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (pipeline, group, buffer)
    }

    fn create_helper_pipeline(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        wireframe_supported: bool,
    ) -> (wgpu::RenderPipeline, wgpu::BindGroupLayout) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Helper Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/helper.wgsl").into()),
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("helper_layout"),
            entries: &[uniform_layout_entry(0), uniform_layout_entry(1)],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Helper Pipeline Layout"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Helper Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[crate::geometry::Vertex::layout()],
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
                cull_mode: None,
                polygon_mode: if wireframe_supported {
                    wgpu::PolygonMode::Line
                } else {
                    wgpu::PolygonMode::Fill
                },
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (pipeline, layout)
    }

    /// Recompute the surface for a new logical viewport size. Idempotent.
    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f64) {
        let (physical_width, physical_height) = surface_extent(width, height, scale_factor);
        if physical_width == self.surface_config.width
            && physical_height == self.surface_config.height
        {
            return;
        }
        self.surface_config.width = physical_width;
        self.surface_config.height = physical_height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_texture(&self.device, &self.surface_config);
    }

    /// Reconfigure at the current size, after a lost/outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = Self::create_depth_texture(&self.device, &self.surface_config);
    }

    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    /// True once the async model has arrived and been uploaded. The
    /// render loop draws fine either way.
    pub fn model_resolved(&self) -> bool {
        self.model.is_some()
    }

    fn poll_model(&mut self) {
        let Some(slot) = &mut self.model_slot else {
            return;
        };
        if !slot.poll() {
            return;
        }

        // Model just resolved: upload every primitive and install the
        // demo material (all primitives draw through material_pipeline).
        let (Some(data), Some(def)) = (slot.get(), self.config.model.clone()) else {
            return;
        };

        let meshes: Vec<MeshBuffers> = data
            .meshes
            .iter()
            .map(|mesh| upload_mesh(&self.device, mesh))
            .collect();
        let (frame_buffer, frame_group) =
            create_frame_group(&self.device, &self.frame_layout, "Model Frame");

        log::info!(
            "model '{}' resolved: {} primitive(s)",
            def.file,
            meshes.len()
        );

        if self.config.model_texture {
            if let Some(image) = &data.texture {
                if let Some(textures) = &mut self.material_textures {
                    textures.model_texture =
                        Some(create_texture_2d(&self.device, &self.queue, image, "model texture"));
                    textures.group = Self::texture_group(
                        &self.device,
                        &textures.layout,
                        &textures.linear_sampler,
                        textures.nearest_sampler.as_ref(),
                        textures.environment.as_ref(),
                        &textures.textures,
                        textures.model_texture.as_ref(),
                    );
                }
            }
        }

        self.model = Some(ModelNode {
            meshes,
            def,
            frame_buffer,
            frame_group,
        });
    }

    fn advance_time(&mut self, frame: &FrameInfo) {
        match self.config.time {
            TimeMode::Elapsed => self.time = frame.time,
            TimeMode::Scaled { uniform, step } => {
                self.time += step * self.uniforms.float(uniform).unwrap_or(1.0);
            }
        }
    }

    pub fn render(
        &mut self,
        window: &Window,
        camera: &OrbitCamera,
        frame: &FrameInfo,
        fps: f32,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        self.poll_model();
        self.advance_time(frame);

        let view_proj = camera.view_projection();
        let camera_pos = camera.position();

        // Fixed per-frame spins, not scaled by delta time.
        for mesh in &mut self.meshes {
            mesh.def.rotation += mesh.def.spin;
        }
        if let Some(model) = &mut self.model {
            model.def.rotation += model.def.spin;
        }

        for mesh in &self.meshes {
            let uniforms = frame_uniforms(
                view_proj,
                mesh.def.position,
                mesh.def.rotation,
                camera_pos,
                self.time,
            );
            self.queue
                .write_buffer(&mesh.frame_buffer, 0, bytemuck::bytes_of(&uniforms));
        }
        if let Some(model) = &self.model {
            let uniforms = frame_uniforms(
                view_proj,
                model.def.position,
                model.def.rotation,
                camera_pos,
                self.time,
            );
            self.queue
                .write_buffer(&model.frame_buffer, 0, bytemuck::bytes_of(&uniforms));
        }

        // Helpers track their bound uniforms every frame.
        for helper in &self.helpers {
            let position = self
                .uniforms
                .vec3(helper.def.position_uniform)
                .unwrap_or(Vec3::ZERO);
            let color = self
                .uniforms
                .vec3(helper.def.color_uniform)
                .unwrap_or(Vec3::ONE);
            let uniforms = frame_uniforms(view_proj, position, Vec3::ZERO, camera_pos, self.time);
            self.queue
                .write_buffer(&helper.frame_buffer, 0, bytemuck::bytes_of(&uniforms));
            self.queue.write_buffer(
                &helper.color_buffer,
                0,
                bytemuck::bytes_of(&HelperColor {
                    color: color.to_array(),
                    _pad: 0.0,
                }),
            );
        }

        if let Some(buffer) = &self.params_buffer {
            let mut scratch = std::mem::take(&mut self.params_scratch);
            self.uniforms.write_into(&mut scratch);
            self.queue.write_buffer(buffer, 0, &scratch);
            self.params_scratch = scratch;
        }

        if let Some((_, _, buffer)) = &self.sky {
            let sky = SkyUniforms {
                inv_view_proj: view_proj.inverse().to_cols_array_2d(),
                camera_pos: camera_pos.to_array(),
                _pad: 0.0,
            };
            self.queue.write_buffer(buffer, 0, bytemuck::bytes_of(&sky));
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

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
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

            if let Some((pipeline, group, _)) = &self.sky {
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, group, &[]);
                pass.draw(0..3, 0..1);
            }

            pass.set_pipeline(&self.material_pipeline);
            if let Some(group) = &self.params_group {
                pass.set_bind_group(1, group, &[]);
            }
            if let Some(textures) = &self.material_textures {
                pass.set_bind_group(2, &textures.group, &[]);
            }

            for mesh in &self.meshes {
                pass.set_bind_group(0, &mesh.frame_group, &[]);
                draw_mesh(&mut pass, &mesh.buffers);
            }
            if let Some(model) = &self.model {
                pass.set_bind_group(0, &model.frame_group, &[]);
                for buffers in &model.meshes {
                    draw_mesh(&mut pass, buffers);
                }
            }

            if let Some(pipeline) = &self.helper_pipeline {
                pass.set_pipeline(pipeline);
                for helper in &self.helpers {
                    pass.set_bind_group(0, &helper.group, &[]);
                    draw_mesh(&mut pass, &helper.buffers);
                }
            }
        }

        if !self.no_ui {
            self.render_ui(window, &view, &mut encoder, fps);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn render_ui(
        &mut self,
        window: &Window,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        fps: f32,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let demo_name = self.config.name;
        let uniforms = &mut self.uniforms;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            panel::fps_overlay(ctx, fps);
            panel::controls_window(ctx, demo_name, uniforms);
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = overlay_pixels_per_point(window.scale_factor());
        let tris = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point,
        };

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
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

            // SAFETY: the render pass borrows the encoder, but egui-wgpu
            // wants 'static. The pass is dropped before the encoder is
            // touched again.
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
    }
}

fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn frame_uniforms(
    view_proj: Mat4,
    position: Vec3,
    rotation: Vec3,
    camera_pos: Vec3,
    time: f32,
) -> FrameUniforms {
    let model = Mat4::from_translation(position)
        * Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
    FrameUniforms {
        view_proj: view_proj.to_cols_array_2d(),
        model: model.to_cols_array_2d(),
        camera_pos: camera_pos.to_array(),
        time,
    }
}

fn upload_mesh(device: &wgpu::Device, mesh: &crate::geometry::MeshData) -> MeshBuffers {
    let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Vertex Buffer"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Index Buffer"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });
    MeshBuffers {
        vertex,
        index,
        index_count: mesh.indices.len() as u32,
    }
}

fn create_frame_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(&FrameUniforms::zeroed()),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (buffer, group)
}

fn draw_mesh(pass: &mut wgpu::RenderPass<'_>, buffers: &MeshBuffers) {
    pass.set_vertex_buffer(0, buffers.vertex.slice(..));
    pass.set_index_buffer(buffers.index.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(0..buffers.index_count, 0, 0..1);
}

fn create_texture_2d(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &ImageData,
    label: &str,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * image.width),
            rows_per_image: Some(image.height),
        },
        wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_cubemap(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    faces: &[ImageData; 6],
) -> wgpu::TextureView {
    let (width, height) = (faces[0].width, faces[0].height);

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Cubemap"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (layer, face) in faces.iter().enumerate() {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: layer as u32,
                },
                aspect: wgpu::TextureAspect::All,
            },
            &face.pixels,
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
    }

    texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some("Cubemap View"),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        ..Default::default()
    })
}
