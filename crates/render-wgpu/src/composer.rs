use std::collections::BTreeSet;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use orrery_common::BodyId;
use orrery_render::{BloomSettings, Viewport};
use orrery_scene::{Body, Scene};
use wgpu::util::DeviceExt;

use crate::camera::OrbitCamera;
use crate::mesh;
use crate::shaders;

const MAX_INSTANCES: u32 = 64;
const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    base_color: [f32; 4],
    emissive: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct BrightParams {
    threshold: f32,
    smoothing: f32,
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct BlurParams {
    direction: [f32; 2],
    radius: f32,
    _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CompositeParams {
    strength: f32,
    _pad: [f32; 3],
}

fn instance_for(body: &Body) -> InstanceData {
    let t = &body.transform;
    let model = Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.position);
    let cols = model.to_cols_array_2d();
    let base = body.material.base_color.to_array();
    let emissive = body.material.emissive.to_array();
    InstanceData {
        model_0: cols[0],
        model_1: cols[1],
        model_2: cols[2],
        model_3: cols[3],
        base_color: [base[0], base[1], base[2], 1.0],
        emissive: [
            emissive[0],
            emissive[1],
            emissive[2],
            body.material.emissive_intensity,
        ],
    }
}

fn instances_for(scene: &Scene, ids: &BTreeSet<BodyId>) -> Vec<InstanceData> {
    ids.iter()
        .filter_map(|id| scene.body(*id))
        .take(MAX_INSTANCES as usize)
        .map(instance_for)
        .collect()
}

/// Render targets and target-dependent bind groups, rebuilt as one unit on
/// resize so every pass sees the same viewport snapshot.
struct FrameTargets {
    scene_view: wgpu::TextureView,
    glow_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    half_a_view: wgpu::TextureView,
    half_b_view: wgpu::TextureView,
    bright_bind_group: wgpu::BindGroup,
    blur_h_bind_group: wgpu::BindGroup,
    blur_v_bind_group: wgpu::BindGroup,
    composite_bind_group: wgpu::BindGroup,
}

/// The composed render pipeline: base pass, glow pass over bloom-tagged
/// bodies, bright-extract, separable blur, additive composite.
pub struct BloomComposer {
    body_pipeline: wgpu::RenderPipeline,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    post_layout: wgpu::BindGroupLayout,
    composite_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    sphere_vertex_buffer: wgpu::Buffer,
    sphere_index_buffer: wgpu::Buffer,
    sphere_index_count: u32,
    base_instance_buffer: wgpu::Buffer,
    glow_instance_buffer: wgpu::Buffer,
    bright_params_buffer: wgpu::Buffer,
    blur_h_params_buffer: wgpu::Buffer,
    blur_v_params_buffer: wgpu::Buffer,
    composite_params_buffer: wgpu::Buffer,
    targets: FrameTargets,
    settings: BloomSettings,
    viewport: Viewport,
}

impl BloomComposer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        settings: BloomSettings,
    ) -> Self {
        // Globals
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&Globals {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                ambient: [1.0, 1.0, 1.0, 0.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // Post-process layouts: single-source passes and the two-source composite
        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let sampler_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        };
        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let post_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bind_group_layout"),
            entries: &[texture_entry(0), sampler_entry(1), uniform_entry(2)],
        });

        let composite_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("composite_bind_group_layout"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                sampler_entry(2),
                uniform_entry(3),
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("post_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        // Pipelines
        let body_pipeline = Self::create_body_pipeline(device, &globals_layout);
        let bright_pipeline = Self::create_post_pipeline(
            device,
            &post_layout,
            shaders::BRIGHT_SHADER,
            "fs_bright",
            HDR_FORMAT,
            "bright_pipeline",
        );
        let blur_pipeline = Self::create_post_pipeline(
            device,
            &post_layout,
            shaders::BLUR_SHADER,
            "fs_blur",
            HDR_FORMAT,
            "blur_pipeline",
        );
        let composite_pipeline = Self::create_post_pipeline(
            device,
            &composite_layout,
            shaders::COMPOSITE_SHADER,
            "fs_composite",
            surface_format,
            "composite_pipeline",
        );

        // Sphere mesh
        let (sphere_verts, sphere_indices) = mesh::uv_sphere(32, 32);
        let sphere_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere_vertex_buffer"),
            contents: bytemuck::cast_slice(&sphere_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sphere_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("sphere_index_buffer"),
            contents: bytemuck::cast_slice(&sphere_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let sphere_index_count = sphere_indices.len() as u32;

        // Instance buffers: the base and glow passes draw in the same
        // submission, so they cannot share one staging buffer.
        let instance_buffer_desc = |label| wgpu::BufferDescriptor {
            label: Some(label),
            size: (MAX_INSTANCES as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        };
        let base_instance_buffer = device.create_buffer(&instance_buffer_desc("base_instances"));
        let glow_instance_buffer = device.create_buffer(&instance_buffer_desc("glow_instances"));

        // Pass parameters, fixed for the composer's lifetime
        let bright_params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bright_params"),
            contents: bytemuck::bytes_of(&BrightParams {
                threshold: settings.threshold,
                smoothing: settings.smoothing,
                _pad: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let blur_params = |direction| BlurParams {
            direction,
            radius: settings.radius,
            _pad: 0.0,
        };
        let blur_h_params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blur_h_params"),
            contents: bytemuck::bytes_of(&blur_params([1.0, 0.0])),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let blur_v_params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("blur_v_params"),
            contents: bytemuck::bytes_of(&blur_params([0.0, 1.0])),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let composite_params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("composite_params"),
            contents: bytemuck::bytes_of(&CompositeParams {
                strength: settings.strength,
                _pad: [0.0; 3],
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let targets = Self::create_targets(
            device,
            &viewport,
            &post_layout,
            &composite_layout,
            &sampler,
            &bright_params_buffer,
            &blur_h_params_buffer,
            &blur_v_params_buffer,
            &composite_params_buffer,
        );

        Self {
            body_pipeline,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            globals_buffer,
            globals_bind_group,
            post_layout,
            composite_layout,
            sampler,
            sphere_vertex_buffer,
            sphere_index_buffer,
            sphere_index_count,
            base_instance_buffer,
            glow_instance_buffer,
            bright_params_buffer,
            blur_h_params_buffer,
            blur_v_params_buffer,
            composite_params_buffer,
            targets,
            settings,
            viewport,
        }
    }

    pub fn settings(&self) -> BloomSettings {
        self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Rebuild every internal target from one viewport snapshot. Returns
    /// with all passes consistent; nothing renders in between.
    pub fn resize(&mut self, device: &wgpu::Device, viewport: Viewport) {
        self.viewport = viewport;
        self.targets = Self::create_targets(
            device,
            &viewport,
            &self.post_layout,
            &self.composite_layout,
            &self.sampler,
            &self.bright_params_buffer,
            &self.blur_h_params_buffer,
            &self.blur_v_params_buffer,
            &self.composite_params_buffer,
        );
        tracing::debug!(
            width = viewport.physical_width(),
            height = viewport.physical_height(),
            "composer targets rebuilt"
        );
    }

    /// Render one composed frame into `surface_view`. Exactly one queue
    /// submission; the scene is read, never written.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_view: &wgpu::TextureView,
        camera: &OrbitCamera,
        scene: &Scene,
    ) {
        let ambient = scene.ambient();
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: camera.view_projection().to_cols_array_2d(),
                ambient: [
                    ambient.color.r * ambient.intensity,
                    ambient.color.g * ambient.intensity,
                    ambient.color.b * ambient.intensity,
                    0.0,
                ],
            }),
        );

        let base_instances = instances_for(scene, scene.passes().base());
        let glow_instances = instances_for(scene, scene.passes().bloom());
        if !base_instances.is_empty() {
            queue.write_buffer(
                &self.base_instance_buffer,
                0,
                bytemuck::cast_slice(&base_instances),
            );
        }
        if !glow_instances.is_empty() {
            queue.write_buffer(
                &self.glow_instance_buffer,
                0,
                bytemuck::cast_slice(&glow_instances),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("composer_encoder"),
        });

        self.draw_bodies(
            &mut encoder,
            "base_pass",
            &self.targets.scene_view,
            &self.base_instance_buffer,
            base_instances.len() as u32,
        );
        self.draw_bodies(
            &mut encoder,
            "glow_pass",
            &self.targets.glow_view,
            &self.glow_instance_buffer,
            glow_instances.len() as u32,
        );

        self.draw_post(
            &mut encoder,
            "bright_pass",
            &self.bright_pipeline,
            &self.targets.half_a_view,
            &self.targets.bright_bind_group,
        );
        self.draw_post(
            &mut encoder,
            "blur_h_pass",
            &self.blur_pipeline,
            &self.targets.half_b_view,
            &self.targets.blur_h_bind_group,
        );
        self.draw_post(
            &mut encoder,
            "blur_v_pass",
            &self.blur_pipeline,
            &self.targets.half_a_view,
            &self.targets.blur_v_bind_group,
        );
        self.draw_post(
            &mut encoder,
            "composite_pass",
            &self.composite_pipeline,
            surface_view,
            &self.targets.composite_bind_group,
        );

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn draw_bodies(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        target: &wgpu::TextureView,
        instance_buffer: &wgpu::Buffer,
        instance_count: u32,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.targets.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        if instance_count > 0 {
            pass.set_pipeline(&self.body_pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_vertex_buffer(0, self.sphere_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, instance_buffer.slice(..));
            pass.set_index_buffer(self.sphere_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.sphere_index_count, 0, 0..instance_count);
        }
    }

    fn draw_post(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        pipeline: &wgpu::RenderPipeline,
        target: &wgpu::TextureView,
        bind_group: &wgpu::BindGroup,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    fn create_body_pipeline(
        device: &wgpu::Device,
        globals_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("body_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::BODY_SHADER.into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("body_pipeline_layout"),
            bind_group_layouts: &[globals_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("body_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<mesh::Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_post_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        source: &str,
        fragment_entry: &str,
        format: wgpu::TextureFormat,
        label: &str,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_fullscreen"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(fragment_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn create_targets(
        device: &wgpu::Device,
        viewport: &Viewport,
        post_layout: &wgpu::BindGroupLayout,
        composite_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        bright_params: &wgpu::Buffer,
        blur_h_params: &wgpu::Buffer,
        blur_v_params: &wgpu::Buffer,
        composite_params: &wgpu::Buffer,
    ) -> FrameTargets {
        let width = viewport.physical_width();
        let height = viewport.physical_height();
        let half_width = (width / 2).max(1);
        let half_height = (height / 2).max(1);

        let color_target = |label: &str, w: u32, h: u32| {
            let texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: w,
                    height: h,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: HDR_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            });
            texture.create_view(&Default::default())
        };

        let scene_view = color_target("scene_target", width, height);
        let glow_view = color_target("glow_target", width, height);
        let half_a_view = color_target("bloom_half_a", half_width, half_height);
        let half_b_view = color_target("bloom_half_b", half_width, half_height);

        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_target"),
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
        let depth_view = depth_texture.create_view(&Default::default());

        let post_group = |label: &str, src: &wgpu::TextureView, params: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: post_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(src),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: params.as_entire_binding(),
                    },
                ],
            })
        };

        let bright_bind_group = post_group("bright_bind_group", &glow_view, bright_params);
        let blur_h_bind_group = post_group("blur_h_bind_group", &half_a_view, blur_h_params);
        let blur_v_bind_group = post_group("blur_v_bind_group", &half_b_view, blur_v_params);

        let composite_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("composite_bind_group"),
            layout: composite_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&half_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: composite_params.as_entire_binding(),
                },
            ],
        });

        FrameTargets {
            scene_view,
            glow_view,
            depth_view,
            half_a_view,
            half_b_view,
            bright_bind_group,
            blur_h_bind_group,
            blur_v_bind_group,
            composite_bind_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use orrery_common::{Color, Transform};
    use orrery_scene::Material;

    #[test]
    fn instance_layout_matches_shader_stride() {
        // Four model columns + base color + emissive, all vec4.
        assert_eq!(std::mem::size_of::<InstanceData>(), 6 * 16);
        assert_eq!(std::mem::size_of::<Globals>(), 64 + 16);
    }

    #[test]
    fn instance_carries_material_and_scale() {
        let body = Body {
            transform: Transform {
                position: Vec3::new(0.0, 2.0, -5.0),
                rotation: Quat::IDENTITY,
                scale: Vec3::splat(0.52),
            },
            material: Material::emissive(
                Color::new(0.5, 0.25, 0.0),
                Color::new(1.0, 0.9, 0.0),
                2.0,
            ),
        };
        let instance = instance_for(&body);
        assert_eq!(instance.model_0[0], 0.52);
        assert_eq!(instance.model_3[1], 2.0);
        assert_eq!(instance.model_3[2], -5.0);
        assert_eq!(instance.base_color, [0.5, 0.25, 0.0, 1.0]);
        assert_eq!(instance.emissive[3], 2.0);
    }

    #[test]
    fn pass_sets_select_instances() {
        let mut scene = Scene::new();
        let glowing = scene.spawn(
            Transform::default(),
            Material::emissive(Color::WHITE, Color::WHITE, 1.0),
        );
        let plain = scene.spawn(Transform::default(), Material::basic(Color::BLACK));
        scene.passes_mut().tag_all(glowing);
        scene.passes_mut().tag_base(plain);

        let base = instances_for(&scene, scene.passes().base());
        let glow = instances_for(&scene, scene.passes().bloom());
        assert_eq!(base.len(), 2);
        assert_eq!(glow.len(), 1);
        assert_eq!(glow[0].emissive[3], 1.0);
    }

    #[test]
    fn removed_bodies_drop_out_of_instance_lists() {
        let mut scene = Scene::new();
        let id = scene.spawn(Transform::default(), Material::basic(Color::WHITE));
        scene.passes_mut().tag_all(id);
        assert!(scene.remove(id).is_some());
        assert!(instances_for(&scene, scene.passes().base()).is_empty());
        assert!(instances_for(&scene, scene.passes().bloom()).is_empty());
    }
}
