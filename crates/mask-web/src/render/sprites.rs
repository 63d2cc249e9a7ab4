use super::formats::MASK_FORMAT;
use super::helpers;
use super::targets::MaskTarget;
use mask_core::{ParticleInstance, SPRITE_SIZE};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SpriteUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) half_size: f32,
    pub(crate) _pad: [f32; 3],
}

/// Additive colour and alpha: `src * src.a + dst`.
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Shared sprite quad + material, drawn once per particle from an instance
/// buffer. The sprite texture is uploaded once at startup.
pub(crate) struct SpriteResources {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    bind_group: wgpu::BindGroup,
    _sprite_tex: wgpu::Texture,
}

pub(crate) fn create_sprite_resources(
    device: &wgpu::Device,
    sprite: (wgpu::Texture, wgpu::TextureView),
    sampler: &wgpu::Sampler,
    capacity: usize,
) -> SpriteResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("mask_shader"),
        source: wgpu::ShaderSource::Wgsl(mask_core::MASK_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("sprite_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
            helpers::texture_entry(1),
            helpers::sampler_entry(2),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("sprite_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ParticleInstance>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![0 => Float32x4],
    };
    let pipeline = helpers::make_quad_pipeline(
        device,
        "sprite_pipeline",
        &pl,
        &shader,
        "vs_sprite",
        "fs_sprite",
        &[instance_layout],
        MASK_FORMAT,
        Some(ADDITIVE),
    );
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        "sprite_uniforms",
        std::mem::size_of::<SpriteUniforms>(),
    );
    let capacity = capacity.max(1);
    let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("sprite_instances"),
        size: capacity as u64 * std::mem::size_of::<ParticleInstance>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let (sprite_tex, sprite_view) = sprite;
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("sprite_bg"),
        layout: &bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&sprite_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    SpriteResources {
        pipeline,
        uniform_buffer,
        instance_buffer,
        capacity,
        bind_group,
        _sprite_tex: sprite_tex,
    }
}

impl SpriteResources {
    /// Mask pass: clear the target to transparent and splat every particle
    /// additively, using the main camera so sprites line up with picking.
    pub(crate) fn encode_mask_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        queue: &wgpu::Queue,
        target: &MaskTarget,
        view_proj: glam::Mat4,
        instances: &[ParticleInstance],
    ) {
        let n = instances.len().min(self.capacity);
        let u = SpriteUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            half_size: SPRITE_SIZE * 0.5,
            _pad: [0.0; 3],
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances[..n]));

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("mask_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..n as u32);
    }
}
