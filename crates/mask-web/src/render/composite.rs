use super::helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CompositeUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) resolution: [f32; 4],
    pub(crate) time: f32,
    pub(crate) mode: u32,
    pub(crate) _pad: [u32; 2],
}

/// Composite plane: background video sampled through the mask target.
pub(crate) struct CompositeResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    bgl: wgpu::BindGroupLayout,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_composite_resources(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    bg_view: &wgpu::TextureView,
    mask_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> CompositeResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("composite_shader"),
        source: wgpu::ShaderSource::Wgsl(mask_core::COMPOSITE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("composite_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
            helpers::texture_entry(1),
            helpers::texture_entry(2),
            helpers::sampler_entry(3),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("composite_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_quad_pipeline(
        device,
        "composite_pipeline",
        &pl,
        &shader,
        "vs_plane",
        "fs_composite",
        &[],
        surface_format,
        Some(wgpu::BlendState::ALPHA_BLENDING),
    );
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        "composite_uniforms",
        std::mem::size_of::<CompositeUniforms>(),
    );
    let bind_group = bind(device, &bgl, &uniform_buffer, bg_view, mask_view, sampler);
    CompositeResources {
        pipeline,
        uniform_buffer,
        bgl,
        bind_group,
    }
}

impl CompositeResources {
    /// Point the mask/background samplers at freshly allocated textures.
    pub(crate) fn rebind(
        &mut self,
        device: &wgpu::Device,
        bg_view: &wgpu::TextureView,
        mask_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) {
        self.bind_group = bind(
            device,
            &self.bgl,
            &self.uniform_buffer,
            bg_view,
            mask_view,
            sampler,
        );
    }
}

fn bind(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    bg_view: &wgpu::TextureView,
    mask_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("composite_bg"),
        layout: bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(bg_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(mask_view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
