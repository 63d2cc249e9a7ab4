use super::helpers;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PlaneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
}

/// Unlit video plane behind the composite plane.
pub(crate) struct BackdropResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) uniform_buffer: wgpu::Buffer,
    bgl: wgpu::BindGroupLayout,
    pub(crate) bind_group: wgpu::BindGroup,
}

pub(crate) fn create_backdrop_resources(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    video_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> BackdropResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("backdrop_shader"),
        source: wgpu::ShaderSource::Wgsl(mask_core::BACKDROP_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("backdrop_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX),
            helpers::texture_entry(1),
            helpers::sampler_entry(2),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("backdrop_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_quad_pipeline(
        device,
        "backdrop_pipeline",
        &pl,
        &shader,
        "vs_plane",
        "fs_backdrop",
        &[],
        surface_format,
        None,
    );
    let uniform_buffer = helpers::create_uniform_buffer(
        device,
        "backdrop_uniforms",
        std::mem::size_of::<PlaneUniforms>(),
    );
    let bind_group = bind(device, &bgl, &uniform_buffer, video_view, sampler);
    BackdropResources {
        pipeline,
        uniform_buffer,
        bgl,
        bind_group,
    }
}

impl BackdropResources {
    pub(crate) fn rebind(
        &mut self,
        device: &wgpu::Device,
        video_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) {
        self.bind_group = bind(device, &self.bgl, &self.uniform_buffer, video_view, sampler);
    }
}

fn bind(
    device: &wgpu::Device,
    bgl: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    video_view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("backdrop_bg"),
        layout: bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(video_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
