use super::formats::MASK_FORMAT;
use super::helpers;


/// Offscreen color target the blob sprites are drawn into.
///
/// Produced by the mask pass every frame and sampled by the composite pass.
/// Sized to the drawable in device pixels (never below 1x1). `generation`
/// bumps on every reallocation so consumers know to rebuild bind groups.
pub(crate) struct MaskTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) generation: u32,
}

impl MaskTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (tex, view) = create(device, width, height);
        Self {
            tex,
            view,
            generation: 0,
        }
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        (self.tex.width(), self.tex.height())
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.size() == (width.max(1), height.max(1)) {
            return;
        }
        (self.tex, self.view) = create(device, width, height);
        self.generation = self.generation.wrapping_add(1);
    }
}

fn create(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_color_texture(
        device,
        "mask_tex",
        width,
        height,
        MASK_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    )
}
