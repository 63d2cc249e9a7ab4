use super::formats::{SPRITE_FORMAT, VIDEO_FORMAT};
use super::helpers;
use web_sys as web;

// HTMLMediaElement.HAVE_CURRENT_DATA
const HAVE_CURRENT_DATA: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Upload {
    /// No frame available yet; the previous contents stay bound.
    NotReady,
    Updated,
    /// The texture was reallocated; bind groups must be rebuilt.
    Recreated,
}

fn external_usage() -> wgpu::TextureUsages {
    wgpu::TextureUsages::TEXTURE_BINDING
        | wgpu::TextureUsages::COPY_DST
        | wgpu::TextureUsages::RENDER_ATTACHMENT
}

fn copy_external(
    queue: &wgpu::Queue,
    source: wgpu::ExternalImageSource,
    texture: &wgpu::Texture,
) {
    queue.copy_external_image_to_texture(
        &wgpu::CopyExternalImageSourceInfo {
            source,
            origin: wgpu::Origin2d::ZERO,
            flip_y: false,
        },
        wgpu::CopyExternalImageDestInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
            color_space: wgpu::PredefinedColorSpace::Srgb,
            premultiplied_alpha: false,
        },
        texture.size(),
    );
}

/// GPU texture mirroring the current frame of a looping `<video>`.
pub(crate) struct VideoTexture {
    video: web::HtmlVideoElement,
    label: &'static str,
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    ready: bool,
}

impl VideoTexture {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        video: web::HtmlVideoElement,
        label: &'static str,
    ) -> Self {
        let (tex, view) = helpers::create_placeholder_texture(device, queue, label, VIDEO_FORMAT);
        Self {
            video,
            label,
            tex,
            view,
            ready: false,
        }
    }

    pub(crate) fn refresh(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) -> Upload {
        let w = self.video.video_width();
        let h = self.video.video_height();
        if self.video.ready_state() < HAVE_CURRENT_DATA || w == 0 || h == 0 {
            if self.ready {
                log::debug!("[video] {} stalled", self.label);
                self.ready = false;
            }
            return Upload::NotReady;
        }
        if !self.ready {
            log::info!("[video] {} ready {}x{}", self.label, w, h);
            self.ready = true;
        }
        let mut status = Upload::Updated;
        if (self.tex.width(), self.tex.height()) != (w, h) {
            (self.tex, self.view) = helpers::create_color_texture(
                device,
                self.label,
                w,
                h,
                VIDEO_FORMAT,
                external_usage(),
            );
            status = Upload::Recreated;
        }
        copy_external(
            queue,
            wgpu::ExternalImageSource::HTMLVideoElement(self.video.clone()),
            &self.tex,
        );
        status
    }
}

/// Upload a decoded image once (the blob sprite), stored without sRGB decode.
pub(crate) fn image_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &web::HtmlImageElement,
    label: &str,
) -> (wgpu::Texture, wgpu::TextureView) {
    let (tex, view) = helpers::create_color_texture(
        device,
        label,
        image.natural_width(),
        image.natural_height(),
        SPRITE_FORMAT,
        external_usage(),
    );
    copy_external(
        queue,
        wgpu::ExternalImageSource::HTMLImageElement(image.clone()),
        &tex,
    );
    (tex, view)
}
