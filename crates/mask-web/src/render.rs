use mask_core::{backdrop_model, ParticleInstance, Sketch};
use web_sys as web;

mod backdrop;
mod composite;
mod formats;
mod helpers;
mod sprites;
mod targets;
mod video;

use backdrop::{create_backdrop_resources, BackdropResources, PlaneUniforms};
use composite::{create_composite_resources, CompositeResources, CompositeUniforms};
use sprites::{create_sprite_resources, SpriteResources};
use targets::MaskTarget;
use video::{Upload, VideoTexture};

/// External sources sampled by the renderer.
pub struct MediaSources {
    /// Seen through the mask on the composite plane.
    pub background: web::HtmlVideoElement,
    /// Drawn on the backdrop plane behind it.
    pub backdrop: web::HtmlVideoElement,
    pub sprite: web::HtmlImageElement,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    linear_sampler: wgpu::Sampler,

    // Pass 1: particles -> mask target
    mask: MaskTarget,
    sprites: SpriteResources,
    instances: Vec<ParticleInstance>,

    // Pass 2: backdrop + composite -> surface
    backdrop: BackdropResources,
    composite: CompositeResources,
    bg_video: VideoTexture,
    backdrop_video: VideoTexture,
    composite_mask_generation: u32,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        media: MediaSources,
        particle_capacity: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?} {:?}", width, height, format, alpha_mode);

        let linear_sampler = helpers::create_linear_sampler(&device);
        let mask = MaskTarget::new(&device, width, height);
        let sprite = video::image_texture(&device, &queue, &media.sprite, "sprite_tex");
        let sprites = create_sprite_resources(&device, sprite, &linear_sampler, particle_capacity);

        let bg_video = VideoTexture::new(&device, &queue, media.background, "bg_video");
        let backdrop_video = VideoTexture::new(&device, &queue, media.backdrop, "backdrop_video");
        let backdrop =
            create_backdrop_resources(&device, format, &backdrop_video.view, &linear_sampler);
        let composite = create_composite_resources(
            &device,
            format,
            &bg_video.view,
            &mask.view,
            &linear_sampler,
        );
        let composite_mask_generation = mask.generation;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            linear_sampler,
            mask,
            sprites,
            instances: Vec::with_capacity(particle_capacity),
            backdrop,
            composite,
            bg_video,
            backdrop_video,
            composite_mask_generation,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // Mask follows the drawable; composite rebinds on the next frame
            self.mask.recreate(&self.device, width, height);
            log::info!("[gpu] resized to {}x{}", width, height);
        }
    }

    /// Reconfigure after the surface was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame: mask pass into the offscreen target, then the backdrop
    /// and composite plane onto the surface.
    pub fn render(&mut self, sketch: &Sketch) -> Result<(), wgpu::SurfaceError> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }
        self.refresh_media();

        let camera = &sketch.stage().camera;
        let view_proj = camera.view_projection();
        sketch.field().fill_instances(&mut self.instances);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: particles -> mask
        self.sprites.encode_mask_pass(
            &mut encoder,
            &self.queue,
            &self.mask,
            view_proj,
            &self.instances,
        );

        // Hand the mask to the composite program
        if self.composite_mask_generation != self.mask.generation {
            self.composite.rebind(
                &self.device,
                &self.bg_video.view,
                &self.mask.view,
                &self.linear_sampler,
            );
            self.composite_mask_generation = self.mask.generation;
        }

        let vp = view_proj.to_cols_array_2d();
        let plane = PlaneUniforms {
            view_proj: vp,
            model: backdrop_model().to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.backdrop.uniform_buffer, 0, bytemuck::bytes_of(&plane));
        let u = sketch.uniforms();
        let cu = CompositeUniforms {
            view_proj: vp,
            model: sketch.stage().plane_model().to_cols_array_2d(),
            resolution: u.resolution.to_array(),
            time: u.time,
            mode: u.mode.as_u32(),
            _pad: [0; 2],
        };
        self.queue
            .write_buffer(&self.composite.uniform_buffer, 0, bytemuck::bytes_of(&cu));

        // Pass 2: backdrop + composite -> surface
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
            rpass.set_pipeline(&self.backdrop.pipeline);
            rpass.set_bind_group(0, &self.backdrop.bind_group, &[]);
            rpass.draw(0..6, 0..1);
            rpass.set_pipeline(&self.composite.pipeline);
            rpass.set_bind_group(0, &self.composite.bind_group, &[]);
            rpass.draw(0..6, 0..1);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl<'a> GpuState<'a> {
    fn refresh_media(&mut self) {
        if self.bg_video.refresh(&self.device, &self.queue) == Upload::Recreated {
            self.composite.rebind(
                &self.device,
                &self.bg_video.view,
                &self.mask.view,
                &self.linear_sampler,
            );
            self.composite_mask_generation = self.mask.generation;
        }
        if self.backdrop_video.refresh(&self.device, &self.queue) == Upload::Recreated {
            self.backdrop
                .rebind(&self.device, &self.backdrop_video.view, &self.linear_sampler);
        }
    }
}
