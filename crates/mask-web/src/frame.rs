use crate::render;
use instant::Instant;
use mask_core::{FrameStats, Sketch};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub sketch: Rc<RefCell<Sketch>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub stats: FrameStats,
}

impl<'a> FrameContext<'a> {
    /// One frame: advance time and particles, then mask pass and composite.
    pub fn frame(&mut self) {
        let update = self.sketch.borrow_mut().step();
        if update.recycled > 0 {
            log::trace!(
                "[frame] t={:.2} recycled={} around ({:.3},{:.3})",
                update.time,
                update.recycled,
                update.target.x,
                update.target.y
            );
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let sketch = self.sketch.borrow();
            match g.render(&sketch) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("surface lost; reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }

        if let Some(fps) = self.stats.record(Instant::now()) {
            log::debug!("[frame] {:.1} fps", fps);
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    media: render::MediaSources,
    particle_capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, media, particle_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Stops the animation loop after the frame in flight.
#[derive(Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.running.set(false);
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(tick: &Tick) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let running = Rc::new(Cell::new(true));
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let running_tick = running.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running_tick.get() {
            log::info!("frame loop stopped");
            return;
        }
        frame_ctx.borrow_mut().frame();
        // the next frame is only requested once this one has finished
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
    LoopHandle { running }
}
