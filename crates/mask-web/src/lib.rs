#![cfg(target_arch = "wasm32")]
use mask_core::{FrameStats, Sketch, SketchConfig, STATS_WINDOW_FRAMES};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub mod dom;
mod events;
mod frame;
mod render;

thread_local! {
    static LOOP: RefCell<Option<frame::LoopHandle>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mask-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop requesting animation frames. The current frame still completes.
#[wasm_bindgen]
pub fn stop() {
    LOOP.with(|l| {
        if let Some(handle) = l.borrow_mut().take() {
            handle.stop();
        }
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut config = SketchConfig::default();
    dom::apply_query_overrides(&mut config);
    let particle_count = config.particle_count;
    let sketch = Rc::new(RefCell::new(Sketch::new(config)?));

    let canvas = dom::mount_canvas(&document)?;

    let background: web::HtmlVideoElement =
        dom::element_by_id(&document, dom::BACKGROUND_VIDEO_ID)?;
    let backdrop: web::HtmlVideoElement = dom::element_by_id(&document, dom::BACKDROP_VIDEO_ID)?;
    dom::play_looping(&background);
    dom::play_looping(&backdrop);
    let sprite = dom::load_sprite(&document).await?;

    // Size the canvas and camera before the surface is configured
    events::wire_resize(canvas.clone(), sketch.clone());

    let media = render::MediaSources {
        background,
        backdrop,
        sprite,
    };
    let gpu = frame::init_gpu(&canvas, media, particle_count).await;

    events::wire_pointermove(canvas.clone(), sketch.clone());
    events::wire_global_keydown(sketch.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        sketch,
        canvas,
        gpu,
        stats: FrameStats::new(STATS_WINDOW_FRAMES),
    }));
    let handle = frame::start_loop(frame_ctx);
    LOOP.with(|l| *l.borrow_mut() = Some(handle));
    Ok(())
}
