use crate::dom;
use mask_core::Sketch;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Recompute camera, cover-fit and plane scale, then size the canvas backing
/// store from the stage's viewport. The GPU side picks up the new backing
/// size on its next frame.
fn apply_resize(canvas: &web::HtmlCanvasElement, sketch: &RefCell<Sketch>) {
    let mut sketch = sketch.borrow_mut();
    let (css_w, css_h) = dom::css_size(canvas);
    let resized = sketch.resize(css_w, css_h, dom::device_pixel_ratio());
    match resized.zip(sketch.stage().backing_size()) {
        Some((axis, (bw, bh))) => {
            dom::set_backing_size(canvas, (bw, bh));
            let cover = sketch.stage().cover;
            log::info!(
                "[resize] css={}x{} backing={}x{} cover=({:.3},{:.3}) scaled={:?}",
                css_w,
                css_h,
                bw,
                bh,
                cover.x,
                cover.y,
                axis
            );
        }
        None => log::debug!("[resize] ignoring empty viewport {}x{}", css_w, css_h),
    }
}

pub fn wire_resize(canvas: web::HtmlCanvasElement, sketch: Rc<RefCell<Sketch>>) {
    apply_resize(&canvas, &sketch);
    let closure = Closure::wrap(Box::new(move || {
        apply_resize(&canvas, &sketch);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
