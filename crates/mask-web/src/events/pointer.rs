use mask_core::Sketch;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Project every pointer move onto the composite plane. Coordinates are taken
/// relative to the canvas box in CSS pixels, matching the size the resize
/// handler hands to the sketch.
pub fn wire_pointermove(canvas: web::HtmlCanvasElement, sketch: Rc<RefCell<Sketch>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let rect = canvas.get_bounding_client_rect();
        let x = ev.client_x() as f32 - rect.left() as f32;
        let y = ev.client_y() as f32 - rect.top() as f32;
        if let Some(hit) = sketch.borrow().pointer_move(x, y) {
            log::trace!("[pointer] target ({:.3},{:.3},{:.3})", hit.x, hit.y, hit.z);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
