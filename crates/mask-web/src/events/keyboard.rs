use mask_core::Sketch;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `m` switches between the ripple and alpha-mask composite programs.
pub fn wire_global_keydown(sketch: Rc<RefCell<Sketch>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() {
            return;
        }
        let key = ev.key();
        if key == "m" || key == "M" {
            let mode = sketch.borrow_mut().toggle_mode();
            log::info!("[keys] composite mode -> {}", mode);
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
