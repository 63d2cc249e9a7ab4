use anyhow::anyhow;
use mask_core::SketchConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub const CONTAINER_ID: &str = "container";
pub const BACKGROUND_VIDEO_ID: &str = "video1";
pub const BACKDROP_VIDEO_ID: &str = "video2";
pub const SPRITE_IMAGE_ID: &str = "blob";
pub const SPRITE_URL: &str = "images/blob.png";

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{id}"))?
        .dyn_into::<T>()
        .map_err(|e| anyhow!("#{id} has unexpected type: {:?}", e))
}

/// CSS size of the canvas' layout box.
pub fn css_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (rect.width() as f32, rect.height() as f32)
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

#[inline]
pub fn set_backing_size(canvas: &web::HtmlCanvasElement, (width, height): (u32, u32)) {
    canvas.set_width(width);
    canvas.set_height(height);
}

/// Create the drawing canvas inside the container so it fills it.
pub fn mount_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let container: web::HtmlElement = element_by_id(document, CONTAINER_ID)?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("create canvas: {:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

/// Start muted looping playback. Autoplay refusals are only logged; the
/// renderer keeps drawing the last uploaded frame.
pub fn play_looping(video: &web::HtmlVideoElement) {
    video.set_muted(true);
    video.set_loop(true);
    let id = video.id();
    match video.play() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[video] play() rejected for {}: {:?}", id, e);
            }
        }),
        Err(e) => log::warn!("[video] play() failed for {}: {:?}", id, e),
    }
}

/// Use the page's `<img id="blob">` when present, otherwise load the
/// default sprite, and wait until it is decoded.
pub async fn load_sprite(document: &web::Document) -> anyhow::Result<web::HtmlImageElement> {
    let img = match document.get_element_by_id(SPRITE_IMAGE_ID) {
        Some(el) => el
            .dyn_into::<web::HtmlImageElement>()
            .map_err(|e| anyhow!("#{SPRITE_IMAGE_ID} is not an image: {:?}", e))?,
        None => {
            let img = web::HtmlImageElement::new().map_err(|e| anyhow!("{:?}", e))?;
            img.set_src(SPRITE_URL);
            img
        }
    };
    let decoded: js_sys::Promise = img.decode();
    JsFuture::from(decoded)
        .await
        .map_err(|e| anyhow!("sprite decode failed: {:?}", e))?;
    log::info!(
        "[sprite] loaded {}x{}",
        img.natural_width(),
        img.natural_height()
    );
    Ok(img)
}

/// Apply `?mode=..&seed=..&particles=..` overrides from the page URL.
pub fn apply_query_overrides(config: &mut SketchConfig) {
    let Some(search) = web::window().and_then(|w| w.location().search().ok()) else {
        return;
    };
    let Ok(params) = web::UrlSearchParams::new_with_str(&search) else {
        return;
    };
    for key in ["mode", "seed", "particles"] {
        if let Some(value) = params.get(key) {
            if !config.apply_override(key, &value) {
                log::warn!("[config] ignoring {key}={value}");
            }
        }
    }
}
