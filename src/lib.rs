//! Portfolio page behaviors.
//!
//! Wires the static portfolio markup to its interactive behaviors: sidebar,
//! testimonials modal, project filter, contact form gate, page navigation and
//! an inline video modal that turns YouTube and Google Drive links into
//! embedded players sized to the video.

pub mod config;
pub mod dom;
pub mod error;
pub mod page;
pub mod video;

use wasm_bindgen::prelude::*;

pub use config::BehaviorConfig;
pub use error::{PortfolioError, PortfolioResult};
pub use video::{classify, compute_frame, VideoSource};

/// Initialize panic hook and logging, then mount the page behaviors.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let document = web_sys::window().and_then(|window| window.document());
    let override_json = document
        .as_ref()
        .and_then(|doc| doc.body())
        .and_then(|body| body.get_attribute(config::CONFIG_ATTRIBUTE));

    let (config, config_error) = match override_json.as_deref().map(BehaviorConfig::from_json) {
        Some(Ok(config)) => (config, None),
        Some(Err(e)) => (BehaviorConfig::default(), Some(e)),
        None => (BehaviorConfig::default(), None),
    };

    console_log::init_with_level(config.log_level()).ok();
    log::info!("[Portfolio] WASM module initialized");
    if let Some(e) = config_error {
        log::error!(
            "[CONFIG] Ignoring {} attribute: {}",
            config::CONFIG_ATTRIBUTE,
            e
        );
    }
    config::install(config.clone());

    let Some(document) = document else {
        log::error!("[Portfolio] No document; behaviors not mounted");
        return;
    };
    if let Err(e) = dom::mount(&document, &config) {
        log::error!("[Portfolio] Failed to mount behaviors: {}", e);
    }
}

/// Replace the active configuration from a JS object.
///
/// Video settings apply from the next project-link click and to the exported
/// functions below. Selectors are only read when behaviors mount.
#[wasm_bindgen]
pub fn configure(options: JsValue) -> Result<(), JsValue> {
    let config: BehaviorConfig = serde_wasm_bindgen::from_value(options)
        .map_err(|e| format!("Failed to parse config: {}", e))?;
    log::set_max_level(config.log_level().to_level_filter());
    config::install(config);
    Ok(())
}

/// Classify a video link into `{kind, ...}` as the modal would.
#[wasm_bindgen(js_name = classifyVideoUrl)]
pub fn classify_video_url(url: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&classify(url))
        .map_err(|e| format!("Failed to serialize video source: {}", e).into())
}

/// Fit a video of `width`x`height` into the given viewport.
#[wasm_bindgen(js_name = computeVideoFrame)]
pub fn compute_video_frame(
    width: f64,
    height: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> Result<JsValue, JsValue> {
    let bounds = config::current().video.frame_bounds;
    let frame = video::compute_frame_within(
        width,
        height,
        video::Viewport::new(viewport_width, viewport_height),
        &bounds,
    )?;
    serde_wasm_bindgen::to_value(&frame)
        .map_err(|e| format!("Failed to serialize frame: {}", e).into())
}
