//! DOM side of the video modal.
//!
//! `DomVideoSurface` applies what `VideoModal` decides to the real elements,
//! and `mount` wires project links, the close button and the overlay.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlIFrameElement, HtmlVideoElement, Window};

use super::{listen, listen_once, query, query_all, query_as, set_active, set_style};
use crate::config::{self, BehaviorConfig, VideoConfig};
use crate::error::{OptionExt, PortfolioResult};
use crate::video::{
    schedule_probes, DimensionWatch, FrameStyle, ModalRequest, ModalSurface, OpenedModal,
    Scheduler, SurfaceKind, VideoModal, Viewport,
};

type SharedModal = Rc<RefCell<VideoModal<DomVideoSurface>>>;

/// The modal's elements. Any of them may be missing from the page.
pub struct DomVideoSurface {
    window: Window,
    container: Option<Element>,
    overlay: Option<Element>,
    iframe: Option<HtmlIFrameElement>,
    video: Option<HtmlVideoElement>,
    wrapper: Option<HtmlElement>,
}

impl DomVideoSurface {
    pub fn locate(window: Window, document: &Document, config: &BehaviorConfig) -> Self {
        let selectors = &config.selectors;
        Self {
            window,
            container: query(document, &selectors.video_modal_container),
            overlay: query(document, &selectors.video_overlay),
            iframe: query_as(document, &selectors.video_iframe),
            video: query_as(document, &selectors.video_element),
            wrapper: query_as(document, &selectors.video_wrapper),
        }
    }

    pub fn video(&self) -> Option<&HtmlVideoElement> {
        self.video.as_ref()
    }

    pub fn iframe(&self) -> Option<&HtmlIFrameElement> {
        self.iframe.as_ref()
    }

    /// Natural size of the native element's current media, once known.
    pub fn native_dimensions(&self) -> Option<(u32, u32)> {
        let video = self.video.as_ref()?;
        Some((video.video_width(), video.video_height()))
    }

    /// Look for a `<video>` inside the iframe's document.
    ///
    /// Cross-origin embeds expose no document, which is the usual outcome.
    pub fn probe_iframe(&self) -> Option<(u32, u32)> {
        let document = self.iframe.as_ref()?.content_document()?;
        let video: HtmlVideoElement = query_as(&document, "video")?;
        let (width, height) = (video.video_width(), video.video_height());
        (width > 0 && height > 0).then_some((width, height))
    }
}

impl ModalSurface for DomVideoSurface {
    fn is_available(&self) -> bool {
        self.container.is_some() && self.overlay.is_some()
    }

    fn apply_frame(&mut self, style: &FrameStyle) {
        let Some(wrapper) = &self.wrapper else {
            return;
        };

        let max_width = style
            .max_width_px
            .map_or_else(|| "none".to_string(), |px| format!("{}px", px));
        let min_height = style
            .min_height_px
            .map_or_else(|| "auto".to_string(), |px| format!("{}px", px));

        set_style(wrapper, "aspect-ratio", &style.aspect_ratio);
        set_style(wrapper, "max-width", &max_width);
        set_style(wrapper, "width", "100%");
        set_style(wrapper, "min-height", &min_height);
        if style.centered {
            set_style(wrapper, "margin", "0 auto");
        }
    }

    fn load(&mut self, kind: SurfaceKind, url: &str) {
        let (Some(iframe), Some(video)) = (&self.iframe, &self.video) else {
            log::error!("[VideoModal] Video iframe or video element not found");
            return;
        };

        match kind {
            SurfaceKind::NativeElement => {
                set_style(iframe, "display", "none");
                set_style(video, "display", "block");
                set_style(video, "width", "100%");
                set_style(video, "height", "100%");
                set_style(video, "object-fit", "contain");
                video.set_src(url);
            }
            SurfaceKind::Iframe => {
                set_style(video, "display", "none");
                set_style(iframe, "display", "block");
                iframe.set_src(url);
            }
        }
    }

    fn set_visible(&mut self, visible: bool) {
        for el in [&self.container, &self.overlay].into_iter().flatten() {
            set_active(el, visible);
        }
    }

    fn clear_sources(&mut self) {
        if let Some(iframe) = &self.iframe {
            iframe.set_src("");
        }
        if let Some(video) = &self.video {
            if let Err(e) = video.pause() {
                log::debug!("[VideoModal] pause() failed: {:?}", e);
            }
            video.set_src("");
        }
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<JsValue, JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport::new(
            dimension(self.window.inner_width()),
            dimension(self.window.inner_height()),
        )
    }
}

/// `window.setTimeout` backed scheduler.
pub struct TimeoutScheduler {
    window: Window,
}

impl TimeoutScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(move || task());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref::<js_sys::Function>(),
                delay,
            )
        {
            log::warn!("[VideoModal] setTimeout failed: {:?}", e);
        }
    }
}

/// Arm dimension detection for a freshly opened modal.
fn arm_detection(
    modal: &SharedModal,
    scheduler: &Rc<TimeoutScheduler>,
    opened: OpenedModal,
) -> PortfolioResult<()> {
    let session = opened.session;

    match opened.watch {
        DimensionWatch::Disabled => {}
        DimensionWatch::MediaMetadata => {
            let video = modal.borrow().surface().video().cloned().context("video element")?;
            for event in ["loadedmetadata", "loadeddata"] {
                let modal = Rc::clone(modal);
                listen_once(&video, event, move || {
                    let dimensions = modal.borrow().surface().native_dimensions();
                    if let Some((width, height)) = dimensions {
                        modal.borrow_mut().on_dimensions(session, width, height);
                    }
                })?;
            }
        }
        DimensionWatch::IframeProbe { delays_ms } => {
            let iframe = modal.borrow().surface().iframe().cloned().context("video iframe")?;
            let probe: Rc<dyn Fn()> = {
                let modal = Rc::clone(modal);
                Rc::new(move || {
                    let dimensions = modal.borrow().surface().probe_iframe();
                    modal.borrow_mut().on_probe(session, dimensions);
                })
            };
            let scheduler = Rc::clone(scheduler);
            listen_once(&iframe, "load", move || {
                schedule_probes(&*scheduler, &delays_ms, probe);
            })?;
        }
    }

    Ok(())
}

fn open_from_link(
    modal: &SharedModal,
    scheduler: &Rc<TimeoutScheduler>,
    link: &Element,
    shorts_selector: &str,
    config: &VideoConfig,
) -> PortfolioResult<()> {
    let Some(href) = link.get_attribute("href").filter(|h| !h.is_empty()) else {
        return Ok(());
    };

    let is_shorts_reels = link.closest(shorts_selector).ok().flatten().is_some();
    let data_aspect = link.get_attribute("data-aspect");
    let request = ModalRequest::from_link(&href, data_aspect.as_deref(), is_shorts_reels, config);

    link.set_attribute("data-forced-aspect", &request.forced_aspect.to_string())?;
    link.set_attribute(
        "data-is-shorts-reels",
        if is_shorts_reels { "true" } else { "false" },
    )?;

    let opened = {
        let mut modal = modal.borrow_mut();
        modal.set_config(config.clone());
        modal.open(request)
    };
    if let Some(opened) = opened {
        arm_detection(modal, scheduler, opened)?;
    }
    Ok(())
}

/// Wire project links and the close controls to a new `VideoModal`.
pub fn mount(document: &Document, config: &BehaviorConfig) -> PortfolioResult<()> {
    let window = web_sys::window().context("window")?;
    let surface = DomVideoSurface::locate(window.clone(), document, config);
    let modal = VideoModal::new(surface, config.video.clone());
    if !modal.is_available() {
        log::debug!("[VideoModal] Video modal not present; project links keep default navigation");
        return Ok(());
    }
    let modal: SharedModal = Rc::new(RefCell::new(modal));
    let scheduler = Rc::new(TimeoutScheduler::new(window));

    let selectors = &config.selectors;
    for link in query_all(document, &selectors.project_link) {
        let modal = Rc::clone(&modal);
        let scheduler = Rc::clone(&scheduler);
        let shorts_selector = selectors.shorts_reels.clone();
        let target = link.clone();
        listen(&target, "click", move |event| {
            if link.get_attribute("href").map_or(true, |h| h.is_empty()) {
                return;
            }
            event.prevent_default();
            // Read at click time so `configure` reaches mounted links.
            let video_config = config::current().video;
            if let Err(e) = open_from_link(&modal, &scheduler, &link, &shorts_selector, &video_config) {
                log::error!("[VideoModal] Failed to open video: {}", e);
            }
        })?;
    }

    let close_targets = [
        query(document, &selectors.video_close_button),
        query(document, &selectors.video_overlay),
    ];
    for target in close_targets.into_iter().flatten() {
        let modal = Rc::clone(&modal);
        listen(&target, "click", move |_| {
            modal.borrow_mut().close();
        })?;
    }

    Ok(())
}
