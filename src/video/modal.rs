//! Video modal lifecycle.
//!
//! `VideoModal` owns the open/closed state of the single video modal on the
//! page. It picks the element that plays a source, applies optimistic sizing
//! from the forced aspect ratio, and decides whether dimensions detected later
//! may replace it. Everything visual goes through [`ModalSurface`], which the
//! DOM layer implements.

use super::aspect::AspectRatio;
use super::frame::{compute_frame_within, FrameSize, Viewport};
use super::source::{classify, VideoSource};
use crate::config::VideoConfig;

/// Element that plays the current source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Iframe,
    NativeElement,
}

/// One click on a project link, resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalRequest {
    pub source: VideoSource,
    pub forced_aspect: AspectRatio,
    pub is_shorts_reels: bool,
}

impl ModalRequest {
    pub fn new(source: VideoSource, forced_aspect: AspectRatio, is_shorts_reels: bool) -> Self {
        Self {
            source,
            forced_aspect,
            is_shorts_reels,
        }
    }

    /// Build a request from a project link's `href` and `data-aspect`.
    pub fn from_link(
        href: &str,
        data_aspect: Option<&str>,
        is_shorts_reels: bool,
        config: &VideoConfig,
    ) -> Self {
        let forced_aspect =
            AspectRatio::from_attribute(data_aspect, config.default_aspect(is_shorts_reels));
        Self::new(classify(href), forced_aspect, is_shorts_reels)
    }
}

/// Inline style for the frame wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStyle {
    /// CSS `aspect-ratio` value.
    pub aspect_ratio: String,
    /// `None` renders as `max-width: none`.
    pub max_width_px: Option<f64>,
    /// `None` renders as `min-height: auto`.
    pub min_height_px: Option<f64>,
    /// Center the frame horizontally once it is narrower than the modal.
    pub centered: bool,
}

impl FrameStyle {
    /// Best guess applied on open, before real dimensions are known.
    pub fn optimistic(aspect: AspectRatio, config: &VideoConfig) -> Self {
        Self {
            aspect_ratio: aspect.to_string(),
            max_width_px: None,
            min_height_px: Some(config.min_height_for(aspect)),
            centered: false,
        }
    }

    /// Style for a frame sized from detected dimensions.
    pub fn fitted(width: u32, height: u32, frame: FrameSize) -> Self {
        Self {
            aspect_ratio: format!("{} / {}", width, height),
            max_width_px: Some(frame.width),
            min_height_px: None,
            centered: true,
        }
    }
}

/// Presentation side of the modal.
pub trait ModalSurface {
    /// Whether the modal container and overlay exist on the page.
    fn is_available(&self) -> bool;

    fn apply_frame(&mut self, style: &FrameStyle);

    /// Show the element for `kind`, hide the other one, and load `url`.
    fn load(&mut self, kind: SurfaceKind, url: &str);

    /// Toggle the `active` class on the modal container and overlay.
    fn set_visible(&mut self, visible: bool);

    /// Stop playback by clearing `src` on both elements.
    fn clear_sources(&mut self);

    fn viewport(&self) -> Viewport;
}

/// Identifies one open of the modal. Detection callbacks armed for an older
/// session are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session(u64);

/// How real dimensions should be detected for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionWatch {
    /// Forced aspect is authoritative and nothing is watched.
    Disabled,
    /// Wait for `loadedmetadata`/`loadeddata` on the native element.
    MediaMetadata,
    /// Probe the iframe's document after `load`, once per delay.
    IframeProbe { delays_ms: Vec<u32> },
}

/// Returned by [`VideoModal::open`] so the caller can arm detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedModal {
    pub session: Session,
    pub surface: SurfaceKind,
    pub watch: DimensionWatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenState {
    pub surface: SurfaceKind,
    pub source: VideoSource,
    pub forced_aspect: AspectRatio,
    pub is_shorts_reels: bool,
    pub session: Session,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    Open(OpenState),
}

/// What happened to a batch of detected dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectionOutcome {
    /// The frame was resized to fit.
    Applied(FrameSize),
    /// Shorts/Reels: the forced aspect was kept.
    Forced,
    /// The sizer rejected the dimensions; nothing changed.
    Rejected,
    /// The callback belongs to a session that is no longer open.
    Stale,
    /// Probe found nothing to measure; optimistic sizing stays.
    Unavailable,
}

pub struct VideoModal<S> {
    surface: S,
    config: VideoConfig,
    state: ModalState,
    next_session: u64,
}

impl<S: ModalSurface> VideoModal<S> {
    pub fn new(surface: S, config: VideoConfig) -> Self {
        Self {
            surface,
            config,
            state: ModalState::Closed,
            next_session: 0,
        }
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Whether the modal markup exists, so project links should be intercepted.
    pub fn is_available(&self) -> bool {
        self.surface.is_available()
    }

    /// Replace the sizing and detection settings used by later opens.
    pub fn set_config(&mut self, config: VideoConfig) {
        self.config = config;
    }

    /// Open the modal for `request`, replacing whatever was playing.
    ///
    /// Returns `None` without touching anything when the modal markup is absent.
    pub fn open(&mut self, request: ModalRequest) -> Option<OpenedModal> {
        if !self.surface.is_available() {
            log::debug!("[VideoModal] Modal elements not found; ignoring open");
            return None;
        }

        if self.is_open() {
            self.surface.clear_sources();
        }

        self.next_session += 1;
        let session = Session(self.next_session);

        self.surface
            .apply_frame(&FrameStyle::optimistic(request.forced_aspect, &self.config));

        let surface = request.source.surface();
        let url = request.source.playback_url().to_string();
        self.surface.load(surface, &url);

        let watch = match (surface, request.is_shorts_reels) {
            (SurfaceKind::NativeElement, _) => DimensionWatch::MediaMetadata,
            (SurfaceKind::Iframe, true) => {
                log::info!(
                    "[VideoModal] Shorts/Reels iframe - using specified aspect ratio: {}",
                    request.forced_aspect
                );
                DimensionWatch::Disabled
            }
            (SurfaceKind::Iframe, false) => DimensionWatch::IframeProbe {
                delays_ms: self.config.probe_delays_ms.clone(),
            },
        };

        log::info!(
            "[VideoModal] Opening {} video in {:?}: {} Aspect: {}",
            request.source.kind(),
            surface,
            url,
            request.forced_aspect
        );

        self.surface.set_visible(true);
        self.state = ModalState::Open(OpenState {
            surface,
            source: request.source,
            forced_aspect: request.forced_aspect,
            is_shorts_reels: request.is_shorts_reels,
            session,
        });

        Some(OpenedModal {
            session,
            surface,
            watch,
        })
    }

    /// Real dimensions became known for `session`.
    pub fn on_dimensions(&mut self, session: Session, width: u32, height: u32) -> DetectionOutcome {
        let (forced_aspect, is_shorts_reels) = match &self.state {
            ModalState::Open(open) if open.session == session => {
                (open.forced_aspect, open.is_shorts_reels)
            }
            _ => return DetectionOutcome::Stale,
        };

        if is_shorts_reels {
            log::info!(
                "[VideoModal] Shorts/Reels video - using specified aspect ratio: {}",
                forced_aspect
            );
            self.surface
                .apply_frame(&FrameStyle::optimistic(forced_aspect, &self.config));
            return DetectionOutcome::Forced;
        }

        let viewport = self.surface.viewport();
        match compute_frame_within(
            width as f64,
            height as f64,
            viewport,
            &self.config.frame_bounds,
        ) {
            Ok(frame) => {
                self.surface
                    .apply_frame(&FrameStyle::fitted(width, height, frame));
                log::info!(
                    "[VideoModal] Adjusted frame: {}x{}px (video: {}x{}, aspect: {:.2})",
                    frame.width.round(),
                    frame.height.round(),
                    width,
                    height,
                    width as f64 / height as f64
                );
                DetectionOutcome::Applied(frame)
            }
            Err(e) => {
                log::warn!(
                    "[VideoModal] {}; keeping aspect ratio {}",
                    e,
                    forced_aspect
                );
                DetectionOutcome::Rejected
            }
        }
    }

    /// Result of a best-effort iframe probe. `None` is the common
    /// cross-origin case and keeps the optimistic sizing.
    pub fn on_probe(&mut self, session: Session, dimensions: Option<(u32, u32)>) -> DetectionOutcome {
        match dimensions {
            Some((width, height)) => self.on_dimensions(session, width, height),
            None => match &self.state {
                ModalState::Open(open) if open.session == session => {
                    log::debug!(
                        "[VideoModal] Using specified aspect ratio for iframe: {}",
                        open.forced_aspect
                    );
                    DetectionOutcome::Unavailable
                }
                _ => DetectionOutcome::Stale,
            },
        }
    }

    /// Close the modal and stop playback. Returns `false` if it was not open.
    pub fn close(&mut self) -> bool {
        if !self.is_open() || !self.surface.is_available() {
            return false;
        }

        self.surface.set_visible(false);
        self.surface.clear_sources();
        self.state = ModalState::Closed;
        log::debug!("[VideoModal] Closed");
        true
    }
}
