//! Page behavior configuration.
//!
//! Defaults match the stock portfolio markup. A page can override any subset
//! of fields with JSON in the `data-portfolio-config` attribute on `<body>`,
//! or at runtime through the exported `configure` function.
//!
//! The active configuration lives behind a `parking_lot::RwLock` so the
//! exported JS functions and the mounted listeners read the same values.

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::PortfolioResult;
use crate::video::{AspectRatio, FrameBounds};

/// Attribute on `<body>` holding a JSON configuration override.
pub const CONFIG_ATTRIBUTE: &str = "data-portfolio-config";

lazy_static! {
    /// Global behavior configuration.
    pub static ref BEHAVIOR_CONFIG: RwLock<BehaviorConfig> = RwLock::new(BehaviorConfig::default());
}

/// Everything the page behaviors can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub selectors: Selectors,
    pub video: VideoConfig,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            selectors: Selectors::default(),
            video: VideoConfig::default(),
        }
    }
}

impl BehaviorConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> PortfolioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Configured log level, `Info` when unrecognized.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

/// Video modal sizing and detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoConfig {
    /// Forced aspect for regular project links without `data-aspect`.
    pub landscape_aspect: AspectRatio,
    /// Forced aspect for links inside the Shorts & Reels section.
    pub portrait_aspect: AspectRatio,
    pub portrait_min_height_px: f64,
    pub landscape_min_height_px: f64,
    /// Delays after the iframe `load` event at which dimensions are probed.
    pub probe_delays_ms: Vec<u32>,
    pub frame_bounds: FrameBounds,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            landscape_aspect: AspectRatio::LANDSCAPE,
            portrait_aspect: AspectRatio::PORTRAIT,
            portrait_min_height_px: 360.0,
            landscape_min_height_px: 220.0,
            probe_delays_ms: vec![100, 1000],
            frame_bounds: FrameBounds::default(),
        }
    }
}

impl VideoConfig {
    /// Forced aspect used when a link has no `data-aspect`.
    pub fn default_aspect(&self, is_shorts_reels: bool) -> AspectRatio {
        if is_shorts_reels {
            self.portrait_aspect
        } else {
            self.landscape_aspect
        }
    }

    /// Minimum frame height. Only the configured portrait aspect gets the taller floor.
    pub fn min_height_for(&self, aspect: AspectRatio) -> f64 {
        if aspect == self.portrait_aspect {
            self.portrait_min_height_px
        } else {
            self.landscape_min_height_px
        }
    }
}

/// CSS selectors for every element the behaviors touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selectors {
    pub sidebar: String,
    pub sidebar_button: String,

    pub testimonials_item: String,
    pub testimonials_avatar: String,
    pub testimonials_title: String,
    pub testimonials_text: String,
    pub modal_container: String,
    pub modal_close_button: String,
    pub overlay: String,
    pub modal_img: String,
    pub modal_title: String,
    pub modal_text: String,

    pub select: String,
    pub select_item: String,
    pub select_value: String,
    pub filter_button: String,
    pub filter_item: String,

    pub form: String,
    pub form_input: String,
    pub form_button: String,

    pub nav_link: String,
    pub page: String,

    pub project_link: String,
    pub shorts_reels: String,
    pub video_modal_container: String,
    pub video_overlay: String,
    pub video_close_button: String,
    pub video_iframe: String,
    pub video_element: String,
    pub video_wrapper: String,
}

impl Default for Selectors {
    fn default() -> Self {
        let attr = |name: &str| format!("[{}]", name);
        Self {
            sidebar: attr("data-sidebar"),
            sidebar_button: attr("data-sidebar-btn"),

            testimonials_item: attr("data-testimonials-item"),
            testimonials_avatar: attr("data-testimonials-avatar"),
            testimonials_title: attr("data-testimonials-title"),
            testimonials_text: attr("data-testimonials-text"),
            modal_container: attr("data-modal-container"),
            modal_close_button: attr("data-modal-close-btn"),
            overlay: attr("data-overlay"),
            modal_img: attr("data-modal-img"),
            modal_title: attr("data-modal-title"),
            modal_text: attr("data-modal-text"),

            select: attr("data-select"),
            select_item: attr("data-select-item"),
            select_value: attr("data-select-value"),
            filter_button: attr("data-filter-btn"),
            filter_item: attr("data-filter-item"),

            form: attr("data-form"),
            form_input: attr("data-form-input"),
            form_button: attr("data-form-btn"),

            nav_link: attr("data-nav-link"),
            page: attr("data-page"),

            project_link: ".project-item > a".to_string(),
            shorts_reels: ".shorts-reels".to_string(),
            video_modal_container: attr("data-video-modal-container"),
            video_overlay: attr("data-video-overlay"),
            video_close_button: attr("data-video-modal-close-btn"),
            video_iframe: attr("data-video-iframe"),
            video_element: attr("data-video-element"),
            video_wrapper: attr("data-video-wrapper"),
        }
    }
}

// ============================================================================
// Global access
// ============================================================================

/// Snapshot of the active configuration.
pub fn current() -> BehaviorConfig {
    BEHAVIOR_CONFIG.read().clone()
}

/// Replace the active configuration.
pub fn install(config: BehaviorConfig) {
    log::debug!("[CONFIG] install({:?})", config);
    *BEHAVIOR_CONFIG.write() = config;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::ModalRequest;

    #[test]
    fn test_default_config() {
        let config = BehaviorConfig::default();
        assert_eq!(config.log_level(), log::Level::Info);
        assert_eq!(config.selectors.sidebar, "[data-sidebar]");
        assert_eq!(config.selectors.project_link, ".project-item > a");
        assert_eq!(config.video.probe_delays_ms, vec![100, 1000]);
        assert_eq!(config.video.default_aspect(false), AspectRatio::LANDSCAPE);
        assert_eq!(config.video.default_aspect(true), AspectRatio::PORTRAIT);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BehaviorConfig::from_json(
            r#"{"logLevel":"debug","video":{"probeDelaysMs":[250],"portraitAspect":"4:5"}}"#,
        )
        .unwrap();

        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.video.probe_delays_ms, vec![250]);
        assert_eq!(config.video.portrait_aspect, AspectRatio::new(4, 5).unwrap());
        assert_eq!(config.video.landscape_aspect, AspectRatio::LANDSCAPE);
        assert_eq!(config.video.portrait_min_height_px, 360.0);
        assert_eq!(config.selectors, Selectors::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(BehaviorConfig::from_json("{not json").is_err());
        assert!(BehaviorConfig::from_json(r#"{"video":{"landscapeAspect":"0/9"}}"#).is_err());
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = BehaviorConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_min_height_only_for_portrait_aspect() {
        let video = VideoConfig::default();
        assert_eq!(video.min_height_for(AspectRatio::PORTRAIT), 360.0);
        assert_eq!(video.min_height_for("9:16".parse().unwrap()), 360.0);
        assert_eq!(video.min_height_for(AspectRatio::LANDSCAPE), 220.0);
        assert_eq!(video.min_height_for(AspectRatio::new(1, 1).unwrap()), 220.0);
        assert_eq!(video.min_height_for(AspectRatio::new(3, 4).unwrap()), 220.0);

        let reels = VideoConfig {
            portrait_aspect: AspectRatio::new(4, 5).unwrap(),
            ..Default::default()
        };
        assert_eq!(reels.min_height_for(AspectRatio::new(4, 5).unwrap()), 360.0);
        assert_eq!(reels.min_height_for(AspectRatio::PORTRAIT), 220.0);
    }

    #[test]
    fn test_install_and_current() {
        let mut config = BehaviorConfig::default();
        config.video.landscape_min_height_px = 300.0;
        config.video.portrait_aspect = AspectRatio::new(4, 5).unwrap();
        install(config.clone());
        assert_eq!(current(), config);

        // Click handlers build requests from the live snapshot.
        let request = ModalRequest::from_link(
            "https://www.youtube.com/shorts/abc",
            None,
            true,
            &current().video,
        );
        assert_eq!(request.forced_aspect, AspectRatio::new(4, 5).unwrap());

        install(BehaviorConfig::default());
        assert_eq!(current(), BehaviorConfig::default());
    }
}
