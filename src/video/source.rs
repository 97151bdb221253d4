//! Video link classification.
//!
//! Turns an arbitrary project link into a playback-ready embed descriptor.
//! YouTube links are rewritten to the privacy-enhanced player, Google Drive
//! links get both a preview iframe URL and a direct download URL, and
//! everything else is passed through untouched.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use url::Url;

use super::modal::SurfaceKind;

const YOUTUBE_NOCOOKIE_EMBED: &str = "https://www.youtube-nocookie.com/embed/";
const YOUTUBE_PLAYER_PARAMS: &str = "autoplay=1&rel=0&modestbranding=1&playsinline=1";
const DRIVE_FILE_BASE: &str = "https://drive.google.com/file/d/";
const DRIVE_DOWNLOAD_BASE: &str = "https://drive.google.com/uc?export=download&id=";

lazy_static! {
    static ref DRIVE_FILE_ID: Regex =
        Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").expect("valid drive file regex");
}

/// Normalized embed descriptor for a project video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum VideoSource {
    YouTube { embed_url: String },
    GoogleDrive { iframe_url: String, direct_url: String },
    Other { url: String },
}

impl VideoSource {
    /// Which element plays this source.
    pub fn surface(&self) -> SurfaceKind {
        match self {
            VideoSource::GoogleDrive { .. } => SurfaceKind::NativeElement,
            VideoSource::YouTube { .. } | VideoSource::Other { .. } => SurfaceKind::Iframe,
        }
    }

    /// URL loaded into the element chosen by [`VideoSource::surface`].
    pub fn playback_url(&self) -> &str {
        match self {
            VideoSource::YouTube { embed_url } => embed_url,
            VideoSource::GoogleDrive { direct_url, .. } => direct_url,
            VideoSource::Other { url } => url,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            VideoSource::YouTube { .. } => "youtube",
            VideoSource::GoogleDrive { .. } => "googledrive",
            VideoSource::Other { .. } => "other",
        }
    }
}

/// Classify a video link. Never fails: unparseable input becomes `Other`.
pub fn classify(raw: &str) -> VideoSource {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            log::error!("[VideoSource] Invalid URL {:?}: {}", raw, e);
            return VideoSource::Other {
                url: raw.to_string(),
            };
        }
    };

    let host = url.host_str().unwrap_or_default();

    if host.contains("youtube.com") || host.contains("youtu.be") {
        if let Some(source) = youtube_source(raw, &url, host) {
            return source;
        }
    }

    if let Some(file_id) = google_drive_id(&url) {
        return VideoSource::GoogleDrive {
            iframe_url: format!("{}{}/preview?usp=sharing", DRIVE_FILE_BASE, file_id),
            direct_url: format!("{}{}", DRIVE_DOWNLOAD_BASE, file_id),
        };
    }

    VideoSource::Other {
        url: raw.to_string(),
    }
}

fn youtube_source(raw: &str, url: &Url, host: &str) -> Option<VideoSource> {
    let path = url.path();

    let video_id = if host == "youtu.be" {
        Some(path.trim_start_matches('/').to_string())
    } else if path == "/watch" {
        query_param(url, "v")
    } else if path.starts_with("/embed/") {
        let separator = if raw.contains('?') { '&' } else { '?' };
        return Some(VideoSource::YouTube {
            embed_url: format!("{}{}autoplay=1", raw, separator),
        });
    } else {
        None
    };

    let video_id = video_id.filter(|id| !id.is_empty())?;
    Some(VideoSource::YouTube {
        embed_url: format!(
            "{}{}?{}",
            YOUTUBE_NOCOOKIE_EMBED,
            video_id,
            YOUTUBE_PLAYER_PARAMS
        ),
    })
}

/// Extract a Drive file id from `/file/d/<id>/...` or an `id` query parameter.
fn google_drive_id(url: &Url) -> Option<String> {
    if !url.host_str()?.contains("drive.google.com") {
        return None;
    }

    let path = url.path();
    let id = if path.contains("/file/d/") {
        DRIVE_FILE_ID
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    } else {
        query_param(url, "id")
    };

    id.filter(|id| !id.is_empty())
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_url(source: &VideoSource) -> &str {
        match source {
            VideoSource::YouTube { embed_url } => embed_url,
            other => panic!("expected YouTube, got {:?}", other),
        }
    }

    #[test]
    fn test_youtu_be_short_link() {
        for id in ["dQw4w9WgXcQ", "abc_DEF-123"] {
            let source = classify(&format!("https://youtu.be/{}", id));
            let url = embed_url(&source);
            assert!(url.contains(&format!("youtube-nocookie.com/embed/{}", id)));
            assert!(url.contains("autoplay=1&rel=0"));
        }
    }

    #[test]
    fn test_youtu_be_path_inserted_verbatim() {
        let source = classify("https://youtu.be/abc/def");
        assert_eq!(
            embed_url(&source),
            "https://www.youtube-nocookie.com/embed/abc/def?autoplay=1&rel=0&modestbranding=1&playsinline=1"
        );
    }

    #[test]
    fn test_watch_link_ignores_extra_params() {
        let plain = classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        let with_time = classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=5");
        let reordered = classify("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ");

        assert_eq!(
            embed_url(&plain),
            "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0&modestbranding=1&playsinline=1"
        );
        assert_eq!(plain, with_time);
        assert_eq!(plain, reordered);
    }

    #[test]
    fn test_embed_link_appends_autoplay() {
        let with_query = classify("https://www.youtube.com/embed/abc123?x=1");
        assert_eq!(
            embed_url(&with_query),
            "https://www.youtube.com/embed/abc123?x=1&autoplay=1"
        );

        let bare = classify("https://www.youtube.com/embed/abc123");
        assert_eq!(
            embed_url(&bare),
            "https://www.youtube.com/embed/abc123?autoplay=1"
        );
    }

    #[test]
    fn test_youtube_without_id_falls_through() {
        let raw = "https://www.youtube.com/channel/UC123";
        assert_eq!(
            classify(raw),
            VideoSource::Other {
                url: raw.to_string()
            }
        );

        let empty_v = "https://www.youtube.com/watch?v=";
        assert!(matches!(classify(empty_v), VideoSource::Other { .. }));

        let bare_short = "https://youtu.be/";
        assert!(matches!(classify(bare_short), VideoSource::Other { .. }));
    }

    #[test]
    fn test_drive_file_link() {
        let source = classify("https://drive.google.com/file/d/ABC123/view?usp=sharing");
        match source {
            VideoSource::GoogleDrive {
                iframe_url,
                direct_url,
            } => {
                assert!(iframe_url.ends_with("ABC123/preview?usp=sharing"));
                assert_eq!(
                    iframe_url,
                    "https://drive.google.com/file/d/ABC123/preview?usp=sharing"
                );
                assert!(direct_url.ends_with("id=ABC123"));
                assert_eq!(
                    direct_url,
                    "https://drive.google.com/uc?export=download&id=ABC123"
                );
            }
            other => panic!("expected GoogleDrive, got {:?}", other),
        }
    }

    #[test]
    fn test_drive_id_query_param() {
        let source = classify("https://drive.google.com/open?id=Xy_9-z");
        assert_eq!(
            source.playback_url(),
            "https://drive.google.com/uc?export=download&id=Xy_9-z"
        );
    }

    #[test]
    fn test_drive_without_id_is_other() {
        for raw in [
            "https://drive.google.com/drive/folders",
            "https://drive.google.com/file/d/",
            "https://drive.google.com/open?id=",
        ] {
            assert_eq!(
                classify(raw),
                VideoSource::Other {
                    url: raw.to_string()
                },
                "{}",
                raw
            );
        }
    }

    #[test]
    fn test_unknown_host_passes_through() {
        let raw = "https://vimeo.com/12345";
        assert_eq!(
            classify(raw),
            VideoSource::Other {
                url: raw.to_string()
            }
        );
    }

    #[test]
    fn test_malformed_input_passes_through() {
        for raw in ["not a url", "", "/videos/demo.mp4"] {
            assert_eq!(
                classify(raw),
                VideoSource::Other {
                    url: raw.to_string()
                }
            );
        }
    }

    #[test]
    fn test_surface_selection() {
        let drive = classify("https://drive.google.com/file/d/ABC123/view");
        assert_eq!(drive.surface(), SurfaceKind::NativeElement);
        assert_eq!(drive.kind(), "googledrive");

        let youtube = classify("https://youtu.be/abc");
        assert_eq!(youtube.surface(), SurfaceKind::Iframe);

        let other = classify("https://vimeo.com/1");
        assert_eq!(other.surface(), SurfaceKind::Iframe);
        assert_eq!(other.playback_url(), "https://vimeo.com/1");
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(classify("https://drive.google.com/file/d/ABC/view")).unwrap();
        assert_eq!(json["kind"], "googledrive");
        assert_eq!(
            json["directUrl"],
            "https://drive.google.com/uc?export=download&id=ABC"
        );

        let json = serde_json::to_value(classify("https://youtu.be/abc")).unwrap();
        assert_eq!(json["kind"], "youtube");
        assert!(json["embedUrl"].as_str().unwrap().contains("/embed/abc"));
    }
}
