//! Fit a video frame into the viewport while keeping its aspect ratio.

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Share of the viewport width the frame may take.
pub const VIEWPORT_WIDTH_FRACTION: f64 = 0.92;

/// Share of the viewport height the frame may take.
pub const VIEWPORT_HEIGHT_FRACTION: f64 = 0.85;

/// Browser viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Margins left around the frame, as fractions of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrameBounds {
    pub width_fraction: f64,
    pub height_fraction: f64,
}

impl Default for FrameBounds {
    fn default() -> Self {
        Self {
            width_fraction: VIEWPORT_WIDTH_FRACTION,
            height_fraction: VIEWPORT_HEIGHT_FRACTION,
        }
    }
}

/// Display size of the frame in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

/// Fit `width`x`height` into the viewport using the default bounds.
pub fn compute_frame(
    width: f64,
    height: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> PortfolioResult<FrameSize> {
    compute_frame_within(
        width,
        height,
        Viewport::new(viewport_width, viewport_height),
        &FrameBounds::default(),
    )
}

/// Fit `width`x`height` into `viewport`.
///
/// The frame never grows beyond the video's natural size, never exceeds
/// either viewport bound, and keeps `width / height` exactly.
pub fn compute_frame_within(
    width: f64,
    height: f64,
    viewport: Viewport,
    bounds: &FrameBounds,
) -> PortfolioResult<FrameSize> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(PortfolioError::InvalidDimensions { width, height });
    }

    let aspect = width / height;
    let max_width = (viewport.width * bounds.width_fraction).min(width);
    let max_height = (viewport.height * bounds.height_fraction).min(height);

    let mut final_width = max_width;
    let mut final_height = max_width / aspect;

    if final_height > max_height {
        final_height = max_height;
        final_width = max_height * aspect;
    }

    Ok(FrameSize {
        width: final_width,
        height: final_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 0.01;

    #[test]
    fn test_landscape_limited_by_width() {
        let frame = compute_frame(1920.0, 1080.0, 1000.0, 800.0).unwrap();
        assert!((frame.width - 920.0).abs() < EPS);
        assert!((frame.height - 517.5).abs() < EPS);
    }

    #[test]
    fn test_portrait_rescaled_to_height() {
        let frame = compute_frame(1080.0, 1920.0, 1000.0, 800.0).unwrap();
        assert!((frame.width - 382.5).abs() < EPS);
        assert!((frame.height - 680.0).abs() < EPS);
    }

    #[test]
    fn test_small_video_keeps_natural_size() {
        let frame = compute_frame(320.0, 240.0, 1920.0, 1080.0).unwrap();
        assert!((frame.width - 320.0).abs() < EPS);
        assert!((frame.height - 240.0).abs() < EPS);
    }

    #[test]
    fn test_rejects_invalid_dimensions() {
        for (w, h) in [
            (0.0, 500.0),
            (500.0, 0.0),
            (-1.0, 500.0),
            (500.0, -3.0),
            (f64::NAN, 500.0),
            (500.0, f64::INFINITY),
        ] {
            let result = compute_frame(w, h, 1000.0, 800.0);
            assert!(
                matches!(result, Err(PortfolioError::InvalidDimensions { .. })),
                "expected {}x{} to be rejected",
                w,
                h
            );
        }
    }

    #[test]
    fn test_result_stays_in_bounds_and_keeps_aspect() {
        let viewports = [(375.0, 667.0), (1280.0, 720.0), (2560.0, 1440.0)];
        let videos = [(1920.0, 1080.0), (1080.0, 1920.0), (1000.0, 1000.0), (4096.0, 1716.0)];

        for &(vw, vh) in &viewports {
            for &(w, h) in &videos {
                let frame = compute_frame(w, h, vw, vh).unwrap();
                assert!(frame.width <= vw * VIEWPORT_WIDTH_FRACTION + 1e-9);
                assert!(frame.height <= vh * VIEWPORT_HEIGHT_FRACTION + 1e-9);
                assert!((frame.width / frame.height - w / h).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_custom_bounds() {
        let bounds = FrameBounds {
            width_fraction: 0.5,
            height_fraction: 0.5,
        };
        let frame =
            compute_frame_within(1920.0, 1080.0, Viewport::new(1000.0, 800.0), &bounds).unwrap();
        assert!((frame.width - 500.0).abs() < EPS);
        assert!((frame.height - 281.25).abs() < EPS);
    }
}
