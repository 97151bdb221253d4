//! Aspect ratios as written in `data-aspect` attributes and CSS.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PortfolioError, PortfolioResult};

/// Width/height pair with both components strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectRatio {
    width: u32,
    height: u32,
}

impl AspectRatio {
    /// Default for regular project videos.
    pub const LANDSCAPE: AspectRatio = AspectRatio {
        width: 16,
        height: 9,
    };

    /// Default inside the Shorts & Reels section.
    pub const PORTRAIT: AspectRatio = AspectRatio {
        width: 9,
        height: 16,
    };

    pub fn new(width: u32, height: u32) -> PortfolioResult<Self> {
        if width == 0 || height == 0 {
            return Err(PortfolioError::InvalidAspectRatio(format!(
                "{}/{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Resolve a link's `data-aspect` attribute.
    ///
    /// Missing or unparseable values fall back to `default`.
    pub fn from_attribute(attr: Option<&str>, default: AspectRatio) -> Self {
        match attr.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!("[VideoModal] {}; using {}", err, default);
                default
            }),
            None => default,
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::LANDSCAPE
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.width, self.height)
    }
}

/// Accepts `W/H` and `W:H`, with optional whitespace around the separator.
impl FromStr for AspectRatio {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PortfolioError::InvalidAspectRatio(s.to_string());

        let (w, h) = s.split_once(['/', ':']).ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;

        AspectRatio::new(width, height).map_err(|_| invalid())
    }
}

impl Serialize for AspectRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AspectRatio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
