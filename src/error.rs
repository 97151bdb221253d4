//! Central error types for the portfolio behaviors.
//!
//! Errors never reach the page as visible UI. They are logged by the caller
//! and the affected behavior falls back to its default.
//! All errors implement `Serialize` so they can cross the JS boundary as strings.

use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Main error type for page behavior operations.
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// Video dimensions were zero, negative or missing
    #[error("Invalid video dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// Aspect ratio string was not `W/H` or `W:H` with positive integers
    #[error("Invalid aspect ratio: {0:?}")]
    InvalidAspectRatio(String),

    /// Required element missing from the page
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A browser API call failed
    #[error("DOM error: {0}")]
    DomError(String),

    /// JSON configuration could not be parsed
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Serialize for PortfolioError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for PortfolioError {
    fn from(msg: String) -> Self {
        PortfolioError::Other(msg)
    }
}

impl From<&str> for PortfolioError {
    fn from(msg: &str) -> Self {
        PortfolioError::Other(msg.to_string())
    }
}

/// Browser exceptions arrive as arbitrary JS values; keep their text.
impl From<JsValue> for PortfolioError {
    fn from(value: JsValue) -> Self {
        let msg = value.as_string().unwrap_or_else(|| format!("{:?}", value));
        PortfolioError::DomError(msg)
    }
}

impl From<PortfolioError> for JsValue {
    fn from(err: PortfolioError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Extension trait for adding context to Option types.
pub trait OptionExt<T> {
    /// Convert None to PortfolioError::ElementNotFound with the given description.
    fn context(self, what: &str) -> PortfolioResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, what: &str) -> PortfolioResult<T> {
        self.ok_or_else(|| PortfolioError::ElementNotFound(what.to_string()))
    }
}

/// Type alias for Results using PortfolioError.
pub type PortfolioResult<T> = Result<T, PortfolioError>;
