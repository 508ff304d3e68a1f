//! Error types for loading and rendering.
//!
//! Only two conditions are errors: an input table that cannot be loaded and a
//! missing rendering library. Malformed individual values are not errors;
//! they become `None` or clamped values further down.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WxError {
    /// A required input file failed to fetch or did not parse to at least one data row.
    #[error("failed to load {source_name}: {reason}")]
    Load { source_name: String, reason: String },

    /// The rendering library is not available on the page.
    #[error("chart cannot be rendered: {0}")]
    RenderPrecondition(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to serialize chart specification: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl WxError {
    pub fn load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        WxError::Load {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// True when the error means "no data" rather than a broken page.
    pub fn is_load(&self) -> bool {
        matches!(self, WxError::Load { .. } | WxError::Csv(_))
    }
}

pub type Result<T> = std::result::Result<T, WxError>;
