//! Error types for the extraction pipeline.
//!
//! Recoverable conditions (a missing description, an unfetchable figure) are
//! handled where they occur and never surface here; this enum covers the
//! failures that end a run and get logged at the orchestration boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("browser error: {0}")]
    Browser(#[from] thirtyfour::error::WebDriverError),

    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("element not found: {0}")]
    ElementMissing(String),

    #[error("unexpected page content: {0}")]
    PageShape(String),

    #[error("invalid parameters: {0}")]
    Params(String),

    #[error("browser session already closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, HarvestError>;
