//! naist-syllabus: structured lecture data from the NAIST course syllabus
//!
//! This crate fetches the syllabus listing page, extracts the lectures of each
//! category, follows every lecture to its detail page and turns the session
//! table there into typed records.

pub mod config;
pub mod output;
pub mod storage;
pub mod syllabus;

use thiserror::Error;

/// Main error type for syllabus operations
#[derive(Debug, Error)]
pub enum SyllabusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("{field} has not been initialized yet")]
    Uninitialized { field: &'static str },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid lecture batch: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while retrieving a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors raised while turning a fetched page into lecture data
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{url} is not HTML (content-type: {content_type})")]
    NotHtml { url: String, content_type: String },

    #[error("{url} returned an empty document")]
    EmptyDocument { url: String },

    #[error("Section '{selector}' not found in {url}")]
    MissingSection { url: String, selector: String },

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Errors raised when resolving a lecture category identifier
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Unknown lecture category: '{0}'")]
    UnknownCategory(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for syllabus operations
pub type Result<T> = std::result::Result<T, SyllabusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use syllabus::{
    LectureCategory, LectureDetail, LectureDetails, LectureInput, LectureNameUrl, Pipeline,
};
