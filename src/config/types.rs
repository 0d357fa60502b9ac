use crate::syllabus::LectureCategory;
use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
}

/// Which syllabus to scrape and how far to follow it
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL of the syllabus listing page
    #[serde(rename = "listing-url")]
    pub listing_url: String,

    /// Lecture categories to extract from the listing page
    #[serde(default = "default_categories")]
    pub categories: Vec<LectureCategory>,

    /// Whether to follow every lecture to its detail page
    #[serde(rename = "scrape-details", default = "default_true")]
    pub scrape_details: bool,

    /// JSON file of `{"name", "url"}` lectures to scrape details for,
    /// instead of the lectures found on the listing page
    #[serde(rename = "lectures-file", default)]
    pub lectures_file: Option<String>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Overall request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pause between consecutive requests (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the markdown summary file
    #[serde(rename = "summary-path")]
    pub summary_path: String,
}

fn default_categories() -> Vec<LectureCategory> {
    LectureCategory::ALL.to_vec()
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("naist-syllabus/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_request_delay_ms() -> u64 {
    1000
}
