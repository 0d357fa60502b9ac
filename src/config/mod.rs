//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use naist_syllabus::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("syllabus.toml")).unwrap();
//! println!("Listing page: {}", config.source.listing_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, OutputConfig, SourceConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation for configs adjusted after loading
pub use validation::validate;
