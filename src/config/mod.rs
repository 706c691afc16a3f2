//! Configuration module for Sumi-Lens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an empty file (or no file at all) is valid.
//!
//! # Example
//!
//! ```no_run
//! use sumi_lens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("lens.toml")).unwrap();
//! println!("Request timeout: {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BatchConfig, Config, FetcherConfig, OutputConfig, DEFAULT_ACCEPT_LANGUAGE,
    DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, DEFAULT_WINDOW_SIZE,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
