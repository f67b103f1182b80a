//! Harness configuration.
//!
//! Configuration can be built programmatically, parsed from command line
//! arguments, or read from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `APICHECK_LOG_LEVEL` | info | Log level |
//! | `APICHECK_CONTRACTS` | (none) | Contract file to register matchers from |
//! | `APICHECK_FOCUS_TAG` | focus | Tag that marks focused cases |
//! | `APICHECK_RUN_ALL_WHEN_EVERYTHING_FILTERED` | true | Run all cases when none are focused |
//! | `APICHECK_DEFAULT_MATCHER` | be_a_404 | Matcher for cases that name none |
//!
//! # Example
//!
//! ```rust
//! use apicheck_contract::HarnessConfig;
//!
//! let config = HarnessConfig {
//!     focus_tag: "only".to_string(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::assertion::BE_A_404;
use crate::selection::FocusFilter;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration for an API test harness.
#[derive(Debug, Clone, Parser)]
pub struct HarnessConfig {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "APICHECK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Contract file whose matchers are registered at startup.
    #[arg(long, env = "APICHECK_CONTRACTS")]
    pub contracts: Option<PathBuf>,

    /// Tag that marks focused cases.
    #[arg(long, env = "APICHECK_FOCUS_TAG", default_value = "focus")]
    pub focus_tag: String,

    /// Run every case when none carry the focus tag.
    #[arg(
        long,
        env = "APICHECK_RUN_ALL_WHEN_EVERYTHING_FILTERED",
        default_value = "true",
        action = ArgAction::Set
    )]
    pub run_all_when_everything_filtered: bool,

    /// Matcher applied to cases that do not name one.
    #[arg(long, env = "APICHECK_DEFAULT_MATCHER", default_value = BE_A_404)]
    pub default_matcher: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            contracts: None,
            focus_tag: "focus".to_string(),
            run_all_when_everything_filtered: true,
            default_matcher: BE_A_404.to_string(),
        }
    }
}

impl HarnessConfig {
    /// Creates a configuration from environment variables only.
    ///
    /// Command line arguments are ignored. Invalid values fall back to the
    /// defaults.
    pub fn from_env() -> Self {
        Self::try_parse_from(["apicheck"]).unwrap_or_default()
    }

    /// Returns the focus filter described by this configuration.
    pub fn focus_filter(&self) -> FocusFilter {
        FocusFilter::new(
            self.focus_tag.clone(),
            self.run_all_when_everything_filtered,
        )
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Log level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        if self.focus_tag.trim().is_empty() {
            errors.push("Focus tag cannot be empty".to_string());
        }

        if self.default_matcher.trim().is_empty() {
            errors.push("Default matcher cannot be empty".to_string());
        }

        if let Some(path) = &self.contracts {
            if !path.is_file() {
                errors.push(format!("Contract file not found: {}", path.display()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }
}
