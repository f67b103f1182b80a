//! # apicheck-contract - Error-Envelope Assertions for API Tests
//!
//! This crate checks that HTTP responses captured by an API test suite follow the
//! API's standard error envelope:
//!
//! ```json
//! {"code": 10000, "description": "Unknown request: /missing"}
//! ```
//!
//! ## Features
//!
//! - **`be_a_404`**: the canonical assertion for the "unknown request" error
//!   (status 404, code 10000, description containing "Unknown request")
//! - **Error contracts**: the same four-step check for any status, code and
//!   description matcher
//! - **Diagnostics**: every verdict lists the status, body, code and description
//!   checks in order, with the observed value of the first failure
//! - **Registry**: named assertions registered once and invoked by name
//! - **Contract files**: JSON files declaring extra contracts and captured cases
//! - **Focus filter**: run only focused cases when any exist, otherwise all
//!
//! ## Quick Start
//!
//! ```rust
//! use apicheck_contract::{AssertionFailure, HttpResponseCapture, be_a_404};
//!
//! let response = HttpResponseCapture::new(404, r#"{"code":9999,"description":"Unknown request"}"#);
//! let verdict = be_a_404(&response);
//!
//! assert!(!verdict.passed());
//! assert!(matches!(
//!     verdict.failure(),
//!     Some(AssertionFailure::UnexpectedErrorCode { .. })
//! ));
//! ```
//!
//! Inside a test body, [`assert_be_a_404`] panics with the full report instead.
//!
//! ## Architecture
//!
//! - [`capture`] - The captured response under test
//! - [`envelope`] - Typed and decoded error envelopes
//! - [`matcher`] - Description matchers
//! - [`assertion`] - Error contracts, assertions and verdicts
//! - [`error`] - Assertion failures and harness errors
//! - [`registry`] - Named assertion registry
//! - [`loader`] - Contract file loading
//! - [`selection`] - Focus filtering
//! - [`suite`] - Running captured cases
//! - [`config`] - Harness configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod assertion;
pub mod capture;
pub mod config;
pub mod envelope;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod registry;
pub mod selection;
pub mod suite;

// Re-export commonly used types
pub use assertion::{
    BE_A_404, CheckKind, CheckOutcome, CheckResult, ErrorContract, ErrorResponseAssertion,
    Verdict, assert_be_a_404, be_a_404,
};
pub use capture::HttpResponseCapture;
pub use config::HarnessConfig;
pub use envelope::{DecodedEnvelope, ErrorEnvelope};
pub use error::{AssertionFailure, ContractError, ContractResult, DecodeError};
pub use loader::{CapturedCase, ContractFile, MatcherEntry, load_contract_file};
pub use matcher::DescriptionMatcher;
pub use registry::MatcherRegistry;
pub use selection::{FocusFilter, Tagged};
pub use suite::{CaseResult, SuiteReport, run_cases};

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at startup. `RUST_LOG` takes precedence over
/// `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("apicheck_contract={},apicheck={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
