//! Error-response assertions.
//!
//! An [`ErrorResponseAssertion`] checks a captured response against an
//! [`ErrorContract`] in four ordered steps:
//!
//! 1. the status code equals the contract's status;
//! 2. the body decodes as a JSON object;
//! 3. the `code` field equals the contract's error code;
//! 4. the `description` field matches the contract's description matcher.
//!
//! Evaluation stops at the first failing step. The returned [`Verdict`] lists
//! all four steps in order; steps after a failure are marked as not run.
//!
//! The canonical assertion is [`be_a_404`], which expects the API's
//! "unknown request" error:
//!
//! ```rust
//! use apicheck_contract::{HttpResponseCapture, be_a_404};
//!
//! let response = HttpResponseCapture::new(
//!     404,
//!     r#"{"code":10000,"description":"Unknown request: foo"}"#,
//! );
//! assert!(be_a_404(&response).passed());
//! ```

use std::fmt;

use regex::Regex;
use tracing::debug;

use crate::capture::HttpResponseCapture;
use crate::envelope::{DecodedEnvelope, UNKNOWN_REQUEST_CODE, UNKNOWN_REQUEST_DESCRIPTION};
use crate::error::AssertionFailure;
use crate::matcher::DescriptionMatcher;

/// Name under which the unknown-request assertion is registered.
pub const BE_A_404: &str = "be_a_404";

/// Status code of the unknown-request error.
pub const UNKNOWN_REQUEST_STATUS: u16 = 404;

/// The sub-checks of an error-response assertion, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// The response status code.
    StatusCode,
    /// The body decodes as a JSON object.
    BodyDecodable,
    /// The envelope's `code` field.
    ErrorCode,
    /// The envelope's `description` field.
    Description,
}

impl CheckKind {
    /// All checks in evaluation order.
    pub const ALL: [CheckKind; 4] = [
        CheckKind::StatusCode,
        CheckKind::BodyDecodable,
        CheckKind::ErrorCode,
        CheckKind::Description,
    ];

    /// Returns a short label for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::StatusCode => "status code",
            CheckKind::BodyDecodable => "error body",
            CheckKind::ErrorCode => "error code",
            CheckKind::Description => "description",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single sub-check.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// The check passed.
    Passed,
    /// The check failed.
    Failed(AssertionFailure),
    /// The check was skipped because an earlier one failed.
    NotRun,
}

/// A sub-check paired with its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// Which check this is.
    pub kind: CheckKind,
    /// What happened.
    pub outcome: CheckOutcome,
}

/// The result of evaluating an assertion against one response.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    assertion: String,
    checks: Vec<CheckResult>,
}

impl Verdict {
    /// Returns the name of the assertion that produced this verdict.
    pub fn assertion(&self) -> &str {
        &self.assertion
    }

    /// Returns true if every check passed.
    pub fn passed(&self) -> bool {
        self.checks
            .iter()
            .all(|check| check.outcome == CheckOutcome::Passed)
    }

    /// Returns the first failure, if any.
    pub fn failure(&self) -> Option<&AssertionFailure> {
        self.checks.iter().find_map(|check| match &check.outcome {
            CheckOutcome::Failed(failure) => Some(failure),
            _ => None,
        })
    }

    /// Returns the sub-check results in evaluation order.
    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    /// Converts the verdict into a `Result`, keeping the first failure.
    pub fn into_result(self) -> Result<(), AssertionFailure> {
        match self.failure() {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed() { "passed" } else { "FAILED" };
        write!(f, "{}: {}", self.assertion, status)?;
        for check in &self.checks {
            match &check.outcome {
                CheckOutcome::Passed => write!(f, "\n  [pass] {}", check.kind)?,
                CheckOutcome::Failed(failure) => {
                    write!(f, "\n  [FAIL] {}: {}", check.kind, failure)?
                }
                CheckOutcome::NotRun => write!(f, "\n  [skip] {}", check.kind)?,
            }
        }
        Ok(())
    }
}

/// The shape of an expected error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContract {
    /// Expected HTTP status code.
    pub status: u16,
    /// Expected envelope `code`.
    pub code: i64,
    /// Matcher for the envelope `description`.
    pub description: DescriptionMatcher,
}

impl ErrorContract {
    /// Creates a new contract.
    pub fn new(status: u16, code: i64, description: DescriptionMatcher) -> Self {
        Self {
            status,
            code,
            description,
        }
    }

    /// The "unknown request" contract: 404, code 10000, description containing
    /// "Unknown request".
    pub fn unknown_request() -> Self {
        Self::new(
            UNKNOWN_REQUEST_STATUS,
            UNKNOWN_REQUEST_CODE,
            DescriptionMatcher::contains(UNKNOWN_REQUEST_DESCRIPTION),
        )
    }

    fn check_status(&self, response: &HttpResponseCapture) -> Result<(), AssertionFailure> {
        if response.status_code() == self.status {
            Ok(())
        } else {
            Err(AssertionFailure::UnexpectedStatusCode {
                expected: self.status,
                actual: response.status_code(),
            })
        }
    }

    fn check_code(&self, envelope: &DecodedEnvelope) -> Result<(), AssertionFailure> {
        if envelope.code_equals(self.code) {
            Ok(())
        } else {
            Err(AssertionFailure::UnexpectedErrorCode {
                expected: self.code,
                actual: envelope.code().cloned(),
            })
        }
    }

    fn check_description(
        &self,
        envelope: &DecodedEnvelope,
        pattern: Option<&Regex>,
    ) -> Result<(), AssertionFailure> {
        // Only a JSON string is a description; arrays and objects never match.
        match envelope.description_text() {
            Some(text) if self.description.matches_with(text, pattern) => Ok(()),
            _ => Err(AssertionFailure::UnexpectedDescription {
                expected: self.description.to_string(),
                actual: envelope.description().cloned(),
            }),
        }
    }
}

/// A named assertion over captured error responses.
#[derive(Debug, Clone)]
pub struct ErrorResponseAssertion {
    name: String,
    contract: ErrorContract,
    pattern: Option<Regex>,
}

impl PartialEq for ErrorResponseAssertion {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.contract == other.contract
    }
}

impl Eq for ErrorResponseAssertion {}

impl ErrorResponseAssertion {
    /// Creates a named assertion for a contract.
    ///
    /// A pattern description is compiled here. An invalid pattern never
    /// matches; [`MatcherRegistry::register`](crate::MatcherRegistry::register)
    /// rejects it instead.
    pub fn new(name: impl Into<String>, contract: ErrorContract) -> Self {
        let pattern = contract.description.compile().ok().flatten();
        Self {
            name: name.into(),
            contract,
            pattern,
        }
    }

    /// The `be_a_404` assertion.
    pub fn be_a_404() -> Self {
        Self::new(BE_A_404, ErrorContract::unknown_request())
    }

    /// Returns the assertion name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contract this assertion checks.
    pub fn contract(&self) -> &ErrorContract {
        &self.contract
    }

    /// Evaluates the assertion against a captured response.
    pub fn evaluate(&self, response: &HttpResponseCapture) -> Verdict {
        let mut checks = Vec::with_capacity(CheckKind::ALL.len());
        let outcome = self.run_checks(response, &mut checks);

        for kind in CheckKind::ALL.iter().skip(checks.len()) {
            checks.push(CheckResult {
                kind: *kind,
                outcome: CheckOutcome::NotRun,
            });
        }

        debug!(
            assertion = %self.name,
            status = response.status_code(),
            passed = outcome.is_ok(),
            "Evaluated error response"
        );

        Verdict {
            assertion: self.name.clone(),
            checks,
        }
    }

    fn run_checks(
        &self,
        response: &HttpResponseCapture,
        checks: &mut Vec<CheckResult>,
    ) -> Result<(), AssertionFailure> {
        record(checks, CheckKind::StatusCode, self.contract.check_status(response))?;

        let envelope = DecodedEnvelope::decode(response.body()).map_err(|reason| {
            AssertionFailure::MalformedErrorBody {
                reason,
                body: response.body().to_string(),
            }
        });
        let envelope = record(checks, CheckKind::BodyDecodable, envelope)?;

        record(checks, CheckKind::ErrorCode, self.contract.check_code(&envelope))?;
        record(
            checks,
            CheckKind::Description,
            self.contract
                .check_description(&envelope, self.pattern.as_ref()),
        )
    }
}

fn record<T>(
    checks: &mut Vec<CheckResult>,
    kind: CheckKind,
    result: Result<T, AssertionFailure>,
) -> Result<T, AssertionFailure> {
    let outcome = match &result {
        Ok(_) => CheckOutcome::Passed,
        Err(failure) => {
            debug!(check = %kind, error = %failure, "Check failed");
            CheckOutcome::Failed(failure.clone())
        }
    };
    checks.push(CheckResult { kind, outcome });
    result
}

/// Checks that a response is the API's "unknown request" 404 error.
pub fn be_a_404(response: &HttpResponseCapture) -> Verdict {
    ErrorResponseAssertion::be_a_404().evaluate(response)
}

/// Asserts that a response is the API's "unknown request" 404 error.
///
/// # Panics
///
/// Panics with the verdict report if any check fails.
#[track_caller]
pub fn assert_be_a_404(response: &HttpResponseCapture) {
    let verdict = be_a_404(response);
    assert!(verdict.passed(), "{}", verdict);
}
