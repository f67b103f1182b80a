//! Runs captured cases against registered assertions.

use std::fmt;
use std::time::Instant;

use tracing::{info, warn};

use crate::loader::CapturedCase;
use crate::registry::MatcherRegistry;
use crate::selection::FocusFilter;

/// Result of a single case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    /// Case name.
    pub case_name: String,
    /// Matcher the case was checked with.
    pub matcher: String,
    /// Whether the case passed.
    pub passed: bool,
    /// Verdict report, or the lookup error when the matcher is unknown.
    pub diagnostic: String,
    /// Duration in microseconds.
    pub duration_us: u64,
}

/// Result of running a set of cases.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    /// Number of cases filtered out.
    pub skipped: usize,
    /// Results for each selected case.
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    /// Returns true if all selected cases passed.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Returns the number of passed cases.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Returns the number of failed cases.
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            let status = if result.passed { "ok" } else { "FAILED" };
            writeln!(f, "case {} ... {}", result.case_name, status)?;
            if !result.passed {
                for line in result.diagnostic.lines() {
                    writeln!(f, "    {}", line)?;
                }
            }
        }
        write!(
            f,
            "{} passed; {} failed; {} filtered out",
            self.passed_count(),
            self.failed_count(),
            self.skipped
        )
    }
}

/// Evaluates the selected cases.
///
/// Cases that name no matcher use `default_matcher`. An unknown matcher fails
/// that case only; the remaining cases still run.
pub fn run_cases(
    registry: &MatcherRegistry,
    filter: &FocusFilter,
    default_matcher: &str,
    cases: &[CapturedCase],
) -> SuiteReport {
    let selected = filter.select(cases);
    let mut report = SuiteReport {
        skipped: cases.len() - selected.len(),
        results: Vec::with_capacity(selected.len()),
    };

    for case in selected {
        let matcher = case.matcher.as_deref().unwrap_or(default_matcher);
        let start = Instant::now();
        let (passed, diagnostic) = match registry.evaluate(matcher, &case.response) {
            Ok(verdict) => (verdict.passed(), verdict.to_string()),
            Err(e) => {
                warn!(case = %case.name, error = %e, "Cannot evaluate case");
                (false, e.to_string())
            }
        };

        report.results.push(CaseResult {
            case_name: case.name.clone(),
            matcher: matcher.to_string(),
            passed,
            diagnostic,
            duration_us: start.elapsed().as_micros() as u64,
        });
    }

    info!(
        passed = report.passed_count(),
        failed = report.failed_count(),
        skipped = report.skipped,
        "Finished running cases"
    );
    report
}
