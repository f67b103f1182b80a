//! apicheck
//!
//! Checks captured HTTP responses against the API's error contracts.
//!
//! ```text
//! apicheck --status 404 --body-file body.json
//! apicheck --cases contracts.json --focus-tag wip
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use apicheck_contract::{
    HarnessConfig, HttpResponseCapture, MatcherRegistry, init_logging, load_contract_file,
    run_cases,
};
use clap::Parser;
use tracing::info;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "apicheck")]
#[command(about = "Check captured HTTP responses against API error contracts")]
struct Cli {
    #[command(flatten)]
    config: HarnessConfig,

    /// Status code of the captured response.
    #[arg(long, requires = "body_file", conflicts_with = "cases")]
    status: Option<u16>,

    /// File holding the captured response body ("-" reads stdin).
    #[arg(long, requires = "status")]
    body_file: Option<PathBuf>,

    /// Matcher to apply to a single response (defaults to --default-matcher).
    #[arg(long, short)]
    matcher: Option<String>,

    /// Contract file whose captured cases are checked.
    #[arg(long)]
    cases: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.config.log_level);

    if let Err(errors) = cli.config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        return Ok(ExitCode::FAILURE);
    }

    let mut registry = MatcherRegistry::with_defaults();
    if let Some(path) = &cli.config.contracts {
        let file = load_contract_file(path)?;
        registry.register_file(&file)?;
    }

    let passed = match (&cli.cases, cli.status, &cli.body_file) {
        (Some(path), _, _) => check_cases(&cli.config, &mut registry, path)?,
        (None, Some(status), Some(body_file)) => {
            let matcher = cli
                .matcher
                .as_deref()
                .unwrap_or(&cli.config.default_matcher);
            check_single(&registry, matcher, status, body_file)?
        }
        _ => anyhow::bail!("Either --cases or --status with --body-file is required"),
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Checks one response read from disk or stdin.
fn check_single(
    registry: &MatcherRegistry,
    matcher: &str,
    status: u16,
    body_file: &Path,
) -> anyhow::Result<bool> {
    let body = read_body(body_file)?;
    let response = HttpResponseCapture::new(status, body);

    let verdict = registry.evaluate(matcher, &response)?;
    println!("{}", verdict);
    Ok(verdict.passed())
}

/// Checks every selected case of a contract file.
fn check_cases(
    config: &HarnessConfig,
    registry: &mut MatcherRegistry,
    path: &Path,
) -> anyhow::Result<bool> {
    let file = load_contract_file(path)?;
    // The same file may already be registered through --contracts.
    if config.contracts.as_deref() != Some(path) {
        registry.register_file(&file)?;
    }

    info!(contracts = %file.name, cases = file.cases.len(), "Checking cases");
    let report = run_cases(
        registry,
        &config.focus_filter(),
        &config.default_matcher,
        &file.cases,
    );
    println!("{}", report);
    Ok(report.all_passed())
}

fn read_body(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read response body from stdin")?;
        Ok(body)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read response body from {}", path.display()))
    }
}
