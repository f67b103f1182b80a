//! JSON contract file loader.
//!
//! A contract file declares extra named error contracts and, optionally, a
//! list of captured responses to check against them:
//!
//! ```json
//! {
//!   "name": "orders-api",
//!   "matchers": [
//!     {"name": "be_a_410", "status": 410, "code": 10004,
//!      "description": {"contains": "Gone"}}
//!   ],
//!   "cases": [
//!     {"name": "unknown route", "tags": ["focus"],
//!      "response": {"statusCode": 404,
//!                   "body": "{\"code\":10000,\"description\":\"Unknown request\"}"}}
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assertion::{ErrorContract, ErrorResponseAssertion};
use crate::capture::HttpResponseCapture;
use crate::error::{ContractError, ContractResult};
use crate::matcher::DescriptionMatcher;
use crate::selection::Tagged;

/// A contract file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractFile {
    /// Name of the contract set.
    pub name: String,

    /// Description of the contract set.
    #[serde(default)]
    pub description: String,

    /// Named error contracts to register.
    #[serde(default)]
    pub matchers: Vec<MatcherEntry>,

    /// Captured responses to check.
    #[serde(default)]
    pub cases: Vec<CapturedCase>,
}

/// A named error contract declared in a contract file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatcherEntry {
    /// Name the assertion is registered under.
    pub name: String,

    /// Expected HTTP status code.
    pub status: u16,

    /// Expected envelope `code`.
    pub code: i64,

    /// Matcher for the envelope `description`.
    pub description: DescriptionMatcher,
}

impl MatcherEntry {
    /// Builds the assertion this entry declares.
    pub fn to_assertion(&self) -> ErrorResponseAssertion {
        ErrorResponseAssertion::new(
            self.name.clone(),
            ErrorContract::new(self.status, self.code, self.description.clone()),
        )
    }
}

/// A captured response paired with the assertion it should satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CapturedCase {
    /// Case name.
    pub name: String,

    /// Tags for filtering.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Matcher to apply; the configured default when absent.
    #[serde(default)]
    pub matcher: Option<String>,

    /// The captured response.
    pub response: HttpResponseCapture,
}

impl Tagged for CapturedCase {
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Loads a contract file.
///
/// Description patterns are compiled once here so that a bad regular
/// expression is reported against the file rather than as a failing case.
pub fn load_contract_file(path: &Path) -> ContractResult<ContractFile> {
    let content = std::fs::read_to_string(path).map_err(|source| ContractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file: ContractFile =
        serde_json::from_str(&content).map_err(|e| ContractError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    for entry in &file.matchers {
        entry.description.validate()?;
    }

    debug!(
        path = %path.display(),
        matchers = file.matchers.len(),
        cases = file.cases.len(),
        "Loaded contract file"
    );
    Ok(file)
}

/// Discovers all contract files in a directory, recursively, in sorted order.
pub fn discover_contract_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
                files.push(path);
            } else if path.is_dir() {
                files.extend(discover_contract_files(&path));
            }
        }
    }

    files.sort();
    files
}
