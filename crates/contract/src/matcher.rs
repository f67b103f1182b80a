//! Text matchers for error descriptions.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ContractError, ContractResult};

/// Matcher applied to the `description` field of an error envelope.
///
/// In contract files a bare string is an exact match, `{"contains": ...}` is a
/// case-sensitive substring match and `{"matches": ...}` is a regular
/// expression.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DescriptionMatcher {
    /// Exact match.
    Exact(String),
    /// Pattern match.
    Pattern {
        /// Regular expression the description must match somewhere.
        #[serde(rename = "matches")]
        pattern: String,
    },
    /// Contains match.
    Contains {
        /// Substring the description must contain.
        contains: String,
    },
}

impl DescriptionMatcher {
    /// Creates a substring matcher.
    pub fn contains(text: impl Into<String>) -> Self {
        DescriptionMatcher::Contains {
            contains: text.into(),
        }
    }

    /// Creates a regular expression matcher.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        DescriptionMatcher::Pattern {
            pattern: pattern.into(),
        }
    }

    /// Checks if a description matches.
    ///
    /// An invalid regular expression never matches; use [`validate`](Self::validate)
    /// to reject it up front.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            DescriptionMatcher::Exact(expected) => value == expected,
            DescriptionMatcher::Pattern { pattern } => Regex::new(pattern)
                .map(|re| re.is_match(value))
                .unwrap_or(false),
            DescriptionMatcher::Contains { contains } => value.contains(contains.as_str()),
        }
    }

    /// Checks a description against a regular expression already returned by
    /// [`compile`](Self::compile), falling back to [`matches`](Self::matches).
    pub fn matches_with(&self, value: &str, compiled: Option<&Regex>) -> bool {
        match (self, compiled) {
            (DescriptionMatcher::Pattern { .. }, Some(re)) => re.is_match(value),
            _ => self.matches(value),
        }
    }

    /// Compiles the regular expression of a pattern matcher.
    ///
    /// Exact and contains matchers need no compilation and yield `Ok(None)`.
    pub fn compile(&self) -> ContractResult<Option<Regex>> {
        match self {
            DescriptionMatcher::Pattern { pattern } => Regex::new(pattern)
                .map(Some)
                .map_err(|e| ContractError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                }),
            _ => Ok(None),
        }
    }

    /// Checks that a pattern matcher compiles.
    pub fn validate(&self) -> ContractResult<()> {
        self.compile().map(|_| ())
    }
}

impl fmt::Display for DescriptionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptionMatcher::Exact(expected) => write!(f, "equal to {:?}", expected),
            DescriptionMatcher::Pattern { pattern } => write!(f, "matching /{}/", pattern),
            DescriptionMatcher::Contains { contains } => write!(f, "containing {:?}", contains),
        }
    }
}
