//! Named assertion registry.
//!
//! Test suites register each assertion once and invoke it by name from many
//! test cases. The registry starts with [`be_a_404`](crate::be_a_404) and can
//! be extended programmatically or from contract files.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::assertion::{ErrorResponseAssertion, Verdict};
use crate::capture::HttpResponseCapture;
use crate::error::{ContractError, ContractResult};
use crate::loader::ContractFile;

/// A set of named error-response assertions.
#[derive(Debug, Clone, Default)]
pub struct MatcherRegistry {
    assertions: BTreeMap<String, ErrorResponseAssertion>,
}

impl MatcherRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in assertions.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let be_a_404 = ErrorResponseAssertion::be_a_404();
        registry
            .assertions
            .insert(be_a_404.name().to_string(), be_a_404);
        registry
    }

    /// Registers an assertion under its name.
    ///
    /// Names are registered once; a second registration fails with
    /// [`ContractError::DuplicateMatcher`].
    pub fn register(&mut self, assertion: ErrorResponseAssertion) -> ContractResult<()> {
        if self.assertions.contains_key(assertion.name()) {
            return Err(ContractError::DuplicateMatcher {
                name: assertion.name().to_string(),
            });
        }

        assertion.contract().description.validate()?;
        debug!(matcher = %assertion.name(), "Registered matcher");
        self.assertions
            .insert(assertion.name().to_string(), assertion);
        Ok(())
    }

    /// Registers every matcher declared in a contract file.
    ///
    /// Registration stops at the first error; matchers registered before it
    /// remain in the registry.
    pub fn register_file(&mut self, file: &ContractFile) -> ContractResult<()> {
        for entry in &file.matchers {
            self.register(entry.to_assertion())?;
        }
        info!(
            contracts = %file.name,
            matchers = file.matchers.len(),
            "Registered contract file"
        );
        Ok(())
    }

    /// Looks up an assertion by name.
    pub fn get(&self, name: &str) -> Option<&ErrorResponseAssertion> {
        self.assertions.get(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assertions.keys().map(String::as_str)
    }

    /// Returns the number of registered assertions.
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// Evaluates the named assertion against a response.
    pub fn evaluate(&self, name: &str, response: &HttpResponseCapture) -> ContractResult<Verdict> {
        let assertion = self
            .get(name)
            .ok_or_else(|| ContractError::UnknownMatcher {
                name: name.to_string(),
            })?;
        Ok(assertion.evaluate(response))
    }
}
