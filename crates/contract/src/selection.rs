//! Focus filtering for test cases.
//!
//! When any case carries the focus tag, only focused cases run. Otherwise the
//! whole suite runs, unless `run_all_when_everything_filtered` is off, in which
//! case nothing does.

use tracing::debug;

/// Something that carries tags.
pub trait Tagged {
    /// Returns the tags attached to this item.
    fn tags(&self) -> &[String];

    /// Returns true if the item carries `tag`.
    fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

/// The run-all-unless-focused selection policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusFilter {
    /// Tag that marks a focused case.
    pub tag: String,
    /// Run every case when none are focused.
    pub run_all_when_everything_filtered: bool,
}

impl Default for FocusFilter {
    fn default() -> Self {
        Self {
            tag: "focus".to_string(),
            run_all_when_everything_filtered: true,
        }
    }
}

impl FocusFilter {
    /// Creates a filter for the given tag.
    pub fn new(tag: impl Into<String>, run_all_when_everything_filtered: bool) -> Self {
        Self {
            tag: tag.into(),
            run_all_when_everything_filtered,
        }
    }

    /// Returns true if any case is focused.
    pub fn any_focused<T: Tagged>(&self, cases: &[T]) -> bool {
        cases.iter().any(|case| case.has_tag(&self.tag))
    }

    /// Selects the cases to run.
    pub fn select<'a, T: Tagged>(&self, cases: &'a [T]) -> Vec<&'a T> {
        let selected: Vec<&T> = if self.any_focused(cases) {
            cases.iter().filter(|case| case.has_tag(&self.tag)).collect()
        } else if self.run_all_when_everything_filtered {
            cases.iter().collect()
        } else {
            Vec::new()
        };

        debug!(
            tag = %self.tag,
            total = cases.len(),
            selected = selected.len(),
            "Applied focus filter"
        );
        selected
    }
}
