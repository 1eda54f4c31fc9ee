//! Literal search and replace over the whole document.
//!
//! Matching is plain substring comparison: no regex, no case folding,
//! no selection scoping.

/// Outcome of a replace-all pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Nothing to do: the search string was empty.
    Unchanged,
    /// The rewritten text and how many occurrences were replaced.
    Replaced { text: String, count: usize },
}

impl Replacement {
    /// Number of replaced occurrences.
    pub const fn count(&self) -> usize {
        match self {
            Self::Unchanged => 0,
            Self::Replaced { count, .. } => *count,
        }
    }
}

/// Replace every non-overlapping occurrence of `search`, scanning left to right.
///
/// An empty `search` never mutates and yields [`Replacement::Unchanged`].
///
/// ```
/// use mdpad::search::{replace_all, Replacement};
///
/// let result = replace_all("foo bar foo", "foo", "baz");
/// assert_eq!(
///     result,
///     Replacement::Replaced { text: "baz bar baz".into(), count: 2 }
/// );
/// ```
pub fn replace_all(haystack: &str, search: &str, replacement: &str) -> Replacement {
    if search.is_empty() {
        return Replacement::Unchanged;
    }

    let mut text = String::with_capacity(haystack.len());
    let mut count = 0;
    let mut last = 0;
    for (start, matched) in haystack.match_indices(search) {
        text.push_str(&haystack[last..start]);
        text.push_str(replacement);
        last = start + matched.len();
        count += 1;
    }
    text.push_str(&haystack[last..]);

    Replacement::Replaced { text, count }
}

/// Count non-overlapping occurrences of `search`. Zero for an empty needle.
pub fn count_matches(haystack: &str, search: &str) -> usize {
    if search.is_empty() {
        return 0;
    }
    haystack.matches(search).count()
}
