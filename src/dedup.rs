//! Order-preserving line deduplication.
//!
//! Free text lines are compared case-insensitively; tabular lines (anything
//! containing a tab) are compared verbatim. Both are trimmed first. The first
//! occurrence of each key wins and keeps its original spelling.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::model::CELL_SEPARATOR;

/// Compute the key two lines must share to count as duplicates.
///
/// # Example
///
/// ```
/// use undup::dedup::dedup_key;
///
/// assert_eq!(dedup_key("  Apple "), "apple");
/// assert_eq!(dedup_key("Apple\tRed"), "Apple\tRed");
/// ```
pub fn dedup_key(line: &str) -> Cow<'_, str> {
    let trimmed = line.trim();
    if trimmed.contains(CELL_SEPARATOR) {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(trimmed.to_lowercase())
    }
}

/// Incremental deduplicator.
///
/// Feed lines one at a time with [`Deduplicator::insert`]; only lines whose
/// key has not been seen yet are kept.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
    kept: Vec<String>,
    total: usize,
}

impl Deduplicator {
    /// Create an empty deduplicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a line. Returns `true` if it was kept.
    pub fn insert(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();
        self.total += 1;
        let key = dedup_key(&line).into_owned();
        if self.seen.insert(key) {
            self.kept.push(line);
            true
        } else {
            false
        }
    }

    /// Number of lines offered so far.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of lines kept so far.
    pub fn unique(&self) -> usize {
        self.kept.len()
    }

    /// Number of lines dropped as duplicates so far.
    pub fn removed(&self) -> usize {
        self.total - self.kept.len()
    }

    /// Kept lines in first-occurrence order.
    pub fn lines(&self) -> &[String] {
        &self.kept
    }

    /// Consume the deduplicator, returning the kept lines.
    pub fn into_lines(self) -> Vec<String> {
        self.kept
    }
}

impl<S: Into<String>> Extend<S> for Deduplicator {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for line in iter {
            self.insert(line);
        }
    }
}

/// Remove duplicate lines, keeping the first occurrence of each key.
///
/// # Example
///
/// ```
/// use undup::deduplicate;
///
/// let lines = ["Apple", "apple", "Banana", "Apple"].map(String::from);
/// assert_eq!(deduplicate(&lines), vec!["Apple", "Banana"]);
/// ```
pub fn deduplicate<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut dedup = Deduplicator::new();
    dedup.extend(lines.iter().map(|l| l.as_ref().to_string()));
    log::debug!(
        "dedup: {} lines in, {} kept, {} removed",
        dedup.total(),
        dedup.unique(),
        dedup.removed()
    );
    dedup.into_lines()
}
