//! Style signature cache and class name generation.

use std::collections::HashMap;

/// Maps evaluated style text to the class generated for it.
///
/// The key is the exact text: whitespace differences are different keys.
/// Entries are never evicted and never overwritten.
#[derive(Debug, Clone, Default)]
pub struct StyleCache {
    classes: HashMap<String, String>,
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, style_text: &str) -> Option<&str> {
        self.classes.get(style_text).map(String::as_str)
    }

    /// Record `class_name` for `style_text`. An existing entry wins; the
    /// class actually stored is returned.
    pub fn record(&mut self, style_text: impl Into<String>, class_name: impl Into<String>) -> &str {
        self.classes
            .entry(style_text.into())
            .or_insert_with(|| class_name.into())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Produces `prefix-1`, `prefix-2`, ... from a monotonic counter.
#[derive(Debug, Clone)]
pub struct ClassNameGenerator {
    prefix: String,
    next: u64,
}

impl ClassNameGenerator {
    pub fn new(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: first,
        }
    }

    pub fn next_class(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        format!("{}-{id}", self.prefix)
    }

    /// The id the next call will use.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for ClassNameGenerator {
    fn default() -> Self {
        Self::new("styled", 1)
    }
}
