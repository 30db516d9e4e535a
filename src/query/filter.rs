//! Equality filters over documents
//!
//! A `Filter` is a conjunction of field = value conditions, evaluated
//! in memory against a document's fields.

use crate::storage::document::{Document, Value};

/// A conjunction of equality conditions
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// An empty filter, matching every document
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a field to equal the given value
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Whether the filter has no conditions
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate the filter against a document
    ///
    /// A condition on a missing field never matches.
    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_book() -> Document {
        let mut doc = Document::new("1984");
        doc.set("title", "1984");
        doc.set("language", "English");
        doc.set("year", 1949i64);
        doc
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(Filter::new().matches(&make_book()));
    }

    #[test]
    fn test_single_condition() {
        let doc = make_book();
        assert!(Filter::new().eq("language", "English").matches(&doc));
        assert!(!Filter::new().eq("language", "French").matches(&doc));
    }

    #[test]
    fn test_conjunction() {
        let doc = make_book();
        let both = Filter::new().eq("language", "English").eq("year", 1949i64);
        assert!(both.matches(&doc));

        let wrong_year = Filter::new().eq("language", "English").eq("year", 2021i64);
        assert!(!wrong_year.matches(&doc));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let doc = make_book();
        assert!(!Filter::new().eq("genre", "Dystopian").matches(&doc));
    }

    #[test]
    fn test_no_cross_type_equality() {
        let doc = make_book();
        // year is an int; the string "1949" must not match
        assert!(!Filter::new().eq("year", "1949").matches(&doc));
    }
}
