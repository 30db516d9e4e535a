//! In-memory join helpers
//!
//! Joins run over fully-listed collections; the store has no native join
//! support and the catalogs this serves are small.

use crate::storage::document::{Document, Value};
use std::collections::HashMap;

/// Index documents by ID
pub fn by_id(docs: &[Document]) -> HashMap<&str, &Document> {
    docs.iter().map(|d| (d.id.as_str(), d)).collect()
}

/// The string value of a reference field, if present
pub fn ref_field<'a>(doc: &'a Document, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

/// Count documents grouped by the value of a reference field
///
/// Documents without the field carry no vote; dangling references are
/// counted under their (unmatched) target ID and simply never looked up.
pub fn count_by_ref<'a>(docs: &'a [Document], field: &str) -> HashMap<&'a str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for doc in docs {
        if let Some(target) = ref_field(doc, field) {
            *counts.entry(target).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, author_id: &str) -> Document {
        let mut doc = Document::new(id);
        doc.set("author_id", author_id);
        doc
    }

    #[test]
    fn test_by_id() {
        let docs = vec![Document::new("a"), Document::new("b")];
        let index = by_id(&docs);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("a").map(|d| d.id.as_str()), Some("a"));
    }

    #[test]
    fn test_count_by_ref() {
        let docs = vec![
            book("b1", "orwell"),
            book("b2", "orwell"),
            book("b3", "rowling"),
            Document::new("no-ref"),
        ];
        let counts = count_by_ref(&docs, "author_id");

        assert_eq!(counts.get("orwell"), Some(&2));
        assert_eq!(counts.get("rowling"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
