//! Seed loader
//!
//! Inserts the fixed sample catalog: two authors and four books. The loader
//! is deliberately not idempotent; re-running it against a non-empty catalog
//! duplicates the fixture.
//!
//! The sample books reference two fixed author identifiers that are NOT the
//! IDs generated for the seeded authors, so a literal seed-then-join run
//! matches zero rows. This mirrors the sample data this crate reproduces and
//! is kept as a documented limitation rather than silently repaired. Tests
//! that exercise join logic build identifier-consistent fixtures instead.

use crate::schema::builtin::{AUTHORS, BOOKS};
use crate::storage::document::Value;
use crate::{Catalog, Document};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::info;

/// Author identifier referenced by the Orwell titles in the sample books
pub const ORWELL_REF: &str = "65a123456789abcd12345678";

/// Author identifier referenced by the Rowling titles in the sample books
pub const ROWLING_REF: &str = "65a123456789abcd12345679";

/// What the seed loader inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub authors: usize,
    pub books: usize,
}

/// Insert the sample authors and books
pub async fn seed(catalog: &Catalog) -> anyhow::Result<SeedReport> {
    let authors = catalog.insert_many(AUTHORS, sample_authors()?).await?;
    let books = catalog.insert_many(BOOKS, sample_books()).await?;

    info!(authors, books, "seeded sample catalog");

    Ok(SeedReport { authors, books })
}

/// The two sample authors
pub fn sample_authors() -> anyhow::Result<Vec<Document>> {
    Ok(vec![
        author(
            "George Orwell",
            "1903-06-25".parse::<NaiveDate>()?,
            "orwell@example.com",
            "+123456789",
            "12345",
        ),
        author(
            "J.K. Rowling",
            "1965-07-31".parse::<NaiveDate>()?,
            "rowling@example.com",
            "+987654321",
            "54321",
        ),
    ])
}

/// The four sample books
pub fn sample_books() -> Vec<Document> {
    vec![
        book(
            "1984",
            ORWELL_REF,
            "Dystopian",
            328,
            1949,
            "A novel about a totalitarian future society.",
        ),
        book(
            "Animal Farm",
            ORWELL_REF,
            "Political satire",
            112,
            1945,
            "A satirical allegory of Soviet totalitarianism.",
        ),
        book(
            "Harry Potter and the Sorcerer's Stone",
            ROWLING_REF,
            "Fantasy",
            309,
            1997,
            "A young wizard's journey begins.",
        ),
        book(
            "Harry Potter and the Chamber of Secrets",
            ROWLING_REF,
            "Fantasy",
            341,
            1998,
            "The second year at Hogwarts brings new mysteries.",
        ),
    ]
}

fn author(
    full_name: &str,
    birth_date: NaiveDate,
    email: &str,
    phone: &str,
    postal_code: &str,
) -> Document {
    let mut doc = Document::draft();
    doc.set("full_name", full_name);
    doc.set("birth_date", birth_date);
    doc.set(
        "languages",
        Value::Array(vec![Value::String("English".into())]),
    );
    doc.set(
        "contacts",
        Value::Object(HashMap::from([
            ("email".to_string(), Value::String(email.into())),
            ("phone".to_string(), Value::String(phone.into())),
            ("postal_code".to_string(), Value::String(postal_code.into())),
        ])),
    );
    doc
}

fn book(
    title: &str,
    author_id: &str,
    genre: &str,
    pages: i64,
    year: i64,
    synopsis: &str,
) -> Document {
    let mut doc = Document::draft();
    doc.set("title", title);
    doc.set("author_id", author_id);
    doc.set("genre", genre);
    doc.set("pages", pages);
    doc.set("language", "English");
    doc.set("year", year);
    doc.set("synopsis", synopsis);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_shapes() {
        let authors = sample_authors().unwrap();
        assert_eq!(authors.len(), 2);
        assert!(authors.iter().all(|a| a.id.is_empty()));

        let books = sample_books();
        assert_eq!(books.len(), 4);
        assert!(books
            .iter()
            .all(|b| matches!(b.get("author_id").and_then(Value::as_str),
                Some(ORWELL_REF) | Some(ROWLING_REF))));
    }

    #[test]
    fn test_sample_data_validates() {
        let authors_schema = crate::schema::builtin::authors();
        for doc in sample_authors().unwrap() {
            assert!(authors_schema.validate(&doc).is_ok());
        }

        let books_schema = crate::schema::builtin::books();
        for doc in sample_books() {
            assert!(books_schema.validate(&doc).is_ok());
        }
    }
}
