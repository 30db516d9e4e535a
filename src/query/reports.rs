//! The fixed query set over authors and books
//!
//! Five read-only shapes. The left/inner join distinction is deliberate:
//! `author_book_counts` preserves authors with zero books, while the other
//! join reports drop unmatched rows entirely.

use super::{filter::Filter, join};
use crate::schema::builtin::{AUTHORS, BOOKS};
use crate::storage::document::{Document, Value};
use crate::Catalog;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// One row of `author_book_counts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorBookCount {
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub book_count: usize,
}

/// One row of `authors_ranked_by_books`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAuthor {
    pub author_id: String,
    pub full_name: String,
    pub book_count: usize,
}

/// One row of `books_with_author`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookWithAuthor {
    pub title: String,
    pub genre: String,
    pub pages: i64,
    pub language: String,
    pub year: i64,
    pub synopsis: String,
    pub author_full_name: String,
    pub author_contacts: HashMap<String, Value>,
}

/// Book count per author, zero-book authors included
///
/// Left join: every author appears, with `book_count = 0` when no book
/// references them.
pub async fn author_book_counts(catalog: &Catalog) -> anyhow::Result<Vec<AuthorBookCount>> {
    let authors = catalog.collection(AUTHORS).list().await?;
    let books = catalog.collection(BOOKS).list().await?;
    let counts = join::count_by_ref(&books, "author_id");

    Ok(authors
        .iter()
        .map(|author| AuthorBookCount {
            full_name: field_str(author, "full_name"),
            birth_date: author.get("birth_date").and_then(Value::as_date),
            book_count: counts.get(author.id.as_str()).copied().unwrap_or(0),
        })
        .collect())
}

/// Authors ordered by how many books they have
///
/// Inner join: authors with zero books are dropped. Sorted by book count
/// descending, ties broken by full name ascending (case-sensitive).
pub async fn authors_ranked_by_books(catalog: &Catalog) -> anyhow::Result<Vec<RankedAuthor>> {
    let authors = catalog.collection(AUTHORS).list().await?;
    let books = catalog.collection(BOOKS).list().await?;
    let counts = join::count_by_ref(&books, "author_id");

    let mut rows: Vec<RankedAuthor> = authors
        .iter()
        .filter_map(|author| {
            let book_count = counts.get(author.id.as_str()).copied().unwrap_or(0);
            (book_count > 0).then(|| RankedAuthor {
                author_id: author.id.clone(),
                full_name: field_str(author, "full_name"),
                book_count,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.book_count
            .cmp(&a.book_count)
            .then_with(|| a.full_name.cmp(&b.full_name))
    });

    Ok(rows)
}

/// Each book with its author's name and contacts, fixed projection
///
/// Inner join: a book whose `author_id` matches no author is excluded.
pub async fn books_with_author(catalog: &Catalog) -> anyhow::Result<Vec<BookWithAuthor>> {
    let authors = catalog.collection(AUTHORS).list().await?;
    let books = catalog.collection(BOOKS).list().await?;
    let authors_by_id = join::by_id(&authors);

    Ok(books
        .iter()
        .filter_map(|book| {
            let author = join::ref_field(book, "author_id")
                .and_then(|id| authors_by_id.get(id))?;

            Some(BookWithAuthor {
                title: field_str(book, "title"),
                genre: field_str(book, "genre"),
                pages: field_i64(book, "pages"),
                language: field_str(book, "language"),
                year: field_i64(book, "year"),
                synopsis: field_str(book, "synopsis"),
                author_full_name: field_str(author, "full_name"),
                author_contacts: author
                    .get("contacts")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default(),
            })
        })
        .collect())
}

/// Each book merged with its full author document
///
/// Inner join, no projection: the whole author is embedded under the
/// book's `author` field.
pub async fn books_with_author_full(catalog: &Catalog) -> anyhow::Result<Vec<Document>> {
    let authors = catalog.collection(AUTHORS).list().await?;
    let books = catalog.collection(BOOKS).list().await?;
    let authors_by_id = join::by_id(&authors);

    Ok(books
        .iter()
        .filter_map(|book| {
            let author = join::ref_field(book, "author_id")
                .and_then(|id| authors_by_id.get(id))?;

            let mut merged = book.clone();
            merged.set("author", Value::Object(author.fields.clone()));
            Some(merged)
        })
        .collect())
}

/// Count books matching an equality filter on language and year
pub async fn count_books(catalog: &Catalog, language: &str, year: i64) -> anyhow::Result<usize> {
    let filter = Filter::new().eq("language", language).eq("year", year);
    let books = catalog.collection(BOOKS).list().await?;

    Ok(books.iter().filter(|doc| filter.matches(doc)).count())
}

fn field_str(doc: &Document, field: &str) -> String {
    doc.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn field_i64(doc: &Document, field: &str) -> i64 {
    doc.get(field).and_then(Value::as_i64).unwrap_or_default()
}
