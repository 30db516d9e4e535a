//! Built-in collection schemas
//!
//! The catalog ships with two collections: `authors` and `books`. Their
//! schemas are registered on first open, so every write is validated from
//! the start.
//!
//! One book references one author through `author_id`; an author has
//! zero-or-more books. The reference is not integrity-checked, so a book
//! pointing at a missing author is accepted (and simply drops out of the
//! inner-join reports).

use super::{FieldDef, FieldType, IdStrategy, ObjectDef, Schema};
use std::collections::HashMap;

/// Collection name for authors
pub const AUTHORS: &str = "authors";

/// Collection name for books
pub const BOOKS: &str = "books";

/// Schema for the `authors` collection
pub fn authors() -> Schema {
    let contacts = ObjectDef {
        fields: HashMap::from([
            (
                "email".to_string(),
                FieldDef::required(FieldType::String).describe("Author's email"),
            ),
            (
                "phone".to_string(),
                FieldDef::required(FieldType::String).describe("Author's phone number"),
            ),
            (
                "postal_code".to_string(),
                FieldDef::required(FieldType::String).describe("Author's postal code"),
            ),
        ]),
    };

    Schema::new(AUTHORS)
        .with_id_strategy(IdStrategy::Uuid)
        .field(
            "full_name",
            FieldDef::required(FieldType::String).describe("Author's full name"),
        )
        .field(
            "birth_date",
            FieldDef::required(FieldType::Date).describe("Author's birth date"),
        )
        .field(
            "languages",
            FieldDef::required(FieldType::Array(Box::new(FieldType::String)))
                .describe("Languages the author writes in"),
        )
        .field(
            "contacts",
            FieldDef::required(FieldType::Object(contacts)),
        )
}

/// Schema for the `books` collection
pub fn books() -> Schema {
    Schema::new(BOOKS)
        .with_id_strategy(IdStrategy::Uuid)
        .field(
            "title",
            FieldDef::required(FieldType::String).describe("Book title"),
        )
        .field(
            "author_id",
            FieldDef::required(FieldType::Ref(AUTHORS.to_string()))
                .describe("Reference to the author"),
        )
        .field(
            "genre",
            FieldDef::required(FieldType::String).describe("Book genre"),
        )
        .field(
            "pages",
            FieldDef::required(FieldType::Int)
                .min(1)
                .describe("Number of pages"),
        )
        .field(
            "language",
            FieldDef::required(FieldType::String).describe("Language of the book"),
        )
        .field(
            "year",
            FieldDef::required(FieldType::Int).describe("Year of publication"),
        )
        .field(
            "synopsis",
            FieldDef::required(FieldType::String).describe("Brief description of the book"),
        )
}
