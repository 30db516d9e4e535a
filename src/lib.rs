//! librarium - a schema-validated authors/books catalog
//!
//! A small document store holding two related collections, with every
//! write checked against a per-collection schema.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         Catalog                            │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────────────┐   │
//! │  │ Seed Loader  │  │  Query Set   │  │ Schema Registry │   │
//! │  │ (fixtures)   │  │ (join/count) │  │ (authors/books) │   │
//! │  └──────┬───────┘  └──────┬───────┘  └───────┬─────────┘   │
//! │         │                 │                  │             │
//! │         ▼                 ▼                  ▼             │
//! │  ┌────────────────────────────────────────────────────┐    │
//! │  │                  Storage Layer                     │    │
//! │  │  (collections of markdown documents with YAML      │    │
//! │  │   frontmatter, one directory per collection)       │    │
//! │  └────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod query;
pub mod schema;
pub mod seed;
pub mod storage;
pub mod validation;

pub use error::{Error, Result};

use std::path::PathBuf;
use tracing::debug;

pub use schema::Schema;
pub use storage::collection::Collection;
pub use storage::document::{Document, Fields, Value};

use validation::{validate_collection_name, validate_document_id};

/// The main catalog handle
pub struct Catalog {
    /// Root path of the catalog
    pub root: PathBuf,
    /// Schema registry
    pub(crate) schema: schema::SchemaRegistry,
}

impl Catalog {
    /// Open or create a catalog at the given path
    ///
    /// The built-in `authors` and `books` schemas are registered on first
    /// open, so validation is in force before the first write.
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = path.into();
        let mut schema = schema::SchemaRegistry::load(&root)?;

        for builtin in [schema::builtin::authors(), schema::builtin::books()] {
            if schema.get(&builtin.name).is_none() {
                debug!(collection = %builtin.name, "registering built-in schema");
                schema.register(builtin)?;
            }
        }

        Ok(Self { root, schema })
    }

    /// Open a collection by name
    pub fn collection(&self, name: &str) -> Collection {
        Collection::open(name, &self.root)
    }

    /// Get the schema for a collection, if one is registered
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schema.get(name)
    }

    /// List all registered schemas
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schema.list()
    }

    /// Insert a document into a collection, returning its assigned ID
    ///
    /// A document without an ID gets one from the collection's ID strategy.
    /// The document is validated against the collection schema before it is
    /// written; a violating write fails and nothing is stored.
    pub async fn insert(&self, collection_name: &str, mut doc: Document) -> anyhow::Result<String> {
        validate_collection_name(collection_name).map_err(Error::from)?;

        let schema = self.schema.get(collection_name);

        if doc.id.is_empty() {
            let generated =
                schema
                    .and_then(|s| s.generate_id())
                    .ok_or_else(|| Error::MissingDocumentId {
                        collection: collection_name.to_string(),
                    })?;
            doc.path = PathBuf::from(format!("{}.md", generated));
            doc.id = generated;
        }
        validate_document_id(&doc.id).map_err(Error::from)?;

        if let Some(schema) = schema {
            schema
                .validate(&doc)
                .map_err(|source| Error::SchemaValidation {
                    collection: collection_name.to_string(),
                    source,
                })?;
        }

        let collection = self.collection(collection_name);
        collection.insert(&doc).await?;
        debug!(collection = collection_name, id = %doc.id, "inserted document");

        Ok(doc.id)
    }

    /// Insert documents in sequence, stopping at the first failure
    ///
    /// Not atomic: documents inserted before the failure stay inserted.
    pub async fn insert_many(
        &self,
        collection_name: &str,
        docs: Vec<Document>,
    ) -> anyhow::Result<usize> {
        let mut inserted = 0;
        for doc in docs {
            self.insert(collection_name, doc).await?;
            inserted += 1;
        }
        Ok(inserted)
    }
}
