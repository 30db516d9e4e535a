//! Collection - a group of documents stored in a directory
//!
//! Collections are analogous to tables in a relational database.
//! Each collection is a directory containing markdown files.
//!
//! Directory structure:
//! ```text
//! /collections/
//!   /authors/
//!     2f6c1d3a-....md
//!   /books/
//!     8a41e0b7-....md
//! ```

use super::document::Document;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// A collection of documents
#[derive(Debug)]
pub struct Collection {
    /// Name of the collection (directory name)
    pub name: String,
    /// Path to the collection directory
    pub path: PathBuf,
}

impl Collection {
    /// Open a collection at the given path
    pub fn open(name: impl Into<String>, base_path: &Path) -> Self {
        let name = name.into();
        let path = base_path.join("collections").join(&name);
        Self { name, path }
    }

    /// Create the collection directory if it doesn't exist
    pub async fn ensure_exists(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.path).await?;
        Ok(())
    }

    /// Check if the collection exists
    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    /// List all documents in the collection
    pub async fn list(&self) -> anyhow::Result<Vec<Document>> {
        let mut documents = Vec::new();

        if !self.path.exists() {
            return Ok(documents);
        }

        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.extension().map(|e| e == "md").unwrap_or(false) {
                if let Ok(doc) = self.read_document(path).await {
                    documents.push(doc);
                }
            }
        }

        Ok(documents)
    }

    /// Read a single document by ID
    pub async fn get(&self, id: &str) -> anyhow::Result<Option<Document>> {
        let path = self.path.join(format!("{}.md", id));
        if !path.exists() {
            return Ok(None);
        }
        self.read_document(&path).await.map(Some)
    }

    /// Insert a new document
    pub async fn insert(&self, doc: &Document) -> anyhow::Result<()> {
        self.ensure_exists().await?;
        let path = self.path.join(format!("{}.md", doc.id));

        if path.exists() {
            anyhow::bail!(
                "Document '{}' already exists in collection '{}'",
                doc.id,
                self.name
            );
        }

        let content = doc.render();
        fs::write(&path, content).await?;
        Ok(())
    }

    /// Delete a document by ID
    pub async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let path = self.path.join(format!("{}.md", id));
        if path.exists() {
            fs::remove_file(&path).await?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Count documents in the collection
    pub async fn count(&self) -> anyhow::Result<usize> {
        let docs = self.list().await?;
        Ok(docs.len())
    }

    /// Read a document from a path
    async fn read_document(&self, path: &Path) -> anyhow::Result<Document> {
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid document path"))?;

        let content = fs::read_to_string(path).await?;
        let mut doc = Document::parse(id, &content)?;

        // Set relative path within collection
        doc.path = path.strip_prefix(&self.path)?.to_path_buf();

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::document::Value;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_collection_insert_and_get() {
        let tmp = TempDir::new().unwrap();
        let collection = Collection::open("books", tmp.path());

        let mut doc = Document::new("animal-farm");
        doc.set("title", "Animal Farm");
        doc.set("pages", 112i64);
        doc.body = "A farm, some pigs.".into();

        collection.insert(&doc).await.unwrap();

        let fetched = collection.get("animal-farm").await.unwrap().unwrap();
        assert_eq!(
            fetched.get("title").and_then(Value::as_str),
            Some("Animal Farm")
        );
        assert_eq!(fetched.get("pages").and_then(Value::as_i64), Some(112));

        let docs = collection.list().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(collection.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_duplicate_fails() {
        let tmp = TempDir::new().unwrap();
        let collection = Collection::open("books", tmp.path());

        let doc = Document::new("animal-farm");
        collection.insert(&doc).await.unwrap();

        let err = collection.insert(&doc).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_delete() {
        let tmp = TempDir::new().unwrap();
        let collection = Collection::open("books", tmp.path());

        collection.insert(&Document::new("gone")).await.unwrap();
        assert!(collection.delete("gone").await.unwrap());
        assert!(!collection.delete("gone").await.unwrap());
        assert!(collection.get("gone").await.unwrap().is_none());
    }
}
