//! Document representation
//!
//! A Document is a single markdown file with YAML frontmatter.
//! The frontmatter carries the structured fields (author or book data),
//! and the body holds free-form notes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A document in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier (derived from filename, without .md extension)
    pub id: String,

    /// Path relative to collection root
    pub path: PathBuf,

    /// YAML frontmatter fields
    pub fields: Fields,

    /// Markdown body content
    pub body: String,
}

/// Field values that can be stored in frontmatter
///
/// `Date` is listed before `String` so untagged deserialization tries the
/// stricter form first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    String(String),
    Array(Vec<Value>),
    Object(HashMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Human-readable type name, used in validation errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Date(_) => "date",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

/// A map of field names to values
pub type Fields = HashMap<String, Value>;

impl Document {
    /// Create a new document with the given ID
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: PathBuf::from(format!("{}.md", &id)),
            id,
            fields: Fields::new(),
            body: String::new(),
        }
    }

    /// Create a document without an ID, to be assigned at insertion time
    /// by the collection's ID strategy
    pub fn draft() -> Self {
        Self {
            id: String::new(),
            path: PathBuf::new(),
            fields: Fields::new(),
            body: String::new(),
        }
    }

    /// Set a field value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set the body content
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Parse a document from markdown content
    pub fn parse(id: impl Into<String>, content: &str) -> anyhow::Result<Self> {
        let id = id.into();
        let (fields, body) = super::frontmatter::parse(content)?;

        Ok(Self {
            path: PathBuf::from(format!("{}.md", &id)),
            id,
            fields,
            body,
        })
    }

    /// Render document back to markdown
    pub fn render(&self) -> String {
        super::frontmatter::render(&self.fields, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let mut doc = Document::new("orwell");
        doc.set("full_name", "George Orwell")
            .set("pages", 328i64)
            .set("active", false);

        assert_eq!(doc.id, "orwell");
        assert_eq!(
            doc.get("full_name"),
            Some(&Value::String("George Orwell".into()))
        );
    }

    #[test]
    fn test_date_field() {
        let birth = NaiveDate::from_ymd_opt(1903, 6, 25).unwrap();
        let mut doc = Document::new("orwell");
        doc.set("birth_date", birth);

        assert_eq!(doc.get("birth_date").and_then(Value::as_date), Some(birth));
    }

    #[test]
    fn test_roundtrip() {
        let mut doc = Document::new("test");
        doc.set("title", "Animal Farm");
        doc.set("birth_date", NaiveDate::from_ymd_opt(1965, 7, 31).unwrap());
        doc.body = "Shelf notes.\n\nWith multiple paragraphs.".into();

        let rendered = doc.render();
        let parsed = Document::parse("test", &rendered).unwrap();

        assert_eq!(parsed.fields, doc.fields);
        assert_eq!(parsed.body.trim(), doc.body.trim());
    }
}
