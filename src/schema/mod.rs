//! Schema definitions and validation
//!
//! Schemas define the structure of collections:
//! - Field definitions with types
//! - Required vs optional fields (including nested object members)
//! - Integer minimums
//!
//! Schemas are stored in `/.librarium/schemas/{collection}.yaml`. A write
//! that violates a schema fails with a validation error; values are never
//! silently coerced or dropped.

pub mod builtin;

use crate::storage::document::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A field type in the schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Int,
    Float,
    Bool,
    Date,
    Array(Box<FieldType>),
    Object(ObjectDef),
    /// Reference to a document in another collection: ref:collection_name.
    /// Referential integrity is not enforced; a dangling reference passes.
    Ref(String),
}

impl Default for FieldType {
    fn default() -> Self {
        Self::String
    }
}

impl FieldType {
    /// Human-readable name, used in validation errors
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Date => "date",
            FieldType::Array(_) => "array",
            FieldType::Object(_) => "object",
            FieldType::Ref(_) => "ref",
        }
    }
}

/// Shape of a nested object field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ObjectDef {
    /// Member definitions, keyed by member name
    #[serde(default)]
    pub fields: HashMap<String, FieldDef>,
}

/// Definition of a single field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    /// Field type
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Whether the field is required
    #[serde(default)]
    pub required: bool,
    /// Minimum value (int fields only)
    #[serde(default)]
    pub minimum: Option<i64>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for FieldDef {
    fn default() -> Self {
        Self {
            field_type: FieldType::String,
            required: false,
            minimum: None,
            description: None,
        }
    }
}

impl FieldDef {
    /// A required field of the given type
    pub fn required(field_type: FieldType) -> Self {
        Self {
            field_type,
            required: true,
            ..Default::default()
        }
    }

    /// Attach a description
    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Attach an integer minimum
    pub fn min(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }
}

/// Schema for a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// Collection name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Field definitions
    #[serde(default)]
    pub fields: HashMap<String, FieldDef>,
    /// ID generation strategy
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

/// Strategy for generating document IDs
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// User provides the ID
    #[default]
    Manual,
    /// UUID v4
    Uuid,
}

impl Schema {
    /// Create a new schema for a collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: HashMap::new(),
            id_strategy: IdStrategy::default(),
        }
    }

    /// Add a field definition
    pub fn field(mut self, name: impl Into<String>, def: FieldDef) -> Self {
        self.fields.insert(name.into(), def);
        self
    }

    /// Set the ID generation strategy
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    /// Generate an ID per the schema's strategy, if it has a generating one
    pub fn generate_id(&self) -> Option<String> {
        match self.id_strategy {
            IdStrategy::Manual => None,
            IdStrategy::Uuid => Some(Uuid::new_v4().to_string()),
        }
    }

    /// Validate a document against this schema
    pub fn validate(&self, doc: &crate::Document) -> Result<(), ValidationError> {
        validate_fields(&self.fields, &doc.fields, "")
    }
}

fn validate_fields(
    defs: &HashMap<String, FieldDef>,
    values: &HashMap<String, Value>,
    prefix: &str,
) -> Result<(), ValidationError> {
    for (field_name, field_def) in defs {
        let path = if prefix.is_empty() {
            field_name.clone()
        } else {
            format!("{}.{}", prefix, field_name)
        };

        match values.get(field_name) {
            None | Some(Value::Null) => {
                if field_def.required {
                    return Err(ValidationError::MissingRequired(path));
                }
            }
            Some(value) => {
                check_type(&path, &field_def.field_type, value)?;

                if let (Some(minimum), Some(actual)) = (field_def.minimum, value.as_i64()) {
                    if actual < minimum {
                        return Err(ValidationError::BelowMinimum {
                            field: path,
                            minimum,
                            actual,
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

fn check_type(path: &str, expected: &FieldType, value: &Value) -> Result<(), ValidationError> {
    let mismatch = || ValidationError::TypeMismatch {
        field: path.to_string(),
        expected: expected.name().to_string(),
        actual: value.type_name().to_string(),
    };

    match expected {
        FieldType::String => matches!(value, Value::String(_))
            .then_some(())
            .ok_or_else(mismatch),
        FieldType::Int => matches!(value, Value::Int(_))
            .then_some(())
            .ok_or_else(mismatch),
        FieldType::Float => matches!(value, Value::Float(_) | Value::Int(_))
            .then_some(())
            .ok_or_else(mismatch),
        FieldType::Bool => matches!(value, Value::Bool(_))
            .then_some(())
            .ok_or_else(mismatch),
        FieldType::Date => matches!(value, Value::Date(_))
            .then_some(())
            .ok_or_else(mismatch),
        // References are plain identifiers; existence is not checked
        FieldType::Ref(_) => matches!(value, Value::String(_))
            .then_some(())
            .ok_or_else(mismatch),
        FieldType::Array(inner) => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    check_type(&format!("{}[{}]", path, i), inner, item)?;
                }
                Ok(())
            }
            _ => Err(mismatch()),
        },
        FieldType::Object(def) => match value {
            Value::Object(members) => validate_fields(&def.fields, members, path),
            _ => Err(mismatch()),
        },
    }
}

/// Validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingRequired(String),
    #[error("Invalid type for field {field}: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },
    #[error("Field {field} must be at least {minimum}, got {actual}")]
    BelowMinimum {
        field: String,
        minimum: i64,
        actual: i64,
    },
}

/// Registry of all schemas in the catalog
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
    path: PathBuf,
}

impl SchemaRegistry {
    /// Load schemas from the catalog directory
    pub fn load(catalog_path: &Path) -> anyhow::Result<Self> {
        let schema_path = catalog_path.join(".librarium").join("schemas");
        let mut registry = Self {
            schemas: HashMap::new(),
            path: schema_path.clone(),
        };

        if schema_path.exists() {
            for entry in std::fs::read_dir(&schema_path)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().map(|e| e == "yaml").unwrap_or(false) {
                    let content = std::fs::read_to_string(&path)?;
                    let schema: Schema = serde_yaml::from_str(&content)?;
                    registry.schemas.insert(schema.name.clone(), schema);
                }
            }
        }

        Ok(registry)
    }

    /// Get a schema by collection name
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Register a new schema
    pub fn register(&mut self, schema: Schema) -> anyhow::Result<()> {
        // Save to disk
        std::fs::create_dir_all(&self.path)?;
        let file_path = self.path.join(format!("{}.yaml", schema.name));
        let content = serde_yaml::to_string(&schema)?;
        std::fs::write(file_path, content)?;

        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// List all registered schemas
    pub fn list(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }
}
