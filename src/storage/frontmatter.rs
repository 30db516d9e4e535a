//! YAML frontmatter parsing and rendering
//!
//! Markdown files use YAML frontmatter delimited by `---`:
//!
//! ```markdown
//! ---
//! title: Animal Farm
//! pages: 112
//! year: 1945
//! ---
//!
//! # Shelf notes here
//! ```
//!
//! Strings in strict `YYYY-MM-DD` form are read back as date values, so
//! `birth_date: 1903-06-25` survives a round trip as a date.

use super::document::{Fields, Value};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Parse YAML frontmatter from markdown content
pub fn parse(content: &str) -> anyhow::Result<(Fields, String)> {
    let content = content.trim_start();

    // Check for frontmatter delimiter
    if !content.starts_with("---") {
        // No frontmatter, entire content is body
        return Ok((Fields::new(), content.to_string()));
    }

    // Find the closing delimiter
    let rest = &content[3..];
    let end_pos = rest
        .find("\n---")
        .ok_or_else(|| anyhow::anyhow!("Unclosed frontmatter: missing closing ---"))?;

    let yaml_content = &rest[..end_pos].trim();
    let body_start = end_pos + 4; // Skip past "\n---"
    let body = rest[body_start..].trim_start_matches('\n').to_string();

    // Parse YAML
    let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml_content)?;
    let fields = yaml_to_fields(yaml_value)?;

    Ok((fields, body))
}

/// Convert serde_yaml::Value to our Fields type
fn yaml_to_fields(value: serde_yaml::Value) -> anyhow::Result<Fields> {
    match value {
        serde_yaml::Value::Mapping(map) => {
            let mut fields = Fields::new();
            for (k, v) in map {
                let key = k
                    .as_str()
                    .ok_or_else(|| anyhow::anyhow!("Non-string key in frontmatter"))?
                    .to_string();
                fields.insert(key, yaml_value_to_value(v));
            }
            Ok(fields)
        }
        serde_yaml::Value::Null => Ok(Fields::new()),
        _ => Err(anyhow::anyhow!("Frontmatter must be a YAML mapping")),
    }
}

/// Convert a serde_yaml::Value to our Value type
fn yaml_value_to_value(v: serde_yaml::Value) -> Value {
    match v {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Null
            }
        }
        serde_yaml::Value::String(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            Ok(date) => Value::Date(date),
            Err(_) => Value::String(s),
        },
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_value_to_value).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let obj: HashMap<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| {
                    k.as_str()
                        .map(|key| (key.to_string(), yaml_value_to_value(v)))
                })
                .collect();
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_value_to_value(tagged.value),
    }
}

/// Convert our Value to serde_yaml::Value
fn value_to_yaml(v: &Value) -> serde_yaml::Value {
    match v {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(b) => serde_yaml::Value::Bool(*b),
        Value::Int(i) => serde_yaml::Value::Number((*i).into()),
        Value::Float(f) => serde_yaml::Value::Number(serde_yaml::Number::from(*f)),
        Value::Date(d) => serde_yaml::Value::String(d.format("%Y-%m-%d").to_string()),
        Value::String(s) => serde_yaml::Value::String(s.clone()),
        Value::Array(arr) => serde_yaml::Value::Sequence(arr.iter().map(value_to_yaml).collect()),
        Value::Object(obj) => {
            let map: serde_yaml::Mapping = obj
                .iter()
                .map(|(k, v)| (serde_yaml::Value::String(k.clone()), value_to_yaml(v)))
                .collect();
            serde_yaml::Value::Mapping(map)
        }
    }
}

/// Render fields and body back to markdown with frontmatter
pub fn render(fields: &Fields, body: &str) -> String {
    if fields.is_empty() {
        return body.to_string();
    }

    // Convert fields to YAML mapping
    let yaml_map: serde_yaml::Mapping = fields
        .iter()
        .map(|(k, v)| (serde_yaml::Value::String(k.clone()), value_to_yaml(v)))
        .collect();

    let yaml_str =
        serde_yaml::to_string(&serde_yaml::Value::Mapping(yaml_map)).unwrap_or_default();

    format!("---\n{}---\n\n{}", yaml_str, body)
}
