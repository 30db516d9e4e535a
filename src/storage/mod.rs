//! Storage layer: documents, collections, and frontmatter persistence

pub mod collection;
pub mod document;
pub mod frontmatter;
