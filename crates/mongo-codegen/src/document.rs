//! Query documents
//!
//! These values are the generator's output. They are intentionally
//! separate from `serde_json::Value`: objects keep insertion order and the
//! `Display` impl renders shell syntax (unquoted keys, padded braces)
//! rather than strict JSON.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use sql_parser::Literal;

/// A filter or projection value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    /// Ordered key/value pairs
    Object(Vec<(String, Document)>),
    Array(Vec<Document>),
    String(String),
    Int(i64),
    Bool(bool),
}

impl Document {
    /// An object with no keys, rendered as `{  }`
    pub fn empty() -> Self {
        Document::Object(Vec::new())
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Document)>,
    {
        Document::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Single-key object
    pub fn entry(key: impl Into<String>, value: Document) -> Self {
        Document::Object(vec![(key.into(), value)])
    }

    /// Value of the first entry named `key`, for objects
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self {
            Document::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<&Literal> for Document {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Int(n) => Document::Int(*n),
            Literal::Str(s) => Document::String(s.clone()),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Object(entries) => {
                f.write_str("{ ")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str(" }")
            }
            Document::Array(items) => {
                f.write_str("[ ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(" ]")
            }
            Document::String(s) => write!(f, "\"{}\"", s),
            Document::Int(n) => write!(f, "{}", n),
            Document::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Document::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Document::String(s) => serializer.serialize_str(s),
            Document::Int(n) => serializer.serialize_i64(*n),
            Document::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}
