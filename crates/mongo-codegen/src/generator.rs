//! Code generator - lowers a SelectQuery to a MongoDB find command

use std::fmt;

use serde::Serialize;
use sql_parser::{CompareOp, Comparison, Condition, LogicalOp, Node, SelectList, SelectQuery};

use crate::document::Document;

/// Generation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Only SELECT queries lower to a command
    UnsupportedNode(&'static str),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::UnsupportedNode(kind) => write!(f, "Unsupported AST node: {}", kind),
        }
    }
}

impl std::error::Error for GenerateError {}

/// `db.<collection>.find(<filter>[, <projection>])`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindCommand {
    pub collection: String,
    pub filter: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Document>,
}

impl fmt::Display for FindCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.projection {
            Some(projection) => write!(
                f,
                "db.{}.find({}, {})",
                self.collection, self.filter, projection
            ),
            None => write!(f, "db.{}.find({})", self.collection, self.filter),
        }
    }
}

/// Render a query as a mongo shell command
pub fn generate(query: &SelectQuery) -> String {
    lower(query).to_string()
}

/// Render any AST node; only SELECT queries are supported
pub fn generate_node(node: &Node) -> Result<String, GenerateError> {
    match node {
        Node::Select(query) => Ok(generate(query)),
        Node::Condition(_) => Err(GenerateError::UnsupportedNode("Condition")),
    }
}

/// Convert a SelectQuery to a FindCommand
pub fn lower(query: &SelectQuery) -> FindCommand {
    FindCommand {
        collection: query.table.clone(),
        filter: filter_document(query.where_clause.as_ref()),
        projection: projection_document(&query.columns),
    }
}

/// Filter for an optional WHERE clause; no clause matches everything
pub fn filter_document(condition: Option<&Condition>) -> Document {
    match condition {
        Some(condition) => condition_document(condition),
        None => Document::empty(),
    }
}

/// Projection for a select list; `*` needs none
pub fn projection_document(columns: &SelectList) -> Option<Document> {
    match columns {
        SelectList::All => None,
        SelectList::Columns(names) => Some(Document::object(
            names.iter().map(|name| (name.clone(), Document::Int(1))),
        )),
    }
}

fn condition_document(condition: &Condition) -> Document {
    match condition {
        Condition::Comparison(comparison) => comparison_document(comparison),
        Condition::Logical(logical) => Document::entry(
            logical_operator(logical.op),
            Document::Array(vec![
                condition_document(&logical.left),
                condition_document(&logical.right),
            ]),
        ),
    }
}

fn comparison_document(comparison: &Comparison) -> Document {
    let value = Document::from(&comparison.value);
    let field = comparison.identifier.clone();

    match comparison_operator(comparison.op) {
        // Equality is a bare field match
        None => Document::entry(field, value),
        Some(op) => Document::entry(field, Document::entry(op, value)),
    }
}

fn comparison_operator(op: CompareOp) -> Option<&'static str> {
    match op {
        CompareOp::Eq => None,
        CompareOp::NotEq => Some("$ne"),
        CompareOp::Gt => Some("$gt"),
        CompareOp::Lt => Some("$lt"),
        CompareOp::GtEq => Some("$gte"),
        CompareOp::LtEq => Some("$lte"),
    }
}

fn logical_operator(op: LogicalOp) -> &'static str {
    match op {
        LogicalOp::And => "$and",
        LogicalOp::Or => "$or",
    }
}
