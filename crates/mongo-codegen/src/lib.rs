//! MongoDB code generation
//!
//! This crate lowers a validated [`SelectQuery`](sql_parser::SelectQuery)
//! into a [`FindCommand`] and renders it in mongo shell syntax.

pub mod document;
pub mod generator;

pub use document::Document;
pub use generator::{
    filter_document, generate, generate_node, lower, projection_document, FindCommand,
    GenerateError,
};
