pub mod analyzer;
pub mod schema;

pub use analyzer::{SemanticError, validate};
pub use schema::{Schema, TableSchema};
pub use sql_parser::DataType;
