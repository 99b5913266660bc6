//! SQL to MongoDB transpiler
//!
//! Compiles a restricted SELECT dialect into MongoDB `find` commands.
//!
//! # Pipeline
//!
//! text → lexer → tokens → parser → AST → semantic analyzer → code generator
//!
//! Each stage fails fast; the first failing stage is reported as its own
//! [`TranspileError`] variant.
//!
//! # Example
//!
//! ```
//! use transpiler::{DataType, Schema, Transpiler};
//!
//! let schema = Schema::new().with_table("users", [("age", DataType::Int)]);
//! let transpiler = Transpiler::new(schema);
//!
//! let query = transpiler.transpile("SELECT * FROM users WHERE age > 25;").unwrap();
//! assert_eq!(query, "db.users.find({ age: { $gt: 25 } })");
//! ```

mod error;
pub mod schema_loader;

use std::path::Path;

use sql_parser::Node;
use tracing::{debug, trace};

pub use error::{Result, Stage, TranspileError};
pub use schema_loader::{SchemaError, load_schema, parse_schema, read_schema};

pub use mongo_codegen::{Document, FindCommand};
pub use sql_lexer::{Keyword, LexError, Span, Token};
pub use sql_parser::{ParseError, SelectQuery};
pub use sql_semantic::{DataType, Schema, SemanticError, TableSchema};

// Re-export the stage crates for advanced usage
pub use mongo_codegen;
pub use sql_lexer;
pub use sql_parser;
pub use sql_semantic;

/// Compiles SQL against a fixed schema
#[derive(Debug, Clone)]
pub struct Transpiler {
    schema: Schema,
}

impl Transpiler {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Create a transpiler from a JSON schema file
    pub fn from_schema_file(path: impl AsRef<Path>) -> std::result::Result<Self, SchemaError> {
        load_schema(path).map(Self::new)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Lex, parse and validate a query
    pub fn analyze(&self, sql: &str) -> Result<SelectQuery> {
        let query = parse(sql)?;
        sql_semantic::validate(&query, &self.schema)?;
        debug!(table = %query.table, "query validated");
        Ok(query)
    }

    /// Compile a query to a structured find command
    pub fn compile(&self, sql: &str) -> Result<FindCommand> {
        let query = self.analyze(sql)?;
        Ok(mongo_codegen::lower(&query))
    }

    /// Compile a query to mongo shell syntax
    pub fn transpile(&self, sql: &str) -> Result<String> {
        let query = self.analyze(sql)?;
        let output = mongo_codegen::generate_node(&Node::Select(query))?;
        trace!(%output, "query generated");
        Ok(output)
    }
}

/// Tokenize a query
pub fn tokenize(sql: &str) -> Result<Vec<(Token, Span)>> {
    let tokens = sql_lexer::lexer(sql)?;
    debug!(tokens = tokens.len(), "input lexed");
    Ok(tokens)
}

/// Tokenize and parse a query without consulting a schema
pub fn parse(sql: &str) -> Result<SelectQuery> {
    let tokens = tokenize(sql)?;
    let query = sql_parser::parse_tokens(&tokens)?;
    debug!(
        table = %query.table,
        columns = query.columns.names().len(),
        has_where = query.where_clause.is_some(),
        "query parsed"
    );
    trace!(%query, "parsed form");
    Ok(query)
}

/// Compile a query to mongo shell syntax against `schema`
pub fn transpile(sql: &str, schema: &Schema) -> Result<String> {
    let query = parse(sql)?;
    sql_semantic::validate(&query, schema)?;
    Ok(mongo_codegen::generate(&query))
}
