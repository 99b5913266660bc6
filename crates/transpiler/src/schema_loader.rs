//! Schema files
//!
//! A schema file is a JSON object mapping table names to objects that map
//! column names to `"int"` or `"string"`:
//!
//! ```json
//! { "users": { "id": "int", "name": "string" } }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sql_semantic::{DataType, Schema, TableSchema};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("File not found.")]
    NotFound(PathBuf),

    #[error("Error reading file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON format.")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid schema structure. Top level must be a dictionary.")]
    NotAnObject,

    #[error("Invalid schema structure. Table '{0}' must map to a dictionary of columns.")]
    TableNotAnObject(String),

    #[error("Invalid column type '{ty}' for column '{column}' in table '{table}'. Supported types: 'int', 'string'.")]
    InvalidColumnType {
        table: String,
        column: String,
        ty: String,
    },
}

/// Load a schema from a JSON file
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SchemaError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let schema = read_schema(file)?;
    tracing::debug!(path = %path.display(), tables = schema.len(), "schema loaded");
    Ok(schema)
}

/// Read a schema from any JSON source
pub fn read_schema<R: Read>(mut reader: R) -> Result<Schema, SchemaError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_schema(&content)
}

/// Parse and check a schema from JSON text
pub fn parse_schema(json: &str) -> Result<Schema, SchemaError> {
    let value: Value = serde_json::from_str(json).map_err(SchemaError::InvalidJson)?;
    let tables = value.as_object().ok_or(SchemaError::NotAnObject)?;

    let mut schema = Schema::new();
    for (table, columns) in tables {
        let columns = columns
            .as_object()
            .ok_or_else(|| SchemaError::TableNotAnObject(table.clone()))?;

        let mut table_schema = TableSchema::new();
        for (column, ty) in columns {
            let data_type = json_to_type(ty).ok_or_else(|| SchemaError::InvalidColumnType {
                table: table.clone(),
                column: column.clone(),
                ty: type_token(ty),
            })?;
            table_schema.insert_column(column.clone(), data_type);
        }
        schema.insert_table(table.clone(), table_schema);
    }

    Ok(schema)
}

fn json_to_type(value: &Value) -> Option<DataType> {
    value.as_str().and_then(|s| s.parse().ok())
}

/// Type token as written in the file, without JSON quoting for strings
fn type_token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
