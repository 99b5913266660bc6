//! Semantic checks for parsed SELECT queries
//!
//! A query is valid against a schema if:
//! 1. Its table exists
//! 2. Its select list names no column twice and only existing columns
//! 3. Every comparison in its WHERE clause names an existing column and
//!    compares it with a literal of the column's declared type
//!
//! Checks run in that order and stop at the first failure.

use std::collections::HashSet;
use std::fmt;

use sql_parser::{Comparison, Condition, DataType, SelectList, SelectQuery};

use crate::schema::TableSchema;
use crate::Schema;

/// Error indicating a query does not fit the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    TableNotFound {
        table: String,
    },
    DuplicateColumn {
        column: String,
    },
    ColumnNotFound {
        column: String,
        table: String,
    },
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::TableNotFound { table } => {
                write!(f, "Table '{}' does not exist", table)
            }
            SemanticError::DuplicateColumn { column } => {
                write!(f, "Duplicate column '{}' in SELECT list", column)
            }
            SemanticError::ColumnNotFound { column, table } => {
                write!(f, "Column '{}' does not exist in table '{}'", column, table)
            }
            SemanticError::TypeMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "Type mismatch for column '{}'. Expected {} but got {}.",
                column, expected, actual
            ),
        }
    }
}

impl std::error::Error for SemanticError {}

/// Check a query against a schema
pub fn validate(query: &SelectQuery, schema: &Schema) -> Result<(), SemanticError> {
    let table = schema
        .table(&query.table)
        .ok_or_else(|| SemanticError::TableNotFound {
            table: query.table.clone(),
        })?;

    check_columns(&query.columns, &query.table, table)?;

    if let Some(condition) = &query.where_clause {
        check_condition(condition, &query.table, table)?;
    }

    Ok(())
}

/// Check the select list: duplicates first, then existence
fn check_columns(
    columns: &SelectList,
    table_name: &str,
    table: &TableSchema,
) -> Result<(), SemanticError> {
    let names = match columns {
        SelectList::All => return Ok(()),
        SelectList::Columns(names) => names,
    };

    let mut seen = HashSet::new();
    if let Some(duplicate) = names.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(SemanticError::DuplicateColumn {
            column: duplicate.clone(),
        });
    }

    match names.iter().find(|name| !table.contains_column(name)) {
        Some(missing) => Err(SemanticError::ColumnNotFound {
            column: missing.clone(),
            table: table_name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Walk a condition tree, left before right
fn check_condition(
    condition: &Condition,
    table_name: &str,
    table: &TableSchema,
) -> Result<(), SemanticError> {
    match condition {
        Condition::Comparison(comparison) => check_comparison(comparison, table_name, table),
        Condition::Logical(logical) => {
            check_condition(&logical.left, table_name, table)?;
            check_condition(&logical.right, table_name, table)
        }
    }
}

fn check_comparison(
    comparison: &Comparison,
    table_name: &str,
    table: &TableSchema,
) -> Result<(), SemanticError> {
    let expected =
        table
            .column_type(&comparison.identifier)
            .ok_or_else(|| SemanticError::ColumnNotFound {
                column: comparison.identifier.clone(),
                table: table_name.to_string(),
            })?;

    let actual = comparison.value.data_type();
    if expected != actual {
        return Err(SemanticError::TypeMismatch {
            column: comparison.identifier.clone(),
            expected,
            actual,
        });
    }

    Ok(())
}
