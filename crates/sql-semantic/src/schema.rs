//! Table and column declarations used for validation
//!
//! A schema maps table names to their columns and each column to a
//! [`DataType`]. It is built once by the caller and only read afterwards.

use std::collections::BTreeMap;

use sql_parser::DataType;

/// Tables known to the analyzer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    tables: BTreeMap<String, TableSchema>,
}

/// Columns of a single table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    columns: BTreeMap<String, DataType>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, replacing any previous table of the same name
    pub fn with_table<N, C, K>(mut self, name: N, columns: C) -> Self
    where
        N: Into<String>,
        C: IntoIterator<Item = (K, DataType)>,
        K: Into<String>,
    {
        self.insert_table(name, columns.into_iter().collect());
        self
    }

    pub fn insert_table(&mut self, name: impl Into<String>, table: TableSchema) {
        self.tables.insert(name.into(), table);
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Tables in name order
    pub fn tables(&self) -> impl Iterator<Item = (&str, &TableSchema)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.insert_column(name, data_type);
        self
    }

    pub fn insert_column(&mut self, name: impl Into<String>, data_type: DataType) {
        self.columns.insert(name.into(), data_type);
    }

    pub fn column_type(&self, name: &str) -> Option<DataType> {
        self.columns.get(name).copied()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Columns in name order
    pub fn columns(&self) -> impl Iterator<Item = (&str, DataType)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, DataType)> for TableSchema {
    fn from_iter<T: IntoIterator<Item = (K, DataType)>>(iter: T) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, ty)| (name.into(), ty))
                .collect(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, TableSchema)> for Schema {
    fn from_iter<T: IntoIterator<Item = (K, TableSchema)>>(iter: T) -> Self {
        Self {
            tables: iter
                .into_iter()
                .map(|(name, table)| (name.into(), table))
                .collect(),
        }
    }
}
