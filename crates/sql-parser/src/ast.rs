//! SQL Abstract Syntax Tree types

use std::fmt;
use std::str::FromStr;

/// Any AST node a caller may hand to a later stage
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Select(SelectQuery),
    Condition(Condition),
}

impl From<SelectQuery> for Node {
    fn from(query: SelectQuery) -> Self {
        Node::Select(query)
    }
}

impl From<Condition> for Node {
    fn from(condition: Condition) -> Self {
        Node::Condition(condition)
    }
}

/// A SELECT statement: `SELECT <columns> FROM <table> [WHERE <condition>];`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub columns: SelectList,
    pub table: String,
    pub where_clause: Option<Condition>,
}

/// The projection of a SELECT statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectList {
    /// All columns (*)
    All,
    /// Explicit, non-empty column list in source order
    Columns(Vec<String>),
}

impl SelectList {
    /// Named columns, empty for `*`
    pub fn names(&self) -> &[String] {
        match self {
            SelectList::All => &[],
            SelectList::Columns(names) => names,
        }
    }
}

/// A WHERE condition
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Comparison(Comparison),
    Logical(LogicalCondition),
}

/// `identifier operator literal`
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub identifier: String,
    pub op: CompareOp,
    pub value: Literal,
}

/// Two conditions joined by AND / OR
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalCondition {
    pub left: Box<Condition>,
    pub op: LogicalOp,
    pub right: Box<Condition>,
}

impl LogicalCondition {
    pub fn new(left: Condition, op: LogicalOp, right: Condition) -> Self {
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::GtEq => ">=",
            CompareOp::LtEq => "<=",
        }
    }
}

/// Logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// A literal on the right-hand side of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Int(i64),
    Str(String),
}

impl Literal {
    /// Type a literal carries by its syntax alone
    pub fn data_type(&self) -> DataType {
        match self {
            Literal::Int(_) => DataType::Int,
            Literal::Str(_) => DataType::String,
        }
    }
}

/// Column / literal types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    String,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::String => "string",
        }
    }
}

/// Error when a type name is neither `int` nor `string`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDataTypeError(pub String);

impl fmt::Display for ParseDataTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type '{}'", self.0)
    }
}

impl std::error::Error for ParseDataTypeError {}

impl FromStr for DataType {
    type Err = ParseDataTypeError;

    /// Type names are matched exactly, as they appear in schema files
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(DataType::Int),
            "string" => Ok(DataType::String),
            other => Err(ParseDataTypeError(other.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.identifier, self.op, self.value)
    }
}

impl fmt::Display for LogicalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Comparison(c) => c.fmt(f),
            Condition::Logical(l) => l.fmt(f),
        }
    }
}

impl fmt::Display for SelectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectList::All => f.write_str("*"),
            SelectList::Columns(names) => f.write_str(&names.join(", ")),
        }
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} FROM {}", self.columns, self.table)?;
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {}", condition)?;
        }
        f.write_str(";")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Select(query) => query.fmt(f),
            Node::Condition(condition) => condition.fmt(f),
        }
    }
}
