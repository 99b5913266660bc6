//! Pipeline errors, one variant per stage

use std::fmt;

use mongo_codegen::GenerateError;
use sql_lexer::LexError;
use sql_parser::ParseError;
use sql_semantic::SemanticError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TranspileError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranspileError {
    #[error("Lexical Error: {0}")]
    Lexical(#[from] LexError),

    #[error("Syntax Error: {0}")]
    Syntax(ParseError),

    #[error("Semantic Error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("Generation Error: {0}")]
    Generation(#[from] GenerateError),
}

/// Pipeline stage that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
    Generation,
}

impl TranspileError {
    pub fn stage(&self) -> Stage {
        match self {
            TranspileError::Lexical(_) => Stage::Lexical,
            TranspileError::Syntax(_) => Stage::Syntax,
            TranspileError::Semantic(_) => Stage::Semantic,
            TranspileError::Generation(_) => Stage::Generation,
        }
    }
}

impl From<ParseError> for TranspileError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Lex(e) => TranspileError::Lexical(e),
            other => TranspileError::Syntax(other),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lexical => write!(f, "lexical"),
            Stage::Syntax => write!(f, "syntax"),
            Stage::Semantic => write!(f, "semantic"),
            Stage::Generation => write!(f, "generation"),
        }
    }
}
