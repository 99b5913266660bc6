//! SQL Lexer using Chumsky
//!
//! This crate provides lexical analysis for the SELECT dialect,
//! converting raw SQL text into a stream of tokens.

mod lexer;
mod span;
mod token;

use std::fmt;

pub use lexer::lexer;
pub use span::Span;
pub use token::{Keyword, ParseKeywordError, Token};

/// Result of lexing - either a list of spanned tokens or the first error
pub type LexResult = Result<Vec<(Token, Span)>, LexError>;

/// A lexical error with location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.span.line, self.span.column
        )
    }
}

impl std::error::Error for LexError {}
