//! Token types for the SELECT dialect

use std::fmt;

/// Reserved words of the dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Where,
    And,
    Or,
}

/// Reserved words in their canonical spelling
const KEYWORDS: &[(&str, Keyword)] = &[
    ("SELECT", Keyword::Select),
    ("FROM", Keyword::From),
    ("WHERE", Keyword::Where),
    ("AND", Keyword::And),
    ("OR", Keyword::Or),
];

impl Keyword {
    /// Canonical upper-case spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::And => "AND",
            Keyword::Or => "OR",
        }
    }
}

/// Error when parsing a keyword fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeywordError;

impl fmt::Display for ParseKeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown keyword")
    }
}

impl std::error::Error for ParseKeywordError {}

impl std::str::FromStr for Keyword {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| spelling.eq_ignore_ascii_case(s))
            .map(|(_, kw)| *kw)
            .ok_or(ParseKeywordError)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token in the SELECT dialect
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    // Keywords
    Keyword(Keyword),

    // Identifiers and literals
    Identifier(String),
    Integer(i64),
    /// Interior of a single-quoted literal, quotes stripped
    String(String),

    // Punctuation
    Comma,     // ,
    Semicolon, // ;
    Star,      // *

    // Comparison
    Eq,    // =
    NotEq, // !=
    Gt,    // >
    Lt,    // <
    GtEq,  // >=
    LtEq,  // <=
}

impl Token {
    /// Short upper-case name of the token class, e.g. `IDENTIFIER` or `GE`
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Keyword(kw) => kw.as_str(),
            Token::Identifier(_) => "IDENTIFIER",
            Token::Integer(_) => "NUMBER",
            Token::String(_) => "STRING",
            Token::Comma => "COMMA",
            Token::Semicolon => "SEMICOLON",
            Token::Star => "STAR",
            Token::Eq => "EQ",
            Token::NotEq => "NE",
            Token::Gt => "GT",
            Token::Lt => "LT",
            Token::GtEq => "GE",
            Token::LtEq => "LE",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(kw) => write!(f, "{}", kw),
            Token::Identifier(name) => f.write_str(name),
            Token::Integer(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "'{}'", s),
            Token::Comma => f.write_str(","),
            Token::Semicolon => f.write_str(";"),
            Token::Star => f.write_str("*"),
            Token::Eq => f.write_str("="),
            Token::NotEq => f.write_str("!="),
            Token::Gt => f.write_str(">"),
            Token::Lt => f.write_str("<"),
            Token::GtEq => f.write_str(">="),
            Token::LtEq => f.write_str("<="),
        }
    }
}
