//! SQL Parser implementation using Chumsky 0.9

use std::fmt;

use chumsky::prelude::*;
use sql_lexer::{Keyword, LexError, Span, Token};

use crate::ast::*;

/// Parse result type
pub type ParseResult = Result<SelectQuery, ParseError>;

/// A parse error with location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input could not be tokenized
    Lex(LexError),
    /// A token that does not fit the grammar at this point
    UnexpectedToken { found: Token, span: Span },
    /// Input ended while more tokens were expected
    UnexpectedEof,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(e) => e.fmt(f),
            ParseError::UnexpectedToken {
                found: Token::String(s),
                span,
            } => write!(f, "Syntax error at string '{}', line {}", s, span.line),
            ParseError::UnexpectedToken { found, span } => {
                write!(f, "Syntax error at '{}', line {}", found, span.line)
            }
            ParseError::UnexpectedEof => write!(f, "Syntax error at EOF"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// Parse a SQL string into a SelectQuery
pub fn parse(input: &str) -> ParseResult {
    // First, lex the input
    let tokens = sql_lexer::lexer(input)?;

    // Then parse the tokens
    parse_tokens(&tokens)
}

/// Parse a token stream into a SelectQuery
pub fn parse_tokens(tokens: &[(Token, Span)]) -> ParseResult {
    let len = tokens.len();

    // Stream positions are token indices, so an error position maps
    // straight back to the offending token
    let token_stream = tokens
        .iter()
        .enumerate()
        .map(|(i, (t, _))| (t.clone(), i..i + 1));

    let stream = chumsky::Stream::from_iter(len..len + 1, token_stream);

    query_parser().parse(stream).map_err(|errs| {
        match errs.into_iter().next() {
            Some(e) => match tokens.get(e.span().start) {
                Some((found, span)) => ParseError::UnexpectedToken {
                    found: found.clone(),
                    span: *span,
                },
                None => ParseError::UnexpectedEof,
            },
            None => ParseError::UnexpectedEof,
        }
    })
}

/// Parse a SELECT statement
fn query_parser() -> impl Parser<Token, SelectQuery, Error = Simple<Token>> {
    let select_kw = just(Token::Keyword(Keyword::Select));
    let from_kw = just(Token::Keyword(Keyword::From));
    let where_kw = just(Token::Keyword(Keyword::Where));

    let columns = just(Token::Star).to(SelectList::All).or(identifier()
        .separated_by(just(Token::Comma))
        .at_least(1)
        .map(SelectList::Columns));

    let where_clause = where_kw.ignore_then(condition_parser()).or_not();

    select_kw
        .ignore_then(columns)
        .then_ignore(from_kw)
        .then(identifier())
        .then(where_clause)
        .then_ignore(just(Token::Semicolon))
        .then_ignore(end())
        .map(|((columns, table), where_clause)| SelectQuery {
            columns,
            table,
            where_clause,
        })
}

/// Parse a WHERE condition with proper precedence
fn condition_parser() -> impl Parser<Token, Condition, Error = Simple<Token>> + Clone {
    let literal = select! {
        Token::Integer(n) => Literal::Int(n),
        Token::String(s) => Literal::Str(s),
    };

    let operator = select! {
        Token::Eq => CompareOp::Eq,
        Token::NotEq => CompareOp::NotEq,
        Token::Gt => CompareOp::Gt,
        Token::Lt => CompareOp::Lt,
        Token::GtEq => CompareOp::GtEq,
        Token::LtEq => CompareOp::LtEq,
    };

    let comparison = identifier()
        .then(operator)
        .then(literal)
        .map(|((identifier, op), value)| {
            Condition::Comparison(Comparison {
                identifier,
                op,
                value,
            })
        });

    // AND binds tighter than OR; both fold to the left
    let and_expr = comparison
        .clone()
        .then(
            just(Token::Keyword(Keyword::And))
                .to(LogicalOp::And)
                .then(comparison)
                .repeated(),
        )
        .foldl(|left, (op, right)| Condition::Logical(LogicalCondition::new(left, op, right)));

    and_expr
        .clone()
        .then(
            just(Token::Keyword(Keyword::Or))
                .to(LogicalOp::Or)
                .then(and_expr)
                .repeated(),
        )
        .foldl(|left, (op, right)| Condition::Logical(LogicalCondition::new(left, op, right)))
}

/// Parse an identifier
fn identifier() -> impl Parser<Token, String, Error = Simple<Token>> + Clone {
    select! {
        Token::Identifier(name) => name,
    }
}
