//! SQL Lexer implementation using Chumsky 0.9

use std::ops::Range;
use std::str::FromStr;

use chumsky::error::SimpleReason;
use chumsky::prelude::*;

use crate::span::LineIndex;
use crate::{Keyword, LexError, LexResult, Token};

/// Tokenize a SQL string
pub fn lexer(input: &str) -> LexResult {
    let index = LineIndex::new(input);

    match lexer_parser().parse(input) {
        Ok(tokens) => Ok(tokens
            .into_iter()
            .map(|(tok, range)| (tok, index.span(range)))
            .collect()),
        Err(errors) => {
            // Only the earliest failure in the input is reported
            let end = input.chars().count();
            Err(match errors.into_iter().min_by_key(|e| e.span().start) {
                Some(error) => LexError {
                    message: error_message(&error),
                    span: index.span(error.span()),
                },
                None => LexError {
                    message: "Unexpected end of input".to_string(),
                    span: index.span(end..end),
                },
            })
        }
    }
}

fn error_message(error: &Simple<char>) -> String {
    match error.reason() {
        SimpleReason::Custom(message) => message.clone(),
        _ => match error.found() {
            Some(c) => format!("Illegal character '{}'", c),
            None => "Unexpected end of input".to_string(),
        },
    }
}

/// Build the lexer parser
fn lexer_parser() -> impl Parser<char, Vec<(Token, Range<usize>)>, Error = Simple<char>> {
    // Integer literal: maximal digit run
    let integer = filter(char::is_ascii_digit)
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|digits, span| {
            digits.parse().map(Token::Integer).map_err(|_| {
                Simple::custom(span, format!("Integer literal {} is out of range", digits))
            })
        });

    // String literal (single-quoted, no escapes). A missing closing quote
    // is reported at the opening one.
    let string = just('\'')
        .ignore_then(filter(|c: &char| *c != '\'').repeated().collect::<String>())
        .then(just('\'').or_not())
        .validate(|(body, close), span, emit| {
            if close.is_none() {
                emit(Simple::custom(span, "Unterminated string literal"));
            }
            Token::String(body)
        });

    // Identifier or keyword
    let word = filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .chain::<char, _, _>(filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_').repeated())
        .collect::<String>()
        .map(|word| match Keyword::from_str(&word) {
            Ok(kw) => Token::Keyword(kw),
            Err(_) => Token::Identifier(word),
        });

    // Multi-character operators (must be tried before single-char ones)
    let not_eq = just('!')
        .ignore_then(just('=').or_not())
        .validate(|eq, span, emit| {
            if eq.is_none() {
                emit(Simple::custom(span, "Illegal character '!'"));
            }
            Token::NotEq
        });
    let lt_eq = just('<').then(just('=')).to(Token::LtEq);
    let gt_eq = just('>').then(just('=')).to(Token::GtEq);

    // Single-character tokens
    let single_char = choice((
        just(',').to(Token::Comma),
        just(';').to(Token::Semicolon),
        just('*').to(Token::Star),
        just('=').to(Token::Eq),
        just('<').to(Token::Lt),
        just('>').to(Token::Gt),
    ));

    let token = choice((not_eq, lt_eq, gt_eq, integer, string, word, single_char))
        .map_with_span(|tok, span: Range<usize>| (tok, span));

    let whitespace = one_of(" \t\r\n").repeated().ignored();

    whitespace
        .clone()
        .ignore_then(token.then_ignore(whitespace).repeated())
        .then_ignore(end())
}
