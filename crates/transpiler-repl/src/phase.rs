//! Pipeline phases offered by the front end and their text rendering

use std::fmt;

use clap::ValueEnum;
use serde_json::json;
use thiserror::Error;
use transpiler::{Span, Token, TranspileError, Transpiler};

/// How far down the pipeline a query is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Phase {
    /// Lexical analysis: list tokens
    Tokens,
    /// Syntax analysis: show the AST
    Ast,
    /// Full pipeline: emit the MongoDB command
    Mongo,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Tokens => "Tokens",
            Phase::Ast => "AST",
            Phase::Mongo => "MongoDB",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Phase::Tokens => Phase::Ast,
            Phase::Ast => Phase::Mongo,
            Phase::Mongo => Phase::Tokens,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Tokens => write!(f, "tokens"),
            Phase::Ast => write!(f, "ast"),
            Phase::Mongo => write!(f, "mongo"),
        }
    }
}

/// Output format for the token and MongoDB phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable; mongo shell syntax for commands
    Shell,
    /// Strict JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Shell => write!(f, "shell"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Transpile(#[from] TranspileError),

    #[error("No schema loaded. Start with --schema <FILE> to run the full pipeline.")]
    NoSchema,

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run `sql` through `phase` and render the result
pub fn run_phase(
    phase: Phase,
    sql: &str,
    transpiler: Option<&Transpiler>,
    format: OutputFormat,
) -> Result<String, RunError> {
    match phase {
        Phase::Tokens => {
            let tokens = transpiler::tokenize(sql)?;
            format_tokens(&tokens, format)
        }
        Phase::Ast => {
            let query = transpiler::parse(sql)?;
            Ok(format!("{:#?}", query))
        }
        Phase::Mongo => {
            let transpiler = transpiler.ok_or(RunError::NoSchema)?;
            match format {
                OutputFormat::Shell => Ok(transpiler.transpile(sql)?),
                OutputFormat::Json => {
                    let command = transpiler.compile(sql)?;
                    Ok(serde_json::to_string_pretty(&command)?)
                }
            }
        }
    }
}

fn format_tokens(tokens: &[(Token, Span)], format: OutputFormat) -> Result<String, RunError> {
    match format {
        OutputFormat::Shell => Ok(tokens
            .iter()
            .map(|(token, span)| {
                format!(
                    "Token(type='{}', value='{}', line={}, column={})",
                    token.kind(),
                    token_value(token),
                    span.line,
                    span.column
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let tokens: Vec<_> = tokens
                .iter()
                .map(|(token, span)| {
                    json!({
                        "type": token.kind(),
                        "value": token_value(token),
                        "line": span.line,
                        "column": span.column,
                    })
                })
                .collect();
            Ok(serde_json::to_string_pretty(&tokens)?)
        }
    }
}

/// Token value without the quotes a string literal is written with
fn token_value(token: &Token) -> String {
    match token {
        Token::String(s) => s.clone(),
        other => other.to_string(),
    }
}
