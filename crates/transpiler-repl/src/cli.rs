//! Command-line arguments and non-interactive execution.
//!
//! parse args -> load schema -> run one phase on one query -> print -> exit.

use std::path::PathBuf;

use clap::Parser;
use transpiler::Transpiler;

use crate::phase::{OutputFormat, Phase, run_phase};

/// Compile SQL SELECT statements into MongoDB find commands.
///
/// Without -e or -f an interactive terminal UI is started.
#[derive(Parser, Debug)]
#[command(name = "sqlmongo", version, about)]
pub struct CliArgs {
    /// JSON schema file mapping tables to column types.
    #[arg(short = 's', long = "schema", value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// SQL query to run (non-interactive mode).
    #[arg(short = 'e', long = "execute", value_name = "SQL")]
    pub execute: Option<String>,

    /// File holding the SQL query (alternative to -e).
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "execute")]
    pub file: Option<PathBuf>,

    /// Pipeline phase to run in non-interactive mode.
    #[arg(long = "phase", value_enum, default_value_t = Phase::Mongo)]
    pub phase: Phase,

    /// Output format for the tokens and mongo phases.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Shell)]
    pub format: OutputFormat,
}

/// Exit status for a query that fails in any pipeline stage
pub const EXIT_QUERY_ERROR: i32 = 1;
/// Exit status for a schema file that cannot be loaded
pub const EXIT_SCHEMA_ERROR: i32 = 2;

impl CliArgs {
    /// Check if running in non-interactive (script) mode.
    pub fn is_non_interactive(&self) -> bool {
        self.execute.is_some() || self.file.is_some()
    }

    /// Resolve the SQL query from -e or -f.
    pub fn resolve_query(&self) -> Result<String, String> {
        if let Some(ref sql) = self.execute {
            return Ok(sql.clone());
        }

        if let Some(ref path) = self.file {
            return std::fs::read_to_string(path)
                .map(|s| s.trim().to_string())
                .map_err(|e| format!("failed to read SQL file '{}': {}", path.display(), e));
        }

        Err("no query provided. Use -e \"SQL\" or -f file.sql".to_string())
    }

    /// Load the schema named by --schema, if any.
    pub fn load_transpiler(&self) -> Result<Option<Transpiler>, transpiler::SchemaError> {
        self.schema
            .as_ref()
            .map(Transpiler::from_schema_file)
            .transpose()
    }
}

/// Run one query and return the process exit code.
pub fn run_non_interactive(args: &CliArgs) -> i32 {
    let transpiler = match args.load_transpiler() {
        Ok(transpiler) => transpiler,
        Err(e) => {
            eprintln!("Schema Error: {}", e);
            return EXIT_SCHEMA_ERROR;
        }
    };

    let sql = match args.resolve_query() {
        Ok(sql) => sql,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_QUERY_ERROR;
        }
    };

    tracing::debug!(phase = %args.phase, format = %args.format, "running query");

    match run_phase(args.phase, &sql, transpiler.as_ref(), args.format) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            EXIT_QUERY_ERROR
        }
    }
}
