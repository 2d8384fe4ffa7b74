//! ThinkPy parser CLI

use clap::{ArgAction, Parser, Subcommand};
use std::fmt::Write;
use std::fs;
use std::path::PathBuf;
use std::process;
use thinkpy_error::{DiagnosticRenderer, ParseError, DEFAULT_CONTEXT_LINES};
use thinkpy_parser::{ParserConfig, ThinkPyParser};
use thiserror::Error;
use tracing::Level;

#[derive(Parser)]
#[command(name = "thinkpy")]
#[command(version)]
#[command(about = "ThinkPy language parser", long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Source lines shown above and below an error
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONTEXT_LINES, global = true)]
    context_lines: usize,

    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shows file tokens
    Lex {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Shows file AST as JSON
    Parse {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Checks for errors
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

/// Why a command could not produce its output
#[derive(Debug, Error)]
enum CliError {
    #[error("Error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Error serializing AST: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let renderer = if cli.no_color {
        DiagnosticRenderer::new().without_colors()
    } else {
        DiagnosticRenderer::new()
    };
    let mut parser =
        ThinkPyParser::with_config(ParserConfig::default().with_context_lines(cli.context_lines));

    match run(cli.command, &mut parser) {
        Ok(output) => print!("{}", output),
        Err(CliError::Parse(error)) => {
            let phase = if error.is_lex() {
                "Lexer error"
            } else {
                "Syntax error"
            };
            eprintln!("{}:\n", phase);
            eprintln!("{}", renderer.render(error.diagnostic()));
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Runs one subcommand and returns what it prints to stdout
fn run(command: Commands, parser: &mut ThinkPyParser) -> Result<String, CliError> {
    let mut out = String::new();

    match command {
        Commands::Lex { input } => {
            let source = read_source(input)?;
            let tokens = parser.tokenize(&source)?;

            for token in &tokens {
                let _ = writeln!(
                    out,
                    "  {:4}:{:<3}  {:<14}  {}",
                    token.span.start.line,
                    token.span.start.column,
                    token.kind.name(),
                    token.kind
                );
            }

            let _ = writeln!(out, "\nTotal: {} tokens", tokens.len());
        }

        Commands::Parse { input, compact } => {
            let source = read_source(input)?;
            let program = parser.parse(&source)?;

            let json = if compact {
                serde_json::to_string(&program)?
            } else {
                serde_json::to_string_pretty(&program)?
            };
            let _ = writeln!(out, "{}", json);
        }

        Commands::Check { input } => {
            let source = read_source(input.clone())?;
            let program = parser.parse(&source)?;

            let items: usize = program.tasks.iter().map(|t| t.body.len()).sum();
            let _ = writeln!(
                out,
                "{}: {} tasks, {} steps/subtasks, {} runs",
                input.display(),
                program.tasks.len(),
                items,
                program.runs.len()
            );
            let _ = writeln!(out, "\nNo errors found!");
        }
    }

    Ok(out)
}

/// Logs go to stderr so `parse` output stays valid JSON
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_source(path: PathBuf) -> Result<String, CliError> {
    fs::read_to_string(&path).map_err(|source| CliError::Read { path, source })
}
