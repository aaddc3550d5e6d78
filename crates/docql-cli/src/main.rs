//! docql CLI
//!
//! Command-line tool for parsing and comparing document queries.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use docql_cli::{commands, DialectChoice, OutputFormat};

/// Parse, check and compare document queries.
#[derive(Parser)]
#[command(name = "docql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Lexical dialect.
    #[arg(short, long, env = "DOCQL_DIALECT", value_enum, default_value_t)]
    dialect: DialectChoice,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and print its tree.
    Parse {
        /// The query text.
        query: String,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Print the tokens of a query with their spans.
    Tokens {
        /// The query text.
        query: String,
    },

    /// Parse one query per line and report failures.
    Check {
        /// Input file (standard input if absent or `-`).
        file: Option<PathBuf>,
    },

    /// Report whether two queries parse to structurally equal trees.
    Compare {
        /// The first query.
        left: String,

        /// The second query.
        right: String,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect = cli.dialect.dialect();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Parse { query, format } => {
            commands::parse(&query, dialect, format, &mut stdout)?;
        }

        Commands::Tokens { query } => {
            commands::tokens(&query, dialect, &mut stdout)?;
        }

        Commands::Check { file } => {
            info!(dialect = dialect.name(), "Checking queries...");
            let input = commands::open_input(file.as_deref())?;
            let summary = commands::check(input, dialect, &mut stdout)?;
            if !summary.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Compare { left, right } => {
            if !commands::compare(&left, &right, dialect, &mut stdout)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
