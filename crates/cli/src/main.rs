mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// KPL compiler front end.
#[derive(Parser)]
#[command(name = "kpl", version, about = "KPL compiler front end")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a .kpl source file and print its object tree
    Compile {
        /// Path to the .kpl source file
        file: PathBuf,
    },

    /// Parse a .kpl source file, reporting success or the first error
    Check {
        /// Path to the .kpl source file
        file: PathBuf,
    },

    /// Dump the token stream of a .kpl source file
    Tokens {
        /// Path to the .kpl source file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compile { file } => commands::compile::cmd_compile(&file, cli.output, cli.quiet),
        Commands::Check { file } => commands::check::cmd_check(&file, cli.output, cli.quiet),
        Commands::Tokens { file } => commands::tokens::cmd_tokens(&file, cli.output, cli.quiet),
    }
}
