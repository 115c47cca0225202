use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

mod clipboard;
mod generate;
mod interactive;
mod notify;
mod table;

#[derive(Parser)]
#[command(name = "passgen", about = "Generate random passwords")]
struct Cli {
    /// Path to a YAML config file (defaults to ~/.passgen/config.yaml, if it exists).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a single password and print it.
    #[command(alias = "gen")]
    Generate(generate::GenerateArgs),
    /// Pick options from a menu, generating and copying passwords as you go.
    Interactive,
    /// List the character classes passwords are drawn from.
    Classes,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var("PASSGEN_LOG")
        .from_env_lossy();
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), ProgError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = passgen::Config::load(cli.config.as_deref())?;
    tracing::info!(
        min = config.min_length,
        max = config.max_length,
        rounding = ?config.index_rounding,
        "configuration loaded"
    );

    match cli.command {
        Command::Generate(args) => generate::generate(&config, args)?,
        Command::Interactive => interactive::run(&config)?,
        Command::Classes => table::list_classes().context("failed to output table")?,
    }

    Ok(())
}

fn main() {
    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("Error: {err:?}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("{0}")]
    Validation(#[from] passgen::ValidationError),
    #[error("{0}")]
    Copy(#[from] passgen::CopyError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] passgen::ConfigError),
    #[error("Menu closed; exiting.")]
    MenuCancelled,
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}
