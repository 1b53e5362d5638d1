//! Karabiner Emacs - Emacs-style keybindings for macOS through Karabiner-Elements
//!
//! This binary builds the Emacs ruleset and renders it into a Karabiner
//! configuration template.

use clap::{Parser, Subcommand};
use karabiner_emacs::cli::{ExitCode, GenerateArgs, ListArgs};
use karabiner_emacs::constants::APP_BINARY_NAME;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Karabiner Emacs - Emacs-style keybindings for macOS
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the Karabiner configuration from a template
    Generate(GenerateArgs),
    /// List every generated rule in emission order
    List(ListArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };

    // Logs go to stderr, stdout carries the generated file
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::List(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
