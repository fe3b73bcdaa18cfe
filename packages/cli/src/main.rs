mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, inspect, normalize, ApplyArgs, InspectArgs, NormalizeArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Vitrine CLI - inspect, migrate and script storefront page snapshots
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log store mutations (overrides the configured log level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the section tree of one or more pages
    Inspect(InspectArgs),

    /// Report or rewrite legacy section type tags
    Normalize(NormalizeArgs),

    /// Replay a script of editor commands against a page
    Apply(ApplyArgs),
}

fn init_tracing(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();
    let config = Config::load(&cwd)?;
    init_tracing(&config, cli.verbose);

    match cli.command {
        Command::Inspect(args) => inspect(args, &config, &cwd),
        Command::Normalize(args) => normalize(args, &config, &cwd),
        Command::Apply(args) => apply(args, &config, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
