use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "plugcalc", about = "Run calculator plugins from a Plugins directory")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Plugin directory (defaults to ./Plugins)
    #[arg(long, global = true)]
    plugin_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply every plugin to a pair of operands
    Run(commands::run::RunArgs),
    /// List loaded plugins
    List,
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run(args) => commands::run::run(args, cli.plugin_dir),
        Commands::List => commands::list::run(cli.plugin_dir),
        Commands::Config(args) => commands::config::run(args),
    }
}
