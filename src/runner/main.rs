use clap::{Parser, Subcommand};
use colored::Colorize;
use once_cell::sync::Lazy;

mod commands;
mod config;
mod platform_info;

/// Time three ways of summing 0..N over a sweep of problem sizes
#[derive(Parser)]
pub struct Cli {
    /// Defaults to `run` with the default profile
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    Run(commands::run::RunArgs),
    Report(commands::report::ReportArgs),
}

static CMD_ARGS: Lazy<Cli> = Lazy::new(|| {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    Cli::parse()
});

fn main() -> anyhow::Result<()> {
    let args = &*CMD_ARGS;
    env_logger::init();
    let result = match &args.command {
        Some(Commands::Run(cmd)) => cmd.run(),
        Some(Commands::Report(cmd)) => cmd.run(),
        None => commands::run::RunArgs::parse_from(["sumbench"]).run(),
    };
    if let Err(err) = result {
        eprintln!("❌ {}: {}", "ERROR".red().bold(), err.to_string().red());
        std::process::exit(1);
    }
    Ok(())
}
