use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List { format } => {
            let root = resolve_root(cli.root)?;
            commands::handle_list(&root, format)
        }
        Commands::Check {
            file,
            format,
            output,
            all,
            exit_zero,
        } => {
            let root = resolve_root(cli.root)?;
            commands::handle_check(&root, &file, format, output, all, exit_zero)
        }
        Commands::Graph { output } => {
            let root = resolve_root(cli.root)?;
            commands::handle_graph(&root, output)
        }
        Commands::Init {
            policy,
            file,
            force,
        } => commands::handle_init(policy, &file, force, cli.quiet),
        Commands::Fix { file, dry_run } => {
            let root = resolve_root(cli.root)?;
            commands::handle_fix(&root, &file, dry_run, cli.quiet)
        }
        Commands::Config {
            file,
            show,
            validate,
        } => commands::handle_config(&file, show, validate, cli.quiet),
    }
}

/// The project root with symlinks resolved, so vendor lookups happen against
/// the real tree.
fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    root.canonicalize()
        .with_context(|| format!("Failed to resolve project root {}", root.display()))
}
