use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use vendor_license_auditor::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(name = "vendor-license-auditor")]
#[command(about = "Check the licenses of vendored Go dependencies against a policy")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root containing the vendor directory (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors; do not log accepted packages
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List licenses of vendored dependencies
    #[command(visible_alias = "ls")]
    List {
        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Check licenses against a policy file
    #[command(visible_alias = "chk")]
    Check {
        /// Policy file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,

        /// Output format
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show every package, not only violations
        #[arg(long)]
        all: bool,

        /// Exit with code 0 even on violations
        #[arg(long)]
        exit_zero: bool,
    },
    /// Print the import graph in Graphviz DOT format
    Graph {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a policy file from a preset
    Init {
        /// Policy preset
        policy: InitPreset,

        /// Policy file to create
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Add every violating package to the policy's exceptions
    Fix {
        /// Policy file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,

        /// Show changes without applying them
        #[arg(long)]
        dry_run: bool,
    },
    /// Show or validate a policy file
    Config {
        /// Policy file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,

        /// Show the parsed policy
        #[arg(long)]
        show: bool,

        /// Validate the policy file
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InitPreset {
    Green,
    Yellow,
    Red,
}
