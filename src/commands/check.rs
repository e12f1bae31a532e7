use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use crate::cli::OutputFormat;
use vendor_license_auditor::audit;
use vendor_license_auditor::config::load_policy;
use vendor_license_auditor::license::LicenseFileClassifier;
use vendor_license_auditor::output::format_table_output;

pub fn handle_check(
    root: &Path,
    file: &Path,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    all: bool,
    exit_zero: bool,
) -> Result<()> {
    // The policy must be valid before any walking starts
    let policy = load_policy(file)?;

    let report = audit(root, &policy, &LicenseFileClassifier::new())?;

    let output_content = match format.unwrap_or(OutputFormat::Table) {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Table => format_table_output(&report, all),
    };

    match output {
        Some(path) => fs::write(&path, output_content)
            .with_context(|| format!("Failed to write report to {}", path.display()))?,
        None => println!("{}", output_content.trim_end()),
    }

    if !exit_zero {
        report.outcome()?;
    }
    Ok(())
}
