use anyhow::{bail, Result};
use std::path::Path;
use vendor_license_auditor::config::load_policy;

pub fn handle_config(file: &Path, show: bool, validate: bool, quiet: bool) -> Result<()> {
    if !show && !validate {
        bail!("Use --show or --validate");
    }

    let policy = load_policy(file)?;

    if show && !quiet {
        println!("{}", serde_json::to_string_pretty(&policy)?);
    }

    if validate && !quiet {
        println!("✅ Configuration is valid");
    }

    Ok(())
}
