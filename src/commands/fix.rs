use anyhow::Result;
use indexmap::IndexSet;
use std::path::Path;
use vendor_license_auditor::audit;
use vendor_license_auditor::config::{add_exceptions_to_config, load_policy};
use vendor_license_auditor::license::LicenseFileClassifier;

pub fn handle_fix(root: &Path, file: &Path, dry_run: bool, quiet: bool) -> Result<()> {
    let policy = load_policy(file)?;
    let report = audit(root, &policy, &LicenseFileClassifier::new())?;

    if report.passed {
        if !quiet {
            println!("No violations found, nothing to fix");
        }
        return Ok(());
    }

    let packages: Vec<String> = report
        .violations
        .iter()
        .map(|v| v.package.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();

    if dry_run {
        if !quiet {
            println!("Would add {} exceptions to {}:", packages.len(), file.display());
            for violation in &report.violations {
                println!("  - {} ({})", violation.package, violation.license);
            }
        }
        return Ok(());
    }

    let added = add_exceptions_to_config(file, &packages)?;

    if !quiet {
        println!("Added {} exceptions to {}:", added, file.display());
        for violation in &report.violations {
            println!("  ✅ {} - {}", violation.package, violation.message);
        }
    }

    Ok(())
}
