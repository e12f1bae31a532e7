use anyhow::Result;
use indexmap::IndexMap;
use std::path::Path;
use crate::cli::OutputFormat;
use vendor_license_auditor::license::LicenseFileClassifier;
use vendor_license_auditor::list_licenses;
use vendor_license_auditor::output::format_license_table;

pub fn handle_list(root: &Path, format: Option<OutputFormat>) -> Result<()> {
    let licenses = list_licenses(root, &LicenseFileClassifier::new(), &IndexMap::new())?;

    for pkg in &licenses {
        if pkg.is_recognized() {
            tracing::info!(package = %pkg.package, license = %pkg.license, "found license");
        } else {
            tracing::warn!(package = %pkg.package, "did not find recognized license");
        }
    }

    let output = match format.unwrap_or(OutputFormat::Table) {
        OutputFormat::Json => serde_json::to_string_pretty(&licenses)?,
        OutputFormat::Table => format_license_table(&licenses),
    };
    println!("{}", output.trim_end());

    Ok(())
}
