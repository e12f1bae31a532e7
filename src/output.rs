use crate::audit::AuditReport;
use crate::license::{LicenseSource, PackageLicense};
use crate::policy::{PackageVerdict, Verdict};

const PACKAGE_WIDTH: usize = 44;
const LICENSE_WIDTH: usize = 13;
const STATUS_WIDTH: usize = 14;

pub fn format_table_output(report: &AuditReport, verbose: bool) -> String {
    let mut output = String::new();

    let summary = &report.summary;
    output.push_str(&format!("📦 License Summary ({} packages)\n", summary.total_packages));
    output.push_str(&format!(
        "✅ {} approved  ⚠️ {} exceptioned  🚫 {} violations\n\n",
        summary.approved, summary.exceptioned, summary.violating
    ));

    if verbose {
        output.push_str("📦 All Packages:\n");
        let rows: Vec<&PackageVerdict> = report.packages.iter().collect();
        output.push_str(&format_verdict_table(&rows));
    } else {
        let issues: Vec<&PackageVerdict> = report
            .packages
            .iter()
            .filter(|p| p.verdict == Verdict::Violating)
            .collect();
        if !issues.is_empty() {
            output.push_str("⚠️  Violations Found:\n");
            output.push_str(&format_verdict_table(&issues));
        } else {
            output.push_str("✅ No violations found!\n");
        }

        if report.packages.len() > issues.len() {
            output.push_str(&format!(
                "\n💡 Run with --all to see all {} packages\n",
                report.packages.len()
            ));
        }
    }

    output
}

/// Table of resolved licenses, no policy involved.
pub fn format_license_table(licenses: &[PackageLicense]) -> String {
    if licenses.is_empty() {
        return "No vendored packages found.\n".to_string();
    }

    let mut output = String::new();
    push_border(&mut output, '┌', '┬', '┐');
    push_row(&mut output, "Package", "License", "Source");
    push_border(&mut output, '├', '┼', '┤');
    for pkg in licenses {
        push_row(&mut output, &pkg.package, &pkg.license, source_label(&pkg.source));
    }
    push_border(&mut output, '└', '┴', '┘');
    output
}

fn format_verdict_table(rows: &[&PackageVerdict]) -> String {
    if rows.is_empty() {
        return "No packages found.\n".to_string();
    }

    let mut output = String::new();
    push_border(&mut output, '┌', '┬', '┐');
    push_row(&mut output, "Package", "License", "Status");
    push_border(&mut output, '├', '┼', '┤');
    for row in rows {
        let status = match row.verdict {
            Verdict::Approved => "✅ Approved",
            Verdict::Exceptioned => "⚠️ Exception",
            Verdict::Violating => "🚫 Violation",
        };
        push_row(&mut output, &row.package, &row.license, status);
    }
    push_border(&mut output, '└', '┴', '┘');
    output
}

fn source_label(source: &LicenseSource) -> &'static str {
    match source {
        LicenseSource::Direct => "license file",
        LicenseSource::Inherited { .. } => "parent path",
        LicenseSource::Override { .. } => "override",
        LicenseSource::Unknown => "not found",
    }
}

fn push_border(output: &mut String, left: char, mid: char, right: char) {
    output.push(left);
    output.push_str(&"─".repeat(PACKAGE_WIDTH + 2));
    output.push(mid);
    output.push_str(&"─".repeat(LICENSE_WIDTH + 2));
    output.push(mid);
    output.push_str(&"─".repeat(STATUS_WIDTH + 2));
    output.push(right);
    output.push('\n');
}

fn push_row(output: &mut String, package: &str, license: &str, status: &str) {
    output.push_str(&format!(
        "│ {:<pw$} │ {:<lw$} │ {:<sw$} │\n",
        truncate(package, PACKAGE_WIDTH),
        truncate(license, LICENSE_WIDTH),
        truncate(status, STATUS_WIDTH),
        pw = PACKAGE_WIDTH,
        lw = LICENSE_WIDTH,
        sw = STATUS_WIDTH,
    ));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{kept}…")
    }
}
