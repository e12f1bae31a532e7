//! The full pipeline: walk imports, resolve licenses, evaluate the policy.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{violation_outcome, Result};
use crate::imports::discover_imports;
use crate::license::{resolve_licenses, Classifier, PackageLicense, UNKNOWN_LICENSE};
use crate::policy::{LicensePolicy, PackageVerdict, PolicyEvaluation, Verdict, Violation};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AuditSummary {
    pub total_packages: usize,
    pub approved: usize,
    pub exceptioned: usize,
    pub violating: usize,
    pub unknown_license: usize,
    /// License → package count, most common first
    pub license_types: IndexMap<String, usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub root: PathBuf,
    pub packages: Vec<PackageVerdict>,
    pub summary: AuditSummary,
    pub violations: Vec<Violation>,
    pub passed: bool,
}

impl AuditReport {
    /// `Ok` when the run passed, otherwise the violation error.
    pub fn outcome(&self) -> Result<()> {
        violation_outcome(&self.violations)
    }
}

/// Discover and resolve licenses of every vendored dependency under `root`.
pub fn list_licenses<C>(
    root: &Path,
    classifier: &C,
    overrides: &IndexMap<String, String>,
) -> Result<Vec<PackageLicense>>
where
    C: Classifier + ?Sized,
{
    let packages = discover_imports(root)?;
    tracing::debug!(count = packages.len(), "discovered imported packages");
    Ok(resolve_licenses(root, &packages, classifier, overrides))
}

/// Run the whole pipeline against `policy`.
///
/// Policy violations are not an `Err` here; they are part of the report.
/// Use [`AuditReport::outcome`] to turn them into one.
pub fn audit<C>(root: &Path, policy: &LicensePolicy, classifier: &C) -> Result<AuditReport>
where
    C: Classifier + ?Sized,
{
    let licenses = list_licenses(root, classifier, &policy.overrides)?;
    let evaluation = policy.evaluate(&licenses);
    Ok(create_report(root, evaluation))
}

pub fn create_report(root: &Path, evaluation: PolicyEvaluation) -> AuditReport {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for verdict in &evaluation.verdicts {
        *counts.entry(verdict.license.as_str()).or_insert(0) += 1;
    }

    // Sort by count (descending), then name, then collect into an IndexMap
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(license, count)| (license.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let summary = AuditSummary {
        total_packages: evaluation.verdicts.len(),
        approved: evaluation.count(Verdict::Approved),
        exceptioned: evaluation.count(Verdict::Exceptioned),
        violating: evaluation.count(Verdict::Violating),
        unknown_license: evaluation
            .verdicts
            .iter()
            .filter(|v| v.license == UNKNOWN_LICENSE)
            .count(),
        license_types: counts.into_iter().collect(),
    };

    let passed = evaluation.passed();
    AuditReport {
        generated_at: Utc::now(),
        root: root.to_path_buf(),
        packages: evaluation.verdicts,
        summary,
        violations: evaluation.violations,
        passed,
    }
}
