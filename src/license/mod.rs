use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub mod classifier;

// Re-export from classifier
pub use classifier::{Classifier, LicenseFileClassifier, UNKNOWN_LICENSE};

/// Where a package's license came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LicenseSource {
    /// The package directory itself carries the license.
    Direct,
    /// Found at an enclosing package path.
    Inherited { from: String },
    /// Declared in the policy's `overrides` table.
    Override { rule: String },
    /// Nothing classifiable anywhere up the path.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageLicense {
    pub package: String,
    pub license: String,
    pub source: LicenseSource,
}

impl PackageLicense {
    pub fn is_recognized(&self) -> bool {
        self.source != LicenseSource::Unknown
    }
}

/// The directory packages are looked up in: `<root>/vendor`, or `root` when
/// it already is a vendor directory.
pub fn vendor_root(root: &Path) -> PathBuf {
    match root.components().next_back() {
        Some(Component::Normal(name)) if name == "vendor" => root.to_path_buf(),
        _ => root.join("vendor"),
    }
}

/// Resolve a license for every package of `packages` vendored under `root`.
///
/// Packages with no directory under the vendor root are left out. The result
/// is sorted by package.
pub fn resolve_licenses<C>(
    root: &Path,
    packages: &BTreeSet<String>,
    classifier: &C,
    overrides: &IndexMap<String, String>,
) -> Vec<PackageLicense>
where
    C: Classifier + ?Sized,
{
    let vendor = vendor_root(root);

    let mut licenses: Vec<PackageLicense> = packages
        .par_iter()
        .filter_map(|pkg| {
            let dir = vendor.join(pkg);
            if !dir.is_dir() {
                tracing::debug!(package = %pkg, dir = %dir.display(), "not vendored, skipping");
                return None;
            }
            tracing::debug!(package = %pkg, dir = %dir.display(), "analyzing");
            Some(resolve_one(&vendor, pkg, &dir, classifier, overrides))
        })
        .collect();

    licenses.sort_by(|a, b| a.package.cmp(&b.package));
    licenses
}

fn resolve_one<C>(
    vendor: &Path,
    pkg: &str,
    dir: &Path,
    classifier: &C,
    overrides: &IndexMap<String, String>,
) -> PackageLicense
where
    C: Classifier + ?Sized,
{
    if let Some((rule, license)) = find_override(overrides, pkg) {
        return PackageLicense {
            package: pkg.to_string(),
            license: license.to_string(),
            source: LicenseSource::Override {
                rule: rule.to_string(),
            },
        };
    }

    if let Some(license) = classifier.classify(dir) {
        return PackageLicense {
            package: pkg.to_string(),
            license,
            source: LicenseSource::Direct,
        };
    }

    // Multi-package repositories are often vendored as nested directories
    // with a single license at the top; walk up towards it.
    let segments: Vec<&str> = pkg.split('/').collect();
    for len in (1..segments.len()).rev() {
        let ancestor = segments[..len].join("/");
        let ancestor_dir = vendor.join(&ancestor);
        if !ancestor_dir.is_dir() {
            continue;
        }
        tracing::debug!(package = %pkg, dir = %ancestor_dir.display(), "analyzing ancestor");
        if let Some(license) = classifier.classify(&ancestor_dir) {
            return PackageLicense {
                package: pkg.to_string(),
                license,
                source: LicenseSource::Inherited { from: ancestor },
            };
        }
    }

    PackageLicense {
        package: pkg.to_string(),
        license: UNKNOWN_LICENSE.to_string(),
        source: LicenseSource::Unknown,
    }
}

/// Most specific override covering `pkg`: an exact key, or a key that is a
/// path prefix of it. A trailing `/...` on a key is accepted and ignored.
fn find_override<'a>(
    overrides: &'a IndexMap<String, String>,
    pkg: &str,
) -> Option<(&'a str, &'a str)> {
    overrides
        .iter()
        .filter(|(rule, _)| {
            let prefix = override_prefix(rule.as_str());
            pkg == prefix
                || pkg
                    .strip_prefix(prefix)
                    .map_or(false, |rest| rest.starts_with('/'))
        })
        .max_by_key(|(rule, _)| override_prefix(rule.as_str()).len())
        .map(|(rule, license)| (rule.as_str(), license.as_str()))
}

fn override_prefix(rule: &str) -> &str {
    rule.strip_suffix("/...").unwrap_or(rule)
}
