use serde::{Deserialize, Serialize};

use super::config::LicensePolicy;
use super::matcher::{PolicyMatcher, Verdict, ViolationReason};
use crate::error::{violation_outcome, Result};
use crate::license::{LicenseSource, PackageLicense};

/// Evaluation result for one package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageVerdict {
    pub package: String,
    pub license: String,
    pub source: LicenseSource,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_rule: Option<String>,
}

/// A package the policy does not accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub package: String,
    pub license: String,
    pub reason: ViolationReason,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyEvaluation {
    pub verdicts: Vec<PackageVerdict>,
    pub violations: Vec<Violation>,
}

impl PolicyEvaluation {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.verdicts.iter().filter(|v| v.verdict == verdict).count()
    }

    /// `Ok` when nothing violates the policy, otherwise an error naming
    /// every violating package.
    pub fn outcome(&self) -> Result<()> {
        violation_outcome(&self.violations)
    }
}

impl LicensePolicy {
    /// Evaluate every resolved package. Never stops at the first violation.
    pub fn evaluate(&self, licenses: &[PackageLicense]) -> PolicyEvaluation {
        let matcher = PolicyMatcher::new(self);
        let mut evaluation = PolicyEvaluation::default();

        for pkg in licenses {
            let decision = matcher.decide(&pkg.package, &pkg.license);

            match decision.verdict {
                Verdict::Approved => {
                    tracing::info!(package = %pkg.package, license = %pkg.license, "found approved license");
                }
                Verdict::Exceptioned => {
                    tracing::warn!(package = %pkg.package, license = %pkg.license, "found exceptioned package");
                }
                Verdict::Violating => {
                    tracing::error!(package = %pkg.package, license = %pkg.license, "found non-approved license");
                }
            }

            if let Some(reason) = decision.reason {
                let message = match reason {
                    ViolationReason::Blacklisted => {
                        format!("License '{}' is blacklisted by policy", pkg.license)
                    }
                    ViolationReason::NotWhitelisted => {
                        format!("License '{}' is not in the whitelist", pkg.license)
                    }
                    ViolationReason::UnknownLicense => {
                        "No recognized license found".to_string()
                    }
                };
                evaluation.violations.push(Violation {
                    package: pkg.package.clone(),
                    license: pkg.license.clone(),
                    reason,
                    message,
                });
            }

            evaluation.verdicts.push(PackageVerdict {
                package: pkg.package.clone(),
                license: pkg.license.clone(),
                source: pkg.source.clone(),
                verdict: decision.verdict,
                matched_rule: decision.matched_rule,
            });
        }

        evaluation
    }
}
