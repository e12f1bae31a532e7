use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{LicensePolicy, WILDCARD_SUFFIX};
use crate::license::UNKNOWN_LICENSE;

/// Outcome of evaluating one package against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Approved,
    Exceptioned,
    Violating,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Approved => "approved",
            Verdict::Exceptioned => "exceptioned",
            Verdict::Violating => "violating",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReason {
    Blacklisted,
    NotWhitelisted,
    UnknownLicense,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    /// The whitelist entry or exception that accepted the package
    pub matched_rule: Option<String>,
    pub reason: Option<ViolationReason>,
}

/// Lookup tables built once from a policy.
#[derive(Debug)]
pub struct PolicyMatcher<'a> {
    whitelist: HashSet<&'a str>,
    blacklist: HashSet<&'a str>,
    exact_exceptions: HashSet<&'a str>,
    /// Prefixes of `prefix/...` exceptions, suffix removed
    wildcard_exceptions: Vec<&'a str>,
}

impl<'a> PolicyMatcher<'a> {
    pub fn new(policy: &'a LicensePolicy) -> Self {
        let mut exact_exceptions = HashSet::new();
        let mut wildcard_exceptions = Vec::new();
        for exception in &policy.exceptions {
            match exception.strip_suffix(WILDCARD_SUFFIX) {
                Some(prefix) => wildcard_exceptions.push(prefix),
                None => {
                    exact_exceptions.insert(exception.as_str());
                }
            }
        }

        Self {
            whitelist: policy.whitelist.iter().map(String::as_str).collect(),
            blacklist: policy.blacklist.iter().map(String::as_str).collect(),
            exact_exceptions,
            wildcard_exceptions,
        }
    }

    /// Rules apply in order, first match wins: a blacklisted license is never
    /// approved; a whitelisted one is; then wildcard exceptions, then exact
    /// exceptions; anything left is a violation.
    pub fn decide(&self, package: &str, license: &str) -> Decision {
        let blacklisted = self.blacklist.contains(license);

        if !blacklisted && self.whitelist.contains(license) {
            return Decision {
                verdict: Verdict::Approved,
                matched_rule: Some(format!("whitelist: {license}")),
                reason: None,
            };
        }

        if let Some(prefix) = self
            .wildcard_exceptions
            .iter()
            .find(|prefix| covers(prefix, package))
        {
            return Decision {
                verdict: Verdict::Exceptioned,
                matched_rule: Some(format!("exception: {prefix}{WILDCARD_SUFFIX}")),
                reason: None,
            };
        }

        if self.exact_exceptions.contains(package) {
            return Decision {
                verdict: Verdict::Exceptioned,
                matched_rule: Some(format!("exception: {package}")),
                reason: None,
            };
        }

        let reason = if blacklisted {
            ViolationReason::Blacklisted
        } else if license == UNKNOWN_LICENSE {
            ViolationReason::UnknownLicense
        } else {
            ViolationReason::NotWhitelisted
        };
        Decision {
            verdict: Verdict::Violating,
            matched_rule: blacklisted.then(|| format!("blacklist: {license}")),
            reason: Some(reason),
        }
    }
}

/// `prefix` covers itself and every import path below it, but not siblings
/// that merely share leading characters (`org/lib` vs `org/libx`).
fn covers(prefix: &str, package: &str) -> bool {
    match package.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}
