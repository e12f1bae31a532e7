pub mod checker;
pub mod config;
pub mod matcher;

// Re-export main types
pub use checker::{PackageVerdict, PolicyEvaluation, Violation};
pub use config::{LicensePolicy, WILDCARD_SUFFIX};
pub use matcher::{Decision, PolicyMatcher, Verdict, ViolationReason};
