pub mod audit;
pub mod config;
pub mod error;
pub mod imports;
pub mod init;
pub mod license;
pub mod output;
pub mod policy;

// Re-export main types for easy access
pub use audit::{audit, list_licenses, AuditReport, AuditSummary};
pub use error::AuditError;
pub use imports::{discover_imports, graph_imports};
pub use license::{resolve_licenses, Classifier, LicenseFileClassifier, LicenseSource, PackageLicense};
pub use policy::{LicensePolicy, PolicyEvaluation, Verdict, Violation};
