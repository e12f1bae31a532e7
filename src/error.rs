use std::path::PathBuf;
use thiserror::Error;

use crate::policy::Violation;

pub type Result<T, E = AuditError> = std::result::Result<T, E>;

/// Errors surfaced by the walk/resolve/evaluate pipeline.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("can't read config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("non-approved license found in {} package(s): {}", violations.len(), describe(violations))]
    PolicyViolation { violations: Vec<Violation> },
}

impl AuditError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AuditError::Io {
            path: path.into(),
            source,
        }
    }
}

/// `Ok` when `violations` is empty, otherwise a [`AuditError::PolicyViolation`]
/// naming each of them.
pub(crate) fn violation_outcome(violations: &[Violation]) -> Result<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AuditError::PolicyViolation {
            violations: violations.to_vec(),
        })
    }
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} ({})", v.package, v.license))
        .collect::<Vec<_>>()
        .join(", ")
}
