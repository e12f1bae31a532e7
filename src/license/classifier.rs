use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use thiserror::Error;

/// Recorded for packages whose license could not be determined anywhere.
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// File names, matched case-insensitively, that hold license text.
const LICENSE_FILE_PATTERNS: &[&str] = &[
    "licen[cs]e",
    "licen[cs]e.*",
    "copying",
    "copying.*",
    "unlicense",
];

/// Maps a directory to a license identifier.
///
/// Implementations must be deterministic for a fixed directory content.
pub trait Classifier: Sync {
    fn classify(&self, dir: &Path) -> Option<String>;
}

impl<F> Classifier for F
where
    F: Fn(&Path) -> Option<String> + Sync,
{
    fn classify(&self, dir: &Path) -> Option<String> {
        self(dir)
    }
}

#[derive(Debug, Error)]
pub enum Undetected {
    #[error("unable to find any license file")]
    NoLicenseFile,
    #[error("multiple license files found: {}", .0.join(", "))]
    MultipleLicenseFiles(Vec<String>),
    #[error("could not guess license type of {}", .0.display())]
    Unrecognized(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedLicense {
    pub license: String,
    pub file: PathBuf,
}

/// Looks for exactly one well-known license file in a directory and guesses
/// the license from distinguishing phrases in its text.
#[derive(Debug, Clone)]
pub struct LicenseFileClassifier {
    patterns: Vec<Pattern>,
}

impl Default for LicenseFileClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LicenseFileClassifier {
    pub fn new() -> Self {
        let patterns = LICENSE_FILE_PATTERNS
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        Self { patterns }
    }

    fn is_license_file(&self, name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(name, options))
    }

    /// Non-recursive search of `dir` for a single license file.
    pub fn find_license_file(&self, dir: &Path) -> Result<PathBuf, Undetected> {
        let entries = fs::read_dir(dir).map_err(|source| Undetected::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Undetected::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if self.is_license_file(&name) {
                matches.push(name);
            }
        }

        match matches.len() {
            0 => Err(Undetected::NoLicenseFile),
            1 => Ok(dir.join(&matches[0])),
            _ => {
                matches.sort();
                Err(Undetected::MultipleLicenseFiles(matches))
            }
        }
    }

    pub fn detect(&self, dir: &Path) -> Result<DetectedLicense, Undetected> {
        let file = self.find_license_file(dir)?;
        let text = fs::read_to_string(&file).map_err(|source| Undetected::Io {
            path: file.clone(),
            source,
        })?;
        match guess_license(&text) {
            Some(license) => Ok(DetectedLicense {
                license: license.to_string(),
                file,
            }),
            None => Err(Undetected::Unrecognized(file)),
        }
    }
}

impl Classifier for LicenseFileClassifier {
    fn classify(&self, dir: &Path) -> Option<String> {
        match self.detect(dir) {
            Ok(detected) => {
                tracing::trace!(
                    dir = %dir.display(),
                    file = %detected.file.display(),
                    license = %detected.license,
                    "classified license"
                );
                Some(detected.license)
            }
            Err(reason) => {
                tracing::debug!(dir = %dir.display(), %reason, "no license classification");
                None
            }
        }
    }
}

/// Guess a license identifier from license text.
///
/// Matches on phrases that tell the common licenses apart, after lowercasing
/// and collapsing all whitespace runs to single spaces.
pub fn guess_license(text: &str) -> Option<&'static str> {
    let comp = text
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let has = |phrase: &str| comp.contains(phrase);

    let license = if has("permission is hereby granted, free of charge, to any person obtaining a copy of this software") {
        "MIT"
    } else if has("permission to use, copy, modify, and/or distribute this software for any")
        || has("permission to use, copy, modify, and distribute this software for any")
    {
        "ISC"
    } else if has("apache license version 2.0, january 2004")
        || has("apache license, version 2.0")
        || has("http://www.apache.org/licenses/license-2.0")
    {
        "Apache-2.0"
    } else if has("gnu general public license version 2, june 1991") {
        "GPL-2.0"
    } else if has("gnu general public license version 3, 29 june 2007") {
        "GPL-3.0"
    } else if has("gnu lesser general public license version 2.1, february 1999") {
        "LGPL-2.1"
    } else if has("gnu lesser general public license version 3, 29 june 2007") {
        "LGPL-3.0"
    } else if has("gnu affero general public license version 3, 19 november 2007") {
        "AGPL-3.0"
    } else if has("mozilla public license") && has("version 2.0") {
        "MPL-2.0"
    } else if has("redistribution and use in source and binary forms") {
        if has("neither the name of") || has("may not be used to endorse or promote") {
            "BSD-3-Clause"
        } else {
            "BSD-2-Clause"
        }
    } else if has("common development and distribution license (cddl) version 1.0") {
        "CDDL-1.0"
    } else if has("eclipse public license - v 1.0") {
        "EPL-1.0"
    } else if has("this is free and unencumbered software released into the public domain") {
        "Unlicense"
    } else {
        return None;
    };
    Some(license)
}
