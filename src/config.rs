use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::AuditError;
use crate::policy::LicensePolicy;

/// Policy file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = ".vendor-license.yml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

pub fn parse_policy(content: &str, format: ConfigFormat) -> std::result::Result<LicensePolicy, String> {
    if content.trim().is_empty() {
        return Ok(LicensePolicy::default());
    }
    match format {
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Load the policy document at `path`. A missing or malformed file is an error.
pub fn load_policy(path: &Path) -> crate::error::Result<LicensePolicy> {
    let content = fs::read_to_string(path).map_err(|e| AuditError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let policy = parse_policy(&content, ConfigFormat::from_path(path)).map_err(|message| {
        AuditError::Config {
            path: path.to_path_buf(),
            message,
        }
    })?;
    tracing::debug!(
        path = %path.display(),
        whitelist = policy.whitelist.len(),
        blacklist = policy.blacklist.len(),
        exceptions = policy.exceptions.len(),
        overrides = policy.overrides.len(),
        "loaded policy"
    );
    Ok(policy)
}

/// Render a policy in the format its file name calls for.
pub fn render_policy(policy: &LicensePolicy, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Yaml => serde_yaml::to_string(policy).context("Failed to serialize policy as YAML"),
        ConfigFormat::Toml => toml::to_string_pretty(policy).context("Failed to serialize policy as TOML"),
    }
}

/// Append `packages` to the `exceptions` list of the policy file at `path`,
/// skipping entries already present. Returns how many were added.
///
/// TOML files are edited in place so comments and layout survive; YAML files
/// are re-serialized.
pub fn add_exceptions_to_config(path: &Path, packages: &[String]) -> Result<usize> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let (updated, added) = match ConfigFormat::from_path(path) {
        ConfigFormat::Toml => add_toml_exceptions(&content, packages)
            .with_context(|| format!("Failed to update {}", path.display()))?,
        ConfigFormat::Yaml => add_yaml_exceptions(&content, packages)
            .with_context(|| format!("Failed to update {}", path.display()))?,
    };

    if added > 0 {
        fs::write(path, updated)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    }
    Ok(added)
}

fn add_toml_exceptions(content: &str, packages: &[String]) -> Result<(String, usize)> {
    let mut doc = content.parse::<toml_edit::DocumentMut>()?;

    if doc.get("exceptions").is_none() {
        doc["exceptions"] = toml_edit::value(toml_edit::Array::new());
    }
    let exceptions = doc["exceptions"]
        .as_array_mut()
        .ok_or_else(|| anyhow::anyhow!("`exceptions` is not an array"))?;

    let mut added = 0;
    for pkg in packages {
        if exceptions.iter().any(|v| v.as_str() == Some(pkg.as_str())) {
            continue;
        }
        exceptions.push(pkg.as_str());
        added += 1;
    }
    Ok((doc.to_string(), added))
}

fn add_yaml_exceptions(content: &str, packages: &[String]) -> Result<(String, usize)> {
    use serde_yaml::{Mapping, Value};

    let mut doc: Value = if content.trim().is_empty() {
        Value::Mapping(Mapping::new())
    } else {
        serde_yaml::from_str(content)?
    };
    let mapping = doc
        .as_mapping_mut()
        .ok_or_else(|| anyhow::anyhow!("policy document is not a mapping"))?;

    if mapping.get("exceptions").map_or(true, Value::is_null) {
        mapping.insert(Value::from("exceptions"), Value::Sequence(Vec::new()));
    }
    let exceptions = mapping
        .get_mut("exceptions")
        .and_then(Value::as_sequence_mut)
        .ok_or_else(|| anyhow::anyhow!("`exceptions` is not a list"))?;

    let mut added = 0;
    for pkg in packages {
        if exceptions.iter().any(|v| v.as_str() == Some(pkg.as_str())) {
            continue;
        }
        exceptions.push(Value::from(pkg.as_str()));
        added += 1;
    }
    Ok((serde_yaml::to_string(&doc)?, added))
}
