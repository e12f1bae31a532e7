use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Suffix marking an exception as a rule for a whole import path subtree.
pub const WILDCARD_SUFFIX: &str = "/...";

/// License policy: which licenses are acceptable, which are never acceptable,
/// and which packages are accepted regardless.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicensePolicy {
    /// Acceptable license identifiers
    #[serde(default, deserialize_with = "null_as_default")]
    pub whitelist: Vec<String>,
    /// Never acceptable, even when also whitelisted
    #[serde(default, deserialize_with = "null_as_default")]
    pub blacklist: Vec<String>,
    /// Package identifiers, or `prefix/...` subtrees, accepted whatever their license
    #[serde(default, deserialize_with = "null_as_default")]
    pub exceptions: Vec<String>,
    /// Manual license declarations by package (or package prefix), used
    /// before any license file is looked at
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub overrides: IndexMap<String, String>,
}

// `whitelist:` with no items parses as null in YAML.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
