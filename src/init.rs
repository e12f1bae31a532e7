use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{parse_policy, render_policy, ConfigFormat};
use crate::policy::LicensePolicy;

#[derive(Debug, Clone, Copy)]
pub enum InitPreset {
    Green,
    Yellow,
    Red,
}

fn get_preset_config(preset: InitPreset) -> &'static str {
    match preset {
        InitPreset::Green => include_str!("../presets/green.yml"),
        InitPreset::Yellow => include_str!("../presets/yellow.yml"),
        InitPreset::Red => include_str!("../presets/red.yml"),
    }
}

pub fn preset_policy(preset: InitPreset) -> Result<LicensePolicy> {
    parse_policy(get_preset_config(preset), ConfigFormat::Yaml)
        .map_err(|e| anyhow::anyhow!("Invalid preset config: {e}"))
}

/// Write the preset policy to `path`. YAML presets are written verbatim so
/// their comments survive; a `.toml` path gets the preset converted.
pub fn generate_config_at_path<P: AsRef<Path>>(path: P, preset: InitPreset, force: bool) -> Result<()> {
    let path = path.as_ref();

    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        ));
    }

    let content = match ConfigFormat::from_path(path) {
        ConfigFormat::Yaml => get_preset_config(preset).to_string(),
        ConfigFormat::Toml => render_policy(&preset_policy(preset)?, ConfigFormat::Toml)?,
    };

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), ?preset, "wrote policy");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_policy;
    use tempfile::tempdir;

    #[test]
    fn test_presets_parse() {
        for preset in [InitPreset::Green, InitPreset::Yellow, InitPreset::Red] {
            let policy = preset_policy(preset).unwrap();
            assert!(policy.whitelist.contains(&"MIT".to_string()));
            assert!(policy.blacklist.contains(&"AGPL-3.0".to_string()));
            assert!(policy.exceptions.is_empty());
        }
    }

    #[test]
    fn test_presets_get_stricter() {
        let green = preset_policy(InitPreset::Green).unwrap();
        let red = preset_policy(InitPreset::Red).unwrap();
        assert!(green.blacklist.contains(&"GPL-3.0".to_string()));
        assert!(red.whitelist.contains(&"GPL-3.0".to_string()));
    }

    #[test]
    fn test_generate_yaml_and_toml() {
        let dir = tempdir().unwrap();

        let yaml = dir.path().join(".vendor-license.yml");
        generate_config_at_path(&yaml, InitPreset::Yellow, false).unwrap();
        assert_eq!(load_policy(&yaml).unwrap(), preset_policy(InitPreset::Yellow).unwrap());

        let toml = dir.path().join("policy.toml");
        generate_config_at_path(&toml, InitPreset::Green, false).unwrap();
        assert_eq!(load_policy(&toml).unwrap(), preset_policy(InitPreset::Green).unwrap());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".vendor-license.yml");
        fs::write(&path, "whitelist: [MIT]\n").unwrap();

        assert!(generate_config_at_path(&path, InitPreset::Red, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "whitelist: [MIT]\n");

        generate_config_at_path(&path, InitPreset::Red, true).unwrap();
        assert_eq!(load_policy(&path).unwrap(), preset_policy(InitPreset::Red).unwrap());
    }
}
