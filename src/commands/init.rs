use anyhow::Result;
use std::path::Path;
use crate::cli::InitPreset;
use vendor_license_auditor::init;

pub fn handle_init(policy: InitPreset, file: &Path, force: bool, quiet: bool) -> Result<()> {
    let init_preset = match policy {
        InitPreset::Green => init::InitPreset::Green,
        InitPreset::Yellow => init::InitPreset::Yellow,
        InitPreset::Red => init::InitPreset::Red,
    };

    init::generate_config_at_path(file, init_preset, force)?;

    if !quiet {
        println!("✅ Wrote policy to {}", file.display());
    }
    Ok(())
}
