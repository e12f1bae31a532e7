use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use vendor_license_auditor::graph_imports;

pub fn handle_graph(root: &Path, output: Option<PathBuf>) -> Result<()> {
    let dot = graph_imports(root)?;

    match output {
        Some(path) => fs::write(&path, dot)
            .with_context(|| format!("Failed to write graph to {}", path.display()))?,
        None => print!("{dot}"),
    }

    Ok(())
}
