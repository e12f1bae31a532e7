use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use super::graph::{ImportGraph, Node, NodeId};
use super::parser::parse_file_imports;
use crate::error::{AuditError, Result};

const VENDOR_DIR: &str = "vendor";

/// Every package transitively imported from the sources under `root`.
pub fn discover_imports(root: &Path) -> Result<BTreeSet<String>> {
    Ok(build_graph(root)?.packages())
}

/// The import graph under `root` as a Graphviz digraph.
pub fn graph_imports(root: &Path) -> Result<String> {
    Ok(build_graph(root)?.to_dot())
}

pub fn build_graph(root: &Path) -> Result<ImportGraph> {
    let graph = ImportGraph::new(root);
    let root_node = graph.root();
    tracing::debug!(root = %root.display(), "walking root node");
    walk_node(&graph, &root_node)?;
    Ok(graph)
}

/// Subdirectories the walker refuses to enter.
///
/// `vendor` is skipped everywhere: the project's own vendor tree is reached
/// through imports only, and dependencies' nested vendor copies never are.
pub fn should_descend(dir_name: &str) -> bool {
    !(dir_name.starts_with('.')
        || dir_name.starts_with('_')
        || dir_name == "testdata"
        || dir_name == VENDOR_DIR)
}

fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.ends_with("_test.go")
}

fn keep_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    let keep = should_descend(&name);
    if !keep {
        tracing::trace!(path = %entry.path().display(), "skipping directory");
    }
    keep
}

fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_entry(keep_entry) {
        let entry = entry.map_err(|source| AuditError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_source_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn walk_node(graph: &ImportGraph, node: &Node) -> Result<()> {
    let files = source_files(&node.dir)?;

    let per_file: Vec<Vec<String>> = files
        .par_iter()
        .map(|file| parse_file_imports(file))
        .collect::<Result<_>>()?;

    let mut children = Vec::new();
    for import in per_file.into_iter().flatten() {
        // Relative and absolute paths never name a vendored package.
        if import.starts_with('.') || import.starts_with('/') {
            continue;
        }
        let pkg_dir = node.vendor_root.join(VENDOR_DIR).join(&import);
        // Anything that is not a vendored directory (stdlib, same module,
        // unreadable) is simply not a dependency.
        if !pkg_dir.is_dir() {
            continue;
        }

        tracing::debug!(package = %import, from = %node.id, "found vendored import");
        let child = Node {
            id: NodeId::Package(import),
            dir: pkg_dir,
            vendor_root: node.vendor_root.clone(),
        };
        if graph.insert(&node.id, child.clone()) {
            children.push(child);
        } else {
            tracing::trace!(package = %child.id, "already visited");
        }
    }

    children
        .par_iter()
        .try_for_each(|child| walk_node(graph, child))
}
