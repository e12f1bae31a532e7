use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

/// Key of a node in the import graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    /// The project being audited. Never license-checked.
    Root,
    /// A vendored package, keyed by import path.
    Package(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Root => f.write_str("root"),
            NodeId::Package(pkg) => f.write_str(pkg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    /// Directory whose source files belong to this node.
    pub dir: PathBuf,
    /// Directory containing the `vendor/` tree imports resolve against.
    pub vendor_root: PathBuf,
}

#[derive(Debug, Default)]
struct GraphState {
    nodes: IndexMap<NodeId, Node>,
    edges: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

/// Node arena plus an additive adjacency log, shared by concurrent walkers.
///
/// Both live behind one lock so that "is this package new?" and "add it" are
/// a single step. Callers only ever get cloned nodes back.
#[derive(Debug)]
pub struct ImportGraph {
    state: Mutex<GraphState>,
}

impl ImportGraph {
    pub fn new(root: &Path) -> Self {
        let mut state = GraphState::default();
        state.nodes.insert(
            NodeId::Root,
            Node {
                id: NodeId::Root,
                dir: root.to_path_buf(),
                vendor_root: root.to_path_buf(),
            },
        );
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GraphState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn root(&self) -> Node {
        self.lock().nodes[&NodeId::Root].clone()
    }

    /// Record that `from` imports `node`. Returns `true` only for the first
    /// caller to insert `node.id`; that caller owns walking its subtree.
    pub fn insert(&self, from: &NodeId, node: Node) -> bool {
        let mut state = self.lock();

        let to = node.id.clone();
        state.edges.entry(from.clone()).or_default().insert(to.clone());
        state.edges.entry(to.clone()).or_default().insert(from.clone());

        if state.nodes.contains_key(&to) {
            return false;
        }
        state.nodes.insert(to, node);
        true
    }

    /// Every discovered package, without the root.
    pub fn packages(&self) -> BTreeSet<String> {
        self.lock()
            .nodes
            .keys()
            .filter_map(|id| match id {
                NodeId::Package(pkg) => Some(pkg.clone()),
                NodeId::Root => None,
            })
            .collect()
    }

    /// Render the graph as a Graphviz digraph, breadth-first from the root.
    pub fn to_dot(&self) -> String {
        let state = self.lock();
        let mut out = String::from("digraph {\n");

        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(NodeId::Root);
        queue.push_back(NodeId::Root);

        while let Some(current) = queue.pop_front() {
            match current {
                NodeId::Root => out.push_str(&format!("\t{} [label=\"root\"];\n", quote(&current))),
                NodeId::Package(_) => out.push_str(&format!("\t{};\n", quote(&current))),
            }
            let Some(near) = state.edges.get(&current) else {
                continue;
            };
            for next in near {
                if visited.insert(next.clone()) {
                    out.push_str(&format!("\t{} -> {};\n", quote(&current), quote(next)));
                    queue.push_back(next.clone());
                }
            }
        }

        out.push_str("}\n");
        out
    }
}

/// DOT node ID. The root is `"."`, which no vendored import path can be.
fn quote(id: &NodeId) -> String {
    match id {
        NodeId::Root => "\".\"".to_string(),
        NodeId::Package(pkg) => {
            let escaped = pkg.replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{escaped}\"")
        }
    }
}
