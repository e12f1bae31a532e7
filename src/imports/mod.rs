pub mod graph;
pub mod parser;
pub mod walker;

// Re-export main types
pub use graph::{ImportGraph, Node, NodeId};
pub use parser::{parse_file_imports, parse_imports};
pub use walker::{build_graph, discover_imports, graph_imports, should_descend};
