//! Mutable graph construction.

use super::types::{PkgInfo, PkgManager, PkgNode, ROOT_NODE_ID};
use super::DepGraph;
use crate::error::{Error, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Accumulates nodes and edges until [`build`](Self::build) seals them into
/// a [`DepGraph`].
///
/// # Graph Representation
///
/// Edges are directed from **dependent to dependency**: `parent -> child`
/// means `parent` depends on `child`. The root is created with the builder
/// and always sits at node index 0.
#[derive(Debug)]
pub struct DepGraphBuilder {
    pkg_manager: PkgManager,
    graph: DiGraph<PkgNode, ()>,
    /// Node id to graph index. Every node in `graph` has exactly one entry.
    node_map: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

impl DepGraphBuilder {
    /// Create a builder whose root node represents `root_pkg`.
    pub fn new(pkg_manager: PkgManager, root_pkg: PkgInfo) -> Self {
        Self::with_root_node_id(pkg_manager, root_pkg, ROOT_NODE_ID)
    }

    pub(crate) fn with_root_node_id(
        pkg_manager: PkgManager,
        root_pkg: PkgInfo,
        root_node_id: &str,
    ) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(PkgNode {
            node_id: root_node_id.to_string(),
            info: root_pkg,
        });

        let mut node_map = HashMap::new();
        node_map.insert(root_node_id.to_string(), root);

        Self {
            pkg_manager,
            graph,
            node_map,
            root,
        }
    }

    /// Node id of the root.
    #[must_use]
    pub fn root_node_id(&self) -> &str {
        &self.graph[self.root].node_id
    }

    /// Returns `true` if a node with this id has been added.
    #[must_use]
    pub fn contains(&self, node_id: &str) -> bool {
        self.node_map.contains_key(node_id)
    }

    /// Add a package node.
    ///
    /// Adding an id that is already present is a no-op, so a package reached
    /// through several parents stays a single node. Returns `true` if the
    /// node was newly created.
    pub fn add_pkg_node(&mut self, info: PkgInfo, node_id: &str) -> bool {
        if self.node_map.contains_key(node_id) {
            return false;
        }

        let index = self.graph.add_node(PkgNode {
            node_id: node_id.to_string(),
            info,
        });
        self.node_map.insert(node_id.to_string(), index);
        true
    }

    /// Record that `parent_id` depends on `child_id`.
    ///
    /// Connecting the same pair twice leaves a single edge.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownNode` if either id has not been added.
    pub fn connect_dep(&mut self, parent_id: &str, child_id: &str) -> Result<()> {
        let parent = self.index_of(parent_id)?;
        let child = self.index_of(child_id)?;
        self.graph.update_edge(parent, child, ());
        Ok(())
    }

    /// Seal the graph. No further mutation is possible.
    #[must_use]
    pub fn build(self) -> DepGraph {
        tracing::debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "Dependency graph sealed"
        );

        DepGraph {
            pkg_manager: self.pkg_manager,
            graph: self.graph,
            node_map: self.node_map,
            root: self.root,
        }
    }

    fn index_of(&self, node_id: &str) -> Result<NodeIndex> {
        self.node_map
            .get(node_id)
            .copied()
            .ok_or_else(|| Error::UnknownNode(node_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> DepGraphBuilder {
        DepGraphBuilder::new(
            PkgManager {
                name: "unity".to_string(),
            },
            PkgInfo::new("game", "1.0.0"),
        )
    }

    #[test]
    fn new_builder_contains_only_root() {
        let builder = builder();
        assert!(builder.contains(ROOT_NODE_ID));
        assert_eq!(builder.root_node_id(), ROOT_NODE_ID);

        let graph = builder.build();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_pkg_node_is_idempotent() {
        let mut builder = builder();
        assert!(builder.add_pkg_node(PkgInfo::new("A", "1.0.0"), "A@1.0.0"));
        assert!(!builder.add_pkg_node(PkgInfo::new("A", "1.0.0"), "A@1.0.0"));

        assert_eq!(builder.build().node_count(), 2);
    }

    #[test]
    fn connect_dep_collapses_duplicate_edges() {
        let mut builder = builder();
        builder.add_pkg_node(PkgInfo::new("A", "1.0.0"), "A@1.0.0");
        builder.connect_dep(ROOT_NODE_ID, "A@1.0.0").unwrap();
        builder.connect_dep(ROOT_NODE_ID, "A@1.0.0").unwrap();

        assert_eq!(builder.build().edge_count(), 1);
    }

    #[test]
    fn connect_dep_rejects_unknown_node() {
        let mut builder = builder();
        let err = builder.connect_dep(ROOT_NODE_ID, "missing@1.0.0").unwrap_err();
        assert!(matches!(err, Error::UnknownNode(id) if id == "missing@1.0.0"));
    }
}
