//! Stable JSON representation of a [`DepGraph`].
//!
//! The wire form lists each distinct package once under `pkgs` and the graph
//! structure under `graph.nodes`, every node naming its package and its
//! direct dependencies:
//!
//! ```json
//! {
//!   "schemaVersion": "1.2.0",
//!   "pkgManager": { "name": "unity" },
//!   "pkgs": [
//!     { "id": "game@1.0.0", "info": { "name": "game", "version": "1.0.0" } },
//!     { "id": "A@1.0.0", "info": { "name": "A", "version": "1.0.0" } }
//!   ],
//!   "graph": {
//!     "rootNodeId": "root-node",
//!     "nodes": [
//!       { "nodeId": "root-node", "pkgId": "game@1.0.0", "deps": [{ "nodeId": "A@1.0.0" }] },
//!       { "nodeId": "A@1.0.0", "pkgId": "A@1.0.0", "deps": [] }
//!     ]
//!   }
//! }
//! ```

use super::builder::DepGraphBuilder;
use super::types::{PkgInfo, PkgManager};
use super::DepGraph;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;

/// Version of the wire schema written by [`DepGraph::to_data`].
pub const SCHEMA_VERSION: &str = "1.2.0";

/// Serializable form of a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepGraphData {
    /// Wire schema version.
    pub schema_version: String,
    /// Package manager the graph describes.
    pub pkg_manager: PkgManager,
    /// Distinct packages, root package first.
    pub pkgs: Vec<PkgEntry>,
    /// Graph structure.
    pub graph: GraphData,
}

/// A package listed once in [`DepGraphData::pkgs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkgEntry {
    /// `name@version`.
    pub id: String,
    /// Name and version.
    pub info: PkgInfo,
}

/// Nodes and their outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    /// Node id of the root.
    pub root_node_id: String,
    /// Every node, root first, in discovery order.
    pub nodes: Vec<NodeData>,
}

/// One node with its direct dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Node id.
    pub node_id: String,
    /// Id of the package in [`DepGraphData::pkgs`].
    pub pkg_id: String,
    /// Direct dependencies, in edge creation order.
    pub deps: Vec<DepRef>,
}

/// Reference to a dependency node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepRef {
    /// Node id of the dependency.
    pub node_id: String,
}

impl DepGraph {
    /// Convert to the serializable wire form.
    #[must_use]
    pub fn to_data(&self) -> DepGraphData {
        let mut pkgs: IndexMap<String, PkgInfo> = IndexMap::new();
        let mut nodes = Vec::with_capacity(self.graph.node_count());

        for index in self.graph.node_indices() {
            let node = &self.graph[index];
            let pkg_id = node.info.id();
            pkgs.entry(pkg_id.clone())
                .or_insert_with(|| node.info.clone());

            let deps = self
                .ordered_neighbors(index, petgraph::Direction::Outgoing)
                .into_iter()
                .map(|dep| DepRef {
                    node_id: self.graph[dep].node_id.clone(),
                })
                .collect();

            nodes.push(NodeData {
                node_id: node.node_id.clone(),
                pkg_id,
                deps,
            });
        }

        DepGraphData {
            schema_version: SCHEMA_VERSION.to_string(),
            pkg_manager: self.pkg_manager.clone(),
            pkgs: pkgs
                .into_iter()
                .map(|(id, info)| PkgEntry { id, info })
                .collect(),
            graph: GraphData {
                root_node_id: self.root_node_id().to_string(),
                nodes,
            },
        }
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_data())
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_data())
    }

    /// Rebuild a graph from its wire form.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGraphData` if the root node is missing, a node
    /// id repeats, or a node references an unknown package or dependency.
    pub fn from_data(data: &DepGraphData) -> Result<Self> {
        let pkgs: IndexMap<&str, &PkgInfo> = data
            .pkgs
            .iter()
            .map(|pkg| (pkg.id.as_str(), &pkg.info))
            .collect();
        let lookup_pkg = |pkg_id: &str| {
            pkgs.get(pkg_id).map(|info| (*info).clone()).ok_or_else(|| {
                Error::InvalidGraphData(format!("unknown package id `{pkg_id}`"))
            })
        };

        let root_id = data.graph.root_node_id.as_str();
        let root = data
            .graph
            .nodes
            .iter()
            .find(|node| node.node_id == root_id)
            .ok_or_else(|| Error::InvalidGraphData(format!("root node `{root_id}` is not listed")))?;

        let mut builder = DepGraphBuilder::with_root_node_id(
            data.pkg_manager.clone(),
            lookup_pkg(&root.pkg_id)?,
            root_id,
        );

        let mut seen = HashSet::new();
        for node in &data.graph.nodes {
            if !seen.insert(node.node_id.as_str()) {
                return Err(Error::InvalidGraphData(format!(
                    "duplicate node id `{}`",
                    node.node_id
                )));
            }
            if node.node_id != root_id {
                builder.add_pkg_node(lookup_pkg(&node.pkg_id)?, &node.node_id);
            }
        }

        for node in &data.graph.nodes {
            for dep in &node.deps {
                builder
                    .connect_dep(&node.node_id, &dep.node_id)
                    .map_err(|_| {
                        Error::InvalidGraphData(format!(
                            "node `{}` depends on unknown node `{}`",
                            node.node_id, dep.node_id
                        ))
                    })?;
            }
        }

        Ok(builder.build())
    }
}

impl Serialize for DepGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_data().serialize(serializer)
    }
}
