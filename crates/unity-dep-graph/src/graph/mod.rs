//! The sealed dependency graph and its queries.
//!
//! A [`DepGraph`] is produced by [`DepGraphBuilder::build`] and is immutable
//! from then on. It owns a petgraph `DiGraph` whose edges point from
//! dependent to dependency, plus an index from node id to graph node.
//!
//! Enumeration order is stable: nodes come back in discovery order (root
//! first) and edges in creation order, so two builds over the same input
//! serialize identically.

mod builder;
mod data;
mod types;

pub use builder::DepGraphBuilder;
pub use data::{DepGraphData, DepRef, GraphData, NodeData, PkgEntry, SCHEMA_VERSION};
pub use types::{Edge, PkgInfo, PkgManager, PkgNode, ROOT_NODE_ID};

use petgraph::algo;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};

/// An immutable, queryable dependency graph with a single root.
#[derive(Debug, Clone)]
pub struct DepGraph {
    pub(crate) pkg_manager: PkgManager,
    pub(crate) graph: DiGraph<PkgNode, ()>,
    pub(crate) node_map: HashMap<String, NodeIndex>,
    pub(crate) root: NodeIndex,
}

impl DepGraph {
    /// Package manager the graph describes.
    #[must_use]
    pub fn pkg_manager(&self) -> &PkgManager {
        &self.pkg_manager
    }

    /// Node id of the root.
    #[must_use]
    pub fn root_node_id(&self) -> &str {
        &self.graph[self.root].node_id
    }

    /// The project the root stands for.
    #[must_use]
    pub fn root_pkg(&self) -> &PkgInfo {
        &self.graph[self.root].info
    }

    /// Returns `true` if `node_id` is the root.
    #[must_use]
    pub fn is_root(&self, node_id: &str) -> bool {
        self.root_node_id() == node_id
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct `parent -> child` edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All nodes in discovery order, root first.
    pub fn nodes(&self) -> impl Iterator<Item = &PkgNode> {
        self.graph.raw_nodes().iter().map(|node| &node.weight)
    }

    /// All edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.edge_references().map(|edge| {
            Edge::new(
                self.graph[edge.source()].node_id.clone(),
                self.graph[edge.target()].node_id.clone(),
            )
        })
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, node_id: &str) -> Option<&PkgNode> {
        self.node_map.get(node_id).map(|&index| &self.graph[index])
    }

    /// Direct dependencies of a node, in edge creation order.
    ///
    /// Returns `None` if the node does not exist.
    #[must_use]
    pub fn dependencies_of(&self, node_id: &str) -> Option<Vec<&PkgNode>> {
        let index = *self.node_map.get(node_id)?;
        Some(
            self.ordered_neighbors(index, Direction::Outgoing)
                .into_iter()
                .map(|n| &self.graph[n])
                .collect(),
        )
    }

    /// Nodes that depend directly on a node, in edge creation order.
    ///
    /// Returns `None` if the node does not exist.
    #[must_use]
    pub fn dependents_of(&self, node_id: &str) -> Option<Vec<&PkgNode>> {
        let index = *self.node_map.get(node_id)?;
        Some(
            self.ordered_neighbors(index, Direction::Incoming)
                .into_iter()
                .map(|n| &self.graph[n])
                .collect(),
        )
    }

    /// Returns `true` if a directed path leads from the root to `node_id`.
    ///
    /// The root is reachable from itself.
    #[must_use]
    pub fn is_reachable(&self, node_id: &str) -> bool {
        self.node_map
            .get(node_id)
            .is_some_and(|&index| algo::has_path_connecting(&self.graph, self.root, index, None))
    }

    /// Find one dependency cycle, if any.
    ///
    /// The cycle is returned as node ids starting and ending with the same
    /// id, e.g. `["A@1", "B@1", "A@1"]`. A self-dependency yields `["A@1", "A@1"]`.
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        for component in algo::tarjan_scc(&self.graph) {
            let Some(&start) = component.iter().min() else {
                continue;
            };
            if component.len() == 1 && self.graph.find_edge(start, start).is_none() {
                continue;
            }

            let members: HashSet<NodeIndex> = component.into_iter().collect();
            if let Some(cycle) = self.cycle_through(start, &members) {
                return Some(cycle);
            }
        }
        None
    }

    /// Shortest path from `start` back to itself, staying inside `members`.
    fn cycle_through(&self, start: NodeIndex, members: &HashSet<NodeIndex>) -> Option<Vec<String>> {
        let mut prev: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for next in self.ordered_neighbors(current, Direction::Outgoing) {
                if next == start {
                    let mut path = vec![current];
                    let mut cursor = current;
                    while let Some(&p) = prev.get(&cursor) {
                        path.push(p);
                        cursor = p;
                    }
                    path.reverse();
                    path.push(start);
                    return Some(
                        path.into_iter()
                            .map(|n| self.graph[n].node_id.clone())
                            .collect(),
                    );
                }
                if members.contains(&next) && !prev.contains_key(&next) {
                    prev.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Neighbors in edge creation order.
    ///
    /// petgraph walks a node's adjacency list newest-first, so edges are
    /// re-sorted by index to recover insertion order.
    fn ordered_neighbors(&self, index: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(index, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                (edge.id(), other)
            })
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, n)| n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> DepGraph {
        // root -> A -> C, root -> B -> C
        let mut builder = DepGraphBuilder::new(
            PkgManager {
                name: "unity".to_string(),
            },
            PkgInfo::new("game", "1.0.0"),
        );
        for (name, id) in [("A", "A@1"), ("B", "B@1"), ("C", "C@1")] {
            builder.add_pkg_node(PkgInfo::new(name, "1"), id);
        }
        builder.connect_dep(ROOT_NODE_ID, "A@1").unwrap();
        builder.connect_dep(ROOT_NODE_ID, "B@1").unwrap();
        builder.connect_dep("A@1", "C@1").unwrap();
        builder.connect_dep("B@1", "C@1").unwrap();
        builder.build()
    }

    #[test]
    fn nodes_and_edges_keep_creation_order() {
        let graph = diamond();

        let ids: Vec<_> = graph.nodes().map(|n| n.node_id.as_str()).collect();
        assert_eq!(ids, [ROOT_NODE_ID, "A@1", "B@1", "C@1"]);

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(
            edges,
            [
                Edge::new(ROOT_NODE_ID, "A@1"),
                Edge::new(ROOT_NODE_ID, "B@1"),
                Edge::new("A@1", "C@1"),
                Edge::new("B@1", "C@1"),
            ]
        );
    }

    #[test]
    fn dependencies_and_dependents_are_ordered() {
        let graph = diamond();

        let deps: Vec<_> = graph
            .dependencies_of(ROOT_NODE_ID)
            .unwrap()
            .iter()
            .map(|n| n.node_id.clone())
            .collect();
        assert_eq!(deps, ["A@1", "B@1"]);

        let dependents: Vec<_> = graph
            .dependents_of("C@1")
            .unwrap()
            .iter()
            .map(|n| n.node_id.clone())
            .collect();
        assert_eq!(dependents, ["A@1", "B@1"]);

        assert!(graph.dependencies_of("missing@1").is_none());
    }

    #[test]
    fn root_metadata() {
        let graph = diamond();
        assert!(graph.is_root(ROOT_NODE_ID));
        assert_eq!(graph.root_pkg(), &PkgInfo::new("game", "1.0.0"));
        assert_eq!(graph.pkg_manager().name, "unity");
    }

    #[test]
    fn reachability_from_root() {
        let graph = diamond();
        assert!(graph.is_reachable(ROOT_NODE_ID));
        assert!(graph.is_reachable("C@1"));
        assert!(!graph.is_reachable("missing@1"));
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        assert!(diamond().find_cycle().is_none());
    }

    #[test]
    fn find_cycle_reports_path() {
        let mut builder = DepGraphBuilder::new(
            PkgManager {
                name: "unity".to_string(),
            },
            PkgInfo::new("game", "1.0.0"),
        );
        for id in ["A@1", "B@1", "C@1"] {
            builder.add_pkg_node(PkgInfo::new(&id[..1], "1"), id);
        }
        builder.connect_dep(ROOT_NODE_ID, "A@1").unwrap();
        builder.connect_dep("A@1", "B@1").unwrap();
        builder.connect_dep("B@1", "C@1").unwrap();
        builder.connect_dep("C@1", "A@1").unwrap();

        let cycle = builder.build().find_cycle().unwrap();
        assert_eq!(cycle, ["A@1", "B@1", "C@1", "A@1"]);
    }

    #[test]
    fn find_cycle_reports_self_dependency() {
        let mut builder = DepGraphBuilder::new(
            PkgManager {
                name: "unity".to_string(),
            },
            PkgInfo::new("game", "1.0.0"),
        );
        builder.add_pkg_node(PkgInfo::new("A", "1"), "A@1");
        builder.connect_dep(ROOT_NODE_ID, "A@1").unwrap();
        builder.connect_dep("A@1", "A@1").unwrap();

        assert_eq!(builder.build().find_cycle().unwrap(), ["A@1", "A@1"]);
    }
}
