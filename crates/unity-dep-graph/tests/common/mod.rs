//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use unity_dep_graph::DepGraphData;

/// A fixture scenario: both input documents plus the expected graph.
pub struct Fixture {
    pub manifest: String,
    pub lockfile: String,
    pub expected: DepGraphData,
}

/// Directory holding the named fixture scenario.
pub fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load `manifest.json`, `packages-lock.json` and `expected-dep-graph.json`
/// from a fixture directory.
pub fn load_fixture(name: &str) -> Fixture {
    let dir = fixture_dir(name);
    let read = |file: &str| {
        fs::read_to_string(dir.join(file))
            .unwrap_or_else(|e| panic!("Failed to read fixture {name}/{file}: {e}"))
    };

    Fixture {
        manifest: read("manifest.json"),
        lockfile: read("packages-lock.json"),
        expected: serde_json::from_str(&read("expected-dep-graph.json"))
            .expect("expected-dep-graph.json should be valid graph data"),
    }
}

/// Lay out a Unity project with the given documents under `root/Packages`.
pub fn write_project(root: &Path, manifest: &str, lockfile: &str) {
    let packages = root.join("Packages");
    fs::create_dir_all(&packages).unwrap();
    fs::write(packages.join("manifest.json"), manifest).unwrap();
    fs::write(packages.join("packages-lock.json"), lockfile).unwrap();
}

/// Node ids of a graph, in enumeration order.
pub fn node_ids(graph: &unity_dep_graph::DepGraph) -> Vec<String> {
    graph.nodes().map(|n| n.node_id.clone()).collect()
}
