//! Dependency graphs for Unity projects.
//!
//! This crate turns a project's `manifest.json` and `packages-lock.json` into
//! a [`DepGraph`]: one root node for the project, one node per distinct
//! `name@version`, and an edge for every resolved "depends on" relationship.
//! The graph can be queried directly or serialized to a stable JSON form for
//! vulnerability scanning, license auditing and visualization.
//!
//! # Example
//!
//! ```no_run
//! use unity_dep_graph::build_dependency_graph;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manifest = std::fs::read_to_string("Packages/manifest.json")?;
//!     let lockfile = std::fs::read_to_string("Packages/packages-lock.json")?;
//!
//!     let graph = build_dependency_graph("my-game", "1.0.0", &manifest, &lockfile).await?;
//!     println!("{}", graph.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod graph;
pub mod spinner;
mod traversal;

pub use config::{BuildOptions, CyclePolicy};
pub use error::{Error, Result};
pub use graph::{DepGraph, DepGraphBuilder, DepGraphData, Edge, PkgInfo, PkgNode, ROOT_NODE_ID};
pub use spinner::{IntervalYield, NeverYield, YieldHook};
pub use traversal::build_from_documents;

use std::path::Path;
use unity_lockfile::{Lockfile, Manifest, ProjectDocuments};

/// Build a dependency graph from the raw text of a manifest and lockfile,
/// using default [`BuildOptions`].
///
/// # Errors
///
/// - `Error::MalformedInput` if either document fails to parse
/// - `Error::ConfigurationUnsupported` if the manifest sets `enableLockFile: false`
/// - `Error::UnresolvedDependency` if a referenced package is missing from the lockfile
/// - `Error::CycleDetected` if the resolved dependencies form a cycle
pub async fn build_dependency_graph(
    project_name: &str,
    project_version: &str,
    manifest_json: &str,
    lockfile_json: &str,
) -> Result<DepGraph> {
    let options = BuildOptions::default();
    let mut hook = yield_hook_for(&options);
    build_dependency_graph_with(
        project_name,
        project_version,
        manifest_json,
        lockfile_json,
        &options,
        hook.as_mut(),
    )
    .await
}

/// Like [`build_dependency_graph`], with explicit options and yield hook.
pub async fn build_dependency_graph_with(
    project_name: &str,
    project_version: &str,
    manifest_json: &str,
    lockfile_json: &str,
    options: &BuildOptions,
    hook: &mut dyn YieldHook,
) -> Result<DepGraph> {
    let manifest = Manifest::from_json_str(manifest_json)?;
    let lockfile = Lockfile::from_json_str(lockfile_json)?;
    build_from_documents(
        project_name,
        project_version,
        &manifest,
        &lockfile,
        options,
        hook,
    )
    .await
}

/// Read `Packages/manifest.json` and `Packages/packages-lock.json` from a
/// Unity project directory and build its dependency graph.
///
/// # Errors
///
/// Returns `Error::Load` if either file cannot be read, otherwise the same
/// errors as [`build_dependency_graph`].
pub async fn build_from_project_dir(
    project_name: &str,
    project_version: &str,
    project_dir: &Path,
    options: &BuildOptions,
) -> Result<DepGraph> {
    let documents = ProjectDocuments::load(project_dir).await?;
    let mut hook = yield_hook_for(options);
    build_dependency_graph_with(
        project_name,
        project_version,
        &documents.manifest,
        &documents.lockfile,
        options,
        hook.as_mut(),
    )
    .await
}

/// The hook implied by `options.yield_interval_ms`.
#[must_use]
pub fn yield_hook_for(options: &BuildOptions) -> Box<dyn YieldHook> {
    match options.yield_interval() {
        Some(budget) => Box::new(IntervalYield::new(budget)),
        None => Box::new(NeverYield),
    }
}
