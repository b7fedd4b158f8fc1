//! Breadth-first expansion of a manifest and lockfile into a [`DepGraph`].
//!
//! # Algorithm
//!
//! 1. Seed a FIFO queue with the manifest's direct dependencies, in manifest
//!    order. Each seed takes its version and children from the lockfile entry
//!    of the same name; the manifest's declared version is not used.
//! 2. Pop an entry, add node `name@version` and the edge `parent -> node`.
//! 3. The first time a node id is seen, enqueue each of its children
//!    `(name, version)` from the entry's dependency map, with the child's own
//!    dependency map looked up in the lockfile by name.
//! 4. Seal the graph once the queue is empty, then apply the cycle policy.
//!
//! A node id reached again through another parent gets its edge but is not
//! expanded a second time. Its children depend only on the package name, so
//! the graph matches one built by expanding every occurrence, and a cyclic
//! lockfile cannot grow the queue without bound.
//!
//! # Version Source
//!
//! A child's version comes from its parent's dependency map while its own
//! children come from the lockfile entry for its name, whatever version that
//! entry records. When the two disagree the traversal logs a warning and
//! keeps the parent's version, so the child's subtree may belong to another
//! version of the package.

use crate::config::{BuildOptions, CyclePolicy};
use crate::error::{Error, Result};
use crate::graph::{DepGraph, DepGraphBuilder, PkgInfo, PkgManager};
use crate::spinner::YieldHook;
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};
use unity_lockfile::{LockedPackage, Lockfile, Manifest};

/// A package occurrence waiting to be visited.
#[derive(Debug)]
struct QueueEntry<'a> {
    parent: String,
    name: &'a str,
    version: &'a str,
    dependencies: &'a IndexMap<String, String>,
}

/// Build a graph from already-parsed documents.
///
/// # Errors
///
/// - `Error::ConfigurationUnsupported` if the manifest sets `enableLockFile: false`
/// - `Error::UnresolvedDependency` if a referenced package has no lockfile entry
/// - `Error::CycleDetected` if the graph has a cycle and `options.cycles` is
///   [`CyclePolicy::Reject`]
pub async fn build_from_documents(
    project_name: &str,
    project_version: &str,
    manifest: &Manifest,
    lockfile: &Lockfile,
    options: &BuildOptions,
    hook: &mut dyn YieldHook,
) -> Result<DepGraph> {
    if !manifest.lock_file_enabled() {
        return Err(Error::ConfigurationUnsupported);
    }

    tracing::debug!(
        project = project_name,
        version = project_version,
        direct = manifest.dependencies.len(),
        locked = lockfile.len(),
        "Building dependency graph"
    );

    let mut builder = DepGraphBuilder::new(
        PkgManager {
            name: options.package_manager.clone(),
        },
        PkgInfo::new(project_name, project_version),
    );
    let root_id = builder.root_node_id().to_string();

    let mut queue: VecDeque<QueueEntry<'_>> = VecDeque::with_capacity(manifest.dependencies.len());
    for name in manifest.dependencies.keys() {
        let locked = resolve(lockfile, name, &root_id)?;
        queue.push_back(QueueEntry {
            parent: root_id.clone(),
            name,
            version: &locked.version,
            dependencies: &locked.dependencies,
        });
    }

    let mut expanded: HashSet<String> = HashSet::new();
    let mut visits = 0usize;

    while let Some(entry) = queue.pop_front() {
        if hook.should_yield() {
            hook.yield_now().await;
        }
        visits += 1;

        let node_id = format!("{}@{}", entry.name, entry.version);
        tracing::trace!(node = %node_id, parent = %entry.parent, "Visiting package");

        builder.add_pkg_node(PkgInfo::new(entry.name, entry.version), &node_id);
        builder.connect_dep(&entry.parent, &node_id)?;

        if expanded.contains(&node_id) {
            continue;
        }

        for (child_name, child_version) in entry.dependencies {
            let locked = resolve(lockfile, child_name, &node_id)?;
            if locked.version != *child_version {
                tracing::warn!(
                    package = %child_name,
                    declared = %child_version,
                    locked = %locked.version,
                    parent = %node_id,
                    "Declared version differs from lockfile; using declared version with locked dependencies"
                );
            }
            queue.push_back(QueueEntry {
                parent: node_id.clone(),
                name: child_name,
                version: child_version,
                dependencies: &locked.dependencies,
            });
        }
        expanded.insert(node_id);
    }

    let graph = builder.build();
    tracing::debug!(
        visits,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Traversal complete"
    );

    if options.cycles == CyclePolicy::Reject {
        if let Some(cycle) = graph.find_cycle() {
            return Err(Error::CycleDetected { cycle });
        }
    }

    Ok(graph)
}

fn resolve<'a>(lockfile: &'a Lockfile, name: &str, required_by: &str) -> Result<&'a LockedPackage> {
    lockfile
        .get(name)
        .ok_or_else(|| Error::UnresolvedDependency {
            name: name.to_string(),
            required_by: required_by.to_string(),
        })
}
