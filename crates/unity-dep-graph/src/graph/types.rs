//! Node and edge types shared by the builder and the sealed graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node id of the synthetic root that stands for the project itself.
pub const ROOT_NODE_ID: &str = "root-node";

/// Name and version of a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PkgInfo {
    /// Package name, e.g. `com.unity.textmeshpro`.
    pub name: String,
    /// Package version string, taken verbatim from the documents.
    pub version: String,
}

impl PkgInfo {
    /// Create a new package description.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Composite identity `name@version`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

impl fmt::Display for PkgInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Package manager the graph was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PkgManager {
    /// Package manager name, `unity` by default.
    pub name: String,
}

/// A vertex of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkgNode {
    /// Unique node id: `name@version` for packages, [`ROOT_NODE_ID`] for a built root.
    pub node_id: String,
    /// The package this node represents.
    pub info: PkgInfo,
}

/// A directed `parent -> child` dependency edge, by node id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Node id of the dependent package.
    pub parent: String,
    /// Node id of the dependency.
    pub child: String,
}

impl Edge {
    /// Create a new edge.
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pkg_id_joins_name_and_version() {
        let info = PkgInfo::new("com.unity.ugui", "1.0.0");
        assert_eq!(info.id(), "com.unity.ugui@1.0.0");
        assert_eq!(info.to_string(), info.id());
    }
}
