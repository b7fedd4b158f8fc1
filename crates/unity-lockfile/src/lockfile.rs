//! The resolved lockfile (`Packages/packages-lock.json`).

use crate::document::DocumentKind;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Every package in the resolved tree, keyed by package name.
///
/// Unity resolves one version per package name, so the map holds a single
/// entry per name. Key order follows the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lockfile {
    /// Resolved entries by package name.
    pub dependencies: IndexMap<String, LockedPackage>,
}

impl Lockfile {
    /// Parses a lockfile from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` attributed to the lockfile when the text is not
    /// JSON, lacks a `dependencies` object, or an entry lacks `version`.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| Error::Parse {
            document: DocumentKind::Lockfile,
            source,
        })
    }

    /// Looks up the resolved entry for a package name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LockedPackage> {
        self.dependencies.get(name)
    }

    /// Number of resolved packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Returns `true` if the lockfile resolves no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// One resolved package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPackage {
    /// Resolved version.
    pub version: String,

    /// Distance from the manifest; 0 for direct dependencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,

    /// Where the package came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PackageSource>,

    /// This package's own dependencies: name to version, in document order.
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    /// Registry URL, for registry packages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Commit hash, for git packages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Origin of a resolved package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageSource {
    /// A package registry.
    Registry,
    /// Shipped with the editor.
    Builtin,
    /// Lives inside the project's `Packages/` folder.
    Embedded,
    /// A git repository.
    Git,
    /// A folder on disk.
    Local,
    /// A tarball on disk.
    LocalTarball,
    /// Any source this crate does not know about.
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LOCKFILE: &str = r#"{
        "dependencies": {
            "com.unity.textmeshpro": {
                "version": "3.0.6",
                "depth": 0,
                "source": "registry",
                "dependencies": {"com.unity.ugui": "1.0.0"},
                "url": "https://packages.unity.com"
            },
            "com.unity.ugui": {
                "version": "1.0.0",
                "depth": 1,
                "source": "builtin",
                "dependencies": {}
            }
        }
    }"#;

    #[test]
    fn parses_entries_in_document_order() {
        let lockfile = Lockfile::from_json_str(LOCKFILE).unwrap();

        assert_eq!(lockfile.len(), 2);
        let names: Vec<_> = lockfile.dependencies.keys().map(String::as_str).collect();
        assert_eq!(names, ["com.unity.textmeshpro", "com.unity.ugui"]);

        let tmp = lockfile.get("com.unity.textmeshpro").unwrap();
        assert_eq!(tmp.version, "3.0.6");
        assert_eq!(tmp.depth, Some(0));
        assert_eq!(tmp.source, Some(PackageSource::Registry));
        assert_eq!(tmp.dependencies["com.unity.ugui"], "1.0.0");
    }

    #[test]
    fn get_returns_none_for_unknown_package() {
        let lockfile = Lockfile::from_json_str(LOCKFILE).unwrap();
        assert!(lockfile.get("com.unity.missing").is_none());
    }

    #[test]
    fn entry_without_optional_fields_is_accepted() {
        let raw = r#"{"dependencies": {"A": {"version": "1.0.0"}}}"#;
        let lockfile = Lockfile::from_json_str(raw).unwrap();

        let entry = lockfile.get("A").unwrap();
        assert!(entry.dependencies.is_empty());
        assert_eq!(entry.source, None);
    }

    #[rstest]
    #[case::registry("registry", PackageSource::Registry)]
    #[case::local_tarball("local-tarball", PackageSource::LocalTarball)]
    #[case::unknown("scoped-mirror", PackageSource::Other)]
    fn package_source_names(#[case] wire: &str, #[case] expected: PackageSource) {
        let raw = format!(r#"{{"dependencies": {{"A": {{"version": "1.0.0", "source": "{wire}"}}}}}}"#);
        let lockfile = Lockfile::from_json_str(&raw).unwrap();
        assert_eq!(lockfile.get("A").unwrap().source, Some(expected));
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::missing_dependencies(r#"{"packages": {}}"#)]
    #[case::missing_version(r#"{"dependencies": {"A": {"depth": 0}}}"#)]
    fn malformed_lockfile_is_attributed(#[case] raw: &str) {
        let err = Lockfile::from_json_str(raw).unwrap_err();
        assert_eq!(err.document(), Some(DocumentKind::Lockfile));
    }
}
