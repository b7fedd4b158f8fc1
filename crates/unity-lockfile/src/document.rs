//! Locating and reading the two documents of a Unity project.
//!
//! A Unity project keeps its package manifest and the resolved lockfile side
//! by side under `Packages/`. [`ProjectDocuments`] reads both as raw text so
//! callers can parse them with uniform error attribution.

use crate::error::{Error, Result};
use crate::lockfile::Lockfile;
use crate::manifest::Manifest;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Directory inside a Unity project that holds both documents.
pub const PACKAGES_DIR_NAME: &str = "Packages";

/// File name of the package manifest.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// File name of the resolved lockfile.
pub const LOCKFILE_FILE_NAME: &str = "packages-lock.json";

/// Identifies one of the two input documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `manifest.json`
    Manifest,
    /// `packages-lock.json`
    Lockfile,
}

impl DocumentKind {
    /// Returns the conventional file name of this document.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Manifest => MANIFEST_FILE_NAME,
            Self::Lockfile => LOCKFILE_FILE_NAME,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Raw text of a project's manifest and lockfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDocuments {
    /// Contents of `manifest.json`.
    pub manifest: String,
    /// Contents of `packages-lock.json`.
    pub lockfile: String,
}

impl ProjectDocuments {
    /// Reads both documents from `<project_dir>/Packages/`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` naming the file that could not be read.
    pub async fn load(project_dir: &Path) -> Result<Self> {
        let packages_dir = project_dir.join(PACKAGES_DIR_NAME);
        let manifest_path = packages_dir.join(MANIFEST_FILE_NAME);
        let lockfile_path = packages_dir.join(LOCKFILE_FILE_NAME);

        tracing::debug!(path = %packages_dir.display(), "Loading Unity project documents");

        let (manifest, lockfile) =
            tokio::try_join!(read_document(manifest_path), read_document(lockfile_path))?;

        Ok(Self { manifest, lockfile })
    }

    /// Parses both documents.
    ///
    /// The manifest is parsed first, so when both are malformed the error
    /// names the manifest.
    pub fn parse(&self) -> Result<(Manifest, Lockfile)> {
        let manifest = Manifest::from_json_str(&self.manifest)?;
        let lockfile = Lockfile::from_json_str(&self.lockfile)?;
        Ok((manifest, lockfile))
    }
}

async fn read_document(path: PathBuf) -> Result<String> {
    fs::read_to_string(&path)
        .await
        .map_err(|source| Error::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_match_unity_conventions() {
        assert_eq!(DocumentKind::Manifest.file_name(), "manifest.json");
        assert_eq!(DocumentKind::Lockfile.file_name(), "packages-lock.json");
        assert_eq!(DocumentKind::Lockfile.to_string(), "packages-lock.json");
    }

    #[test]
    fn parse_reports_manifest_before_lockfile() {
        let docs = ProjectDocuments {
            manifest: "{".to_string(),
            lockfile: "{".to_string(),
        };

        let err = docs.parse().unwrap_err();
        assert_eq!(err.document(), Some(DocumentKind::Manifest));
    }

    #[test]
    fn parse_reports_lockfile_when_manifest_is_valid() {
        let docs = ProjectDocuments {
            manifest: r#"{"dependencies": {}}"#.to_string(),
            lockfile: "[]".to_string(),
        };

        let err = docs.parse().unwrap_err();
        assert_eq!(err.document(), Some(DocumentKind::Lockfile));
        assert!(err.to_string().contains("packages-lock.json"));
    }
}
