//! The Unity package manifest (`Packages/manifest.json`).

use crate::document::DocumentKind;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A project's declared, human-specified dependencies.
///
/// Only `dependencies` is required. Fields the graph builder does not use are
/// still modelled so callers can inspect them; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Direct dependencies: package name to declared version, in document order.
    pub dependencies: IndexMap<String, String>,

    /// Whether Unity maintains `packages-lock.json`. Absent means enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_lock_file: Option<bool>,

    /// Packages whose tests are exposed to the Test Runner.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub testables: Vec<String>,

    /// Strategy Unity uses when resolving indirect dependencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_strategy: Option<ResolutionStrategy>,

    /// Additional registries and the package scopes they serve.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scoped_registries: Vec<ScopedRegistry>,
}

impl Manifest {
    /// Parses a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` attributed to the manifest when the text is not
    /// JSON or lacks a `dependencies` object.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| Error::Parse {
            document: DocumentKind::Manifest,
            source,
        })
    }

    /// Returns `false` only when the manifest explicitly sets
    /// `enableLockFile: false`.
    #[must_use]
    pub fn lock_file_enabled(&self) -> bool {
        self.enable_lock_file != Some(false)
    }
}

/// How Unity picks versions of indirect dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionStrategy {
    /// Lowest version satisfying every requirement (Unity's default).
    Lowest,
    /// Highest patch of the lowest satisfying minor.
    HighestPatch,
    /// Highest minor of the lowest satisfying major.
    HighestMinor,
    /// Highest available version.
    Highest,
}

/// A scoped registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedRegistry {
    /// Display name.
    pub name: String,
    /// Registry URL.
    pub url: String,
    /// Package name prefixes served by this registry.
    #[serde(default)]
    pub scopes: Vec<String>,
}
