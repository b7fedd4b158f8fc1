//! Typed models for Unity Package Manager documents.
//!
//! This library parses a project's `manifest.json` and `packages-lock.json`
//! into [`Manifest`] and [`Lockfile`], attributing parse failures to the
//! document at fault, and can read both from a Unity project directory.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod lockfile;
pub mod manifest;

pub use document::{DocumentKind, ProjectDocuments};
pub use error::{Error, Result};
pub use lockfile::{LockedPackage, Lockfile, PackageSource};
pub use manifest::{Manifest, ResolutionStrategy, ScopedRegistry};
