//! Manifest store
//!
//! Each synchronized item owns one YAML manifest at
//! `<root>/<letter>/<slug>_<hash>/manifest.yaml`. The path is a pure function
//! of the item's name and identifier, so re-running a sync rewrites the same
//! files. Manifests are never deleted here; a renamed item leaves its old
//! directory behind.
//!
//! # Module Organization
//!
//! - [`slug`] - Name normalization for directory names
//! - [`types`] - [`ManifestDocument`] and [`ManifestPath`]
//! - [`writer`] - [`ManifestWriter`]

pub mod slug;
pub mod types;
pub mod writer;

pub use slug::{directory_name, slugify_name};
pub use types::{ManifestDocument, ManifestPath};
pub use writer::ManifestWriter;
