//! Chart-level data: output destinations, rendered files and manifest decoration.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::domain::{ConfigTree, Mapping, Placeholders, ResourceDescriptor, ResourceKind};

/// File name of the chart's values file.
pub const VALUES_FILE: &str = "values.yaml";

/// Directory, relative to the chart root, holding the manifests.
pub const TEMPLATES_DIR: &str = "templates";

/// Identifies one output of a chart generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Values,
    Manifest(ResourceKind),
}

impl Destination {
    /// Sink identifier: `values` or the canonical resource name.
    pub fn id(self) -> &'static str {
        match self {
            Destination::Values => "values",
            Destination::Manifest(kind) => kind.name(),
        }
    }

    /// Path of the file relative to the chart root.
    pub fn relative_path(self) -> PathBuf {
        match self {
            Destination::Values => PathBuf::from(VALUES_FILE),
            Destination::Manifest(kind) => {
                PathBuf::from(TEMPLATES_DIR).join(format!("{}.yaml", kind.name()))
            }
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Serialized contents for one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub destination: Destination,
    pub contents: String,
}

/// A fully rendered chart that has not been written anywhere yet.
#[derive(Debug, Clone, Default)]
pub struct RenderedChart {
    /// `values` first, then manifests in the order their keys appeared in the payload.
    pub files: Vec<RenderedFile>,
    /// Top-level keys that named no known resource.
    pub skipped_keys: Vec<String>,
    /// Advisory leaf-name to placeholder view, per resource key.
    pub placeholders: IndexMap<String, Placeholders>,
}

impl RenderedChart {
    pub fn file(&self, destination: Destination) -> Option<&RenderedFile> {
        self.files.iter().find(|file| file.destination == destination)
    }
}

/// Summary of a chart generation that reached its sink.
#[derive(Debug, Clone, Default)]
pub struct ChartReport {
    pub written: Vec<Destination>,
    pub skipped_keys: Vec<String>,
    pub placeholders: IndexMap<String, Placeholders>,
}

impl ChartReport {
    /// Resources that received a manifest, in write order.
    pub fn manifests(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.written.iter().filter_map(|destination| match destination {
            Destination::Manifest(kind) => Some(*kind),
            Destination::Values => None,
        })
    }
}

/// Put `apiVersion` and `kind` at the top of a templated manifest.
///
/// Keys of the same names already present in the manifest are replaced.
pub fn decorate(manifest: Mapping, descriptor: &ResourceDescriptor) -> Mapping {
    let mut decorated = Mapping::with_capacity(manifest.len() + 2);
    decorated.insert("apiVersion".to_string(), ConfigTree::string(descriptor.api_version()));
    decorated.insert("kind".to_string(), ConfigTree::string(descriptor.kind_name()));
    for (key, value) in manifest {
        if key != "apiVersion" && key != "kind" {
            decorated.insert(key, value);
        }
    }
    decorated
}
