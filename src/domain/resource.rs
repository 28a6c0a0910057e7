//! Classification of top-level configuration keys into Kubernetes resources.

use std::fmt;

/// The closed set of resources a chart can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    Service,
    Ingress,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] =
        [ResourceKind::Deployment, ResourceKind::Service, ResourceKind::Ingress];

    /// Canonical lowercase name, also used as the manifest file stem.
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Deployment => "deployment",
            ResourceKind::Service => "service",
            ResourceKind::Ingress => "ingress",
        }
    }

    pub fn api_version(self) -> &'static str {
        match self {
            ResourceKind::Deployment => "apps/v1",
            ResourceKind::Service => "v1",
            ResourceKind::Ingress => "networking.k8s.io/v1",
        }
    }

    /// Value of the manifest's `kind` field.
    pub fn kind(self) -> &'static str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::Ingress => "Ingress",
        }
    }

    /// Case-insensitive match of a top-level configuration key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata for one classified top-level entry of a configuration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// The key exactly as the caller wrote it; placeholders reference `values.yaml` through it.
    pub resource_key: String,
    pub kind: ResourceKind,
}

impl ResourceDescriptor {
    pub fn api_version(&self) -> &'static str {
        self.kind.api_version()
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.kind()
    }
}

/// Classify a top-level key, returning `None` for keys that name no known resource.
pub fn classify(key: &str) -> Option<ResourceDescriptor> {
    ResourceKind::from_key(key).map(|kind| ResourceDescriptor { resource_key: key.to_string(), kind })
}
