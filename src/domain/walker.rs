//! Placeholder substitution over a resource's configuration tree.
//!
//! Every scalar reached through mappings is replaced by a Helm value reference
//! built from the dotted chain of ancestor keys. Sequences are transparent:
//! mapping elements are walked with the sequence's own path, so all elements
//! share one template path, while non-mapping elements are left untouched.

use indexmap::IndexMap;

use crate::domain::{AppError, CancelFlag, ConfigTree, Mapping};

/// Leaf key name to the last placeholder generated for it.
pub type Placeholders = IndexMap<String, String>;

/// A resource sub-tree after placeholder substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplatedResource {
    pub manifest: Mapping,
    pub placeholders: Placeholders,
}

/// Helm value reference for a dotted path under a resource key.
pub fn placeholder(resource_key: &str, path: &str) -> String {
    format!("{{{{.Values.{resource_key}.{path}}}}}")
}

/// Template a copy of `value`, the sub-tree stored under `resource_key`.
///
/// # Errors
/// `TypeMismatch` when `value` is not a mapping, `Cancelled` when `cancel` is raised mid-walk.
pub fn template_resource(
    resource_key: &str,
    value: &ConfigTree,
    cancel: &CancelFlag,
) -> Result<TemplatedResource, AppError> {
    let ConfigTree::Mapping(source) = value else {
        return Err(AppError::TypeMismatch {
            resource: resource_key.to_string(),
            found: value.kind_name(),
        });
    };

    let mut manifest = source.clone();
    let mut walker = Walker { resource_key, cancel, placeholders: Placeholders::new() };
    walker.walk_mapping(&mut manifest, "")?;

    Ok(TemplatedResource { manifest, placeholders: walker.placeholders })
}

struct Walker<'a> {
    resource_key: &'a str,
    cancel: &'a CancelFlag,
    placeholders: Placeholders,
}

impl Walker<'_> {
    fn walk_mapping(&mut self, map: &mut Mapping, prefix: &str) -> Result<(), AppError> {
        self.cancel.check()?;

        for (key, value) in map.iter_mut() {
            match value {
                ConfigTree::Mapping(inner) => self.walk_mapping(inner, &format!("{prefix}{key}."))?,
                ConfigTree::Sequence(items) => {
                    let nested = format!("{prefix}{key}.");
                    for item in items.iter_mut() {
                        if let ConfigTree::Mapping(inner) = item {
                            self.walk_mapping(inner, &nested)?;
                        }
                    }
                }
                ConfigTree::Scalar(_) => {
                    let reference = placeholder(self.resource_key, &format!("{prefix}{key}"));
                    self.placeholders.insert(key.clone(), reference.clone());
                    *value = ConfigTree::string(reference);
                }
            }
        }

        Ok(())
    }
}
