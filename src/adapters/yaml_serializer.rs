//! `ManifestSerializer` backed by `serde_yaml`.
//!
//! `serde_yaml` follows the YAML 1.2 core schema, while Helm reads values with
//! YAML 1.1 rules where `yes`, `no`, `on`, `off`, `y` and `n` are booleans.
//! Strings spelled like a YAML 1.1 boolean or null are swapped for marker
//! tokens before serialization and written back single-quoted afterwards.

use crate::domain::{AppError, ConfigTree, Mapping, Scalar};
use crate::ports::ManifestSerializer;

const YAML11_RESERVED: [&str; 10] =
    ["y", "n", "yes", "no", "on", "off", "true", "false", "null", "~"];

/// Renders mappings as YAML documents, keeping key order as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlManifestSerializer;

impl ManifestSerializer for YamlManifestSerializer {
    fn serialize(&self, what: &str, tree: &Mapping) -> Result<String, AppError> {
        let mut quoting = Quoting::for_tree(tree);
        let masked = quoting.mask_mapping(tree);
        let yaml = serde_yaml::to_string(&masked).map_err(|e| AppError::Serialization {
            what: what.to_string(),
            details: e.to_string(),
        })?;
        Ok(quoting.restore(yaml))
    }
}

/// Whether a YAML 1.1 reader would take the plain scalar `value` for a boolean or null.
fn reads_as_non_string(value: &str) -> bool {
    YAML11_RESERVED.iter().any(|word| word.eq_ignore_ascii_case(value))
}

/// Marker tokens standing in for strings that must be emitted quoted.
struct Quoting {
    prefix: String,
    originals: Vec<String>,
}

impl Quoting {
    /// Pick a marker prefix that occurs in no key or string of `tree`.
    fn for_tree(tree: &Mapping) -> Self {
        let mut strings = Vec::new();
        collect_strings(tree, &mut strings);

        let mut prefix = String::from("__helmgen_quoted_");
        while strings.iter().any(|s| s.contains(prefix.as_str())) {
            prefix.push('_');
        }
        Self { prefix, originals: Vec::new() }
    }

    fn mask(&mut self, value: &str) -> String {
        if !reads_as_non_string(value) {
            return value.to_string();
        }
        let token = format!("{}{}__", self.prefix, self.originals.len());
        self.originals.push(value.to_string());
        token
    }

    fn mask_mapping(&mut self, map: &Mapping) -> Mapping {
        map.iter().map(|(key, value)| (self.mask(key), self.mask_node(value))).collect()
    }

    fn mask_node(&mut self, node: &ConfigTree) -> ConfigTree {
        match node {
            ConfigTree::Mapping(map) => ConfigTree::Mapping(self.mask_mapping(map)),
            ConfigTree::Sequence(items) => {
                ConfigTree::Sequence(items.iter().map(|item| self.mask_node(item)).collect())
            }
            ConfigTree::Scalar(Scalar::String(s)) => ConfigTree::string(self.mask(s)),
            ConfigTree::Scalar(scalar) => ConfigTree::Scalar(scalar.clone()),
        }
    }

    /// Replace every marker token with its original string, single-quoted.
    fn restore(&self, mut yaml: String) -> String {
        for (index, original) in self.originals.iter().enumerate() {
            let token = format!("{}{}__", self.prefix, index);
            yaml = yaml.replace(&token, &format!("'{original}'"));
        }
        yaml
    }
}

fn collect_strings<'a>(map: &'a Mapping, out: &mut Vec<&'a str>) {
    for (key, value) in map {
        out.push(key);
        collect_node_strings(value, out);
    }
}

fn collect_node_strings<'a>(node: &'a ConfigTree, out: &mut Vec<&'a str>) {
    match node {
        ConfigTree::Mapping(map) => collect_strings(map, out),
        ConfigTree::Sequence(items) => {
            for item in items {
                collect_node_strings(item, out);
            }
        }
        ConfigTree::Scalar(Scalar::String(s)) => out.push(s),
        ConfigTree::Scalar(_) => {}
    }
}
