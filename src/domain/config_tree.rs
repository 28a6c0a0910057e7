//! Generic configuration tree decoded from the request payload.
//!
//! The tree is a closed sum type so every consumer matches exhaustively on
//! its shape. Mapping keys keep the order in which the payload supplied them,
//! which is also the order `values.yaml` and the manifests are written in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Ordered string-keyed mapping of configuration nodes.
pub type Mapping = IndexMap<String, ConfigTree>;

/// A node of a decoded configuration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigTree {
    Mapping(Mapping),
    Sequence(Vec<ConfigTree>),
    Scalar(Scalar),
}

/// Leaf value of a configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl ConfigTree {
    /// Build a string leaf.
    pub fn string<S: Into<String>>(value: S) -> Self {
        ConfigTree::Scalar(Scalar::String(value.into()))
    }

    /// Human-readable name of the node's shape, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigTree::Mapping(_) => "an object",
            ConfigTree::Sequence(_) => "an array",
            ConfigTree::Scalar(Scalar::Null) => "null",
            ConfigTree::Scalar(Scalar::Bool(_)) => "a boolean",
            ConfigTree::Scalar(Scalar::Number(_)) => "a number",
            ConfigTree::Scalar(Scalar::String(_)) => "a string",
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigTree::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigTree::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ConfigTree {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigTree::Scalar(Scalar::Null),
            serde_json::Value::Bool(b) => ConfigTree::Scalar(Scalar::Bool(b)),
            serde_json::Value::Number(n) => ConfigTree::Scalar(Scalar::Number(n)),
            serde_json::Value::String(s) => ConfigTree::Scalar(Scalar::String(s)),
            serde_json::Value::Array(items) => {
                ConfigTree::Sequence(items.into_iter().map(ConfigTree::from).collect())
            }
            serde_json::Value::Object(map) => {
                ConfigTree::Mapping(map.into_iter().map(|(k, v)| (k, ConfigTree::from(v))).collect())
            }
        }
    }
}

/// Decode a JSON payload whose top level must be an object.
pub fn decode_payload(bytes: &[u8]) -> Result<Mapping, AppError> {
    let tree: ConfigTree =
        serde_json::from_slice(bytes).map_err(|e| AppError::Decode(e.to_string()))?;
    match tree {
        ConfigTree::Mapping(map) => Ok(map),
        other => Err(AppError::Decode(format!(
            "expected a JSON object at the top level, found {}",
            other.kind_name()
        ))),
    }
}
