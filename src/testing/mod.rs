//! Shared fixtures for in-crate unit tests.

use std::io;

use proptest::prelude::*;

use crate::domain::{AppError, ConfigTree, Destination, Mapping, Scalar};
use crate::ports::ChartSink;

/// Sink that rejects every write.
pub struct FailingSink;

impl ChartSink for FailingSink {
    fn write(&self, destination: Destination, _contents: &str) -> Result<(), AppError> {
        Err(AppError::Write {
            destination: destination.id().to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only sink"),
        })
    }

    fn location(&self, destination: Destination) -> String {
        format!("failing://{}", destination.id())
    }
}

/// Arbitrary mapping-rooted configuration tree of bounded depth.
pub fn arb_config_tree() -> impl Strategy<Value = Mapping> {
    let leaf = prop_oneof![
        Just(ConfigTree::Scalar(Scalar::Null)),
        any::<bool>().prop_map(|b| ConfigTree::Scalar(Scalar::Bool(b))),
        any::<i64>().prop_map(|n| ConfigTree::Scalar(Scalar::Number(n.into()))),
        "[a-z]{0,8}".prop_map(ConfigTree::string),
    ];
    let node = leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(ConfigTree::Sequence),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..5)
                .prop_map(|entries| ConfigTree::Mapping(entries.into_iter().collect())),
        ]
    });
    prop::collection::vec(("[a-z]{1,6}", node), 0..6)
        .prop_map(|entries| entries.into_iter().collect::<Mapping>())
}

/// Whether any string leaf of `tree`, including those inside sequences, is a Helm value reference.
pub fn contains_placeholder(tree: &ConfigTree) -> bool {
    match tree {
        ConfigTree::Mapping(map) => map.values().any(contains_placeholder),
        ConfigTree::Sequence(items) => items.iter().any(contains_placeholder),
        ConfigTree::Scalar(Scalar::String(s)) => s.starts_with("{{.Values."),
        ConfigTree::Scalar(_) => false,
    }
}

/// Look up a node by a dotted key path, descending through mappings only.
pub fn pointer<'a>(tree: &'a ConfigTree, dotted: &str) -> Option<&'a ConfigTree> {
    dotted.split('.').try_fold(tree, |node, key| node.as_mapping()?.get(key))
}

#[test]
fn pointer_descends_through_mappings() {
    let tree = ConfigTree::from(serde_json::json!({"a": {"b": {"c": "leaf"}}}));
    assert_eq!(pointer(&tree, "a.b.c").and_then(ConfigTree::as_str), Some("leaf"));
    assert!(pointer(&tree, "a.x").is_none());
}
