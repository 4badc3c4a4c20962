//! Dependency listing: which packages the document acknowledges, in order.

use std::collections::{BTreeMap, BTreeSet};

pub mod node;

/// Declared dependency names minus `skip`, in ascending byte order.
///
/// Only the keys of `dependencies` matter; version ranges are ignored.
pub fn list_dependencies(
    dependencies: &BTreeMap<String, String>,
    skip: &BTreeSet<String>,
) -> Vec<String> {
    let mut names: Vec<String> = dependencies
        .keys()
        .filter(|name| !name.is_empty() && !skip.contains(*name))
        .cloned()
        .collect();
    names.sort();
    names
}
