//! Materialized-path helpers.
//!
//! A category path is a dot-separated list of labels, e.g.
//! `women.clothing.dresses`. Labels are derived from display names and only
//! contain lowercase ASCII letters, digits and single inner underscores.

use crate::shared::constants::PATH_SEPARATOR;

/// Derive a path label from a free-text category name.
///
/// Lowercases the name, maps every character outside `[a-z0-9_]` to `_`,
/// collapses underscore runs and trims underscores from both ends. Never
/// fails; a name with no letters or digits yields an empty label.
pub fn generate_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());

    for ch in name.chars().flat_map(char::to_lowercase) {
        let mapped = if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            ch
        } else {
            '_'
        };
        if mapped == '_' && (label.is_empty() || label.ends_with('_')) {
            // leading or repeated underscore
            continue;
        }
        label.push(mapped);
    }

    if label.ends_with('_') {
        label.pop();
    }
    label
}

/// Path of a child labelled `label` under `parent_path` (or a root path).
pub fn child_path(parent_path: Option<&str>, label: &str) -> String {
    match parent_path {
        Some(parent) => format!("{}{}{}", parent, PATH_SEPARATOR, label),
        None => label.to_string(),
    }
}

/// Path of the parent, or `None` for a single-segment (root) path.
pub fn parent_path(path: &str) -> Option<&str> {
    path.rsplit_once(PATH_SEPARATOR).map(|(parent, _)| parent)
}

/// Whether `path` is `ancestor` itself or lies anywhere beneath it.
#[cfg(test)]
pub fn is_within_subtree(path: &str, ancestor: &str) -> bool {
    match path.strip_prefix(ancestor) {
        Some("") => true,
        Some(rest) => rest.starts_with(PATH_SEPARATOR),
        None => false,
    }
}
