//! Assembles the category hierarchy from flat records.

use std::collections::HashMap;

use crate::features::categories::models::Category;
use crate::features::categories::path_label::parent_path;

/// A category together with its direct children, in path order
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

/// Result of assembling a hierarchy.
///
/// `orphans` holds the top-most records whose parent path has no matching
/// record in the input (for example the active child of an inactive parent
/// when listing active categories only), each with its own subtree attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForest {
    pub roots: Vec<CategoryNode>,
    pub orphans: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

impl CategoryForest {
    /// Total number of records placed in the forest, orphans included
    pub fn node_count(&self) -> usize {
        self.roots
            .iter()
            .chain(self.orphans.iter())
            .map(|node| 1 + node.descendant_count())
            .sum()
    }
}

/// Build the forest from records sorted by `path` ascending.
///
/// Runs in two passes: index every record by path, then link each record to
/// its parent's child list. Root order and sibling order follow input order.
/// If two records share a path, children attach to the first of them.
pub fn build_tree(records: Vec<Category>) -> CategoryForest {
    let mut index_by_path: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        index_by_path.entry(record.path.as_str()).or_insert(idx);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    let mut orphans = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        match parent_path(&record.path) {
            None => roots.push(idx),
            Some(parent) => match index_by_path.get(parent) {
                Some(&parent_idx) => children[parent_idx].push(idx),
                None => orphans.push(idx),
            },
        }
    }
    drop(index_by_path);

    let mut slots: Vec<Option<Category>> = records.into_iter().map(Some).collect();

    CategoryForest {
        roots: assemble_all(&roots, &mut slots, &children),
        orphans: assemble_all(&orphans, &mut slots, &children),
    }
}

fn assemble_all(
    indices: &[usize],
    slots: &mut [Option<Category>],
    children: &[Vec<usize>],
) -> Vec<CategoryNode> {
    indices
        .iter()
        .filter_map(|&idx| assemble(idx, slots, children))
        .collect()
}

fn assemble(
    idx: usize,
    slots: &mut [Option<Category>],
    children: &[Vec<usize>],
) -> Option<CategoryNode> {
    // Each index sits in exactly one child list, so every slot is taken once
    let category = slots.get_mut(idx)?.take()?;
    let child_nodes = children
        .get(idx)
        .map(|child_indices| assemble_all(child_indices, slots, children))
        .unwrap_or_default();

    Some(CategoryNode {
        category,
        children: child_nodes,
    })
}
