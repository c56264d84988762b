//! Hierarchy Builder
//!
//! Reconstructs the containment tree over node blocks and finds orphans.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::parser::block::Block;
use crate::profile::Profile;

/// One rendered row of the containment tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyRow {
    pub depth: usize,
    pub label: String,
}

/// Result of the typed walk from every root node.
#[derive(Debug, Clone, Default)]
pub struct HierarchyView {
    pub rows: Vec<HierarchyRow>,
    /// Ids reached by the walk; node blocks outside it are orphans.
    pub visited: HashSet<String>,
    pub orphans: Vec<Block>,
}

/// Build the parent->children index and walk the tree from every root.
pub fn build(blocks: &[Block], profile: &Profile) -> HierarchyView {
    let nodes: Vec<&Block> = blocks
        .iter()
        .filter(|b| profile.is_node(&b.kind) && !b.id.is_empty())
        .collect();

    // Children keyed by the literal parent value, in document order.
    let mut children: HashMap<&str, Vec<&Block>> = HashMap::new();
    for block in &nodes {
        let parent = block.value("parent");
        if !parent.is_empty() {
            children.entry(parent).or_default().push(block);
        }
    }

    let mut view = HierarchyView::default();
    for root_kind in profile.roots() {
        for block in nodes.iter().filter(|b| &b.kind == root_kind) {
            let first_visit = view.visited.insert(block.id.clone());
            view.rows.push(HierarchyRow {
                depth: 0,
                label: block.label(),
            });
            if first_visit {
                walk(block, 1, &children, profile, &mut view);
            }
        }
    }

    view.orphans = nodes
        .iter()
        .filter(|b| !view.visited.contains(&b.id))
        .map(|b| (*b).clone())
        .collect();
    view
}

/// Typed descent: at each level only children of the expected next kinds are
/// visited, grouped by kind in profile order. A child of the wrong type
/// attached to the right parent id is skipped and surfaces as an orphan.
fn walk(
    parent: &Block,
    depth: usize,
    children: &HashMap<&str, Vec<&Block>>,
    profile: &Profile,
    view: &mut HierarchyView,
) {
    let Some(kids) = children.get(parent.id.as_str()) else {
        return;
    };
    for expected in profile.children_of(&parent.kind) {
        for child in kids.iter().filter(|c| &c.kind == expected) {
            let first_visit = view.visited.insert(child.id.clone());
            view.rows.push(HierarchyRow {
                depth,
                label: child.label(),
            });
            if first_visit {
                walk(child, depth + 1, children, profile, view);
            }
        }
    }
}
