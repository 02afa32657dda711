// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Structural invariants, checked after every mutation when the
//! `assert-invariants` feature is enabled.

use std::collections::HashSet;

use super::{ContentModel, Node, NodeId, Segment};

impl ContentModel {
    /// Panics if the tree is malformed. Compiled to a no-op unless the
    /// `assert-invariants` feature is enabled.
    pub fn assert_invariants(&self) {
        cfg_if::cfg_if! {
            if #[cfg(feature = "assert-invariants")] {
                self.explicitly_assert_invariants();
            }
        }
    }

    /// Check the invariants regardless of features:
    /// - every node is reachable at most once from the root
    /// - groups only hold blocks
    /// - all rows of a table have the same number of cells
    pub fn explicitly_assert_invariants(&self) {
        let mut seen = HashSet::new();
        self.check_group(self.root(), &mut seen);
    }

    fn check_group(&self, group: NodeId, seen: &mut HashSet<NodeId>) {
        for &block in self.blocks_of(group) {
            assert!(
                self.block_type(block).is_some(),
                "group {group:?} holds non-block node {block:?}"
            );
            self.check_node(block, seen);
        }
    }

    fn check_node(&self, id: NodeId, seen: &mut HashSet<NodeId>) {
        assert!(seen.insert(id), "node {id:?} is reachable twice");
        match self.get(id) {
            Some(Node::Paragraph(p)) => {
                for segment in &p.segments {
                    if let Segment::General(g) = segment {
                        self.check_node(g.node, seen);
                    }
                }
            }
            Some(Node::Table(t)) => {
                if let Some(first) = t.rows.first() {
                    let width = first.cells.len();
                    assert!(
                        t.rows.iter().all(|r| r.cells.len() == width),
                        "table {id:?} has ragged rows"
                    );
                }
                for cell in t.cells() {
                    assert!(seen.insert(cell), "cell {cell:?} is reachable twice");
                    self.check_group(cell, seen);
                }
            }
            Some(Node::ListItem(_))
            | Some(Node::FormatContainer(_))
            | Some(Node::General(_)) => self.check_group(id, seen),
            Some(Node::Divider(_)) | Some(Node::Entity(_)) => {}
            Some(Node::Document(_)) | Some(Node::TableCell(_)) | None => {
                panic!("node {id:?} cannot be a block")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{ContentModel, Paragraph};

    #[test]
    fn well_formed_tree_passes() {
        let mut model = ContentModel::new();
        let root = model.root();
        model.append(root, Paragraph::new());
        model.explicitly_assert_invariants();
    }

    #[test]
    #[should_panic(expected = "reachable twice")]
    fn shared_node_is_reported() {
        let mut model = ContentModel::new();
        let root = model.root();
        let para = model.append(root, Paragraph::new());
        model.blocks_of_mut(root).unwrap().push(para);
        model.explicitly_assert_invariants();
    }
}
