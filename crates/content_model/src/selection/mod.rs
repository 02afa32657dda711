// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Map the selection flags in the tree to the blocks they touch.

mod operational_blocks;

pub(crate) use operational_blocks::closest_ancestor_index;
pub use operational_blocks::{
    get_first_selected_list_item, get_operational_blocks, OperationalBlock,
};

use crate::model::{ContentModel, Node, NodeId, Segment};

/// A selected leaf block together with its ancestor groups, innermost
/// first. The last entry of `path` is always the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedBlock {
    pub block: NodeId,
    pub path: Vec<NodeId>,
}

impl SelectedBlock {
    pub fn parent(&self) -> NodeId {
        self.path[0]
    }
}

/// Walk the tree in document order and report every selected leaf block.
///
/// - a paragraph is selected when any of its segments is
/// - a table whose cells are all selected is reported as one block
/// - any other selected cell counts everything inside it as selected
/// - dividers and entities carry their own flag
pub fn collect_selected_blocks(model: &ContentModel) -> Vec<SelectedBlock> {
    let mut result = Vec::new();
    let mut path = vec![model.root()];
    collect_in_group(model, model.root(), &mut path, false, &mut result);
    result
}

/// Only the paragraphs among [`collect_selected_blocks`].
pub fn get_selected_paragraphs(model: &ContentModel) -> Vec<SelectedBlock> {
    collect_selected_blocks(model)
        .into_iter()
        .filter(|s| model.paragraph(s.block).is_some())
        .collect()
}

/// Indexes of the selected segments of a paragraph.
pub fn selected_segment_indexes(model: &ContentModel, paragraph: NodeId) -> Vec<usize> {
    model
        .paragraph(paragraph)
        .map(|p| {
            p.segments
                .iter()
                .enumerate()
                .filter(|(_, s)| s.is_selected())
                .map(|(i, _)| i)
                .collect()
        })
        .unwrap_or_default()
}

/// Every selected segment as `(paragraph, segment index)`, in document
/// order. Segments of a paragraph selected through its cell count too.
pub fn get_selected_segments_and_paragraphs(model: &ContentModel) -> Vec<(NodeId, usize)> {
    let mut result = Vec::new();
    for selection in get_selected_paragraphs(model) {
        let indexes = selected_segment_indexes(model, selection.block);
        if indexes.is_empty() {
            let count = model
                .paragraph(selection.block)
                .map_or(0, |p| p.segments.len());
            result.extend((0..count).map(|i| (selection.block, i)));
        } else {
            result.extend(indexes.into_iter().map(|i| (selection.block, i)));
        }
    }
    result
}

fn collect_in_group(
    model: &ContentModel,
    group: NodeId,
    path: &mut Vec<NodeId>,
    treat_all_as_selected: bool,
    result: &mut Vec<SelectedBlock>,
) {
    for &block in model.blocks_of(group) {
        let Some(node) = model.get(block) else {
            continue;
        };
        match node {
            Node::Paragraph(p) => {
                if treat_all_as_selected || p.has_selection() {
                    result.push(selected(block, path));
                }
                for segment in &p.segments {
                    if let Segment::General(g) = segment {
                        path.push(g.node);
                        collect_in_group(
                            model,
                            g.node,
                            path,
                            treat_all_as_selected || g.is_selected,
                            result,
                        );
                        path.pop();
                    }
                }
            }
            Node::Table(table) => {
                let cells: Vec<NodeId> = table.cells().collect();
                let all_selected = !cells.is_empty()
                    && cells.iter().all(|c| {
                        model.table_cell(*c).is_some_and(|cell| cell.is_selected)
                    });
                if treat_all_as_selected || all_selected {
                    result.push(selected(block, path));
                    continue;
                }
                for cell in cells {
                    let cell_selected =
                        model.table_cell(cell).is_some_and(|c| c.is_selected);
                    path.push(cell);
                    collect_in_group(model, cell, path, cell_selected, result);
                    path.pop();
                }
            }
            Node::Divider(d) => {
                if treat_all_as_selected || d.is_selected {
                    result.push(selected(block, path));
                }
            }
            Node::Entity(e) => {
                if treat_all_as_selected || e.is_selected {
                    result.push(selected(block, path));
                }
            }
            Node::General(g) => {
                path.push(block);
                collect_in_group(
                    model,
                    block,
                    path,
                    treat_all_as_selected || g.is_selected,
                    result,
                );
                path.pop();
            }
            Node::ListItem(_) | Node::FormatContainer(_) => {
                path.push(block);
                collect_in_group(model, block, path, treat_all_as_selected, result);
                path.pop();
            }
            Node::Document(_) | Node::TableCell(_) => {}
        }
    }
}

fn selected(block: NodeId, path: &[NodeId]) -> SelectedBlock {
    SelectedBlock {
        block,
        path: path.iter().rev().copied().collect(),
    }
}
