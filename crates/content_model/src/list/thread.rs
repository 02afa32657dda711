// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Resolve which list items share one numbering or bullet sequence.
//!
//! Threads are not stored in the model. They are recomputed from a flat,
//! document-order sequence of list items in which `None` marks a break:
//! non-list content, a table or cell boundary, or an inline general block.

use tracing::trace;

use crate::model::{ContentModel, ListItem, ListType, Node, NodeId, Segment};

/// All list items rendered in the same sequence as `item`, in document
/// order. Always contains `item` unless it cannot be found under `root`,
/// in which case the result is empty.
pub fn find_list_items_in_same_thread(
    model: &ContentModel,
    root: NodeId,
    item: NodeId,
) -> Vec<NodeId> {
    let mut sequence = Vec::new();
    collect_list_items(model, root, &mut sequence);
    let result = filter_thread(model, &sequence, item);
    trace!(
        target: "content_model.list",
        item = item.index(),
        thread_len = result.len(),
        "resolved list thread"
    );
    result
}

fn collect_list_items(
    model: &ContentModel,
    group: NodeId,
    result: &mut Vec<Option<NodeId>>,
) {
    for &block in model.blocks_of(group) {
        match model.get(block) {
            Some(Node::ListItem(_)) => result.push(Some(block)),
            Some(Node::FormatContainer(_)) | Some(Node::General(_)) => {
                push_break(result);
                collect_list_items(model, block, result);
                push_break(result);
            }
            Some(Node::Paragraph(p)) => {
                push_break(result);
                for segment in &p.segments {
                    if let Segment::General(g) = segment {
                        collect_list_items(model, g.node, result);
                        push_break(result);
                    }
                }
            }
            Some(Node::Table(table)) => {
                push_break(result);
                for cell in table.cells() {
                    collect_list_items(model, cell, result);
                    push_break(result);
                }
            }
            Some(Node::Divider(_)) | Some(Node::Entity(_)) => push_break(result),
            Some(Node::Document(_)) | Some(Node::TableCell(_)) | None => {}
        }
    }
}

fn push_break(result: &mut Vec<Option<NodeId>>) {
    if !matches!(result.last(), Some(None)) {
        result.push(None);
    }
}

fn filter_thread(
    model: &ContentModel,
    sequence: &[Option<NodeId>],
    item: NodeId,
) -> Vec<NodeId> {
    let Some(current_index) = sequence.iter().position(|i| *i == Some(item))
    else {
        return Vec::new();
    };
    let Some(current) = model.list_item(item) else {
        return Vec::new();
    };
    let depth = current.levels.len();
    let is_ordered =
        current.last_level().map(|l| l.list_type) == Some(ListType::Ordered);

    let mut before = Vec::new();
    let mut after = Vec::new();

    for entry in sequence[..=current_index].iter().rev() {
        let Some(candidate) = entry.and_then(|id| model.list_item(id).map(|li| (id, li)))
        else {
            if is_ordered {
                continue;
            }
            break;
        };
        if !are_list_types_compatible(current, candidate.1) {
            break;
        }
        before.push(candidate.0);
        if is_ordered && has_start_number_override(candidate.1, depth) {
            break;
        }
    }

    for entry in &sequence[current_index + 1..] {
        let Some(candidate) = entry.and_then(|id| model.list_item(id).map(|li| (id, li)))
        else {
            if is_ordered {
                continue;
            }
            break;
        };
        if !are_list_types_compatible(current, candidate.1)
            || (is_ordered && has_start_number_override(candidate.1, depth))
        {
            break;
        }
        after.push(candidate.0);
    }

    before.reverse();
    before.extend(after);
    before
}

/// The shorter level list must be a prefix, by type, of the longer one.
fn are_list_types_compatible(a: &ListItem, b: &ListItem) -> bool {
    a.levels
        .iter()
        .zip(b.levels.iter())
        .all(|(x, y)| x.list_type == y.list_type)
}

/// Any level at or above `depth` restarts numbering.
fn has_start_number_override(item: &ListItem, depth: usize) -> bool {
    item.levels
        .iter()
        .take(depth)
        .any(|l| l.format.start_number_override.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BlockFormat, ContainerTag, FormatContainer, ListLevel, Paragraph,
        Table, TableCell, TableRow,
    };

    fn item(model: &mut ContentModel, parent: NodeId, levels: &[ListType]) -> NodeId {
        model.append(
            parent,
            ListItem::new(levels.iter().map(|t| ListLevel::new(*t)).collect()),
        )
    }

    use ListType::{Ordered as OL, Unordered as UL};

    #[test]
    fn item_not_under_root_gives_empty_thread() {
        let mut model = ContentModel::new();
        let root = model.root();
        let detached = model.add(ListItem::new(vec![ListLevel::new(OL)]));
        assert!(find_list_items_in_same_thread(&model, root, detached).is_empty());
    }

    #[test]
    fn single_item_is_its_own_thread() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = item(&mut model, root, &[OL]);
        assert_eq!(find_list_items_in_same_thread(&model, root, a), vec![a]);
    }

    #[test]
    fn ordered_list_continues_across_paragraph() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = item(&mut model, root, &[OL]);
        model.append(root, Paragraph::new());
        let b = item(&mut model, root, &[OL]);
        assert_eq!(find_list_items_in_same_thread(&model, root, a), vec![a, b]);
        assert_eq!(find_list_items_in_same_thread(&model, root, b), vec![a, b]);
    }

    #[test]
    fn bullet_list_stops_at_paragraph() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = item(&mut model, root, &[UL]);
        model.append(root, Paragraph::new());
        let b = item(&mut model, root, &[UL]);
        assert_eq!(find_list_items_in_same_thread(&model, root, a), vec![a]);
        assert_eq!(find_list_items_in_same_thread(&model, root, b), vec![b]);
    }

    #[test]
    fn nested_items_share_thread_with_outer_items() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = item(&mut model, root, &[OL]);
        let b = item(&mut model, root, &[OL, UL]);
        let c = item(&mut model, root, &[OL]);
        assert_eq!(find_list_items_in_same_thread(&model, root, a), vec![a, b, c]);
        assert_eq!(find_list_items_in_same_thread(&model, root, b), vec![a, b, c]);
    }

    #[test]
    fn mismatched_type_at_same_depth_breaks_thread() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = item(&mut model, root, &[OL]);
        let b = item(&mut model, root, &[UL]);
        let c = item(&mut model, root, &[OL]);
        assert_eq!(find_list_items_in_same_thread(&model, root, a), vec![a]);
        assert_eq!(find_list_items_in_same_thread(&model, root, b), vec![b]);
        assert_eq!(find_list_items_in_same_thread(&model, root, c), vec![c]);
    }

    #[test]
    fn start_number_override_splits_thread() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = item(&mut model, root, &[OL]);
        let b = model.append(
            root,
            ListItem::new(vec![ListLevel::new(OL).with_start_number(5)]),
        );
        let c = item(&mut model, root, &[OL]);
        assert_eq!(find_list_items_in_same_thread(&model, root, a), vec![a]);
        assert_eq!(find_list_items_in_same_thread(&model, root, b), vec![b, c]);
        assert_eq!(find_list_items_in_same_thread(&model, root, c), vec![b, c]);
    }

    #[test]
    fn deeper_override_does_not_split_outer_thread() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = item(&mut model, root, &[OL]);
        let b = model.append(
            root,
            ListItem::new(vec![
                ListLevel::new(OL),
                ListLevel::new(OL).with_start_number(1),
            ]),
        );
        let c = item(&mut model, root, &[OL]);
        assert_eq!(find_list_items_in_same_thread(&model, root, a), vec![a, b, c]);
    }

    #[test]
    fn ordered_thread_crosses_quote_and_table() {
        let mut model = ContentModel::new();
        let root = model.root();
        let quote = model.append(
            root,
            FormatContainer::new(ContainerTag::Blockquote, BlockFormat::default()),
        );
        let a = item(&mut model, quote, &[OL]);
        let cell = model.add(TableCell::default());
        model.append(cell, Paragraph::new());
        model.append(
            root,
            Table {
                rows: vec![TableRow {
                    cells: vec![cell],
                    ..Default::default()
                }],
                ..Default::default()
            },
        );
        let b = item(&mut model, root, &[OL]);
        assert_eq!(find_list_items_in_same_thread(&model, root, b), vec![a, b]);
    }

    #[test]
    fn thread_membership_is_symmetric() {
        let mut model = ContentModel::new();
        let root = model.root();
        let items = [
            item(&mut model, root, &[OL]),
            item(&mut model, root, &[OL, OL]),
            item(&mut model, root, &[OL]),
            item(&mut model, root, &[UL]),
            item(&mut model, root, &[UL]),
        ];
        for a in items {
            for b in find_list_items_in_same_thread(&model, root, a) {
                assert!(
                    find_list_items_in_same_thread(&model, root, b).contains(&a),
                    "{a:?} and {b:?} disagree on their thread"
                );
            }
        }
    }
}
