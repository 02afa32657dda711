// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Cleanup pass run after structural mutations.

use crate::model::{ContentModel, Node, NodeId, Segment};

/// Tidy the tree bottom-up.
///
/// Inside paragraphs: drop empty unselected text, merge neighbouring text
/// that looks the same and drop a trailing line break that follows other
/// content (carets do not count). Then remove paragraphs left without segments (unless they are
/// the only block of their group), list items and format containers left
/// without blocks, and tables without rows. A list item that lost all of
/// its levels is replaced by its blocks.
pub fn normalize_content_model(model: &mut ContentModel) {
    normalize_group(model, model.root());
}

fn normalize_group(model: &mut ContentModel, group: NodeId) {
    let blocks = model.blocks_of(group).to_vec();
    for &block in &blocks {
        normalize_block(model, block);
    }

    let only_child = blocks.len() == 1;
    let mut kept: Vec<NodeId> = Vec::with_capacity(blocks.len());
    for &block in &blocks {
        if let Some(list_item) = model.list_item(block) {
            if list_item.levels.is_empty() && !list_item.blocks.is_empty() {
                kept.extend_from_slice(&list_item.blocks);
                continue;
            }
        }
        if !is_removable(model, block, only_child) {
            kept.push(block);
        }
    }
    if kept != blocks {
        if let Some(children) = model.blocks_of_mut(group) {
            *children = kept;
        }
        model.invalidate(group);
    }
}

fn normalize_block(model: &mut ContentModel, block: NodeId) {
    let general_segments: Vec<NodeId> = match model.get(block) {
        Some(Node::Paragraph(p)) => p
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::General(g) => Some(g.node),
                _ => None,
            })
            .collect(),
        Some(Node::Table(t)) => t.cells().collect(),
        Some(node) if node.group_type().is_some() => vec![block],
        _ => Vec::new(),
    };
    for group in general_segments {
        normalize_group(model, group);
    }

    if let Some(paragraph) = model.paragraph_mut(block) {
        let before = paragraph.segments.len();
        normalize_segments(&mut paragraph.segments);
        if paragraph.segments.len() != before {
            paragraph.cached_element = None;
        }
    }
}

fn normalize_segments(segments: &mut Vec<Segment>) {
    segments.retain(|s| match s {
        Segment::Text(t) => !t.text.is_empty() || t.is_selected,
        _ => true,
    });

    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments.drain(..) {
        if let (Some(Segment::Text(previous)), Segment::Text(next)) =
            (merged.last_mut(), &segment)
        {
            if previous.format == next.format && previous.is_selected == next.is_selected {
                previous.text.push_str(&next.text);
                continue;
            }
        }
        merged.push(segment);
    }
    *segments = merged;

    if segments.last().is_some_and(Segment::is_br) {
        let before_br = segments[..segments.len() - 1]
            .iter()
            .rev()
            .find(|s| !s.is_marker());
        if before_br.is_some_and(|s| !s.is_br()) {
            segments.pop();
        }
    }
}

fn is_removable(model: &ContentModel, block: NodeId, only_child: bool) -> bool {
    match model.get(block) {
        Some(Node::Paragraph(p)) => p.segments.is_empty() && !only_child,
        Some(Node::ListItem(li)) => li.blocks.is_empty(),
        Some(Node::FormatContainer(fc)) => fc.blocks.is_empty(),
        Some(Node::Table(t)) => t.rows.is_empty(),
        _ => false,
    }
}
