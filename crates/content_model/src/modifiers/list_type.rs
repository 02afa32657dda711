// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use crate::model::{
    ContentModel, GroupType, ListItem, ListLevel, ListLevelFormat, ListType, Node, NodeId,
};
use crate::selection::get_operational_blocks;

use super::normalize::normalize_content_model;
use super::split_selected_paragraph_by_br;
use super::wrap_block::set_paragraph_not_implicit;

/// Turn the selected blocks into a list of `list_type`, or turn the list
/// off when every selected block already is one.
///
/// List items inside table cells are handled too. Returns whether the
/// selection touched any block.
pub fn set_list_type(
    model: &mut ContentModel,
    list_type: ListType,
    remove_margins: bool,
) -> bool {
    split_selected_paragraph_by_br(model);

    let blocks = get_operational_blocks(model, &[GroupType::ListItem], &[], false);
    let already_in_type = blocks.iter().all(|op| match model.list_item(op.block) {
        Some(item) => item.last_level().map(|l| l.list_type) == Some(list_type),
        None => should_ignore_block(model, op.block),
    });

    debug!(
        target: "content_model.list",
        %list_type,
        blocks = blocks.len(),
        turn_off = already_in_type,
        "set list type"
    );

    let mut current_run: Vec<NodeId> = Vec::new();

    for (op_index, op) in blocks.iter().enumerate() {
        model.invalidate_table_cells(&op.path);
        if model.is_list_item(op.block) {
            toggle_existing_item(model, op.block, list_type, already_in_type);
            continue;
        }

        let Some(index) = model.index_in(op.parent, op.block) else {
            continue;
        };
        if blocks.len() > 1 && should_ignore_block(model, op.block) {
            for item in current_run.drain(..) {
                if let Some(level) = model
                    .list_item_mut(item)
                    .and_then(|li| li.levels.first_mut())
                {
                    level.format.margin_bottom = Some("0px".to_owned());
                }
            }
            continue;
        }

        let previous_is_ordered_item = index
            .checked_sub(1)
            .and_then(|i| model.blocks_of(op.parent).get(i).copied())
            .and_then(|prev| model.list_item(prev))
            .and_then(|li| li.levels.first())
            .is_some_and(|level| level.list_type == ListType::Ordered);
        let start_number = (op_index == 0 && !previous_is_ordered_item).then_some(1);

        if let Some(item) = wrap_in_list_item(
            model,
            op.parent,
            op.block,
            list_type,
            start_number,
            remove_margins,
        ) {
            current_run.push(item);
        }
    }

    normalize_content_model(model);
    !blocks.is_empty()
}

fn toggle_existing_item(
    model: &mut ContentModel,
    item: NodeId,
    list_type: ListType,
    already_in_type: bool,
) {
    let Some(list_item) = model.list_item_mut(item) else {
        return;
    };
    let level = list_item.levels.pop();
    list_item.cached_element = None;

    match level {
        Some(mut level) if !already_in_type => {
            level.list_type = list_type;
            list_item.levels.push(level);
            return;
        }
        // outdented out of its list: it renders as plain blocks
        None if !already_in_type => {
            let mut level = ListLevel::new(list_type);
            level.update_metadata(|metadata| metadata.apply_list_style_from_level = Some(true));
            list_item.levels.push(level);
            return;
        }
        _ => {}
    }

    let children = list_item.blocks.clone();
    let moved = list_item.format.clone();
    if let [only] = children.as_slice() {
        set_paragraph_not_implicit(model, *only);
    }
    for child in children {
        if let Some(format) = model.block_format_mut(child) {
            if moved.margin_left.is_some() {
                format.margin_left = moved.margin_left.clone();
            }
            if moved.margin_right.is_some() {
                format.margin_right = moved.margin_right.clone();
            }
            if moved.text_align.is_some() {
                format.text_align = moved.text_align;
            }
        }
        model.invalidate(child);
    }
}

fn wrap_in_list_item(
    model: &mut ContentModel,
    parent: NodeId,
    block: NodeId,
    list_type: ListType,
    start_number: Option<u32>,
    remove_margins: bool,
) -> Option<NodeId> {
    let block_format = model.block_format(block).cloned().unwrap_or_default();
    let zero = remove_margins.then(|| "0px".to_owned());
    let mut level = ListLevel::new(list_type).with_format(ListLevelFormat {
        start_number_override: start_number,
        direction: block_format.direction,
        text_align: block_format.text_align,
        margin_top: zero.clone(),
        margin_bottom: zero,
        ..Default::default()
    });
    level.update_metadata(|metadata| metadata.apply_list_style_from_level = Some(true));

    let mut list_item = ListItem::new(vec![level]);
    if let Some(first) = model.paragraph(block).and_then(|p| p.segments.first()) {
        list_item.format_holder.format = first.format().marker_subset();
    }
    list_item.format.margin_left = block_format.margin_left.clone();
    list_item.format.margin_right = block_format.margin_right.clone();
    list_item.format.text_align = block_format.text_align;
    list_item.blocks.push(block);

    if let Some(format) = model.block_format_mut(block) {
        format.margin_left = None;
        format.margin_right = None;
        format.text_align = None;
    }
    if let Some(paragraph) = model.paragraph_mut(block) {
        paragraph.is_implicit = true;
    }
    model.invalidate(block);

    let item = model.add(list_item);
    model.replace_child(parent, block, vec![item]).then_some(item)
}

/// Tables and paragraphs holding only breaks and carets do not become list
/// items on their own when other blocks are selected with them.
fn should_ignore_block(model: &ContentModel, block: NodeId) -> bool {
    match model.get(block) {
        Some(Node::Table(_)) => true,
        Some(Node::Paragraph(p)) => p.is_structurally_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use speculoos::prelude::*;

    use super::*;
    use crate::model::{
        BlockFormat, CachedElement, Direction, Paragraph, Segment, SegmentFormat, SegmentType,
        Table, TableCell, TableRow, TextAlign,
    };

    fn selected_paragraph(text: &str) -> Paragraph {
        Paragraph::new().with_segment(Segment::text(text).selected())
    }

    fn single_item(model: &ContentModel) -> &ListItem {
        let blocks = model.blocks_of(model.root());
        assert_eq!(blocks.len(), 1);
        model.list_item(blocks[0]).unwrap()
    }

    #[test]
    fn wraps_selected_paragraph() {
        let mut model = ContentModel::new();
        let root = model.root();
        model.append(root, selected_paragraph("a"));
        assert!(set_list_type(&mut model, ListType::Ordered, false));
        assert_eq!(
            model.to_tree(),
            indoc! {
            r#"
            
            └>li OL(1)
              └>p(implicit)
                └>"a"*
            "#}
        );
        let level = &single_item(&model).levels[0];
        assert!(level.metadata.as_ref().unwrap().applies_style_from_level());
    }

    #[test]
    fn toggle_alternates_on_and_off() {
        let mut model = ContentModel::new();
        let root = model.root();
        model.append(root, selected_paragraph("a"));

        set_list_type(&mut model, ListType::Ordered, false);
        assert_that!(single_item(&model).levels).has_length(1);

        set_list_type(&mut model, ListType::Ordered, false);
        let blocks = model.blocks_of(root).to_vec();
        assert_eq!(blocks.len(), 1);
        let paragraph = model.paragraph(blocks[0]).unwrap();
        assert!(!paragraph.is_implicit);

        set_list_type(&mut model, ListType::Ordered, false);
        assert_eq!(
            single_item(&model).levels[0].format.start_number_override,
            Some(1)
        );
    }

    #[test]
    fn changes_type_of_existing_item() {
        let mut model = ContentModel::new();
        let root = model.root();
        let item = model.append(root, ListItem::new(vec![ListLevel::new(ListType::Ordered)]));
        model.append(item, selected_paragraph("a"));
        set_list_type(&mut model, ListType::Unordered, false);
        assert_eq!(
            model.list_item(item).unwrap().levels[0].list_type,
            ListType::Unordered
        );
    }

    #[test]
    fn continues_numbering_after_ordered_item() {
        let mut model = ContentModel::new();
        let root = model.root();
        let item = model.append(root, ListItem::new(vec![ListLevel::new(ListType::Ordered)]));
        model.append(item, Paragraph::new().with_segment(Segment::text("a")));
        model.append(root, selected_paragraph("b"));
        set_list_type(&mut model, ListType::Ordered, false);
        let blocks = model.blocks_of(root).to_vec();
        let created = model.list_item(blocks[1]).unwrap();
        assert_eq!(created.levels[0].format.start_number_override, None);
    }

    #[test]
    fn moves_margins_and_alignment_to_item() {
        let mut model = ContentModel::new();
        let root = model.root();
        let para = model.append(
            root,
            selected_paragraph("a").with_format(BlockFormat {
                margin_left: Some("40px".into()),
                text_align: Some(TextAlign::Center),
                direction: Some(Direction::Rtl),
                ..Default::default()
            }),
        );
        set_list_type(&mut model, ListType::Unordered, true);

        let item = single_item(&model);
        assert_eq!(item.format.margin_left.as_deref(), Some("40px"));
        assert_eq!(item.format.text_align, Some(TextAlign::Center));
        let level = &item.levels[0].format;
        assert_eq!(level.direction, Some(Direction::Rtl));
        assert_eq!(level.margin_top.as_deref(), Some("0px"));
        assert_eq!(level.margin_bottom.as_deref(), Some("0px"));
        let format = model.block_format(para).unwrap();
        assert_eq!(format.margin_left, None);
        assert_eq!(format.text_align, None);
    }

    #[test]
    fn turning_off_restores_item_format_on_children() {
        let mut model = ContentModel::new();
        let root = model.root();
        let mut list_item = ListItem::new(vec![ListLevel::new(ListType::Unordered)]);
        list_item.format.margin_left = Some("80px".into());
        let item = model.append(root, list_item);
        let para = model.append(item, selected_paragraph("a"));
        set_list_type(&mut model, ListType::Unordered, false);
        assert_eq!(model.blocks_of(root), &[para]);
        assert_eq!(
            model.block_format(para).unwrap().margin_left.as_deref(),
            Some("80px")
        );
    }

    #[test]
    fn seeds_format_holder_from_first_segment() {
        let mut model = ContentModel::new();
        let root = model.root();
        model.append(
            root,
            Paragraph::new().with_segment(
                Segment::text("a")
                    .selected()
                    .with_format(SegmentFormat {
                        font_size: Some("20px".into()),
                        italic: Some(true),
                        ..Default::default()
                    }),
            ),
        );
        set_list_type(&mut model, ListType::Ordered, false);
        let holder = &single_item(&model).format_holder.format;
        assert_eq!(holder.font_size.as_deref(), Some("20px"));
        assert_eq!(holder.italic, None);
    }

    #[test]
    fn empty_lines_between_paragraphs_are_skipped() {
        let mut model = ContentModel::new();
        let root = model.root();
        model.append(root, selected_paragraph("a"));
        model.append(root, Paragraph::new().with_segment(Segment::br().selected()));
        model.append(root, selected_paragraph("b"));
        set_list_type(&mut model, ListType::Unordered, false);

        let blocks = model.blocks_of(root).to_vec();
        assert_eq!(blocks.len(), 3);
        let first = model.list_item(blocks[0]).unwrap();
        assert_eq!(first.levels[0].format.margin_bottom.as_deref(), Some("0px"));
        assert!(model.paragraph(blocks[1]).is_some());
        assert!(model.list_item(blocks[2]).is_some());
    }

    #[test]
    fn lone_empty_paragraph_becomes_list_item() {
        let mut model = ContentModel::new();
        let root = model.root();
        model.append(root, Paragraph::new().with_segments([Segment::marker(), Segment::br()]));
        assert!(set_list_type(&mut model, ListType::Unordered, false));
        let item = single_item(&model);
        assert_that!(item.levels).has_length(1);
        let segments: Vec<SegmentType> = model
            .paragraph(item.blocks[0])
            .unwrap()
            .segments
            .iter()
            .map(Segment::segment_type)
            .collect();
        assert_eq!(segments, vec![SegmentType::SelectionMarker, SegmentType::Br]);
    }

    #[test]
    fn item_without_levels_gets_a_fresh_level() {
        let mut model = ContentModel::new();
        let root = model.root();
        let first = model.append(root, ListItem::new(vec![ListLevel::new(ListType::Ordered)]));
        model.append(first, Paragraph::new().with_segment(Segment::text("a")));
        let outdented = model.append(root, ListItem::new(vec![]));
        model.append(outdented, selected_paragraph("b"));

        assert!(set_list_type(&mut model, ListType::Ordered, false));
        assert_eq!(model.blocks_of(root)[1], outdented);
        let levels = &model.list_item(outdented).unwrap().levels;
        assert_that!(levels).has_length(1);
        assert_eq!(levels[0].list_type, ListType::Ordered);
    }

    #[test]
    fn list_items_inside_table_cells_are_handled() {
        let mut model = ContentModel::new();
        let root = model.root();
        let cell = model.add(TableCell {
            cached_element: Some(CachedElement(9)),
            ..Default::default()
        });
        model.append(cell, selected_paragraph("a"));
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
        set_list_type(&mut model, ListType::Ordered, false);
        let cell_blocks = model.blocks_of(cell);
        assert!(model.is_list_item(cell_blocks[0]));
        assert_eq!(model.table_cell(cell).unwrap().cached_element, None);
    }
}
