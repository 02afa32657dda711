// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use crate::editor::FormatContentModelContext;
use crate::list::{find_list_items_in_same_thread, get_list_announce_data};
use crate::model::css::{parse_value_with_unit, to_px};
use crate::model::{
    ContentModel, GroupType, IndentDirection, ListLevel, ListType, Node, NodeId, Side,
};
use crate::selection::get_operational_blocks;

use super::split_selected_paragraph_by_br;

/// Indent or outdent the selected blocks by `step_px`.
///
/// List items move between levels, or shift the whole list when the
/// selection starts at the first item of a single level list. Other blocks
/// change their start margin, climbing through enclosing format containers
/// when the block itself cannot move any further. Returns whether the
/// selection touched any block, even if no value changed.
pub fn set_model_indentation(
    model: &mut ContentModel,
    direction: IndentDirection,
    step_px: f64,
    mut context: Option<&mut FormatContentModelContext>,
) -> bool {
    split_selected_paragraph_by_br(model);

    let is_indent = direction == IndentDirection::Indent;
    let blocks =
        get_operational_blocks(model, &[GroupType::ListItem], &[GroupType::TableCell], false);
    let mut modified: Vec<NodeId> = Vec::new();

    debug!(
        target: "content_model.indent",
        %direction,
        blocks = blocks.len(),
        "set indentation"
    );

    for op in &blocks {
        if model.is_list_item(op.block) {
            indent_list_item(model, op.block, op.parent, &op.path, is_indent, step_px, &mut context);
        } else {
            indent_block(model, op.block, op.parent, &op.path, is_indent, step_px, &mut modified);
        }
        model.invalidate_table_cells(&op.path);
    }

    !blocks.is_empty()
}

fn indent_list_item(
    model: &mut ContentModel,
    item: NodeId,
    parent: NodeId,
    path: &[NodeId],
    is_indent: bool,
    step_px: f64,
    context: &mut Option<&mut FormatContentModelContext>,
) {
    let thread = find_list_items_in_same_thread(model, model.root(), item);
    let first_item = thread.first().copied();
    let whole_list = first_item.is_some_and(|first| {
        is_group_selected(model, first)
            && model.list_item(first).is_some_and(|li| li.levels.len() == 1)
    });

    if whole_list {
        let Some(list_item) = model.list_item_mut(item) else {
            return;
        };
        if list_item.levels.is_empty() {
            return;
        }
        let format = &list_item.levels[0].format;
        let side = Side::start_of(format.direction);
        let original = parse_value_with_unit(format.margin(side));
        if !is_indent && original == 0.0 {
            list_item.levels.pop();
        } else if let Some(value) =
            calculate_margin_value(format.margin(side), is_indent, step_px)
        {
            *list_item.levels[0].format.margin_mut(side) = Some(to_px(value));
        }
        list_item.cached_element = None;
        return;
    }

    let single_level = model.list_item(item).is_some_and(|li| li.levels.len() == 1);
    if !single_level && is_multilevel_selection(model, item, parent) {
        return;
    }

    let Some(list_item) = model.list_item_mut(item) else {
        return;
    };
    if is_indent {
        let mut level = match list_item.last_level() {
            Some(last) => ListLevel::new(last.list_type).with_format(last.format.clone()),
            None => ListLevel::new(ListType::Unordered),
        };
        level.update_metadata(|metadata| metadata.apply_list_style_from_level = Some(true));
        level.format.start_number_override = None;
        list_item.levels.push(level);
    } else {
        list_item.levels.pop();
    }
    list_item.cached_element = None;
    let has_levels = !list_item.levels.is_empty();

    if !has_levels {
        return;
    }
    if let Some(context) = context.as_deref_mut() {
        let mut announce_path = Vec::with_capacity(path.len() + 1);
        announce_path.push(item);
        announce_path.extend_from_slice(path);
        context.announce_data = get_list_announce_data(model, &announce_path);
    }
}

fn indent_block(
    model: &mut ContentModel,
    block: NodeId,
    parent: NodeId,
    path: &[NodeId],
    is_indent: bool,
    step_px: f64,
    modified: &mut Vec<NodeId>,
) {
    let mut current_block = block;
    let mut current_parent = Some(parent);

    while let Some(parent) = current_parent {
        if modified.contains(&current_block) {
            break;
        }
        let Some(format) = model.block_format_mut(current_block) else {
            break;
        };
        let side = Side::start_of(format.direction);
        if let Some(value) = calculate_margin_value(format.margin(side), is_indent, step_px) {
            *format.margin_mut(side) = Some(to_px(value));
            model.invalidate(current_block);
            modified.push(current_block);
            break;
        }

        let index = path.iter().position(|p| *p == parent);
        match (model.group_type(parent), index) {
            (Some(GroupType::FormatContainer), Some(index)) => {
                model.invalidate(parent);
                current_block = parent;
                current_parent = path.get(index + 1).copied();
            }
            _ => break,
        }
    }
}

/// The new start margin after one step, or `None` when the margin would not
/// change (outdenting at zero).
///
/// Values between multiples of `step_px` snap to the next multiple in the
/// requested direction. The result never goes below zero.
pub fn calculate_margin_value(current: Option<&str>, is_indent: bool, step_px: f64) -> Option<f64> {
    let original = parse_value_with_unit(current);
    let ratio = original / step_px;
    let mut value = if is_indent { ratio.ceil() } else { ratio.floor() } * step_px;
    if value == original {
        let delta = if is_indent { step_px } else { -step_px };
        value = (value + delta).max(0.0);
    }
    (value != original).then_some(value)
}

/// Whether an earlier selected single level item among the previous
/// siblings starts a selection together with its thread's first item.
/// Only siblings before `item` are inspected, and any non list block ends
/// the search.
fn is_multilevel_selection(model: &ContentModel, item: NodeId, parent: NodeId) -> bool {
    let Some(index) = model.index_in(parent, item) else {
        return false;
    };
    for &sibling in model.blocks_of(parent)[..index].iter().rev() {
        let Some(list_item) = model.list_item(sibling) else {
            return false;
        };
        if list_item.levels.len() == 1 && is_group_selected(model, sibling) {
            return find_list_items_in_same_thread(model, model.root(), sibling)
                .first()
                .is_some_and(|first| is_group_selected(model, *first));
        }
    }
    false
}

/// Whether anything inside `group` is selected.
fn is_group_selected(model: &ContentModel, group: NodeId) -> bool {
    model.blocks_of(group).iter().any(|block| match model.get(*block) {
        Some(Node::Paragraph(p)) => p.has_selection(),
        Some(Node::Divider(d)) => d.is_selected,
        Some(Node::Entity(e)) => e.is_selected,
        Some(Node::Table(t)) => t.cells().any(|cell| {
            model.table_cell(cell).is_some_and(|c| c.is_selected)
                || is_group_selected(model, cell)
        }),
        Some(_) => is_group_selected(model, *block),
        None => false,
    })
}
