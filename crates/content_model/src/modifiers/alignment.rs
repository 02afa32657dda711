// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::model::{Alignment, ContentModel, GroupType, Node};
use crate::selection::get_operational_blocks;

use super::split_selected_paragraph_by_br;

/// Align the selected blocks.
///
/// Paragraphs and list items store a logical `text-align` resolved against
/// their own direction. Tables are positioned with their side margins,
/// which `justify` does not apply to.
pub fn set_model_alignment(model: &mut ContentModel, alignment: Alignment) -> bool {
    split_selected_paragraph_by_br(model);

    let blocks =
        get_operational_blocks(model, &[GroupType::ListItem], &[GroupType::TableCell], false);

    for op in &blocks {
        let Some(node) = model.get_mut(op.block) else {
            continue;
        };
        match &mut *node {
            Node::Table(table) => {
                let (left, right) = match alignment {
                    Alignment::Left => (None, Some("auto")),
                    Alignment::Center => (Some("auto"), Some("auto")),
                    Alignment::Right => (Some("auto"), None),
                    Alignment::Justify => continue,
                };
                table.format.margin_left = left.map(str::to_owned);
                table.format.margin_right = right.map(str::to_owned);
            }
            Node::ListItem(list_item) => {
                let text_align = alignment.to_text_align(
                    list_item.format.direction.unwrap_or_default(),
                );
                list_item.format.text_align = Some(text_align);
                if let Some(level) = list_item.last_level_mut() {
                    level.format.text_align = Some(text_align);
                }
            }
            other => {
                if let Some(format) = other.format_mut() {
                    format.text_align =
                        Some(alignment.to_text_align(format.direction.unwrap_or_default()));
                }
            }
        }
        node.invalidate();
        model.invalidate_table_cells(&op.path);
    }

    !blocks.is_empty()
}
