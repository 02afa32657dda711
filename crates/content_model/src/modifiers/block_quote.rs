// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use tracing::debug;

use crate::model::{BlockFormat, ContainerTag, ContentModel, FormatContainer, GroupType, NodeId};
use crate::selection::get_operational_blocks;

use super::split_selected_paragraph_by_br;
use super::wrap_block::{unwrap_block, wrap_block_step1, wrap_block_step2};

/// Wrap the selected blocks in block quotes, or unwrap them when every
/// selected block already is in one.
///
/// A wrapped block gets `format_rtl` when it is right to left and
/// `format_ltr` otherwise. Neighbouring quotes with the same format are
/// merged. Returns whether the selection touched any block.
pub fn toggle_model_block_quote(
    model: &mut ContentModel,
    format_ltr: &BlockFormat,
    format_rtl: &BlockFormat,
) -> bool {
    split_selected_paragraph_by_br(model);

    let blocks = get_operational_blocks(
        model,
        &[GroupType::FormatContainer, GroupType::ListItem],
        &[GroupType::TableCell],
        true,
    );
    let all_quotes = blocks.iter().all(|op| is_quote(model, op.block));

    debug!(
        target: "content_model.quote",
        blocks = blocks.len(),
        unwrap = all_quotes,
        "toggle block quote"
    );

    for op in &blocks {
        model.invalidate_table_cells(&op.path);
    }

    if all_quotes {
        for op in &blocks {
            unwrap_block(model, op.parent, op.block);
        }
    } else {
        let mut results = Vec::new();
        for op in &blocks {
            if is_quote(model, op.block) {
                continue;
            }
            let format = if model.block_format(op.block).is_some_and(BlockFormat::is_rtl) {
                format_rtl
            } else {
                format_ltr
            };
            wrap_block_step1(
                model,
                &mut results,
                op.parent,
                op.block,
                |_| FormatContainer::new(ContainerTag::Blockquote, format.clone()),
                |model, candidate| {
                    model
                        .format_container(candidate)
                        .is_some_and(|fc| fc.is_quote() && fc.format == *format)
                },
            );
        }
        wrap_block_step2(model, &results);
    }

    !blocks.is_empty()
}

fn is_quote(model: &ContentModel, block: NodeId) -> bool {
    model.format_container(block).is_some_and(FormatContainer::is_quote)
}
