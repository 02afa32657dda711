// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::model::{ContentModel, GroupType, NodeId};

use super::collect_selected_blocks;

/// A block a command should operate on.
///
/// `block` is either a selected leaf block or the closest ancestor group of
/// an interesting type. `parent` is the group holding `block` and `path`
/// holds the ancestors of `block`, innermost (`parent`) first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationalBlock {
    pub block: NodeId,
    pub parent: NodeId,
    pub path: Vec<NodeId>,
}

/// Resolve the selection to the blocks a command operates on.
///
/// For each selected leaf block, the closest ancestor group whose type is in
/// `group_types` replaces the leaf, unless a group of a type in
/// `stop_types` is met first. When `deep_first` is set, each type in
/// `group_types` is tried in order before falling back to the leaf, so an
/// inner container of the first type wins over an outer one of the second.
/// Each block is reported once, in document order of first appearance.
pub fn get_operational_blocks(
    model: &ContentModel,
    group_types: &[GroupType],
    stop_types: &[GroupType],
    deep_first: bool,
) -> Vec<OperationalBlock> {
    let sequences: Vec<Vec<GroupType>> = if deep_first {
        group_types.iter().map(|t| vec![*t]).collect()
    } else {
        vec![group_types.to_vec()]
    };
    let mut result: Vec<OperationalBlock> = Vec::new();

    for selection in collect_selected_blocks(model) {
        let mut found = None;
        for sequence in &sequences {
            if let Some(index) =
                closest_ancestor_index(model, &selection.path, sequence, stop_types)
            {
                found = Some(index);
                break;
            }
        }
        let candidate = match found {
            Some(index) if index + 1 < selection.path.len() => OperationalBlock {
                block: selection.path[index],
                parent: selection.path[index + 1],
                path: selection.path[index + 1..].to_vec(),
            },
            Some(_) => continue,
            None => OperationalBlock {
                block: selection.block,
                parent: selection.parent(),
                path: selection.path.clone(),
            },
        };
        if !result.iter().any(|r| r.block == candidate.block) {
            result.push(candidate);
        }
    }
    result
}

/// Index in `path` of the closest group of one of `types`, or `None` when
/// none exists or a group of `stop_types` comes first.
pub(crate) fn closest_ancestor_index(
    model: &ContentModel,
    path: &[NodeId],
    types: &[GroupType],
    stop_types: &[GroupType],
) -> Option<usize> {
    for (index, group) in path.iter().enumerate() {
        let group_type = model.group_type(*group)?;
        if types.contains(&group_type) {
            return Some(index);
        }
        if stop_types.contains(&group_type) {
            return None;
        }
    }
    None
}

/// The first list item touched by the selection, not crossing table cells.
pub fn get_first_selected_list_item(model: &ContentModel) -> Option<NodeId> {
    get_operational_blocks(
        model,
        &[GroupType::ListItem],
        &[GroupType::TableCell],
        false,
    )
    .into_iter()
    .map(|op| op.block)
    .find(|block| model.is_list_item(*block))
}
