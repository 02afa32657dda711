// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Structured screen-reader announcements for list items. Only the data is
//! produced here; turning it into localized text is up to the host.

use strum_macros::{AsRefStr, Display};

use crate::model::{ContentModel, GroupType, ListType, NodeId};
use crate::selection::closest_ancestor_index;

use super::style::{get_auto_list_style_type, get_ordered_list_number_str, AutoListStyle};
use super::find_list_items_in_same_thread;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum AnnounceString {
    AnnounceListItemBullet,
    AnnounceListItemNumbering,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnounceData {
    pub default_strings: AnnounceString,
    pub format_strings: Vec<String>,
}

impl AnnounceData {
    fn bullet() -> Self {
        Self {
            default_strings: AnnounceString::AnnounceListItemBullet,
            format_strings: Vec::new(),
        }
    }
}

/// Announcement for the closest list item in `path` (innermost first,
/// the item itself may be the first entry). `None` when there is no list
/// item, the item is a dummy, or its numbering is invisible.
pub fn get_list_announce_data(
    model: &ContentModel,
    path: &[NodeId],
) -> Option<AnnounceData> {
    let index =
        closest_ancestor_index(model, path, &[GroupType::ListItem], &[GroupType::TableCell])?;
    let item_id = path[index];
    let item = model.list_item(item_id)?;
    let level = item.last_level()?;

    if level.format.is_dummy() {
        return None;
    }

    match level.list_type {
        ListType::Unordered => Some(AnnounceData::bullet()),
        ListType::Ordered => {
            let metadata = level.metadata.clone().unwrap_or_default();
            let style = get_auto_list_style_type(
                ListType::Ordered,
                &metadata,
                item.levels.len() - 1,
                level.format.list_style_type.as_deref(),
            )?;
            let AutoListStyle::Numbering(numbering) = style else {
                return None;
            };
            let root = path.last().copied().unwrap_or_else(|| model.root());
            let number = get_list_number(model, root, item_id);
            Some(AnnounceData {
                default_strings: AnnounceString::AnnounceListItemNumbering,
                format_strings: vec![get_ordered_list_number_str(numbering, number)],
            })
        }
    }
}

/// The number rendered for `item` within its thread under `root`.
///
/// Items nested deeper than `item` are skipped. A shallower item resets the
/// count, dummy items are not counted and a start number override seeds it.
/// An item without levels is not numbered and gets 0.
pub fn get_list_number(model: &ContentModel, root: NodeId, item: NodeId) -> u32 {
    let Some(depth) = model
        .list_item(item)
        .map(|li| li.levels.len())
        .filter(|depth| *depth > 0)
    else {
        return 0;
    };
    let mut number = 0;

    for member in find_list_items_in_same_thread(model, root, item) {
        let Some(current) = model.list_item(member) else {
            continue;
        };
        let current_depth = current.levels.len();

        if number == 0 && current_depth == depth {
            number = current.levels[depth - 1]
                .format
                .start_number_override
                .unwrap_or(1);
        } else if current_depth == depth {
            if let Some(start) = current.levels[depth - 1].format.start_number_override {
                number = start;
            }
        }

        if member == item {
            return number;
        }

        if current_depth < depth {
            number = 0;
        } else if current_depth == depth
            && !current.levels[depth - 1].format.is_dummy()
        {
            number += 1;
        }
    }
    number
}
