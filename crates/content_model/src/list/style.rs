// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! List style resolution and thread-wide style mutators.

use std::str::FromStr;

use tracing::debug;

use crate::model::{
    BulletListType, ContentModel, ListMetadata, ListType, NumberingListType,
};
use crate::selection::get_first_selected_list_item;

use super::find_list_items_in_same_thread;

const ORDERED_BY_DEPTH: [NumberingListType; 3] = [
    NumberingListType::Decimal,
    NumberingListType::LowerAlpha,
    NumberingListType::LowerRoman,
];

const BULLET_BY_DEPTH: [BulletListType; 3] = [
    BulletListType::Disc,
    BulletListType::Circle,
    BulletListType::Square,
];

/// The marker style a level renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoListStyle {
    Numbering(NumberingListType),
    Bullet(BulletListType),
}

/// Resolve the marker style of a level at `depth` (0 based).
///
/// An explicit style in `metadata` wins. Otherwise a level flagged to apply
/// its style from the level cycles through the styles by depth. A level
/// with an explicit CSS `list-style-type` keeps it when it is one we know;
/// anything else (including `none`) has no visible marker and gives `None`.
pub fn get_auto_list_style_type(
    list_type: ListType,
    metadata: &ListMetadata,
    depth: usize,
    existing_style_type: Option<&str>,
) -> Option<AutoListStyle> {
    match list_type {
        ListType::Ordered => {
            if let Some(style) = metadata.ordered_style_type {
                Some(AutoListStyle::Numbering(style))
            } else if metadata.applies_style_from_level() {
                Some(AutoListStyle::Numbering(ORDERED_BY_DEPTH[depth % 3]))
            } else if let Some(existing) = existing_style_type {
                NumberingListType::from_str(existing)
                    .ok()
                    .map(AutoListStyle::Numbering)
            } else {
                Some(AutoListStyle::Numbering(NumberingListType::Decimal))
            }
        }
        ListType::Unordered => {
            if let Some(style) = metadata.unordered_style_type {
                Some(AutoListStyle::Bullet(style))
            } else if metadata.applies_style_from_level() {
                Some(AutoListStyle::Bullet(BULLET_BY_DEPTH[depth % 3]))
            } else if let Some(existing) = existing_style_type {
                BulletListType::from_str(existing)
                    .ok()
                    .map(AutoListStyle::Bullet)
            } else {
                Some(AutoListStyle::Bullet(BulletListType::Disc))
            }
        }
    }
}

/// Render `number` in the given numbering style.
pub fn get_ordered_list_number_str(style: NumberingListType, number: u32) -> String {
    match style {
        NumberingListType::Decimal => number.to_string(),
        NumberingListType::LowerAlpha => to_alpha(number).to_lowercase(),
        NumberingListType::UpperAlpha => to_alpha(number),
        NumberingListType::LowerRoman => to_roman(number).to_lowercase(),
        NumberingListType::UpperRoman => to_roman(number),
    }
}

/// 1 → A, 26 → Z, 27 → AA.
fn to_alpha(mut number: u32) -> String {
    let mut result = Vec::new();
    while number > 0 {
        number -= 1;
        result.push(char::from(b'A' + (number % 26) as u8));
        number /= 26;
    }
    result.iter().rev().collect()
}

fn to_roman(mut number: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut result = String::new();
    for (value, symbol) in TABLE {
        while number >= value {
            result.push_str(symbol);
            number -= value;
        }
    }
    result
}

/// Merge `style` into the metadata of every item in the thread of the first
/// selected list item, at that item's depth. Returns whether a list item
/// was selected.
pub fn set_model_list_style(model: &mut ContentModel, style: &ListMetadata) -> bool {
    let Some(item) = get_first_selected_list_item(model) else {
        return false;
    };
    let Some(level_index) = model
        .list_item(item)
        .and_then(|li| li.levels.len().checked_sub(1))
    else {
        return true;
    };
    let thread = find_list_items_in_same_thread(model, model.root(), item);
    debug!(
        target: "content_model.list",
        items = thread.len(),
        level_index,
        "set list style"
    );
    for member in thread {
        if let Some(list_item) = model.list_item_mut(member) {
            if let Some(level) = list_item.levels.get_mut(level_index) {
                level.update_metadata(|metadata| metadata.merge(style));
                list_item.cached_element = None;
            }
        }
    }
    true
}

/// Restart numbering at `value` on the deepest level of the first selected
/// list item.
pub fn set_model_list_start_number(model: &mut ContentModel, value: u32) -> bool {
    let Some(item) = get_first_selected_list_item(model) else {
        return false;
    };
    if let Some(list_item) = model.list_item_mut(item) {
        if let Some(level) = list_item.last_level_mut() {
            level.format.start_number_override = Some(value);
            list_item.cached_element = None;
        }
    }
    true
}
