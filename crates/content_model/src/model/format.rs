// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Format records attached to blocks, segments and list levels.
//!
//! Values mirror CSS: lengths are strings carrying their unit (`"40px"`),
//! and `None` means the property is not set on the node.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Type of a list level.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum ListType {
    #[strum(serialize = "OL")]
    #[serde(rename = "OL")]
    Ordered,
    #[strum(serialize = "UL")]
    #[serde(rename = "UL")]
    Unordered,
}

/// Text direction of a block.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Logical text alignment as stored on a block. `Start` and `End` resolve
/// to a physical side through the block's [`Direction`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    Center,
    End,
    Justify,
}

/// Physical alignment requested by a command.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// The logical alignment to store on a block with the given direction.
    pub fn to_text_align(self, direction: Direction) -> TextAlign {
        match (self, direction) {
            (Alignment::Left, Direction::Ltr) => TextAlign::Start,
            (Alignment::Left, Direction::Rtl) => TextAlign::End,
            (Alignment::Right, Direction::Ltr) => TextAlign::End,
            (Alignment::Right, Direction::Rtl) => TextAlign::Start,
            (Alignment::Center, _) => TextAlign::Center,
            (Alignment::Justify, _) => TextAlign::Justify,
        }
    }
}

/// Direction of an indentation command.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum IndentDirection {
    Indent,
    Outdent,
}

/// A physical horizontal side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The side where content starts for the given direction.
    pub fn start_of(direction: Option<Direction>) -> Self {
        match direction {
            Some(Direction::Rtl) => Side::Right,
            _ => Side::Left,
        }
    }
}

/// Block level format: box model, direction and alignment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockFormat {
    pub margin_top: Option<String>,
    pub margin_right: Option<String>,
    pub margin_bottom: Option<String>,
    pub margin_left: Option<String>,
    pub padding_top: Option<String>,
    pub padding_right: Option<String>,
    pub padding_bottom: Option<String>,
    pub padding_left: Option<String>,
    pub border_top: Option<String>,
    pub border_right: Option<String>,
    pub border_bottom: Option<String>,
    pub border_left: Option<String>,
    pub direction: Option<Direction>,
    pub text_align: Option<TextAlign>,
    pub background_color: Option<String>,
    pub line_height: Option<String>,
}

impl BlockFormat {
    pub fn is_rtl(&self) -> bool {
        self.direction == Some(Direction::Rtl)
    }

    pub fn margin(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.margin_left.as_deref(),
            Side::Right => self.margin_right.as_deref(),
        }
    }

    pub fn margin_mut(&mut self, side: Side) -> &mut Option<String> {
        match side {
            Side::Left => &mut self.margin_left,
            Side::Right => &mut self.margin_right,
        }
    }

    /// Swap every left/right physical property.
    pub fn swap_sides(&mut self) {
        std::mem::swap(&mut self.margin_left, &mut self.margin_right);
        std::mem::swap(&mut self.padding_left, &mut self.padding_right);
    }
}

/// Inline format of a segment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentFormat {
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub font_weight: Option<String>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
}

impl SegmentFormat {
    pub fn is_empty(&self) -> bool {
        *self == SegmentFormat::default()
    }

    /// Returns `self` with every property set in `over` replaced by the
    /// value from `over`.
    pub fn merged_with(&self, over: &SegmentFormat) -> SegmentFormat {
        SegmentFormat {
            font_family: over
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            font_size: over.font_size.clone().or_else(|| self.font_size.clone()),
            text_color: over
                .text_color
                .clone()
                .or_else(|| self.text_color.clone()),
            background_color: over
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            font_weight: over
                .font_weight
                .clone()
                .or_else(|| self.font_weight.clone()),
            italic: over.italic.or(self.italic),
            underline: over.underline.or(self.underline),
            strikethrough: over.strikethrough.or(self.strikethrough),
        }
    }

    /// Only the font family, size and colour, used to seed list markers.
    pub fn marker_subset(&self) -> SegmentFormat {
        SegmentFormat {
            font_family: self.font_family.clone(),
            font_size: self.font_size.clone(),
            text_color: self.text_color.clone(),
            ..Default::default()
        }
    }
}

/// Format of one list level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListLevelFormat {
    pub margin_top: Option<String>,
    pub margin_right: Option<String>,
    pub margin_bottom: Option<String>,
    pub margin_left: Option<String>,
    pub padding_left: Option<String>,
    pub padding_right: Option<String>,
    pub direction: Option<Direction>,
    pub text_align: Option<TextAlign>,
    pub start_number_override: Option<u32>,
    pub list_style_type: Option<String>,
    pub display_for_dummy_item: Option<bool>,
}

impl ListLevelFormat {
    pub fn is_rtl(&self) -> bool {
        self.direction == Some(Direction::Rtl)
    }

    pub fn margin(&self, side: Side) -> Option<&str> {
        match side {
            Side::Left => self.margin_left.as_deref(),
            Side::Right => self.margin_right.as_deref(),
        }
    }

    pub fn margin_mut(&mut self, side: Side) -> &mut Option<String> {
        match side {
            Side::Left => &mut self.margin_left,
            Side::Right => &mut self.margin_right,
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.display_for_dummy_item.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn list_type_uses_tag_names() {
        assert_eq!(ListType::Ordered.to_string(), "OL");
        assert_eq!(ListType::from_str("UL").unwrap(), ListType::Unordered);
    }

    #[test]
    fn alignment_flips_under_rtl() {
        assert_eq!(
            Alignment::Left.to_text_align(Direction::Rtl),
            TextAlign::End
        );
        assert_eq!(
            Alignment::Right.to_text_align(Direction::Ltr),
            TextAlign::End
        );
        assert_eq!(
            Alignment::Center.to_text_align(Direction::Rtl),
            TextAlign::Center
        );
    }

    #[test]
    fn merged_format_prefers_override() {
        let base = SegmentFormat {
            font_size: Some("12px".into()),
            font_family: Some("Arial".into()),
            ..Default::default()
        };
        let over = SegmentFormat {
            font_size: Some("10px".into()),
            ..Default::default()
        };
        let merged = base.merged_with(&over);
        assert_eq!(merged.font_size.as_deref(), Some("10px"));
        assert_eq!(merged.font_family.as_deref(), Some("Arial"));
    }

    #[test]
    fn swap_sides_exchanges_margins_and_paddings() {
        let mut format = BlockFormat {
            margin_left: Some("40px".into()),
            padding_right: Some("4px".into()),
            ..Default::default()
        };
        format.swap_sides();
        assert_eq!(format.margin_left, None);
        assert_eq!(format.margin_right.as_deref(), Some("40px"));
        assert_eq!(format.padding_left.as_deref(), Some("4px"));
    }
}
