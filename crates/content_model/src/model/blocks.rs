// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Block and block group node payloads.

use strum_macros::{AsRefStr, Display, EnumString};

use super::format::{BlockFormat, ListLevelFormat, ListType, SegmentFormat};
use super::metadata::{ListMetadata, TableCellMetadata, TableMetadata};
use super::segments::{Segment, SelectionMarker};
use super::NodeId;

/// Opaque handle to a rendered DOM element reused while the node is
/// unchanged. Mutators drop it whenever the node must be re-rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CachedElement(pub u64);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<NodeId>,
}

/// Heading or other tag wrapping a paragraph's content.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphDecorator {
    pub tag_name: String,
    pub format: SegmentFormat,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paragraph {
    pub segments: Vec<Segment>,
    pub format: BlockFormat,
    pub segment_format: Option<SegmentFormat>,
    pub decorator: Option<ParagraphDecorator>,
    pub is_implicit: bool,
    pub cached_element: Option<CachedElement>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn implicit() -> Self {
        Self {
            is_implicit: true,
            ..Self::default()
        }
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn with_segments(
        mut self,
        segments: impl IntoIterator<Item = Segment>,
    ) -> Self {
        self.segments.extend(segments);
        self
    }

    pub fn with_format(mut self, format: BlockFormat) -> Self {
        self.format = format;
        self
    }

    /// An explicit, empty paragraph sharing this paragraph's formats.
    pub fn shallow_clone(&self) -> Self {
        Self {
            segments: Vec::new(),
            format: self.format.clone(),
            segment_format: self.segment_format.clone(),
            decorator: self.decorator.clone(),
            is_implicit: false,
            cached_element: None,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.segments.iter().any(Segment::is_selected)
    }

    /// Contains nothing but line breaks and carets.
    pub fn is_structurally_empty(&self) -> bool {
        self.segments.iter().all(|s| s.is_br() || s.is_marker())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<NodeId>,
    pub height: f64,
    pub format: BlockFormat,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<TableRow>,
    pub widths: Vec<f64>,
    pub format: BlockFormat,
    pub metadata: Option<TableMetadata>,
    pub cached_element: Option<CachedElement>,
}

impl Table {
    pub fn cells(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rows.iter().flat_map(|row| row.cells.iter().copied())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableCell {
    pub blocks: Vec<NodeId>,
    pub format: BlockFormat,
    pub span_left: bool,
    pub span_above: bool,
    pub is_header: bool,
    pub is_selected: bool,
    pub metadata: Option<TableCellMetadata>,
    pub cached_element: Option<CachedElement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Divider {
    pub tag_name: String,
    pub format: BlockFormat,
    pub is_selected: bool,
    pub cached_element: Option<CachedElement>,
}

impl Default for Divider {
    fn default() -> Self {
        Self {
            tag_name: "hr".into(),
            format: BlockFormat::default(),
            is_selected: false,
            cached_element: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListLevel {
    pub list_type: ListType,
    pub format: ListLevelFormat,
    pub metadata: Option<ListMetadata>,
}

impl ListLevel {
    pub fn new(list_type: ListType) -> Self {
        Self {
            list_type,
            format: ListLevelFormat::default(),
            metadata: None,
        }
    }

    pub fn with_format(mut self, format: ListLevelFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_start_number(mut self, start: u32) -> Self {
        self.format.start_number_override = Some(start);
        self
    }

    /// Run `callback` on this level's metadata, creating it when missing.
    pub fn update_metadata(&mut self, callback: impl FnOnce(&mut ListMetadata)) {
        callback(self.metadata.get_or_insert_with(ListMetadata::default));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListItem {
    pub blocks: Vec<NodeId>,
    /// Outermost level first.
    pub levels: Vec<ListLevel>,
    /// Remembers the marker format while the item is empty.
    pub format_holder: SelectionMarker,
    pub format: BlockFormat,
    pub cached_element: Option<CachedElement>,
}

impl ListItem {
    pub fn new(levels: Vec<ListLevel>) -> Self {
        Self {
            blocks: Vec::new(),
            levels,
            format_holder: SelectionMarker::default(),
            format: BlockFormat::default(),
            cached_element: None,
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<NodeId>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn last_level(&self) -> Option<&ListLevel> {
        self.levels.last()
    }

    pub fn last_level_mut(&mut self) -> Option<&mut ListLevel> {
        self.levels.last_mut()
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ContainerTag {
    Blockquote,
    Div,
    Pre,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormatContainer {
    pub tag: ContainerTag,
    pub blocks: Vec<NodeId>,
    pub format: BlockFormat,
    pub cached_element: Option<CachedElement>,
}

impl FormatContainer {
    pub fn new(tag: ContainerTag, format: BlockFormat) -> Self {
        Self {
            tag,
            blocks: Vec::new(),
            format,
            cached_element: None,
        }
    }

    pub fn is_quote(&self) -> bool {
        self.tag == ContainerTag::Blockquote
    }
}

/// An element the model does not understand, kept as a group of blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct General {
    pub blocks: Vec<NodeId>,
    pub format: BlockFormat,
    pub tag_name: String,
    pub is_selected: bool,
    pub cached_element: Option<CachedElement>,
}

/// An opaque, host-owned block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Entity {
    pub entity_type: String,
    pub id: String,
    pub is_readonly: bool,
    pub format: BlockFormat,
    pub is_selected: bool,
}
