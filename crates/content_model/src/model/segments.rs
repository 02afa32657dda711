// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Inline content of a paragraph.

use super::format::SegmentFormat;
use super::NodeId;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    pub text: String,
    pub format: SegmentFormat,
    pub is_selected: bool,
}

/// Zero width caret. Carries the format that typed text would get.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionMarker {
    pub format: SegmentFormat,
    pub is_selected: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
    pub format: SegmentFormat,
    pub is_selected: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Br {
    pub format: SegmentFormat,
    pub is_selected: bool,
}

/// Inline block. `node` is a [`super::Node::General`] group in the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneralSegment {
    pub node: NodeId,
    pub format: SegmentFormat,
    pub is_selected: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntitySegment {
    pub entity_type: String,
    pub id: String,
    pub is_readonly: bool,
    pub format: SegmentFormat,
    pub is_selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentType {
    Text,
    SelectionMarker,
    Image,
    Br,
    General,
    Entity,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    Text(Text),
    SelectionMarker(SelectionMarker),
    Image(Image),
    Br(Br),
    General(GeneralSegment),
    Entity(EntitySegment),
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Text(Text {
            text: text.into(),
            ..Default::default()
        })
    }

    pub fn marker() -> Self {
        Segment::SelectionMarker(SelectionMarker {
            format: SegmentFormat::default(),
            is_selected: true,
        })
    }

    pub fn br() -> Self {
        Segment::Br(Br::default())
    }

    pub fn image(src: impl Into<String>) -> Self {
        Segment::Image(Image {
            src: src.into(),
            ..Default::default()
        })
    }

    pub fn general(node: NodeId) -> Self {
        Segment::General(GeneralSegment {
            node,
            format: SegmentFormat::default(),
            is_selected: false,
        })
    }

    pub fn selected(mut self) -> Self {
        self.set_selected(true);
        self
    }

    pub fn with_format(mut self, format: SegmentFormat) -> Self {
        *self.format_mut() = format;
        self
    }

    pub fn segment_type(&self) -> SegmentType {
        match self {
            Segment::Text(_) => SegmentType::Text,
            Segment::SelectionMarker(_) => SegmentType::SelectionMarker,
            Segment::Image(_) => SegmentType::Image,
            Segment::Br(_) => SegmentType::Br,
            Segment::General(_) => SegmentType::General,
            Segment::Entity(_) => SegmentType::Entity,
        }
    }

    pub fn format(&self) -> &SegmentFormat {
        match self {
            Segment::Text(s) => &s.format,
            Segment::SelectionMarker(s) => &s.format,
            Segment::Image(s) => &s.format,
            Segment::Br(s) => &s.format,
            Segment::General(s) => &s.format,
            Segment::Entity(s) => &s.format,
        }
    }

    pub fn format_mut(&mut self) -> &mut SegmentFormat {
        match self {
            Segment::Text(s) => &mut s.format,
            Segment::SelectionMarker(s) => &mut s.format,
            Segment::Image(s) => &mut s.format,
            Segment::Br(s) => &mut s.format,
            Segment::General(s) => &mut s.format,
            Segment::Entity(s) => &mut s.format,
        }
    }

    pub fn is_selected(&self) -> bool {
        match self {
            Segment::Text(s) => s.is_selected,
            Segment::SelectionMarker(s) => s.is_selected,
            Segment::Image(s) => s.is_selected,
            Segment::Br(s) => s.is_selected,
            Segment::General(s) => s.is_selected,
            Segment::Entity(s) => s.is_selected,
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        match self {
            Segment::Text(s) => s.is_selected = selected,
            Segment::SelectionMarker(s) => s.is_selected = selected,
            Segment::Image(s) => s.is_selected = selected,
            Segment::Br(s) => s.is_selected = selected,
            Segment::General(s) => s.is_selected = selected,
            Segment::Entity(s) => s.is_selected = selected,
        }
    }

    pub fn is_br(&self) -> bool {
        matches!(self, Segment::Br(_))
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Segment::SelectionMarker(_))
    }
}
