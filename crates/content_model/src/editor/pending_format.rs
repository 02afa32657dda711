// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Format waiting at a collapsed caret for the next typed text.

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::model::{ContentModel, Segment, SegmentFormat, Text};
use crate::selection::get_selected_segments_and_paragraphs;

const NBSP: &str = "\u{a0}";

/// A caret position in the host document: an opaque node handle and an
/// offset inside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DomPosition {
    pub node: u64,
    pub offset: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PendingFormatState {
    #[default]
    Empty,
    Armed {
        format: SegmentFormat,
        position: DomPosition,
    },
}

impl PendingFormatState {
    pub fn format(&self) -> Option<&SegmentFormat> {
        match self {
            PendingFormatState::Empty => None,
            PendingFormatState::Armed { format, .. } => Some(format),
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, PendingFormatState::Armed { .. })
    }

    /// Armed at exactly `caret`.
    pub fn can_apply(&self, caret: Option<DomPosition>) -> bool {
        match (self, caret) {
            (PendingFormatState::Armed { position, .. }, Some(caret)) => *position == caret,
            _ => false,
        }
    }
}

/// Give the text just typed before the caret the pending `format`.
///
/// The selection must be a single caret directly after a text segment that
/// ends with `data`, where a space and a non-breaking space count as equal.
/// That tail is split into its own segment carrying `format`, and the caret
/// takes `format` too. Returns `false` without touching the model when
/// the typed text cannot be found.
pub fn apply_pending_format(model: &mut ContentModel, format: &SegmentFormat, data: &str) -> bool {
    let selected = get_selected_segments_and_paragraphs(model);
    let [(paragraph_id, marker_index)] = selected.as_slice() else {
        return false;
    };
    let (paragraph_id, marker_index) = (*paragraph_id, *marker_index);
    let Some(paragraph) = model.paragraph_mut(paragraph_id) else {
        return false;
    };
    if marker_index == 0 || !paragraph.segments[marker_index].is_marker() {
        return false;
    }
    let Segment::Text(previous) = &mut paragraph.segments[marker_index - 1] else {
        return false;
    };
    let Some(split_at) = typed_suffix_start(&previous.text, data) else {
        trace!(
            target: "content_model.pending_format",
            data,
            "typed text not found before the caret"
        );
        return false;
    };

    let typed = previous.text.split_off(split_at);
    let new_text = Text {
        text: if data == " " { NBSP.to_owned() } else { typed },
        format: previous.format.merged_with(format),
        is_selected: false,
    };
    paragraph
        .segments
        .insert(marker_index, Segment::Text(new_text));
    let marker = &mut paragraph.segments[marker_index + 1];
    let merged = marker.format().merged_with(format);
    *marker.format_mut() = merged;
    paragraph.cached_element = None;
    true
}

/// Byte index in `text` where the trailing `data` starts, comparing whole
/// graphemes and treating a space and a non-breaking space as the same.
fn typed_suffix_start(text: &str, data: &str) -> Option<usize> {
    if data.is_empty() {
        return None;
    }
    let mut text_graphemes = text.grapheme_indices(true).rev();
    let mut start = text.len();
    for expected in data.graphemes(true).rev() {
        let (index, actual) = text_graphemes.next()?;
        if normalize_space(actual) != normalize_space(expected) {
            return None;
        }
        start = index;
    }
    Some(start)
}

fn normalize_space(grapheme: &str) -> &str {
    if grapheme == NBSP {
        " "
    } else {
        grapheme
    }
}
