// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::list::AnnounceData;
use crate::model::{NodeId, SegmentFormat};

use super::events::EditorEvent;

/// Side channel between a mutator and [`super::Editor::format_content_model`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormatContentModelContext {
    /// Entities inserted by the mutator.
    pub new_entities: Vec<NodeId>,
    /// Entities removed by the mutator.
    pub deleted_entities: Vec<NodeId>,
    /// The event that triggered the command, if any.
    pub raw_event: Option<EditorEvent>,
    /// The change continues an existing undo step.
    pub skip_undo_snapshot: bool,
    /// Arm this format at the caret once the change is committed.
    pub new_pending_format: Option<SegmentFormat>,
    /// What a screen reader should announce after the change.
    pub announce_data: Option<AnnounceData>,
}

/// Outcome of one [`super::Editor::format_content_model`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormatResult {
    pub changed: bool,
    pub undo_snapshot_added: bool,
    pub announce_data: Option<AnnounceData>,
    pub new_entities: Vec<NodeId>,
    pub deleted_entities: Vec<NodeId>,
}
