// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The editor shell around a [`ContentModel`]: runs commands through
//! [`Editor::format_content_model`] and tracks the pending format.

mod context;
mod events;
mod pending_format;

pub use context::{FormatContentModelContext, FormatResult};
pub use events::{EditorEvent, Key};
pub use pending_format::{apply_pending_format, DomPosition, PendingFormatState};

use tracing::{debug, trace};

use crate::list::{set_model_list_start_number, set_model_list_style};
use crate::model::{
    Alignment, ContentModel, Direction, IndentDirection, ListMetadata, ListType,
    SegmentFormat,
};
use crate::modifiers::{
    set_list_type, set_model_alignment, set_model_direction, set_model_indentation,
    toggle_model_block_quote,
};
use crate::options::EditorOptions;

/// The host's selection, as far as the editor needs to know it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomSelection {
    Collapsed(DomPosition),
    Range { start: DomPosition, end: DomPosition },
}

impl DomSelection {
    pub fn caret(&self) -> Option<DomPosition> {
        match self {
            DomSelection::Collapsed(position) => Some(*position),
            DomSelection::Range { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct Editor {
    model: ContentModel,
    options: EditorOptions,
    pending_format: PendingFormatState,
    default_segment_format: SegmentFormat,
    selection: Option<DomSelection>,
    undo_snapshots: usize,
}

impl Editor {
    pub fn new(model: ContentModel, options: EditorOptions) -> Self {
        Self {
            model,
            options,
            pending_format: PendingFormatState::Empty,
            default_segment_format: SegmentFormat::default(),
            selection: None,
            undo_snapshots: 0,
        }
    }

    pub fn model(&self) -> &ContentModel {
        &self.model
    }

    /// Replace the model, e.g. after the host rebuilt it from its document.
    pub fn set_model(&mut self, model: ContentModel) {
        self.model = model;
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn pending_format(&self) -> &PendingFormatState {
        &self.pending_format
    }

    pub fn set_default_segment_format(&mut self, format: SegmentFormat) {
        self.default_segment_format = format;
    }

    pub fn set_selection(&mut self, selection: Option<DomSelection>) {
        self.selection = selection;
    }

    /// Number of undo snapshots committed so far.
    pub fn undo_snapshot_count(&self) -> usize {
        self.undo_snapshots
    }

    fn caret(&self) -> Option<DomPosition> {
        self.selection.as_ref().and_then(DomSelection::caret)
    }

    /// Run `mutator` on a copy of the model and commit the copy when it
    /// reports a change.
    ///
    /// A committed change adds an undo snapshot unless the mutator asked to
    /// skip it, and arms any pending format it requested at the caret. The
    /// committed model is compacted once detached nodes dominate its arena,
    /// so node ids held across commands must be looked up again.
    pub fn format_content_model(
        &mut self,
        api_name: &str,
        mutator: impl FnOnce(&mut ContentModel, &mut FormatContentModelContext) -> bool,
    ) -> FormatResult {
        self.format_content_model_with_event(api_name, None, mutator)
    }

    fn format_content_model_with_event(
        &mut self,
        api_name: &str,
        raw_event: Option<EditorEvent>,
        mutator: impl FnOnce(&mut ContentModel, &mut FormatContentModelContext) -> bool,
    ) -> FormatResult {
        let mut model = self.model.clone();
        let mut context = FormatContentModelContext {
            raw_event,
            ..Default::default()
        };
        let changed = mutator(&mut model, &mut context);

        debug!(
            target: "content_model.editor",
            api_name,
            changed,
            skip_undo_snapshot = context.skip_undo_snapshot,
            "format content model"
        );

        if !changed {
            return FormatResult {
                announce_data: context.announce_data,
                ..Default::default()
            };
        }

        model.compact_if_sparse();
        model.assert_invariants();
        self.model = model;
        let undo_snapshot_added = !context.skip_undo_snapshot;
        if undo_snapshot_added {
            self.undo_snapshots += 1;
        }
        if let (Some(format), Some(position)) = (context.new_pending_format, self.caret()) {
            self.pending_format = PendingFormatState::Armed { format, position };
        }

        FormatResult {
            changed,
            undo_snapshot_added,
            announce_data: context.announce_data,
            new_entities: context.new_entities,
            deleted_entities: context.deleted_entities,
        }
    }

    pub fn toggle_list(&mut self, list_type: ListType) -> FormatResult {
        let remove_margins = self.options.remove_list_margins;
        self.format_content_model("toggleList", |model, _| {
            set_list_type(model, list_type, remove_margins)
        })
    }

    pub fn set_indentation(&mut self, direction: IndentDirection) -> FormatResult {
        let step = self.options.indent_step_px;
        self.format_content_model("setIndentation", |model, context| {
            set_model_indentation(model, direction, step, Some(context))
        })
    }

    pub fn toggle_block_quote(&mut self) -> FormatResult {
        let ltr = self.options.block_quote_format_ltr.clone();
        let rtl = self.options.block_quote_format_rtl.clone();
        self.format_content_model("toggleBlockQuote", |model, _| {
            toggle_model_block_quote(model, &ltr, &rtl)
        })
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> FormatResult {
        self.format_content_model("setAlignment", |model, _| {
            set_model_alignment(model, alignment)
        })
    }

    pub fn set_direction(&mut self, direction: Direction) -> FormatResult {
        self.format_content_model("setDirection", |model, _| {
            set_model_direction(model, direction)
        })
    }

    pub fn set_list_style(&mut self, style: &ListMetadata) -> FormatResult {
        self.format_content_model("setListStyle", |model, _| {
            set_model_list_style(model, style)
        })
    }

    pub fn set_list_start_number(&mut self, value: u32) -> FormatResult {
        self.format_content_model("setListStartNumber", |model, _| {
            set_model_list_start_number(model, value)
        })
    }

    /// Arm `format` for the next text typed at the current caret. Does
    /// nothing when the selection is not collapsed.
    pub fn set_pending_format(&mut self, format: SegmentFormat) {
        if let Some(position) = self.caret() {
            self.pending_format = PendingFormatState::Armed { format, position };
        }
    }

    pub fn clear_pending_format(&mut self) {
        if self.pending_format.is_armed() {
            trace!(target: "content_model.pending_format", "cleared");
        }
        self.pending_format = PendingFormatState::Empty;
    }

    pub fn can_apply_pending_format(&self) -> bool {
        self.pending_format.can_apply(self.caret())
    }

    /// Feed one host event through the pending format state machine.
    pub fn on_event(&mut self, event: EditorEvent) -> Option<FormatResult> {
        match event {
            EditorEvent::KeyDown { key } => {
                self.on_key_down(key);
                None
            }
            EditorEvent::Input { data, is_composing } => {
                self.on_input(data.as_deref(), is_composing)
            }
            EditorEvent::CompositionEnd { data } => self.on_composition_end(&data),
            EditorEvent::MouseUp => {
                self.on_mouse_up();
                None
            }
            EditorEvent::ContentChanged => {
                self.on_content_changed();
                None
            }
        }
    }

    pub fn on_key_down(&mut self, key: Key) {
        if key.moves_cursor() || key.edits_content() {
            self.clear_pending_format();
            return;
        }
        if !key.is_character() {
            return;
        }
        let Some(position) = self.caret() else {
            return;
        };
        let existing = self.pending_format.format().cloned();
        if self.default_segment_format.is_empty() && existing.is_none() {
            return;
        }
        let format = match existing {
            Some(existing) => self.default_segment_format.merged_with(&existing),
            None => self.default_segment_format.clone(),
        };
        trace!(target: "content_model.pending_format", ?format, "armed");
        self.pending_format = PendingFormatState::Armed { format, position };
    }

    pub fn on_input(&mut self, data: Option<&str>, is_composing: bool) -> Option<FormatResult> {
        if is_composing {
            return None;
        }
        let data = data?;
        let event = EditorEvent::Input {
            data: Some(data.to_owned()),
            is_composing,
        };
        self.apply_pending(data, event)
    }

    pub fn on_composition_end(&mut self, data: &str) -> Option<FormatResult> {
        let event = EditorEvent::CompositionEnd {
            data: data.to_owned(),
        };
        self.apply_pending(data, event)
    }

    pub fn on_mouse_up(&mut self) {
        if !self.can_apply_pending_format() {
            self.clear_pending_format();
        }
    }

    pub fn on_content_changed(&mut self) {
        if !self.can_apply_pending_format() {
            self.clear_pending_format();
        }
    }

    fn apply_pending(&mut self, data: &str, event: EditorEvent) -> Option<FormatResult> {
        let format = self.pending_format.format().cloned()?;
        self.clear_pending_format();
        if data.is_empty() {
            return None;
        }
        let result = self.format_content_model_with_event(
            "applyPendingFormat",
            Some(event),
            |model, context| {
                let applied = apply_pending_format(model, &format, data);
                context.skip_undo_snapshot = applied;
                applied
            },
        );
        Some(result)
    }
}
