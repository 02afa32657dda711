// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Content model for a rich text editor: a typed document tree between the
//! live document and editing commands, plus the mutators that apply list,
//! indentation, quote, alignment and direction commands to the selection.

pub mod editor;
mod error;
pub mod list;
pub mod model;
pub mod modifiers;
mod options;
pub mod selection;

pub use crate::editor::{
    apply_pending_format, DomPosition, DomSelection, Editor, EditorEvent,
    FormatContentModelContext, FormatResult, Key, PendingFormatState,
};
pub use crate::error::{MetadataError, OptionsError};
pub use crate::list::{
    find_list_items_in_same_thread, get_auto_list_style_type, get_list_announce_data,
    get_list_number, set_model_list_start_number, set_model_list_style, AnnounceData,
    AnnounceString, AutoListStyle,
};
pub use crate::model::{
    Alignment, BlockFormat, BlockType, BulletListType, ContainerTag, ContentModel,
    Direction, FormatContainer, General, GroupType, IndentDirection, ListItem,
    ListLevel, ListLevelFormat, ListMetadata, ListType, Node, NodeId,
    NumberingListType, Paragraph, Segment, SegmentFormat, Table, TableCell,
    TableCellMetadata, TableMetadata, TableRow, TextAlign,
};
pub use crate::modifiers::{
    normalize_content_model, set_list_type, set_model_alignment, set_model_direction,
    set_model_indentation, split_selected_paragraph_by_br, toggle_model_block_quote,
};
pub use crate::options::{EditorOptions, INDENT_STEP_PX};
pub use crate::selection::{
    collect_selected_blocks, get_first_selected_list_item, get_operational_blocks,
    get_selected_paragraphs, get_selected_segments_and_paragraphs, OperationalBlock,
    SelectedBlock,
};
