// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! List threads, marker styles and announcements.

mod announce;
mod style;
mod thread;

pub use announce::{get_list_announce_data, get_list_number, AnnounceData, AnnounceString};
pub use style::{
    get_auto_list_style_type, get_ordered_list_number_str, set_model_list_start_number,
    set_model_list_style, AutoListStyle,
};
pub use thread::find_list_items_in_same_thread;
