// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Model mutators. Each takes the model, applies one editing command to
//! the selection and reports whether the selection touched any block.

mod alignment;
mod block_quote;
mod direction;
mod indentation;
mod list_type;
mod normalize;
mod split_by_br;
pub mod wrap_block;

pub use alignment::set_model_alignment;
pub use block_quote::toggle_model_block_quote;
pub use direction::set_model_direction;
pub use indentation::{calculate_margin_value, set_model_indentation};
pub use list_type::set_list_type;
pub use normalize::normalize_content_model;
pub use split_by_br::split_selected_paragraph_by_br;
