// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

/// Failure to decode metadata stored alongside a node at the DOM boundary.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("metadata version {0} is newer than this model understands")]
    UnsupportedVersion(u32),
}

/// Failure to load [`crate::EditorOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("options are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("indent step must be a positive number of pixels, got {0}")]
    InvalidIndentStep(f64),
}
