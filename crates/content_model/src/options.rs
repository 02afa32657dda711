// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Editor-wide configuration.

use serde::Deserialize;

use crate::error::OptionsError;
use crate::model::BlockFormat;

/// Default width of one indentation step.
pub const INDENT_STEP_PX: f64 = 40.0;

/// Options consumed by the editor shell when it calls into the mutators.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorOptions {
    /// Pixels added or removed by one indent/outdent.
    pub indent_step_px: f64,
    /// Zero the top/bottom margins of levels created by list conversion.
    pub remove_list_margins: bool,
    /// Format of quotes wrapping left-to-right blocks.
    pub block_quote_format_ltr: BlockFormat,
    /// Format of quotes wrapping right-to-left blocks.
    pub block_quote_format_rtl: BlockFormat,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            indent_step_px: INDENT_STEP_PX,
            remove_list_margins: false,
            block_quote_format_ltr: BlockFormat {
                border_left: Some("3px solid rgb(200, 200, 200)".into()),
                padding_left: Some("10px".into()),
                ..Default::default()
            },
            block_quote_format_rtl: BlockFormat {
                border_right: Some("3px solid rgb(200, 200, 200)".into()),
                padding_right: Some("10px".into()),
                ..Default::default()
            },
        }
    }
}

impl EditorOptions {
    /// Parse options from JSON. Missing keys fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: EditorOptions = serde_json::from_str(json)?;
        if !(options.indent_step_px > 0.0) {
            return Err(OptionsError::InvalidIndentStep(
                options.indent_step_px,
            ));
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let options =
            EditorOptions::from_json(r#"{"removeListMargins":true}"#).unwrap();
        assert_eq!(options.indent_step_px, INDENT_STEP_PX);
        assert!(options.remove_list_margins);
        assert_eq!(
            options.block_quote_format_ltr,
            EditorOptions::default().block_quote_format_ltr
        );
    }

    #[test]
    fn rejects_non_positive_step() {
        assert!(matches!(
            EditorOptions::from_json(r#"{"indentStepPx":0}"#),
            Err(OptionsError::InvalidIndentStep(_))
        ));
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            EditorOptions::from_json("nope"),
            Err(OptionsError::Json(_))
        ));
    }
}
