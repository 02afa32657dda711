// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! CSS length parsing for margin arithmetic.

use once_cell::sync::Lazy;
use regex::Regex;

static LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d*\.?\d+)\s*(px|pt|em|rem|in|cm|mm|%)?\s*$")
        .expect("length pattern is valid")
});

const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// Convert a CSS length to pixels. Empty, `auto` and unrecognised values
/// count as `0`, the same as an unset margin.
pub fn parse_value_with_unit(value: Option<&str>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    let Some(captures) = LENGTH.captures(value) else {
        return 0.0;
    };
    let number: f64 = captures[1].parse().unwrap_or(0.0);
    let factor = match captures.get(2).map(|m| m.as_str()) {
        None | Some("px") => 1.0,
        Some("pt") => 4.0 / 3.0,
        Some("em") | Some("rem") => DEFAULT_FONT_SIZE_PX,
        Some("in") => 96.0,
        Some("cm") => 96.0 / 2.54,
        Some("mm") => 96.0 / 25.4,
        // Percentages need a containing block we do not have
        Some(_) => 0.0,
    };
    number * factor
}

/// Serialise a pixel value the way margins are written back to the model.
pub fn to_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}px", value as i64)
    } else {
        format!("{value}px")
    }
}
