// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Typed editing metadata attached to list levels and table cells.
//!
//! The DOM stores these records as JSON in a `data-editing-info`
//! attribute. Inside the model they are plain structs; the JSON form only
//! exists at the DOM boundary through [`ListMetadata::to_dataset`] and
//! friends.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::MetadataError;

/// Current version written into every serialised record.
pub const METADATA_VERSION: u32 = 1;

/// Numbering styles for ordered lists.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum NumberingListType {
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

/// Marker styles for unordered lists.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BulletListType {
    Disc,
    Circle,
    Square,
}

/// Style bookkeeping for a list level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListMetadata {
    pub ordered_style_type: Option<NumberingListType>,
    pub unordered_style_type: Option<BulletListType>,
    pub apply_list_style_from_level: Option<bool>,
}

impl ListMetadata {
    /// Overwrite every field that is set in `fields`, keeping the rest.
    pub fn merge(&mut self, fields: &ListMetadata) {
        if fields.ordered_style_type.is_some() {
            self.ordered_style_type = fields.ordered_style_type;
        }
        if fields.unordered_style_type.is_some() {
            self.unordered_style_type = fields.unordered_style_type;
        }
        if fields.apply_list_style_from_level.is_some() {
            self.apply_list_style_from_level =
                fields.apply_list_style_from_level;
        }
    }

    pub fn applies_style_from_level(&self) -> bool {
        self.apply_list_style_from_level.unwrap_or(false)
    }

    pub fn to_dataset(&self) -> Result<String, MetadataError> {
        to_versioned_json(self)
    }

    pub fn from_dataset(json: &str) -> Result<Self, MetadataError> {
        from_versioned_json(json)
    }
}

/// Per-cell overrides that survive re-applying the table format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCellMetadata {
    pub bg_color_override: Option<bool>,
    pub v_align_override: Option<bool>,
    pub border_override: Option<bool>,
}

impl TableCellMetadata {
    pub fn has_border_override(&self) -> bool {
        self.border_override.unwrap_or(false)
    }

    pub fn to_dataset(&self) -> Result<String, MetadataError> {
        to_versioned_json(self)
    }

    pub fn from_dataset(json: &str) -> Result<Self, MetadataError> {
        from_versioned_json(json)
    }
}

/// Table wide border format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableMetadata {
    pub top_border: Option<String>,
    pub bottom_border: Option<String>,
    pub vertical_border: Option<String>,
}

impl TableMetadata {
    pub fn to_dataset(&self) -> Result<String, MetadataError> {
        to_versioned_json(self)
    }

    pub fn from_dataset(json: &str) -> Result<Self, MetadataError> {
        from_versioned_json(json)
    }
}

#[derive(Serialize)]
struct VersionedRef<'a, T> {
    version: u32,
    #[serde(flatten)]
    record: &'a T,
}

#[derive(Deserialize)]
struct Versioned<T> {
    #[serde(default)]
    version: Option<u32>,
    #[serde(flatten)]
    record: T,
}

fn to_versioned_json<T: Serialize>(record: &T) -> Result<String, MetadataError> {
    Ok(serde_json::to_string(&VersionedRef {
        version: METADATA_VERSION,
        record,
    })?)
}

fn from_versioned_json<T>(json: &str) -> Result<T, MetadataError>
where
    T: for<'de> Deserialize<'de>,
{
    let versioned: Versioned<T> = serde_json::from_str(json)?;
    match versioned.version {
        Some(version) if version > METADATA_VERSION => {
            Err(MetadataError::UnsupportedVersion(version))
        }
        _ => Ok(versioned.record),
    }
}
