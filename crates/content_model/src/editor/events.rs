// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Host events the editor reacts to.

use strum_macros::{AsRefStr, Display};

/// Keys the editor distinguishes. Anything producing a character is
/// [`Key::Character`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
pub enum Key {
    Character(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    Shift,
    Control,
    Alt,
    Meta,
}

impl Key {
    pub fn is_character(self) -> bool {
        matches!(self, Key::Character(_))
    }

    /// Keys that move the caret without editing.
    pub fn moves_cursor(self) -> bool {
        matches!(
            self,
            Key::ArrowLeft
                | Key::ArrowRight
                | Key::ArrowUp
                | Key::ArrowDown
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
        )
    }

    /// Keys that edit the content without typing a character.
    pub fn edits_content(self) -> bool {
        matches!(self, Key::Enter | Key::Backspace | Key::Delete | Key::Tab)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Display, AsRefStr)]
pub enum EditorEvent {
    KeyDown { key: Key },
    /// Text was inserted. `data` is what the host inserted.
    Input {
        data: Option<String>,
        is_composing: bool,
    },
    CompositionEnd { data: String },
    MouseUp,
    ContentChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_classes_do_not_overlap() {
        for key in [Key::ArrowLeft, Key::Home, Key::PageDown] {
            assert!(key.moves_cursor());
            assert!(!key.edits_content());
        }
        assert!(Key::Character('a').is_character());
        assert!(!Key::Shift.moves_cursor());
        assert!(!Key::Shift.edits_content());
        assert_eq!(EditorEvent::MouseUp.to_string(), "MouseUp");
    }
}
