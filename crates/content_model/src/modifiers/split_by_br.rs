// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::model::{ContentModel, Paragraph, Segment};
use crate::selection::get_selected_paragraphs;

/// Split every selected paragraph at its line breaks, so that a break can
/// never straddle a list or indentation boundary.
///
/// Each piece keeps the paragraph's formats and is explicit. A break is
/// only kept when nothing visible precedes it in its piece, which preserves
/// the empty line it renders (and the caret format in front of it).
pub fn split_selected_paragraph_by_br(model: &mut ContentModel) {
    for selection in get_selected_paragraphs(model) {
        let Some(paragraph) = model.paragraph(selection.block) else {
            continue;
        };
        if !paragraph.segments.iter().any(Segment::is_br) {
            continue;
        }
        let pieces = split_paragraph(paragraph);
        let ids = pieces.into_iter().map(|p| model.add(p)).collect();
        if model.replace_child(selection.parent(), selection.block, ids) {
            model.invalidate(selection.parent());
            model.invalidate_table_cells(&selection.path);
        }
    }
}

fn split_paragraph(paragraph: &Paragraph) -> Vec<Paragraph> {
    let mut pieces = Vec::new();
    let mut current = paragraph.shallow_clone();
    let mut has_visible_segment = false;

    for segment in &paragraph.segments {
        if segment.is_br() {
            if !has_visible_segment {
                current.segments.push(segment.clone());
            }
            if !current.segments.is_empty() {
                pieces.push(current);
            }
            current = paragraph.shallow_clone();
            has_visible_segment = false;
        } else {
            has_visible_segment |= !segment.is_marker();
            current.segments.push(segment.clone());
        }
    }
    if !current.segments.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::model::{BlockFormat, CachedElement, Table, TableCell, TableRow};

    fn model_with(paragraph: Paragraph) -> ContentModel {
        let mut model = ContentModel::new();
        let root = model.root();
        model.append(root, paragraph);
        model
    }

    #[test]
    fn splits_at_middle_break() {
        let mut model = model_with(Paragraph::implicit().with_segments([
            Segment::text("text1").selected(),
            Segment::br(),
            Segment::text("text2"),
        ]));
        split_selected_paragraph_by_br(&mut model);
        assert_eq!(
            model.to_tree(),
            indoc! {r#"

            ├>p
            │ └>"text1"*
            └>p
              └>"text2"
            "#}
        );
    }

    #[test]
    fn trailing_break_leaves_no_empty_paragraph() {
        let mut model = model_with(
            Paragraph::new().with_segments([Segment::text("a").selected(), Segment::br()]),
        );
        split_selected_paragraph_by_br(&mut model);
        let blocks = model.blocks_of(model.root()).to_vec();
        assert_eq!(blocks.len(), 1);
        assert_eq!(model.paragraph_text(blocks[0]), "a");
    }

    #[test]
    fn leading_break_keeps_its_empty_line() {
        let mut model = model_with(Paragraph::new().with_segments([
            Segment::marker(),
            Segment::br(),
            Segment::text("a"),
        ]));
        split_selected_paragraph_by_br(&mut model);
        let blocks = model.blocks_of(model.root()).to_vec();
        assert_eq!(blocks.len(), 2);
        let first = model.paragraph(blocks[0]).unwrap();
        assert!(first.segments[0].is_marker());
        assert!(first.segments[1].is_br());
        assert_eq!(model.paragraph_text(blocks[1]), "a");
    }

    #[test]
    fn pieces_copy_paragraph_format() {
        let format = BlockFormat {
            margin_left: Some("40px".into()),
            ..Default::default()
        };
        let mut model = model_with(
            Paragraph::implicit()
                .with_format(format.clone())
                .with_segments([Segment::text("a").selected(), Segment::br(), Segment::text("b")]),
        );
        split_selected_paragraph_by_br(&mut model);
        for id in model.blocks_of(model.root()) {
            let paragraph = model.paragraph(*id).unwrap();
            assert_eq!(paragraph.format, format);
            assert!(!paragraph.is_implicit);
        }
    }

    #[test]
    fn unselected_paragraph_is_untouched() {
        let mut model = model_with(Paragraph::new().with_segments([
            Segment::text("a"),
            Segment::br(),
            Segment::text("b"),
        ]));
        let before = model.clone();
        split_selected_paragraph_by_br(&mut model);
        assert_eq!(model, before);
    }

    #[test]
    fn splitting_inside_a_cell_drops_the_cell_cache() {
        let mut model = ContentModel::new();
        let root = model.root();
        let cell = model.add(TableCell {
            cached_element: Some(CachedElement(5)),
            ..Default::default()
        });
        model.append(
            cell,
            Paragraph::new().with_segments([
                Segment::text("a").selected(),
                Segment::br(),
                Segment::text("b"),
            ]),
        );
        model.append(
            root,
            Table {
                rows: vec![TableRow {
                    cells: vec![cell],
                    ..Default::default()
                }],
                ..Default::default()
            },
        );

        split_selected_paragraph_by_br(&mut model);
        assert_eq!(model.blocks_of(cell).len(), 2);
        assert_eq!(model.table_cell(cell).unwrap().cached_element, None);
    }
}
