// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::list::find_list_items_in_same_thread;
use crate::model::{BlockFormat, ContentModel, Direction, GroupType, NodeId, TableMetadata};
use crate::selection::get_operational_blocks;

use super::split_selected_paragraph_by_br;

/// Switch the selected blocks to `direction`.
///
/// A selected list item switches its whole thread: every level, every
/// child block and the item itself. Physical left/right properties are
/// mirrored whenever the direction actually changes.
pub fn set_model_direction(model: &mut ContentModel, direction: Direction) -> bool {
    split_selected_paragraph_by_br(model);

    let blocks =
        get_operational_blocks(model, &[GroupType::ListItem], &[GroupType::TableCell], false);

    for op in &blocks {
        if model.is_list_item(op.block) {
            for item in find_list_items_in_same_thread(model, model.root(), op.block) {
                let children = match model.list_item_mut(item) {
                    Some(list_item) => {
                        for level in &mut list_item.levels {
                            level.format.direction = Some(direction);
                        }
                        list_item.blocks.clone()
                    }
                    None => continue,
                };
                for child in children {
                    internal_set_direction(model, child, direction);
                }
                internal_set_direction(model, item, direction);
                model.invalidate(item);
            }
        } else {
            internal_set_direction(model, op.block, direction);
        }
        model.invalidate_table_cells(&op.path);
    }

    !blocks.is_empty()
}

fn internal_set_direction(model: &mut ContentModel, block: NodeId, direction: Direction) {
    let Some(format) = model.block_format_mut(block) else {
        return;
    };
    let was_rtl = format.is_rtl();
    if was_rtl == (direction == Direction::Rtl) {
        return;
    }
    format.direction = Some(direction);
    format.swap_sides();
    model.invalidate(block);

    if model.table(block).is_some() {
        flip_table_cell_borders(model, block);
    }
}

/// Mirror the side borders of cells whose borders were set by hand, then
/// re-apply the table wide borders to the others.
fn flip_table_cell_borders(model: &mut ContentModel, table: NodeId) {
    let Some((rows, metadata)) = model
        .table(table)
        .map(|t| (t.rows.iter().map(|r| r.cells.clone()).collect::<Vec<_>>(), t.metadata.clone()))
    else {
        return;
    };
    let row_count = rows.len();

    for (row_index, cells) in rows.into_iter().enumerate() {
        for cell_id in cells {
            let Some(cell) = model.table_cell_mut(cell_id) else {
                continue;
            };
            let overridden = cell
                .metadata
                .as_ref()
                .is_some_and(|m| m.has_border_override());
            if overridden {
                std::mem::swap(&mut cell.format.border_left, &mut cell.format.border_right);
            } else if let Some(metadata) = &metadata {
                apply_table_borders(
                    &mut cell.format,
                    metadata,
                    row_index == 0,
                    row_index + 1 == row_count,
                );
            }
            cell.cached_element = None;
        }
    }
}

fn apply_table_borders(
    format: &mut BlockFormat,
    metadata: &TableMetadata,
    first_row: bool,
    last_row: bool,
) {
    if first_row {
        format.border_top = metadata.top_border.clone();
    }
    if last_row {
        format.border_bottom = metadata.bottom_border.clone();
    }
    format.border_left = metadata.vertical_border.clone();
    format.border_right = metadata.vertical_border.clone();
}

#[cfg(test)]
mod tests {
    use speculoos::prelude::*;

    use super::*;
    use crate::model::{
        CachedElement, ListItem, ListLevel, ListType, Paragraph, Segment, Table, TableCell,
        TableCellMetadata, TableRow,
    };

    fn selected_paragraph() -> Paragraph {
        Paragraph::new().with_segment(Segment::text("x").selected())
    }

    #[test]
    fn paragraph_margins_are_mirrored() {
        let mut model = ContentModel::new();
        let root = model.root();
        let para = model.append(
            root,
            selected_paragraph().with_format(BlockFormat {
                margin_left: Some("40px".into()),
                padding_left: Some("4px".into()),
                ..Default::default()
            }),
        );
        assert!(set_model_direction(&mut model, Direction::Rtl));
        let format = model.block_format(para).unwrap();
        assert_eq!(format.direction, Some(Direction::Rtl));
        assert_eq!(format.margin_right.as_deref(), Some("40px"));
        assert_eq!(format.padding_right.as_deref(), Some("4px"));
        assert_that!(format.margin_left).is_none();
    }

    #[test]
    fn same_direction_changes_nothing() {
        let mut model = ContentModel::new();
        let root = model.root();
        let para = model.append(
            root,
            selected_paragraph().with_format(BlockFormat {
                margin_left: Some("40px".into()),
                ..Default::default()
            }),
        );
        set_model_direction(&mut model, Direction::Ltr);
        assert_eq!(
            model.block_format(para).unwrap().margin_left.as_deref(),
            Some("40px")
        );
    }

    #[test]
    fn flip_twice_restores_box_properties() {
        let mut model = ContentModel::new();
        let root = model.root();
        let original = BlockFormat {
            margin_left: Some("40px".into()),
            margin_right: Some("8px".into()),
            padding_left: Some("2px".into()),
            ..Default::default()
        };
        let para = model.append(root, selected_paragraph().with_format(original.clone()));
        set_model_direction(&mut model, Direction::Rtl);
        set_model_direction(&mut model, Direction::Ltr);
        let format = model.block_format(para).unwrap();
        assert_eq!(format.margin_left, original.margin_left);
        assert_eq!(format.margin_right, original.margin_right);
        assert_eq!(format.padding_left, original.padding_left);
        assert_eq!(format.padding_right, original.padding_right);
    }

    #[test]
    fn list_thread_switches_together() {
        let mut model = ContentModel::new();
        let root = model.root();
        let first = model.append(root, ListItem::new(vec![ListLevel::new(ListType::Ordered)]));
        let first_para = model.append(first, selected_paragraph());
        let second = model.append(root, ListItem::new(vec![ListLevel::new(ListType::Ordered)]));
        let second_para = model.append(second, Paragraph::new().with_segment(Segment::text("y")));

        set_model_direction(&mut model, Direction::Rtl);
        for (item, para) in [(first, first_para), (second, second_para)] {
            let list_item = model.list_item(item).unwrap();
            assert_eq!(list_item.levels[0].format.direction, Some(Direction::Rtl));
            assert_eq!(list_item.format.direction, Some(Direction::Rtl));
            assert_eq!(
                model.block_format(para).unwrap().direction,
                Some(Direction::Rtl)
            );
        }
    }

    #[test]
    fn table_cells_get_borders_flipped_or_reapplied() {
        let mut model = ContentModel::new();
        let root = model.root();
        let overridden = model.add(TableCell {
            is_selected: true,
            format: BlockFormat {
                border_left: Some("1px solid red".into()),
                ..Default::default()
            },
            metadata: Some(TableCellMetadata {
                border_override: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        });
        let plain = model.add(TableCell {
            is_selected: true,
            ..Default::default()
        });
        let table = model.append(
            root,
            Table {
                rows: vec![TableRow {
                    cells: vec![overridden, plain],
                    ..Default::default()
                }],
                metadata: Some(TableMetadata {
                    top_border: Some("1px solid black".into()),
                    bottom_border: None,
                    vertical_border: Some("1px dashed gray".into()),
                }),
                ..Default::default()
            },
        );

        set_model_direction(&mut model, Direction::Rtl);

        assert!(model.block_format(table).unwrap().is_rtl());
        let cell = model.table_cell(overridden).unwrap();
        assert_eq!(cell.format.border_right.as_deref(), Some("1px solid red"));
        assert_eq!(cell.format.border_left, None);
        let cell = model.table_cell(plain).unwrap();
        assert_eq!(cell.format.border_top.as_deref(), Some("1px solid black"));
        assert_eq!(cell.format.border_left.as_deref(), Some("1px dashed gray"));
        assert_eq!(cell.format.border_right.as_deref(), Some("1px dashed gray"));
    }

    #[test]
    fn table_direction_flip_is_an_involution() {
        let mut model = ContentModel::new();
        let root = model.root();
        let overridden = model.add(TableCell {
            is_selected: true,
            format: BlockFormat {
                border_left: Some("1px solid red".into()),
                border_right: Some("2px dotted blue".into()),
                ..Default::default()
            },
            metadata: Some(TableCellMetadata {
                border_override: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        });
        let plain = model.add(TableCell {
            is_selected: true,
            format: BlockFormat {
                border_top: Some("1px solid black".into()),
                border_bottom: Some("1px solid black".into()),
                border_left: Some("1px dashed gray".into()),
                border_right: Some("1px dashed gray".into()),
                ..Default::default()
            },
            ..Default::default()
        });
        let table = model.append(
            root,
            Table {
                rows: vec![TableRow {
                    cells: vec![overridden, plain],
                    ..Default::default()
                }],
                format: BlockFormat {
                    margin_left: Some("auto".into()),
                    ..Default::default()
                },
                metadata: Some(TableMetadata {
                    top_border: Some("1px solid black".into()),
                    bottom_border: Some("1px solid black".into()),
                    vertical_border: Some("1px dashed gray".into()),
                }),
                ..Default::default()
            },
        );
        let overridden_format = model.block_format(overridden).cloned();
        let plain_format = model.block_format(plain).cloned();

        set_model_direction(&mut model, Direction::Rtl);
        assert_eq!(
            model.block_format(overridden).unwrap().border_left.as_deref(),
            Some("2px dotted blue")
        );
        assert_eq!(
            model.block_format(table).unwrap().margin_right.as_deref(),
            Some("auto")
        );

        set_model_direction(&mut model, Direction::Ltr);
        assert_eq!(model.block_format(overridden).cloned(), overridden_format);
        assert_eq!(model.block_format(plain).cloned(), plain_format);
        let format = model.block_format(table).unwrap();
        assert_eq!(format.margin_left.as_deref(), Some("auto"));
        assert_eq!(format.margin_right, None);
    }

    #[test]
    fn switching_a_paragraph_in_a_cell_drops_the_cell_cache() {
        let mut model = ContentModel::new();
        let root = model.root();
        let cell = model.add(TableCell {
            cached_element: Some(CachedElement(9)),
            ..Default::default()
        });
        let para = model.append(cell, selected_paragraph());
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

        set_model_direction(&mut model, Direction::Rtl);
        assert!(model.block_format(para).unwrap().is_rtl());
        assert_that!(model.table_cell(cell).unwrap().cached_element).is_none();
    }
}
