// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Primitives for wrapping blocks into format containers and taking them
//! out again.

use crate::model::{ContentModel, FormatContainer, NodeId};

/// A wrapper produced by [`wrap_block_step1`], with the group holding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WrapResult {
    pub parent: NodeId,
    pub wrapper: NodeId,
}

/// Move `block` out of `parent` into a format container.
///
/// The preceding sibling is reused when `can_merge` accepts it, otherwise a
/// container built by `create_wrapper` takes the block's place. Results are
/// recorded newest first so [`wrap_block_step2`] visits them in reverse
/// document order.
pub fn wrap_block_step1(
    model: &mut ContentModel,
    results: &mut Vec<WrapResult>,
    parent: NodeId,
    block: NodeId,
    create_wrapper: impl FnOnce(&ContentModel) -> FormatContainer,
    can_merge: impl Fn(&ContentModel, NodeId) -> bool,
) {
    let Some(index) = model.index_in(parent, block) else {
        return;
    };
    if let Some(blocks) = model.blocks_of_mut(parent) {
        blocks.remove(index);
    }

    let previous = index
        .checked_sub(1)
        .and_then(|i| model.blocks_of(parent).get(i).copied())
        .filter(|prev| can_merge(model, *prev));
    let wrapper = match previous {
        Some(prev) => prev,
        None => {
            let container = create_wrapper(model);
            let wrapper = model.add(container);
            if let Some(blocks) = model.blocks_of_mut(parent) {
                blocks.insert(index, wrapper);
            }
            wrapper
        }
    };

    set_paragraph_not_implicit(model, block);
    if let Some(blocks) = model.blocks_of_mut(wrapper) {
        blocks.push(block);
    }
    model.invalidate(wrapper);
    results.insert(0, WrapResult { parent, wrapper });
}

/// Merge each wrapper from step 1 with its following sibling when the two
/// are equivalent containers.
pub fn wrap_block_step2(model: &mut ContentModel, results: &[WrapResult]) {
    for result in results {
        let Some(index) = model.index_in(result.parent, result.wrapper) else {
            continue;
        };
        let Some(next) = model.blocks_of(result.parent).get(index + 1).copied() else {
            continue;
        };
        if !are_same_format_containers(model, result.wrapper, next) {
            continue;
        }

        let moved = model.blocks_of(next).to_vec();
        for block in model.blocks_of(result.wrapper).to_vec() {
            set_paragraph_not_implicit(model, block);
        }
        if let Some(blocks) = model.blocks_of_mut(result.wrapper) {
            blocks.extend(moved);
        }
        if let Some(blocks) = model.blocks_of_mut(result.parent) {
            blocks.remove(index + 1);
        }
        model.invalidate(result.wrapper);
    }
}

/// Replace `group` in `parent` by its children, keeping their order.
pub fn unwrap_block(model: &mut ContentModel, parent: NodeId, group: NodeId) {
    let children = model.blocks_of(group).to_vec();
    for child in &children {
        set_paragraph_not_implicit(model, *child);
    }
    if model.replace_child(parent, group, children) {
        model.invalidate(parent);
    }
}

/// Both are format containers with the same tag and an equal format.
pub fn are_same_format_containers(model: &ContentModel, a: NodeId, b: NodeId) -> bool {
    match (model.format_container(a), model.format_container(b)) {
        (Some(a), Some(b)) => a.tag == b.tag && a.format == b.format,
        _ => false,
    }
}

/// A paragraph moved into a new structure must render its own element.
pub fn set_paragraph_not_implicit(model: &mut ContentModel, block: NodeId) {
    if let Some(paragraph) = model.paragraph_mut(block) {
        if paragraph.is_implicit {
            paragraph.is_implicit = false;
            paragraph.cached_element = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::model::{BlockFormat, ContainerTag, Paragraph, Segment};

    fn quote_format() -> BlockFormat {
        BlockFormat {
            padding_left: Some("10px".into()),
            ..Default::default()
        }
    }

    fn is_quote(model: &ContentModel, id: NodeId) -> bool {
        model.format_container(id).is_some_and(|fc| fc.is_quote())
    }

    fn wrap_all(model: &mut ContentModel, blocks: &[NodeId]) -> Vec<WrapResult> {
        let root = model.root();
        let mut results = Vec::new();
        for block in blocks {
            wrap_block_step1(
                model,
                &mut results,
                root,
                *block,
                |_| FormatContainer::new(ContainerTag::Blockquote, quote_format()),
                is_quote,
            );
        }
        results
    }

    #[test]
    fn adjacent_blocks_share_one_wrapper() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = model.append(root, Paragraph::implicit().with_segment(Segment::text("a")));
        let b = model.append(root, Paragraph::implicit().with_segment(Segment::text("b")));
        let results = wrap_all(&mut model, &[a, b]);
        wrap_block_step2(&mut model, &results);
        assert_eq!(
            model.to_tree(),
            indoc! {
            r#"
            
            └>blockquote [padding-left:10px]
              ├>p
              │ └>"a"
              └>p
                └>"b"
            "#}
        );
    }

    #[test]
    fn step2_merges_following_quote() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = model.append(root, Paragraph::new().with_segment(Segment::text("a")));
        let quote = model.append(
            root,
            FormatContainer::new(ContainerTag::Blockquote, quote_format()),
        );
        model.append(quote, Paragraph::new().with_segment(Segment::text("b")));
        let results = wrap_all(&mut model, &[a]);
        wrap_block_step2(&mut model, &results);
        let blocks = model.blocks_of(root).to_vec();
        assert_eq!(blocks.len(), 1);
        assert_eq!(model.blocks_of(blocks[0]).len(), 2);
    }

    #[test]
    fn different_formats_are_not_merged() {
        let mut model = ContentModel::new();
        let root = model.root();
        let a = model.append(root, Paragraph::new());
        let other = model.append(
            root,
            FormatContainer::new(ContainerTag::Blockquote, BlockFormat::default()),
        );
        let results = wrap_all(&mut model, &[a]);
        wrap_block_step2(&mut model, &results);
        assert_eq!(model.blocks_of(root).len(), 2);
        assert!(!are_same_format_containers(&model, results[0].wrapper, other));
    }

    #[test]
    fn unwrap_restores_children_in_place() {
        let mut model = ContentModel::new();
        let root = model.root();
        let first = model.append(root, Paragraph::new());
        let quote = model.append(
            root,
            FormatContainer::new(ContainerTag::Blockquote, quote_format()),
        );
        let a = model.append(quote, Paragraph::implicit());
        let b = model.append(quote, Paragraph::new());
        unwrap_block(&mut model, root, quote);
        assert_eq!(model.blocks_of(root), &[first, a, b]);
        assert!(!model.paragraph(a).unwrap().is_implicit);
    }
}
