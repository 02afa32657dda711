// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The content model: an arena of nodes forming one rooted tree.
//!
//! Every node lives in [`ContentModel::nodes`] and is addressed by a
//! [`NodeId`]. Block groups (the document, list items, format containers,
//! general elements and table cells) hold ordered `blocks: Vec<NodeId>`.
//! Ids stay valid until [`ContentModel::compact`] runs, so a mutator can
//! keep references to list items or parents while it restructures the
//! tree. Nodes detached by a mutation become unreachable and are dropped by
//! the next compaction, which renumbers the live nodes in arena order.

use tracing::trace;

pub mod blocks;
pub mod css;
pub mod format;
mod invariants;
pub mod metadata;
pub mod segments;
mod tree;

pub use blocks::{
    CachedElement, ContainerTag, Divider, Document, Entity, FormatContainer,
    General, ListItem, ListLevel, Paragraph, ParagraphDecorator, Table,
    TableCell, TableRow,
};
pub use format::{
    Alignment, BlockFormat, Direction, IndentDirection, ListLevelFormat,
    ListType, SegmentFormat, Side, TextAlign,
};
pub use metadata::{
    BulletListType, ListMetadata, NumberingListType, TableCellMetadata,
    TableMetadata,
};
pub use segments::{
    Br, EntitySegment, GeneralSegment, Image, Segment, SegmentType,
    SelectionMarker, Text,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupType {
    Document,
    ListItem,
    FormatContainer,
    General,
    TableCell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Table,
    Divider,
    Entity,
    BlockGroup,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document(Document),
    Paragraph(Paragraph),
    Table(Table),
    TableCell(TableCell),
    Divider(Divider),
    ListItem(ListItem),
    FormatContainer(FormatContainer),
    General(General),
    Entity(Entity),
}

macro_rules! node_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Node {
                fn from(value: $variant) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

node_from!(
    Document,
    Paragraph,
    Table,
    TableCell,
    Divider,
    ListItem,
    FormatContainer,
    General,
    Entity
);

impl Node {
    pub fn group_type(&self) -> Option<GroupType> {
        match self {
            Node::Document(_) => Some(GroupType::Document),
            Node::ListItem(_) => Some(GroupType::ListItem),
            Node::FormatContainer(_) => Some(GroupType::FormatContainer),
            Node::General(_) => Some(GroupType::General),
            Node::TableCell(_) => Some(GroupType::TableCell),
            Node::Paragraph(_)
            | Node::Table(_)
            | Node::Divider(_)
            | Node::Entity(_) => None,
        }
    }

    /// `None` for nodes that cannot sit in a group's block list.
    pub fn block_type(&self) -> Option<BlockType> {
        match self {
            Node::Paragraph(_) => Some(BlockType::Paragraph),
            Node::Table(_) => Some(BlockType::Table),
            Node::Divider(_) => Some(BlockType::Divider),
            Node::Entity(_) => Some(BlockType::Entity),
            Node::ListItem(_) | Node::FormatContainer(_) | Node::General(_) => {
                Some(BlockType::BlockGroup)
            }
            Node::Document(_) | Node::TableCell(_) => None,
        }
    }

    pub fn blocks(&self) -> Option<&Vec<NodeId>> {
        match self {
            Node::Document(n) => Some(&n.blocks),
            Node::ListItem(n) => Some(&n.blocks),
            Node::FormatContainer(n) => Some(&n.blocks),
            Node::General(n) => Some(&n.blocks),
            Node::TableCell(n) => Some(&n.blocks),
            Node::Paragraph(_)
            | Node::Table(_)
            | Node::Divider(_)
            | Node::Entity(_) => None,
        }
    }

    pub fn blocks_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            Node::Document(n) => Some(&mut n.blocks),
            Node::ListItem(n) => Some(&mut n.blocks),
            Node::FormatContainer(n) => Some(&mut n.blocks),
            Node::General(n) => Some(&mut n.blocks),
            Node::TableCell(n) => Some(&mut n.blocks),
            Node::Paragraph(_)
            | Node::Table(_)
            | Node::Divider(_)
            | Node::Entity(_) => None,
        }
    }

    pub fn format(&self) -> Option<&BlockFormat> {
        match self {
            Node::Document(_) => None,
            Node::Paragraph(n) => Some(&n.format),
            Node::Table(n) => Some(&n.format),
            Node::TableCell(n) => Some(&n.format),
            Node::Divider(n) => Some(&n.format),
            Node::ListItem(n) => Some(&n.format),
            Node::FormatContainer(n) => Some(&n.format),
            Node::General(n) => Some(&n.format),
            Node::Entity(n) => Some(&n.format),
        }
    }

    pub fn format_mut(&mut self) -> Option<&mut BlockFormat> {
        match self {
            Node::Document(_) => None,
            Node::Paragraph(n) => Some(&mut n.format),
            Node::Table(n) => Some(&mut n.format),
            Node::TableCell(n) => Some(&mut n.format),
            Node::Divider(n) => Some(&mut n.format),
            Node::ListItem(n) => Some(&mut n.format),
            Node::FormatContainer(n) => Some(&mut n.format),
            Node::General(n) => Some(&mut n.format),
            Node::Entity(n) => Some(&mut n.format),
        }
    }

    /// Drop the rendering cache so the node is re-rendered.
    pub fn invalidate(&mut self) {
        match self {
            Node::Paragraph(n) => n.cached_element = None,
            Node::Table(n) => n.cached_element = None,
            Node::TableCell(n) => n.cached_element = None,
            Node::Divider(n) => n.cached_element = None,
            Node::ListItem(n) => n.cached_element = None,
            Node::FormatContainer(n) => n.cached_element = None,
            Node::General(n) => n.cached_element = None,
            Node::Document(_) | Node::Entity(_) => {}
        }
    }

    /// Ids this node refers to: child blocks, table cells and the groups
    /// behind inline general segments.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Node::Table(t) => t.cells().collect(),
            Node::Paragraph(p) => p
                .segments
                .iter()
                .filter_map(|s| match s {
                    Segment::General(g) => Some(g.node),
                    _ => None,
                })
                .collect(),
            other => other.blocks().cloned().unwrap_or_default(),
        }
    }

    fn remap_ids(&mut self, map: impl Fn(NodeId) -> NodeId) {
        match self {
            Node::Table(t) => {
                for row in &mut t.rows {
                    for cell in &mut row.cells {
                        *cell = map(*cell);
                    }
                }
            }
            Node::Paragraph(p) => {
                for segment in &mut p.segments {
                    if let Segment::General(g) = segment {
                        g.node = map(g.node);
                    }
                }
            }
            other => {
                if let Some(blocks) = other.blocks_mut() {
                    for block in blocks {
                        *block = map(*block);
                    }
                }
            }
        }
    }
}

/// Arenas smaller than this are never compacted by
/// [`ContentModel::compact_if_sparse`].
const MIN_COMPACT_LEN: usize = 64;

macro_rules! typed_accessors {
    ($($get:ident, $get_mut:ident, $variant:ident;)*) => {
        $(
            pub fn $get(&self, id: NodeId) -> Option<&$variant> {
                match self.nodes.get(id.0)? {
                    Node::$variant(node) => Some(node),
                    _ => None,
                }
            }

            pub fn $get_mut(&mut self, id: NodeId) -> Option<&mut $variant> {
                match self.nodes.get_mut(id.0)? {
                    Node::$variant(node) => Some(node),
                    _ => None,
                }
            }
        )*
    };
}

/// A document tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentModel {
    nodes: Vec<Node>,
}

impl Default for ContentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentModel {
    /// An empty document.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Document(Document::default())],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Store a detached node and return its id.
    pub fn add(&mut self, node: impl Into<Node>) -> NodeId {
        self.nodes.push(node.into());
        NodeId(self.nodes.len() - 1)
    }

    /// Store a node and append it to `parent`'s blocks. If `parent` is not
    /// a block group the node stays detached.
    pub fn append(&mut self, parent: NodeId, node: impl Into<Node>) -> NodeId {
        let id = self.add(node);
        if let Some(blocks) = self.blocks_of_mut(parent) {
            blocks.push(id);
        }
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    typed_accessors! {
        paragraph, paragraph_mut, Paragraph;
        table, table_mut, Table;
        table_cell, table_cell_mut, TableCell;
        divider, divider_mut, Divider;
        list_item, list_item_mut, ListItem;
        format_container, format_container_mut, FormatContainer;
        general, general_mut, General;
        entity, entity_mut, Entity;
    }

    /// Child blocks of a group; empty for anything else.
    pub fn blocks_of(&self, group: NodeId) -> &[NodeId] {
        self.get(group)
            .and_then(Node::blocks)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn blocks_of_mut(&mut self, group: NodeId) -> Option<&mut Vec<NodeId>> {
        self.get_mut(group).and_then(Node::blocks_mut)
    }

    pub fn group_type(&self, id: NodeId) -> Option<GroupType> {
        self.get(id).and_then(Node::group_type)
    }

    pub fn block_type(&self, id: NodeId) -> Option<BlockType> {
        self.get(id).and_then(Node::block_type)
    }

    pub fn is_list_item(&self, id: NodeId) -> bool {
        self.list_item(id).is_some()
    }

    pub fn block_format(&self, id: NodeId) -> Option<&BlockFormat> {
        self.get(id).and_then(Node::format)
    }

    pub fn block_format_mut(&mut self, id: NodeId) -> Option<&mut BlockFormat> {
        self.get_mut(id).and_then(Node::format_mut)
    }

    pub fn invalidate(&mut self, id: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.invalidate();
        }
    }

    /// Drop the cache of every table cell on `path`. A cell renders its
    /// blocks, so any change below it leaves its element stale.
    pub fn invalidate_table_cells(&mut self, path: &[NodeId]) {
        for &id in path {
            if let Some(cell) = self.table_cell_mut(id) {
                cell.cached_element = None;
            }
        }
    }

    pub fn index_in(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.blocks_of(parent).iter().position(|b| *b == child)
    }

    /// Replace `child` in `parent` with `replacement`. Returns `false`
    /// (and changes nothing) when `child` is not in `parent`.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        replacement: Vec<NodeId>,
    ) -> bool {
        let Some(index) = self.index_in(parent, child) else {
            return false;
        };
        match self.blocks_of_mut(parent) {
            Some(blocks) => {
                blocks.splice(index..=index, replacement);
                true
            }
            None => false,
        }
    }

    /// True when any attached segment, cell, divider or entity is selected.
    pub fn has_selection(&self) -> bool {
        self.nodes
            .iter()
            .zip(self.reachable())
            .filter(|(_, live)| *live)
            .any(|(node, _)| match node {
                Node::Paragraph(p) => p.has_selection(),
                Node::TableCell(c) => c.is_selected,
                Node::Divider(d) => d.is_selected,
                Node::Entity(e) => e.is_selected,
                _ => false,
            })
    }

    /// Size of the arena, detached nodes included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes reachable from the root.
    pub fn live_count(&self) -> usize {
        self.reachable().iter().filter(|live| **live).count()
    }

    fn reachable(&self) -> Vec<bool> {
        let mut live = vec![false; self.nodes.len()];
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            match live.get_mut(id.0) {
                Some(seen) if !*seen => *seen = true,
                _ => continue,
            }
            if let Some(node) = self.get(id) {
                stack.extend(node.children());
            }
        }
        live
    }

    /// Drop every node that is not reachable from the root and renumber
    /// the rest, keeping their relative order. Returns the number of nodes
    /// dropped. Any `NodeId` held from before a compaction that dropped
    /// nodes must be looked up again.
    pub fn compact(&mut self) -> usize {
        let live = self.reachable();
        let mut remap = Vec::with_capacity(live.len());
        let mut next = 0;
        for is_live in &live {
            remap.push(NodeId(next));
            if *is_live {
                next += 1;
            }
        }
        let removed = self.nodes.len() - next;
        if removed == 0 {
            return 0;
        }

        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_iter()
            .zip(live)
            .filter(|(_, is_live)| *is_live)
            .map(|(mut node, _)| {
                node.remap_ids(|id| remap.get(id.0).copied().unwrap_or(id));
                node
            })
            .collect();
        trace!(target: "content_model.model", removed, kept = next, "compacted arena");
        removed
    }

    /// Compact once detached nodes outnumber live ones in an arena of a
    /// meaningful size.
    pub fn compact_if_sparse(&mut self) -> usize {
        if self.nodes.len() < MIN_COMPACT_LEN {
            return 0;
        }
        let live = self.live_count();
        if self.nodes.len() - live <= live {
            return 0;
        }
        self.compact()
    }

    /// Paragraph text used by tests and debugging: text segments joined,
    /// line breaks shown as `\n`.
    pub fn paragraph_text(&self, id: NodeId) -> String {
        self.paragraph(id)
            .map(|p| {
                p.segments
                    .iter()
                    .map(|s| match s {
                        Segment::Text(t) => t.text.as_str(),
                        Segment::Br(_) => "\n",
                        _ => "",
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
