// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Debug rendering of the tree in the same box-drawing layout used for DOM
//! dumps.

use super::format::BlockFormat;
use super::{ContentModel, Node, NodeId, Segment};

enum Entry<'a> {
    Node(NodeId),
    Segment(&'a Segment),
    Row(usize, &'a [NodeId]),
}

impl ContentModel {
    /// Render the tree, one node per line. The document itself is the
    /// first, empty line.
    pub fn to_tree(&self) -> String {
        let mut out = String::from("\n");
        let children: Vec<Entry> = self
            .blocks_of(self.root())
            .iter()
            .map(|id| Entry::Node(*id))
            .collect();
        self.write_children(&mut out, &children, "");
        out
    }

    fn write_children(&self, out: &mut String, entries: &[Entry], prefix: &str) {
        for (i, entry) in entries.iter().enumerate() {
            let last = i + 1 == entries.len();
            out.push_str(prefix);
            out.push_str(if last { "└>" } else { "├>" });
            let child_prefix =
                format!("{prefix}{}", if last { "  " } else { "│ " });
            match entry {
                Entry::Node(id) => self.write_node(out, *id, &child_prefix),
                Entry::Segment(segment) => {
                    self.write_segment(out, segment, &child_prefix)
                }
                Entry::Row(index, cells) => {
                    out.push_str(&format!("tr{index}\n"));
                    let cells: Vec<Entry> =
                        cells.iter().map(|c| Entry::Node(*c)).collect();
                    self.write_children(out, &cells, &child_prefix);
                }
            }
        }
    }

    fn write_node(&self, out: &mut String, id: NodeId, prefix: &str) {
        let Some(node) = self.get(id) else {
            out.push_str("?\n");
            return;
        };
        let (label, children): (String, Vec<Entry>) = match node {
            Node::Document(d) => (
                "document".into(),
                d.blocks.iter().map(|b| Entry::Node(*b)).collect(),
            ),
            Node::Paragraph(p) => {
                let tag = p
                    .decorator
                    .as_ref()
                    .map(|d| d.tag_name.clone())
                    .unwrap_or_else(|| "p".into());
                let tag = if p.is_implicit {
                    format!("{tag}(implicit)")
                } else {
                    tag
                };
                (
                    with_format(tag, &p.format),
                    p.segments.iter().map(Entry::Segment).collect(),
                )
            }
            Node::Table(t) => (
                with_format("table".into(), &t.format),
                t.rows
                    .iter()
                    .enumerate()
                    .map(|(i, r)| Entry::Row(i, r.cells.as_slice()))
                    .collect(),
            ),
            Node::TableCell(c) => {
                let tag = if c.is_header { "th" } else { "td" };
                let tag = if c.is_selected {
                    format!("{tag}*")
                } else {
                    tag.to_string()
                };
                (
                    with_format(tag, &c.format),
                    c.blocks.iter().map(|b| Entry::Node(*b)).collect(),
                )
            }
            Node::Divider(d) => (with_format(d.tag_name.clone(), &d.format), vec![]),
            Node::ListItem(li) => {
                let levels: Vec<String> = li
                    .levels
                    .iter()
                    .map(|l| match l.format.start_number_override {
                        Some(start) => format!("{}({start})", l.list_type),
                        None => l.list_type.to_string(),
                    })
                    .collect();
                (
                    with_format(format!("li {}", levels.join(">")), &li.format),
                    li.blocks.iter().map(|b| Entry::Node(*b)).collect(),
                )
            }
            Node::FormatContainer(fc) => (
                with_format(fc.tag.to_string(), &fc.format),
                fc.blocks.iter().map(|b| Entry::Node(*b)).collect(),
            ),
            Node::General(g) => (
                with_format(format!("general {}", g.tag_name), &g.format),
                g.blocks.iter().map(|b| Entry::Node(*b)).collect(),
            ),
            Node::Entity(e) => (format!("entity {}", e.entity_type), vec![]),
        };
        out.push_str(&label);
        out.push('\n');
        self.write_children(out, &children, prefix);
    }

    fn write_segment(&self, out: &mut String, segment: &Segment, prefix: &str) {
        let selected = if segment.is_selected() { "*" } else { "" };
        match segment {
            Segment::Text(t) => out.push_str(&format!("\"{}\"{selected}\n", t.text)),
            Segment::SelectionMarker(_) => out.push_str("|\n"),
            Segment::Br(_) => out.push_str(&format!("br{selected}\n")),
            Segment::Image(i) => {
                out.push_str(&format!("img \"{}\"{selected}\n", i.src))
            }
            Segment::Entity(e) => {
                out.push_str(&format!("entity {}{selected}\n", e.entity_type))
            }
            Segment::General(g) => {
                out.push_str(&format!("general-segment{selected}\n"));
                let children: Vec<Entry> = self
                    .blocks_of(g.node)
                    .iter()
                    .map(|b| Entry::Node(*b))
                    .collect();
                self.write_children(out, &children, prefix);
            }
        }
    }
}

fn with_format(label: String, format: &BlockFormat) -> String {
    let css = describe(format);
    if css.is_empty() {
        label
    } else {
        format!("{label} [{css}]")
    }
}

fn describe(format: &BlockFormat) -> String {
    let pairs = [
        ("margin-top", format.margin_top.as_deref()),
        ("margin-right", format.margin_right.as_deref()),
        ("margin-bottom", format.margin_bottom.as_deref()),
        ("margin-left", format.margin_left.as_deref()),
        ("padding-right", format.padding_right.as_deref()),
        ("padding-left", format.padding_left.as_deref()),
        ("direction", format.direction.as_ref().map(|d| d.as_ref())),
        ("text-align", format.text_align.as_ref().map(|a| a.as_ref())),
    ];
    pairs
        .iter()
        .filter_map(|(name, value)| value.map(|v| format!("{name}:{v}")))
        .collect::<Vec<_>>()
        .join(";")
}
