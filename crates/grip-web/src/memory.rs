#![forbid(unsafe_code)]

//! In-memory [`HostDocument`] for headless hosts and tests.
//!
//! Nodes live in an arena addressed by [`NodeId`]. Layout is not computed:
//! rects are assigned explicitly and style writes are only recorded. Selector
//! support covers what list and table hosts use: tag, `.class`, `#id`,
//! `[attr]`, `[attr=value]`, compounds of those, and comma lists.

use std::collections::{BTreeMap, BTreeSet};

use grip_core::{ListenerKind, Rect, Surface};
use grip_table::{DeclaredColumn, SpannedCell, TableSections, TableShape, parse_span};
use smallvec::SmallVec;

use crate::host::{CaptureError, HostDocument, TableCellContext, px, style};

/// Arena index of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// How the document answers pointer-capture requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureBehavior {
    #[default]
    Accept,
    /// Capture is not exposed; sessions skip it entirely.
    Unsupported,
    /// Capture is exposed but every call fails.
    Reject,
}

/// One recorded capture call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCall {
    Set { node: NodeId, pointer_id: u32 },
    Release { node: NodeId, pointer_id: u32 },
}

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: SmallVec<[String; 2]>,
    attributes: BTreeMap<String, String>,
    inline: BTreeMap<String, String>,
    computed: BTreeMap<String, String>,
    rect: Rect,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<NodeData>,
    body: NodeId,
    listeners: BTreeSet<ListenerKind>,
    capture: CaptureBehavior,
    captured: BTreeMap<u32, NodeId>,
    capture_calls: Vec<CaptureCall>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A document holding only `body`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                tag: "body".to_owned(),
                ..NodeData::default()
            }],
            body: NodeId(0),
            listeners: BTreeSet::new(),
            capture: CaptureBehavior::default(),
            captured: BTreeMap::new(),
            capture_calls: Vec::new(),
        }
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Append a `tag` element under `parent`.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent),
            ..NodeData::default()
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_ascii_lowercase(), value.to_owned());
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.nodes[node.0].rect = rect;
    }

    /// Stylesheet-derived value; inline styles still take precedence.
    pub fn set_computed_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.nodes[node.0]
            .computed
            .insert(property.to_owned(), value.to_owned());
    }

    pub fn set_capture_behavior(&mut self, behavior: CaptureBehavior) {
        self.capture = behavior;
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attributes.get(name).map(String::as_str)
    }

    /// Inline style property.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0].inline.get(property).map(String::as_str)
    }

    /// Currently bound document listeners.
    #[must_use]
    pub fn bound_listeners(&self) -> Vec<ListenerKind> {
        self.listeners.iter().copied().collect()
    }

    /// Node holding capture for `pointer_id`.
    #[must_use]
    pub fn captured_by(&self, pointer_id: u32) -> Option<NodeId> {
        self.captured.get(&pointer_id).copied()
    }

    #[must_use]
    pub fn capture_calls(&self) -> &[CaptureCall] {
        &self.capture_calls
    }

    /// Nearest inclusive ancestor with the given tag.
    fn closest_tag(&self, node: NodeId, tags: &[&str]) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if tags.contains(&self.nodes[id.0].tag.as_str()) {
                return Some(id);
            }
            current = self.nodes[id.0].parent;
        }
        None
    }

    fn children_tagged<'a>(
        &'a self,
        node: NodeId,
        tags: &'a [&'a str],
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes[node.0]
            .children
            .iter()
            .copied()
            .filter(move |child| tags.contains(&self.nodes[child.0].tag.as_str()))
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        selector
            .split(',')
            .filter_map(|part| Compound::parse(part.trim()))
            .any(|compound| compound.matches(&self.nodes[node.0]))
    }
}

/// One compound selector: `tag#id.class[attr=value]`.
#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl Compound {
    /// Parse a compound selector; combinators and pseudo-classes yield `None`.
    fn parse(source: &str) -> Option<Self> {
        if source.is_empty() {
            return None;
        }
        let mut compound = Self::default();
        let mut rest = source;

        let tag_end = rest
            .find(|c: char| !(is_ident_char(c) || c == '*'))
            .unwrap_or(rest.len());
        if tag_end > 0 {
            let tag = &rest[..tag_end];
            if tag != "*" {
                compound.tag = Some(tag.to_ascii_lowercase());
            }
            rest = &rest[tag_end..];
        }

        while let Some(first) = rest.chars().next() {
            match first {
                '.' | '#' => {
                    let body = &rest[1..];
                    let end = body.find(|c: char| !is_ident_char(c)).unwrap_or(body.len());
                    if end == 0 {
                        return None;
                    }
                    let name = body[..end].to_owned();
                    if first == '.' {
                        compound.classes.push(name);
                    } else {
                        compound.id = Some(name);
                    }
                    rest = &body[end..];
                }
                '[' => {
                    let close = rest.find(']')?;
                    let inner = &rest[1..close];
                    let (name, value) = match inner.split_once('=') {
                        Some((name, value)) => {
                            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                            (name.trim(), Some(value.to_owned()))
                        }
                        None => (inner.trim(), None),
                    };
                    if name.is_empty() {
                        return None;
                    }
                    compound
                        .attributes
                        .push((name.to_ascii_lowercase(), value));
                    rest = &rest[close + 1..];
                }
                _ => return None,
            }
        }
        Some(compound)
    }

    fn matches(&self, node: &NodeData) -> bool {
        if self.tag.as_deref().is_some_and(|tag| tag != node.tag) {
            return false;
        }
        if let Some(id) = &self.id
            && node.attributes.get("id") != Some(id)
        {
            return false;
        }
        if !self
            .classes
            .iter()
            .all(|class| node.classes.iter().any(|c| c == class))
        {
            return false;
        }
        self.attributes
            .iter()
            .all(|(name, expected)| match (node.attributes.get(name), expected) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            })
    }
}

impl Surface for MemoryDocument {
    type Node = NodeId;

    fn closest_matching(
        &self,
        node: &NodeId,
        selector: &str,
        boundary: Option<&NodeId>,
    ) -> Option<NodeId> {
        let mut current = Some(*node);
        while let Some(id) = current {
            if self.matches(id, selector) {
                return Some(id);
            }
            if boundary == Some(&id) {
                return None;
            }
            current = self.nodes[id.0].parent;
        }
        None
    }

    fn rect(&self, node: &NodeId) -> Rect {
        self.nodes[node.0].rect
    }

    fn computed_style(&self, node: &NodeId, property: &str) -> Option<String> {
        let data = &self.nodes[node.0];
        data.inline
            .get(property)
            .or_else(|| data.computed.get(property))
            .cloned()
    }

    fn data_attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes[node.0]
            .attributes
            .get(&format!("data-{name}"))
            .cloned()
    }
}

impl HostDocument for MemoryDocument {
    type Table<'a> = MemoryTable<'a>;

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        let inline = &mut self.nodes[node.0].inline;
        if value.is_empty() {
            inline.remove(property);
        } else {
            inline.insert(property.to_owned(), value.to_owned());
        }
    }

    fn toggle_class(&mut self, node: &NodeId, class: &str, on: bool) {
        if on {
            self.add_class(*node, class);
        } else {
            self.nodes[node.0].classes.retain(|c| c != class);
        }
    }

    fn supports_pointer_capture(&self, _node: &NodeId) -> bool {
        self.capture != CaptureBehavior::Unsupported
    }

    fn set_pointer_capture(&mut self, node: &NodeId, pointer_id: u32) -> Result<(), CaptureError> {
        self.capture_calls.push(CaptureCall::Set {
            node: *node,
            pointer_id,
        });
        match self.capture {
            CaptureBehavior::Accept => {
                self.captured.insert(pointer_id, *node);
                Ok(())
            }
            CaptureBehavior::Unsupported => Err(CaptureError::NotSupported),
            CaptureBehavior::Reject => Err(CaptureError::Rejected {
                pointer_id,
                reason: "no active pointer".to_owned(),
            }),
        }
    }

    fn release_pointer_capture(
        &mut self,
        node: &NodeId,
        pointer_id: u32,
    ) -> Result<(), CaptureError> {
        self.capture_calls.push(CaptureCall::Release {
            node: *node,
            pointer_id,
        });
        match self.capture {
            CaptureBehavior::Accept if self.captured.get(&pointer_id) == Some(node) => {
                self.captured.remove(&pointer_id);
                Ok(())
            }
            CaptureBehavior::Unsupported => Err(CaptureError::NotSupported),
            CaptureBehavior::Accept | CaptureBehavior::Reject => Err(CaptureError::Rejected {
                pointer_id,
                reason: "pointer not captured by this element".to_owned(),
            }),
        }
    }

    fn body_style(&self, property: &str) -> Option<String> {
        self.nodes[self.body.0].inline.get(property).cloned()
    }

    fn set_body_style(&mut self, property: &str, value: &str) {
        let body = self.body;
        self.set_style(&body, property, value);
    }

    fn bind_listeners(&mut self, listeners: &[ListenerKind]) {
        self.listeners.extend(listeners.iter().copied());
    }

    fn unbind_listeners(&mut self, listeners: &[ListenerKind]) {
        for listener in listeners {
            self.listeners.remove(listener);
        }
    }

    fn enclosing_table_cell(&mut self, node: &NodeId) -> Option<TableCellContext<MemoryTable<'_>>> {
        let cell = self.closest_tag(*node, &["td", "th"])?;
        let table = self.closest_tag(cell, &["table"])?;
        Some(TableCellContext {
            table: MemoryTable { doc: self, table },
            cell,
        })
    }
}

const CELL_TAGS: &[&str] = &["td", "th"];
const ROW_TAGS: &[&str] = &["tr"];

/// Table view over a `table` element of a [`MemoryDocument`].
#[derive(Debug)]
pub struct MemoryTable<'a> {
    doc: &'a mut MemoryDocument,
    table: NodeId,
}

impl MemoryTable<'_> {
    #[must_use]
    pub const fn table(&self) -> NodeId {
        self.table
    }

    fn rows_of(&self, section: NodeId) -> Vec<NodeId> {
        self.doc.children_tagged(section, ROW_TAGS).collect()
    }
}

impl TableShape for MemoryTable<'_> {
    type Row = NodeId;
    type Cell = NodeId;
    type Column = NodeId;

    fn sections(&self) -> TableSections<NodeId> {
        let mut sections = TableSections::default();
        // Rows directly under `table` form an implicit body at their position.
        let mut implicit_open = false;
        for &child in self.doc.children(self.table) {
            match self.doc.tag(child) {
                "thead" if sections.head.is_none() => {
                    sections.head = Some(self.rows_of(child));
                    implicit_open = false;
                }
                "tfoot" if sections.foot.is_none() => {
                    sections.foot = Some(self.rows_of(child));
                    implicit_open = false;
                }
                "tbody" => {
                    sections.bodies.push(self.rows_of(child));
                    implicit_open = false;
                }
                "tr" => {
                    if implicit_open && let Some(body) = sections.bodies.last_mut() {
                        body.push(child);
                    } else {
                        sections.bodies.push(vec![child]);
                    }
                    implicit_open = true;
                }
                _ => {}
            }
        }
        sections
    }

    fn owning_row(&self, cell: &NodeId) -> Option<NodeId> {
        self.doc
            .parent(*cell)
            .filter(|parent| self.doc.tag(*parent) == "tr")
    }

    fn cells(&self, row: &NodeId) -> Vec<SpannedCell<NodeId>> {
        self.doc
            .children_tagged(*row, CELL_TAGS)
            .map(|cell| SpannedCell::new(cell, self.col_span(&cell)))
            .collect()
    }

    fn col_span(&self, cell: &NodeId) -> u32 {
        self.doc.attribute(*cell, "colspan").map_or(1, parse_span)
    }

    fn column_groups(&self) -> Vec<Vec<DeclaredColumn<NodeId>>> {
        self.doc
            .children_tagged(self.table, &["colgroup"])
            .map(|group| {
                self.doc
                    .children_tagged(group, &["col"])
                    .map(|col| DeclaredColumn::from_attribute(col, self.doc.attribute(col, "span")))
                    .collect()
            })
            .collect()
    }

    fn set_cell_width(&mut self, cell: &NodeId, width: f64) {
        self.doc.set_style(cell, style::WIDTH, &px(width));
    }

    fn set_column_width(&mut self, column: &NodeId, width: f64) {
        self.doc.set_style(column, style::WIDTH, &px(width));
    }
}
