//! The report tree.
//!
//! Nodes live in an arena owned by [`Report`] and refer to each other by
//! [`NodeId`]. Root nodes are main categories, their children sub-categories,
//! and the leaves individual tests.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Outcome attached to a log entry or computed for a node.
///
/// Ordered by severity. A node starts as `Pass`, so `Info` entries never
/// change its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Info,
    Pass,
    Warning,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Grey,
    Yellow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    Json,
    Xml,
}

/// Body of a log entry, kept structured so any renderer can lay it out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Markup {
    Text { text: String },
    Label { text: String, color: Color },
    CodeBlock { code: String, language: CodeLanguage },
    Table { rows: Vec<Vec<String>> },
    Details { summary: String, lines: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub status: Status,
    pub markup: Markup,
    pub logged_at: DateTime<Local>,
}

impl LogEntry {
    pub fn new(status: Status, markup: Markup) -> Self {
        Self {
            status,
            markup,
            logged_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub categories: Vec<String>,
    pub authors: Vec<String>,
    pub entries: Vec<LogEntry>,
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            categories: Vec::new(),
            authors: Vec::new(),
            entries: Vec::new(),
            children: Vec::new(),
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_root(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(name));
        self.roots.push(id);
        id
    }

    /// Add `name` under `parent`, or `None` if `parent` is not in this report.
    pub fn create_child(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        let id = NodeId(self.nodes.len());
        self.nodes.get_mut(parent.0)?.children.push(id);
        self.nodes.push(Node::new(name));
        Some(id)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Append `entry` to the node. Returns `false` for an unknown id.
    pub fn log(&mut self, id: NodeId, entry: LogEntry) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) => {
                node.entries.push(entry);
                true
            }
            None => false,
        }
    }

    pub fn assign_category(&mut self, id: NodeId, category: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            push_unique(&mut node.categories, category);
        }
    }

    pub fn assign_author(&mut self, id: NodeId, author: &str) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            push_unique(&mut node.authors, author);
        }
    }

    /// Worst status among `Pass`, the node's entries, and its subtree.
    pub fn status(&self, id: NodeId) -> Option<Status> {
        let node = self.node(id)?;
        let own = node.entries.iter().map(|e| e.status);
        let children = node.children.iter().filter_map(|&child| self.status(child));
        Some(own.chain(children).fold(Status::Pass, Status::max))
    }

    pub fn snapshot_node(&self, id: NodeId) -> Option<NodeSnapshot> {
        let node = self.node(id)?;
        Some(NodeSnapshot {
            name: node.name.clone(),
            status: self.status(id)?,
            categories: node.categories.clone(),
            authors: node.authors.clone(),
            logs: node.entries.clone(),
            children: node
                .children
                .iter()
                .filter_map(|&child| self.snapshot_node(child))
                .collect(),
        })
    }
}

/// Nested, serializable copy of a node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub name: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    pub logs: Vec<LogEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}
