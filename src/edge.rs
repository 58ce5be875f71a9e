use crate::{NodeId, Nullable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of an edge, unique within a store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for EdgeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Directed relation between two nodes (data flows FROM `source` TO `target`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,

    /// Emphasis hint (drawn as an animated line)
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub animated: Nullable<bool>,

    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub label: Nullable<String>,

    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub style: Nullable<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub selected: Nullable<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            animated: Nullable::Absent,
            label: Nullable::Absent,
            style: Nullable::Absent,
            selected: Nullable::Absent,
            extra: Map::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Nullable::Value(label.into());
        self
    }

    pub fn animated(mut self) -> Self {
        self.animated = Nullable::Value(true);
        self
    }

    /// Check if this edge touches a given node at either end
    pub fn involves(&self, node: &NodeId) -> bool {
        &self.source == node || &self.target == node
    }

    pub fn starts_from(&self, node: &str) -> bool {
        self.source.as_str() == node
    }

    pub fn ends_at(&self, node: &str) -> bool {
        self.target.as_str() == node
    }

    /// Check if this edge runs along the ordered pair `from -> to`
    pub fn connects(&self, from: &NodeId, to: &NodeId) -> bool {
        &self.source == from && &self.target == to
    }

    pub fn is_selected(&self) -> bool {
        self.selected.as_option().copied().unwrap_or(false)
    }
}
