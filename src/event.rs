use crate::{EdgeId, NodeId, NodeKind, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A store mutation with timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEvent {
    pub timestamp: DateTime<Utc>,
    pub event: EventType,
}

impl GraphEvent {
    /// Create a new event with the current timestamp
    pub fn new(event: EventType) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Types of mutations that can occur in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    NodeAdded {
        id: NodeId,
        kind: NodeKind,
        position: Position,
    },

    /// `cascaded` lists the edges removed along with the node
    NodeRemoved {
        id: NodeId,
        cascaded: Vec<EdgeId>,
    },

    NodeMoved {
        id: NodeId,
        position: Position,
    },

    NodeDataChanged {
        id: NodeId,
        kind: NodeKind,
    },

    NodeSelectionChanged {
        id: NodeId,
        selected: bool,
    },

    EdgeAdded {
        id: EdgeId,
        from: NodeId,
        to: NodeId,
    },

    EdgeRemoved {
        id: EdgeId,
    },

    EdgeSelectionChanged {
        id: EdgeId,
        selected: bool,
    },

    /// Whole graph swapped by an import
    Replaced {
        node_count: usize,
        edge_count: usize,
    },
}
