use crate::{EdgeId, NodeId};
use thiserror::Error;

/// Which kind of graph element an error or change refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Edge,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Node => write!(f, "node"),
            ElementKind::Edge => write!(f, "edge"),
        }
    }
}

/// Why a proposed connection was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("node {0} cannot connect to itself")]
    SelfLoop(NodeId),

    #[error("edge {existing} already connects {from} -> {to}")]
    DuplicateEdge {
        existing: EdgeId,
        from: NodeId,
        to: NodeId,
    },
}

/// Errors produced by the graph model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: ElementKind, id: String },

    #[error("edge {edge} references missing node {node}")]
    DanglingReference { edge: EdgeId, node: NodeId },

    #[error("{kind} not found: {id}")]
    NotFound { kind: ElementKind, id: String },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("connection rejected: {0}")]
    RejectedConnection(#[from] RejectReason),
}

impl GraphError {
    pub(crate) fn duplicate_node(id: &NodeId) -> Self {
        GraphError::DuplicateId {
            kind: ElementKind::Node,
            id: id.to_string(),
        }
    }

    pub(crate) fn duplicate_edge(id: &EdgeId) -> Self {
        GraphError::DuplicateId {
            kind: ElementKind::Edge,
            id: id.to_string(),
        }
    }

    pub(crate) fn node_not_found(id: &NodeId) -> Self {
        GraphError::NotFound {
            kind: ElementKind::Node,
            id: id.to_string(),
        }
    }

    pub(crate) fn edge_not_found(id: &EdgeId) -> Self {
        GraphError::NotFound {
            kind: ElementKind::Edge,
            id: id.to_string(),
        }
    }

    /// Message suitable for showing to whoever triggered the operation
    pub fn user_message(&self) -> String {
        match self {
            GraphError::MalformedDocument(_) => {
                "Failed to import pipeline document. Please check the file format.".to_string()
            }
            GraphError::RejectedConnection(reason) => format!("Cannot connect: {}", reason),
            other => other.to_string(),
        }
    }
}
