use crate::id_generator::IdGenerator;
use crate::{EdgeId, GraphStore, NodeId, RejectReason};
use serde::{Deserialize, Serialize};

/// Which structural rules a new connection must satisfy
///
/// Both rules reject by default, keeping the graph a simple directed relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionPolicy {
    pub allow_self_loops: bool,
    pub allow_parallel_edges: bool,
}

/// Outcome of checking a proposed connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The edge may be added under this freshly generated id
    Accepted(EdgeId),
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }

    pub fn into_result(self) -> Result<EdgeId, RejectReason> {
        match self {
            Verdict::Accepted(id) => Ok(id),
            Verdict::Rejected(reason) => Err(reason),
        }
    }
}

/// Decides whether a proposed edge may be added to a store
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionValidator {
    policy: ConnectionPolicy,
}

impl ConnectionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ConnectionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ConnectionPolicy {
        self.policy
    }

    /// Check `source -> target` against the store
    ///
    /// Rules run in a fixed order: both endpoints exist, no self-loop,
    /// no existing edge along the same ordered pair.
    pub fn validate(&self, store: &GraphStore, source: &str, target: &str) -> Verdict {
        for endpoint in [source, target] {
            if !store.contains_node(endpoint) {
                return Verdict::Rejected(RejectReason::UnknownNode(NodeId::from(endpoint)));
            }
        }

        if source == target && !self.policy.allow_self_loops {
            return Verdict::Rejected(RejectReason::SelfLoop(NodeId::from(source)));
        }

        if !self.policy.allow_parallel_edges {
            if let Some(existing) = store.edge_between(source, target) {
                return Verdict::Rejected(RejectReason::DuplicateEdge {
                    existing: existing.id.clone(),
                    from: NodeId::from(source),
                    to: NodeId::from(target),
                });
            }
        }

        let mut ids = IdGenerator::from_existing_ids(store.edge_ids());
        Verdict::Accepted(ids.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Node, NodePayload, Position};

    fn store() -> GraphStore {
        let mut store = GraphStore::new();
        for id in ["n1", "n2", "n3"] {
            store
                .add_node(Node::new(
                    id,
                    NodePayload::stage(id, "stage", None),
                    Position::default(),
                ))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_accepts_new_connection() {
        let store = store();
        let verdict = ConnectionValidator::new().validate(&store, "n1", "n2");
        assert_eq!(verdict, Verdict::Accepted(EdgeId::from("e1")));
    }

    #[test]
    fn test_unknown_node() {
        let store = store();
        let validator = ConnectionValidator::new();

        assert_eq!(
            validator.validate(&store, "ghost", "n2"),
            Verdict::Rejected(RejectReason::UnknownNode(NodeId::from("ghost")))
        );
        assert_eq!(
            validator.validate(&store, "n1", "ghost"),
            Verdict::Rejected(RejectReason::UnknownNode(NodeId::from("ghost")))
        );
    }

    #[test]
    fn test_unknown_checked_before_self_loop() {
        let store = store();
        let verdict = ConnectionValidator::new().validate(&store, "ghost", "ghost");
        assert_eq!(
            verdict,
            Verdict::Rejected(RejectReason::UnknownNode(NodeId::from("ghost")))
        );
    }

    #[test]
    fn test_self_loop() {
        let store = store();
        assert_eq!(
            ConnectionValidator::new().validate(&store, "n1", "n1"),
            Verdict::Rejected(RejectReason::SelfLoop(NodeId::from("n1")))
        );

        let permissive = ConnectionValidator::with_policy(ConnectionPolicy {
            allow_self_loops: true,
            ..Default::default()
        });
        assert!(permissive.validate(&store, "n1", "n1").is_accepted());
    }

    #[test]
    fn test_duplicate_edge() {
        let mut store = store();
        store.add_edge(Edge::new("e1", "n1", "n2")).unwrap();

        let validator = ConnectionValidator::new();
        assert_eq!(
            validator.validate(&store, "n1", "n2"),
            Verdict::Rejected(RejectReason::DuplicateEdge {
                existing: EdgeId::from("e1"),
                from: NodeId::from("n1"),
                to: NodeId::from("n2"),
            })
        );

        // The reverse direction is a different ordered pair
        assert_eq!(
            validator.validate(&store, "n2", "n1"),
            Verdict::Accepted(EdgeId::from("e2"))
        );

        let permissive = ConnectionValidator::with_policy(ConnectionPolicy {
            allow_parallel_edges: true,
            ..Default::default()
        });
        assert_eq!(
            permissive.validate(&store, "n1", "n2"),
            Verdict::Accepted(EdgeId::from("e2"))
        );
    }

    #[test]
    fn test_fresh_id_avoids_imported_ids() {
        let mut store = store();
        store.add_edge(Edge::new("e5", "n1", "n2")).unwrap();
        store.add_edge(Edge::new("link", "n2", "n3")).unwrap();

        let verdict = ConnectionValidator::new().validate(&store, "n1", "n3");
        assert_eq!(verdict.into_result(), Ok(EdgeId::from("e6")));
    }
}
