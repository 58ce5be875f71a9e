use crate::{Edge, EdgeId, GraphError, GraphStore, Node, NodeId, NodePayload, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A node or edge carried by an `add` change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Node(Node),
    Edge(Edge),
}

/// Reference to an existing node or edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementRef {
    Node(NodeId),
    Edge(EdgeId),
}

/// Incremental edit produced by a user gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Change {
    Add { item: Element },
    Remove { target: ElementRef },
    Reposition { id: NodeId, position: Position },
    UpdateData { id: NodeId, payload: NodePayload },
    Select { target: ElementRef, selected: bool },
}

impl Change {
    pub fn add_node(node: Node) -> Self {
        Change::Add {
            item: Element::Node(node),
        }
    }

    pub fn add_edge(edge: Edge) -> Self {
        Change::Add {
            item: Element::Edge(edge),
        }
    }

    pub fn remove_node(id: impl Into<NodeId>) -> Self {
        Change::Remove {
            target: ElementRef::Node(id.into()),
        }
    }

    pub fn remove_edge(id: impl Into<EdgeId>) -> Self {
        Change::Remove {
            target: ElementRef::Edge(id.into()),
        }
    }

    pub fn reposition(id: impl Into<NodeId>, position: Position) -> Self {
        Change::Reposition {
            id: id.into(),
            position,
        }
    }

    pub fn update_data(id: impl Into<NodeId>, payload: NodePayload) -> Self {
        Change::UpdateData {
            id: id.into(),
            payload,
        }
    }

    pub fn select_node(id: impl Into<NodeId>, selected: bool) -> Self {
        Change::Select {
            target: ElementRef::Node(id.into()),
            selected,
        }
    }

    pub fn select_edge(id: impl Into<EdgeId>, selected: bool) -> Self {
        Change::Select {
            target: ElementRef::Edge(id.into()),
            selected,
        }
    }
}

/// How many changes of a batch took effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub applied: usize,
    /// Changes whose target was already gone
    pub skipped: usize,
}

/// Applies batches of changes to a store
pub struct ChangeApplier;

impl ChangeApplier {
    /// Apply a batch in order
    ///
    /// Each change sees the effect of the ones before it. A change whose
    /// target does not exist is skipped. Any other failure (a duplicate id
    /// or a dangling edge on `add`) aborts the batch and leaves the store
    /// as it was before the call.
    pub fn apply(
        store: &mut GraphStore,
        changes: impl IntoIterator<Item = Change>,
    ) -> Result<ApplyReport, GraphError> {
        let mut working = store.clone();
        let mut report = ApplyReport::default();

        for change in changes {
            if Self::apply_one(&mut working, change)? {
                report.applied += 1;
            } else {
                report.skipped += 1;
            }
        }

        *store = working;
        Ok(report)
    }

    fn apply_one(store: &mut GraphStore, change: Change) -> Result<bool, GraphError> {
        match change {
            Change::Add { item: Element::Node(node) } => store.add_node(node)?,
            Change::Add { item: Element::Edge(edge) } => store.add_edge(edge)?,

            Change::Remove { target: ElementRef::Node(id) } => {
                if !store.contains_node(id.as_str()) {
                    return Ok(Self::skip("remove", id.as_str()));
                }
                store.remove_node(id.as_str())?;
            }
            Change::Remove { target: ElementRef::Edge(id) } => {
                if !store.contains_edge(id.as_str()) {
                    return Ok(Self::skip("remove", id.as_str()));
                }
                store.remove_edge(id.as_str())?;
            }

            Change::Reposition { id, position } => {
                if !store.contains_node(id.as_str()) {
                    return Ok(Self::skip("reposition", id.as_str()));
                }
                store.set_position(id.as_str(), position)?;
            }

            Change::UpdateData { id, payload } => {
                if !store.contains_node(id.as_str()) {
                    return Ok(Self::skip("updateData", id.as_str()));
                }
                store.set_payload(id.as_str(), payload)?;
            }

            Change::Select { target: ElementRef::Node(id), selected } => {
                if !store.contains_node(id.as_str()) {
                    return Ok(Self::skip("select", id.as_str()));
                }
                store.set_node_selected(id.as_str(), selected)?;
            }
            Change::Select { target: ElementRef::Edge(id), selected } => {
                if !store.contains_edge(id.as_str()) {
                    return Ok(Self::skip("select", id.as_str()));
                }
                store.set_edge_selected(id.as_str(), selected)?;
            }
        }

        Ok(true)
    }

    fn skip(kind: &str, target: &str) -> bool {
        debug!(change = kind, id = target, "skipping change for missing target");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeKind;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn node(id: &str) -> Node {
        Node::new(
            id,
            NodePayload::artifact(id, "artifact", Some("ISO 9660".to_string())),
            Position::default(),
        )
    }

    fn store() -> GraphStore {
        let mut store = GraphStore::new();
        store.add_node(node("a")).unwrap();
        store.add_node(node("b")).unwrap();
        store.add_node(node("c")).unwrap();
        store.add_edge(Edge::new("e1", "a", "b")).unwrap();
        store.add_edge(Edge::new("e2", "b", "c")).unwrap();
        store
    }

    #[test]
    fn test_add_appends() {
        let mut store = store();
        let report = ChangeApplier::apply(
            &mut store,
            vec![Change::add_node(node("d")), Change::add_edge(Edge::new("e3", "c", "d"))],
        )
        .unwrap();

        assert_eq!(report, ApplyReport { applied: 2, skipped: 0 });
        assert_eq!(store.nodes().last().unwrap().id.as_str(), "d");
        assert_eq!(store.edges().last().unwrap().id.as_str(), "e3");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = store();
        let before = store.clone();

        let report = ChangeApplier::apply(
            &mut store,
            vec![Change::remove_node("ghost"), Change::remove_edge("e99")],
        )
        .unwrap();

        assert_eq!(report, ApplyReport { applied: 0, skipped: 2 });
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_then_touch_same_target() {
        let mut store = store();

        let report = ChangeApplier::apply(
            &mut store,
            vec![
                Change::remove_node("b"),
                Change::reposition("b", Position::new(5.0, 5.0)),
                Change::remove_edge("e1"),
                Change::select_node("b", true),
            ],
        )
        .unwrap();

        // e1 and e2 went with b, so only the first change took effect
        assert_eq!(report, ApplyReport { applied: 1, skipped: 3 });
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_in_place_changes_keep_order() {
        let mut store = store();

        ChangeApplier::apply(
            &mut store,
            vec![
                Change::reposition("b", Position::new(300.0, 150.0)),
                Change::update_data("a", NodePayload::stage("A", "promoted", Some("Running".to_string()))),
                Change::select_node("c", true),
                Change::select_edge("e2", true),
            ],
        )
        .unwrap();

        let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(store.get_node("b").unwrap().position, Position::new(300.0, 150.0));
        assert_eq!(store.get_node("a").unwrap().kind(), NodeKind::Stage);
        assert!(store.get_node("c").unwrap().is_selected());
        assert!(store.get_edge("e2").unwrap().is_selected());
        assert!(!store.get_edge("e1").unwrap().is_selected());
    }

    #[test]
    fn test_failed_batch_leaves_store_unchanged() {
        let mut store = store();
        let before = store.clone();

        let result = ChangeApplier::apply(
            &mut store,
            vec![
                Change::remove_node("a"),
                Change::add_edge(Edge::new("e3", "c", "ghost")),
            ],
        );

        assert_matches!(result, Err(GraphError::DanglingReference { .. }));
        assert_eq!(store, before);

        let result = ChangeApplier::apply(&mut store, vec![Change::add_node(node("a"))]);
        assert_matches!(result, Err(GraphError::DuplicateId { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn test_changes_from_json() {
        let batch: Vec<Change> = serde_json::from_value(json!([
            {"type": "reposition", "id": "a", "position": {"x": 12, "y": 34.5}},
            {"type": "select", "target": {"edge": "e1"}, "selected": true},
            {"type": "remove", "target": {"node": "c"}},
            {"type": "updateData", "id": "b", "payload": {
                "type": "module",
                "data": {"label": "B", "packages": "4"}
            }},
            {"type": "add", "item": {"node": {
                "id": "d", "type": "stage", "position": {"x": 0, "y": 0},
                "data": {"label": "D", "status": "Ready"}
            }}}
        ]))
        .unwrap();

        assert_eq!(batch[0], Change::reposition("a", Position::new(12.0, 34.5)));
        assert_eq!(batch[2], Change::remove_node("c"));

        let mut store = store();
        let report = ChangeApplier::apply(&mut store, batch).unwrap();
        assert_eq!(report.applied, 5);
        assert_eq!(store.get_node("b").unwrap().kind(), NodeKind::Module);
        assert_eq!(store.get_node("d").unwrap().label(), "D");
        assert!(store.get_node("c").is_none());
    }
}
