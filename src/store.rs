use crate::{
    Edge, EdgeId, EventType, GraphError, GraphEvent, Node, NodeId, NodePayload, Nullable, Position,
};
use std::collections::HashMap;
use tracing::debug;

/// Authoritative collection of nodes and edges
///
/// Insertion order is kept for both nodes and edges; lookups by id go
/// through an index that is rebuilt whenever an element is removed.
/// Every edge's endpoints resolve to nodes in the same store after each
/// public operation returns.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,

    edges: Vec<Edge>,
    edge_index: HashMap<EdgeId, usize>,

    /// Journal of mutations, excluded from equality and documents
    events: Vec<GraphEvent>,
}

impl GraphStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Node Operations ==========

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.node_index.contains_key(&node.id) {
            return Err(GraphError::duplicate_node(&node.id));
        }

        debug!(node = %node.id, kind = %node.kind(), "adding node");
        self.log_event(EventType::NodeAdded {
            id: node.id.clone(),
            kind: node.kind(),
            position: node.position,
        });

        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a node and every edge that starts or ends at it
    pub fn remove_node(&mut self, id: &str) -> Result<Node, GraphError> {
        let index = *self
            .node_index
            .get(id)
            .ok_or_else(|| GraphError::node_not_found(&NodeId::from(id)))?;

        let node = self.nodes.remove(index);

        let mut cascaded = Vec::new();
        self.edges.retain(|edge| {
            if edge.involves(&node.id) {
                cascaded.push(edge.id.clone());
                false
            } else {
                true
            }
        });

        self.reindex_nodes();
        if !cascaded.is_empty() {
            self.reindex_edges();
        }

        debug!(node = %node.id, cascaded = cascaded.len(), "removed node");
        self.log_event(EventType::NodeRemoved {
            id: node.id.clone(),
            cascaded,
        });

        Ok(node)
    }

    pub fn set_position(&mut self, id: &str, position: Position) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        node.position = position;
        let id = node.id.clone();

        self.log_event(EventType::NodeMoved { id, position });
        Ok(())
    }

    /// Replace a node's type and data, keeping its id, position and place in order
    pub fn set_payload(&mut self, id: &str, payload: NodePayload) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        let kind = payload.kind();
        node.payload = payload;
        let id = node.id.clone();

        self.log_event(EventType::NodeDataChanged { id, kind });
        Ok(())
    }

    pub fn set_node_selected(&mut self, id: &str, selected: bool) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        node.selected = Nullable::Value(selected);
        let id = node.id.clone();

        self.log_event(EventType::NodeSelectionChanged { id, selected });
        Ok(())
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node, GraphError> {
        match self.node_index.get(id) {
            Some(&i) => Ok(&mut self.nodes[i]),
            None => Err(GraphError::node_not_found(&NodeId::from(id))),
        }
    }

    // ========== Edge Operations ==========

    pub fn get_edge(&self, id: &str) -> Option<&Edge> {
        self.edge_index.get(id).map(|&i| &self.edges[i])
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edge_index.contains_key(id)
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = &EdgeId> {
        self.edges.iter().map(|e| &e.id)
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        if self.edge_index.contains_key(&edge.id) {
            return Err(GraphError::duplicate_edge(&edge.id));
        }
        Self::check_endpoints(&edge, &self.node_index)?;

        debug!(edge = %edge.id, from = %edge.source, to = %edge.target, "adding edge");
        self.log_event(EventType::EdgeAdded {
            id: edge.id.clone(),
            from: edge.source.clone(),
            to: edge.target.clone(),
        });

        self.edge_index.insert(edge.id.clone(), self.edges.len());
        self.edges.push(edge);
        Ok(())
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, GraphError> {
        let index = *self
            .edge_index
            .get(id)
            .ok_or_else(|| GraphError::edge_not_found(&EdgeId::from(id)))?;

        let edge = self.edges.remove(index);
        self.reindex_edges();

        debug!(edge = %edge.id, "removed edge");
        self.log_event(EventType::EdgeRemoved {
            id: edge.id.clone(),
        });

        Ok(edge)
    }

    pub fn set_edge_selected(&mut self, id: &str, selected: bool) -> Result<(), GraphError> {
        let edge = match self.edge_index.get(id) {
            Some(&i) => &mut self.edges[i],
            None => return Err(GraphError::edge_not_found(&EdgeId::from(id))),
        };
        edge.selected = Nullable::Value(selected);
        let id = edge.id.clone();

        self.log_event(EventType::EdgeSelectionChanged { id, selected });
        Ok(())
    }

    /// Get all edges starting from a node
    pub fn outgoing_edges(&self, from: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.starts_from(from))
            .collect()
    }

    /// Get all edges ending at a node
    pub fn incoming_edges(&self, to: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| e.ends_at(to))
            .collect()
    }

    /// First edge running along the ordered pair `from -> to`
    pub fn edge_between(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.starts_from(from) && e.ends_at(to))
    }

    fn check_endpoints(edge: &Edge, nodes: &HashMap<NodeId, usize>) -> Result<(), GraphError> {
        for endpoint in [&edge.source, &edge.target] {
            if !nodes.contains_key(endpoint) {
                return Err(GraphError::DanglingReference {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
        Ok(())
    }

    // ========== Whole-Graph Operations ==========

    /// Swap in a complete node and edge set
    ///
    /// The incoming set is checked for duplicate ids and dangling edges
    /// before anything is committed; on failure the store is unchanged.
    pub fn replace_all(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<(), GraphError> {
        let mut node_index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node_index.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::duplicate_node(&node.id));
            }
        }

        let mut edge_index = HashMap::with_capacity(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            if edge_index.insert(edge.id.clone(), i).is_some() {
                return Err(GraphError::duplicate_edge(&edge.id));
            }
            Self::check_endpoints(edge, &node_index)?;
        }

        debug!(nodes = nodes.len(), edges = edges.len(), "replacing graph");
        self.log_event(EventType::Replaced {
            node_count: nodes.len(),
            edge_count: edges.len(),
        });

        self.nodes = nodes;
        self.node_index = node_index;
        self.edges = edges;
        self.edge_index = edge_index;
        Ok(())
    }

    fn reindex_nodes(&mut self) {
        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }

    fn reindex_edges(&mut self) {
        self.edge_index = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
    }

    // ========== Event Logging ==========

    fn log_event(&mut self, event: EventType) {
        self.events.push(GraphEvent::new(event));
    }

    /// Get all events
    pub fn events(&self) -> &[GraphEvent] {
        &self.events
    }

    /// Clear event log
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    // ========== Utility Methods ==========

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Two stores are equal when they hold the same nodes and edges in the same order;
/// the event log is history, not state.
impl PartialEq for GraphStore {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}
