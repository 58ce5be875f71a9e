use crate::change::{ApplyReport, Change, ChangeApplier};
use crate::config::{EditorConfig, ExportSettings};
use crate::serialization::{self, Document};
use crate::{ConnectionValidator, Edge, EdgeId, GraphError, GraphStore, Verdict};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

/// Orchestrates user-triggered operations on the session's single store
///
/// The controller owns the store for the lifetime of a session; the store
/// is only reachable for mutation through the operations below.
#[derive(Debug, Clone)]
pub struct EditorController {
    store: GraphStore,
    validator: ConnectionValidator,
    export: ExportSettings,
}

impl EditorController {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            store: GraphStore::new(),
            validator: ConnectionValidator::with_policy(config.connection),
            export: config.export,
        }
    }

    /// Start a session from an existing document
    pub fn with_document(config: EditorConfig, document: Document) -> Result<Self, GraphError> {
        let mut editor = Self::new(config);
        let (nodes, edges) = document.into_parts();
        editor.store.replace_all(nodes, edges)?;
        editor.store.clear_events();
        Ok(editor)
    }

    /// Read-only view of the current graph
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Draw a new edge `source -> target`
    ///
    /// Rejections come back as `GraphError::RejectedConnection` and leave
    /// the store untouched.
    pub fn connect(&mut self, source: &str, target: &str) -> Result<EdgeId, GraphError> {
        match self.validator.validate(&self.store, source, target) {
            Verdict::Accepted(id) => {
                self.store.add_edge(Edge::new(id.clone(), source, target))?;
                info!(edge = %id, from = source, to = target, "connected nodes");
                Ok(id)
            }
            Verdict::Rejected(reason) => {
                warn!(from = source, to = target, %reason, "connection rejected");
                Err(reason.into())
            }
        }
    }

    /// Apply a batch of gesture-driven changes
    pub fn apply_changes(
        &mut self,
        changes: impl IntoIterator<Item = Change>,
    ) -> Result<ApplyReport, GraphError> {
        ChangeApplier::apply(&mut self.store, changes)
    }

    /// Remove a node (and its edges); returns false if it was already gone
    pub fn remove_node(&mut self, id: &str) -> Result<bool, GraphError> {
        let report = self.apply_changes([Change::remove_node(id)])?;
        Ok(report.applied == 1)
    }

    /// Replace the whole graph with an imported document
    ///
    /// Never merges. On any failure the store keeps its previous contents.
    pub fn import_document(&mut self, bytes: &[u8]) -> Result<(), GraphError> {
        let document = serialization::decode(bytes).map_err(|err| {
            warn!(error = %err, "rejected imported document");
            err
        })?;

        let (nodes, edges) = document.into_parts();
        let (node_count, edge_count) = (nodes.len(), edges.len());
        self.store.replace_all(nodes, edges).map_err(|err| {
            warn!(error = %err, "imported document is inconsistent");
            err
        })?;

        info!(nodes = node_count, edges = edge_count, "imported document");
        Ok(())
    }

    /// Snapshot of the graph for external delivery
    pub fn export_document(&self) -> Document {
        serialization::encode(&self.store)
    }

    /// The exported document as JSON text, formatted per the export settings
    pub fn export_json(&self) -> Result<String> {
        let document = self.export_document();
        let text = if self.export.pretty {
            serialization::to_json_pretty(&document)?
        } else {
            serde_json::to_string(&document).context("Failed to serialize document")?
        };

        info!(
            nodes = document.nodes.len(),
            edges = document.edges.len(),
            "exported document"
        );
        Ok(text)
    }

    /// Name the export file for `date`
    pub fn export_file_name(&self, date: NaiveDate) -> String {
        serialization::export_file_name(&self.export.file_prefix, date)
    }
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
