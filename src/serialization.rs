use crate::{Edge, GraphError, GraphStore, Node};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default file name prefix for exported documents
pub const DEFAULT_EXPORT_PREFIX: &str = "ctxos-architecture";

/// Portable, order-preserving form of a full graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Document {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Project a store's current contents
    pub fn from_store(store: &GraphStore) -> Self {
        Self {
            nodes: store.nodes().to_vec(),
            edges: store.edges().to_vec(),
        }
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Encode a store into a document
pub fn encode(store: &GraphStore) -> Document {
    Document::from_store(store)
}

/// Decode a document from JSON bytes
///
/// The top level must be an object holding both a `nodes` and an `edges`
/// sequence (either may be empty). Anything else is a malformed document.
pub fn decode(bytes: &[u8]) -> Result<Document, GraphError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| GraphError::MalformedDocument(format!("invalid JSON: {}", e)))?;

    let object = value.as_object().ok_or_else(|| {
        GraphError::MalformedDocument("top-level value is not an object".to_string())
    })?;

    for key in ["nodes", "edges"] {
        match object.get(key) {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(GraphError::MalformedDocument(format!(
                    "`{}` is not a sequence",
                    key
                )))
            }
            None => {
                return Err(GraphError::MalformedDocument(format!("missing `{}`", key)));
            }
        }
    }

    serde_json::from_value(value).map_err(|e| GraphError::MalformedDocument(e.to_string()))
}

/// Two-space indented JSON text of a document
pub fn to_json_pretty(document: &Document) -> Result<String> {
    serde_json::to_string_pretty(document).context("Failed to serialize document")
}

/// Dated file name for an export, e.g. `ctxos-architecture-2026-10-19.json`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.json", prefix, date.format("%Y-%m-%d"))
}

/// Read the raw bytes of a document file selected for import
pub fn read_document_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read document file: {}", path.display()))
}

/// Write a document into `dir` under `file_name`, returning the full path
pub fn write_document_file(dir: &Path, file_name: &str, document: &Document) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let path = dir.join(file_name);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .with_context(|| format!("Failed to write document to: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush export file: {}", path.display()))?;

    Ok(path)
}
