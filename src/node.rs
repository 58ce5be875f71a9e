use crate::Nullable;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a node, unique within a store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The closed set of node variants a pipeline diagram knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Module,
    Script,
    Artifact,
    Stage,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Module,
        NodeKind::Script,
        NodeKind::Artifact,
        NodeKind::Stage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Module => "module",
            NodeKind::Script => "script",
            NodeKind::Artifact => "artifact",
            NodeKind::Stage => "stage",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "module" => Ok(NodeKind::Module),
            "script" => Ok(NodeKind::Script),
            "artifact" => Ok(NodeKind::Artifact),
            "stage" => Ok(NodeKind::Stage),
            _ => Err(format!("Unknown node type: {}", s)),
        }
    }
}

/// Canvas position supplied by the caller; never computed here
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(serialize_with = "serialize_coordinate")]
    pub x: f64,
    #[serde(serialize_with = "serialize_coordinate")]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Integral coordinates are written as integers so `50` stays `50`, not `50.0`
fn serialize_coordinate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Package count of a module; documents carry it either as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackageCount {
    Number(u64),
    Text(String),
}

impl PackageCount {
    /// Numeric value, if the text form holds one
    pub fn count(&self) -> Option<u64> {
        match self {
            PackageCount::Number(n) => Some(*n),
            PackageCount::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleDetail {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub packages: Nullable<PackageCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptDetail {
    /// What the script produces
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub output: Nullable<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactDetail {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub format: Nullable<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageDetail {
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub status: Nullable<String>,
}

/// Display data shared by every node variant, plus the variant's own detail
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData<D> {
    pub label: String,

    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,

    #[serde(flatten)]
    pub detail: D,

    /// Keys this model does not interpret, kept for lossless re-export
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<D: Default> NodeData<D> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: Nullable::Absent,
            detail: D::default(),
            extra: Map::new(),
        }
    }
}

impl<D> NodeData<D> {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Nullable::Value(description.into());
        self
    }

    pub fn with_detail(mut self, detail: D) -> Self {
        self.detail = detail;
        self
    }
}

/// A node's `type` tag together with its typed `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodePayload {
    Module(NodeData<ModuleDetail>),
    Script(NodeData<ScriptDetail>),
    Artifact(NodeData<ArtifactDetail>),
    Stage(NodeData<StageDetail>),
}

macro_rules! with_data {
    ($payload:expr, $data:ident => $body:expr) => {
        match $payload {
            NodePayload::Module($data) => $body,
            NodePayload::Script($data) => $body,
            NodePayload::Artifact($data) => $body,
            NodePayload::Stage($data) => $body,
        }
    };
}

impl NodePayload {
    pub fn module(label: impl Into<String>, description: impl Into<String>, packages: Option<PackageCount>) -> Self {
        NodePayload::Module(
            NodeData::new(label)
                .with_description(description)
                .with_detail(ModuleDetail { packages: packages.into() }),
        )
    }

    pub fn script(label: impl Into<String>, description: impl Into<String>, output: Option<String>) -> Self {
        NodePayload::Script(
            NodeData::new(label)
                .with_description(description)
                .with_detail(ScriptDetail { output: output.into() }),
        )
    }

    pub fn artifact(label: impl Into<String>, description: impl Into<String>, format: Option<String>) -> Self {
        NodePayload::Artifact(
            NodeData::new(label)
                .with_description(description)
                .with_detail(ArtifactDetail { format: format.into() }),
        )
    }

    pub fn stage(label: impl Into<String>, description: impl Into<String>, status: Option<String>) -> Self {
        NodePayload::Stage(
            NodeData::new(label)
                .with_description(description)
                .with_detail(StageDetail { status: status.into() }),
        )
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Module(_) => NodeKind::Module,
            NodePayload::Script(_) => NodeKind::Script,
            NodePayload::Artifact(_) => NodeKind::Artifact,
            NodePayload::Stage(_) => NodeKind::Stage,
        }
    }

    pub fn label(&self) -> &str {
        with_data!(self, d => d.label.as_str())
    }

    pub fn description(&self) -> Option<&str> {
        with_data!(self, d => d.description.as_deref())
    }

    pub fn extra(&self) -> &Map<String, Value> {
        with_data!(self, d => &d.extra)
    }
}

/// A typed, positioned entity in the pipeline graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    #[serde(flatten)]
    pub payload: NodePayload,

    pub position: Position,

    /// Selection state written by `select` changes
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub selected: Nullable<bool>,

    /// Top-level keys this model does not interpret (`width`, `dragging`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, payload: NodePayload, position: Position) -> Self {
        Self {
            id: id.into(),
            payload,
            position,
            selected: Nullable::Absent,
            extra: Map::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    pub fn label(&self) -> &str {
        self.payload.label()
    }

    pub fn is_selected(&self) -> bool {
        self.selected.as_option().copied().unwrap_or(false)
    }
}
