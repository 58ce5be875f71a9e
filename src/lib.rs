// Pipeline Graph - Core Library

pub mod change;
pub mod config;
pub mod edge;
pub mod editor;
pub mod error;
pub mod event;
pub mod id_generator;
pub mod node;
pub mod nullable;
pub mod seed;
pub mod serialization;
pub mod store;
pub mod validation;

// Re-export main types for convenience
pub use change::{ApplyReport, Change, ChangeApplier, Element, ElementRef};
pub use config::{EditorConfig, ExportSettings};
pub use edge::{Edge, EdgeId};
pub use editor::EditorController;
pub use error::{ElementKind, GraphError, RejectReason};
pub use event::{EventType, GraphEvent};
pub use node::{
    ArtifactDetail, ModuleDetail, Node, NodeData, NodeId, NodeKind, NodePayload, PackageCount,
    Position, ScriptDetail, StageDetail,
};
pub use nullable::Nullable;
pub use serialization::Document;
pub use store::GraphStore;
pub use validation::{ConnectionPolicy, ConnectionValidator, Verdict};
