// Helper functions to build test graphs and raw documents
#![allow(dead_code)]

use pipeline_graph::{Document, Edge, EditorConfig, EditorController, Node, NodePayload, Position};

/// Two unconnected nodes, `n1` (module) and `n2` (stage)
pub fn two_node_document() -> Document {
    Document::new(
        vec![
            Node::new("n1", NodePayload::module("N1", "first", None), Position::new(0.0, 0.0)),
            Node::new("n2", NodePayload::stage("N2", "second", None), Position::new(250.0, 0.0)),
        ],
        vec![],
    )
}

pub fn two_node_editor() -> EditorController {
    EditorController::with_document(EditorConfig::default(), two_node_document())
        .expect("fixture document is consistent")
}

/// A short chain `src -> mid -> sink` with edges `e1`, `e2`
pub fn chain_document() -> Document {
    Document::new(
        vec![
            Node::new("src", NodePayload::module("Source", "inputs", None), Position::new(0.0, 0.0)),
            Node::new("mid", NodePayload::script("build.sh", "compile", Some("bin".into())), Position::new(300.0, 0.0)),
            Node::new("sink", NodePayload::artifact("Image", "output", Some("OCI".into())), Position::new(600.0, 0.0)),
        ],
        vec![Edge::new("e1", "src", "mid"), Edge::new("e2", "mid", "sink")],
    )
}

pub const SINGLE_MODULE_JSON: &str = r#"{"nodes": [{"id":"a","type":"module","position":{"x":0,"y":0},"data":{"label":"A"}}], "edges": []}"#;

pub const MISSING_EDGES_JSON: &str = r#"{"nodes": [{"id":"a","type":"module","position":{"x":0,"y":0},"data":{"label":"A"}}]}"#;

pub const DANGLING_EDGE_JSON: &str = r#"{
  "nodes": [{"id":"a","type":"module","position":{"x":0,"y":0},"data":{"label":"A"}}],
  "edges": [{"id":"e1","source":"a","target":"gone"}]
}"#;

pub const UNKNOWN_TYPE_JSON: &str = r#"{
  "nodes": [{"id":"a","type":"widget","position":{"x":0,"y":0},"data":{"label":"A"}}],
  "edges": []
}"#;

/// Document with keys the model does not interpret
pub const DECORATED_JSON: &str = r##"{
  "nodes": [
    {
      "id": "mod-core",
      "type": "module",
      "position": {"x": 50, "y": 50.5},
      "data": {"label": "Core Module", "description": "Base", "packages": "15", "color": "teal"},
      "width": 180,
      "selected": true
    },
    {
      "id": "stage-release",
      "type": "stage",
      "position": {"x": 400, "y": 50},
      "data": {"label": "Release", "status": "Ready"}
    }
  ],
  "edges": [
    {
      "id": "e1",
      "source": "mod-core",
      "target": "stage-release",
      "animated": true,
      "style": {"stroke": "#888"},
      "markerEnd": {"type": "arrowclosed"}
    }
  ]
}"##;
