use crate::serialization::DEFAULT_EXPORT_PREFIX;
use crate::ConnectionPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// How exported documents are named and formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// File name prefix; the export date and `.json` are appended
    pub file_prefix: String,
    pub pretty: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            pretty: true,
        }
    }
}

/// Settings for one editing session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub connection: ConnectionPolicy,
    pub export: ExportSettings,
}

impl EditorConfig {
    /// Load config from a JSON file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config from: {}", path.display()))
    }
}
