use crate::edges::CannyOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct CannyToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub canny: CannyOptions,
    pub output: CannyOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct CannyOutputConfig {
    pub edges_image: PathBuf,
    /// Optional per-stage timing/threshold trace.
    pub trace_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<CannyToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
