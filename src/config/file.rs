use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional TOML defaults for everything except the input directory and the
/// API key, which stay at the process boundary (argument and env var).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub models_endpoint: Option<String>,
    pub prompt_file: Option<PathBuf>,
    pub placeholder: Option<String>,
    pub input_suffix: Option<String>,
    pub output_suffix: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
