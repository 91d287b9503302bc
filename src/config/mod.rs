pub mod cli;
pub mod file;

pub use cli::CliConfig;
pub use file::FileConfig;

use crate::core::prompt::{PromptTemplate, DEFAULT_PLACEHOLDER, DEFAULT_TEMPLATE};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GENERATE_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-001:generateContent";
pub const DEFAULT_MODELS_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_INPUT_SUFFIX: &str = ".csv";
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-transformed";

/// Fully resolved run configuration: CLI flags override config-file values,
/// which override built-in defaults. Validated before any file is touched.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub api_key: String,
    pub generate_endpoint: String,
    pub models_endpoint: String,
    pub template: String,
    pub placeholder: String,
    pub input_suffix: String,
    pub output_suffix: String,
    pub timeout: Option<Duration>,
    pub verbose: bool,
}

impl Settings {
    pub fn resolve(cli: CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };

        let template = match cli.prompt_file.or(file.prompt_file) {
            Some(path) => fs::read_to_string(&path)?,
            None => DEFAULT_TEMPLATE.to_string(),
        };

        let api_key = cli
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                EtlError::config("missing API key: set GEMINI_API_KEY or pass --api-key")
            })?;

        let settings = Self {
            input_dir: cli.input_dir,
            api_key,
            generate_endpoint: cli
                .endpoint
                .or(file.endpoint)
                .unwrap_or_else(|| DEFAULT_GENERATE_ENDPOINT.to_string()),
            models_endpoint: cli
                .models_endpoint
                .or(file.models_endpoint)
                .unwrap_or_else(|| DEFAULT_MODELS_ENDPOINT.to_string()),
            template,
            placeholder: cli
                .placeholder
                .or(file.placeholder)
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            input_suffix: cli
                .input_suffix
                .or(file.input_suffix)
                .unwrap_or_else(|| DEFAULT_INPUT_SUFFIX.to_string()),
            output_suffix: cli
                .output_suffix
                .or(file.output_suffix)
                .unwrap_or_else(|| DEFAULT_OUTPUT_SUFFIX.to_string()),
            timeout: cli
                .timeout_secs
                .or(file.timeout_secs)
                .map(Duration::from_secs),
            verbose: cli.verbose,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn prompt_template(&self) -> Result<PromptTemplate> {
        PromptTemplate::new(self.template.clone(), self.placeholder.clone())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.generate_endpoint)?;
        validate_url("models_endpoint", &self.models_endpoint)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        validate_non_empty_string("input_suffix", &self.input_suffix)?;
        validate_non_empty_string("output_suffix", &self.output_suffix)?;
        // Surfaces a template without the placeholder before any request.
        self.prompt_template().map(|_| ())
    }
}
